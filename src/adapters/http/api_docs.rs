//! Machine-readable API description served at /api-docs.json.
//!
//! A hand-maintained OpenAPI 3 document covering the public surface. Kept in
//! code so the route table and the description live in the same repository.

use axum::Json;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

static OPENAPI: Lazy<Value> = Lazy::new(build_document);

/// GET /api-docs.json
pub async fn serve() -> Json<Value> {
    Json(OPENAPI.clone())
}

fn path(summary: &str, tag: &str, authed: bool) -> Value {
    let mut operation = json!({
        "summary": summary,
        "tags": [tag],
        "responses": { "200": { "description": "OK" } },
    });
    if authed {
        operation["security"] = json!([{ "bearerAuth": [] }]);
    }
    operation
}

fn build_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "FitAI API",
            "description": "AI fitness coaching backend",
            "version": "1.0.0",
        },
        "servers": [{ "url": "/api/v1" }],
        "components": {
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
            }
        },
        "paths": {
            "/auth/send-code": { "post": path("Send phone verification code", "Auth", false) },
            "/auth/verify-code": { "post": path("Verify phone code and log in", "Auth", false) },
            "/auth/refresh": { "post": path("Refresh access token", "Auth", false) },
            "/auth/signup/email": { "post": path("Sign up with email and password", "Auth", false) },
            "/auth/verify/email": { "post": path("Verify email code and log in", "Auth", false) },
            "/auth/login/email": { "post": path("Log in with email and password", "Auth", false) },
            "/auth/forgot-password": { "post": path("Request a password reset code", "Auth", false) },
            "/auth/reset-password": { "post": path("Reset password with a code", "Auth", false) },
            "/users/me": { "get": path("Get current profile", "Users", true) },
            "/users/complete": { "post": path("Complete onboarding profile", "Users", true) },
            "/users/me/update": { "put": path("Update profile", "Users", true) },
            "/users/schedule": { "get": path("Get weekly schedule", "Users", true) },
            "/users/photos": {
                "get": path("List progress photos", "Users", true),
                "post": path("Upload a progress photo", "Users", true),
            },
            "/users/me/delete": { "delete": path("Delete account", "Users", true) },
            "/workouts/generate": { "post": path("Generate a workout plan", "Workouts", true) },
            "/workouts/active": { "get": path("Get the active workout plan", "Workouts", true) },
            "/workouts/log": { "post": path("Log a completed session", "Workouts", true) },
            "/nutrition/meal-plan": { "post": path("Generate a meal plan", "Nutrition", true) },
            "/nutrition/recipes/search": { "post": path("Search recipes", "Nutrition", true) },
            "/nutrition/analyze-photo": { "post": path("Analyze a food photo", "Nutrition", true) },
            "/chat/message": { "post": path("Send a chat message", "Chat", true) },
            "/chat/history": { "get": path("Get chat history", "Chat", true) },
            "/subscriptions": { "get": path("Get subscription status", "Subscriptions", true) },
            "/subscriptions/checkout": { "post": path("Create a checkout session", "Subscriptions", true) },
            "/subscriptions/cancel": { "post": path("Cancel at period end", "Subscriptions", true) },
            "/webhooks/stripe": { "post": path("Stripe webhook (signature verified)", "Webhooks", false) },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_all_areas() {
        let doc = build_document();
        let paths = doc["paths"].as_object().unwrap();

        assert!(paths.contains_key("/auth/send-code"));
        assert!(paths.contains_key("/workouts/generate"));
        assert!(paths.contains_key("/nutrition/analyze-photo"));
        assert!(paths.contains_key("/chat/message"));
        assert!(paths.contains_key("/subscriptions/checkout"));
        assert!(paths.contains_key("/webhooks/stripe"));
    }

    #[test]
    fn gated_paths_declare_bearer_auth() {
        let doc = build_document();
        assert!(doc["paths"]["/chat/message"]["post"]["security"].is_array());
        assert!(doc["paths"]["/auth/send-code"]["post"]["security"].is_null());
    }
}
