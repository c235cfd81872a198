//! HTTP adapter - axum routers, DTOs, middleware, and application state.

pub mod api_docs;
pub mod auth;
pub mod chat;
pub mod envelope;
pub mod middleware;
pub mod nutrition;
pub mod profile;
pub mod subscriptions;
pub mod workouts;

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::{Json, Router};

use crate::application::handlers::auth::{
    EmailLoginHandler, EmailSignupHandler, ForgotPasswordHandler, RefreshTokenHandler,
    ResetPasswordHandler, SendPhoneCodeHandler, VerifyEmailHandler, VerifyPhoneCodeHandler,
};
use crate::application::handlers::chat::{GetHistoryHandler, SendMessageHandler};
use crate::application::handlers::nutrition::{
    AnalyzeFoodPhotoHandler, GenerateMealPlanHandler, SearchRecipesHandler,
};
use crate::application::handlers::profile::{
    CompleteProfileHandler, DeleteAccountHandler, GetProfileHandler, GetWeeklyScheduleHandler,
    ListPhotosHandler, UpdateProfileHandler, UploadPhotoHandler,
};
use crate::application::handlers::subscriptions::{
    CancelSubscriptionHandler, CreateCheckoutHandler, GetSubscriptionHandler,
    HandleStripeWebhookHandler, PlanPrices,
};
use crate::application::handlers::workouts::{
    GeneratePlanHandler, GetActivePlanHandler, LogSessionHandler,
};
use crate::application::EntitlementGate;
use crate::domain::subscription::StripeWebhookVerifier;
use crate::ports::{
    AiProvider, ChatRepository, EmailSender, FieldEncryptor, PaymentProvider, PhotoRepository,
    RateLimiter, SmsSender, SubscriptionRepository, TokenService, UsageStore, UserRepository,
    VerificationCodeRepository, WorkoutRepository,
};

/// Shared application state: every port constructed once at startup,
/// injected into handlers per request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub codes: Arc<dyn VerificationCodeRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub usage: Arc<dyn UsageStore>,
    pub workouts: Arc<dyn WorkoutRepository>,
    pub chats: Arc<dyn ChatRepository>,
    pub photos: Arc<dyn PhotoRepository>,
    pub ai: Arc<dyn AiProvider>,
    pub payments: Arc<dyn PaymentProvider>,
    pub sms: Arc<dyn SmsSender>,
    pub email: Arc<dyn EmailSender>,
    pub encryptor: Arc<dyn FieldEncryptor>,
    pub tokens: Arc<dyn TokenService>,
    pub entitlements: Arc<EntitlementGate>,
    pub plan_prices: PlanPrices,
    pub stripe_webhook_secret: String,
    pub default_country_code: String,
    pub development_mode: bool,
}

impl AppState {
    // Handlers are cheap to build: each is a couple of Arc clones.

    pub fn send_phone_code_handler(&self) -> SendPhoneCodeHandler {
        SendPhoneCodeHandler::new(
            self.codes.clone(),
            self.sms.clone(),
            self.default_country_code.clone(),
            self.development_mode,
        )
    }

    pub fn verify_phone_code_handler(&self) -> VerifyPhoneCodeHandler {
        VerifyPhoneCodeHandler::new(
            self.codes.clone(),
            self.users.clone(),
            self.subscriptions.clone(),
            self.tokens.clone(),
            self.default_country_code.clone(),
        )
    }

    pub fn email_signup_handler(&self) -> EmailSignupHandler {
        EmailSignupHandler::new(
            self.users.clone(),
            self.codes.clone(),
            self.email.clone(),
            self.development_mode,
        )
    }

    pub fn verify_email_handler(&self) -> VerifyEmailHandler {
        VerifyEmailHandler::new(
            self.codes.clone(),
            self.users.clone(),
            self.subscriptions.clone(),
            self.tokens.clone(),
        )
    }

    pub fn email_login_handler(&self) -> EmailLoginHandler {
        EmailLoginHandler::new(self.users.clone(), self.tokens.clone())
    }

    pub fn forgot_password_handler(&self) -> ForgotPasswordHandler {
        ForgotPasswordHandler::new(
            self.users.clone(),
            self.codes.clone(),
            self.email.clone(),
            self.development_mode,
        )
    }

    pub fn reset_password_handler(&self) -> ResetPasswordHandler {
        ResetPasswordHandler::new(self.codes.clone(), self.users.clone())
    }

    pub fn refresh_token_handler(&self) -> RefreshTokenHandler {
        RefreshTokenHandler::new(self.tokens.clone(), self.users.clone())
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.users.clone(), self.encryptor.clone())
    }

    pub fn complete_profile_handler(&self) -> CompleteProfileHandler {
        CompleteProfileHandler::new(self.users.clone(), self.encryptor.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.users.clone(), self.encryptor.clone())
    }

    pub fn weekly_schedule_handler(&self) -> GetWeeklyScheduleHandler {
        GetWeeklyScheduleHandler::new(self.users.clone())
    }

    pub fn list_photos_handler(&self) -> ListPhotosHandler {
        ListPhotosHandler::new(self.photos.clone())
    }

    pub fn upload_photo_handler(&self) -> UploadPhotoHandler {
        UploadPhotoHandler::new(self.photos.clone())
    }

    pub fn delete_account_handler(&self) -> DeleteAccountHandler {
        DeleteAccountHandler::new(self.users.clone(), self.chats.clone(), self.photos.clone())
    }

    pub fn generate_plan_handler(&self) -> GeneratePlanHandler {
        GeneratePlanHandler::new(self.users.clone(), self.workouts.clone(), self.ai.clone())
    }

    pub fn get_active_plan_handler(&self) -> GetActivePlanHandler {
        GetActivePlanHandler::new(self.workouts.clone())
    }

    pub fn log_session_handler(&self) -> LogSessionHandler {
        LogSessionHandler::new(self.workouts.clone())
    }

    pub fn generate_meal_plan_handler(&self) -> GenerateMealPlanHandler {
        GenerateMealPlanHandler::new(self.users.clone(), self.ai.clone())
    }

    pub fn search_recipes_handler(&self) -> SearchRecipesHandler {
        SearchRecipesHandler::new(self.ai.clone())
    }

    pub fn analyze_food_photo_handler(&self) -> AnalyzeFoodPhotoHandler {
        AnalyzeFoodPhotoHandler::new(self.ai.clone())
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(self.users.clone(), self.chats.clone(), self.ai.clone())
    }

    pub fn chat_history_handler(&self) -> GetHistoryHandler {
        GetHistoryHandler::new(self.chats.clone())
    }

    pub fn get_subscription_handler(&self) -> GetSubscriptionHandler {
        GetSubscriptionHandler::new(self.subscriptions.clone())
    }

    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(
            self.users.clone(),
            self.subscriptions.clone(),
            self.payments.clone(),
            self.plan_prices.clone(),
        )
    }

    pub fn cancel_subscription_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.subscriptions.clone(), self.payments.clone())
    }

    pub fn stripe_webhook_handler(&self) -> HandleStripeWebhookHandler {
        HandleStripeWebhookHandler::new(
            self.subscriptions.clone(),
            StripeWebhookVerifier::new(self.stripe_webhook_secret.clone()),
        )
    }
}

/// Assembles the full API router.
///
/// Auth endpoints and the Stripe webhook are public; everything else
/// requires a bearer token. Rate limiting is applied globally with a
/// tighter limiter on `/auth`.
pub fn api_router(
    state: AppState,
    general_limiter: Arc<dyn RateLimiter>,
    auth_limiter: Arc<dyn RateLimiter>,
    cors_origins: Vec<String>,
) -> Router {
    let authed = Router::new()
        .nest("/users", profile::routes())
        .nest("/workouts", workouts::routes())
        .nest("/nutrition", nutrition::routes())
        .nest("/chat", chat::routes())
        .nest("/subscriptions", subscriptions::routes())
        .layer(axum::middleware::from_fn_with_state(
            state.tokens.clone(),
            middleware::auth_middleware,
        ));

    let auth_routes = auth::routes().layer(axum::middleware::from_fn_with_state(
        auth_limiter,
        middleware::rate_limit_middleware,
    ));

    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/webhooks", subscriptions::webhook_routes())
        .merge(authed)
        .layer(axum::middleware::from_fn_with_state(
            general_limiter,
            middleware::rate_limit_middleware,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs.json", get(api_docs::serve))
        .nest("/api/v1", api)
        .layer(cors_layer(cors_origins))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::timeout::TimeoutLayer::new(Duration::from_secs(60)))
        .with_state(state)
}

fn cors_layer(origins: Vec<String>) -> tower_http::cors::CorsLayer {
    use tower_http::cors::{AllowOrigin, Any, CorsLayer};

    let parsed: Vec<http::HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if parsed.is_empty() {
        // no configured origins: development default
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// GET /health - liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
