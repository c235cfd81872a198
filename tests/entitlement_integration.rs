//! Integration tests for the entitlement gate wired to the chat flow and
//! the billing webhook.
//!
//! Exercises the full path an AI-cost request takes: quota check, model
//! call, usage record, and how plan changes driven by webhook events shift
//! the quotas.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use fitai::application::handlers::chat::{SendMessageCommand, SendMessageHandler};
use fitai::application::handlers::subscriptions::{
    HandleStripeWebhookHandler, WebhookDisposition,
};
use fitai::application::EntitlementGate;
use fitai::domain::chat::ChatMessage;
use fitai::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use fitai::domain::subscription::{
    StripeEvent, StripeWebhookVerifier, Subscription, SubscriptionPlan,
};
use fitai::domain::usage::{DailyUsage, UsageCategory, UsageDate};
use fitai::domain::user::{ScheduleSlot, User};
use fitai::ports::{
    AiError, AiProvider, ChatRepository, ChatTurn, SubscriptionRepository, UsageStore,
    UserRepository,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct MockSubscriptions {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl MockSubscriptions {
    fn with(subscription: Subscription) -> Arc<Self> {
        Arc::new(Self {
            subscriptions: Mutex::new(vec![subscription]),
        })
    }

    fn current(&self) -> Subscription {
        self.subscriptions.lock().unwrap()[0].clone()
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptions {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.subscriptions.lock().unwrap().push(subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut subs = self.subscriptions.lock().unwrap();
        if let Some(s) = subs.iter_mut().find(|s| s.id == subscription.id) {
            *s = subscription.clone();
        }
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError> {
        let subs = self.subscriptions.lock().unwrap();
        Ok(subs.iter().find(|s| &s.user_id == user_id).cloned())
    }

    async fn find_by_stripe_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<Subscription>, DomainError> {
        let subs = self.subscriptions.lock().unwrap();
        Ok(subs
            .iter()
            .find(|s| s.stripe_customer_id.as_deref() == Some(customer_id))
            .cloned())
    }
}

struct MockUsage {
    rows: Mutex<Vec<DailyUsage>>,
}

impl MockUsage {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl UsageStore for MockUsage {
    async fn find(
        &self,
        user_id: &UserId,
        date: UsageDate,
    ) -> Result<Option<DailyUsage>, DomainError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| &r.user_id == user_id && r.date == date)
            .cloned())
    }

    async fn insert(&self, usage: &DailyUsage) -> Result<(), DomainError> {
        self.rows.lock().unwrap().push(usage.clone());
        Ok(())
    }

    async fn update(&self, usage: &DailyUsage) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(r) = rows
            .iter_mut()
            .find(|r| r.user_id == usage.user_id && r.date == usage.date)
        {
            *r = usage.clone();
        }
        Ok(())
    }
}

struct MockUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for MockUsers {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == user.id) {
            *u = user.clone();
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.phone.as_deref() == Some(phone)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_deref() == Some(email)).cloned())
    }

    async fn weekly_schedule(&self, _user_id: &UserId) -> Result<Vec<ScheduleSlot>, DomainError> {
        Ok(Vec::new())
    }

    async fn replace_weekly_schedule(
        &self,
        _user_id: &UserId,
        _slots: &[ScheduleSlot],
    ) -> Result<(), DomainError> {
        Ok(())
    }
}

struct MockChats {
    messages: Mutex<Vec<ChatMessage>>,
}

#[async_trait]
impl ChatRepository for MockChats {
    async fn save(&self, message: &ChatMessage) -> Result<(), DomainError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn history(&self, user_id: &UserId) -> Result<Vec<ChatMessage>, DomainError> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| &m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn recent(&self, user_id: &UserId, limit: u32) -> Result<Vec<ChatMessage>, DomainError> {
        let mut all = self.history(user_id).await?;
        let skip = all.len().saturating_sub(limit as usize);
        Ok(all.split_off(skip))
    }

    async fn delete_all_for_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        self.messages
            .lock()
            .unwrap()
            .retain(|m| &m.user_id != user_id);
        Ok(())
    }
}

struct CannedAi;

#[async_trait]
impl AiProvider for CannedAi {
    async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
        Ok("ok".to_string())
    }

    async fn generate_chat(
        &self,
        _system_instruction: &str,
        _history: &[ChatTurn],
        message: &str,
    ) -> Result<String, AiError> {
        Ok(format!("re: {}", message))
    }

    async fn generate_with_image(
        &self,
        _prompt: &str,
        _image: &[u8],
        _mime_type: &str,
    ) -> Result<String, AiError> {
        Ok("ok".to_string())
    }
}

fn signed_event(secret: &str, body: &serde_json::Value) -> (Vec<u8>, String) {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    let payload = serde_json::to_string(body).unwrap();
    let timestamp = chrono::Utc::now().timestamp();
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    (
        payload.into_bytes(),
        format!("t={},v1={}", timestamp, signature),
    )
}

fn limited_free_subscription(user_id: UserId) -> Subscription {
    let mut subscription = Subscription::start_trial(user_id, Timestamp::now());
    subscription.plan = SubscriptionPlan::LimitedFree;
    subscription.attach_customer("cus_test", Timestamp::now());
    subscription
}

// =============================================================================
// Chat gating
// =============================================================================

#[tokio::test]
async fn limited_free_user_gets_three_chats_then_quota_error() {
    let user_id = UserId::new();
    let subscriptions = MockSubscriptions::with(limited_free_subscription(user_id));
    let usage = MockUsage::new();
    let gate = EntitlementGate::new(subscriptions.clone(), usage.clone(), 0);

    let chats = Arc::new(MockChats {
        messages: Mutex::new(Vec::new()),
    });
    let users = Arc::new(MockUsers {
        users: Mutex::new(vec![User::from_phone("+351912345678", "+351", Timestamp::now())]),
    });
    let send = SendMessageHandler::new(users, chats.clone(), Arc::new(CannedAi));

    // the gated flow: check, act, record - three times
    for i in 0..3 {
        gate.check(&user_id, UsageCategory::Chat).await.unwrap();
        let reply = send
            .handle(SendMessageCommand {
                user_id,
                message: format!("pergunta {}", i),
            })
            .await
            .unwrap();
        assert!(reply.message.starts_with("re: "));
        gate.record(&user_id, UsageCategory::Chat).await;
    }

    // fourth check fails with the machine-readable payload
    let err = gate.check(&user_id, UsageCategory::Chat).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::QuotaExceeded);
    let details = err.details.unwrap();
    assert_eq!(details["currentUsage"], 3);
    assert_eq!(details["maxLimit"], 3);
    assert_eq!(details["plan"], "limited_free");

    // both sides of each conversation were persisted
    assert_eq!(chats.history(&user_id).await.unwrap().len(), 6);
}

#[tokio::test]
async fn user_without_subscription_is_rejected_by_gate() {
    let gate = EntitlementGate::new(
        MockSubscriptions::with(limited_free_subscription(UserId::new())),
        MockUsage::new(),
        0,
    );

    let stranger = UserId::new();
    let err = gate.check(&stranger, UsageCategory::Chat).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SubscriptionNotFound);
}

// =============================================================================
// Webhook-driven plan changes shift quotas
// =============================================================================

#[tokio::test]
async fn upgrade_via_webhook_unlocks_blocked_category() {
    let user_id = UserId::new();
    let subscriptions = MockSubscriptions::with(limited_free_subscription(user_id));
    let usage = MockUsage::new();
    let gate = EntitlementGate::new(subscriptions.clone(), usage, 0);

    // limited_free blocks image analysis outright
    let err = gate
        .check(&user_id, UsageCategory::ImageAnalysis)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::QuotaExceeded);

    // a signed checkout.session.completed event upgrades the plan to pro
    let secret = "whsec_integration_test";
    let webhook = HandleStripeWebhookHandler::new(
        subscriptions.clone(),
        StripeWebhookVerifier::new(secret),
    );
    let (payload, signature) = signed_event(
        secret,
        &json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "created": chrono::Utc::now().timestamp(),
            "livemode": false,
            "data": { "object": {
                "id": "cs_1",
                "customer": "cus_test",
                "subscription": "sub_1",
                "metadata": { "user_id": user_id.to_string(), "plan": "pro" },
            }},
        }),
    );

    let disposition = webhook
        .handle(fitai::application::handlers::subscriptions::HandleStripeWebhookCommand {
            payload,
            signature,
        })
        .await
        .unwrap();
    assert_eq!(disposition, WebhookDisposition::Processed);
    assert_eq!(subscriptions.current().plan, SubscriptionPlan::Pro);

    // the pro plan allows image analysis
    gate.check(&user_id, UsageCategory::ImageAnalysis)
        .await
        .unwrap();
}

#[tokio::test]
async fn downgrade_via_webhook_restores_limits() {
    let user_id = UserId::new();
    let mut subscription = limited_free_subscription(user_id);
    subscription.activate_plan(SubscriptionPlan::Unlimited, "sub_1", Timestamp::now());
    let subscriptions = MockSubscriptions::with(subscription);
    let usage = MockUsage::new();
    let gate = EntitlementGate::new(subscriptions.clone(), usage, 0);

    // unlimited: many chats, no complaints
    for _ in 0..10 {
        gate.check(&user_id, UsageCategory::Chat).await.unwrap();
        gate.record(&user_id, UsageCategory::Chat).await;
    }

    // provider-side deletion downgrades to limited_free
    let secret = "whsec_integration_test";
    let webhook = HandleStripeWebhookHandler::new(
        subscriptions.clone(),
        StripeWebhookVerifier::new(secret),
    );
    let (payload, signature) = signed_event(
        secret,
        &json!({
            "id": "evt_2",
            "type": "customer.subscription.deleted",
            "created": chrono::Utc::now().timestamp(),
            "livemode": false,
            "data": { "object": {
                "id": "sub_1",
                "customer": "cus_test",
                "status": "canceled",
            }},
        }),
    );
    webhook
        .handle(fitai::application::handlers::subscriptions::HandleStripeWebhookCommand {
            payload,
            signature,
        })
        .await
        .unwrap();

    // the 10 recorded chats are now far over the limited_free limit of 3
    let err = gate.check(&user_id, UsageCategory::Chat).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::QuotaExceeded);
    let details = err.details.unwrap();
    assert_eq!(details["currentUsage"], 10);
    assert_eq!(details["maxLimit"], 3);
}

#[tokio::test]
async fn tampered_webhook_payload_is_rejected() {
    let secret = "whsec_integration_test";
    let subscriptions = MockSubscriptions::with(limited_free_subscription(UserId::new()));
    let webhook =
        HandleStripeWebhookHandler::new(subscriptions, StripeWebhookVerifier::new(secret));

    let (_, signature) = signed_event(secret, &json!({ "id": "evt_3" }));
    let err = webhook
        .handle(fitai::application::handlers::subscriptions::HandleStripeWebhookCommand {
            payload: br#"{"id":"evt_forged"}"#.to_vec(),
            signature,
        })
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::WebhookInvalid);
}

#[test]
fn stripe_event_parses_from_raw_json() {
    let event: StripeEvent = serde_json::from_value(json!({
        "id": "evt_raw",
        "type": "invoice.payment_succeeded",
        "created": 1_704_067_200,
        "data": { "object": { "id": "in_1", "customer": "cus_1" } },
    }))
    .unwrap();
    assert_eq!(event.event_type, "invoice.payment_succeeded");
}
