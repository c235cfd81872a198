//! Shared in-memory mocks for auth handler tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{
    AuthError, AuthenticatedUser, DomainError, Timestamp, UserId,
};
use crate::domain::subscription::Subscription;
use crate::domain::user::{ScheduleSlot, User};
use crate::domain::verification::{CodePurpose, CodeRecipient, VerificationCode};
use crate::ports::{
    DeliveryError, EmailSender, SubscriptionRepository, TokenPair, TokenService, UserRepository,
    VerificationCodeRepository,
};

pub(crate) struct MockCodeRepository {
    codes: Mutex<Vec<VerificationCode>>,
}

impl MockCodeRepository {
    pub(crate) fn new() -> Self {
        Self {
            codes: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn push(&self, code: VerificationCode) {
        self.codes.lock().unwrap().push(code);
    }

    pub(crate) fn stored(&self) -> Vec<VerificationCode> {
        self.codes.lock().unwrap().clone()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockCodeRepository {
    async fn save(&self, code: &VerificationCode) -> Result<(), DomainError> {
        self.codes.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn update(&self, code: &VerificationCode) -> Result<(), DomainError> {
        let mut codes = self.codes.lock().unwrap();
        if let Some(c) = codes.iter_mut().find(|c| c.id == code.id) {
            *c = code.clone();
        }
        Ok(())
    }

    async fn find_latest_pending(
        &self,
        recipient: &CodeRecipient,
        purpose: CodePurpose,
        now: Timestamp,
    ) -> Result<Option<VerificationCode>, DomainError> {
        let codes = self.codes.lock().unwrap();
        Ok(codes
            .iter()
            .filter(|c| {
                &c.recipient == recipient
                    && c.purpose == purpose
                    && !c.verified
                    && !c.is_expired(now)
            })
            .max_by_key(|c| c.created_at)
            .cloned())
    }

    async fn count_issued_since(
        &self,
        recipient: &CodeRecipient,
        since: Timestamp,
    ) -> Result<u32, DomainError> {
        let codes = self.codes.lock().unwrap();
        Ok(codes
            .iter()
            .filter(|c| &c.recipient == recipient && c.created_at >= since)
            .count() as u32)
    }
}

pub(crate) struct MockUserRepository {
    users: Mutex<Vec<User>>,
}

impl MockUserRepository {
    pub(crate) fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn push(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub(crate) fn stored(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
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

pub(crate) struct MockSubscriptionRepository {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl MockSubscriptionRepository {
    pub(crate) fn new() -> Self {
        Self {
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn push(&self, subscription: Subscription) {
        self.subscriptions.lock().unwrap().push(subscription);
    }

    pub(crate) fn stored(&self) -> Vec<Subscription> {
        self.subscriptions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptionRepository {
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

pub(crate) struct MockTokenService;

impl MockTokenService {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl TokenService for MockTokenService {
    fn issue_pair(&self, user_id: &UserId, _phone: Option<&str>) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: format!("access-{}", user_id),
            refresh_token: format!("refresh-{}", user_id),
        })
    }

    fn issue_access(&self, user_id: &UserId, _phone: Option<&str>) -> Result<String, AuthError> {
        Ok(format!("access-{}", user_id))
    }

    fn validate_access(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        token
            .strip_prefix("access-")
            .and_then(|id| id.parse().ok())
            .map(|id| AuthenticatedUser::new(id, None))
            .ok_or(AuthError::InvalidToken)
    }

    fn validate_refresh(&self, token: &str) -> Result<UserId, AuthError> {
        token
            .strip_prefix("refresh-")
            .and_then(|id| id.parse().ok())
            .ok_or(AuthError::InvalidToken)
    }
}

pub(crate) struct MockEmailSender {
    pub(crate) sent: Mutex<Vec<(String, String)>>,
}

impl MockEmailSender {
    pub(crate) fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send_verification_code(&self, email: &str, code: &str) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }

    async fn send_password_reset_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}
