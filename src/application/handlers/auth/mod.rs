//! Authentication use cases: phone one-time codes, email accounts, and
//! token refresh.

mod email_login;
mod email_signup;
#[cfg(test)]
pub(crate) mod test_support;
mod forgot_password;
mod password;
mod refresh_token;
mod reset_password;
mod send_phone_code;
mod verify_email;
mod verify_phone_code;

pub use email_login::{EmailLoginCommand, EmailLoginHandler};
pub use email_signup::{EmailSignupCommand, EmailSignupHandler};
pub use forgot_password::{ForgotPasswordCommand, ForgotPasswordHandler};
pub use password::{hash_password, verify_password};
pub use refresh_token::{RefreshTokenCommand, RefreshTokenHandler};
pub use reset_password::{ResetPasswordCommand, ResetPasswordHandler};
pub use send_phone_code::{SendPhoneCodeCommand, SendPhoneCodeHandler};
pub use verify_email::{VerifyEmailCommand, VerifyEmailHandler};
pub use verify_phone_code::{
    AuthTokens, VerifyPhoneCodeCommand, VerifyPhoneCodeHandler,
};

/// Generates a 6-digit numeric one-time code.
pub(crate) fn generate_code() -> String {
    use rand::Rng;
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

/// E.164-ish phone validation: optional +, leading non-zero digit, up to 15
/// digits total.
pub(crate) fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    !digits.is_empty()
        && digits.len() <= 15
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

/// Minimal email shape check; real validation happens at delivery time.
pub(crate) fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_six_digits() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn phone_validation() {
        assert!(is_valid_phone("+351912345678"));
        assert!(is_valid_phone("912345678"));
        assert!(!is_valid_phone("+0123"));
        assert!(!is_valid_phone("abc"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("+1234567890123456")); // 16 digits
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana@com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana.example.com"));
    }
}
