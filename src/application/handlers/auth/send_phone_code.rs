//! SendPhoneCodeHandler - issues a one-time login code over SMS.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::verification::{
    CodePurpose, CodeRecipient, VerificationCode, MAX_CODES_PER_HOUR,
};
use crate::ports::{SmsSender, VerificationCodeRepository};

use super::{generate_code, is_valid_phone};

/// Command to send a phone verification code.
#[derive(Debug, Clone)]
pub struct SendPhoneCodeCommand {
    pub phone: String,
    pub country_code: Option<String>,
}

/// Handler for phone code issuance.
///
/// Issuance is capped per phone number per rolling hour by counting existing
/// rows in the window, a plain count-and-compare rather than a token bucket.
pub struct SendPhoneCodeHandler {
    codes: Arc<dyn VerificationCodeRepository>,
    sms: Arc<dyn SmsSender>,
    default_country_code: String,
    /// In development a failed delivery logs the code and succeeds; in
    /// production it fails the request.
    development_mode: bool,
}

impl SendPhoneCodeHandler {
    pub fn new(
        codes: Arc<dyn VerificationCodeRepository>,
        sms: Arc<dyn SmsSender>,
        default_country_code: impl Into<String>,
        development_mode: bool,
    ) -> Self {
        Self {
            codes,
            sms,
            default_country_code: default_country_code.into(),
            development_mode,
        }
    }

    pub async fn handle(&self, cmd: SendPhoneCodeCommand) -> Result<(), DomainError> {
        if !is_valid_phone(&cmd.phone) {
            return Err(DomainError::validation("phone", "Número de telefone inválido"));
        }

        let recipient = CodeRecipient::Phone(cmd.phone.clone());
        let now = Timestamp::now();

        let issued_last_hour = self
            .codes
            .count_issued_since(&recipient, now.minus_hours(1))
            .await?;
        if issued_last_hour >= MAX_CODES_PER_HOUR {
            return Err(DomainError::new(
                ErrorCode::RateLimited,
                "Muitos pedidos de código. Tente novamente mais tarde.",
            ));
        }

        let plaintext = generate_code();
        let code = VerificationCode::issue(recipient, CodePurpose::PhoneLogin, &plaintext, now);
        self.codes.save(&code).await?;

        let country_code = cmd
            .country_code
            .unwrap_or_else(|| self.default_country_code.clone());
        let destination = if cmd.phone.starts_with('+') {
            cmd.phone.clone()
        } else {
            format!("{}{}", country_code, cmd.phone)
        };

        if let Err(err) = self.sms.send_verification_code(&destination, &plaintext).await {
            if self.development_mode {
                tracing::warn!(
                    phone = %destination,
                    code = %plaintext,
                    error = %err,
                    "Development mode - SMS failed, logging verification code"
                );
                return Ok(());
            }
            return Err(err.into());
        }

        tracing::info!(phone = %destination, "Verification code sent");
        Ok(())
    }
}
