//! One-time verification code state machine.
//!
//! A code moves from issued to exactly one terminal state: verified, expired,
//! or attempts-exhausted. Verification always targets the newest unverified,
//! unexpired code for a (recipient, purpose) pair; issuing a new code does
//! not explicitly invalidate older ones, it simply shadows them.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::foundation::{Timestamp, VerificationCodeId};

/// Code lifetime in minutes.
pub const CODE_TTL_MINUTES: i64 = 10;

/// Wrong guesses allowed before a code is dead.
pub const MAX_VERIFY_ATTEMPTS: u32 = 5;

/// Codes a single recipient may be issued per rolling hour.
pub const MAX_CODES_PER_HOUR: u32 = 3;

/// What a code proves control of.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum CodeRecipient {
    /// An E.164 phone number.
    Phone(String),
    /// An email address.
    Email(String),
}

impl CodeRecipient {
    /// Returns the bare address string.
    pub fn address(&self) -> &str {
        match self {
            CodeRecipient::Phone(p) => p,
            CodeRecipient::Email(e) => e,
        }
    }
}

/// Why a code was issued. A code for one purpose never satisfies a check for
/// another, even for the same address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    PhoneLogin,
    EmailSignup,
    PasswordReset,
}

impl CodePurpose {
    /// Returns the wire name used in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::PhoneLogin => "phone_login",
            CodePurpose::EmailSignup => "email_signup",
            CodePurpose::PasswordReset => "password_reset",
        }
    }
}

impl std::str::FromStr for CodePurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone_login" => Ok(CodePurpose::PhoneLogin),
            "email_signup" => Ok(CodePurpose::EmailSignup),
            "password_reset" => Ok(CodePurpose::PasswordReset),
            other => Err(format!("unknown code purpose: {}", other)),
        }
    }
}

/// Result of checking a guess against a stored code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The guess matched; the code is now verified (terminal).
    Verified,
    /// Wrong guess, more attempts remain.
    WrongCode { attempts_remaining: u32 },
    /// Wrong guess and the attempt budget is spent (terminal).
    AttemptsExhausted,
}

/// A stored one-time code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    pub id: VerificationCodeId,
    pub recipient: CodeRecipient,
    pub purpose: CodePurpose,
    pub code_hash: String,
    pub expires_at: Timestamp,
    pub attempts: u32,
    pub verified: bool,
    pub created_at: Timestamp,
}

impl VerificationCode {
    /// Issues a new code for a recipient. The plaintext code is hashed before
    /// storage; callers keep the plaintext only long enough to send it.
    pub fn issue(
        recipient: CodeRecipient,
        purpose: CodePurpose,
        plaintext_code: &str,
        now: Timestamp,
    ) -> Self {
        Self {
            id: VerificationCodeId::new(),
            recipient,
            purpose,
            code_hash: hash_code(plaintext_code),
            expires_at: now.add_minutes(CODE_TTL_MINUTES),
            attempts: 0,
            verified: false,
            created_at: now,
        }
    }

    /// Returns true if the code's lifetime has passed.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.is_after(&self.expires_at)
    }

    /// Returns true if the code can no longer be used at all.
    pub fn is_terminal(&self, now: Timestamp) -> bool {
        self.verified || self.is_expired(now) || self.attempts >= MAX_VERIFY_ATTEMPTS
    }

    /// Checks a guess, mutating attempt count or verified flag.
    ///
    /// Exhausted or already-verified codes never verify again, even with the
    /// right guess.
    pub fn verify(&mut self, guess: &str, now: Timestamp) -> VerificationOutcome {
        if self.verified || self.is_expired(now) || self.attempts >= MAX_VERIFY_ATTEMPTS {
            return VerificationOutcome::AttemptsExhausted;
        }

        if hash_code(guess) == self.code_hash {
            self.verified = true;
            return VerificationOutcome::Verified;
        }

        self.attempts += 1;
        if self.attempts >= MAX_VERIFY_ATTEMPTS {
            VerificationOutcome::AttemptsExhausted
        } else {
            VerificationOutcome::WrongCode {
                attempts_remaining: MAX_VERIFY_ATTEMPTS - self.attempts,
            }
        }
    }
}

/// Hashes a plaintext code for storage comparison (SHA-256, hex).
pub fn hash_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}
