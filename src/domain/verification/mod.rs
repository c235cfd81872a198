//! One-time verification codes for phone login, email signup, and password
//! reset.

mod code;

pub use code::{
    hash_code, CodePurpose, CodeRecipient, VerificationCode, VerificationOutcome,
    CODE_TTL_MINUTES, MAX_CODES_PER_HOUR, MAX_VERIFY_ATTEMPTS,
};
