//! Parsing of model replies into structured data.
//!
//! Models are prompted to answer with bare JSON but routinely wrap it in
//! markdown code fences. Replies are stripped and parsed in one step; any
//! failure surfaces as a single generic generation error with the raw reply
//! kept out of the response (it is logged instead).

use serde::de::DeserializeOwned;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Removes markdown code fence markers (```json ... ``` or ``` ... ```)
/// from a model reply.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parses a model reply into `T`, stripping fences first.
pub fn parse_reply<T: DeserializeOwned>(text: &str) -> Result<T, DomainError> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(&cleaned).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse AI response");
        DomainError::new(ErrorCode::GenerationFailed, "Invalid AI response format")
    })
}
