//! AI provider adapters.

mod gemini_provider;

pub use gemini_provider::GeminiProvider;
