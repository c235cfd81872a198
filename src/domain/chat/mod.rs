//! Chat domain - coaching conversation messages.

mod message;

pub use message::{ChatMessage, ChatRole};
