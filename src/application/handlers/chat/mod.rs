//! Chat use cases: coaching conversation.

mod get_history;
mod send_message;

pub use get_history::{GetHistoryHandler, GetHistoryQuery};
pub use send_message::{SendMessageCommand, SendMessageHandler};
