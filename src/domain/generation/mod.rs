//! Handling of generative-model text replies.

mod reply;

pub use reply::{parse_reply, strip_code_fences};
