//! Email delivery adapters.

mod resend_sender;

pub use resend_sender::ResendEmailSender;
