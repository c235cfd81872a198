//! SMS delivery adapters.

mod twilio_sender;

pub use twilio_sender::TwilioSmsSender;
