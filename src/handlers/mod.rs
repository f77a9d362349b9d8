//! Skill request and intent handlers

pub mod intent_handlers;
pub mod welcome;

pub use intent_handlers::{DialogIntentHandler, FarewellHandler, IntentHandler};
pub use welcome::handle_welcome;
