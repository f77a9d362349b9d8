//! Intent routing

pub mod intent_router;

pub use intent_router::{CANCEL_INTENT, IntentRouter, RoutingDecision, STOP_INTENT};
