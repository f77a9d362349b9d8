//! Intent router: intent name -> registered handler

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SkillConfig;
use crate::handlers::{DialogIntentHandler, FarewellHandler, IntentHandler};
use crate::response::SkillResponse;
use crate::value_objects::{Intent, Session};

/// Built-in stop intent
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
/// Built-in cancel intent
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";

/// What the router did with an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutingDecision {
    /// A handler ran
    Handled { handler: String },
    /// Nothing is registered under this name; no response was produced
    Unhandled,
}

/// Fixed mapping from intent names to handlers
pub struct IntentRouter {
    handlers: HashMap<String, Box<dyn IntentHandler>>,
}

impl IntentRouter {
    /// Create a router with no registered intents
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Create the router for a configured skill: dialog, stop and cancel
    pub fn new(config: &SkillConfig) -> Self {
        let mut router = Self::empty();
        router.register(
            config.dialog_intent.clone(),
            Box::new(DialogIntentHandler::new(
                config.dialog_slot.clone(),
                config.dialog_mode,
            )),
        );
        router.register(STOP_INTENT, Box::new(FarewellHandler::stop()));
        router.register(CANCEL_INTENT, Box::new(FarewellHandler::cancel()));
        router
    }

    /// Register a handler, replacing any handler under the same name
    pub fn register(&mut self, intent: impl Into<String>, handler: Box<dyn IntentHandler>) {
        let intent = intent.into();
        let name = handler.name().to_string();
        if let Some(previous) = self.handlers.insert(intent.clone(), handler) {
            warn!(
                intent = %intent,
                replaced = previous.name(),
                handler = %name,
                "intent handler replaced"
            );
        }
    }

    /// Whether a handler is registered for `intent`
    pub fn handles(&self, intent: &str) -> bool {
        self.handlers.contains_key(intent)
    }

    /// Registered intent names, sorted
    pub fn intents(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up the handler for an intent name
    pub fn handler_for(&self, intent: &str) -> Option<&dyn IntentHandler> {
        self.handlers.get(intent).map(|h| h.as_ref())
    }

    /// Invoke the handler registered for `intent.name`
    pub fn route(
        &self,
        intent: &Intent,
        session: &Session,
        response: &mut SkillResponse,
    ) -> RoutingDecision {
        match self.handler_for(&intent.name) {
            Some(handler) => {
                debug!(intent = %intent.name, handler = handler.name(), "routing intent");
                handler.handle(intent, session, response);
                RoutingDecision::Handled {
                    handler: handler.name().to_string(),
                }
            }
            None => {
                warn!(
                    intent = %intent.name,
                    session_id = %session.session_id,
                    "no handler registered, dropping intent"
                );
                RoutingDecision::Unhandled
            }
        }
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new(&SkillConfig::default())
    }
}
