//! Intent handler implementations

use tracing::info;

use crate::config::DialogMode;
use crate::dialog::{prompts, DialogStateAdvancer};
use crate::response::SkillResponse;
use crate::value_objects::{Intent, Session};

/// Trait for handlers registered with the intent router
pub trait IntentHandler: Send + Sync {
    /// Handle an intent, speaking through `response` zero or more times
    fn handle(&self, intent: &Intent, session: &Session, response: &mut SkillResponse);

    /// Get the name of this handler
    fn name(&self) -> &str;
}

/// Free-text dialog intent, driven by one slot
pub struct DialogIntentHandler {
    slot: String,
    advancer: DialogStateAdvancer,
}

impl DialogIntentHandler {
    pub fn new(slot: impl Into<String>, mode: DialogMode) -> Self {
        Self {
            slot: slot.into(),
            advancer: DialogStateAdvancer::new(mode),
        }
    }

    /// Slot this handler reads
    pub fn slot(&self) -> &str {
        &self.slot
    }
}

impl IntentHandler for DialogIntentHandler {
    fn handle(&self, intent: &Intent, session: &Session, response: &mut SkillResponse) {
        let value = intent.slot_value(&self.slot);
        info!(
            session_id = %session.session_id,
            slot = %self.slot,
            value = value.unwrap_or(""),
            "dialog turn"
        );
        self.advancer.respond(value, response);
    }

    fn name(&self) -> &str {
        "dialog"
    }
}

/// Ends the session with a fixed goodbye; used for stop and cancel
pub struct FarewellHandler {
    name: &'static str,
}

impl FarewellHandler {
    pub fn stop() -> Self {
        Self { name: "stop" }
    }

    pub fn cancel() -> Self {
        Self { name: "cancel" }
    }
}

impl IntentHandler for FarewellHandler {
    fn handle(&self, _intent: &Intent, _session: &Session, response: &mut SkillResponse) {
        response.tell(prompts::GOODBYE);
    }

    fn name(&self) -> &str {
        self.name
    }
}
