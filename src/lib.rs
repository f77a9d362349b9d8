//! Skill domain module
//!
//! This domain handles voice-platform skill requests for a single
//! conversation at a time. It provides:
//! - Typed request/response envelopes for the platform's JSON format
//! - Intent routing from intent names to registered handlers
//! - A keyword-driven dialog state machine, stateless per turn
//! - Launch, stop and cancel handling
//! - An entry point that signals a completion context once per event
//!
//! Nothing is persisted. A fresh skill is built for every event from an
//! explicit [`SkillConfig`].

pub mod config;
pub mod dialog;
pub mod error;
pub mod events;
pub mod handlers;
pub mod response;
pub mod routing;
pub mod runtime;
pub mod skill;
pub mod value_objects;

// Re-export main types
pub use config::{DialogMode, SkillConfig};
pub use error::{SkillError, SkillResult};

pub use dialog::{DialogKeyword, DialogStateAdvancer, DialogTurn};

pub use events::{
    IntentRouted, IntentUnhandled, LaunchHandled, RequestRejected, SessionEnded, SessionStarted,
    SkillDomainEvent, SkillEvent,
};

pub use handlers::{DialogIntentHandler, FarewellHandler, IntentHandler};
pub use response::{Directive, SkillResponse};
pub use routing::{IntentRouter, RoutingDecision};
pub use runtime::{
    handle_event, handle_event_bytes, serve, Completion, CompletionContext, RecordingContext,
};
pub use skill::{SkillLifecycle, SkillOutcome, VoiceSkill};

pub use value_objects::{
    Application, Intent, IntentRequest, LaunchRequest, PlatformRequest, RequestEnvelope,
    ResponseEnvelope, Session, SessionEndedRequest, Slot, Speech,
};
