//! Skill domain events
//!
//! Events are the audit trail of a single invocation. They are returned to
//! the caller together with the response and are never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Common accessors for skill events
pub trait SkillEvent {
    /// Subject under which the event would be published
    fn subject(&self) -> String;

    /// Session the event belongs to
    fn session_id(&self) -> &str;

    /// Short event type name
    fn event_type(&self) -> &'static str;
}

/// A new conversation was opened by the platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionStarted {
    pub event_id: Uuid,
    pub session_id: String,
    pub request_id: String,
    pub started_at: DateTime<Utc>,
}

impl SkillEvent for SessionStarted {
    fn subject(&self) -> String {
        "skill.session.started.v1".to_string()
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn event_type(&self) -> &'static str {
        "SessionStarted"
    }
}

/// The welcome response was produced for a launch request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchHandled {
    pub event_id: Uuid,
    pub session_id: String,
    pub request_id: String,
    pub handled_at: DateTime<Utc>,
}

impl SkillEvent for LaunchHandled {
    fn subject(&self) -> String {
        "skill.launch.handled.v1".to_string()
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn event_type(&self) -> &'static str {
        "LaunchHandled"
    }
}

/// An intent was dispatched to a registered handler
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntentRouted {
    pub event_id: Uuid,
    pub session_id: String,
    pub request_id: String,
    pub intent: String,
    /// Number of ask/tell calls the handler issued
    pub directives_issued: usize,
    /// Whether the resolved response ends the session
    pub ends_session: bool,
    pub routed_at: DateTime<Utc>,
}

impl SkillEvent for IntentRouted {
    fn subject(&self) -> String {
        "skill.intent.routed.v1".to_string()
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn event_type(&self) -> &'static str {
        "IntentRouted"
    }
}

/// No handler was registered for an intent; nothing was said
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntentUnhandled {
    pub event_id: Uuid,
    pub session_id: String,
    pub request_id: String,
    pub intent: String,
    pub dropped_at: DateTime<Utc>,
}

impl SkillEvent for IntentUnhandled {
    fn subject(&self) -> String {
        "skill.intent.unhandled.v1".to_string()
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn event_type(&self) -> &'static str {
        "IntentUnhandled"
    }
}

/// The platform closed the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionEnded {
    pub event_id: Uuid,
    pub session_id: String,
    pub request_id: String,
    pub reason: Option<String>,
    pub ended_at: DateTime<Utc>,
}

impl SkillEvent for SessionEnded {
    fn subject(&self) -> String {
        "skill.session.ended.v1".to_string()
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn event_type(&self) -> &'static str {
        "SessionEnded"
    }
}

/// The request was refused before any handler ran
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestRejected {
    pub event_id: Uuid,
    pub session_id: String,
    pub request_id: String,
    pub reason: String,
    pub rejected_at: DateTime<Utc>,
}

impl SkillEvent for RequestRejected {
    fn subject(&self) -> String {
        "skill.request.rejected.v1".to_string()
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }

    fn event_type(&self) -> &'static str {
        "RequestRejected"
    }
}

/// Enum wrapper for all skill events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SkillDomainEvent {
    SessionStarted(SessionStarted),
    LaunchHandled(LaunchHandled),
    IntentRouted(IntentRouted),
    IntentUnhandled(IntentUnhandled),
    SessionEnded(SessionEnded),
    RequestRejected(RequestRejected),
}

impl SkillEvent for SkillDomainEvent {
    fn subject(&self) -> String {
        match self {
            SkillDomainEvent::SessionStarted(e) => e.subject(),
            SkillDomainEvent::LaunchHandled(e) => e.subject(),
            SkillDomainEvent::IntentRouted(e) => e.subject(),
            SkillDomainEvent::IntentUnhandled(e) => e.subject(),
            SkillDomainEvent::SessionEnded(e) => e.subject(),
            SkillDomainEvent::RequestRejected(e) => e.subject(),
        }
    }

    fn session_id(&self) -> &str {
        match self {
            SkillDomainEvent::SessionStarted(e) => e.session_id(),
            SkillDomainEvent::LaunchHandled(e) => e.session_id(),
            SkillDomainEvent::IntentRouted(e) => e.session_id(),
            SkillDomainEvent::IntentUnhandled(e) => e.session_id(),
            SkillDomainEvent::SessionEnded(e) => e.session_id(),
            SkillDomainEvent::RequestRejected(e) => e.session_id(),
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            SkillDomainEvent::SessionStarted(e) => e.event_type(),
            SkillDomainEvent::LaunchHandled(e) => e.event_type(),
            SkillDomainEvent::IntentRouted(e) => e.event_type(),
            SkillDomainEvent::IntentUnhandled(e) => e.event_type(),
            SkillDomainEvent::SessionEnded(e) => e.event_type(),
            SkillDomainEvent::RequestRejected(e) => e.event_type(),
        }
    }
}
