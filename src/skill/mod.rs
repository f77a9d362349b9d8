//! Skill - lifecycle contract and request dispatch
//!
//! A [`VoiceSkill`] is built fresh for every event from an explicit
//! [`SkillConfig`]. It:
//! - checks the caller's application id when one is configured
//! - notifies session start on the first request of a conversation
//! - dispatches launch, intent and session-ended requests
//! - resolves the response object into at most one payload

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::SkillConfig;
use crate::error::{SkillError, SkillResult};
use crate::events::{
    IntentRouted, IntentUnhandled, LaunchHandled, RequestRejected, SessionEnded, SessionStarted,
    SkillDomainEvent,
};
use crate::handlers::{handle_welcome, IntentHandler};
use crate::response::SkillResponse;
use crate::routing::{IntentRouter, RoutingDecision};
use crate::value_objects::{
    IntentRequest, LaunchRequest, PlatformRequest, RequestEnvelope, ResponseEnvelope, Session,
    SessionEndedRequest,
};

/// Lifecycle hooks a skill implements
pub trait SkillLifecycle {
    /// First request of a conversation
    fn handle_session_started(
        &self,
        request_id: &str,
        session: &Session,
    ) -> Vec<SkillDomainEvent>;

    /// The user opened the skill without an intent
    fn handle_launch(
        &self,
        request: &LaunchRequest,
        session: &Session,
        response: &mut SkillResponse,
    ) -> Vec<SkillDomainEvent>;

    /// The platform closed the conversation
    fn handle_session_ended(
        &self,
        request: &SessionEndedRequest,
        session: &Session,
    ) -> Vec<SkillDomainEvent>;

    /// Handler registered for an intent name, if any
    fn handle_intent(&self, name: &str) -> Option<&dyn IntentHandler>;
}

/// Result of executing one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillOutcome {
    /// Payload for the platform; `None` when nothing was said
    pub response: Option<ResponseEnvelope>,
    /// What happened, in order
    pub events: Vec<SkillDomainEvent>,
}

/// The voice skill
pub struct VoiceSkill {
    config: SkillConfig,
    router: IntentRouter,
}

impl VoiceSkill {
    /// Create a skill from its configuration
    pub fn new(config: SkillConfig) -> Self {
        let router = IntentRouter::new(&config);
        Self { config, router }
    }

    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    pub fn router(&self) -> &IntentRouter {
        &self.router
    }

    /// Handle one platform event to completion
    #[instrument(
        skip(self, envelope),
        fields(
            session_id = %envelope.session.session_id,
            request_id = %envelope.request.request_id(),
            kind = envelope.request.kind()
        )
    )]
    pub fn execute(&self, envelope: &RequestEnvelope) -> SkillResult<SkillOutcome> {
        let session = &envelope.session;
        let request_id = envelope.request.request_id();

        if let Err(e) = self.verify_application(session) {
            warn!(error = %e, "rejecting request");
            return Err(e);
        }

        let mut events = Vec::new();
        if session.new {
            events.extend(self.handle_session_started(request_id, session));
        }

        let mut response = SkillResponse::new();
        match &envelope.request {
            PlatformRequest::LaunchRequest(request) => {
                events.extend(self.handle_launch(request, session, &mut response));
            }
            PlatformRequest::IntentRequest(request) => {
                events.push(self.dispatch_intent(request, session, &mut response));
            }
            PlatformRequest::SessionEndedRequest(request) => {
                events.extend(self.handle_session_ended(request, session));
            }
        }

        Ok(SkillOutcome {
            response: response.into_envelope(&session.attributes),
            events,
        })
    }

    /// Reject callers other than the configured application
    pub fn verify_application(&self, session: &Session) -> SkillResult<()> {
        let Some(expected) = &self.config.app_id else {
            return Ok(());
        };

        let actual = session
            .application
            .as_ref()
            .map(|a| a.application_id.as_str())
            .unwrap_or_default();

        if actual != expected.as_str() {
            return Err(SkillError::InvalidApplicationId {
                expected: expected.clone(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    /// Audit event describing why `envelope` was refused
    pub fn rejection(envelope: &RequestEnvelope, error: &SkillError) -> SkillDomainEvent {
        SkillDomainEvent::RequestRejected(RequestRejected {
            event_id: Uuid::new_v4(),
            session_id: envelope.session.session_id.clone(),
            request_id: envelope.request.request_id().to_string(),
            reason: error.to_string(),
            rejected_at: Utc::now(),
        })
    }

    fn dispatch_intent(
        &self,
        request: &IntentRequest,
        session: &Session,
        response: &mut SkillResponse,
    ) -> SkillDomainEvent {
        let intent = &request.intent;
        match self.router.route(intent, session, response) {
            RoutingDecision::Handled { .. } => SkillDomainEvent::IntentRouted(IntentRouted {
                event_id: Uuid::new_v4(),
                session_id: session.session_id.clone(),
                request_id: request.request_id.clone(),
                intent: intent.name.clone(),
                directives_issued: response.issued().len(),
                ends_session: response.outcome().is_some_and(|d| d.is_terminal()),
                routed_at: Utc::now(),
            }),
            RoutingDecision::Unhandled => SkillDomainEvent::IntentUnhandled(IntentUnhandled {
                event_id: Uuid::new_v4(),
                session_id: session.session_id.clone(),
                request_id: request.request_id.clone(),
                intent: intent.name.clone(),
                dropped_at: Utc::now(),
            }),
        }
    }
}

impl SkillLifecycle for VoiceSkill {
    fn handle_session_started(
        &self,
        request_id: &str,
        session: &Session,
    ) -> Vec<SkillDomainEvent> {
        info!(request_id, session_id = %session.session_id, "session started");
        vec![SkillDomainEvent::SessionStarted(SessionStarted {
            event_id: Uuid::new_v4(),
            session_id: session.session_id.clone(),
            request_id: request_id.to_string(),
            started_at: Utc::now(),
        })]
    }

    fn handle_launch(
        &self,
        request: &LaunchRequest,
        session: &Session,
        response: &mut SkillResponse,
    ) -> Vec<SkillDomainEvent> {
        info!(request_id = %request.request_id, session_id = %session.session_id, "launch");
        handle_welcome(response);
        vec![SkillDomainEvent::LaunchHandled(LaunchHandled {
            event_id: Uuid::new_v4(),
            session_id: session.session_id.clone(),
            request_id: request.request_id.clone(),
            handled_at: Utc::now(),
        })]
    }

    fn handle_session_ended(
        &self,
        request: &SessionEndedRequest,
        session: &Session,
    ) -> Vec<SkillDomainEvent> {
        info!(
            request_id = %request.request_id,
            session_id = %session.session_id,
            reason = request.reason.as_deref().unwrap_or("unspecified"),
            "session ended"
        );
        vec![SkillDomainEvent::SessionEnded(SessionEnded {
            event_id: Uuid::new_v4(),
            session_id: session.session_id.clone(),
            request_id: request.request_id.clone(),
            reason: request.reason.clone(),
            ended_at: Utc::now(),
        })]
    }

    fn handle_intent(&self, name: &str) -> Option<&dyn IntentHandler> {
        self.router.handler_for(name)
    }
}
