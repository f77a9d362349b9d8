//! Value objects for the Skill domain
//!
//! These mirror the voice platform's JSON envelope. They carry data only;
//! transport and caller certificate checks live outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Envelope version emitted on every response
pub const RESPONSE_VERSION: &str = "1.0";

/// Inbound event as delivered by the voice platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestEnvelope {
    /// Envelope format version
    #[serde(default)]
    pub version: String,
    /// The conversation this request belongs to
    pub session: Session,
    /// The request itself
    pub request: PlatformRequest,
}

/// The platform's notion of an ongoing conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Opaque session identifier
    pub session_id: String,
    /// True on the first request of a conversation
    #[serde(default)]
    pub new: bool,
    /// The application the platform believes it is calling
    #[serde(default)]
    pub application: Option<Application>,
    /// Session attributes; unused by the skill but echoed back on `ask`
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

/// Application identity attached to a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

/// Request body, discriminated by its `type` field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PlatformRequest {
    /// The user opened the skill without an intent
    LaunchRequest(LaunchRequest),
    /// The user said something that resolved to an intent
    IntentRequest(IntentRequest),
    /// The platform closed the session
    SessionEndedRequest(SessionEndedRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub intent: Intent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    pub request_id: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Why the platform ended the session (e.g. `USER_INITIATED`)
    #[serde(default)]
    pub reason: Option<String>,
}

impl PlatformRequest {
    /// Identifier of the request regardless of its type
    pub fn request_id(&self) -> &str {
        match self {
            PlatformRequest::LaunchRequest(r) => &r.request_id,
            PlatformRequest::IntentRequest(r) => &r.request_id,
            PlatformRequest::SessionEndedRequest(r) => &r.request_id,
        }
    }

    /// Name of the request type as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            PlatformRequest::LaunchRequest(_) => "LaunchRequest",
            PlatformRequest::IntentRequest(_) => "IntentRequest",
            PlatformRequest::SessionEndedRequest(_) => "SessionEndedRequest",
        }
    }
}

/// A recognized utterance with its slot values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

/// A named intent parameter holding at most one free-text value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slot {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl Intent {
    /// Create an intent without slots
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: HashMap::new(),
        }
    }

    /// Add a filled slot
    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.slots.insert(
            name.clone(),
            Slot {
                name,
                value: Some(value.into()),
            },
        );
        self
    }

    /// Value of a slot, if the slot exists and was filled
    pub fn slot_value(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).and_then(|s| s.value.as_deref())
    }
}

/// Spoken output, either plain text or SSML markup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Speech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl Speech {
    /// Plain text speech
    pub fn plain(text: impl Into<String>) -> Self {
        Speech::PlainText { text: text.into() }
    }

    /// SSML speech; the markup is expected to be wrapped in `<speak>`
    pub fn ssml(ssml: impl Into<String>) -> Self {
        Speech::Ssml { ssml: ssml.into() }
    }

    /// The raw text or markup
    pub fn content(&self) -> &str {
        match self {
            Speech::PlainText { text } => text,
            Speech::Ssml { ssml } => ssml,
        }
    }
}

impl From<&str> for Speech {
    fn from(text: &str) -> Self {
        Speech::plain(text)
    }
}

impl From<String> for Speech {
    fn from(text: String) -> Self {
        Speech::plain(text)
    }
}

/// Outbound payload returned to the platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<HashMap<String, serde_json::Value>>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: Speech,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: Speech,
}

impl ResponseEnvelope {
    /// Whether this response closes the conversation
    pub fn ends_session(&self) -> bool {
        self.response.should_end_session
    }

    /// The primary spoken output
    pub fn speech(&self) -> &Speech {
        &self.response.output_speech
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_intent_request() {
        let raw = json!({
            "version": "1.0",
            "session": {
                "new": false,
                "sessionId": "session-1",
                "application": { "applicationId": "app-1" },
                "user": { "userId": "user-1" }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "req-1",
                "timestamp": "2016-03-01T10:00:00Z",
                "intent": {
                    "name": "DialogTideIntent",
                    "slots": { "Everywhere": { "name": "Everywhere", "value": "tickets" } }
                }
            }
        });

        let envelope: RequestEnvelope = serde_json::from_value(raw).unwrap();
        assert_eq!(envelope.session.session_id, "session-1");
        assert!(envelope.session.attributes.is_empty());
        assert_eq!(envelope.request.request_id(), "req-1");

        match envelope.request {
            PlatformRequest::IntentRequest(req) => {
                assert_eq!(req.intent.name, "DialogTideIntent");
                assert_eq!(req.intent.slot_value("Everywhere"), Some("tickets"));
                assert!(req.timestamp.is_some());
            }
            other => panic!("Expected IntentRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_slot_without_value() {
        let raw = json!({
            "name": "DialogTideIntent",
            "slots": { "Everywhere": { "name": "Everywhere" } }
        });
        let intent: Intent = serde_json::from_value(raw).unwrap();
        assert_eq!(intent.slot_value("Everywhere"), None);
        assert_eq!(intent.slot_value("Missing"), None);
    }

    #[test]
    fn test_unknown_request_type_is_rejected() {
        let raw = json!({
            "session": { "sessionId": "s" },
            "request": { "type": "AudioPlayer.PlaybackStarted", "requestId": "r" }
        });
        assert!(serde_json::from_value::<RequestEnvelope>(raw).is_err());
    }

    #[test]
    fn test_speech_wire_format() {
        let plain = serde_json::to_value(Speech::plain("Goodbye")).unwrap();
        assert_eq!(plain, json!({ "type": "PlainText", "text": "Goodbye" }));

        let ssml = serde_json::to_value(Speech::ssml("<speak>Hi</speak>")).unwrap();
        assert_eq!(ssml, json!({ "type": "SSML", "ssml": "<speak>Hi</speak>" }));
    }
}
