//! The response object handed to skill handlers
//!
//! Handlers speak through [`SkillResponse::ask`] and [`SkillResponse::tell`].
//! Every call is recorded. When the invocation finishes the recorded calls
//! resolve to at most one payload:
//! - no calls: no payload
//! - a `tell` ends the session, later calls do not change the outcome
//! - otherwise the last `ask` wins

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::value_objects::{Reprompt, ResponseBody, ResponseEnvelope, Speech, RESPONSE_VERSION};

/// A single call made on the response object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// Continue the conversation with a prompt
    Ask {
        prompt: Speech,
        reprompt: Option<Speech>,
    },
    /// End the conversation with a closing statement
    Tell { statement: Speech },
}

impl Directive {
    /// Whether this directive ends the session
    pub fn is_terminal(&self) -> bool {
        matches!(self, Directive::Tell { .. })
    }

    /// The primary spoken output
    pub fn speech(&self) -> &Speech {
        match self {
            Directive::Ask { prompt, .. } => prompt,
            Directive::Tell { statement } => statement,
        }
    }
}

/// Response object for one invocation
#[derive(Debug, Clone, Default)]
pub struct SkillResponse {
    issued: Vec<Directive>,
}

impl SkillResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the session open with a prompt and an optional re-prompt
    pub fn ask(&mut self, prompt: impl Into<Speech>, reprompt: Option<Speech>) {
        let prompt = prompt.into();
        if self.is_sealed() {
            debug!(prompt = prompt.content(), "ask issued after tell, outcome unchanged");
        }
        self.issued.push(Directive::Ask { prompt, reprompt });
    }

    /// Close the session with a final statement
    pub fn tell(&mut self, statement: impl Into<Speech>) {
        let statement = statement.into();
        if self.is_sealed() {
            debug!(statement = statement.content(), "tell issued after tell, outcome unchanged");
        }
        self.issued.push(Directive::Tell { statement });
    }

    /// Every call made so far, in order
    pub fn issued(&self) -> &[Directive] {
        &self.issued
    }

    /// Number of `ask` calls made
    pub fn ask_count(&self) -> usize {
        self.issued.iter().filter(|d| !d.is_terminal()).count()
    }

    /// Number of `tell` calls made
    pub fn tell_count(&self) -> usize {
        self.issued.iter().filter(|d| d.is_terminal()).count()
    }

    /// True once a `tell` has been issued
    pub fn is_sealed(&self) -> bool {
        self.issued.iter().any(Directive::is_terminal)
    }

    /// The directive the caller will observe
    pub fn outcome(&self) -> Option<&Directive> {
        self.issued
            .iter()
            .find(|d| d.is_terminal())
            .or_else(|| self.issued.last())
    }

    /// Build the platform payload; `ask` echoes the session attributes back
    pub fn into_envelope(
        self,
        session_attributes: &HashMap<String, serde_json::Value>,
    ) -> Option<ResponseEnvelope> {
        let outcome = self.outcome()?.clone();
        let envelope = match outcome {
            Directive::Ask { prompt, reprompt } => ResponseEnvelope {
                version: RESPONSE_VERSION.to_string(),
                session_attributes: Some(session_attributes.clone()),
                response: ResponseBody {
                    output_speech: prompt,
                    reprompt: reprompt.map(|output_speech| Reprompt { output_speech }),
                    should_end_session: false,
                },
            },
            Directive::Tell { statement } => ResponseEnvelope {
                version: RESPONSE_VERSION.to_string(),
                session_attributes: None,
                response: ResponseBody {
                    output_speech: statement,
                    reprompt: None,
                    should_end_session: true,
                },
            },
        };
        Some(envelope)
    }
}
