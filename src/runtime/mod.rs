//! Entry point and completion signaling
//!
//! [`handle_event`] is the single inbound surface: it takes a raw platform
//! event and a completion context, builds a fresh [`VoiceSkill`] and signals
//! the context exactly once. [`serve`] drives it over newline-delimited JSON
//! for local runs; events are handled strictly one after another.

use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, warn};

use crate::config::SkillConfig;
use crate::error::{SkillError, SkillResult};
use crate::events::{SkillDomainEvent, SkillEvent};
use crate::skill::{SkillOutcome, VoiceSkill};
use crate::value_objects::RequestEnvelope;

/// Platform-provided completion callbacks
pub trait CompletionContext {
    /// The invocation finished; `outcome.response` may be empty
    fn succeed(&mut self, outcome: SkillOutcome);

    /// The invocation failed
    fn fail(&mut self, error: SkillError, events: Vec<SkillDomainEvent>);
}

/// How an invocation completed
#[derive(Debug)]
pub enum Completion {
    Succeeded(SkillOutcome),
    Failed {
        error: SkillError,
        events: Vec<SkillDomainEvent>,
    },
}

impl Completion {
    /// Events recorded during the invocation
    pub fn events(&self) -> &[SkillDomainEvent] {
        match self {
            Completion::Succeeded(outcome) => &outcome.events,
            Completion::Failed { events, .. } => events,
        }
    }

    /// Wire form: the response envelope, `null` when nothing was said, or an
    /// `errorMessage` object on failure
    pub fn to_json(&self) -> SkillResult<String> {
        let line = match self {
            Completion::Succeeded(outcome) => serde_json::to_string(&outcome.response)?,
            Completion::Failed { error, .. } => {
                serde_json::to_string(&json!({ "errorMessage": error.to_string() }))?
            }
        };
        Ok(line)
    }
}

/// Context that keeps the first completion it receives
#[derive(Debug, Default)]
pub struct RecordingContext {
    completion: Option<Completion>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    pub fn into_completion(self) -> Option<Completion> {
        self.completion
    }

    fn complete(&mut self, completion: Completion) {
        if self.completion.is_some() {
            debug!("context already completed, ignoring");
            return;
        }
        self.completion = Some(completion);
    }
}

impl CompletionContext for RecordingContext {
    fn succeed(&mut self, outcome: SkillOutcome) {
        self.complete(Completion::Succeeded(outcome));
    }

    fn fail(&mut self, error: SkillError, events: Vec<SkillDomainEvent>) {
        self.complete(Completion::Failed { error, events });
    }
}

/// Handle one raw platform event with a fresh skill
pub fn handle_event<C>(raw: &str, config: &SkillConfig, context: &mut C)
where
    C: CompletionContext,
{
    let envelope: RequestEnvelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            error!(error = %e, "could not parse event");
            context.fail(SkillError::MalformedEvent(e), Vec::new());
            return;
        }
    };

    let skill = VoiceSkill::new(config.clone());
    match skill.execute(&envelope) {
        Ok(outcome) => context.succeed(outcome),
        Err(e) => {
            let rejected = VoiceSkill::rejection(&envelope, &e);
            context.fail(e, vec![rejected]);
        }
    }
}

/// Handle one raw event line; bytes that are not UTF-8 fail the invocation
pub fn handle_event_bytes<C>(raw: Vec<u8>, config: &SkillConfig, context: &mut C)
where
    C: CompletionContext,
{
    match String::from_utf8(raw) {
        Ok(raw) => handle_event(&raw, config, context),
        Err(e) => {
            error!(error = %e, "event is not valid UTF-8");
            context.fail(SkillError::InvalidEncoding(e), Vec::new());
        }
    }
}

/// Read newline-delimited events from `reader` and write one response line
/// per event to `writer`. Blank lines are skipped. Returns the number of
/// events handled. Only reader and writer I/O errors stop the loop.
pub async fn serve<R, W>(mut reader: R, mut writer: W, config: &SkillConfig) -> SkillResult<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut handled = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let mut context = RecordingContext::new();
        handle_event_bytes(std::mem::take(&mut buf), config, &mut context);
        let Some(completion) = context.into_completion() else {
            warn!("event finished without completing the context");
            continue;
        };

        for event in completion.events() {
            debug!(subject = %event.subject(), session_id = event.session_id(), "skill event");
        }

        let mut out = completion.to_json()?;
        out.push('\n');
        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
        handled += 1;
    }

    Ok(handled)
}
