//! Dialog state advancer
//!
//! Maps the free-text value of the dialog slot to speech. The advancer is
//! stateless per turn: the same slot value always yields the same turns,
//! whatever was said before in the session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompts;
use crate::config::DialogMode;
use crate::response::SkillResponse;
use crate::value_objects::Speech;

/// Keywords the dialog recognizes, by exact match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogKeyword {
    Test,
    Yes,
    Tickets,
    GetThem,
    Thanks,
}

impl DialogKeyword {
    /// Match a slot value; comparison is exact and case-sensitive
    pub fn from_slot(value: &str) -> Option<Self> {
        match value {
            "test" => Some(DialogKeyword::Test),
            "yes" => Some(DialogKeyword::Yes),
            "tickets" => Some(DialogKeyword::Tickets),
            "get them" => Some(DialogKeyword::GetThem),
            "thanks" => Some(DialogKeyword::Thanks),
            _ => None,
        }
    }

    /// The turn this keyword produces on its own
    pub fn turn(self) -> DialogTurn {
        match self {
            DialogKeyword::Test => DialogTurn::ask(prompts::CONFIRMATION_SENT),
            DialogKeyword::Yes => DialogTurn::ask(prompts::WHAT_TO_LOOK_FOR),
            DialogKeyword::Tickets => DialogTurn::ask(prompts::TICKET_LINK_SENT),
            DialogKeyword::GetThem => DialogTurn::ask(prompts::PURCHASE_DONE),
            DialogKeyword::Thanks => DialogTurn::end(prompts::FAREWELL),
        }
    }
}

/// Outcome of one dialog step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogTurn {
    /// Keep the session open
    Continue {
        prompt: String,
        reprompt: Option<String>,
    },
    /// Close the session
    End { statement: String },
}

impl DialogTurn {
    pub fn ask(prompt: impl Into<String>) -> Self {
        DialogTurn::Continue {
            prompt: prompt.into(),
            reprompt: None,
        }
    }

    pub fn end(statement: impl Into<String>) -> Self {
        DialogTurn::End {
            statement: statement.into(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DialogTurn::End { .. })
    }

    /// Issue this turn on the response object
    pub fn apply(self, response: &mut SkillResponse) {
        match self {
            DialogTurn::Continue { prompt, reprompt } => {
                response.ask(prompt, reprompt.map(Speech::plain))
            }
            DialogTurn::End { statement } => response.tell(statement),
        }
    }
}

/// Produces the turns for a slot value according to the configured mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogStateAdvancer {
    mode: DialogMode,
}

impl DialogStateAdvancer {
    pub fn new(mode: DialogMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    /// Turns to issue, in order, for the current slot value
    pub fn advance(&self, slot_value: Option<&str>) -> Vec<DialogTurn> {
        let keyword = slot_value.and_then(DialogKeyword::from_slot);
        debug!(?slot_value, ?keyword, mode = ?self.mode, "advancing dialog");

        match self.mode {
            DialogMode::SingleExit => vec![Self::single_exit(keyword)],
            DialogMode::Legacy => Self::legacy(keyword),
        }
    }

    /// Advance and issue every resulting turn on `response`
    pub fn respond(&self, slot_value: Option<&str>, response: &mut SkillResponse) {
        for turn in self.advance(slot_value) {
            turn.apply(response);
        }
    }

    fn single_exit(keyword: Option<DialogKeyword>) -> DialogTurn {
        match keyword {
            Some(keyword) => keyword.turn(),
            None => DialogTurn::ask(prompts::ONE_TIME_PASSWORD),
        }
    }

    // Matched branch, then the password prompt, then the closing
    // confirmation. Nothing returns early.
    fn legacy(keyword: Option<DialogKeyword>) -> Vec<DialogTurn> {
        let mut turns: Vec<DialogTurn> = keyword.map(DialogKeyword::turn).into_iter().collect();
        turns.push(DialogTurn::ask(prompts::ONE_TIME_PASSWORD));
        turns.push(DialogTurn::ask(prompts::TRANSACTION_COMPLETE));
        turns
    }
}

impl Default for DialogStateAdvancer {
    fn default() -> Self {
        Self::new(DialogMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Directive;

    #[test]
    fn test_keyword_matching_is_exact() {
        assert_eq!(DialogKeyword::from_slot("get them"), Some(DialogKeyword::GetThem));
        assert_eq!(DialogKeyword::from_slot("Thanks"), None);
        assert_eq!(DialogKeyword::from_slot(" yes"), None);
        assert_eq!(DialogKeyword::from_slot(""), None);
    }

    #[test]
    fn test_single_exit_table() {
        let advancer = DialogStateAdvancer::new(DialogMode::SingleExit);
        let cases = [
            (Some("test"), DialogTurn::ask(prompts::CONFIRMATION_SENT)),
            (Some("yes"), DialogTurn::ask(prompts::WHAT_TO_LOOK_FOR)),
            (Some("tickets"), DialogTurn::ask(prompts::TICKET_LINK_SENT)),
            (Some("get them"), DialogTurn::ask(prompts::PURCHASE_DONE)),
            (Some("thanks"), DialogTurn::end(prompts::FAREWELL)),
            (Some("pizza"), DialogTurn::ask(prompts::ONE_TIME_PASSWORD)),
            (None, DialogTurn::ask(prompts::ONE_TIME_PASSWORD)),
        ];

        for (slot, expected) in cases {
            assert_eq!(advancer.advance(slot), vec![expected], "slot {:?}", slot);
        }
    }

    #[test]
    fn test_legacy_falls_through() {
        let advancer = DialogStateAdvancer::new(DialogMode::Legacy);

        let turns = advancer.advance(Some("tickets"));
        assert_eq!(
            turns,
            vec![
                DialogTurn::ask(prompts::TICKET_LINK_SENT),
                DialogTurn::ask(prompts::ONE_TIME_PASSWORD),
                DialogTurn::ask(prompts::TRANSACTION_COMPLETE),
            ]
        );

        let unmatched = advancer.advance(Some("something else"));
        assert_eq!(unmatched.len(), 2);
        assert!(unmatched.iter().all(|t| !t.is_terminal()));
    }

    #[test]
    fn test_legacy_thanks_resolves_to_farewell() {
        let advancer = DialogStateAdvancer::default();
        let mut response = SkillResponse::new();
        advancer.respond(Some("thanks"), &mut response);

        assert_eq!(response.issued().len(), 3);
        assert_eq!(
            response.outcome(),
            Some(&Directive::Tell {
                statement: Speech::plain(prompts::FAREWELL)
            })
        );
    }

    #[test]
    fn test_same_input_same_output() {
        let advancer = DialogStateAdvancer::default();
        assert_eq!(advancer.mode(), DialogMode::Legacy);
        assert_eq!(advancer.advance(Some("yes")), advancer.advance(Some("yes")));
    }
}
