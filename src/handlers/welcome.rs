//! Launch handling

use crate::dialog::prompts;
use crate::response::SkillResponse;
use crate::value_objects::Speech;

/// Greet the user with the audio cue and ask what they want to buy.
/// Output does not depend on the session.
pub fn handle_welcome(response: &mut SkillResponse) {
    response.ask(
        Speech::ssml(prompts::welcome_ssml()),
        Some(Speech::plain(prompts::welcome_reprompt())),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Directive;

    #[test]
    fn test_welcome_is_non_terminal_with_audio() {
        let mut response = SkillResponse::new();
        handle_welcome(&mut response);

        match response.outcome() {
            Some(Directive::Ask { prompt, reprompt }) => {
                assert!(matches!(prompt, Speech::Ssml { .. }));
                assert!(prompt.content().starts_with("<speak>Welcome to Visa Everywhere."));
                assert!(prompt.content().contains("<audio src='"));
                assert!(reprompt.is_some());
            }
            other => panic!("Expected ask, got {:?}", other),
        }
    }
}
