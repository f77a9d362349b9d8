//! Fixed speech used by the skill
//!
//! The strings are what the deployed skill says, spelling included.

/// Audio cue embedded in the welcome greeting
pub const WELCOME_AUDIO_URL: &str = "https://s3.amazonaws.com/ask-storage/tidePooler/OceanWaves.mp3";

/// Question closing the greeting and the welcome re-prompt
pub const WHAT_TO_BUY: &str = "What do you want to buy?";

pub const WELCOME_REPROMPT_INTRO: &str =
    "I can look things up for you, buy tickets, or confirm a payment. ";

pub const CONFIRMATION_SENT: &str = "Done,A conformation email has been sent. Anything else?";
pub const WHAT_TO_LOOK_FOR: &str = "what do you want me to look for?";
pub const TICKET_LINK_SENT: &str =
    "Sure, a link has been sent for viewing best avaialable seats.Do you want me to buy them?";
pub const PURCHASE_DONE: &str = "Done. You got it.";
pub const FAREWELL: &str = "Have a good one. Bye";
pub const ONE_TIME_PASSWORD: &str =
    "Sent one time password to your mobile.Please repeat the password";
pub const TRANSACTION_COMPLETE: &str = "Your trasaction is complete.Goodbye";

/// Spoken by the stop and cancel intents
pub const GOODBYE: &str = "Goodbye";

/// SSML greeting with the embedded audio cue
pub fn welcome_ssml() -> String {
    format!(
        "<speak>Welcome to Visa Everywhere. <audio src='{}'/>{}</speak>",
        WELCOME_AUDIO_URL, WHAT_TO_BUY
    )
}

/// Plain-text re-prompt for the welcome response
pub fn welcome_reprompt() -> String {
    format!("{}{}", WELCOME_REPROMPT_INTRO, WHAT_TO_BUY)
}
