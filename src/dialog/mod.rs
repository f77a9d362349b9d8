//! Keyword-driven dialog state machine

pub mod advancer;
pub mod prompts;

pub use advancer::{DialogKeyword, DialogStateAdvancer, DialogTurn};
