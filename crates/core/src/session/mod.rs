//! Session state and the round state machine.

mod engine;
mod machine;
mod models;

pub use engine::RoundEngine;
pub use machine::{reduce, Effect, Event, Transition};
pub use models::{GameOverReason, Notice, Phase, Session, SubmissionForm};
