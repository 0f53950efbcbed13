use chrono::{DateTime, Utc};

use crate::{
    error::ValidationError,
    round::{Pair, RoundTimer, Score, UsedSet},
    submit::Submission,
};

/// Coarse session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Before the first start.
    #[default]
    Idle,
    /// Rounds are being played.
    Playing,
    /// Game finished; summary and submission form.
    RoundOver,
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// The round timer reached zero.
    TimeUp,
    /// No further valid pair could be formed.
    Exhausted,
}

/// Last user-visible message produced by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Screenshots for the round could not be loaded.
    AssetLoad(String),
    /// The form is incomplete.
    Validation(ValidationError),
    /// Result delivered.
    Submitted,
    /// Result delivery failed.
    SubmissionFailed(String),
}

/// End-of-game form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    /// Player name.
    pub name: String,
    /// Player phone number.
    pub phone: String,
    /// Consent to the ranking terms.
    pub consent: bool,
}

impl SubmissionForm {
    /// Check every field and build a submission for the given score.
    pub fn validate(&self, score: Score) -> Result<Submission, ValidationError> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if phone.is_empty() {
            return Err(ValidationError::MissingPhone);
        }
        if !self.consent {
            return Err(ValidationError::ConsentRequired);
        }
        Ok(Submission {
            name: name.to_string(),
            phone: phone.to_string(),
            score,
            submitted_at: Utc::now(),
        })
    }

    /// Reset every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Complete state of one player's session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) phase: Phase,
    pub(crate) pair: Option<Pair>,
    pub(crate) pending: Option<Pair>,
    pub(crate) round: u64,
    pub(crate) game: u64,
    pub(crate) score: Score,
    pub(crate) used: UsedSet,
    pub(crate) timer: RoundTimer,
    pub(crate) over: Option<GameOverReason>,
    pub(crate) notice: Option<Notice>,
    pub(crate) form: SubmissionForm,
    pub(crate) submitting: bool,
    pub(crate) started_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Fresh idle session with the given round length.
    pub fn new(round_seconds: u32) -> Self {
        Self {
            timer: RoundTimer::new(round_seconds),
            ..Self::default()
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Pair the player can choose from, once preloaded.
    pub fn pair(&self) -> Option<&Pair> {
        self.pair.as_ref()
    }

    /// True while the next pair is being preloaded.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Round counter; bumps on every selection.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Game counter; bumps on every start or restart.
    pub fn game(&self) -> u64 {
        self.game
    }

    /// Current tally.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Filenames shown so far.
    pub fn used(&self) -> &UsedSet {
        &self.used
    }

    /// Round countdown.
    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    /// Seconds left in the visible round.
    pub fn time_left(&self) -> u32 {
        self.timer.remaining()
    }

    /// Why the game ended, once it has.
    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.over
    }

    /// Last message for the player.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// End-of-game form.
    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    /// True while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// When the current game started.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// True when a round failed to load and is waiting for a retry.
    pub fn awaiting_retry(&self) -> bool {
        self.phase == Phase::Playing && self.pair.is_none() && self.pending.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_validation_order() {
        let mut form = SubmissionForm::default();
        assert_eq!(
            form.validate(Score::default()),
            Err(ValidationError::MissingName)
        );
        form.name = "  Kim ".to_string();
        assert_eq!(
            form.validate(Score::default()),
            Err(ValidationError::MissingPhone)
        );
        form.phone = "010".to_string();
        assert_eq!(
            form.validate(Score::default()),
            Err(ValidationError::ConsentRequired)
        );
        form.consent = true;
        let submission = form.validate(Score { correct: 3, incorrect: 1 }).unwrap();
        assert_eq!(submission.name, "Kim");
        assert_eq!(submission.score.correct, 3);
    }
}
