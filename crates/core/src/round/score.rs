use serde::{Deserialize, Serialize};

/// Tally of resolved choices in the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Genuine screenshot picked.
    pub correct: u32,
    /// Phishing screenshot picked.
    pub incorrect: u32,
}

impl Score {
    /// Record one choice.
    pub fn record(&mut self, picked_real: bool) {
        if picked_real {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    /// Number of rounds resolved by a choice.
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }
}
