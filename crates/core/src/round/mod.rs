//! Round building blocks: pairs, selection, timing, and scoring.

mod pair;
mod score;
mod selector;
mod timer;

pub use pair::{Pair, Side};
pub use score::Score;
pub use selector::{select_pair, UsedSet};
pub use timer::{RoundTimer, TimerTick, DEFAULT_ROUND_SECONDS};
