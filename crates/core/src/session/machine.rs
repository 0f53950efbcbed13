use chrono::Utc;
use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    rng::GameRng,
    round::{select_pair, Pair, Side, TimerTick},
    submit::Submission,
};

use super::models::{GameOverReason, Notice, Phase, Session};

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Start the first game. Ignored unless idle.
    Start,
    /// Start over from any phase.
    Restart,
    /// The player picked the image on this side.
    Choose(Side),
    /// One second elapsed.
    Tick,
    /// Preload outcome for the given round.
    PreloadFinished {
        /// Round the preload was issued for.
        round: u64,
        /// `Err` carries a user-facing reason.
        result: Result<(), String>,
    },
    /// Select again after a failed preload.
    RetryRound,
    /// Update the name field.
    SetName(String),
    /// Update the phone field.
    SetPhone(String),
    /// Update the consent checkbox.
    SetConsent(bool),
    /// Validate the form and send the result.
    Submit,
    /// Outcome of a submission.
    SubmissionFinished {
        /// Game the submission was issued for.
        game: u64,
        /// `Err` carries a user-facing reason.
        result: Result<(), String>,
    },
}

/// Side effects the host must carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Load both screenshots, then report `Event::PreloadFinished` for `round`.
    Preload {
        /// Round being prepared.
        round: u64,
        /// Pair to load.
        pair: Pair,
    },
    /// A round became visible; restart the one-second clock.
    RoundStarted {
        /// Round now active.
        round: u64,
    },
    /// Deliver the result, then report `Event::SubmissionFinished` for `game`.
    Submit {
        /// Game being submitted.
        game: u64,
        /// Result to deliver.
        submission: Submission,
    },
}

/// New state plus the effects it requested.
#[derive(Debug, Clone)]
pub struct Transition {
    /// State after the event.
    pub session: Session,
    /// Work for the host, in order.
    pub effects: Vec<Effect>,
}

/// Apply one event. All randomness is drawn from `rng`.
pub fn reduce(
    mut session: Session,
    event: Event,
    catalog: &Catalog,
    rng: &mut GameRng,
) -> Transition {
    let mut effects = Vec::new();

    match event {
        Event::Start if session.phase == Phase::Idle => {
            begin_game(&mut session, catalog, rng, &mut effects)
        }
        Event::Start => debug!(phase = ?session.phase, "Ignoring start outside idle"),
        Event::Restart => begin_game(&mut session, catalog, rng, &mut effects),
        Event::Choose(side) => {
            if session.phase != Phase::Playing {
                debug!("Ignoring choice outside play");
            } else if let Some(pair) = session.pair.take() {
                let image = pair.get(side);
                session.score.record(image.is_real());
                debug!(
                    site = image.site_name(),
                    correct = image.is_real(),
                    "Choice recorded"
                );
                session.timer.cancel();
                next_round(&mut session, catalog, rng, &mut effects);
            }
        }
        Event::Tick => {
            if session.phase == Phase::Playing && session.pair.is_some() {
                if let TimerTick::Expired = session.timer.tick() {
                    info!(round = session.round, "Round timed out");
                    finish(&mut session, GameOverReason::TimeUp);
                }
            }
        }
        Event::PreloadFinished { round, result } => {
            if session.phase != Phase::Playing || round != session.round {
                debug!(round, current = session.round, "Ignoring stale preload");
            } else if let Some(pair) = session.pending.take() {
                match result {
                    Ok(()) => {
                        session.used.insert_pair(&pair);
                        session.pair = Some(pair);
                        session.timer.arm();
                        session.notice = None;
                        effects.push(Effect::RoundStarted { round });
                    }
                    Err(reason) => {
                        warn!(round, %reason, "Round aborted: screenshots unavailable");
                        session.notice = Some(Notice::AssetLoad(reason));
                    }
                }
            }
        }
        Event::RetryRound => {
            if session.awaiting_retry() {
                next_round(&mut session, catalog, rng, &mut effects);
            }
        }
        Event::SetName(name) if session.phase == Phase::RoundOver => session.form.name = name,
        Event::SetPhone(phone) if session.phase == Phase::RoundOver => session.form.phone = phone,
        Event::SetConsent(consent) if session.phase == Phase::RoundOver => {
            session.form.consent = consent
        }
        Event::SetName(_) | Event::SetPhone(_) | Event::SetConsent(_) => {}
        Event::Submit => {
            if session.phase == Phase::RoundOver && !session.submitting {
                match session.form.validate(session.score) {
                    Ok(submission) => {
                        session.submitting = true;
                        session.notice = None;
                        effects.push(Effect::Submit {
                            game: session.game,
                            submission,
                        });
                    }
                    Err(err) => session.notice = Some(Notice::Validation(err)),
                }
            }
        }
        Event::SubmissionFinished { game, result } => {
            if !session.submitting || game != session.game {
                debug!(game, current = session.game, "Ignoring stale submission result");
            } else {
                session.submitting = false;
                match result {
                    Ok(()) => {
                        session.form.clear();
                        session.notice = Some(Notice::Submitted);
                    }
                    Err(reason) => session.notice = Some(Notice::SubmissionFailed(reason)),
                }
            }
        }
    }

    Transition { session, effects }
}

fn begin_game(
    session: &mut Session,
    catalog: &Catalog,
    rng: &mut GameRng,
    effects: &mut Vec<Effect>,
) {
    session.game += 1;
    session.submitting = false;
    session.score = Default::default();
    session.used.clear();
    session.timer.cancel();
    session.pair = None;
    session.over = None;
    session.notice = None;
    session.phase = Phase::Playing;
    session.started_at = Some(Utc::now());
    info!(game = session.game, images = catalog.len(), "Game started");
    next_round(session, catalog, rng, effects);
}

fn next_round(
    session: &mut Session,
    catalog: &Catalog,
    rng: &mut GameRng,
    effects: &mut Vec<Effect>,
) {
    session.pair = None;
    session.timer.cancel();
    match select_pair(catalog, &session.used, rng) {
        Some(pair) => {
            session.round += 1;
            session.pending = Some(pair.clone());
            effects.push(Effect::Preload {
                round: session.round,
                pair,
            });
        }
        None => finish(session, GameOverReason::Exhausted),
    }
}

fn finish(session: &mut Session, reason: GameOverReason) {
    session.phase = Phase::RoundOver;
    session.pair = None;
    session.pending = None;
    session.timer.cancel();
    session.over = Some(reason);
    info!(
        ?reason,
        correct = session.score.correct,
        incorrect = session.score.incorrect,
        "Game over"
    );
}
