use tracing::info;

use crate::{catalog::Catalog, rng::GameRng};

use super::{
    machine::{reduce, Effect, Event},
    models::Session,
};

/// Owns the catalog, the random source, and the live session.
#[derive(Debug)]
pub struct RoundEngine {
    catalog: Catalog,
    rng: GameRng,
    session: Session,
}

impl RoundEngine {
    /// Build an idle engine.
    pub fn new(catalog: Catalog, rng: GameRng, round_seconds: u32) -> Self {
        info!(
            images = catalog.len(),
            seed = rng.seed(),
            round_seconds,
            "Round engine ready"
        );
        Self {
            catalog,
            rng,
            session: Session::new(round_seconds),
        }
    }

    /// Apply an event and return the effects to run.
    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        let session = std::mem::take(&mut self.session);
        let transition = reduce(session, event, &self.catalog, &mut self.rng);
        self.session = transition.session;
        transition.effects
    }

    /// Current session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{manifest::CatalogEntry, session::Phase};

    #[test]
    fn dispatch_threads_state_through_reducer() {
        let catalog = Catalog::from_entries(
            ["real_naver_easy.jpg", "fake_naver_easy.jpg"]
                .into_iter()
                .map(CatalogEntry::new),
        );
        let mut engine = RoundEngine::new(catalog, GameRng::new(9), 4);
        assert_eq!(engine.session().phase(), Phase::Idle);
        assert_eq!(engine.session().time_left(), 4);

        let effects = engine.dispatch(Event::Start);
        let round = match effects.as_slice() {
            [Effect::Preload { round, .. }] => *round,
            other => panic!("unexpected effects {other:?}"),
        };
        engine.dispatch(Event::PreloadFinished {
            round,
            result: Ok(()),
        });
        let side = engine.session().pair().unwrap().genuine_side();
        engine.dispatch(Event::Choose(side));

        assert_eq!(engine.session().phase(), Phase::RoundOver);
        assert_eq!(engine.session().score().correct, 1);
    }
}
