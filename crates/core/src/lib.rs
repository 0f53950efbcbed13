#![warn(clippy::all, missing_docs)]

//! Core round engine for the phishing-spotting game.
//!
//! This crate hosts the catalog model, pair selection, round timing,
//! the session state machine, asset preloading, and result submission
//! used by the terminal UI and any future frontends.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod error;
pub mod manifest;
pub mod rng;
pub mod round;
pub mod session;
pub mod submit;

pub use assets::{AssetSource, AssetStore, PreloadedPair};
pub use catalog::{Catalog, Image, ImageKind};
pub use config::AppConfig;
pub use manifest::{CatalogEntry, ImageManifest, ManifestSource};
pub use rng::GameRng;
pub use round::{select_pair, Pair, RoundTimer, Score, Side, TimerTick, UsedSet};
pub use session::{Effect, Event, GameOverReason, Phase, RoundEngine, Session};
pub use submit::{Submission, TelegramNotifier};
