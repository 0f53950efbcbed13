//! Domain error types.
//!
//! Plumbing failures (configuration, manifest I/O) travel as
//! `anyhow::Error`; the enums here cover the recoverable conditions a
//! frontend has to tell apart.

use thiserror::Error;

/// A catalog filename that does not follow `<type>_<site>_<difficulty>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilenameError {
    /// Wrong number of `_`-separated tokens, an empty token, or no extension.
    #[error("{filename}: expected <type>_<site>_<difficulty>.<ext>")]
    Malformed {
        /// Offending filename.
        filename: String,
    },
    /// The leading token is neither `real` nor `fake`.
    #[error("{filename}: unknown image type '{kind}'")]
    UnknownKind {
        /// Offending filename.
        filename: String,
        /// Token found where `real` or `fake` was expected.
        kind: String,
    },
}

/// Two images that cannot be shown together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairError {
    /// Both images are genuine or both are phishing.
    #[error("pair needs one real and one fake image, got {first} and {second}")]
    SameKind {
        /// First filename.
        first: String,
        /// Second filename.
        second: String,
    },
    /// The images belong to different sites.
    #[error("pair sites differ: {first} vs {second}")]
    SiteMismatch {
        /// Site token of the first image.
        first: String,
        /// Site token of the second image.
        second: String,
    },
}

/// A screenshot that could not be loaded.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    /// The filename would escape the asset root.
    #[error("refusing to load {0}: not a plain file name")]
    InvalidName(String),
    /// The asset is missing, empty, or unreadable.
    #[error("failed to load {filename}: {reason}")]
    Unavailable {
        /// Filename that failed.
        filename: String,
        /// Human readable cause.
        reason: String,
    },
}

/// Incomplete end-of-game form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name left blank.
    #[error("please enter your name")]
    MissingName,
    /// Phone number left blank.
    #[error("please enter your phone number")]
    MissingPhone,
    /// Consent box not ticked.
    #[error("please agree to the ranking terms")]
    ConsentRequired,
}

/// Result delivery failure. Always recoverable: the player may retry.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// No bot token or chat id configured.
    #[error("result submission is not configured")]
    NotConfigured,
    /// Transport-level failure (DNS, TLS, timeout, ...). Never carries the
    /// request URL, which embeds the bot token.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The endpoint answered but refused the message.
    #[error("endpoint rejected message: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}
