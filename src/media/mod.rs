//! Streaming-media boundary.
//!
//! The crate does not decode or transport media. It describes what to play
//! ([`PlayerConfig`]), how to control a running stream ([`MediaHandle`]) and
//! what a backend must provide ([`MediaBackend`]).

pub mod options;
pub mod player;

pub use options::TransportOptions;
pub use player::{play_video, MediaBackend, MediaHandle, PlaybackState, PlayerConfig, ReadyCallback};

/// Errors in a media configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("invalid media source: {0}")]
    InvalidSource(#[from] url::ParseError),

    #[error("invalid transport option {0:?}, expected key=value")]
    InvalidOption(String),
}
