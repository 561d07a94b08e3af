//! Player glue: configuration, handle and backend traits, `play_video`.
//!
//! Decoding and transport live entirely behind [`MediaBackend`]. This module
//! only validates the configuration, opens the stream, runs the `ready`
//! callback and reports the outcome.

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};
use url::Url;

use super::options::TransportOptions;
use super::MediaError;

/// Playback status of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Playing,
    Paused,
    Stopped,
}

/// Control surface of an open media stream.
pub trait MediaHandle {
    fn pause(&mut self);
    fn resume(&mut self);
    fn stop(&mut self);
    /// Current playback position in seconds, if known.
    fn media_time(&self) -> Option<f64>;
    /// Total length in seconds, if known. Live streams have none.
    fn duration(&self) -> Option<f64>;
    fn state(&self) -> PlaybackState;
}

/// Opens media streams. Playback starts as soon as `open` succeeds.
pub trait MediaBackend {
    type Handle: MediaHandle;
    type Error;

    fn open(&mut self, src: &Url, opts: &TransportOptions) -> Result<Self::Handle, Self::Error>;
}

/// Called with the freshly opened handle before `play_video` reports success.
pub type ReadyCallback<H> = Box<dyn FnOnce(&mut H) + Send>;

/// What to play and how.
pub struct PlayerConfig<H> {
    pub src: Url,
    pub opts: TransportOptions,
    pub ready: Option<ReadyCallback<H>>,
}

impl<H> fmt::Debug for PlayerConfig<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerConfig")
            .field("src", &self.src.as_str())
            .field("opts", &self.opts)
            .field("ready", &self.ready.is_some())
            .finish()
    }
}

impl<H> PlayerConfig<H> {
    /// A config for `src` with no options and no ready callback.
    pub fn new(src: &str) -> Result<Self, MediaError> {
        Ok(Self {
            src: Url::parse(src)?,
            opts: TransportOptions::new(),
            ready: None,
        })
    }

    /// Parse and set transport options (builder).
    pub fn with_opts(mut self, opts: &str) -> Result<Self, MediaError> {
        self.opts = TransportOptions::parse(opts)?;
        Ok(self)
    }

    /// Set the ready callback (builder).
    pub fn on_ready(mut self, ready: impl FnOnce(&mut H) + Send + 'static) -> Self {
        self.ready = Some(Box::new(ready));
        self
    }

    /// Whether the source is a `file:` URL.
    pub fn is_local_file(&self) -> bool {
        self.src.scheme() == "file"
    }

    /// Filesystem path of a `file:` source.
    pub fn local_file(&self) -> Option<PathBuf> {
        if self.is_local_file() {
            self.src.to_file_path().ok()
        } else {
            None
        }
    }
}

/// Open `config.src` on `backend` and report the outcome to `on_done`.
///
/// On success the `ready` callback runs first, then `on_done` receives the
/// handle. On failure `on_done` receives the backend's error unmodified and
/// `ready` is dropped without being called.
pub fn play_video<B, F>(backend: &mut B, config: PlayerConfig<B::Handle>, on_done: F)
where
    B: MediaBackend,
    F: FnOnce(Result<B::Handle, B::Error>),
{
    let PlayerConfig { src, opts, ready } = config;
    info!(src = %src, opts = %opts, "opening media");

    match backend.open(&src, &opts) {
        Ok(mut handle) => {
            if let Some(ready) = ready {
                ready(&mut handle);
            }
            on_done(Ok(handle));
        }
        Err(err) => {
            warn!(src = %src, "media open failed");
            on_done(Err(err));
        }
    }
}
