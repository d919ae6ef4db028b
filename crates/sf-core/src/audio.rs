//! Playable audio handle contract.

use thiserror::Error;

/// Why a playback start was rejected.
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    /// The host policy refused an unsolicited start (autoplay blocking).
    #[error("playback start blocked by host policy")]
    Blocked,

    /// The backend failed for some other reason.
    #[error("audio backend failure: {0}")]
    Backend(String),
}

/// Host-implemented handle to one section's background audio.
///
/// Playback starts are permission-gated on real hosts and can be
/// rejected at any time. Callers treat a failed `play` as
/// fire-and-forget: log it, leave the track paused, never retry.
pub trait AudioTrack: Send {
    /// Request playback from the current position.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause playback. Always succeeds.
    fn pause(&mut self);

    /// Whether the track is currently paused.
    fn is_paused(&self) -> bool;

    /// Set linear volume in `[0.0, 1.0]`.
    fn set_volume(&mut self, volume: f32);
}
