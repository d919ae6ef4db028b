//! Tuning constants shared across the feed, carousel, and loading phase.
//!
//! Every timing and threshold the machines compare against lives here,
//! so the interaction feel can be adjusted in one place.

/// Minimum one-axis drag displacement before a release counts as a swipe.
/// The comparison is strict: a drag of exactly this many pixels is a no-op.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Fixed linear volume applied whenever a section track is started.
pub const BACKGROUND_AUDIO_VOLUME: f32 = 0.3;

/// Quiet time after the last raw scroll event before snapping to the
/// nearest section.
pub const SCROLL_SETTLE_MS: u64 = 150;

/// Duration of the animated scroll between sections. Passive snap logic
/// and further explicit navigation are suppressed while it runs.
pub const SECTION_TRANSITION_MS: u64 = 800;

/// Interval between automatic carousel advances.
pub const CAROUSEL_AUTOPLAY_MS: u64 = 4000;

/// Settle delay between a manual card selection and the re-armed
/// autoplay timer, so rapid manual navigation is not immediately
/// overridden.
pub const CAROUSEL_RESUME_MS: u64 = 1000;

/// Length of the haptic pulse fired on a like.
pub const HAPTIC_PULSE_MS: u32 = 50;

/// Loading phase: progress advances once per tick.
pub const LOADING_PROGRESS_TICK_MS: u64 = 200;

/// Loading phase: headline message rotation interval.
pub const LOADING_MESSAGE_TICK_MS: u64 = 1000;

/// Loading phase: status line rotation interval.
pub const LOADING_STATUS_TICK_MS: u64 = 1200;

/// Loading phase: hold on the final message before fading out.
pub const LOADING_HOLD_MS: u64 = 1500;

/// Loading phase: fade-out duration before the feed takes over.
pub const LOADING_FADE_MS: u64 = 800;
