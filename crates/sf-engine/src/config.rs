//! Controller configuration.

use serde::{Deserialize, Serialize};
use sf_core::{
    BACKGROUND_AUDIO_VOLUME, CAROUSEL_AUTOPLAY_MS, CAROUSEL_RESUME_MS, HAPTIC_PULSE_MS,
    SCROLL_SETTLE_MS, SECTION_TRANSITION_MS,
};

/// Feed controller settings.
///
/// Every field has a sensible default; hosts typically only override
/// `viewport_height_px` with their real viewport and the identity
/// fields used in share payloads and posted comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Height of one section in pixels.
    pub viewport_height_px: f32,
    /// Linear volume applied when a section track starts.
    pub audio_volume: f32,
    /// Quiet time before snap-to-nearest runs.
    pub scroll_settle_ms: u64,
    /// Duration of the animated scroll between sections.
    pub section_transition_ms: u64,
    /// Interval between automatic carousel advances.
    pub autoplay_interval_ms: u64,
    /// Settle delay before autoplay resumes after a manual selection.
    pub autoplay_resume_ms: u64,
    /// Length of the haptic pulse fired on a like.
    pub haptic_pulse_ms: u32,
    /// Handle new comments are posted under.
    pub profile_handle: String,
    /// Share link for sections that declare none of their own.
    pub canonical_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            viewport_height_px: 900.0,
            audio_volume: BACKGROUND_AUDIO_VOLUME,
            scroll_settle_ms: SCROLL_SETTLE_MS,
            section_transition_ms: SECTION_TRANSITION_MS,
            autoplay_interval_ms: CAROUSEL_AUTOPLAY_MS,
            autoplay_resume_ms: CAROUSEL_RESUME_MS,
            haptic_pulse_ms: HAPTIC_PULSE_MS,
            profile_handle: "@driftline".to_string(),
            canonical_url: "https://driftline.studio".to_string(),
        }
    }
}
