//! Section tracker
//!
//! Keeps the current section index in sync with a 50%-crossing
//! visibility signal and drives explicit navigation: keyboard steps,
//! vertical swipes, and the debounced snap-to-nearest pass that runs
//! after passive scrolling settles.

use sf_core::{SECTION_TRANSITION_MS, SCROLL_SETTLE_MS, SwipeStep, classify_swipe};

/// Tracks the active section of the vertical feed.
///
/// Sections never wrap: navigation at the first or last index is a
/// no-op. While an animated scroll is in flight the tracker is
/// `transitioning` and both passive snapping and further explicit
/// navigation are suppressed, so conflicting scroll animations cannot
/// be issued.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    /// Index of the current section.
    current: usize,
    /// Total number of sections.
    count: usize,
    /// Height of one section in pixels (sections fill the viewport).
    viewport_px: f32,
    /// Last raw scroll offset reported by the host.
    last_offset_px: f32,
    /// Press position of an in-flight vertical touch.
    touch_start_y: Option<f32>,
    /// Deadline for the debounced snap-to-nearest pass.
    settle_at: Option<u64>,
    /// End of the current animated scroll, if one is in flight.
    transition_until: Option<u64>,
    settle_delay_ms: u64,
    transition_ms: u64,
}

impl SectionTracker {
    pub fn new(count: usize, viewport_px: f32) -> Self {
        Self {
            current: 0,
            count,
            viewport_px,
            last_offset_px: 0.0,
            touch_start_y: None,
            settle_at: None,
            transition_until: None,
            settle_delay_ms: SCROLL_SETTLE_MS,
            transition_ms: SECTION_TRANSITION_MS,
        }
    }

    /// Override the settle and transition timings.
    pub fn with_timing(mut self, settle_delay_ms: u64, transition_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self.transition_ms = transition_ms;
        self
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether an animated scroll is still in flight.
    #[inline]
    pub fn is_transitioning(&self, now_ms: u64) -> bool {
        self.transition_until.is_some_and(|until| now_ms < until)
    }

    /// A section crossed the visibility threshold. Makes it current.
    ///
    /// Fires for every crossing, including sections passed through
    /// during an animated scroll, so the current index always matches
    /// what the viewer actually sees.
    pub fn observe_visible(&mut self, index: usize) {
        if index < self.count {
            self.current = index;
        }
    }

    /// Step to the next section. No-op at the last index or while
    /// transitioning. Returns the scroll target on success.
    pub fn advance(&mut self, now_ms: u64) -> Option<usize> {
        if self.is_transitioning(now_ms) || self.current + 1 >= self.count {
            return None;
        }
        self.current += 1;
        self.begin_transition(now_ms);
        Some(self.current)
    }

    /// Step to the previous section. No-op at index 0 or while
    /// transitioning. Returns the scroll target on success.
    pub fn retreat(&mut self, now_ms: u64) -> Option<usize> {
        if self.is_transitioning(now_ms) || self.current == 0 {
            return None;
        }
        self.current -= 1;
        self.begin_transition(now_ms);
        Some(self.current)
    }

    /// Record a raw scroll offset and reset the settle debounce.
    ///
    /// The debounce deadline is overwritten on every event, never
    /// stacked. Scrolling produced by an in-flight animated scroll does
    /// not arm the debounce.
    pub fn note_scroll(&mut self, offset_px: f32, now_ms: u64) {
        self.last_offset_px = offset_px;
        if self.is_transitioning(now_ms) {
            return;
        }
        self.settle_at = Some(now_ms + self.settle_delay_ms);
    }

    /// Fraction of the scrollable range covered, in percent.
    pub fn scroll_progress(&self) -> f32 {
        let scrollable = (self.count.saturating_sub(1)) as f32 * self.viewport_px;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.last_offset_px / scrollable * 100.0).clamp(0.0, 100.0)
    }

    /// Advance the settle debounce. When it expires, returns the index
    /// of the nearest section if the viewport has drifted off the
    /// current one and a snap scroll should be issued.
    pub fn poll(&mut self, now_ms: u64) -> Option<usize> {
        if !self.settle_at.is_some_and(|at| now_ms >= at) {
            return None;
        }
        self.settle_at = None;
        if self.is_transitioning(now_ms) || self.viewport_px <= 0.0 || self.count == 0 {
            return None;
        }
        let nearest = (self.last_offset_px / self.viewport_px).round().max(0.0) as usize;
        let nearest = nearest.min(self.count - 1);
        if nearest != self.current {
            self.begin_transition(now_ms);
            return Some(nearest);
        }
        None
    }

    /// Record the press position of a vertical touch.
    pub fn touch_start(&mut self, y_px: f32) {
        self.touch_start_y = Some(y_px);
    }

    /// Classify the release of a vertical touch. An upward swipe past
    /// the threshold advances, a downward one retreats. Returns the
    /// scroll target if navigation happened.
    pub fn touch_end(&mut self, y_px: f32, now_ms: u64) -> Option<usize> {
        let start = self.touch_start_y.take()?;
        match classify_swipe(start, y_px)? {
            SwipeStep::Forward => self.advance(now_ms),
            SwipeStep::Backward => self.retreat(now_ms),
        }
    }

    fn begin_transition(&mut self, now_ms: u64) {
        self.transition_until = Some(now_ms + self.transition_ms);
        // A pending snap must not fire into the new animation.
        self.settle_at = None;
    }
}
