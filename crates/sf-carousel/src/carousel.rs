//! Carousel state machine
//!
//! Index arithmetic is modular, so the index is valid by construction.
//! All timers are single deadlines compared against the caller's clock;
//! re-arming overwrites the previous deadline, which makes duplicate
//! concurrent tickers impossible.

use sf_core::{
    CAROUSEL_AUTOPLAY_MS, CAROUSEL_RESUME_MS, CardDef, CardKind, SwipeStep, classify_swipe,
};

/// Circular marking of the visible window: the active card, its
/// predecessor, and its successor. For very small decks these may
/// coincide; `active` always wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselView {
    pub active: usize,
    pub prev: usize,
    pub next: usize,
}

/// Result of an index change: the new window plus the animation routine
/// selector of the newly active card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselChange {
    pub view: CarouselView,
    pub card: CardKind,
}

/// Auto-advancing circular card rotator.
#[derive(Debug, Clone)]
pub struct Carousel {
    cards: Vec<CardDef>,
    index: usize,
    /// Pointer is over the host section; autoplay stays off.
    hovered: bool,
    /// Press position of an in-flight mouse drag.
    drag_origin: Option<f32>,
    /// Press position of an in-flight horizontal touch.
    touch_origin: Option<f32>,
    /// Next autoplay advance, when armed.
    next_tick_at: Option<u64>,
    /// End of the settle delay after a manual selection.
    resume_at: Option<u64>,
    interval_ms: u64,
    resume_delay_ms: u64,
}

impl Carousel {
    pub fn new(cards: Vec<CardDef>) -> Self {
        Self {
            cards,
            index: 0,
            hovered: false,
            drag_origin: None,
            touch_origin: None,
            next_tick_at: None,
            resume_at: None,
            interval_ms: CAROUSEL_AUTOPLAY_MS,
            resume_delay_ms: CAROUSEL_RESUME_MS,
        }
    }

    /// Override the autoplay interval and settle delay.
    pub fn with_timing(mut self, interval_ms: u64, resume_delay_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self.resume_delay_ms = resume_delay_ms;
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the autoplay timer is armed.
    #[inline]
    pub fn autoplay_active(&self) -> bool {
        self.next_tick_at.is_some()
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Current circular window.
    pub fn view(&self) -> CarouselView {
        let len = self.cards.len().max(1);
        CarouselView {
            active: self.index,
            prev: (self.index + len - 1) % len,
            next: (self.index + 1) % len,
        }
    }

    /// Arm autoplay at startup.
    pub fn start(&mut self, now_ms: u64) {
        if !self.cards.is_empty() && !self.hovered {
            self.next_tick_at = Some(now_ms + self.interval_ms);
        }
    }

    /// Explicit selection (nav dot or gesture). Cancels any armed tick
    /// immediately, applies the index change, and re-arms autoplay only
    /// after the settle delay.
    pub fn select(&mut self, index: usize, now_ms: u64) -> Option<CarouselChange> {
        if self.cards.is_empty() {
            return None;
        }
        self.index = index % self.cards.len();
        self.next_tick_at = None;
        self.resume_at = Some(now_ms + self.resume_delay_ms);
        Some(self.change())
    }

    /// Pointer entered the host section: autoplay off.
    pub fn hover_start(&mut self) {
        self.hovered = true;
        self.next_tick_at = None;
        self.resume_at = None;
    }

    /// Pointer left the host section: autoplay back on.
    pub fn hover_end(&mut self, now_ms: u64) {
        self.hovered = false;
        if !self.cards.is_empty() {
            self.next_tick_at = Some(now_ms + self.interval_ms);
            self.resume_at = None;
        }
    }

    /// Begin a mouse drag.
    pub fn pointer_down(&mut self, x_px: f32) {
        self.drag_origin = Some(x_px);
    }

    /// End a mouse drag. Only the release delta navigates; move events
    /// never do. A leftward drag past the threshold goes to the next
    /// card, a rightward one to the previous.
    pub fn pointer_up(&mut self, x_px: f32, now_ms: u64) -> Option<CarouselChange> {
        let origin = self.drag_origin.take()?;
        let step = classify_swipe(origin, x_px)?;
        self.step(step, now_ms)
    }

    /// Abort a drag (pointer left the carousel mid-gesture).
    pub fn pointer_cancel(&mut self) {
        self.drag_origin = None;
    }

    /// Begin a horizontal touch.
    pub fn touch_start(&mut self, x_px: f32) {
        self.touch_origin = Some(x_px);
    }

    /// End a horizontal touch; same semantics as a mouse drag release.
    pub fn touch_end(&mut self, x_px: f32, now_ms: u64) -> Option<CarouselChange> {
        let origin = self.touch_origin.take()?;
        let step = classify_swipe(origin, x_px)?;
        self.step(step, now_ms)
    }

    /// Advance the timers. Returns a change when an autoplay tick fires.
    pub fn poll(&mut self, now_ms: u64) -> Option<CarouselChange> {
        if self.cards.is_empty() {
            return None;
        }

        if self.resume_at.is_some_and(|at| now_ms >= at) {
            self.resume_at = None;
            if !self.hovered {
                self.next_tick_at = Some(now_ms + self.interval_ms);
            }
        }

        if self.next_tick_at.is_some_and(|at| now_ms >= at) {
            self.next_tick_at = Some(now_ms + self.interval_ms);
            self.index = (self.index + 1) % self.cards.len();
            log::trace!("carousel autoplay advanced to card {}", self.index);
            return Some(self.change());
        }

        None
    }

    fn step(&mut self, step: SwipeStep, now_ms: u64) -> Option<CarouselChange> {
        let len = self.cards.len();
        if len == 0 {
            return None;
        }
        let target = match step {
            SwipeStep::Forward => (self.index + 1) % len,
            SwipeStep::Backward => (self.index + len - 1) % len,
        };
        self.select(target, now_ms)
    }

    fn change(&self) -> CarouselChange {
        CarouselChange {
            view: self.view(),
            card: self.cards[self.index].kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(n: usize) -> Vec<CardDef> {
        (0..n)
            .map(|i| CardDef::new(format!("card-{i}"), CardKind::Plain))
            .collect()
    }

    fn deck() -> Carousel {
        let mut cards = cards(4);
        cards[0].kind = CardKind::Journey;
        cards[1].kind = CardKind::Skills;
        Carousel::new(cards)
    }

    #[test]
    fn test_cycle_closure() {
        let mut c = deck();
        c.start(0);
        let start = c.index();
        for _ in 0..4 {
            c.select((c.index() + 1) % c.len(), 0);
        }
        assert_eq!(c.index(), start);
    }

    #[test]
    fn test_view_window_is_circular() {
        let mut c = deck();
        c.select(0, 0);
        assert_eq!(
            c.view(),
            CarouselView {
                active: 0,
                prev: 3,
                next: 1
            }
        );
        c.select(3, 0);
        assert_eq!(
            c.view(),
            CarouselView {
                active: 3,
                prev: 2,
                next: 0
            }
        );
    }

    #[test]
    fn test_autoplay_advances() {
        let mut c = deck();
        c.start(0);
        assert_eq!(c.poll(3999), None);
        let change = c.poll(4000).unwrap();
        assert_eq!(change.view.active, 1);
        assert_eq!(change.card, CardKind::Skills);
        // Re-armed relative to the firing poll.
        assert_eq!(c.poll(7999), None);
        assert!(c.poll(8000).is_some());
    }

    #[test]
    fn test_select_cancels_tick_and_settles() {
        let mut c = deck();
        c.start(0);
        // Manual selection at 3500, just before the 4000 tick.
        let change = c.select(2, 3500).unwrap();
        assert_eq!(change.view.active, 2);
        // The old tick was cancelled outright.
        assert_eq!(c.poll(4000), None);
        assert!(!c.autoplay_active());
        // Settle elapses at 4500; the next tick lands a full interval later.
        assert_eq!(c.poll(4500), None);
        assert!(c.autoplay_active());
        assert_eq!(c.poll(8499), None);
        let change = c.poll(8500).unwrap();
        // Only the manual selection and one legitimate tick took effect.
        assert_eq!(change.view.active, 3);
    }

    #[test]
    fn test_hover_pauses_and_resumes() {
        let mut c = deck();
        c.start(0);
        c.hover_start();
        assert_eq!(c.poll(10_000), None);
        c.hover_end(10_000);
        assert_eq!(c.poll(13_999), None);
        assert!(c.poll(14_000).is_some());
    }

    #[test]
    fn test_hover_cancels_pending_settle() {
        let mut c = deck();
        c.start(0);
        c.select(1, 100);
        c.hover_start();
        // Neither the settle deadline nor a tick survives the hover.
        assert_eq!(c.poll(1100), None);
        assert_eq!(c.poll(20_000), None);
        assert!(!c.autoplay_active());
    }

    #[test]
    fn test_swipe_threshold_is_strict() {
        let mut c = deck();
        c.touch_start(300.0);
        assert_eq!(c.touch_end(251.0, 0), None);
        c.touch_start(300.0);
        let change = c.touch_end(249.0, 0).unwrap();
        assert_eq!(change.view.active, 1);
    }

    #[test]
    fn test_swipe_wraps_backward() {
        let mut c = deck();
        c.touch_start(200.0);
        let change = c.touch_end(300.0, 0).unwrap();
        assert_eq!(change.view.active, 3);
    }

    #[test]
    fn test_drag_release_without_press_is_ignored() {
        let mut c = deck();
        assert_eq!(c.pointer_up(500.0, 0), None);
    }

    #[test]
    fn test_drag_cancel_discards_gesture() {
        let mut c = deck();
        c.pointer_down(300.0);
        assert!(c.is_dragging());
        c.pointer_cancel();
        assert!(!c.is_dragging());
        assert_eq!(c.pointer_up(0.0, 0), None);
    }

    #[test]
    fn test_gesture_navigation_restarts_autoplay_after_settle() {
        let mut c = deck();
        c.start(0);
        c.pointer_down(400.0);
        assert!(c.pointer_up(200.0, 500).is_some());
        assert!(!c.autoplay_active());
        c.poll(1500);
        assert!(c.autoplay_active());
    }

    #[test]
    fn test_select_wraps_out_of_range_index() {
        let mut c = deck();
        let change = c.select(9, 0).unwrap();
        assert_eq!(change.view.active, 1);
    }

    #[test]
    fn test_index_never_escapes_range() {
        let mut c = deck();
        c.start(0);
        let mut now = 0;
        for step in 0..500u64 {
            now += 700;
            match step % 6 {
                0 => {
                    c.select(step as usize, now);
                }
                1 => c.hover_start(),
                2 => c.hover_end(now),
                3 => {
                    c.touch_start((step % 13) as f32 * 40.0);
                }
                4 => {
                    c.touch_end((step % 7) as f32 * 45.0, now);
                }
                _ => {
                    c.poll(now);
                }
            }
            assert!(c.index() < c.len());
        }
    }

    #[test]
    fn test_empty_deck_is_inert() {
        let mut c = Carousel::new(Vec::new());
        c.start(0);
        assert_eq!(c.select(0, 0), None);
        assert_eq!(c.poll(10_000), None);
        assert!(!c.autoplay_active());
    }

    #[test]
    fn test_single_card_window() {
        let mut c = Carousel::new(cards(1));
        let change = c.select(0, 0).unwrap();
        assert_eq!(change.view, CarouselView { active: 0, prev: 0, next: 0 });
    }
}
