//! Commands sent from host UI callbacks to the processor.

/// Keyboard shortcuts recognized by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Next section.
    ArrowDown,
    /// Previous section.
    ArrowUp,
    /// Next section (alias).
    Space,
    /// Like the current section.
    Like,
    /// Open the current section's comment panel.
    Comment,
    /// Toggle the current section's audio.
    Music,
}

/// Raw UI events pushed from host callbacks to the processor.
///
/// Section and card indices come straight from the host's DOM-side
/// bookkeeping; out-of-range values are validated (sections) or wrapped
/// (cards) at the processor boundary, never trusted.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedCommand {
    /// A section crossed the 50% visibility threshold.
    SectionVisible { index: usize, visible: bool },
    /// Raw scroll offset of the feed viewport.
    Scroll { offset_px: f32 },
    /// Vertical touch pressed.
    TouchStart { y_px: f32 },
    /// Vertical touch released.
    TouchEnd { y_px: f32 },
    /// Keyboard shortcut.
    Key(NavKey),
    /// Tap on a section's body (audio toggle).
    SectionTap { index: usize },
    /// Like button on a section.
    Like { index: usize },
    /// Open a section's comment panel.
    OpenComments { index: usize },
    /// Submit a comment on a section.
    PostComment { index: usize, text: String },
    /// Share button on a section.
    Share { index: usize },
    /// Carousel nav dot.
    CarouselSelect { index: usize },
    /// Pointer entered the carousel's host section.
    CarouselHoverStart,
    /// Pointer left the carousel's host section.
    CarouselHoverEnd,
    /// Horizontal touch pressed on the carousel.
    CarouselTouchStart { x_px: f32 },
    /// Horizontal touch released on the carousel.
    CarouselTouchEnd { x_px: f32 },
    /// Mouse drag started on the carousel.
    CarouselPointerDown { x_px: f32 },
    /// Mouse drag released on the carousel.
    CarouselPointerUp { x_px: f32 },
    /// Mouse left the carousel mid-drag.
    CarouselPointerLeave,
}
