//! Effects returned from the processor for the host to apply.

use sf_core::{CardKind, SectionKind};
use sf_social::CommentRecord;

/// One presentation-layer instruction.
///
/// Effects are the processor's only output channel. They are ordered;
/// applying them in sequence reproduces the intended experience.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEffect {
    /// Loading overlay progress, 0 to 100.
    LoadingProgress { percent: u8 },
    /// Loading overlay headline changed.
    LoadingMessage { text: &'static str },
    /// Loading overlay status line changed.
    LoadingStatus { icon: &'static str, text: &'static str },
    /// Loading overlay finished fading; remove it.
    LoadingFinished,

    /// Mark exactly this section active, all others inactive.
    SectionActivated { index: usize, kind: SectionKind },
    /// Run the section's entrance animation routine.
    SectionAnimation { index: usize, kind: SectionKind },
    /// Smooth-scroll the viewport so this section's top aligns with the
    /// viewport top.
    ScrollToSection { index: usize },
    /// Width of the scroll progress indicator, 0 to 100.
    ScrollProgress { percent: f32 },

    /// New carousel window: mark these cards active/prev/next.
    CarouselChanged { active: usize, prev: usize, next: usize },
    /// Run the card's animation routine.
    CardAnimation { index: usize, kind: CardKind },

    /// Float hearts over the section's like button.
    HeartBurst { index: usize },
    /// Short haptic feedback pulse.
    Haptic { duration_ms: u32 },
    /// Like count or state changed.
    LikeUpdated { index: usize, count: u32, liked: bool },
    /// Show the comment panel with this thread.
    CommentsOpened { index: usize, comments: Vec<CommentRecord> },
    /// Comment count changed.
    CommentCount { index: usize, count: u32 },
    /// Share count changed.
    ShareCount { index: usize, count: u32 },
    /// Transient notification.
    Toast { message: String },
}
