//! sf-feed: Section tracking and audio arbitration
//!
//! The two state machines at the heart of the vertical feed:
//!
//! - [`SectionTracker`] follows which full-viewport section is current,
//!   handles explicit navigation, debounced scroll settling, and swipe
//!   gestures, and suppresses conflicting navigation while an animated
//!   scroll is in flight.
//! - [`AudioArbiter`] guarantees that at most one section's background
//!   track is playing at any time, keeps audio running across re-entries
//!   of the same section, and swallows host autoplay denials.
//!
//! Both machines are clock-driven: callers pass a monotonic millisecond
//! timestamp into every time-sensitive operation, and timers are plain
//! deadlines that are overwritten (never stacked) when re-armed.

mod arbiter;
mod tracker;

pub use arbiter::AudioArbiter;
pub use tracker::SectionTracker;
