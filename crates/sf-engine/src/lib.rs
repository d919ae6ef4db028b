//! sf-engine: Feed controller for ScrollForge
//!
//! Wires the section tracker, audio arbiter, carousel, and engagement
//! widgets into one controller behind a command queue:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     CONTROLLER ARCHITECTURE                       │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                   │
//! │   Host UI callbacks                   Host frame loop             │
//! │   ┌──────────────────┐               ┌───────────────────────┐   │
//! │   │ section_visible()│               │ FeedProcessor         │   │
//! │   │ scrolled()       │──FeedCommand──▶│  .process(now_ms)    │   │
//! │   │ key() / like()   │   queue       │                       │   │
//! │   │ carousel_*()     │  (lock-free)  │ tracker / arbiter /   │   │
//! │   └──────────────────┘               │ carousel / social     │   │
//! │                                      └──────────┬────────────┘   │
//! │                                                 │                 │
//! │                                          Vec<FeedEffect>          │
//! │                                  (scrolls, animations, toasts)    │
//! │                                                                   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The handle side is cheap, clonable, and thread-safe; the processor
//! is single-owner. All state transitions run inside `process`, so
//! every read-modify-write of shared indices is atomic per invocation
//! by construction. Time is a monotonic millisecond clock supplied by
//! the host; no timer is ever stacked, only overwritten.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sf_engine::{FeedConfig, create_feed_controller};
//!
//! let (handle, mut processor) =
//!     create_feed_controller(FeedConfig::default(), sections, cards, store, share);
//!
//! // UI thread
//! handle.section_visible(1, true);
//!
//! // Frame loop
//! for effect in processor.process(now_ms) {
//!     apply(effect);
//! }
//! ```

mod command;
mod config;
mod controller;
mod effect;
mod loading;

pub use command::{FeedCommand, NavKey};
pub use config::FeedConfig;
pub use controller::{FeedHandle, FeedProcessor, create_feed_controller};
pub use effect::FeedEffect;
