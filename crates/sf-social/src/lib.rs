//! sf-social: Engagement widgets over a key-value store
//!
//! Likes, comments, and shares for the feed's sections. Like and
//! comment state round-trips through a host-provided string key-value
//! store as JSON payloads; share counts are per-session only. The
//! share path degrades gracefully: native share sheet, then clipboard,
//! then a plain link toast.

pub mod comments;
pub mod likes;

mod format;
mod share;
mod store;

pub use comments::CommentRecord;
pub use format::format_count;
pub use likes::LikeRecord;
pub use share::{ShareError, ShareOutcome, SharePayload, SharePlatform, share_with_fallback};
pub use store::{KvStore, MemoryStore};
