//! Per-section comment threads.

use serde::{Deserialize, Serialize};

use crate::store::KvStore;

/// Author shown on the seeded starter comment.
const SEED_AUTHOR: &str = "@first_visitor";

/// Text of the seeded starter comment.
const SEED_TEXT: &str = "Love where this is going";

/// One comment in a section's thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub author: String,
    pub text: String,
    pub id: String,
    pub posted_at_ms: u64,
}

/// Store key for a section's comment thread.
pub fn comments_key(slug: &str) -> String {
    format!("comments_{slug}")
}

/// Load a section's thread. Sections with no saved thread show a single
/// seeded comment, so the panel never opens empty.
pub fn load(store: &dyn KvStore, slug: &str) -> Vec<CommentRecord> {
    let saved = store
        .get(&comments_key(slug))
        .and_then(|raw| match serde_json::from_str::<Vec<CommentRecord>>(&raw) {
            Ok(list) => Some(list),
            Err(err) => {
                log::warn!("discarding malformed comment thread for {slug}: {err}");
                None
            }
        })
        .unwrap_or_default();

    if saved.is_empty() { vec![seed()] } else { saved }
}

/// Number of comments shown for a section.
pub fn count(store: &dyn KvStore, slug: &str) -> u32 {
    load(store, slug).len() as u32
}

/// Append a comment to a section's thread and persist it.
///
/// Leading and trailing whitespace is trimmed; an empty submission is
/// rejected and nothing is written. Returns the updated thread.
pub fn post(
    store: &mut dyn KvStore,
    slug: &str,
    author: &str,
    text: &str,
    now_ms: u64,
) -> Option<Vec<CommentRecord>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut thread = load(store, slug);
    thread.push(CommentRecord {
        author: author.to_string(),
        text: text.to_string(),
        id: format!("c-{now_ms}-{}", thread.len()),
        posted_at_ms: now_ms,
    });

    match serde_json::to_string(&thread) {
        Ok(raw) => store.set(&comments_key(slug), raw),
        Err(err) => log::warn!("failed to encode comment thread for {slug}: {err}"),
    }
    Some(thread)
}

fn seed() -> CommentRecord {
    CommentRecord {
        author: SEED_AUTHOR.to_string(),
        text: SEED_TEXT.to_string(),
        id: "seed-1".to_string(),
        posted_at_ms: 0,
    }
}
