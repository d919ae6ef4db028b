//! Per-section like state.

use serde::{Deserialize, Serialize};

use crate::store::KvStore;

/// Persisted like state for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LikeRecord {
    pub count: u32,
    pub liked: bool,
}

/// Store key for a section's like state.
pub fn like_key(slug: &str) -> String {
    format!("like_{slug}")
}

/// Load a section's like state, if any was saved.
///
/// A malformed payload is treated as absent; it gets overwritten on the
/// next toggle.
pub fn load(store: &dyn KvStore, slug: &str) -> Option<LikeRecord> {
    let raw = store.get(&like_key(slug))?;
    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(err) => {
            log::warn!("discarding malformed like state for {slug}: {err}");
            None
        }
    }
}

/// Flip a section's like state and persist the result.
///
/// Liking increments the count; unliking decrements it, saturating at
/// zero.
pub fn toggle(store: &mut dyn KvStore, slug: &str) -> LikeRecord {
    let mut record = load(store, slug).unwrap_or_default();
    if record.liked {
        record.count = record.count.saturating_sub(1);
        record.liked = false;
    } else {
        record.count = record.count.saturating_add(1);
        record.liked = true;
    }
    save(store, slug, record);
    record
}

fn save(store: &mut dyn KvStore, slug: &str, record: LikeRecord) {
    match serde_json::to_string(&record) {
        Ok(raw) => store.set(&like_key(slug), raw),
        Err(err) => log::warn!("failed to encode like state for {slug}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use crate::store::MemoryStore;

    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let mut store = MemoryStore::new();

        let liked = toggle(&mut store, "intro");
        assert_eq!(liked, LikeRecord { count: 1, liked: true });
        assert_eq!(load(&store, "intro"), Some(liked));

        let unliked = toggle(&mut store, "intro");
        assert_eq!(unliked, LikeRecord { count: 0, liked: false });
    }

    #[test]
    fn test_unlike_saturates_at_zero() {
        let mut store = MemoryStore::new();
        store.set(
            &like_key("intro"),
            serde_json::to_string(&LikeRecord { count: 0, liked: true }).unwrap(),
        );

        let record = toggle(&mut store, "intro");
        assert_eq!(record, LikeRecord { count: 0, liked: false });
    }

    #[test]
    fn test_malformed_state_is_discarded() {
        let mut store = MemoryStore::new();
        store.set(&like_key("intro"), "not json".to_string());

        assert_eq!(load(&store, "intro"), None);
        let record = toggle(&mut store, "intro");
        assert_eq!(record, LikeRecord { count: 1, liked: true });
    }

    #[test]
    fn test_sections_are_independent() {
        let mut store = MemoryStore::new();
        toggle(&mut store, "intro");
        assert_eq!(load(&store, "about"), None);
    }
}
