//! Section definitions for the vertical feed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audio::AudioTrack;

/// Position of a section in the ordered feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(pub usize);

impl SectionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entrance animation family for a section.
///
/// Selects which entrance routine the host runs when the section becomes
/// active. Has no effect on tracking or audio arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Landing section hosting the card carousel.
    #[default]
    Intro,
    /// Timeline-style biography section.
    About,
    /// AR showcase section.
    ArLab,
    /// Brand identity section.
    Branding,
    /// Narrative/story section.
    Storytelling,
    /// Cross-cultural section.
    Culture,
}

/// One full-viewport content unit in the feed.
///
/// A section owns zero or one background [`AudioTrack`]; tracks are never
/// shared between sections.
pub struct SectionDef {
    /// Stable key used for persisted engagement state.
    pub slug: String,
    /// Display title, used in share payloads.
    pub title: String,
    /// Entrance animation family.
    pub kind: SectionKind,
    /// Outbound link offered when the section is shared.
    pub link: Option<String>,
    /// Background audio, owned exclusively by this section.
    pub track: Option<Box<dyn AudioTrack>>,
}

impl SectionDef {
    pub fn new(slug: impl Into<String>, title: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            kind,
            link: None,
            track: None,
        }
    }

    /// Set the outbound share link.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }

    /// Attach the section's background track.
    pub fn with_track(mut self, track: Box<dyn AudioTrack>) -> Self {
        self.track = Some(track);
        self
    }

    #[inline]
    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }
}

impl fmt::Debug for SectionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionDef")
            .field("slug", &self.slug)
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("link", &self.link)
            .field("track", &self.track.is_some())
            .finish()
    }
}
