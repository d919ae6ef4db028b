//! Carousel card definitions.

use serde::{Deserialize, Serialize};

/// Animation routine selector for a carousel card.
///
/// Exactly one routine runs per kind when a card becomes active;
/// [`CardKind::Plain`] is the explicit no-op default for cards without
/// a dedicated routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// Step-by-step career journey card.
    Journey,
    /// Floating skill chips card.
    Skills,
    /// World-map location pins card.
    GlobalReach,
    /// Summary and feature highlights card.
    About,
    /// No entrance routine.
    #[default]
    Plain,
}

/// One card in the landing carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDef {
    /// Short label, used by hosts for dots and debugging.
    pub label: String,
    /// Animation routine selector.
    pub kind: CardKind,
}

impl CardDef {
    pub fn new(label: impl Into<String>, kind: CardKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }
}
