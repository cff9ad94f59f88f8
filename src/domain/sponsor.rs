//! Sponsored content slots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slot used when a numbered grid slot has no active sponsor.
pub const GRID_FALLBACK_SLOT: &str = "slot_grid";

/// What a sponsor slot shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SponsorContent {
    Image {
        #[serde(rename = "imageUrl")]
        image_url: String,
        #[serde(default)]
        title: Option<String>,
    },
    Text {
        title: String,
        #[serde(default)]
        body: String,
        #[serde(default, rename = "ctaText")]
        cta_text: Option<String>,
    },
}

/// One sponsor slot document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSlot {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(flatten)]
    pub content: SponsorContent,
}

impl AdSlot {
    /// Label used for click analytics and image alt text.
    pub fn label(&self) -> &str {
        match &self.content {
            SponsorContent::Image { title, .. } => title.as_deref().unwrap_or("Advertisement"),
            SponsorContent::Text { title, .. } => title,
        }
    }
}

/// All sponsor slots keyed by slot name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SponsorBoard {
    slots: BTreeMap<String, AdSlot>,
}

impl SponsorBoard {
    pub fn new(slots: BTreeMap<String, AdSlot>) -> Self {
        Self { slots }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AdSlot)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the slot only if it exists and is active.
    pub fn active(&self, name: &str) -> Option<&AdSlot> {
        self.slots.get(name).filter(|s| s.active)
    }

    /// Resolves a grid slot with fallbacks.
    ///
    /// Order: the named slot, then [`GRID_FALLBACK_SLOT`], then the first
    /// active slot (by name) whose name contains `grid`. `None` means the
    /// placeholder is shown.
    pub fn resolve_grid(&self, name: &str) -> Option<&AdSlot> {
        self.active(name)
            .or_else(|| self.active(GRID_FALLBACK_SLOT))
            .or_else(|| {
                self.slots
                    .iter()
                    .find(|(k, v)| v.active && k.contains("grid"))
                    .map(|(_, v)| v)
            })
    }
}

/// Name of the n-th numbered grid slot (1-based).
pub fn grid_slot_name(n: usize) -> String {
    format!("slot_grid_{}", n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(title: &str, active: bool) -> AdSlot {
        AdSlot {
            active,
            link: None,
            content: SponsorContent::Text {
                title: title.into(),
                body: String::new(),
                cta_text: None,
            },
        }
    }

    fn board(entries: &[(&str, AdSlot)]) -> SponsorBoard {
        SponsorBoard::new(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn resolves_exact_slot() {
        let b = board(&[("slot_grid_1", text("one", true)), ("slot_grid", text("any", true))]);
        assert_eq!(b.resolve_grid("slot_grid_1").unwrap().label(), "one");
    }

    #[test]
    fn inactive_slot_falls_back_to_generic() {
        let b = board(&[("slot_grid_1", text("one", false)), ("slot_grid", text("any", true))]);
        assert_eq!(b.resolve_grid("slot_grid_1").unwrap().label(), "any");
    }

    #[test]
    fn falls_back_to_any_grid_slot() {
        let b = board(&[("slot_grid_7", text("seven", true)), ("slot_top", text("top", true))]);
        assert_eq!(b.resolve_grid("slot_grid_2").unwrap().label(), "seven");
    }

    #[test]
    fn nothing_active_means_placeholder() {
        let b = board(&[("slot_top", text("top", true)), ("slot_grid_1", text("x", false))]);
        assert!(b.resolve_grid("slot_grid_1").is_none());
    }

    #[test]
    fn deserializes_image_slot() {
        let slot: AdSlot = serde_json::from_str(
            r#"{"active": true, "type": "image", "imageUrl": "https://img", "link": "https://l"}"#,
        )
        .unwrap();
        assert_eq!(slot.label(), "Advertisement");
        assert!(matches!(slot.content, SponsorContent::Image { .. }));
    }

    #[test]
    fn grid_slot_names_are_one_based() {
        assert_eq!(grid_slot_name(1), "slot_grid_1");
    }
}
