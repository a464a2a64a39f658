//! Item construction strategy
//!
//! Maps artifact names to concrete item kinds. This closed table is the single
//! mechanism for reviving item behavior from plain data: a live `add_item`
//! call and save-file reconstruction both go through it, so it must be kept in
//! sync with every item variant. Unknown names intentionally fall back to a
//! generic item.

use crate::artifact::Artifact;
use crate::backpack::item::{BackpackItem, ItemKind};

/// Builds behavior-bearing items from plain artifacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackpackItemFactory;

impl BackpackItemFactory {
    pub fn new() -> Self {
        Self
    }

    /// Convert an artifact into an item, choosing the kind by name.
    pub fn create_item(&self, artifact: &Artifact) -> BackpackItem {
        let kind = match artifact.name() {
            "Sword" | "Gold Sword" => ItemKind::Sword {
                initial_damage: artifact.damage(),
            },
            "Shield" => ItemKind::Shield {
                initial_defense: artifact.defense(),
            },
            "Potion" | "Potion vial" => ItemKind::Potion,
            "Sharpener" => ItemKind::Sharpener,
            "Distiller" => ItemKind::Distiller,
            _ => ItemKind::Generic,
        };
        BackpackItem::new(artifact.clone(), kind)
    }
}
