//! Backpack items - behavior-bearing wrappers around artifacts
//!
//! An item is an [`Artifact`] plus a closed [`ItemKind`] union. The kind
//! carries variant-specific state (a sword remembers the damage it was forged
//! with, a shield its original defense) and decides how the item reacts to
//! broadcast events.

use crate::artifact::Artifact;

/// Damage a potion is restored to when brewed.
pub const POTION_BREW_DAMAGE: u32 = 100;

/// Named event kinds items broadcast to each other through their backpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEvent {
    /// Restore swords to their initial damage
    Sharpen,
    /// Restore potions to the fixed brew damage
    Brew,
}

/// Closed set of item variants.
///
/// Variant-specific state lives here; everything else is shared `Artifact`
/// data. The set is fixed and small, so dispatch is a plain `match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// Depletes with use; restored to its forged damage by `Sharpen`
    Sword { initial_damage: u32 },
    /// Wears down absorbing damage; restored by the restoration sweep
    Shield { initial_defense: u32 },
    /// Restored to [`POTION_BREW_DAMAGE`] by `Brew`
    Potion,
    /// Consumable trigger: broadcasts `Sharpen` when added to a backpack
    Sharpener,
    /// Consumable trigger: broadcasts `Brew` when added to a backpack
    Distiller,
    /// No special behavior
    Generic,
}

/// A behavior-bearing item held by a backpack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackpackItem {
    artifact: Artifact,
    kind: ItemKind,
}

impl BackpackItem {
    pub(crate) fn new(artifact: Artifact, kind: ItemKind) -> Self {
        Self { artifact, kind }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn name(&self) -> &str {
        self.artifact.name()
    }

    #[inline]
    pub fn damage(&self) -> u32 {
        self.artifact.damage()
    }

    #[inline]
    pub fn defense(&self) -> u32 {
        self.artifact.defense()
    }

    #[inline]
    pub fn step(&self) -> u32 {
        self.artifact.step()
    }

    #[inline]
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// The item's underlying artifact data.
    #[inline]
    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    // =========================================================================
    // Combat use
    // =========================================================================

    /// Use the item for one attack.
    ///
    /// Deals `min(damage, step)` and depletes the damage pool by `step`,
    /// clamping at zero. A sword goes blunt with repeated use.
    pub fn use_for_attack(&mut self) -> u32 {
        let current = self.artifact.damage();
        let dealt = current.min(self.artifact.step());
        self.artifact.set_damage(current.saturating_sub(self.artifact.step()));
        dealt
    }

    /// Use the item to absorb incoming damage.
    ///
    /// Returns the damage passed through; the defense pool is consumed by the
    /// amount absorbed. Shields wear down.
    pub fn use_for_defense(&mut self, incoming_damage: u32) -> u32 {
        let current = self.artifact.defense();
        let passed_through = incoming_damage.saturating_sub(current);
        let defense_lost = incoming_damage.min(current);
        self.artifact.set_defense(current - defense_lost);
        passed_through
    }

    // =========================================================================
    // Item events
    // =========================================================================

    /// Event this item broadcasts at the moment it enters a backpack, if any.
    pub fn trigger_event(&self) -> Option<ItemEvent> {
        match self.kind {
            ItemKind::Sharpener => Some(ItemEvent::Sharpen),
            ItemKind::Distiller => Some(ItemEvent::Brew),
            _ => None,
        }
    }

    /// React to a broadcast event. Items that don't care ignore it.
    pub fn receive_event(&mut self, event: ItemEvent) {
        match (&self.kind, event) {
            (ItemKind::Sword { initial_damage }, ItemEvent::Sharpen) => {
                self.artifact.set_damage(*initial_damage);
            }
            (ItemKind::Potion, ItemEvent::Brew) => {
                self.artifact.set_damage(POTION_BREW_DAMAGE);
            }
            _ => {}
        }
    }

    /// Restore the item to fighting shape where its kind allows it:
    /// a blunted sword is re-sharpened, a shield's defense comes back,
    /// a potion is re-brewed. Other kinds are untouched.
    pub fn restore(&mut self) {
        match self.kind {
            ItemKind::Sword { initial_damage } => {
                if self.artifact.damage() < initial_damage {
                    self.artifact.set_damage(initial_damage);
                }
            }
            ItemKind::Shield { initial_defense } => {
                self.artifact.set_defense(initial_defense);
            }
            ItemKind::Potion => {
                if self.artifact.damage() <= POTION_BREW_DAMAGE {
                    self.artifact.set_damage(POTION_BREW_DAMAGE);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword(damage: u32, step: u32) -> BackpackItem {
        BackpackItem::new(
            Artifact::new("Sword", "A sword to fight with.")
                .with_damage(damage)
                .with_step(step),
            ItemKind::Sword {
                initial_damage: damage,
            },
        )
    }

    fn shield(defense: u32) -> BackpackItem {
        BackpackItem::new(
            Artifact::new("Shield", "A battered shield.").with_defense(defense),
            ItemKind::Shield {
                initial_defense: defense,
            },
        )
    }

    mod attack {
        use super::*;

        #[test]
        fn attack_deals_step_and_depletes() {
            let mut item = sword(60, 30);

            assert_eq!(item.use_for_attack(), 30);
            assert_eq!(item.damage(), 30);
            assert_eq!(item.use_for_attack(), 30);
            assert_eq!(item.damage(), 0);
        }

        #[test]
        fn depleted_item_deals_nothing() {
            let mut item = sword(60, 30);
            item.use_for_attack();
            item.use_for_attack();

            assert_eq!(item.use_for_attack(), 0);
            assert_eq!(item.damage(), 0);
        }

        #[test]
        fn attack_deals_at_most_remaining_damage() {
            let mut item = sword(10, 30);

            assert_eq!(item.use_for_attack(), 10);
            assert_eq!(item.damage(), 0);
        }
    }

    mod defense {
        use super::*;

        #[test]
        fn defense_absorbs_and_wears_down() {
            let mut item = shield(15);

            assert_eq!(item.use_for_defense(20), 5);
            assert_eq!(item.defense(), 0);
            assert_eq!(item.use_for_defense(20), 20);
        }

        #[test]
        fn full_absorption_keeps_leftover_defense() {
            let mut item = shield(50);

            assert_eq!(item.use_for_defense(20), 0);
            assert_eq!(item.defense(), 30);
        }
    }

    mod events {
        use super::*;

        #[test]
        fn sharpen_restores_sword_damage() {
            let mut item = sword(60, 30);
            item.use_for_attack();
            assert_eq!(item.damage(), 30);

            item.receive_event(ItemEvent::Sharpen);
            assert_eq!(item.damage(), 60);
        }

        #[test]
        fn sharpen_is_ignored_by_shields() {
            let mut item = shield(15);
            item.receive_event(ItemEvent::Sharpen);
            assert_eq!(item.defense(), 15);
        }

        #[test]
        fn brew_restores_potion_damage() {
            let mut item = BackpackItem::new(
                Artifact::new("Potion", "Abracadabra potion 100ml").with_damage(10),
                ItemKind::Potion,
            );

            item.receive_event(ItemEvent::Brew);
            assert_eq!(item.damage(), POTION_BREW_DAMAGE);
        }
    }

    mod restore {
        use super::*;

        #[test]
        fn restore_sharpens_blunted_sword() {
            let mut item = sword(60, 30);
            item.use_for_attack();

            item.restore();
            assert_eq!(item.damage(), 60);
        }

        #[test]
        fn restore_refreshes_shield_defense() {
            let mut item = shield(15);
            item.use_for_defense(20);

            item.restore();
            assert_eq!(item.defense(), 15);
        }

        #[test]
        fn restore_leaves_generic_items_alone() {
            let mut item = BackpackItem::new(
                Artifact::new("Torch", "A torch to light your way."),
                ItemKind::Generic,
            );

            item.restore();
            assert_eq!(item.damage(), 0);
            assert_eq!(item.defense(), 0);
        }
    }
}
