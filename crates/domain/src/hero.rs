//! Hero - the player entity
//!
//! Owns exactly one backpack. Damage resolution runs through the active
//! defense item; reaching zero health is a hard stop surfaced as
//! [`DomainError::GameOver`].

use crate::artifact::Artifact;
use crate::backpack::Backpack;
use crate::character::{Character, GiftOutcome};
use crate::error::DomainError;

/// Health a fresh hero starts with.
pub const INITIAL_HERO_HEALTH: u32 = 100;

/// The player entity.
#[derive(Debug, Clone)]
pub struct Hero {
    name: String,
    health: u32,
    backpack: Backpack,
}

impl Hero {
    pub fn new(backpack: Backpack, name: impl Into<String>, health: u32) -> Self {
        Self {
            name: name.into(),
            health,
            backpack,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn health(&self) -> u32 {
        self.health
    }

    #[inline]
    pub fn backpack(&self) -> &Backpack {
        &self.backpack
    }

    #[inline]
    pub fn backpack_mut(&mut self) -> &mut Backpack {
        &mut self.backpack
    }

    /// The hero's flavor line.
    pub fn interact(&self) -> &'static str {
        "The hero is ready for action!"
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Take a hit.
    ///
    /// The active defense item (if any) absorbs first; health clamps at zero.
    /// Returns the damage actually taken. Reaching zero health fails with
    /// [`DomainError::GameOver`] - a hard stop, not a recoverable condition.
    pub fn receive_damage(&mut self, damage: u32) -> Result<u32, DomainError> {
        let taken = self.backpack.use_active_defense(damage);
        self.health = self.health.saturating_sub(taken);
        if self.health == 0 {
            return Err(DomainError::game_over(&self.name));
        }
        Ok(taken)
    }

    /// Stow a reward in the backpack. Propagates the capacity failure.
    pub fn collect_reward(&mut self, reward: Artifact) -> Result<(), DomainError> {
        self.backpack.add_item(reward)
    }

    /// Give an artifact to a character.
    ///
    /// The item leaves the backpack unconditionally (a no-op if it was never
    /// held) before the character decides whether the gift is useful.
    pub fn make_gift(&mut self, artifact: &Artifact, character: &mut Character) -> GiftOutcome {
        self.backpack.remove_item(artifact.name());
        character.receive_gift(artifact)
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new(Backpack::default(), "Hero", INITIAL_HERO_HEALTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterKind;

    #[test]
    fn full_damage_applies_without_a_defense_item() {
        let mut hero = Hero::default();

        let taken = hero.receive_damage(30).expect("hero survives");
        assert_eq!(taken, 30);
        assert_eq!(hero.health(), 70);
    }

    #[test]
    fn active_defense_item_absorbs_first() {
        let mut hero = Hero::default();
        hero.backpack_mut()
            .add_item(Artifact::new("Shield", "").with_defense(50))
            .expect("add");
        hero.backpack_mut().set_active_defense_item(Some("Shield"));

        let taken = hero.receive_damage(20).expect("hero survives");
        assert_eq!(taken, 0);
        assert_eq!(hero.health(), 100);
        assert_eq!(
            hero.backpack().get_item("Shield").map(|i| i.defense()),
            Some(30)
        );
    }

    #[test]
    fn lethal_damage_clamps_health_and_fails_with_game_over() {
        let mut hero = Hero::default();

        let result = hero.receive_damage(120);
        assert!(matches!(result, Err(DomainError::GameOver { .. })));
        assert_eq!(hero.health(), 0);
    }

    #[test]
    fn gift_removes_the_item_even_when_rejected() {
        let mut hero = Hero::default();
        let pebble = Artifact::new("Pebble", "A dull pebble.");
        hero.collect_reward(pebble.clone()).expect("collect");
        let mut character =
            Character::new("Old Hermit", CharacterKind::Neutral).with_useful_artifacts(vec![
                "Torch".into(),
            ]);

        let outcome = hero.make_gift(&pebble, &mut character);
        assert!(matches!(outcome, GiftOutcome::Ignored { .. }));
        assert!(hero.backpack().get_item("Pebble").is_none());
        assert!(!character.enables_next_scene());
    }

    #[test]
    fn clone_owns_an_independent_backpack() {
        let mut hero = Hero::default();
        hero.collect_reward(Artifact::new("Torch", "")).expect("collect");

        let mut cloned = hero.clone();
        cloned.backpack_mut().remove_item("Torch");

        assert!(hero.backpack().get_item("Torch").is_some());
        assert!(cloned.backpack().get_item("Torch").is_none());
    }
}
