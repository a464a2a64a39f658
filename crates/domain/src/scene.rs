//! Scene - one location and its encounter
//!
//! A scene is plain data: an id used for ordering and lookup, the characters
//! present, the artifacts currently on the floor, and a background reference.
//! Item *arrival* (immediate or delayed) is driven from outside through the
//! engine's command layer; the scene itself only knows how to hold and hand
//! over items.

use crate::artifact::Artifact;
use crate::character::Character;
use crate::error::DomainError;
use crate::hero::Hero;

/// One location/encounter.
#[derive(Debug, Clone)]
pub struct Scene {
    id: u32,
    description: String,
    characters: Vec<Character>,
    items: Vec<Artifact>,
    background_image: String,
}

impl Scene {
    pub fn new(
        id: u32,
        description: impl Into<String>,
        characters: Vec<Character>,
        items: Vec<Artifact>,
        background_image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            characters,
            items,
            background_image: background_image.into(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    #[inline]
    pub fn items(&self) -> &[Artifact] {
        &self.items
    }

    #[inline]
    pub fn background_image(&self) -> &str {
        &self.background_image
    }

    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name() == name)
    }

    pub fn character_mut(&mut self, name: &str) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.name() == name)
    }

    // =========================================================================
    // Items
    // =========================================================================

    pub fn add_item(&mut self, item: Artifact) {
        self.items.push(item);
    }

    /// Remove the first item matching `name`. Absent names are a no-op.
    pub fn remove_item(&mut self, name: &str) {
        if let Some(index) = self.items.iter().position(|item| item.name() == name) {
            self.items.remove(index);
        }
    }

    pub fn item(&self, name: &str) -> Option<&Artifact> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Hand an item over to the hero.
    ///
    /// Atomic from the caller's view: on a backpack capacity failure the item
    /// stays in the scene and the error propagates. Taking an absent name is
    /// a no-op.
    pub fn take_item(&mut self, name: &str, hero: &mut Hero) -> Result<(), DomainError> {
        if let Some(index) = self.items.iter().position(|item| item.name() == name) {
            hero.collect_reward(self.items[index].clone())?;
            self.items.remove(index);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterKind;

    fn cave() -> Scene {
        Scene::new(
            1,
            "You enter a dark cave.",
            vec![Character::new("Gnome", CharacterKind::Enemy).with_health(100)],
            vec![
                Artifact::new("Torch", "A torch to light your way."),
                Artifact::new("Sword", "A sword to fight with.").with_damage(100),
            ],
            "scene-1-bg.webp",
        )
    }

    #[test]
    fn take_item_moves_the_artifact_to_the_hero() {
        let mut scene = cave();
        let mut hero = Hero::default();

        scene.take_item("Torch", &mut hero).expect("take");

        assert!(scene.item("Torch").is_none());
        assert!(hero.backpack().get_item("Torch").is_some());
    }

    #[test]
    fn take_item_leaves_the_scene_untouched_when_the_backpack_is_full() {
        let mut scene = cave();
        let mut hero = Hero::default();
        for i in 0..5 {
            hero.collect_reward(Artifact::new(format!("Rock {i}"), ""))
                .expect("fill");
        }

        let result = scene.take_item("Torch", &mut hero);

        assert!(matches!(result, Err(DomainError::BackpackFull { .. })));
        assert!(scene.item("Torch").is_some());
    }

    #[test]
    fn take_item_with_absent_name_is_a_noop() {
        let mut scene = cave();
        let mut hero = Hero::default();

        scene.take_item("Lantern", &mut hero).expect("noop");
        assert_eq!(scene.items().len(), 2);
        assert!(hero.backpack().items().is_empty());
    }

    #[test]
    fn clone_owns_independent_characters_and_items() {
        let scene = cave();
        let mut cloned = scene.clone();

        cloned.remove_item("Torch");
        cloned
            .character_mut("Gnome")
            .expect("gnome")
            .receive_damage(100);

        assert!(scene.item("Torch").is_some());
        assert_eq!(scene.character("Gnome").and_then(|c| c.health()), Some(100));
    }
}
