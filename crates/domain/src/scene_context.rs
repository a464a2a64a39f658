//! Scene context - the game's state machine
//!
//! Holds the current `(scene, hero)` pair as one state value. The state value
//! is the unit of transition and of serialization: a transition replaces it
//! wholesale (the hero carries forward), it is never mutated field-by-field.

use crate::artifact::Artifact;
use crate::character::GiftOutcome;
use crate::error::DomainError;
use crate::hero::Hero;
use crate::scene::Scene;

/// The current `(scene, hero)` pair.
#[derive(Debug, Clone)]
pub struct SceneContextState {
    scene: Scene,
    hero: Hero,
}

impl SceneContextState {
    pub fn new(scene: Scene, hero: Hero) -> Self {
        Self { scene, hero }
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    #[inline]
    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    #[inline]
    pub fn hero_mut(&mut self) -> &mut Hero {
        &mut self.hero
    }

    /// Deep-copied `(scene, hero)` pair, decoupled from live state.
    pub fn snapshot(&self) -> (Scene, Hero) {
        (self.scene.clone(), self.hero.clone())
    }

    /// Hand an item from the scene to the hero (see [`Scene::take_item`]).
    pub fn take_item(&mut self, name: &str) -> Result<(), DomainError> {
        self.scene.take_item(name, &mut self.hero)
    }

    /// Give an artifact from the hero's backpack to a scene character.
    /// Returns `None` when no such character is present.
    pub fn make_gift(&mut self, artifact: &Artifact, character_name: &str) -> Option<GiftOutcome> {
        let character = self.scene.character_mut(character_name)?;
        Some(self.hero.make_gift(artifact, character))
    }
}

/// State-machine wrapper around the current state value.
#[derive(Debug)]
pub struct SceneContext {
    state: SceneContextState,
}

impl SceneContext {
    pub fn new(scene: Scene, hero: Hero) -> Self {
        Self {
            state: SceneContextState::new(scene, hero),
        }
    }

    #[inline]
    pub fn state(&self) -> &SceneContextState {
        &self.state
    }

    /// Replace the whole state, e.g. when loading a saved game.
    pub fn set_state(&mut self, state: SceneContextState) {
        self.state = state;
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        self.state.scene()
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        self.state.scene_mut()
    }

    #[inline]
    pub fn hero(&self) -> &Hero {
        self.state.hero()
    }

    #[inline]
    pub fn hero_mut(&mut self) -> &mut Hero {
        self.state.hero_mut()
    }

    /// Hand an item from the current scene to the hero.
    pub fn take_item(&mut self, name: &str) -> Result<(), DomainError> {
        self.state.take_item(name)
    }

    /// Give an artifact from the hero's backpack to a scene character.
    pub fn make_gift(&mut self, artifact: &Artifact, character_name: &str) -> Option<GiftOutcome> {
        self.state.make_gift(artifact, character_name)
    }

    /// The scene is unlocked once every character in it enables the next
    /// scene. Vacuously true for an empty character list.
    pub fn is_scene_unlocked(&self) -> bool {
        self.state
            .scene()
            .characters()
            .iter()
            .all(|character| character.enables_next_scene())
    }

    /// Advance to the next scene.
    ///
    /// Fails with [`DomainError::SceneLocked`] while the unlock condition is
    /// unmet. On success the state value is replaced wholesale; the hero
    /// carries forward with health and inventory intact.
    pub fn handle_next_scene(&mut self, scene: Scene) -> Result<(), DomainError> {
        if !self.is_scene_unlocked() {
            return Err(DomainError::SceneLocked);
        }
        let hero = std::mem::take(&mut self.state.hero);
        self.state = SceneContextState::new(scene, hero);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Artifact;
    use crate::character::{Character, CharacterKind};

    fn scene_with(characters: Vec<Character>) -> Scene {
        Scene::new(1, "You enter a dark cave.", characters, vec![], "scene-1-bg.webp")
    }

    fn next_scene() -> Scene {
        Scene::new(2, "A treasure chest glints ahead.", vec![], vec![], "scene-2-bg.webp")
    }

    #[test]
    fn locked_until_every_character_enables_the_next_scene() {
        let gnome = Character::new("Gnome", CharacterKind::Enemy)
            .with_health(100)
            .with_useful_artifacts(vec![]);
        let hermit = Character::new("Old Hermit", CharacterKind::Neutral)
            .with_useful_artifacts(vec!["Torch".into()]);
        let mut context = SceneContext::new(scene_with(vec![gnome, hermit]), Hero::default());

        let result = context.handle_next_scene(next_scene());
        assert!(matches!(result, Err(DomainError::SceneLocked)));
        assert_eq!(context.scene().id(), 1);

        context
            .scene_mut()
            .character_mut("Gnome")
            .expect("gnome")
            .receive_damage(100);
        let result = context.handle_next_scene(next_scene());
        assert!(matches!(result, Err(DomainError::SceneLocked)));

        context
            .scene_mut()
            .character_mut("Old Hermit")
            .expect("hermit")
            .receive_gift(&Artifact::new("Torch", ""));
        context.handle_next_scene(next_scene()).expect("unlocked");
        assert_eq!(context.scene().id(), 2);
    }

    #[test]
    fn empty_scene_is_vacuously_unlocked() {
        let mut context = SceneContext::new(scene_with(vec![]), Hero::default());
        assert!(context.is_scene_unlocked());
        context.handle_next_scene(next_scene()).expect("unlocked");
    }

    #[test]
    fn hero_carries_forward_across_the_transition() {
        let mut context = SceneContext::new(scene_with(vec![]), Hero::default());
        context
            .hero_mut()
            .collect_reward(Artifact::new("Torch", ""))
            .expect("collect");
        context.hero_mut().receive_damage(30).expect("survives");

        context.handle_next_scene(next_scene()).expect("unlocked");

        assert_eq!(context.hero().health(), 70);
        assert!(context.hero().backpack().get_item("Torch").is_some());
    }

    #[test]
    fn snapshot_is_decoupled_from_live_state() {
        let mut context = SceneContext::new(scene_with(vec![]), Hero::default());
        let (scene, hero) = context.state().snapshot();

        context.hero_mut().receive_damage(30).expect("survives");
        context.scene_mut().add_item(Artifact::new("Torch", ""));

        assert_eq!(hero.health(), 100);
        assert!(scene.items().is_empty());
    }
}
