//! Reconstruction layer: plain wire data in, behavior-bearing entities out,
//! and back again for persistence.
//!
//! Polymorphism is revived through closed discriminant mappings: artifact
//! names go through the domain's `BackpackItemFactory`, character type tags
//! through the match below. Both mappings must be kept in sync with every
//! introduced variant - an unmapped discriminant degrades to the generic
//! variant on purpose.

use std::time::Duration;

use delvr_domain::{
    Artifact, Backpack, BackpackItem, BackpackItemFactory, Character, CharacterKind, DomainError,
    Hero, Scene, SceneContextState,
};
use delvr_shared::{
    ArtifactData, BackpackData, CharacterData, CharacterTypeData, HeroData, SceneContextStateData,
    SceneData,
};

/// Rebuilds live object graphs from plain persisted data and produces the
/// reverse snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameEntityAssembler {
    item_factory: BackpackItemFactory,
}

impl GameEntityAssembler {
    pub fn new(item_factory: BackpackItemFactory) -> Self {
        Self { item_factory }
    }

    // =========================================================================
    // Wire data -> domain
    // =========================================================================

    pub fn build_artifact(&self, data: &ArtifactData) -> Artifact {
        let mut artifact = Artifact::new(&data.name, &data.description)
            .with_damage(data.damage)
            .with_defense(data.defense)
            .with_step(data.step);
        if let Some(millis) = data.delayed_appearance {
            artifact = artifact.with_delayed_appearance(Duration::from_millis(millis));
        }
        artifact
    }

    pub fn build_backpack_item(&self, data: &ArtifactData) -> BackpackItem {
        self.item_factory.create_item(&self.build_artifact(data))
    }

    pub fn build_character(&self, data: &CharacterData) -> Character {
        let kind = match data.character_type {
            CharacterTypeData::Enemy => CharacterKind::Enemy,
            CharacterTypeData::Ally => CharacterKind::Ally,
            // Unknown tags degrade to a harmless non-combat character.
            CharacterTypeData::Neutral | CharacterTypeData::Unknown => CharacterKind::Neutral,
        };
        let mut character = Character::new(&data.name, kind)
            .with_avatar(&data.avatar)
            .with_dialogue(&data.dialogue)
            .with_useful_artifacts(data.useful_artifacts.clone())
            .with_enables_next_scene(data.enables_next_scene);
        if let Some(health) = data.health {
            character = character.with_health(health);
        }
        if let Some(damage) = data.damage {
            character = character.with_damage(damage);
        }
        character
    }

    /// Rebuild a hero, backpack and active selections included.
    ///
    /// Fails only on structurally unusable data (a backpack beyond capacity).
    pub fn build_hero(&self, data: &HeroData) -> Result<Hero, DomainError> {
        let items = data
            .backpack
            .items
            .iter()
            .map(|item| self.build_backpack_item(item))
            .collect();
        let mut backpack = Backpack::with_items(self.item_factory, items)?;
        backpack.set_active_attack_item(data.backpack.active_attack_item.as_ref().map(|item| {
            item.name.as_str()
        }));
        backpack.set_active_defense_item(data.backpack.active_defense_item.as_ref().map(|item| {
            item.name.as_str()
        }));
        Ok(Hero::new(backpack, &data.name, data.health))
    }

    /// Rebuild a scene as a shell plus its artifact list.
    ///
    /// The scene comes back with an empty item list: arrival (immediate or
    /// delayed) is the orchestrator's job, through the scene item commands.
    pub fn build_scene(&self, data: &SceneData) -> (Scene, Vec<Artifact>) {
        let scene = Scene::new(
            data.id,
            &data.description,
            data.characters
                .iter()
                .map(|character| self.build_character(character))
                .collect(),
            Vec::new(),
            &data.background_image,
        );
        let items = data
            .items
            .iter()
            .map(|item| self.build_artifact(item))
            .collect();
        (scene, items)
    }

    // =========================================================================
    // Domain -> wire data
    // =========================================================================

    pub fn snapshot_artifact(&self, artifact: &Artifact) -> ArtifactData {
        ArtifactData {
            name: artifact.name().to_string(),
            description: artifact.description().to_string(),
            damage: artifact.damage(),
            defense: artifact.defense(),
            step: artifact.step(),
            delayed_appearance: artifact
                .delayed_appearance()
                .map(|delay| delay.as_millis() as u64),
        }
    }

    pub fn snapshot_backpack(&self, backpack: &Backpack) -> BackpackData {
        BackpackData {
            items: backpack
                .items()
                .iter()
                .map(|item| self.snapshot_artifact(item.artifact()))
                .collect(),
            active_attack_item: backpack
                .active_attack_item()
                .map(|item| self.snapshot_artifact(item.artifact())),
            active_defense_item: backpack
                .active_defense_item()
                .map(|item| self.snapshot_artifact(item.artifact())),
        }
    }

    pub fn snapshot_hero(&self, hero: &Hero) -> HeroData {
        HeroData {
            name: hero.name().to_string(),
            health: hero.health(),
            backpack: self.snapshot_backpack(hero.backpack()),
        }
    }

    pub fn snapshot_character(&self, character: &Character) -> CharacterData {
        CharacterData {
            name: character.name().to_string(),
            avatar: character.avatar().to_string(),
            character_type: match character.kind() {
                CharacterKind::Enemy => CharacterTypeData::Enemy,
                CharacterKind::Ally => CharacterTypeData::Ally,
                CharacterKind::Neutral => CharacterTypeData::Neutral,
            },
            enables_next_scene: character.enables_next_scene(),
            health: character.health(),
            damage: character.damage(),
            dialogue: character.interact().to_string(),
            useful_artifacts: character.useful_artifacts().to_vec(),
        }
    }

    pub fn snapshot_scene(&self, scene: &Scene) -> SceneData {
        SceneData {
            id: scene.id(),
            description: scene.description().to_string(),
            characters: scene
                .characters()
                .iter()
                .map(|character| self.snapshot_character(character))
                .collect(),
            items: scene
                .items()
                .iter()
                .map(|item| self.snapshot_artifact(item))
                .collect(),
            background_image: scene.background_image().to_string(),
        }
    }

    pub fn snapshot_state(&self, state: &SceneContextState) -> SceneContextStateData {
        SceneContextStateData {
            scene: self.snapshot_scene(state.scene()),
            hero: self.snapshot_hero(state.hero()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delvr_domain::ItemKind;

    fn assembler() -> GameEntityAssembler {
        GameEntityAssembler::new(BackpackItemFactory::new())
    }

    fn sword_data() -> ArtifactData {
        ArtifactData {
            name: "Sword".into(),
            description: "A sword to fight with.".into(),
            damage: 100,
            defense: 30,
            step: 5,
            delayed_appearance: None,
        }
    }

    #[test]
    fn item_names_revive_their_kinds() {
        let item = assembler().build_backpack_item(&sword_data());
        assert_eq!(
            item.kind(),
            &ItemKind::Sword {
                initial_damage: 100
            }
        );

        let generic = assembler().build_backpack_item(&ArtifactData {
            name: "Dragon Scale".into(),
            ..sword_data()
        });
        assert_eq!(generic.kind(), &ItemKind::Generic);
    }

    #[test]
    fn unknown_character_tag_degrades_to_a_neutral_character() {
        let character = assembler().build_character(&CharacterData {
            name: "Mimic".into(),
            avatar: String::new(),
            character_type: CharacterTypeData::Unknown,
            enables_next_scene: false,
            health: Some(40),
            damage: Some(10),
            dialogue: "...".into(),
            useful_artifacts: vec![],
        });

        assert_eq!(character.kind(), CharacterKind::Neutral);
        // Neutral characters shrug off damage.
        assert_eq!(character.health(), Some(40));
    }

    #[test]
    fn hero_round_trips_with_active_selection_by_name() {
        let data = HeroData {
            name: "Hero".into(),
            health: 90,
            backpack: BackpackData {
                items: vec![
                    sword_data(),
                    ArtifactData {
                        name: "Torch".into(),
                        description: String::new(),
                        damage: 0,
                        defense: 0,
                        step: 0,
                        delayed_appearance: None,
                    },
                ],
                active_attack_item: Some(sword_data()),
                active_defense_item: None,
            },
        };

        let hero = assembler().build_hero(&data).expect("hero");
        assert_eq!(hero.health(), 90);
        assert_eq!(hero.backpack().items().len(), 2);
        assert_eq!(
            hero.backpack().active_attack_item().map(|i| i.name()),
            Some("Sword")
        );

        let back = assembler().snapshot_hero(&hero);
        assert_eq!(back, data);
    }

    #[test]
    fn oversized_backpack_data_is_rejected() {
        let items = (0..6)
            .map(|i| ArtifactData {
                name: format!("Rock {i}"),
                description: String::new(),
                damage: 0,
                defense: 0,
                step: 0,
                delayed_appearance: None,
            })
            .collect();
        let data = HeroData {
            name: "Hero".into(),
            health: 100,
            backpack: BackpackData {
                items,
                active_attack_item: None,
                active_defense_item: None,
            },
        };

        assert!(matches!(
            assembler().build_hero(&data),
            Err(DomainError::BackpackFull { .. })
        ));
    }

    #[test]
    fn scene_comes_back_as_a_shell_plus_items_to_stage() {
        let data = SceneData {
            id: 1,
            description: "You enter a dark cave.".into(),
            characters: vec![CharacterData {
                name: "Gnome".into(),
                avatar: "gnome.webp".into(),
                character_type: CharacterTypeData::Enemy,
                enables_next_scene: false,
                health: Some(100),
                damage: Some(5),
                dialogue: "I am a gnome.".into(),
                useful_artifacts: vec![],
            }],
            items: vec![
                ArtifactData {
                    name: "Sharpener".into(),
                    description: "A sharpener to keep your sword sharp.".into(),
                    damage: 0,
                    defense: 0,
                    step: 0,
                    delayed_appearance: Some(30_000),
                },
            ],
            background_image: "scene-1-bg.webp".into(),
        };

        let (scene, items) = assembler().build_scene(&data);
        assert_eq!(scene.id(), 1);
        assert_eq!(scene.characters().len(), 1);
        assert!(scene.items().is_empty());
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].delayed_appearance(),
            Some(Duration::from_millis(30_000))
        );
    }
}
