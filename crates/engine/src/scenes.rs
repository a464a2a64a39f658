//! Scene content loading.
//!
//! Scenes come from a pluggable [`SceneSource`]; any read or parse failure
//! falls back to the built-in default campaign and is only logged - a broken
//! content document never takes the game down.

use std::sync::Arc;

use delvr_shared::{ArtifactData, CharacterData, CharacterTypeData, SceneData};

use crate::ports::SceneSource;

/// Loads and holds the campaign's scene documents.
pub struct SceneLoader {
    source: Arc<dyn SceneSource>,
    scenes: Vec<SceneData>,
}

impl SceneLoader {
    pub fn new(source: Arc<dyn SceneSource>) -> Self {
        Self {
            source,
            scenes: Vec::new(),
        }
    }

    /// Read the campaign from the source, falling back to the default
    /// campaign on failure.
    pub async fn initialize(&mut self) {
        self.scenes = match self.source.load().await {
            Ok(scenes) => scenes,
            Err(error) => {
                tracing::error!(%error, "Failed to read scenes, loading default campaign");
                default_campaign()
            }
        };
    }

    pub fn scene(&self, id: u32) -> Option<&SceneData> {
        self.scenes.iter().find(|scene| scene.id == id)
    }

    #[inline]
    pub fn scenes(&self) -> &[SceneData] {
        &self.scenes
    }
}

/// The built-in two-scene campaign: a cave with a gnome and a hermit, then a
/// dragon guarding its treasure.
pub fn default_campaign() -> Vec<SceneData> {
    vec![
        SceneData {
            id: 1,
            description: "You enter a dark cave.".into(),
            background_image: "scene-1-bg.webp".into(),
            characters: vec![
                CharacterData {
                    name: "Gnome".into(),
                    avatar: "gnome.webp".into(),
                    character_type: CharacterTypeData::Enemy,
                    enables_next_scene: false,
                    health: Some(100),
                    damage: Some(5),
                    dialogue: "I am a gnome.".into(),
                    useful_artifacts: vec![],
                },
                CharacterData {
                    name: "Old Hermit".into(),
                    avatar: "old-hermit.webp".into(),
                    character_type: CharacterTypeData::Neutral,
                    enables_next_scene: false,
                    health: Some(100),
                    damage: Some(5),
                    dialogue: "I can show you the way if you have a torch.".into(),
                    useful_artifacts: vec!["Torch".into()],
                },
            ],
            items: vec![
                ArtifactData {
                    name: "Torch".into(),
                    description: "A torch to light your way.".into(),
                    damage: 0,
                    defense: 0,
                    step: 0,
                    delayed_appearance: None,
                },
                ArtifactData {
                    name: "Shield".into(),
                    description: "A shield to hide behind.".into(),
                    damage: 0,
                    defense: 50,
                    step: 0,
                    delayed_appearance: None,
                },
                ArtifactData {
                    name: "Sword".into(),
                    description: "A sword to fight with.".into(),
                    damage: 100,
                    defense: 30,
                    step: 5,
                    delayed_appearance: None,
                },
                ArtifactData {
                    name: "Sharpener".into(),
                    description: "A sharpener to keep your sword sharp.".into(),
                    damage: 0,
                    defense: 0,
                    step: 0,
                    delayed_appearance: Some(30_000),
                },
            ],
        },
        SceneData {
            id: 2,
            description: "You see a treasure chest, but a dragon is guarding it.".into(),
            background_image: "scene-2-bg.webp".into(),
            characters: vec![CharacterData {
                name: "Dragon".into(),
                avatar: "dragon.webp".into(),
                character_type: CharacterTypeData::Enemy,
                enables_next_scene: false,
                health: Some(100),
                damage: Some(20),
                dialogue: "I am a dragon. I will not let you take the treasure.".into(),
                useful_artifacts: vec!["Gold".into()],
            }],
            items: vec![
                ArtifactData {
                    name: "Gold".into(),
                    description: "A piece of gold.".into(),
                    damage: 0,
                    defense: 0,
                    step: 0,
                    delayed_appearance: None,
                },
                ArtifactData {
                    name: "Dragon Scale".into(),
                    description: "A scale from the dragon.".into(),
                    damage: 0,
                    defense: 100,
                    step: 0,
                    delayed_appearance: None,
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockSceneSource, StoreError};

    #[tokio::test]
    async fn source_scenes_pass_through() {
        let mut source = MockSceneSource::new();
        source.expect_load().times(1).returning(|| {
            Ok(vec![SceneData {
                id: 9,
                description: "A quiet shrine.".into(),
                characters: vec![],
                items: vec![],
                background_image: "shrine.webp".into(),
            }])
        });

        let mut loader = SceneLoader::new(Arc::new(source));
        loader.initialize().await;

        assert_eq!(loader.scenes().len(), 1);
        assert!(loader.scene(9).is_some());
        assert!(loader.scene(1).is_none());
    }

    #[tokio::test]
    async fn read_failure_falls_back_to_the_default_campaign() {
        let mut source = MockSceneSource::new();
        source
            .expect_load()
            .times(1)
            .returning(|| Err(StoreError::Io(std::io::Error::other("torn page"))));

        let mut loader = SceneLoader::new(Arc::new(source));
        loader.initialize().await;

        assert_eq!(loader.scenes().len(), 2);
        let cave = loader.scene(1).expect("cave");
        assert_eq!(cave.characters.len(), 2);
        assert_eq!(cave.items.len(), 4);
        assert_eq!(cave.items[3].delayed_appearance, Some(30_000));
    }
}
