//! Persisted game state and scene content documents.
//!
//! The shapes here are the wire format: camelCase names, every combat stat
//! defaulting to zero so hand-written content documents can stay terse.
//! Reviving behavior from these plain types is the assembler's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plain reward descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub damage: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub step: u32,
    /// Milliseconds before the artifact appears in its scene
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delayed_appearance: Option<u64>,
}

/// Character variant tag.
///
/// Unknown tags deserialize to [`CharacterTypeData::Unknown`] rather than
/// failing the whole document; reconstruction degrades them to a generic
/// non-combat character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterTypeData {
    Enemy,
    Ally,
    Neutral,
    #[serde(other)]
    Unknown,
}

/// Plain character record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterData {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(rename = "type")]
    pub character_type: CharacterTypeData,
    #[serde(default)]
    pub enables_next_scene: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    #[serde(default)]
    pub dialogue: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub useful_artifacts: Vec<String>,
}

/// Plain backpack record: the held items plus the active selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackpackData {
    #[serde(default)]
    pub items: Vec<ArtifactData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_attack_item: Option<ArtifactData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_defense_item: Option<ArtifactData>,
}

/// Plain hero record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroData {
    pub name: String,
    pub health: u32,
    pub backpack: BackpackData,
}

/// Plain scene record; doubles as the scene-content document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneData {
    pub id: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub characters: Vec<CharacterData>,
    #[serde(default)]
    pub items: Vec<ArtifactData>,
    #[serde(default)]
    pub background_image: String,
}

/// The `(scene, hero)` pair as plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneContextStateData {
    pub scene: SceneData,
    pub hero: HeroData,
}

/// The persisted document: one saved game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub scene_context_state: SceneContextStateData,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_camel_case() {
        let state = GameState {
            scene_context_state: SceneContextStateData {
                scene: SceneData {
                    id: 1,
                    description: "You enter a dark cave.".into(),
                    characters: vec![],
                    items: vec![],
                    background_image: "scene-1-bg.webp".into(),
                },
                hero: HeroData {
                    name: "Hero".into(),
                    health: 100,
                    backpack: BackpackData {
                        items: vec![],
                        active_attack_item: None,
                        active_defense_item: None,
                    },
                },
            },
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
        };

        let json = serde_json::to_string(&state).expect("serialize");
        assert!(json.contains("\"sceneContextState\""));
        assert!(json.contains("\"backgroundImage\""));
        assert!(json.contains("\"timestamp\""));
    }

    #[test]
    fn terse_content_documents_fill_in_defaults() {
        let artifact: ArtifactData =
            serde_json::from_str(r#"{"name": "Torch"}"#).expect("deserialize");

        assert_eq!(artifact.damage, 0);
        assert_eq!(artifact.defense, 0);
        assert_eq!(artifact.step, 0);
        assert!(artifact.delayed_appearance.is_none());
    }

    #[test]
    fn unknown_character_type_does_not_fail_the_document() {
        let character: CharacterData = serde_json::from_str(
            r#"{"name": "Mimic", "type": "shapeshifter", "dialogue": "..."}"#,
        )
        .expect("deserialize");

        assert_eq!(character.character_type, CharacterTypeData::Unknown);
    }

    #[test]
    fn character_type_round_trips() {
        let character = CharacterData {
            name: "Gnome".into(),
            avatar: "gnome.webp".into(),
            character_type: CharacterTypeData::Enemy,
            enables_next_scene: false,
            health: Some(100),
            damage: Some(5),
            dialogue: "I am a gnome.".into(),
            useful_artifacts: vec![],
        };

        let json = serde_json::to_string(&character).expect("serialize");
        assert!(json.contains("\"type\":\"enemy\""));
        let back: CharacterData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, character);
    }
}
