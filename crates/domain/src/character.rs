//! Characters - the inhabitants of a scene
//!
//! A character is enemy, ally or neutral; the three differ only in how they
//! take damage. Mutations return outcome values carrying the character's
//! dialogue line, so callers can surface it without the domain logging
//! anything itself.

use crate::artifact::Artifact;

/// Closed set of character variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterKind {
    Enemy,
    Ally,
    Neutral,
}

/// Result of one damage application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Enemy health reached zero; the character now enables the next scene
    Defeated { name: String, dialogue: String },
    /// Enemy survived the hit
    Wounded {
        name: String,
        dialogue: String,
        remaining_health: u32,
    },
    /// The character cannot be damaged (ally, neutral, or no health stat)
    Immune { name: String, dialogue: String },
}

/// Result of offering an artifact as a gift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GiftOutcome {
    /// The artifact is useful to this character; the next scene is enabled
    Accepted { name: String },
    /// The character has no use for it; nothing changes
    Ignored { name: String },
}

/// An inhabitant of a scene.
///
/// # Invariants
///
/// - `enables_next_scene` flips true permanently once a defeat or gift
///   condition is met; it never resets
/// - `health` is `None` for characters that do not participate in combat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    name: String,
    avatar: String,
    kind: CharacterKind,
    enables_next_scene: bool,
    health: Option<u32>,
    damage: Option<u32>,
    dialogue: String,
    useful_artifacts: Vec<String>,
}

impl Character {
    pub fn new(name: impl Into<String>, kind: CharacterKind) -> Self {
        Self {
            name: name.into(),
            avatar: String::new(),
            kind,
            enables_next_scene: false,
            health: None,
            damage: None,
            dialogue: String::new(),
            useful_artifacts: Vec::new(),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_dialogue(mut self, dialogue: impl Into<String>) -> Self {
        self.dialogue = dialogue.into();
        self
    }

    pub fn with_useful_artifacts(mut self, names: Vec<String>) -> Self {
        self.useful_artifacts = names;
        self
    }

    /// Set the flag directly (used when loading from a save).
    pub fn with_enables_next_scene(mut self, value: bool) -> Self {
        self.enables_next_scene = value;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    #[inline]
    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    #[inline]
    pub fn enables_next_scene(&self) -> bool {
        self.enables_next_scene
    }

    #[inline]
    pub fn health(&self) -> Option<u32> {
        self.health
    }

    #[inline]
    pub fn damage(&self) -> Option<u32> {
        self.damage
    }

    #[inline]
    pub fn useful_artifacts(&self) -> &[String] {
        &self.useful_artifacts
    }

    /// Whether this enemy has already been brought to zero health.
    pub fn is_defeated(&self) -> bool {
        self.health == Some(0)
    }

    // =========================================================================
    // Interactions
    // =========================================================================

    /// The character's dialogue line. Pure read.
    pub fn interact(&self) -> &str {
        &self.dialogue
    }

    /// Apply damage to the character.
    ///
    /// The character always speaks first (the outcome carries the dialogue),
    /// then damage resolves by kind: enemies lose health clamped at zero,
    /// allies and neutrals are immune. A character whose health reaches zero
    /// permanently enables the next scene.
    pub fn receive_damage(&mut self, amount: u32) -> DamageOutcome {
        let dialogue = self.dialogue.clone();

        let outcome = match (self.kind, self.health) {
            (CharacterKind::Enemy, Some(health)) => {
                let remaining = health.saturating_sub(amount);
                self.health = Some(remaining);
                if remaining == 0 {
                    DamageOutcome::Defeated {
                        name: self.name.clone(),
                        dialogue,
                    }
                } else {
                    DamageOutcome::Wounded {
                        name: self.name.clone(),
                        dialogue,
                        remaining_health: remaining,
                    }
                }
            }
            _ => DamageOutcome::Immune {
                name: self.name.clone(),
                dialogue,
            },
        };

        if self.health == Some(0) {
            self.enables_next_scene = true;
        }
        outcome
    }

    /// Offer an artifact as a gift.
    ///
    /// A useful artifact permanently enables the next scene; anything else is
    /// ignored, however often it is offered.
    pub fn receive_gift(&mut self, artifact: &Artifact) -> GiftOutcome {
        if self
            .useful_artifacts
            .iter()
            .any(|useful| useful == artifact.name())
        {
            self.enables_next_scene = true;
            GiftOutcome::Accepted {
                name: self.name.clone(),
            }
        } else {
            GiftOutcome::Ignored {
                name: self.name.clone(),
            }
        }
    }
}
