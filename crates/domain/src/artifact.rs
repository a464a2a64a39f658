//! Artifact - static reward descriptor
//!
//! An artifact is the inert form of an item: what lies on a scene floor or
//! travels through a save file. It only gains behavior once a backpack turns
//! it into a [`BackpackItem`](crate::backpack::BackpackItem).

use std::time::Duration;

/// A static reward descriptor.
///
/// # Invariants
///
/// - `damage`, `defense` and `step` are non-negative by construction (`u32`)
/// - `name` is the artifact's identity within a container (scene or backpack)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    name: String,
    description: String,
    damage: u32,
    defense: u32,
    step: u32,
    /// Delay before the artifact appears in its scene, if any
    delayed_appearance: Option<Duration>,
}

impl Artifact {
    /// Create a new artifact with zeroed combat stats and no appearance delay.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            damage: 0,
            defense: 0,
            step: 0,
            delayed_appearance: None,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the artifact's total damage pool.
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Set the artifact's total defense pool.
    pub fn with_defense(mut self, defense: u32) -> Self {
        self.defense = defense;
        self
    }

    /// Set the damage spent per attack use.
    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    /// Schedule the artifact to appear only after the given delay.
    pub fn with_delayed_appearance(mut self, delay: Duration) -> Self {
        self.delayed_appearance = Some(delay);
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
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn damage(&self) -> u32 {
        self.damage
    }

    #[inline]
    pub fn defense(&self) -> u32 {
        self.defense
    }

    #[inline]
    pub fn step(&self) -> u32 {
        self.step
    }

    #[inline]
    pub fn delayed_appearance(&self) -> Option<Duration> {
        self.delayed_appearance
    }

    // =========================================================================
    // Mutation (crate-internal: items deplete through use)
    // =========================================================================

    pub(crate) fn set_damage(&mut self, damage: u32) {
        self.damage = damage;
    }

    pub(crate) fn set_defense(&mut self, defense: u32) {
        self.defense = defense;
    }
}
