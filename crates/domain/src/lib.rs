//! Delvr Domain - Core game entities, invariants, and outcome events
//!
//! Pure domain logic: no I/O, no async, no logging. Mutations communicate
//! through returned outcome values; the engine decides what to log and when
//! to persist.

pub mod artifact;
pub mod backpack;
pub mod character;
pub mod error;
pub mod hero;
pub mod scene;
pub mod scene_context;

pub use artifact::Artifact;
pub use backpack::{
    Backpack, BackpackChange, BackpackItem, BackpackItemFactory, BackpackObserver, ItemEvent,
    ItemKind, BACKPACK_CAPACITY, POTION_BREW_DAMAGE,
};
pub use character::{Character, CharacterKind, DamageOutcome, GiftOutcome};
pub use error::DomainError;
pub use hero::{Hero, INITIAL_HERO_HEALTH};
pub use scene::Scene;
pub use scene_context::{SceneContext, SceneContextState};
