//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing callers to match on
//! strings.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone)]
pub enum DomainError {
    /// Backpack is at capacity and an add was attempted
    #[error("Backpack is full: cannot hold more than {max} items")]
    BackpackFull { max: usize },

    /// Hero health reached zero during damage resolution
    #[error("Game over: {hero} has been defeated")]
    GameOver { hero: String },

    /// Scene advance attempted while the lock condition is unmet
    #[error("Cannot proceed yet: defeat enemies or complete tasks")]
    SceneLocked,

    /// Index outside the container's bounds
    #[error("Invalid index {index} for container of length {len}")]
    InvalidIndex { index: usize, len: usize },
}

impl DomainError {
    /// Create a game-over error for the named hero.
    pub fn game_over(hero: impl Into<String>) -> Self {
        Self::GameOver { hero: hero.into() }
    }
}
