//! Settings loading. Defaults to medium difficulty on any failure.

use std::sync::Arc;

use delvr_shared::{Difficulty, GameSettings};

use crate::ports::SettingsSource;

/// Loads and holds the application settings.
pub struct SettingsLoader {
    source: Arc<dyn SettingsSource>,
    settings: GameSettings,
}

impl SettingsLoader {
    pub fn new(source: Arc<dyn SettingsSource>) -> Self {
        Self {
            source,
            settings: GameSettings::default(),
        }
    }

    pub async fn initialize(&mut self) {
        self.settings = match self.source.load().await {
            Ok(settings) => settings,
            Err(error) => {
                tracing::error!(%error, "Failed to read settings, loading defaults");
                GameSettings::default()
            }
        };
    }

    #[inline]
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.settings.difficulty
    }
}
