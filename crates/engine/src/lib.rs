//! Delvr Engine - Orchestration, timers, persistence, and reconstruction
//!
//! Everything around the pure domain: the dungeon orchestrator with its fight
//! loop, scheduled scene item arrivals, the save/load gateway, content and
//! settings loading, and the assembler that revives behavior-bearing entities
//! from plain wire data.

pub mod assembler;
pub mod commands;
pub mod dungeon;
pub mod error;
pub mod infrastructure;
pub mod ports;
pub mod saver;
pub mod scenes;
pub mod settings;

pub use assembler::GameEntityAssembler;
pub use commands::{
    stage_commands, AddSceneItemCommand, CommandChain, SceneCommand, ScheduledAddSceneItemCommand,
    SharedContext,
};
pub use dungeon::{Dungeon, FightHandle, FIGHT_TICK};
pub use error::EngineError;
pub use infrastructure::{
    JsonFileSaveStore, JsonFileSceneSource, JsonFileSettingsSource, MemorySaveStore, SystemClock,
};
pub use ports::{ClockPort, SaveStore, SceneSource, SettingsSource, StoreError};
pub use saver::GameSaver;
pub use scenes::{default_campaign, SceneLoader};
pub use settings::SettingsLoader;
