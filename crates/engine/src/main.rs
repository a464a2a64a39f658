//! Delvr Engine - Demo entry point.
//!
//! Stands in for a rendering layer: wires the core together, plays a few
//! seconds of the default campaign, and exercises save/load.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use delvr_domain::{CharacterKind, Hero, SceneContext};
use delvr_engine::{
    Dungeon, GameEntityAssembler, GameSaver, JsonFileSaveStore, JsonFileSceneSource,
    JsonFileSettingsSource, SceneLoader, SettingsLoader, SystemClock,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "delvr_engine=info,delvr_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Delvr");

    let mut settings = SettingsLoader::new(Arc::new(JsonFileSettingsSource::new("settings.json")));
    settings.initialize().await;
    tracing::info!(difficulty = ?settings.difficulty(), "Settings loaded");

    let mut scenes = SceneLoader::new(Arc::new(JsonFileSceneSource::new("scenes.json")));
    scenes.initialize().await;
    let opening = scenes
        .scenes()
        .first()
        .context("campaign has no scenes")?
        .clone();

    let assembler = GameEntityAssembler::default();
    let (scene, items) = assembler.build_scene(&opening);
    let dungeon = Dungeon::new(
        SceneContext::new(scene, Hero::default()),
        GameSaver::new(Arc::new(JsonFileSaveStore::new("saved-game.json"))),
        assembler,
        Arc::new(SystemClock),
    );
    dungeon.stage_initial_items(items).await;

    dungeon.start().await;

    // Grab whatever gear the opening scene offers.
    dungeon.take_item("Sword").await?;
    dungeon.take_item("Shield").await?;
    {
        let mut context = dungeon.context().lock().await;
        let backpack = context.hero_mut().backpack_mut();
        if backpack.get_item("Sword").is_some() {
            backpack.set_active_attack_item(Some("Sword"));
        }
        if backpack.get_item("Shield").is_some() {
            backpack.set_active_defense_item(Some("Shield"));
        }
    }

    // A few rounds against the first enemy, then break off.
    let enemy = {
        let context = dungeon.context().lock().await;
        context
            .scene()
            .characters()
            .iter()
            .find(|character| character.kind() == CharacterKind::Enemy)
            .map(|character| character.name().to_string())
    };
    if let Some(enemy) = enemy {
        if let Some(fight) = dungeon.fight(&enemy).await {
            tokio::time::sleep(Duration::from_millis(3500)).await;
            fight.cancel();
            fight.join().await;
        }
    }

    dungeon.save_game().await?;
    dungeon.load_last_game().await;

    let context = dungeon.context().lock().await;
    tracing::info!(
        hero = context.hero().name(),
        health = context.hero().health(),
        items = context.hero().backpack().items().len(),
        "Session over"
    );
    Ok(())
}
