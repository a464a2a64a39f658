//! Dungeon orchestrator.
//!
//! Owns the live `(scene, hero)` state behind one mutex, runs the fight loop
//! as a background task, gates scene advancement, and delegates save/load.
//! All domain mutations happen under the context lock, so within one fight
//! tick the hero's attack always lands before the enemy's retaliation and
//! nothing else interleaves.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use delvr_domain::{
    Artifact, BackpackObserver, CharacterKind, DamageOutcome, DomainError, GiftOutcome,
    SceneContext, SceneContextState,
};
use delvr_shared::{GameState, SceneData};

use crate::assembler::GameEntityAssembler;
use crate::commands::{stage_commands, CommandChain, SharedContext};
use crate::error::EngineError;
use crate::ports::ClockPort;
use crate::saver::GameSaver;

/// Seconds between combat rounds.
pub const FIGHT_TICK: std::time::Duration = std::time::Duration::from_secs(1);

/// Handle to a running fight.
///
/// Dropping the handle does not stop the fight; call [`FightHandle::cancel`].
/// Cancellation is cooperative - it stops future ticks, never a tick in
/// progress - and idempotent.
pub struct FightHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl FightHandle {
    /// Stop issuing fight ticks.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the fight task has ended (defeat, game over, or cancellation).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the fight task to end.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// The orchestrator: the UI boundary of the game core.
pub struct Dungeon {
    context: SharedContext,
    saver: GameSaver,
    assembler: GameEntityAssembler,
    clock: Arc<dyn ClockPort>,
    /// Arrival commands of the scene currently installed.
    staged_items: tokio::sync::Mutex<CommandChain>,
}

impl Dungeon {
    pub fn new(
        context: SceneContext,
        saver: GameSaver,
        assembler: GameEntityAssembler,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            context: Arc::new(tokio::sync::Mutex::new(context)),
            saver,
            assembler,
            clock,
            staged_items: tokio::sync::Mutex::new(CommandChain::default()),
        }
    }

    /// The live game state, for a rendering layer that wants direct reads.
    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    /// Opening flavor; no state change.
    pub async fn start(&self) {
        let context = self.context.lock().await;
        let hero = context.hero();
        tracing::info!(hero = hero.name(), "{}", hero.interact());
    }

    /// Subscribe an observer to the hero's backpack.
    pub async fn attach_backpack_observer(&self, observer: Arc<dyn BackpackObserver>) {
        let mut context = self.context.lock().await;
        context.hero_mut().backpack_mut().attach_observer(observer);
    }

    // =========================================================================
    // Combat
    // =========================================================================

    /// Start a repeating fight against the named character.
    ///
    /// Returns `None` when there is nothing to fight: the target is missing,
    /// not an enemy, or already defeated. Otherwise one combat round runs per
    /// [`FIGHT_TICK`] until the enemy falls, the hero falls (the game-over is
    /// logged and swallowed here - the fight simply ends), or the handle is
    /// cancelled.
    pub async fn fight(&self, character_name: &str) -> Option<FightHandle> {
        {
            let context = self.context.lock().await;
            tracing::info!(
                hero = context.hero().name(),
                character = character_name,
                "Fight requested"
            );
            let Some(character) = context.scene().character(character_name) else {
                tracing::warn!(character = character_name, "No such character in this scene");
                return None;
            };
            if character.kind() != CharacterKind::Enemy {
                tracing::info!(
                    character = character_name,
                    "Cannot fight: they are not an enemy"
                );
                return None;
            }
            if matches!(character.health(), None | Some(0)) {
                tracing::info!(character = character_name, "Already defeated");
                return None;
            }
        }

        let context = self.context.clone();
        let name = character_name.to_string();
        let token = CancellationToken::new();
        let loop_token = token.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(FIGHT_TICK);
            // The first tick of a tokio interval completes immediately;
            // consume it so every combat round lands on the cadence.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = loop_token.cancelled() => break,
                    _ = interval.tick() => {
                        let mut context = context.lock().await;
                        if !fight_tick(&mut context, &name) {
                            break;
                        }
                    }
                }
            }
        });

        Some(FightHandle { token, task })
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Snapshot the live state and hand it to the save store.
    pub async fn save_game(&self) -> Result<(), EngineError> {
        let scene_context_state = {
            let context = self.context.lock().await;
            self.assembler.snapshot_state(context.state())
        };
        self.saver
            .save_game(GameState {
                scene_context_state,
                timestamp: self.clock.now(),
            })
            .await?;
        Ok(())
    }

    /// Replace the live state with the last saved game.
    ///
    /// Absence of a save, and any unusable save, is a logged no-op - the
    /// current state stays. A rebuilt scene re-stages its item arrivals, so
    /// delayed items re-arm their timers.
    pub async fn load_last_game(&self) {
        let Some(state) = self.saver.load_last_game_state().await else {
            tracing::info!("No saved game found");
            return;
        };

        let data = state.scene_context_state;
        let hero = match self.assembler.build_hero(&data.hero) {
            Ok(hero) => hero,
            Err(error) => {
                tracing::error!(%error, "Saved game is unusable; keeping current state");
                return;
            }
        };
        let (scene, items) = self.assembler.build_scene(&data.scene);
        let scene_id = scene.id();

        {
            let mut context = self.context.lock().await;
            context.set_state(SceneContextState::new(scene, hero));
        }
        self.install_items(scene_id, items).await;
        tracing::info!("Game loaded from last save");
    }

    /// Wipe the save slot.
    pub async fn clear_saves(&self) -> Result<(), EngineError> {
        self.saver.clear_saves().await?;
        Ok(())
    }

    // =========================================================================
    // Scene flow
    // =========================================================================

    /// Advance to the given scene.
    ///
    /// Two guards, both kept deliberately: this one requires every character
    /// to be a non-enemy or already past its defeat/gift condition, and the
    /// scene context's own guard then requires every character to enable the
    /// next scene.
    pub async fn go_to_next_scene(&self, data: &SceneData) -> Result<(), EngineError> {
        let (scene_id, items) = {
            let mut context = self.context.lock().await;
            let all_enemies_defeated = context
                .scene()
                .characters()
                .iter()
                .all(|c| c.kind() != CharacterKind::Enemy || c.enables_next_scene());
            if !all_enemies_defeated {
                tracing::info!("Not all enemies are defeated");
                return Err(DomainError::SceneLocked.into());
            }

            let (scene, items) = self.assembler.build_scene(data);
            let scene_id = scene.id();
            context.handle_next_scene(scene)?;
            tracing::info!(scene_id, "All enemies defeated, moving to the next scene");
            (scene_id, items)
        };
        self.install_items(scene_id, items).await;
        Ok(())
    }

    /// Install the initial scene's items. Used once at game setup.
    pub async fn stage_initial_items(&self, items: Vec<Artifact>) {
        let scene_id = self.context.lock().await.scene().id();
        self.install_items(scene_id, items).await;
    }

    /// Hand an item from the current scene to the hero. The capacity failure
    /// propagates and the item stays in the scene.
    pub async fn take_item(&self, name: &str) -> Result<(), EngineError> {
        let mut context = self.context.lock().await;
        context.take_item(name)?;
        Ok(())
    }

    /// Give an artifact from the hero's backpack to a scene character.
    /// `None` when no such character is present.
    pub async fn make_gift(&self, artifact: &Artifact, character_name: &str) -> Option<GiftOutcome> {
        let mut context = self.context.lock().await;
        let outcome = context.make_gift(artifact, character_name);
        match &outcome {
            Some(GiftOutcome::Accepted { name }) => {
                tracing::info!(character = %name, gift = artifact.name(), "Gift accepted");
            }
            Some(GiftOutcome::Ignored { name }) => {
                tracing::info!(character = %name, gift = artifact.name(), "Gift ignored");
            }
            None => {
                tracing::warn!(character = character_name, "No such character to gift");
            }
        }
        outcome
    }

    /// Replace the staged arrival chain, cancelling the previous scene's
    /// pending timers first.
    async fn install_items(&self, scene_id: u32, items: Vec<Artifact>) {
        let mut staged = self.staged_items.lock().await;
        staged.cancel();
        let chain = stage_commands(&self.context, scene_id, items);
        chain.execute().await;
        *staged = chain;
    }
}

/// One combat round. Returns whether the fight continues.
fn fight_tick(context: &mut SceneContext, character_name: &str) -> bool {
    let hero_damage = context.hero_mut().backpack_mut().use_active_attack();
    let hero_name = context.hero().name().to_string();

    let Some(character) = context.scene_mut().character_mut(character_name) else {
        tracing::warn!(
            character = character_name,
            "Fight target left the scene; ending the fight"
        );
        return false;
    };

    tracing::info!(
        hero = %hero_name,
        character = character_name,
        damage = hero_damage,
        "Hero attacks"
    );
    let retaliation = character.damage();
    match character.receive_damage(hero_damage) {
        DamageOutcome::Defeated { name, dialogue } => {
            tracing::info!(character = %name, "{dialogue}");
            tracing::info!(character = %name, "Enemy defeated");
            return false;
        }
        DamageOutcome::Wounded {
            name,
            dialogue,
            remaining_health,
        } => {
            tracing::info!(character = %name, health = remaining_health, "{dialogue}");
        }
        DamageOutcome::Immune { name, dialogue } => {
            tracing::info!(character = %name, "{dialogue}");
        }
    }

    if let Some(damage) = retaliation.filter(|damage| *damage > 0) {
        tracing::info!(
            character = character_name,
            hero = %hero_name,
            damage,
            "Enemy retaliates"
        );
        match context.hero_mut().receive_damage(damage) {
            Ok(taken) => {
                tracing::info!(
                    hero = %hero_name,
                    taken,
                    health = context.hero().health(),
                    "Hero takes damage"
                );
            }
            Err(error) => {
                // The game-over stops here: the fight ends, the UI reads the
                // hero's health for the loss state.
                tracing::warn!(%error, "Fight ended");
                return false;
            }
        }
    }
    true
}
