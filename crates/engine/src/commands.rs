//! Scene item arrival commands.
//!
//! Item arrival is driven through explicit commands so it can be rolled back
//! and, for delayed items, cancelled. Commands address their scene by id and
//! check it against the live context before touching anything: a timer armed
//! for a scene that has since been swapped out simply drops its arrival.
//!
//! Scheduling runs on the tokio clock, so tests drive it deterministically
//! with a paused runtime and `tokio::time::advance`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use delvr_domain::{Artifact, SceneContext};

/// The live game state shared between the orchestrator, the fight loop, and
/// scheduled arrivals.
pub type SharedContext = Arc<tokio::sync::Mutex<SceneContext>>;

/// One undoable step of populating a scene.
#[async_trait]
pub trait SceneCommand: Send + Sync {
    async fn execute(&self);
    async fn undo(&self);

    /// Drop any pending timer without undoing what already happened.
    fn cancel(&self) {}
}

/// Adds an item synchronously; undo removes it.
pub struct AddSceneItemCommand {
    context: SharedContext,
    scene_id: u32,
    item: Artifact,
}

impl AddSceneItemCommand {
    pub fn new(context: SharedContext, scene_id: u32, item: Artifact) -> Self {
        Self {
            context,
            scene_id,
            item,
        }
    }
}

#[async_trait]
impl SceneCommand for AddSceneItemCommand {
    async fn execute(&self) {
        let mut context = self.context.lock().await;
        if context.scene().id() == self.scene_id {
            context.scene_mut().add_item(self.item.clone());
        }
    }

    async fn undo(&self) {
        let mut context = self.context.lock().await;
        if context.scene().id() == self.scene_id {
            context.scene_mut().remove_item(self.item.name());
        }
    }
}

/// Arms a one-shot timer; the item arrives when it fires.
///
/// Re-invoking `execute` rearms the timer (the previous arming is cancelled,
/// so duplicate timers never accumulate). `undo` before firing prevents the
/// arrival; once fired it is a no-op and the item stays.
pub struct ScheduledAddSceneItemCommand {
    context: SharedContext,
    scene_id: u32,
    item: Artifact,
    delay: Duration,
    timer: Mutex<Option<CancellationToken>>,
}

impl ScheduledAddSceneItemCommand {
    pub fn new(context: SharedContext, scene_id: u32, item: Artifact, delay: Duration) -> Self {
        Self {
            context,
            scene_id,
            item,
            delay,
            timer: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SceneCommand for ScheduledAddSceneItemCommand {
    async fn execute(&self) {
        self.cancel();
        let token = CancellationToken::new();
        *self.timer.lock().expect("timer lock") = Some(token.clone());

        let context = self.context.clone();
        let scene_id = self.scene_id;
        let item = self.item.clone();
        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let mut context = context.lock().await;
                    if context.scene().id() == scene_id {
                        tracing::debug!(item = item.name(), scene_id, "Scheduled item appears");
                        context.scene_mut().add_item(item);
                    } else {
                        tracing::debug!(
                            item = item.name(),
                            scene_id,
                            "Scene gone before scheduled item appeared; dropping it"
                        );
                    }
                }
            }
        });
    }

    async fn undo(&self) {
        self.cancel();
    }

    fn cancel(&self) {
        if let Some(token) = self.timer.lock().expect("timer lock").take() {
            token.cancel();
        }
    }
}

/// Runs a list of commands in order; supports bulk undo and bulk cancel.
#[derive(Default)]
pub struct CommandChain {
    commands: Vec<Arc<dyn SceneCommand>>,
}

impl CommandChain {
    pub fn new(commands: Vec<Arc<dyn SceneCommand>>) -> Self {
        Self { commands }
    }

    pub fn add_command(&mut self, command: Arc<dyn SceneCommand>) {
        self.commands.push(command);
    }

    pub async fn execute(&self) {
        for command in &self.commands {
            command.execute().await;
        }
    }

    pub async fn undo(&self) {
        for command in &self.commands {
            command.undo().await;
        }
    }

    pub fn cancel(&self) {
        for command in &self.commands {
            command.cancel();
        }
    }
}

/// Build the arrival chain for a scene's item list: items with an appearance
/// delay get a scheduled command, the rest arrive immediately.
pub fn stage_commands(context: &SharedContext, scene_id: u32, items: Vec<Artifact>) -> CommandChain {
    let commands = items
        .into_iter()
        .map(|item| -> Arc<dyn SceneCommand> {
            match item.delayed_appearance() {
                Some(delay) => Arc::new(ScheduledAddSceneItemCommand::new(
                    context.clone(),
                    scene_id,
                    item,
                    delay,
                )),
                None => Arc::new(AddSceneItemCommand::new(context.clone(), scene_id, item)),
            }
        })
        .collect();
    CommandChain::new(commands)
}
