//! Backpack aggregate - the hero's inventory
//!
//! Owns up to [`BACKPACK_CAPACITY`] behavior-bearing items, tracks which item
//! is selected for attack and defense, mediates item-to-item event broadcast
//! (items never reference each other directly), and notifies observers of
//! changes synchronously at the moment of mutation.
//!
//! # Invariants
//!
//! - `items.len() <= BACKPACK_CAPACITY`; adding beyond capacity fails and
//!   leaves the backpack unchanged
//! - Active slots are keyed by item name and resolved against the item list
//!   at use time; setting a name that is not in the list is permitted (the
//!   slot simply resolves to no item)

pub mod factory;
pub mod item;

use std::fmt;
use std::sync::Arc;

use crate::artifact::Artifact;
use crate::error::DomainError;

pub use factory::BackpackItemFactory;
pub use item::{BackpackItem, ItemEvent, ItemKind, POTION_BREW_DAMAGE};

/// Maximum number of items a backpack can hold.
pub const BACKPACK_CAPACITY: usize = 5;

/// Change notification emitted by a backpack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackpackChange {
    ItemAdded { name: String },
    ActiveAttackItemSet { name: String },
    ActiveDefenseItemSet { name: String },
}

/// Observer of backpack changes; notified synchronously on mutation.
pub trait BackpackObserver: Send + Sync {
    fn update(&self, change: &BackpackChange);
}

/// The hero's inventory.
#[derive(Clone, Default)]
pub struct Backpack {
    factory: BackpackItemFactory,
    items: Vec<BackpackItem>,
    active_attack_item: Option<String>,
    active_defense_item: Option<String>,
    observers: Vec<Arc<dyn BackpackObserver>>,
}

impl Backpack {
    /// Create an empty backpack.
    pub fn new(factory: BackpackItemFactory) -> Self {
        Self {
            factory,
            ..Self::default()
        }
    }

    /// Create a backpack pre-filled with items, e.g. when rebuilding from a
    /// save. Fails if the item list exceeds capacity.
    pub fn with_items(
        factory: BackpackItemFactory,
        items: Vec<BackpackItem>,
    ) -> Result<Self, DomainError> {
        if items.len() > BACKPACK_CAPACITY {
            return Err(DomainError::BackpackFull {
                max: BACKPACK_CAPACITY,
            });
        }
        Ok(Self {
            factory,
            items,
            ..Self::default()
        })
    }

    // =========================================================================
    // Item list
    // =========================================================================

    /// Convert the artifact into an item and append it.
    ///
    /// Fails with [`DomainError::BackpackFull`] at capacity, leaving the list
    /// unchanged. Consumable triggers (sharpener, distiller) broadcast their
    /// event to the other items as part of the add.
    pub fn add_item(&mut self, artifact: Artifact) -> Result<(), DomainError> {
        if self.is_full() {
            return Err(DomainError::BackpackFull {
                max: BACKPACK_CAPACITY,
            });
        }

        let item = self.factory.create_item(&artifact);
        let name = item.name().to_string();
        let trigger = item.trigger_event();
        self.items.push(item);

        self.notify(&BackpackChange::ItemAdded { name: name.clone() });

        if let Some(event) = trigger {
            self.send_event_to_items(event, &name);
        }
        Ok(())
    }

    /// Remove the first item matching `name`. Absent names are a no-op.
    pub fn remove_item(&mut self, name: &str) {
        if let Some(index) = self.items.iter().position(|item| item.name() == name) {
            self.items.remove(index);
        }
    }

    /// Replace the item at `index`.
    pub fn replace_item(&mut self, index: usize, item: BackpackItem) -> Result<(), DomainError> {
        if index >= self.items.len() {
            return Err(DomainError::InvalidIndex {
                index,
                len: self.items.len(),
            });
        }
        self.items[index] = item;
        Ok(())
    }

    pub fn get_item(&self, name: &str) -> Option<&BackpackItem> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub fn get_item_mut(&mut self, name: &str) -> Option<&mut BackpackItem> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    #[inline]
    pub fn items(&self) -> &[BackpackItem] {
        &self.items
    }

    /// The most recently added item.
    #[inline]
    pub fn last_item(&self) -> Option<&BackpackItem> {
        self.items.last()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= BACKPACK_CAPACITY
    }

    // =========================================================================
    // Active slots
    // =========================================================================

    /// Select the item used for attacks, by name. `None` clears the slot.
    ///
    /// Membership is not validated; a name absent from the item list resolves
    /// to no item at use time.
    pub fn set_active_attack_item(&mut self, name: Option<&str>) {
        self.active_attack_item = name.map(str::to_string);
        if let Some(name) = name {
            self.notify(&BackpackChange::ActiveAttackItemSet {
                name: name.to_string(),
            });
        }
    }

    /// Select the item used for defense, by name. `None` clears the slot.
    pub fn set_active_defense_item(&mut self, name: Option<&str>) {
        self.active_defense_item = name.map(str::to_string);
        if let Some(name) = name {
            self.notify(&BackpackChange::ActiveDefenseItemSet {
                name: name.to_string(),
            });
        }
    }

    #[inline]
    pub fn active_attack_item_name(&self) -> Option<&str> {
        self.active_attack_item.as_deref()
    }

    #[inline]
    pub fn active_defense_item_name(&self) -> Option<&str> {
        self.active_defense_item.as_deref()
    }

    /// The resolved active attack item, if the slot names a held item.
    pub fn active_attack_item(&self) -> Option<&BackpackItem> {
        self.active_attack_item
            .as_deref()
            .and_then(|name| self.get_item(name))
    }

    /// The resolved active defense item, if the slot names a held item.
    pub fn active_defense_item(&self) -> Option<&BackpackItem> {
        self.active_defense_item
            .as_deref()
            .and_then(|name| self.get_item(name))
    }

    /// Attack with the active attack item. Deals 0 with no (or a phantom)
    /// selection; otherwise depletes the item.
    pub fn use_active_attack(&mut self) -> u32 {
        match self.active_attack_item.clone() {
            Some(name) => self
                .get_item_mut(&name)
                .map(BackpackItem::use_for_attack)
                .unwrap_or(0),
            None => 0,
        }
    }

    /// Filter incoming damage through the active defense item. With no (or a
    /// phantom) selection the full amount passes through.
    pub fn use_active_defense(&mut self, incoming_damage: u32) -> u32 {
        match self.active_defense_item.clone() {
            Some(name) => self
                .get_item_mut(&name)
                .map(|item| item.use_for_defense(incoming_damage))
                .unwrap_or(incoming_damage),
            None => incoming_damage,
        }
    }

    // =========================================================================
    // Item events & restoration
    // =========================================================================

    /// Broadcast a named event to every item except the sender.
    pub fn send_event_to_items(&mut self, event: ItemEvent, from: &str) {
        for item in self.items.iter_mut() {
            if item.name() != from {
                item.receive_event(event);
            }
        }
    }

    /// Sweep the whole backpack, restoring every item its kind allows.
    pub fn restore_items(&mut self) {
        for item in self.items.iter_mut() {
            item.restore();
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Attach an observer; attaching the same observer twice is a no-op.
    pub fn attach_observer(&mut self, observer: Arc<dyn BackpackObserver>) {
        if !self
            .observers
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &observer))
        {
            self.observers.push(observer);
        }
    }

    /// Detach an observer by identity.
    pub fn detach_observer(&mut self, observer: &Arc<dyn BackpackObserver>) {
        self.observers
            .retain(|existing| !Arc::ptr_eq(existing, observer));
    }

    fn notify(&self, change: &BackpackChange) {
        for observer in &self.observers {
            observer.update(change);
        }
    }
}

impl fmt::Debug for Backpack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backpack")
            .field("items", &self.items)
            .field("active_attack_item", &self.active_attack_item)
            .field("active_defense_item", &self.active_defense_item)
            .field("observers", &self.observers.len())
            .finish()
    }
}
