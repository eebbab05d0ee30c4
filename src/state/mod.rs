// Animation binding store
//
// This module provides the BindingStore which owns the animation slot table,
// wraps it in Arc<RwLock<T>> for thread-safe access, and emits change events
// so front ends can react without polling.

use crate::models::AnimationSet;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Animation slot bindings every store starts from.
///
/// Keys are the vanilla Bedrock player animation slots; values are the
/// animation identifiers a generated skin entry points them at. Overrides
/// rebind existing slots, they never introduce new ones.
pub const DEFAULT_ANIMATIONS: &[(&str, &str)] = &[
    ("move.arms", "animation.player.move.arms"),
    ("move.legs", "animation.player.move.legs"),
    ("riding.arms", "animation.player.riding.arms"),
    ("riding.legs", "animation.player.riding.legs"),
    ("holding", "animation.player.holding"),
    ("brandish", "animation.player.brandish"),
    ("charging", "animation.player.charging"),
    ("attack.positions", "animation.player.attack.positions"),
    ("attack.rotations", "animation.player.attack.rotations"),
    ("sneaking", "animation.player.sneaking"),
    ("bob", "animation.player.bob"),
];

/// One row of the binding table in display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigBinding {
    pub key: String,
    pub value: String,
}

/// Change events emitted when a binding is modified
///
/// These events notify interested parties (primarily a front end listing the
/// bindings) about table changes without requiring them to poll the store.
#[derive(Clone, Debug, PartialEq)]
pub enum BindingChange {
    /// An existing slot was rebound to a new animation identifier
    ValueChanged { key: String, value: String },
}

/// Thread-safe animation binding table with event emission
///
/// The store is the single owner of the slot table used during pack
/// generation:
/// - Seeds itself from [`DEFAULT_ANIMATIONS`]
/// - Rejects writes to unknown slots ([`set()`](Self::set) returns `false`)
/// - Hands generation an immutable [`snapshot()`](Self::snapshot) so an
///   in-flight pack never observes a half-applied override batch
/// - Emits [`BindingChange`] events via a tokio broadcast channel
///
/// # Related Types
///
/// - [`crate::models::PackRequest`]: Carries a snapshot into the pipeline
/// - [`crate::models::PackSettings`]: YAML override table applied at startup
pub struct BindingStore {
    /// The binding table protected by RwLock for thread-safe access
    bindings: Arc<RwLock<AnimationSet>>,

    /// Broadcast channel for emitting binding change events
    change_tx: broadcast::Sender<BindingChange>,
}

impl BindingStore {
    /// Create a new store seeded with the default animation slots
    ///
    /// # Returns
    /// A new BindingStore with a broadcast channel buffer of 100 events
    pub fn new() -> Self {
        let (change_tx, _) = broadcast::channel(100);
        let bindings = DEFAULT_ANIMATIONS
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self {
            bindings: Arc::new(RwLock::new(bindings)),
            change_tx,
        }
    }

    /// Look up the animation identifier bound to a slot
    pub fn get(&self, key: &str) -> Option<String> {
        self.bindings.read().unwrap().get(key).cloned()
    }

    /// Rebind an existing slot and emit a change event
    ///
    /// Unknown keys are rejected so a typo in an override cannot grow the
    /// table past the slots the documents expect.
    ///
    /// # Returns
    /// `true` if the slot existed and was updated, `false` otherwise
    pub fn set(&self, key: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        {
            let mut bindings = self.bindings.write().unwrap();
            match bindings.get_mut(key) {
                Some(slot) => *slot = value.clone(),
                None => {
                    tracing::debug!("Ignoring unknown animation slot '{}'", key);
                    return false;
                }
            }
        }

        // Ignore send errors - it's OK if no one is listening
        let _ = self.change_tx.send(BindingChange::ValueChanged {
            key: key.to_string(),
            value,
        });
        true
    }

    /// Apply a batch of overrides, typically the YAML `Animation Overrides`
    /// table, and report how many were accepted
    pub fn apply_overrides(&self, overrides: &AnimationSet) -> usize {
        let mut applied = 0;
        for (key, value) in overrides {
            if self.set(key, value.clone()) {
                applied += 1;
            } else {
                tracing::warn!("Animation override '{}' does not match any slot", key);
            }
        }
        if applied > 0 {
            tracing::info!("Applied {} animation override(s)", applied);
        }
        applied
    }

    /// Get an immutable copy of the current binding table
    ///
    /// Generation works from this copy, so rebinding while a pack is being
    /// written cannot tear the animation map inside the documents.
    pub fn snapshot(&self) -> AnimationSet {
        self.bindings.read().unwrap().clone()
    }

    /// List the bindings in table order for display
    pub fn bindings(&self) -> Vec<ConfigBinding> {
        self.bindings
            .read()
            .unwrap()
            .iter()
            .map(|(key, value)| ConfigBinding {
                key: key.clone(),
                value: value.clone(),
            })
            .collect()
    }

    /// Number of slots in the table
    pub fn len(&self) -> usize {
        self.bindings.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to binding change events
    ///
    /// Returns a receiver that will get notified of all future rebinds.
    /// Multiple subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<BindingChange> {
        self.change_tx.subscribe()
    }
}

impl Default for BindingStore {
    fn default() -> Self {
        Self::new()
    }
}

// Make BindingStore cloneable for sharing across threads
impl Clone for BindingStore {
    fn clone(&self) -> Self {
        Self {
            bindings: Arc::clone(&self.bindings),
            change_tx: self.change_tx.clone(),
        }
    }
}
