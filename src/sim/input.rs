//! Held-key tracking and per-tick input sampling
//!
//! The host shell presses and releases platform key identifiers on a
//! [`KeySet`] between ticks; the tick only ever sees a [`TickInput`] sampled
//! from it, so one tick reads one consistent snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::settings::KeyBindings;

/// Set of currently held key identifiers (e.g. `"ArrowLeft"`, `"a"`, `" "`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySet {
    held: BTreeSet<String>,
}

impl KeySet {
    /// Mark a key as held. Returns false if it already was (key repeat).
    pub fn press(&mut self, key: impl Into<String>) -> bool {
        self.held.insert(key.into())
    }

    /// Mark a key as released. Returns false if it was not held.
    pub fn release(&mut self, key: &str) -> bool {
        self.held.remove(key)
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// True if any of `keys` is held
    pub fn any_held<S: AsRef<str>>(&self, keys: &[S]) -> bool {
        keys.iter().any(|k| self.is_held(k.as_ref()))
    }

    /// Drop everything (e.g. when the host window loses focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.held.iter().map(String::as_str)
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl TickInput {
    /// Resolve held keys into actions using `bindings`
    pub fn from_keys(keys: &KeySet, bindings: &KeyBindings) -> Self {
        Self {
            left: keys.any_held(&bindings.left),
            right: keys.any_held(&bindings.right),
            jump: keys.any_held(&bindings.jump),
        }
    }
}
