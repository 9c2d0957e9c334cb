//! Registry of global action gates

use crate::error::{GateError, Result};
use crate::types::{GateCallback, GateDefinition};
use std::collections::HashMap;
use tracing::info;

/// One registered global action gate
#[derive(Debug)]
pub struct ActionEntry {
    pub(crate) callback: GateCallback,
    pub(crate) definition: GateDefinition,
}

/// Name-keyed table of global action gates.
///
/// Populated during bootstrap and append-only for the life of the
/// process: a name, once taken, stays bound to its first callback.
#[derive(Debug, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, ActionEntry>,
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a gate under `name`.
    ///
    /// Fails with [`GateError::InvalidInput`] for an empty name and with
    /// [`GateError::DuplicateAction`] when the name is already taken; the
    /// rejected entry is not stored.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        callback: GateCallback,
        definition: GateDefinition,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(GateError::InvalidInput(
                "action must be a non-empty string".to_string(),
            ));
        }
        if self.actions.contains_key(&name) {
            return Err(GateError::DuplicateAction(name));
        }

        info!(
            "registered action gate \"{}\" (guest_allowed={})",
            name,
            definition.guest_allowed()
        );
        self.actions.insert(name, ActionEntry { callback, definition });
        Ok(())
    }

    /// Look up a gate by name. Pure read; absence is reported by the
    /// resolver at decision time, not here.
    pub fn lookup(&self, name: &str) -> Option<&ActionEntry> {
        self.actions.get(name)
    }

    /// Whether a gate is defined under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Number of registered actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
