//! Resource-scoped policies and their registry
//!
//! A policy is a collection of named gates for one resource type. Gates
//! are marked explicitly in a [`PolicyGates`] table built by the policy
//! type at registration time; a method that was never marked is not
//! callable as a gate.

use crate::error::{GateError, Result};
use crate::types::{GateCallback, GateDefinition, GateOptions};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// A resource type usable with the policy system.
///
/// `TYPE` is the stable type identity the policy registry is keyed by;
/// the `Serialize` bound lets a concrete instance travel to the policy
/// gate as its first domain argument.
pub trait Resource: Serialize {
    /// Stable type identity, unique across all registered resources
    const TYPE: &'static str;
}

/// A policy type bindable to a resource type.
///
/// `gates` is the explicit marking step: it runs once, at registration
/// time, and produces the table of callable gates for the policy.
pub trait ResourcePolicy {
    /// Policy name used in error messages
    const NAME: &'static str;

    /// Build the gate table for this policy
    fn gates() -> Result<PolicyGates>;
}

#[derive(Debug)]
pub(crate) struct PolicyGate {
    pub(crate) callback: GateCallback,
    pub(crate) definition: GateDefinition,
}

/// Method-name-keyed gate table for one policy type
#[derive(Debug, Default)]
pub struct PolicyGates {
    gates: HashMap<String, PolicyGate>,
}

impl PolicyGates {
    /// Create an empty gate table
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `method` as a callable gate.
    ///
    /// Fails with [`GateError::InvalidInput`] for an empty method name or
    /// a method marked twice; both are definition-time errors, surfaced
    /// when the policy is registered rather than when the gate is called.
    pub fn gate(
        mut self,
        method: impl Into<String>,
        options: GateOptions,
        callback: GateCallback,
    ) -> Result<Self> {
        let method = method.into();
        if method.is_empty() {
            return Err(GateError::InvalidInput(
                "policy gate must have a non-empty name".to_string(),
            ));
        }
        if self.gates.contains_key(&method) {
            return Err(GateError::InvalidInput(format!(
                "policy gate \"{method}\" is marked twice"
            )));
        }

        self.gates.insert(
            method,
            PolicyGate {
                callback,
                definition: GateDefinition::new(options),
            },
        );
        Ok(self)
    }

    /// Number of marked gates
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether no gates are marked
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    fn into_gates(self) -> HashMap<String, PolicyGate> {
        self.gates
    }
}

/// One (resource type, policy type) pair for batch registration
pub struct PolicyBinding {
    resource_type: &'static str,
    policy_name: &'static str,
    build: fn() -> Result<PolicyGates>,
}

impl PolicyBinding {
    /// Bind policy `P` to resource type `R`
    pub fn of<R: Resource, P: ResourcePolicy>() -> Self {
        Self {
            resource_type: R::TYPE,
            policy_name: P::NAME,
            build: P::gates,
        }
    }
}

/// One registered policy: its name and its gate table
#[derive(Debug)]
pub struct PolicyEntry {
    pub(crate) policy_name: &'static str,
    pub(crate) gates: HashMap<String, PolicyGate>,
}

/// Resource-type-keyed table of policies
#[derive(Debug, Default)]
pub struct PolicyRegistry {
    policies: HashMap<&'static str, PolicyEntry>,
}

impl PolicyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a batch of policy bindings, in order.
    ///
    /// A resource type already present, whether from an earlier call or
    /// earlier in the same batch, fails with
    /// [`GateError::DuplicateResource`]. Registration is not atomic:
    /// entries committed before a failing binding stay registered.
    pub fn register(&mut self, bindings: Vec<PolicyBinding>) -> Result<()> {
        for (index, binding) in bindings.into_iter().enumerate() {
            if self.policies.contains_key(binding.resource_type) {
                return Err(GateError::DuplicateResource(
                    binding.resource_type.to_string(),
                ));
            }

            let gates = (binding.build)().map_err(|e| match e {
                GateError::InvalidInput(msg) => {
                    GateError::InvalidInput(format!("policies[{index}]: {msg}"))
                }
                other => other,
            })?;

            info!(
                "registered policy \"{}\" for resource type \"{}\" ({} gates)",
                binding.policy_name,
                binding.resource_type,
                gates.len()
            );
            self.policies.insert(
                binding.resource_type,
                PolicyEntry {
                    policy_name: binding.policy_name,
                    gates: gates.into_gates(),
                },
            );
        }
        Ok(())
    }

    /// Look up the policy for a resource type. Pure read.
    pub fn lookup(&self, resource_type: &str) -> Option<&PolicyEntry> {
        self.policies.get(resource_type)
    }

    /// Whether a policy is registered for `resource_type`
    pub fn contains(&self, resource_type: &str) -> bool {
        self.policies.contains_key(resource_type)
    }

    /// Number of registered policies
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
