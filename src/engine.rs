//! The authorization engine: registries plus the shared resolution algorithm
//!
//! Registration happens through `&mut self` during single-threaded
//! bootstrap; afterwards the engine is shared by reference (typically
//! behind an `Arc`) and every decision runs against read-only state.

use crate::action::ActionRegistry;
use crate::error::{GateError, Result};
use crate::gate::ActorGate;
use crate::policy::{PolicyBinding, PolicyRegistry};
use crate::types::{Actor, GateCallback, GateDefinition, GateOptions, Principal};
use serde_json::Value;
use tracing::debug;

/// Gate and policy registries with the decision dispatch built on top
///
/// # Example
///
/// ```rust
/// use gatekeeper::{AuthorizationEngine, GateCallback, GateOptions, Principal};
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> gatekeeper::Result<()> {
/// let mut engine = AuthorizationEngine::new();
/// engine.register_action(
///     "create-post",
///     GateCallback::sync(|actor, _params| Ok(json!(actor.is_authenticated()))),
///     GateOptions::default(),
/// )?;
///
/// let gate = engine.for_user(Some(Principal::new("user:alice")));
/// assert!(gate.allows("create-post", vec![]).await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AuthorizationEngine {
    actions: ActionRegistry,
    policies: PolicyRegistry,
}

impl AuthorizationEngine {
    /// Create an engine with empty registries
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a global action gate
    pub fn register_action(
        &mut self,
        name: impl Into<String>,
        callback: GateCallback,
        options: GateOptions,
    ) -> Result<()> {
        self.actions
            .register(name, callback, GateDefinition::new(options))
    }

    /// Define a global action gate with options taken from a JSON
    /// configuration value
    pub fn register_action_from_config(
        &mut self,
        name: impl Into<String>,
        callback: GateCallback,
        config: &Value,
    ) -> Result<()> {
        let options = GateOptions::from_value(config)?;
        self.register_action(name, callback, options)
    }

    /// Register a batch of resource policies, in order. Not atomic on
    /// failure: bindings committed before the failing one stay registered.
    pub fn register_policies(&mut self, bindings: Vec<PolicyBinding>) -> Result<()> {
        self.policies.register(bindings)
    }

    /// Create a gate view bound to `user`; `None` means guest
    pub fn for_user(&self, user: Option<Principal>) -> ActorGate<'_> {
        ActorGate::new(self, user)
    }

    /// Whether a global action gate is defined under `name`
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains(name)
    }

    /// Whether a policy is registered for `resource_type`
    pub fn has_policy(&self, resource_type: &str) -> bool {
        self.policies.contains(resource_type)
    }

    pub(crate) async fn allows_action(
        &self,
        user: Option<&Principal>,
        action: &str,
        params: Vec<Value>,
    ) -> Result<bool> {
        let entry = self
            .actions
            .lookup(action)
            .ok_or_else(|| GateError::UnknownAction(action.to_string()))?;
        resolve(user, action, &entry.definition, &entry.callback, params).await
    }

    pub(crate) async fn allows_resource(
        &self,
        user: Option<&Principal>,
        resource_type: &str,
        instance: Option<&Value>,
        action: &str,
        mut params: Vec<Value>,
    ) -> Result<bool> {
        let entry = self
            .policies
            .lookup(resource_type)
            .ok_or_else(|| GateError::UnknownPolicy(resource_type.to_string()))?;
        let gate = entry.gates.get(action).ok_or_else(|| GateError::UnknownPolicyGate {
            action: action.to_string(),
            policy: entry.policy_name.to_string(),
        })?;

        // An instance-bound gate receives the concrete resource as its
        // first domain argument; a type-bound gate does not.
        if let Some(instance) = instance {
            params.insert(0, instance.clone());
        }
        resolve(user, action, &gate.definition, &gate.callback, params).await
    }
}

/// Shared decision algorithm for global actions and policy gates:
/// guest rules, a single callback invocation, result validation.
async fn resolve(
    user: Option<&Principal>,
    action: &str,
    definition: &GateDefinition,
    callback: &GateCallback,
    params: Vec<Value>,
) -> Result<bool> {
    let actor = match user {
        Some(principal) => Actor::Authenticated(principal.clone()),
        None if definition.guest_allowed() => Actor::Guest,
        None => {
            // Guest-disallowed gates never run against a missing actor.
            debug!("denied guest for action \"{}\" without invoking the gate", action);
            return Ok(false);
        }
    };

    let value = callback.invoke(actor, params).await?;
    match value {
        Value::Bool(decision) => {
            debug!("gate \"{}\" resolved to {}", action, decision);
            Ok(decision)
        }
        other => Err(GateError::NonBooleanResult {
            action: action.to_string(),
            found: value_kind(&other).to_string(),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
