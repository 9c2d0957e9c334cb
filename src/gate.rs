//! Actor-bound gate views
//!
//! `ActorGate` and `ResourceGate` are cheap, stateless views over the
//! shared engine: created per check, discarded after use, never mutating
//! the registries they borrow.

use crate::engine::AuthorizationEngine;
use crate::error::{GateError, Result};
use crate::policy::Resource;
use crate::types::Principal;
use serde_json::Value;

/// Gate view bound to one actor (`None` means guest)
#[derive(Debug)]
pub struct ActorGate<'g> {
    engine: &'g AuthorizationEngine,
    user: Option<Principal>,
}

impl<'g> ActorGate<'g> {
    pub(crate) fn new(engine: &'g AuthorizationEngine, user: Option<Principal>) -> Self {
        Self { engine, user }
    }

    /// The bound principal, if any
    pub fn user(&self) -> Option<&Principal> {
        self.user.as_ref()
    }

    /// Whether the actor may perform `action`. A normal deny is
    /// `Ok(false)`; errors are reserved for resolution and validation
    /// failures.
    pub async fn allows(&self, action: &str, params: Vec<Value>) -> Result<bool> {
        self.engine
            .allows_action(self.user.as_ref(), action, params)
            .await
    }

    /// Negation of [`allows`](Self::allows); errors pass through
    pub async fn denies(&self, action: &str, params: Vec<Value>) -> Result<bool> {
        Ok(!self.allows(action, params).await?)
    }

    /// Fail with [`GateError::AuthorizationDenied`] unless the actor may
    /// perform `action`. Resolution errors propagate as-is; only a clean
    /// deny becomes `AuthorizationDenied`.
    pub async fn authorize(&self, action: &str, params: Vec<Value>) -> Result<()> {
        if self.allows(action, params).await? {
            Ok(())
        } else {
            Err(GateError::AuthorizationDenied(action.to_string()))
        }
    }

    /// Narrow the view to one resource instance. The instance is
    /// serialized once here and later prepended to the gate parameters.
    pub fn for_resource<R: Resource>(&self, resource: &R) -> Result<ResourceGate<'g>> {
        let instance = serde_json::to_value(resource)
            .map_err(|e| GateError::InvalidInput(format!("resource: {e}")))?;
        Ok(ResourceGate {
            engine: self.engine,
            user: self.user.clone(),
            resource_type: R::TYPE,
            instance: Some(instance),
        })
    }

    /// Narrow the view to a resource type without an instance
    pub fn for_resource_type<R: Resource>(&self) -> ResourceGate<'g> {
        ResourceGate {
            engine: self.engine,
            user: self.user.clone(),
            resource_type: R::TYPE,
            instance: None,
        }
    }
}

/// Gate view bound to one actor and one resource (instance or type)
#[derive(Debug)]
pub struct ResourceGate<'g> {
    engine: &'g AuthorizationEngine,
    user: Option<Principal>,
    resource_type: &'static str,
    instance: Option<Value>,
}

impl ResourceGate<'_> {
    /// The bound resource type identity
    pub fn resource_type(&self) -> &'static str {
        self.resource_type
    }

    /// Whether the actor may perform `action` on the bound resource
    pub async fn allows(&self, action: &str, params: Vec<Value>) -> Result<bool> {
        self.engine
            .allows_resource(
                self.user.as_ref(),
                self.resource_type,
                self.instance.as_ref(),
                action,
                params,
            )
            .await
    }

    /// Negation of [`allows`](Self::allows); errors pass through
    pub async fn denies(&self, action: &str, params: Vec<Value>) -> Result<bool> {
        Ok(!self.allows(action, params).await?)
    }

    /// Fail with [`GateError::AuthorizationDenied`] naming the action
    /// unless the actor may perform it on the bound resource
    pub async fn authorize(&self, action: &str, params: Vec<Value>) -> Result<()> {
        if self.allows(action, params).await? {
            Ok(())
        } else {
            Err(GateError::AuthorizationDenied(action.to_string()))
        }
    }
}
