//! Core authorization types: actors, gate options, and decision callbacks

use crate::error::{GateError, Result};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Authenticated identity making an authorization request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Principal identifier (e.g., "user:alice@example.com")
    pub id: String,

    /// Additional attributes (e.g., department, roles)
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl Principal {
    /// Create a new principal from an ID string
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: HashMap::new(),
        }
    }

    /// Add an attribute to the principal
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// The entity a gate callback decides about.
///
/// There is exactly one guest representation: the engine never hands a
/// callback an "absent" principal, it hands it [`Actor::Guest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Actor {
    /// An authenticated principal
    Authenticated(Principal),
    /// No identity present
    Guest,
}

impl Actor {
    /// Whether this actor is an unauthenticated guest
    pub fn is_guest(&self) -> bool {
        matches!(self, Actor::Guest)
    }

    /// Whether this actor carries an authenticated identity
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::Authenticated(_))
    }

    /// The authenticated principal, if any
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Actor::Authenticated(principal) => Some(principal),
            Actor::Guest => None,
        }
    }
}

/// Configuration accepted when defining a gate.
///
/// The only recognized option is `allowGuest`; anything else in a
/// configuration object is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GateOptions {
    /// Permit evaluation with no authenticated actor (default `false`)
    pub allow_guest: bool,
}

impl GateOptions {
    /// Parse options from a JSON configuration value.
    ///
    /// Fails with [`GateError::InvalidInput`] when the value is not an
    /// object, contains an unrecognized key, or carries a non-boolean
    /// `allowGuest`.
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| GateError::InvalidInput(format!("options: {e}")))
    }
}

/// Immutable guest-access policy attached to one gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDefinition {
    guest_allowed: bool,
}

impl GateDefinition {
    /// Build a definition from gate options
    pub fn new(options: GateOptions) -> Self {
        Self {
            guest_allowed: options.allow_guest,
        }
    }

    /// Whether the gate may run for a guest actor
    pub fn guest_allowed(&self) -> bool {
        self.guest_allowed
    }
}

type CallbackFn = dyn Fn(Actor, Vec<Value>) -> BoxFuture<'static, Result<Value>> + Send + Sync;

/// Caller-supplied decision function.
///
/// A callback receives the (already guest-normalized) actor and the
/// decision parameters, and resolves to a JSON value that must be a
/// boolean. Synchronous and asynchronous callbacks share this one
/// contract: a synchronous callback is awaited immediately with no
/// suspension observed by the caller.
#[derive(Clone)]
pub struct GateCallback(Arc<CallbackFn>);

impl GateCallback {
    /// Wrap an asynchronous decision function
    pub fn new<F, Fut>(callback: F) -> Self
    where
        F: Fn(Actor, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self(Arc::new(move |actor, params| Box::pin(callback(actor, params))))
    }

    /// Wrap a synchronous decision function
    pub fn sync<F>(callback: F) -> Self
    where
        F: Fn(&Actor, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(move |actor, params| {
            let outcome = callback(&actor, &params);
            Box::pin(std::future::ready(outcome))
        }))
    }

    pub(crate) fn invoke(&self, actor: Actor, params: Vec<Value>) -> BoxFuture<'static, Result<Value>> {
        (self.0)(actor, params)
    }
}

impl fmt::Debug for GateCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GateCallback(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_principal_creation() {
        let principal = Principal::new("user:alice@example.com")
            .with_attribute("department", "engineering");

        assert_eq!(principal.id, "user:alice@example.com");
        assert_eq!(
            principal.attributes.get("department"),
            Some(&"engineering".to_string())
        );
    }

    #[test]
    fn test_actor_accessors() {
        let authenticated = Actor::Authenticated(Principal::new("user:alice"));
        assert!(authenticated.is_authenticated());
        assert!(!authenticated.is_guest());
        assert_eq!(authenticated.principal().unwrap().id, "user:alice");

        assert!(Actor::Guest.is_guest());
        assert!(Actor::Guest.principal().is_none());
    }

    #[test]
    fn test_options_default_disallows_guests() {
        let definition = GateDefinition::new(GateOptions::default());
        assert!(!definition.guest_allowed());

        let definition = GateDefinition::new(GateOptions { allow_guest: true });
        assert!(definition.guest_allowed());
    }

    #[test]
    fn test_options_from_value() {
        let options = GateOptions::from_value(&json!({})).unwrap();
        assert!(!options.allow_guest);

        let options = GateOptions::from_value(&json!({ "allowGuest": true })).unwrap();
        assert!(options.allow_guest);
    }

    #[test]
    fn test_options_from_value_rejects_bad_shapes() {
        for bad in [
            json!("bleh"),
            json!(42),
            json!(null),
            json!({ "allowGuest": 42 }),
            json!({ "allowGuest": null }),
            json!({ "bogus": true }),
        ] {
            let result = GateOptions::from_value(&bad);
            assert!(
                matches!(result, Err(crate::error::GateError::InvalidInput(_))),
                "expected invalid input for {bad}"
            );
        }
    }

    #[tokio::test]
    async fn test_sync_callback_is_awaited_immediately() {
        let callback = GateCallback::sync(|actor, params| {
            Ok(json!(actor.is_guest() && params.is_empty()))
        });

        let value = callback.invoke(Actor::Guest, vec![]).await.unwrap();
        assert_eq!(value, json!(true));
    }
}
