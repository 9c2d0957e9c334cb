//! # Gatekeeper
//!
//! In-process authorization decision engine: given an actor, an action
//! name, and optionally a target resource, decide whether the action is
//! permitted. Decision logic is supplied by the caller as opaque
//! callbacks; the engine manages which callback runs and whether it is
//! allowed to run at all.
//!
//! ## Features
//!
//! - **Global action gates** registered by name with guest-access rules
//! - **Resource policies**: per-resource-type tables of named gates,
//!   dispatched by a stable type identity
//! - **Guest semantics**: guest-disallowed gates short-circuit to deny
//!   without ever invoking the callback; guest-allowed gates see a single
//!   guest sentinel, never a missing value
//! - **Async-first callbacks** with strict boolean result validation
//! - **Structured errors** distinguishing configuration mistakes,
//!   resolution failures, and clean denials
//!
//! ## Example
//!
//! ```rust
//! use gatekeeper::{AuthorizationEngine, GateCallback, GateOptions, Principal};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> gatekeeper::Result<()> {
//! let mut engine = AuthorizationEngine::new();
//!
//! engine.register_action(
//!     "delete-comment",
//!     GateCallback::sync(|actor, params| {
//!         let author = params.first().cloned().unwrap_or(json!(null));
//!         Ok(json!(actor.principal().map(|p| author == p.id.as_str()).unwrap_or(false)))
//!     }),
//!     GateOptions::default(),
//! )?;
//!
//! let gate = engine.for_user(Some(Principal::new("user:alice")));
//! assert!(gate.allows("delete-comment", vec![json!("user:alice")]).await?);
//! assert!(gate.denies("delete-comment", vec![json!("user:bob")]).await?);
//!
//! // Guests are denied without the callback ever running.
//! let guest = engine.for_user(None);
//! assert!(!guest.allows("delete-comment", vec![json!("user:alice")]).await?);
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod engine;
pub mod error;
pub mod gate;
pub mod policy;
pub mod types;

// Re-export commonly used types
pub use engine::AuthorizationEngine;
pub use error::{GateError, Result};
pub use gate::{ActorGate, ResourceGate};
pub use policy::{PolicyBinding, PolicyGates, Resource, ResourcePolicy};
pub use types::{Actor, GateCallback, GateDefinition, GateOptions, Principal};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
