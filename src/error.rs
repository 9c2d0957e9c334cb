//! Error types for the authorization engine

use thiserror::Error;

/// Authorization engine errors
#[derive(Debug, Error)]
pub enum GateError {
    /// Malformed registration or dispatch input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An action name was registered twice
    #[error("a gate is already defined for the action \"{0}\"")]
    DuplicateAction(String),

    /// A resource type was bound to a policy twice
    #[error("a policy is already registered for the resource type \"{0}\"")]
    DuplicateResource(String),

    /// No gate defined for the requested action
    #[error("found no gate for the action \"{0}\"")]
    UnknownAction(String),

    /// No policy registered for the resource type
    #[error("found no policy for the resource type \"{0}\"")]
    UnknownPolicy(String),

    /// The policy exists but has no gate under the requested name
    #[error("found no policy gate named \"{action}\" on policy \"{policy}\"")]
    UnknownPolicyGate {
        /// Requested gate name
        action: String,
        /// Name of the policy that was searched
        policy: String,
    },

    /// A gate callback resolved to something other than a boolean
    #[error("the gate \"{action}\" must return a boolean, got {found}")]
    NonBooleanResult {
        /// Action whose callback misbehaved
        action: String,
        /// JSON kind of the offending value
        found: String,
    },

    /// Failure raised by a caller-supplied callback, passed through unchanged
    #[error(transparent)]
    Callback(#[from] anyhow::Error),

    /// A clean deny surfaced by `authorize`; carries the action name
    #[error("Unauthorized to \"{0}\"")]
    AuthorizationDenied(String),
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, GateError>;
