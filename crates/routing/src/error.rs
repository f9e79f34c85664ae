//! Routing error types.

use thiserror::Error;

/// Error building a route entry or table from configuration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),

    #[error("empty route template")]
    EmptyTemplate,

    #[error("duplicate capture name in route template: {0}")]
    DuplicateCapture(String),
}

/// Failure reported by the external dispatch facility for one directive.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("dispatch registry failure: {0}")]
pub struct DispatchError(String);

impl DispatchError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// What the router was doing when a directive failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveAction {
    Register,
    Unregister,
}

impl std::fmt::Display for DirectiveAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectiveAction::Register => write!(f, "register"),
            DirectiveAction::Unregister => write!(f, "unregister"),
        }
    }
}

/// One failed (un)registration, kept so a reload can report every failure
/// after attempting the whole set.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("failed to {action} {directive}: {source}")]
pub struct DirectiveFailure {
    pub action: DirectiveAction,
    pub directive: String,
    #[source]
    pub source: DispatchError,
}

/// Error raised once per reload, after all registration attempts were made.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReloadError {
    #[error("invalid route directive: {0}")]
    InvalidDirective(#[from] RouteError),

    #[error("route table reload completed with {} failed directive(s)", .0.len())]
    Dispatch(Vec<DirectiveFailure>),
}

impl ReloadError {
    /// The individual directive failures, when this is a dispatch error.
    #[must_use]
    pub fn failures(&self) -> &[DirectiveFailure] {
        match self {
            ReloadError::Dispatch(failures) => failures,
            ReloadError::InvalidDirective(_) => &[],
        }
    }
}
