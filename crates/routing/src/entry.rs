//! Route entries and the configuration directives they are built from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::method::Method;
use crate::pattern::PathPattern;

/// What a matched request should be handed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTarget {
    /// A named local handler.
    Invoke(String),
    /// An upstream base URI to forward the request to.
    Forward(String),
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTarget::Invoke(name) => write!(f, "invoke:{name}"),
            RouteTarget::Forward(base) => write!(f, "forward:{base}"),
        }
    }
}

/// One route directive as it appears in configuration, before compilation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDirective {
    pub method: String,
    pub template: String,
    pub target: RouteTarget,
}

impl RouteDirective {
    #[must_use]
    pub fn new(method: impl Into<String>, template: impl Into<String>, target: RouteTarget) -> Self {
        Self {
            method: method.into(),
            template: template.into(),
            target,
        }
    }

    /// Short identifier used in reload reports, e.g. `GET /users/{id}`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method.to_ascii_uppercase(), self.template)
    }
}

/// A compiled route: method, path template and target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    method: Method,
    pattern: PathPattern,
    target: RouteTarget,
}

impl RouteEntry {
    /// Builds an entry directly from its parts.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] when the template does not compile.
    pub fn new(method: Method, template: &str, target: RouteTarget) -> Result<Self, RouteError> {
        Ok(Self {
            method,
            pattern: PathPattern::compile(template)?,
            target,
        })
    }

    /// Compiles a configuration directive into an entry.
    ///
    /// # Errors
    ///
    /// Returns a [`RouteError`] when the method is unknown or the template
    /// does not compile.
    pub fn from_directive(directive: &RouteDirective) -> Result<Self, RouteError> {
        Ok(Self {
            method: directive.method.parse()?,
            pattern: PathPattern::compile(&directive.template)?,
            target: directive.target.clone(),
        })
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    #[must_use]
    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    /// Short identifier used in logs, e.g. `GET /users/{id}`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.pattern.template())
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.pattern.template(), self.target)
    }
}
