//! Wrapper configuration.

use crate::policy::ResolutionPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid wrapper configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown resolution policy \"{0}\" (expected BOTH, METHOD_ONLY or PROPERTY_ONLY)")]
    UnknownPolicy(String),
}

/// Settings fixed when an `ObjectWrapper` is built.
///
/// ```json
/// { "defaultPolicy": "METHOD_ONLY", "compositePolicy": "BOTH" }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct WrapperConfig {
    /// Policy for plain zero-argument methods.
    pub default_policy: ResolutionPolicy,
    /// Override of `default_policy` for composite value types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite_policy: Option<ResolutionPolicy>,
}

impl WrapperConfig {
    pub fn new(default_policy: ResolutionPolicy) -> Self {
        Self {
            default_policy,
            composite_policy: None,
        }
    }

    #[must_use]
    pub fn with_composite_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.composite_policy = Some(policy);
        self
    }

    pub fn effective_policy(&self, composite: bool) -> ResolutionPolicy {
        match self.composite_policy {
            Some(policy) if composite => policy,
            _ => self.default_policy,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod tests;
