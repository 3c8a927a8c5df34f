//! Resolution Policy
//!
//! `ResolutionPolicy` is configuration, not behavior. Its only interpretation
//! is `resolve_appearance`, which maps a policy and a member classification to
//! what value-position (`obj.key`) and call-position (`obj.key()`) access yield.

use crate::classify::MemberClassification;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How zero-argument, non-void methods that are not property readers are shown
/// to templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionPolicy {
    /// `obj.m` and `obj.m()` both give the method's return value.
    #[default]
    #[serde(alias = "BOTH_PROPERTY_AND_METHOD")]
    Both,
    /// `obj.m()` gives the return value, `obj.m` gives the method itself.
    MethodOnly,
    /// `obj.m` gives the return value, `obj.m()` is an error.
    PropertyOnly,
}

impl ResolutionPolicy {
    pub const ALL: [ResolutionPolicy; 3] = [
        ResolutionPolicy::Both,
        ResolutionPolicy::MethodOnly,
        ResolutionPolicy::PropertyOnly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionPolicy::Both => "BOTH",
            ResolutionPolicy::MethodOnly => "METHOD_ONLY",
            ResolutionPolicy::PropertyOnly => "PROPERTY_ONLY",
        }
    }
}

impl fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "BOTH" | "BOTH_PROPERTY_AND_METHOD" => Ok(ResolutionPolicy::Both),
            "METHOD_ONLY" => Ok(ResolutionPolicy::MethodOnly),
            "PROPERTY_ONLY" => Ok(ResolutionPolicy::PropertyOnly),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// What `obj.key` yields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValuePosition {
    /// The accessor is invoked and its result returned.
    Invoke,
    /// The bound method itself is returned.
    Callable,
}

/// What `obj.key()` is given to call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallPosition {
    /// The bound method is returned and then invoked by the evaluator.
    Callable,
    /// The access is rejected as "not callable".
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberAppearance {
    pub value_position: ValuePosition,
    pub call_position: CallPosition,
}

impl MemberAppearance {
    pub const fn new(value_position: ValuePosition, call_position: CallPosition) -> Self {
        Self {
            value_position,
            call_position,
        }
    }
}

/// The resolution table. Every policy decision in the runtime goes through here.
///
/// | classification            | policy          | `obj.key`   | `obj.key()` |
/// |---------------------------|-----------------|-------------|-------------|
/// | property/component reader | any             | invoke      | callable    |
/// | plain zero-arg method     | `Both`          | invoke      | callable    |
/// | plain zero-arg method     | `MethodOnly`    | callable    | callable    |
/// | plain zero-arg method     | `PropertyOnly`  | invoke      | reject      |
/// | other method              | any             | callable    | callable    |
pub fn resolve_appearance(
    policy: ResolutionPolicy,
    classification: MemberClassification,
) -> MemberAppearance {
    use self::CallPosition as Call;
    use self::ValuePosition as Val;

    match classification {
        MemberClassification::PropertyReader | MemberClassification::CompositeComponentReader => {
            MemberAppearance::new(Val::Invoke, Call::Callable)
        }
        MemberClassification::PlainZeroArgMethod => match policy {
            ResolutionPolicy::Both => MemberAppearance::new(Val::Invoke, Call::Callable),
            ResolutionPolicy::MethodOnly => MemberAppearance::new(Val::Callable, Call::Callable),
            ResolutionPolicy::PropertyOnly => MemberAppearance::new(Val::Invoke, Call::Reject),
        },
        MemberClassification::Other => MemberAppearance::new(Val::Callable, Call::Callable),
    }
}

#[cfg(test)]
#[path = "../tests/policy_tests.rs"]
mod tests;
