//! Per-method customization of how a member appears to templates.

use crate::classify::MemberClassification;
use crate::policy::{CallPosition, MemberAppearance};
use tmpl_model::{HostType, MethodDescriptor};

/// Mutable decision handed to a `MethodAppearanceHook`, pre-filled from the
/// resolution policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppearanceDecision {
    classification: MemberClassification,
    /// Drop the member entirely; lookups of its key then find nothing.
    pub hidden: bool,
    /// Whether `obj.key()` gets the method to call. When false, call-position
    /// access is rejected as not callable.
    pub method_before_call: bool,
}

impl AppearanceDecision {
    pub(crate) fn new(classification: MemberClassification, appearance: MemberAppearance) -> Self {
        Self {
            classification,
            hidden: false,
            method_before_call: appearance.call_position == CallPosition::Callable,
        }
    }

    pub fn classification(&self) -> MemberClassification {
        self.classification
    }

    pub(crate) fn apply(&self, appearance: MemberAppearance) -> MemberAppearance {
        MemberAppearance {
            call_position: if self.method_before_call {
                CallPosition::Callable
            } else {
                CallPosition::Reject
            },
            ..appearance
        }
    }
}

/// Hook consulted once per method-backed member while a type's metadata is built.
///
/// Only plain zero-argument methods and other methods are offered; property
/// and component readers are not customizable.
///
/// Runs while the type's metadata cache entry is locked, so a hook must not
/// request metadata from the wrapper that is consulting it.
pub trait MethodAppearanceHook: Send + Sync {
    fn decide(&self, ty: &HostType, method: &MethodDescriptor, decision: &mut AppearanceDecision);
}

impl<F> MethodAppearanceHook for F
where
    F: Fn(&HostType, &MethodDescriptor, &mut AppearanceDecision) + Send + Sync,
{
    fn decide(&self, ty: &HostType, method: &MethodDescriptor, decision: &mut AppearanceDecision) {
        self(ty, method, decision)
    }
}
