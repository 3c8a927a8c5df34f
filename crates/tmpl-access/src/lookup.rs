//! Capability-Aware Lookup
//!
//! `TemplateHashModel::get` answers `obj.key`. When the evaluator can see that
//! the result is called immediately with no arguments (`obj.key()` or
//! `obj["key"]()`), it asks `MethodCallAwareHashModel::get_before_method_call`
//! instead, which may hand back something callable, or reject the access while
//! still reporting the value a plain lookup would have produced.

use crate::classify::{ClassMetadata, MemberClassification, MemberDescriptor};
use crate::policy::{CallPosition, ResolutionPolicy, ValuePosition};
use std::sync::Arc;
use thiserror::Error;
use tmpl_model::{HostObject, InvocationError, MethodRef, Value};
use tracing::trace;

/// Result of a call-position lookup of an existing key.
#[derive(Clone, Debug, PartialEq)]
pub enum LookupOutcome {
    /// A plain value; the evaluator still checks whether it is callable.
    Value(Value),
    /// The member to invoke.
    Callable(MethodRef),
    /// The key exists but must not be called.
    Rejected(NotCallableRejection),
}

/// The key exists, but the member must not be treated as a method.
#[derive(Clone, Debug, PartialEq)]
pub struct NotCallableRejection {
    actual_value: Value,
    hint: Option<String>,
}

impl NotCallableRejection {
    pub fn new(actual_value: Value, hint: Option<String>) -> Self {
        Self { actual_value, hint }
    }

    /// The value a plain lookup of the key returns.
    pub fn actual_value(&self) -> &Value {
        &self.actual_value
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn into_parts(self) -> (Value, Option<String>) {
        (self.actual_value, self.hint)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("failed to read \"{key}\" of {type_name}: {source}")]
    Read {
        key: String,
        type_name: String,
        #[source]
        source: InvocationError,
    },
}

/// Key-to-value lookup. `Ok(None)` means there is no such key.
pub trait TemplateHashModel {
    fn get(&self, key: &str) -> Result<Option<Value>, LookupError>;
}

/// Lookup used instead of `get` when the result is called right away with no
/// arguments. `Ok(None)` means there is no such key, as with `get`.
pub trait MethodCallAwareHashModel: TemplateHashModel {
    fn get_before_method_call(&self, key: &str) -> Result<Option<LookupOutcome>, LookupError>;
}

/// Wrapped generic host object.
#[derive(Clone, Debug)]
pub struct BeanModel {
    object: HostObject,
    metadata: Arc<ClassMetadata>,
}

impl BeanModel {
    pub fn new(object: HostObject, metadata: Arc<ClassMetadata>) -> Self {
        Self { object, metadata }
    }

    pub fn object(&self) -> &HostObject {
        &self.object
    }

    pub fn metadata(&self) -> &Arc<ClassMetadata> {
        &self.metadata
    }

    pub fn classify(&self, key: &str) -> Option<MemberClassification> {
        self.metadata.classify(key)
    }

    fn bind(&self, member: &MemberDescriptor) -> MethodRef {
        MethodRef::new(self.object.clone(), Arc::clone(&member.method))
    }

    fn value_of(&self, member: &MemberDescriptor) -> Result<Value, LookupError> {
        match member.appearance.value_position {
            ValuePosition::Invoke => {
                member
                    .method
                    .call(&self.object, &[])
                    .map_err(|source| LookupError::Read {
                        key: member.key.to_string(),
                        type_name: self.metadata.type_name().to_string(),
                        source,
                    })
            }
            ValuePosition::Callable => Ok(Value::Method(self.bind(member))),
        }
    }

    fn rejection_hint(&self, member: &MemberDescriptor) -> String {
        let key = &member.key;
        if member.classification == MemberClassification::PlainZeroArgMethod
            && self.metadata.policy() == ResolutionPolicy::PropertyOnly
        {
            format!(
                "\"{key}\" is a zero-argument method that is exposed only as a property value \
                 (resolution policy {}); write it without the \"()\".",
                ResolutionPolicy::PropertyOnly
            )
        } else {
            format!("\"{key}\" can only be read as a value; write it without the \"()\".")
        }
    }
}

impl TemplateHashModel for BeanModel {
    fn get(&self, key: &str) -> Result<Option<Value>, LookupError> {
        let Some(member) = self.metadata.member(key) else {
            trace!(type_name = self.metadata.type_name(), key, "no such member");
            return Ok(None);
        };
        trace!(
            type_name = self.metadata.type_name(),
            key,
            classification = ?member.classification,
            "value-position lookup"
        );
        self.value_of(member).map(Some)
    }
}

impl MethodCallAwareHashModel for BeanModel {
    fn get_before_method_call(&self, key: &str) -> Result<Option<LookupOutcome>, LookupError> {
        let Some(member) = self.metadata.member(key) else {
            trace!(type_name = self.metadata.type_name(), key, "no such member");
            return Ok(None);
        };
        trace!(
            type_name = self.metadata.type_name(),
            key,
            classification = ?member.classification,
            "call-position lookup"
        );
        let outcome = match member.appearance.call_position {
            CallPosition::Callable => LookupOutcome::Callable(self.bind(member)),
            CallPosition::Reject => LookupOutcome::Rejected(NotCallableRejection::new(
                self.value_of(member)?,
                Some(self.rejection_hint(member)),
            )),
        };
        Ok(Some(outcome))
    }
}

#[cfg(test)]
#[path = "../tests/lookup_tests.rs"]
mod tests;
