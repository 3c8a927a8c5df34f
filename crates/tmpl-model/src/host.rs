//! Host Type Descriptors
//!
//! A `HostType` is the runtime's view of a type from the host program: its
//! public and private methods, and, for immutable composite value types, the
//! ordered list of declared components. Host types never change once built,
//! which is what makes per-type caches elsewhere in the runtime safe.

use crate::{HostObject, InvocationError, Value};
use indexmap::IndexMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of a host type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(pub u64);

impl TypeKey {
    /// First key handed out by `HostTypeBuilder::build`.
    pub const FIRST_VALID: u64 = 1;
}

static NEXT_TYPE_KEY: AtomicU64 = AtomicU64::new(TypeKey::FIRST_VALID);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnKind {
    Void,
    Boolean,
    Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

pub type MethodBody =
    Arc<dyn Fn(&HostObject, &[Value]) -> Result<Value, InvocationError> + Send + Sync>;

/// A single method of a host type. Methods are not overloaded by arity.
pub struct MethodDescriptor {
    pub name: Arc<str>,
    pub arity: usize,
    pub returns: ReturnKind,
    pub visibility: Visibility,
    body: MethodBody,
}

impl MethodDescriptor {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// True for the methods the resolution policy is concerned with.
    pub fn is_zero_arg_non_void(&self) -> bool {
        self.arity == 0 && self.returns != ReturnKind::Void
    }

    /// Invoke on `receiver`. Arity is checked before the body runs.
    pub fn call(&self, receiver: &HostObject, args: &[Value]) -> Result<Value, InvocationError> {
        if args.len() != self.arity {
            return Err(InvocationError::WrongArity {
                method: self.name.to_string(),
                expected: self.arity,
                actual: args.len(),
            });
        }
        (self.body)(receiver, args)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("returns", &self.returns)
            .field("visibility", &self.visibility)
            .finish()
    }
}

/// Declared component of a composite value type, naming its accessor method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentDecl {
    pub name: Arc<str>,
    pub accessor: Arc<str>,
}

/// Immutable descriptor of a host type.
pub struct HostType {
    key: TypeKey,
    name: Arc<str>,
    payload: TypeId,
    payload_name: &'static str,
    methods: IndexMap<Arc<str>, Arc<MethodDescriptor>>,
    components: Option<Vec<ComponentDecl>>,
}

impl HostType {
    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload_type_id(&self) -> TypeId {
        self.payload
    }

    pub fn payload_type_name(&self) -> &'static str {
        self.payload_name
    }

    pub fn method(&self, name: &str) -> Option<&Arc<MethodDescriptor>> {
        self.methods.get(name)
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &Arc<MethodDescriptor>> {
        self.methods.values()
    }

    /// Raw component declarations; `None` unless the type is a composite value type.
    pub fn declared_components(&self) -> Option<&[ComponentDecl]> {
        self.components.as_deref()
    }
}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostType")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("methods", &self.methods.len())
            .field("components", &self.components)
            .finish()
    }
}

/// Builder for `HostType`, with method bodies written against the payload type `T`.
///
/// ```ignore
/// let point = HostTypeBuilder::<Point>::new("Point")
///     .component("x", ReturnKind::Value, |p| Value::from(p.x))
///     .method("getX", ReturnKind::Value, |p| Ok(Value::from(p.x + 1)))
///     .build();
/// ```
pub struct HostTypeBuilder<T> {
    name: Arc<str>,
    methods: IndexMap<Arc<str>, Arc<MethodDescriptor>>,
    components: Option<Vec<ComponentDecl>>,
    _payload: PhantomData<fn(&T)>,
}

impl<T: Any + Send + Sync> HostTypeBuilder<T> {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            methods: IndexMap::new(),
            components: None,
            _payload: PhantomData,
        }
    }

    /// Mark the type as a composite value type even if it declares no components.
    pub fn composite(mut self) -> Self {
        self.components.get_or_insert_with(Vec::new);
        self
    }

    /// Declare a component together with its same-named public accessor.
    pub fn component<F>(self, name: impl Into<Arc<str>>, returns: ReturnKind, read: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let name = name.into();
        self.declare_component(name.clone(), name.clone())
            .method(name, returns, move |payload| Ok(read(payload)))
    }

    /// Declare component metadata only. The accessor must be registered
    /// separately; if it never is, the metadata is inconsistent.
    pub fn declare_component(
        mut self,
        name: impl Into<Arc<str>>,
        accessor: impl Into<Arc<str>>,
    ) -> Self {
        self.components.get_or_insert_with(Vec::new).push(ComponentDecl {
            name: name.into(),
            accessor: accessor.into(),
        });
        self
    }

    /// Public zero-argument method.
    pub fn method<F>(self, name: impl Into<Arc<str>>, returns: ReturnKind, body: F) -> Self
    where
        F: Fn(&T) -> Result<Value, InvocationError> + Send + Sync + 'static,
    {
        self.method_with_args(name, 0, returns, move |payload, _args| body(payload))
    }

    /// Public method with a fixed number of arguments.
    pub fn method_with_args<F>(
        self,
        name: impl Into<Arc<str>>,
        arity: usize,
        returns: ReturnKind,
        body: F,
    ) -> Self
    where
        F: Fn(&T, &[Value]) -> Result<Value, InvocationError> + Send + Sync + 'static,
    {
        self.push(name.into(), arity, returns, Visibility::Public, body)
    }

    /// Zero-argument method that templates must never see.
    pub fn private_method<F>(self, name: impl Into<Arc<str>>, returns: ReturnKind, body: F) -> Self
    where
        F: Fn(&T) -> Result<Value, InvocationError> + Send + Sync + 'static,
    {
        self.push(name.into(), 0, returns, Visibility::Private, move |payload, _args| {
            body(payload)
        })
    }

    fn push<F>(
        mut self,
        name: Arc<str>,
        arity: usize,
        returns: ReturnKind,
        visibility: Visibility,
        body: F,
    ) -> Self
    where
        F: Fn(&T, &[Value]) -> Result<Value, InvocationError> + Send + Sync + 'static,
    {
        let method_name = name.clone();
        let body: MethodBody = Arc::new(move |receiver: &HostObject, args: &[Value]| {
            let payload = receiver.downcast_ref::<T>().ok_or_else(|| {
                InvocationError::ReceiverMismatch {
                    method: method_name.to_string(),
                    receiver: receiver.host_type().name().to_string(),
                }
            })?;
            body(payload, args)
        });
        let descriptor = MethodDescriptor {
            name: name.clone(),
            arity,
            returns,
            visibility,
            body,
        };
        // Re-registering a name replaces the earlier method in place.
        self.methods.insert(name, Arc::new(descriptor));
        self
    }

    pub fn build(self) -> Arc<HostType> {
        let key = TypeKey(NEXT_TYPE_KEY.fetch_add(1, Ordering::Relaxed));
        Arc::new(HostType {
            key,
            name: self.name,
            payload: TypeId::of::<T>(),
            payload_name: std::any::type_name::<T>(),
            methods: self.methods,
            components: self.components,
        })
    }
}

#[cfg(test)]
#[path = "../tests/host_tests.rs"]
mod tests;
