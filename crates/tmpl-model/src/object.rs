use crate::{HostType, InvocationError, MethodDescriptor, ModelError, Value};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// An instance of a host type. Cloning shares the payload.
#[derive(Clone)]
pub struct HostObject {
    ty: Arc<HostType>,
    payload: Arc<dyn Any + Send + Sync>,
}

impl HostObject {
    pub fn new<T: Any + Send + Sync>(ty: Arc<HostType>, payload: T) -> Result<Self, ModelError> {
        if ty.payload_type_id() != TypeId::of::<T>() {
            return Err(ModelError::PayloadTypeMismatch {
                type_name: ty.name().to_string(),
                expected: ty.payload_type_name(),
                actual: std::any::type_name::<T>(),
            });
        }
        Ok(Self {
            ty,
            payload: Arc::new(payload),
        })
    }

    pub fn host_type(&self) -> &Arc<HostType> {
        &self.ty
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

impl PartialEq for HostObject {
    fn eq(&self, other: &Self) -> bool {
        self.ty.key() == other.ty.key() && Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostObject")
            .field("type", &self.ty.name())
            .finish_non_exhaustive()
    }
}

/// A host method bound to its receiver.
#[derive(Clone)]
pub struct MethodRef {
    receiver: HostObject,
    method: Arc<MethodDescriptor>,
}

impl MethodRef {
    pub fn new(receiver: HostObject, method: Arc<MethodDescriptor>) -> Self {
        Self { receiver, method }
    }

    pub fn name(&self) -> &str {
        &self.method.name
    }

    pub fn receiver(&self) -> &HostObject {
        &self.receiver
    }

    pub fn method(&self) -> &Arc<MethodDescriptor> {
        &self.method
    }

    pub fn invoke(&self, args: &[Value]) -> Result<Value, InvocationError> {
        self.method.call(&self.receiver, args)
    }
}

impl PartialEq for MethodRef {
    fn eq(&self, other: &Self) -> bool {
        self.receiver == other.receiver && Arc::ptr_eq(&self.method, &other.method)
    }
}

impl fmt::Debug for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.receiver.host_type().name(), self.method.name)
    }
}
