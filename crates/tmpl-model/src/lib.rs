//! Template value model for the tmpl runtime.
//!
//! This crate describes what the template evaluator can see of the host program:
//! - `Value` - everything an expression can evaluate to
//! - `HostType` / `HostTypeBuilder` - immutable descriptors of host types,
//!   their public methods and (for composite value types) their components
//! - `HostObject` - an instance of a host type
//! - `MethodRef` - a method bound to its receiver, callable from templates

mod error;
pub mod host;
mod object;
mod value;

pub use error::{InvocationError, ModelError};
pub use host::{
    ComponentDecl, HostType, HostTypeBuilder, MethodBody, MethodDescriptor, ReturnKind, TypeKey,
    Visibility,
};
pub use object::{HostObject, MethodRef};
pub use value::Value;
