//! Member Access Resolution
//!
//! Decides what `obj.key` and `obj.key()` mean for a wrapped host object:
//!
//! - **Resolution policy** (`policy`): how zero-argument, non-void methods that
//!   are not property readers appear to templates
//! - **Composite accessor discovery** (`composite`): finds the ordered component
//!   accessors of immutable composite value types, probing the platform's
//!   introspection capability once
//! - **Member classification** (`classify`): per-type metadata, computed once
//!   per host type and shared by every wrapped instance of that type
//! - **Capability-aware lookup** (`lookup`): the hash-model traits the
//!   evaluator calls, and `BeanModel`, the wrapper for generic host objects
//!
//! Property readers and composite component readers are always visible as
//! values; the policy only ever affects plain zero-argument methods.

pub mod appearance;
pub mod classify;
pub mod composite;
pub mod config;
pub mod lookup;
pub mod policy;
pub mod wrapper;

pub use appearance::{AppearanceDecision, MethodAppearanceHook};
pub use classify::{
    ClassIntrospector, ClassMetadata, MemberClassification, MemberDescriptor, decapitalize,
    property_name_for,
};
pub use composite::{
    CapabilityUnavailable, ComponentAccessor, ComponentAccessorList, ComponentReflection,
    CompositeAccessor, DiscoveryError, IntrospectionError, IntrospectionPlatform, NativePlatform,
    RestrictedPlatform,
};
pub use config::{ConfigError, WrapperConfig};
pub use lookup::{
    BeanModel, LookupError, LookupOutcome, MethodCallAwareHashModel, NotCallableRejection,
    TemplateHashModel,
};
pub use policy::{CallPosition, MemberAppearance, ResolutionPolicy, ValuePosition, resolve_appearance};
pub use wrapper::{ObjectWrapper, ObjectWrapperBuilder};
