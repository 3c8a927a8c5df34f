//! Composite Accessor Discovery
//!
//! Immutable composite value types expose their components only through
//! generated zero-argument accessors. Finding those accessors needs a
//! platform-level reflection capability that may be missing entirely, so the
//! capability is probed once, lazily, and the outcome (including failure) is
//! published for every later caller.

use smallvec::SmallVec;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tmpl_model::{ComponentDecl, HostObject, HostType, InvocationError, MethodDescriptor, Value};
use tracing::{debug, warn};

// =============================================================================
// Platform capability
// =============================================================================

/// The discovery functions, once resolved from the platform.
pub trait ComponentReflection: Send + Sync {
    /// Component declarations of `ty`, or `None` when it is not a composite type.
    fn record_components<'t>(&self, ty: &'t HostType) -> Option<&'t [ComponentDecl]>;

    /// Accessor method of one declared component.
    fn accessor_of(
        &self,
        ty: &HostType,
        component: &ComponentDecl,
    ) -> Option<Arc<MethodDescriptor>>;
}

/// Source of the `ComponentReflection` capability.
pub trait IntrospectionPlatform: Send + Sync {
    fn resolve_component_reflection(&self) -> Result<Arc<dyn ComponentReflection>, String>;
}

/// Platform reading the component declarations recorded on `HostType`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativePlatform;

impl IntrospectionPlatform for NativePlatform {
    fn resolve_component_reflection(&self) -> Result<Arc<dyn ComponentReflection>, String> {
        Ok(Arc::new(DeclaredComponents))
    }
}

struct DeclaredComponents;

impl ComponentReflection for DeclaredComponents {
    fn record_components<'t>(&self, ty: &'t HostType) -> Option<&'t [ComponentDecl]> {
        ty.declared_components()
    }

    fn accessor_of(
        &self,
        ty: &HostType,
        component: &ComponentDecl,
    ) -> Option<Arc<MethodDescriptor>> {
        ty.method(&component.accessor)
            .filter(|m| m.is_public() && m.is_zero_arg_non_void())
            .cloned()
    }
}

/// Platform without composite introspection, e.g. a restricted embedding.
#[derive(Clone, Debug)]
pub struct RestrictedPlatform {
    reason: String,
}

impl RestrictedPlatform {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl IntrospectionPlatform for RestrictedPlatform {
    fn resolve_component_reflection(&self) -> Result<Arc<dyn ComponentReflection>, String> {
        Err(self.reason.clone())
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("composite value type introspection is unavailable: {reason}")]
pub struct CapabilityUnavailable {
    pub reason: Arc<str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "failed to access the accessor of component #{index} (\"{component}\", of {count}) of composite type {type_name}"
)]
pub struct IntrospectionError {
    pub type_name: String,
    pub component: String,
    pub index: usize,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Unavailable(#[from] CapabilityUnavailable),
    #[error(transparent)]
    Introspection(#[from] IntrospectionError),
}

// =============================================================================
// Accessor lists
// =============================================================================

/// Unbound accessor of one component; invocation needs an instance.
#[derive(Clone)]
pub struct ComponentAccessor {
    index: usize,
    name: Arc<str>,
    method: Arc<MethodDescriptor>,
}

impl ComponentAccessor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    pub fn method(&self) -> &Arc<MethodDescriptor> {
        &self.method
    }

    pub fn invoke(&self, instance: &HostObject) -> Result<Value, InvocationError> {
        self.method.call(instance, &[])
    }
}

impl fmt::Debug for ComponentAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentAccessor")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("accessor", &self.method.name)
            .finish()
    }
}

/// Component accessors in declaration order.
#[derive(Clone, Debug, Default)]
pub struct ComponentAccessorList {
    accessors: SmallVec<[ComponentAccessor; 4]>,
}

impl ComponentAccessorList {
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ComponentAccessor> {
        self.accessors.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentAccessor> {
        self.accessors.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.accessors.iter().map(|a| &*a.name)
    }
}

// =============================================================================
// Discovery
// =============================================================================

/// Discovers composite component accessors, probing the platform capability
/// at most once.
pub struct CompositeAccessor {
    platform: Arc<dyn IntrospectionPlatform>,
    capability: OnceLock<Result<Arc<dyn ComponentReflection>, CapabilityUnavailable>>,
    probe_attempts: AtomicUsize,
}

static GLOBAL: OnceLock<Arc<CompositeAccessor>> = OnceLock::new();

impl CompositeAccessor {
    pub fn new(platform: Arc<dyn IntrospectionPlatform>) -> Self {
        Self {
            platform,
            capability: OnceLock::new(),
            probe_attempts: AtomicUsize::new(0),
        }
    }

    pub fn native() -> Self {
        Self::new(Arc::new(NativePlatform))
    }

    /// Process-wide instance on the native platform.
    pub fn global() -> Arc<CompositeAccessor> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(CompositeAccessor::native())))
    }

    /// The resolved capability, probing on first use. A failed probe is cached
    /// and returned again without re-probing.
    pub fn capability(&self) -> Result<&Arc<dyn ComponentReflection>, CapabilityUnavailable> {
        self.capability
            .get_or_init(|| self.probe())
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn is_supported(&self) -> bool {
        self.capability().is_ok()
    }

    /// How many times the platform was probed; never more than one.
    pub fn probe_attempts(&self) -> usize {
        self.probe_attempts.load(Ordering::Acquire)
    }

    fn probe(&self) -> Result<Arc<dyn ComponentReflection>, CapabilityUnavailable> {
        self.probe_attempts.fetch_add(1, Ordering::AcqRel);
        match self.platform.resolve_component_reflection() {
            Ok(reflection) => {
                debug!("composite value type introspection is available");
                Ok(reflection)
            }
            Err(reason) => {
                warn!(
                    %reason,
                    "composite value type introspection is unavailable; no type will be treated as composite"
                );
                Err(CapabilityUnavailable {
                    reason: reason.into(),
                })
            }
        }
    }

    /// Component accessors of `ty` in declaration order, or `None` when `ty` is
    /// not a composite value type.
    pub fn get_accessors(
        &self,
        ty: &HostType,
    ) -> Result<Option<ComponentAccessorList>, DiscoveryError> {
        let reflection = self.capability()?;
        let Some(components) = reflection.record_components(ty) else {
            return Ok(None);
        };

        let count = components.len();
        let mut accessors = SmallVec::with_capacity(count);
        for (index, component) in components.iter().enumerate() {
            let method = reflection.accessor_of(ty, component).ok_or_else(|| {
                IntrospectionError {
                    type_name: ty.name().to_string(),
                    component: component.name.to_string(),
                    index,
                    count,
                }
            })?;
            accessors.push(ComponentAccessor {
                index,
                name: component.name.clone(),
                method,
            });
        }
        Ok(Some(ComponentAccessorList { accessors }))
    }
}

impl fmt::Debug for CompositeAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeAccessor")
            .field("probed", &self.capability.get().is_some())
            .field("probe_attempts", &self.probe_attempts())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/composite_tests.rs"]
mod tests;
