//! Member Classification
//!
//! Builds the per-type member table that lookups consult. A type's table is
//! computed on first use and never changes afterwards, so it is shared by all
//! wrapped instances of the type.
//!
//! Keys are claimed in precedence order; the first claim of a key wins and
//! later candidates for the same key are dropped:
//!
//! 1. composite components (`x` of `Point(x, y)`)
//! 2. conventional property readers (`getName()` / `isActive()` claim `name` / `active`)
//! 3. public methods by their own name
//!
//! When a type declares components but is not treated as composite (the
//! platform cannot introspect composites, or the declarations are inconsistent),
//! the declared accessors are claimed by their own names before step 2, as
//! plain methods.
//!
//! A component whose accessor itself looks like a property reader (a component
//! literally named `isActive`) is left to step 3: its method stays an ordinary
//! method and the derived property (`active`) is the property-style view.

use crate::appearance::{AppearanceDecision, MethodAppearanceHook};
use crate::composite::{ComponentAccessorList, CompositeAccessor, DiscoveryError};
use crate::config::WrapperConfig;
use crate::policy::{MemberAppearance, ResolutionPolicy, resolve_appearance};
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use tmpl_model::{HostType, MethodDescriptor, ReturnKind, TypeKey};
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberClassification {
    /// Conventional property getter, keyed by the property name.
    PropertyReader,
    /// Any other public zero-argument, non-void method, keyed by its name.
    PlainZeroArgMethod,
    /// Accessor of a composite value type's component, keyed by the component name.
    CompositeComponentReader,
    /// Methods with arguments or without a return value.
    Other,
}

impl MemberClassification {
    /// Members whose appearance the resolution policy cannot change.
    pub fn is_policy_independent(self) -> bool {
        matches!(
            self,
            MemberClassification::PropertyReader | MemberClassification::CompositeComponentReader
        )
    }
}

#[derive(Clone, Debug)]
pub struct MemberDescriptor {
    pub key: Arc<str>,
    pub classification: MemberClassification,
    pub method: Arc<MethodDescriptor>,
    pub appearance: MemberAppearance,
}

/// Resolved member table of one host type under one wrapper configuration.
pub struct ClassMetadata {
    type_key: TypeKey,
    type_name: Arc<str>,
    policy: ResolutionPolicy,
    components: Option<ComponentAccessorList>,
    members: FxHashMap<Arc<str>, MemberDescriptor>,
}

impl ClassMetadata {
    pub fn type_key(&self) -> TypeKey {
        self.type_key
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Policy in effect for this type's plain zero-argument methods.
    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    pub fn is_composite(&self) -> bool {
        self.components.is_some()
    }

    pub fn components(&self) -> Option<&ComponentAccessorList> {
        self.components.as_ref()
    }

    pub fn member(&self, key: &str) -> Option<&MemberDescriptor> {
        self.members.get(key)
    }

    pub fn classify(&self, key: &str) -> Option<MemberClassification> {
        self.member(key).map(|m| m.classification)
    }

    /// Visible keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.members.keys().map(|k| &**k).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Debug for ClassMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassMetadata")
            .field("type_name", &self.type_name)
            .field("policy", &self.policy)
            .field("composite", &self.is_composite())
            .field("keys", &self.keys())
            .finish()
    }
}

// =============================================================================
// Property naming convention
// =============================================================================

/// Property name read by `method`, if it is a conventional property reader:
/// `getXxx()` returning anything, or `isXxx()` returning a boolean.
pub fn property_name_for(method: &MethodDescriptor) -> Option<String> {
    if !method.is_public() || !method.is_zero_arg_non_void() {
        return None;
    }
    let suffix = if let Some(rest) = method.name.strip_prefix("get") {
        rest
    } else if let Some(rest) = method.name.strip_prefix("is") {
        if method.returns != ReturnKind::Boolean {
            return None;
        }
        rest
    } else {
        return None;
    };
    match suffix.chars().next() {
        Some(first) if first.is_uppercase() => Some(decapitalize(suffix)),
        _ => None,
    }
}

/// Lower-cases the first character, unless the first two are both upper case
/// (`Name` -> `name`, `URL` -> `URL`).
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if let Some(second) = chars.clone().next() {
        if first.is_uppercase() && second.is_uppercase() {
            return name.to_string();
        }
    }
    first.to_lowercase().chain(chars).collect()
}

fn method_classification(method: &MethodDescriptor) -> MemberClassification {
    if method.is_zero_arg_non_void() {
        MemberClassification::PlainZeroArgMethod
    } else {
        MemberClassification::Other
    }
}

// =============================================================================
// Introspector
// =============================================================================

/// Computes and caches `ClassMetadata`, once per host type.
pub struct ClassIntrospector {
    composite: Arc<CompositeAccessor>,
    config: WrapperConfig,
    hook: Option<Arc<dyn MethodAppearanceHook>>,
    cache: DashMap<TypeKey, Arc<ClassMetadata>>,
}

impl ClassIntrospector {
    pub fn new(
        composite: Arc<CompositeAccessor>,
        config: WrapperConfig,
        hook: Option<Arc<dyn MethodAppearanceHook>>,
    ) -> Self {
        Self {
            composite,
            config,
            hook,
            cache: DashMap::new(),
        }
    }

    pub fn composite_accessor(&self) -> &Arc<CompositeAccessor> {
        &self.composite
    }

    /// Metadata for `ty`, computed on first request.
    pub fn metadata(&self, ty: &HostType) -> Arc<ClassMetadata> {
        if let Some(hit) = self.cache.get(&ty.key()) {
            return Arc::clone(hit.value());
        }
        // Built under the entry lock so the hook and the log run once per type.
        let entry = self
            .cache
            .entry(ty.key())
            .or_insert_with(|| Arc::new(self.build(ty)));
        Arc::clone(entry.value())
    }

    /// Number of host types with cached metadata.
    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }

    fn discover_components(&self, ty: &HostType) -> Option<ComponentAccessorList> {
        match self.composite.get_accessors(ty) {
            Ok(components) => components,
            // Already reported once by the capability probe.
            Err(DiscoveryError::Unavailable(_)) => None,
            Err(DiscoveryError::Introspection(err)) => {
                warn!(
                    type_name = ty.name(),
                    error = %err,
                    "inconsistent composite metadata; classifying members as ordinary methods"
                );
                None
            }
        }
    }

    fn build(&self, ty: &HostType) -> ClassMetadata {
        let components = self.discover_components(ty);
        let policy = self.config.effective_policy(components.is_some());
        let mut table = MemberTable {
            ty,
            policy,
            hook: self.hook.as_deref(),
            members: FxHashMap::default(),
        };

        if let Some(components) = &components {
            for accessor in components.iter() {
                if property_name_for(accessor.method()).is_some() {
                    continue;
                }
                table.claim(
                    accessor.name().clone(),
                    MemberClassification::CompositeComponentReader,
                    accessor.method(),
                );
            }
        } else if let Some(declared) = ty.declared_components() {
            // Composite treatment failed: accessors still keep their own names
            // ahead of derived properties (`x()` over `getX()` for key `x`).
            for component in declared {
                if let Some(method) = ty.method(&component.accessor).filter(|m| m.is_public()) {
                    table.claim(method.name.clone(), method_classification(method), method);
                }
            }
        }

        for method in ty.methods().filter(|m| m.is_public()) {
            if let Some(property) = property_name_for(method) {
                table.claim(property.into(), MemberClassification::PropertyReader, method);
            }
        }

        for method in ty.methods().filter(|m| m.is_public()) {
            table.claim(method.name.clone(), method_classification(method), method);
        }

        debug!(
            type_name = ty.name(),
            %policy,
            composite = components.is_some(),
            members = table.members.len(),
            "computed member classification"
        );

        ClassMetadata {
            type_key: ty.key(),
            type_name: ty.name().into(),
            policy,
            components,
            members: table.members,
        }
    }
}

impl fmt::Debug for ClassIntrospector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassIntrospector")
            .field("config", &self.config)
            .field("has_hook", &self.hook.is_some())
            .field("cached_types", &self.cached_types())
            .finish()
    }
}

struct MemberTable<'a> {
    ty: &'a HostType,
    policy: ResolutionPolicy,
    hook: Option<&'a dyn MethodAppearanceHook>,
    members: FxHashMap<Arc<str>, MemberDescriptor>,
}

impl MemberTable<'_> {
    fn claim(
        &mut self,
        key: Arc<str>,
        classification: MemberClassification,
        method: &Arc<MethodDescriptor>,
    ) {
        if self.members.contains_key(&key) {
            return;
        }
        let mut appearance = resolve_appearance(self.policy, classification);
        if !classification.is_policy_independent() {
            if let Some(hook) = self.hook {
                let mut decision = AppearanceDecision::new(classification, appearance);
                hook.decide(self.ty, method, &mut decision);
                if decision.hidden {
                    return;
                }
                appearance = decision.apply(appearance);
            }
        }
        self.members.insert(
            key.clone(),
            MemberDescriptor {
                key,
                classification,
                method: Arc::clone(method),
                appearance,
            },
        );
    }
}

#[cfg(test)]
#[path = "../tests/classify_tests.rs"]
mod tests;
