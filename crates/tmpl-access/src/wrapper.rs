//! Object wrapping.
//!
//! An `ObjectWrapper` is one wrapping environment: a configuration plus the
//! member metadata cache shared by everything it wraps.

use crate::appearance::MethodAppearanceHook;
use crate::classify::ClassIntrospector;
use crate::composite::CompositeAccessor;
use crate::config::WrapperConfig;
use crate::lookup::BeanModel;
use crate::policy::ResolutionPolicy;
use std::sync::Arc;
use tmpl_model::HostObject;

#[derive(Debug)]
pub struct ObjectWrapper {
    config: WrapperConfig,
    introspector: ClassIntrospector,
}

impl ObjectWrapper {
    pub fn new(config: WrapperConfig) -> Self {
        ObjectWrapperBuilder::new().config(config).build()
    }

    pub fn builder() -> ObjectWrapperBuilder {
        ObjectWrapperBuilder::new()
    }

    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    pub fn introspector(&self) -> &ClassIntrospector {
        &self.introspector
    }

    pub fn wrap(&self, object: HostObject) -> BeanModel {
        let metadata = self.introspector.metadata(object.host_type());
        BeanModel::new(object, metadata)
    }
}

impl Default for ObjectWrapper {
    fn default() -> Self {
        Self::new(WrapperConfig::default())
    }
}

#[derive(Default)]
pub struct ObjectWrapperBuilder {
    config: WrapperConfig,
    composite: Option<Arc<CompositeAccessor>>,
    hook: Option<Arc<dyn MethodAppearanceHook>>,
}

impl ObjectWrapperBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: WrapperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn default_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.config.default_policy = policy;
        self
    }

    pub fn composite_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.config.composite_policy = Some(policy);
        self
    }

    /// Use a specific discovery instance instead of the process-wide one.
    pub fn composite_accessor(mut self, composite: Arc<CompositeAccessor>) -> Self {
        self.composite = Some(composite);
        self
    }

    pub fn appearance_hook(mut self, hook: impl MethodAppearanceHook + 'static) -> Self {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> ObjectWrapper {
        let composite = self.composite.unwrap_or_else(CompositeAccessor::global);
        ObjectWrapper {
            config: self.config,
            introspector: ClassIntrospector::new(composite, self.config, self.hook),
        }
    }
}
