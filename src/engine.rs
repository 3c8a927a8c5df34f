//! One-stop rendering: a configured `ObjectWrapper` plus the evaluator.

use anyhow::{Context, Result};
use tmpl_access::{MethodAppearanceHook, ObjectWrapper, WrapperConfig};
use tmpl_common::Diagnostic;
use tmpl_eval::{DataModel, Evaluator, Template};

#[derive(Debug, Default)]
pub struct Engine {
    wrapper: ObjectWrapper,
}

impl Engine {
    pub fn new(config: WrapperConfig) -> Self {
        Self {
            wrapper: ObjectWrapper::new(config),
        }
    }

    pub fn with_wrapper(wrapper: ObjectWrapper) -> Self {
        Self { wrapper }
    }

    /// Engine configured from JSON such as `{"defaultPolicy": "METHOD_ONLY"}`.
    pub fn from_config_json(text: &str) -> Result<Self> {
        let config = WrapperConfig::from_json(text).context("loading wrapper configuration")?;
        Ok(Self::new(config))
    }

    /// Engine whose wrapper consults `hook` for every plain or other method.
    pub fn with_appearance_hook(
        config: WrapperConfig,
        hook: impl MethodAppearanceHook + 'static,
    ) -> Self {
        Self::with_wrapper(
            ObjectWrapper::builder()
                .config(config)
                .appearance_hook(hook)
                .build(),
        )
    }

    pub fn wrapper(&self) -> &ObjectWrapper {
        &self.wrapper
    }

    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.wrapper)
    }

    /// Parse and render `source`; failures come back as the diagnostic a
    /// template author would see.
    pub fn render(&self, source: &str, data: &DataModel) -> Result<String, Diagnostic> {
        Template::parse(source)
            .and_then(|template| template.render(&self.evaluator(), data))
            .map_err(|err| err.to_diagnostic())
    }
}
