//! tmpl: a template runtime with capability-aware member access.
//!
//! - `tmpl_model` - values and host type descriptors
//! - `tmpl_access` - resolution policies, composite accessor discovery,
//!   member classification and the lookup protocol
//! - `tmpl_eval` - expressions and `${...}` templates
//!
//! ```ignore
//! let engine = Engine::new(WrapperConfig::new(ResolutionPolicy::Both));
//! let data = DataModel::new().with("point", point);
//! assert_eq!(engine.render("${point.getX()}", &data)?, "4");
//! ```

mod engine;
pub mod tracing_config;

pub use engine::Engine;
pub use tmpl_access::{
    AppearanceDecision, BeanModel, CompositeAccessor, LookupOutcome, MemberClassification,
    MethodAppearanceHook, MethodCallAwareHashModel, NotCallableRejection, ObjectWrapper,
    ResolutionPolicy, TemplateHashModel, WrapperConfig,
};
pub use tmpl_common::{Diagnostic, diagnostic_codes};
pub use tmpl_eval::{DataModel, Evaluator, Template, TemplateError};
pub use tmpl_model::{HostObject, HostType, HostTypeBuilder, MethodRef, ReturnKind, Value};

pub use tmpl_access as access;
pub use tmpl_common as common;
pub use tmpl_eval as eval;
pub use tmpl_model as model;
