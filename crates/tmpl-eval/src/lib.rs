//! Expression evaluation for the tmpl template runtime.
//!
//! - `scanner` / `parser` - member-access expressions such as `point.getX()`
//!   and `user["name"]`
//! - `eval` - evaluates expressions against a `DataModel`, using the
//!   capability-aware lookup for direct zero-argument calls of members
//! - `template` - text with `${expr}` interpolations

pub mod ast;
mod error;
pub mod eval;
pub mod parser;
pub mod scanner;
pub mod template;

pub use ast::{Expr, Literal, Span};
pub use error::TemplateError;
pub use eval::{DataModel, Evaluator};
pub use parser::parse_expression;
pub use scanner::{Scanner, SyntaxKind};
pub use template::Template;
