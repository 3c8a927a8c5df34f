//! Expression evaluation.
//!
//! Member access goes through the hash-model traits of `tmpl-access`. A member
//! access that is called right away with no arguments (`obj.key()`) is
//! resolved with `get_before_method_call` instead of `get`, so the wrapper can
//! hand out the method itself or reject the call; every other call evaluates
//! its callee as a plain value first.

use crate::ast::Expr;
use crate::error::TemplateError;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tmpl_access::{
    BeanModel, LookupError, LookupOutcome, MethodCallAwareHashModel, ObjectWrapper,
    TemplateHashModel,
};
use tmpl_model::{MethodRef, Value};
use tracing::{debug, trace};

/// Top-level variables visible to a template.
#[derive(Clone, Debug, Default)]
pub struct DataModel {
    variables: FxHashMap<Arc<str>, Value>,
}

impl DataModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Option<Value> {
        self.variables.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<Arc<str>>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl TemplateHashModel for DataModel {
    fn get(&self, key: &str) -> Result<Option<Value>, LookupError> {
        Ok(self.variables.get(key).cloned())
    }
}

/// Evaluates expressions, wrapping host objects with one `ObjectWrapper`.
#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'w> {
    wrapper: &'w ObjectWrapper,
}

impl<'w> Evaluator<'w> {
    pub fn new(wrapper: &'w ObjectWrapper) -> Self {
        Self { wrapper }
    }

    pub fn wrapper(&self) -> &'w ObjectWrapper {
        self.wrapper
    }

    pub fn evaluate(&self, expr: &Expr, data: &DataModel) -> Result<Value, TemplateError> {
        match expr {
            Expr::Variable { name, span } => match data.get(name) {
                Ok(Some(value)) => Ok(value),
                Ok(None) => Err(TemplateError::Undefined {
                    expression: expr.to_string(),
                    span: *span,
                }),
                Err(source) => Err(TemplateError::MemberRead {
                    key: name.to_string(),
                    span: *span,
                    source,
                }),
            },
            Expr::Literal { value, .. } => Ok(value.to_value()),
            Expr::Member { target, key, .. } => {
                let model = self.hash_model(target, data)?;
                let value = model.get(key).map_err(|source| TemplateError::MemberRead {
                    key: key.to_string(),
                    span: expr.span(),
                    source,
                })?;
                value.ok_or_else(|| TemplateError::Undefined {
                    expression: expr.to_string(),
                    span: expr.span(),
                })
            }
            Expr::Call { callee, args, .. } => match &**callee {
                Expr::Member { target, key, .. } if args.is_empty() => {
                    self.call_member(expr, callee, target, key, data)
                }
                _ => {
                    let function = self.evaluate(callee, data)?;
                    let args = args
                        .iter()
                        .map(|arg| self.evaluate(arg, data))
                        .collect::<Result<Vec<_>, _>>()?;
                    self.call_value(expr, callee, function, &args)
                }
            },
        }
    }

    /// `target.key()`: capability-aware lookup of a direct zero-argument call.
    fn call_member(
        &self,
        call: &Expr,
        callee: &Expr,
        target: &Expr,
        key: &str,
        data: &DataModel,
    ) -> Result<Value, TemplateError> {
        let model = self.hash_model(target, data)?;
        let outcome = model
            .get_before_method_call(key)
            .map_err(|source| TemplateError::MemberRead {
                key: key.to_string(),
                span: callee.span(),
                source,
            })?;
        match outcome {
            None => Err(TemplateError::Undefined {
                expression: callee.to_string(),
                span: callee.span(),
            }),
            Some(LookupOutcome::Callable(method)) => self.invoke(call, &method, &[]),
            Some(LookupOutcome::Value(value)) => self.call_value(call, callee, value, &[]),
            Some(LookupOutcome::Rejected(rejection)) => {
                debug!(expression = %callee, "call of a member that can only be read as a value");
                let (actual, hint) = rejection.into_parts();
                Err(TemplateError::NotCallable {
                    expression: callee.to_string(),
                    actual: actual.describe(),
                    hint,
                    span: callee.span(),
                })
            }
        }
    }

    fn call_value(
        &self,
        call: &Expr,
        callee: &Expr,
        function: Value,
        args: &[Value],
    ) -> Result<Value, TemplateError> {
        match function {
            Value::Method(method) => self.invoke(call, &method, args),
            other => Err(TemplateError::NotCallable {
                expression: callee.to_string(),
                actual: other.describe(),
                hint: None,
                span: callee.span(),
            }),
        }
    }

    fn invoke(&self, call: &Expr, method: &MethodRef, args: &[Value]) -> Result<Value, TemplateError> {
        trace!(method = %method, args = args.len(), "invoking host method");
        method.invoke(args).map_err(|source| TemplateError::CallFailed {
            expression: call.to_string(),
            span: call.span(),
            source,
        })
    }

    /// Evaluates `target` and wraps it for member access.
    fn hash_model(
        &self,
        target: &Expr,
        data: &DataModel,
    ) -> Result<BeanModel, TemplateError> {
        match self.evaluate(target, data)? {
            Value::Object(object) => Ok(self.wrapper.wrap(object)),
            Value::Null => Err(TemplateError::Undefined {
                expression: target.to_string(),
                span: target.span(),
            }),
            other => Err(TemplateError::NotAHash {
                expression: target.to_string(),
                actual: other.describe(),
                span: target.span(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../tests/eval_tests.rs"]
mod tests;
