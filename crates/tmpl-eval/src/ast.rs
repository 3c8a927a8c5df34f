//! Expression tree.

use std::fmt;
use std::sync::Arc;
use tmpl_model::Value;

/// Byte range of an expression in its template source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub length: u32,
}

impl Span {
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    pub const fn end(self) -> u32 {
        self.start + self.length
    }

    /// Span covering `self` through `end` (exclusive).
    #[must_use]
    pub const fn to(self, end: u32) -> Self {
        Self {
            start: self.start,
            length: end.saturating_sub(self.start),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Str(Arc<str>),
    Int(i64),
    Bool(bool),
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Str(s) => Value::Str(Arc::clone(s)),
            Literal::Int(i) => Value::Int(*i),
            Literal::Bool(b) => Value::Bool(*b),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Top-level variable of the data model.
    Variable { name: Arc<str>, span: Span },
    Literal { value: Literal, span: Span },
    /// `target.key`, or `target["key"]` when `bracket` is set.
    Member {
        target: Box<Expr>,
        key: Arc<str>,
        bracket: bool,
        span: Span,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Variable { span, .. }
            | Expr::Literal { span, .. }
            | Expr::Member { span, .. }
            | Expr::Call { span, .. } => *span,
        }
    }
}

/// Canonical source form, used in diagnostics.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Variable { name, .. } => f.write_str(name),
            Expr::Literal { value, .. } => match value {
                Literal::Str(s) => write!(f, "{:?}", &**s),
                Literal::Int(i) => write!(f, "{i}"),
                Literal::Bool(b) => write!(f, "{b}"),
            },
            Expr::Member {
                target,
                key,
                bracket: false,
                ..
            } => write!(f, "{target}.{key}"),
            Expr::Member { target, key, .. } => write!(f, "{target}[{:?}]", &**key),
            Expr::Call { callee, args, .. } => {
                write!(f, "{callee}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
