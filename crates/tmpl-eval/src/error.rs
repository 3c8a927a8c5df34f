use crate::ast::Span;
use thiserror::Error;
use tmpl_access::LookupError;
use tmpl_common::{Diagnostic, diagnostic_codes};
use tmpl_model::InvocationError;

/// Errors raised while parsing or rendering a template.
///
/// `expression` fields hold the canonical source of the offending expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { offset: u32, message: String },

    #[error("expression nesting exceeds the limit of {limit}")]
    NestingTooDeep { offset: u32, limit: usize },

    #[error("{expression} has evaluated to null or missing")]
    Undefined { expression: String, span: Span },

    #[error("expected a hash, but {expression} has evaluated to {actual}")]
    NotAHash {
        expression: String,
        actual: String,
        span: Span,
    },

    #[error("expected a method, but {expression} has evaluated to {actual}")]
    NotCallable {
        expression: String,
        actual: String,
        hint: Option<String>,
        span: Span,
    },

    #[error("expected a string, number or boolean, but {expression} has evaluated to {actual}")]
    NotStringifiable {
        expression: String,
        actual: String,
        span: Span,
    },

    #[error("failed to read member \"{key}\"")]
    MemberRead {
        key: String,
        span: Span,
        #[source]
        source: LookupError,
    },

    #[error("call of {expression} has failed")]
    CallFailed {
        expression: String,
        span: Span,
        #[source]
        source: InvocationError,
    },
}

impl TemplateError {
    pub fn code(&self) -> u32 {
        match self {
            TemplateError::Syntax { .. } => diagnostic_codes::SYNTAX_ERROR,
            TemplateError::NestingTooDeep { .. } => diagnostic_codes::NESTING_TOO_DEEP,
            TemplateError::Undefined { .. } => diagnostic_codes::NULL_OR_MISSING,
            TemplateError::NotAHash { .. } => diagnostic_codes::EXPECTED_HASH,
            TemplateError::NotCallable { .. } => diagnostic_codes::EXPECTED_METHOD,
            TemplateError::NotStringifiable { .. } => diagnostic_codes::EXPECTED_STRINGIFIABLE,
            TemplateError::MemberRead { .. } => diagnostic_codes::MEMBER_READ_FAILED,
            TemplateError::CallFailed { .. } => diagnostic_codes::CALL_FAILED,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TemplateError::Syntax { offset, .. } | TemplateError::NestingTooDeep { offset, .. } => {
                Span::new(*offset, 0)
            }
            TemplateError::Undefined { span, .. }
            | TemplateError::NotAHash { span, .. }
            | TemplateError::NotCallable { span, .. }
            | TemplateError::NotStringifiable { span, .. }
            | TemplateError::MemberRead { span, .. }
            | TemplateError::CallFailed { span, .. } => *span,
        }
    }

    /// The error as reported to the template author.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self.span();
        let code = self.code();
        let from = |args: &[&str]| Diagnostic::from_code(code, span.start, span.length, args);
        match self {
            TemplateError::Syntax { offset, message } => from(&[&offset.to_string(), message]),
            TemplateError::NestingTooDeep { limit, .. } => from(&[&limit.to_string()]),
            TemplateError::Undefined { expression, .. } => from(&[expression]),
            TemplateError::NotAHash {
                expression, actual, ..
            }
            | TemplateError::NotStringifiable {
                expression, actual, ..
            } => from(&[actual, expression]),
            TemplateError::NotCallable {
                expression,
                actual,
                hint,
                ..
            } => {
                let diagnostic = from(&[actual, expression]);
                match hint {
                    Some(hint) => diagnostic.with_hint(hint.clone()),
                    None => diagnostic,
                }
            }
            TemplateError::MemberRead { key, source, .. } => {
                let LookupError::Read { source: cause, .. } = source;
                from(&[key, &cause.to_string()])
            }
            TemplateError::CallFailed {
                expression, source, ..
            } => from(&[expression, &source.to_string()]),
        }
    }
}
