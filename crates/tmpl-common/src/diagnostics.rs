//! Diagnostic types and message lookup for template evaluation.
//!
//! Every error that reaches a template author is a `Diagnostic` built from one
//! of the message templates below. Templates use `{0}`, `{1}`, ... placeholders
//! that are filled in with `format_message`.

use core::fmt;
use serde::Serialize;

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Message = 2,
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const EXPECTED_METHOD: u32 = 1001;
    pub const EXPECTED_STRINGIFIABLE: u32 = 1002;
    pub const NULL_OR_MISSING: u32 = 1003;
    pub const EXPECTED_HASH: u32 = 1004;
    pub const CALL_FAILED: u32 = 1005;
    pub const SYNTAX_ERROR: u32 = 1006;
    pub const NESTING_TOO_DEEP: u32 = 1007;
    pub const MEMBER_READ_FAILED: u32 = 1008;
}

pub mod diagnostic_messages {
    pub const EXPECTED_METHOD: &str = "Expected a method, but this has evaluated to {0}: {1}";
    pub const EXPECTED_STRINGIFIABLE: &str = "Expected a string or something automatically convertible to string (number or boolean), but this has evaluated to {0}: {1}";
    pub const NULL_OR_MISSING: &str = "The following has evaluated to null or missing: {0}";
    pub const EXPECTED_HASH: &str = "Expected a hash, but this has evaluated to {0}: {1}";
    pub const CALL_FAILED: &str = "Call of {0} has failed: {1}";
    pub const SYNTAX_ERROR: &str = "Syntax error at offset {0}: {1}";
    pub const NESTING_TOO_DEEP: &str = "Expression nesting exceeds the limit of {0}";
    pub const MEMBER_READ_FAILED: &str = "Failed to read member \"{0}\": {1}";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_METHOD,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_METHOD,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_STRINGIFIABLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_STRINGIFIABLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NULL_OR_MISSING,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NULL_OR_MISSING,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_HASH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_HASH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CALL_FAILED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CALL_FAILED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::SYNTAX_ERROR,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::SYNTAX_ERROR,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NESTING_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NESTING_TOO_DEEP,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MEMBER_READ_FAILED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MEMBER_READ_FAILED,
    },
];

/// A template diagnostic with optional hints for the template author.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Byte offset of the offending expression in the template source.
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            start,
            length,
            message_text: message,
            hints: Vec::new(),
        }
    }

    /// Create an error diagnostic from a registered message code.
    ///
    /// Unknown codes fall back to the raw arguments joined by spaces.
    #[must_use]
    pub fn from_code(code: u32, start: u32, length: u32, args: &[&str]) -> Self {
        let message = match get_message_template(code) {
            Some(template) => format_message(template, args),
            None => args.join(" "),
        };
        Self::error(start, length, message, code)
    }

    /// Attach a hint for the template author.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[E{}] {}", self.code, self.message_text)?;
        for hint in &self.hints {
            write!(f, "\n----\nTip: {hint}")?;
        }
        Ok(())
    }
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
