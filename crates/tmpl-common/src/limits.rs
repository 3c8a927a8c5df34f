//! Centralized limits for template expression parsing and evaluation.

/// Maximum number of postfix operations (`.key`, `["key"]`, `(...)`) in a single
/// member-access chain.
///
/// The evaluator walks chains recursively, so this also bounds its stack depth.
pub const MAX_ACCESS_CHAIN_LENGTH: usize = 128;

/// Maximum number of arguments accepted in a single call expression.
pub const MAX_CALL_ARGUMENTS: usize = 64;

/// Maximum nesting of parenthesized argument lists, e.g. `a.f(b.g(c.h()))`.
pub const MAX_EXPRESSION_DEPTH: u32 = 32;
