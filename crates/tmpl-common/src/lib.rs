//! Common types and utilities for the tmpl template runtime.
//!
//! This crate provides foundational types used across all tmpl crates:
//! - Diagnostics reported to template authors (`Diagnostic`, message table)
//! - Evaluator limits and thresholds

// Diagnostics - user-facing template errors
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, diagnostic_messages,
    format_message,
};

// Centralized limits and thresholds
pub mod limits;
