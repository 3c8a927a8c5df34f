//! Templates: literal text with `${expression}` interpolations.

use crate::ast::Expr;
use crate::error::TemplateError;
use crate::eval::{DataModel, Evaluator};
use crate::parser::parse_expression;
use tmpl_model::Value;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Part {
    Text(String),
    Interpolation(Expr),
}

/// A parsed template, reusable across renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    source: String,
    parts: Vec<Part>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut rest = 0usize;

        while let Some(found) = source[rest..].find("${") {
            let open = rest + found;
            if open > rest {
                parts.push(Part::Text(source[rest..open].to_string()));
            }
            let body_start = open + 2;
            let body_end = find_closing_brace(&source[body_start..])
                .map(|len| body_start + len)
                .ok_or_else(|| TemplateError::Syntax {
                    offset: to_offset(open),
                    message: "interpolation is missing its closing \"}\"".to_string(),
                })?;
            let expr = parse_expression(&source[body_start..body_end], to_offset(body_start))?;
            parts.push(Part::Interpolation(expr));
            rest = body_end + 1;
        }
        if rest < source.len() {
            parts.push(Part::Text(source[rest..].to_string()));
        }

        debug!(
            interpolations = parts
                .iter()
                .filter(|p| matches!(p, Part::Interpolation(_)))
                .count(),
            "parsed template"
        );
        Ok(Self {
            source: source.to_string(),
            parts,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Interpolated expressions, in source order.
    pub fn expressions(&self) -> impl Iterator<Item = &Expr> {
        self.parts.iter().filter_map(|part| match part {
            Part::Interpolation(expr) => Some(expr),
            Part::Text(_) => None,
        })
    }

    pub fn render(&self, evaluator: &Evaluator<'_>, data: &DataModel) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                Part::Text(text) => out.push_str(text),
                Part::Interpolation(expr) => {
                    let value = evaluator.evaluate(expr, data)?;
                    out.push_str(&interpolate(expr, &value)?);
                }
            }
        }
        Ok(out)
    }
}

fn interpolate(expr: &Expr, value: &Value) -> Result<String, TemplateError> {
    if let Value::Null = value {
        return Err(TemplateError::Undefined {
            expression: expr.to_string(),
            span: expr.span(),
        });
    }
    value.to_output().ok_or_else(|| TemplateError::NotStringifiable {
        expression: expr.to_string(),
        actual: value.describe(),
        span: expr.span(),
    })
}

/// Length of the interpolation body, skipping braces inside string literals.
fn find_closing_brace(body: &str) -> Option<usize> {
    let mut quote = None;
    let mut escaped = false;
    for (i, ch) in body.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if ch == '\\' => escaped = true,
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == '}' => return Some(i),
            None => {}
        }
    }
    None
}

fn to_offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../tests/template_tests.rs"]
mod tests;
