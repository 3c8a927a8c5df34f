//! Expression parser.
//!
//! ```text
//! expression := primary postfix*
//! primary    := identifier | string | integer | "true" | "false"
//! postfix    := "." identifier | "[" string "]" | "(" arguments? ")"
//! arguments  := expression ("," expression)*
//! ```

use crate::ast::{Expr, Literal, Span};
use crate::error::TemplateError;
use crate::scanner::{Scanner, SyntaxKind};
use tmpl_common::limits::{MAX_ACCESS_CHAIN_LENGTH, MAX_CALL_ARGUMENTS, MAX_EXPRESSION_DEPTH};

/// Parse a complete expression. `base_offset` is the position of `text` in
/// its template and is added to every span.
pub fn parse_expression(text: &str, base_offset: u32) -> Result<Expr, TemplateError> {
    let mut parser = ParserState::new(text, base_offset);
    parser.next_token();
    let expr = parser.parse_expression()?;
    if parser.current_token != SyntaxKind::EndOfFileToken {
        return Err(parser.unexpected_token("end of expression"));
    }
    Ok(expr)
}

struct ParserState<'a> {
    scanner: Scanner<'a>,
    current_token: SyntaxKind,
    base_offset: u32,
    depth: u32,
}

impl<'a> ParserState<'a> {
    fn new(text: &'a str, base_offset: u32) -> Self {
        Self {
            scanner: Scanner::new(text),
            current_token: SyntaxKind::Unknown,
            base_offset,
            depth: 0,
        }
    }

    fn next_token(&mut self) -> SyntaxKind {
        self.current_token = self.scanner.scan();
        self.current_token
    }

    fn offset(&self, pos: usize) -> u32 {
        self.base_offset
            .saturating_add(u32::try_from(pos).unwrap_or(u32::MAX))
    }

    fn token_start(&self) -> u32 {
        self.offset(self.scanner.token_start())
    }

    fn token_end(&self) -> u32 {
        self.offset(self.scanner.token_end())
    }

    fn error_here(&self, message: impl Into<String>) -> TemplateError {
        TemplateError::Syntax {
            offset: self.token_start(),
            message: message.into(),
        }
    }

    fn unexpected_token(&self, expected: &str) -> TemplateError {
        if self.current_token == SyntaxKind::StringLiteral && self.scanner.is_unterminated() {
            return self.error_here("unterminated string literal");
        }
        let found = match self.current_token {
            SyntaxKind::Unknown => format!("unexpected character {:?}", self.scanner.token_text()),
            SyntaxKind::EndOfFileToken => "unexpected end of expression".to_string(),
            other => format!("unexpected {other}"),
        };
        self.error_here(format!("{found}, expected {expected}"))
    }

    fn parse_expected(&mut self, kind: SyntaxKind) -> Result<(), TemplateError> {
        if self.current_token != kind {
            return Err(self.unexpected_token(&kind.to_string()));
        }
        self.next_token();
        Ok(())
    }

    fn parse_expression(&mut self) -> Result<Expr, TemplateError> {
        let mut expr = self.parse_primary()?;
        let mut chain_length = 0usize;
        loop {
            let postfix = matches!(
                self.current_token,
                SyntaxKind::DotToken | SyntaxKind::OpenBracketToken | SyntaxKind::OpenParenToken
            );
            if !postfix {
                return Ok(expr);
            }
            chain_length += 1;
            if chain_length > MAX_ACCESS_CHAIN_LENGTH {
                return Err(TemplateError::NestingTooDeep {
                    offset: self.token_start(),
                    limit: MAX_ACCESS_CHAIN_LENGTH,
                });
            }
            expr = match self.current_token {
                SyntaxKind::DotToken => self.parse_property_access(expr)?,
                SyntaxKind::OpenBracketToken => self.parse_element_access(expr)?,
                _ => self.parse_call(expr)?,
            };
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, TemplateError> {
        let span = Span::new(self.token_start(), self.token_end() - self.token_start());
        let expr = match self.current_token {
            SyntaxKind::Identifier => Expr::Variable {
                name: self.scanner.token_value().into(),
                span,
            },
            SyntaxKind::StringLiteral if !self.scanner.is_unterminated() => Expr::Literal {
                value: Literal::Str(self.scanner.token_value().into()),
                span,
            },
            SyntaxKind::NumericLiteral => {
                let value = self
                    .scanner
                    .token_value()
                    .parse::<i64>()
                    .map_err(|_| self.error_here("integer literal is out of range"))?;
                Expr::Literal {
                    value: Literal::Int(value),
                    span,
                }
            }
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => Expr::Literal {
                value: Literal::Bool(self.current_token == SyntaxKind::TrueKeyword),
                span,
            },
            _ => return Err(self.unexpected_token("an expression")),
        };
        self.next_token();
        Ok(expr)
    }

    /// `target.key`
    fn parse_property_access(&mut self, target: Expr) -> Result<Expr, TemplateError> {
        self.next_token();
        if !self.current_token.is_identifier_or_keyword() {
            return Err(self.unexpected_token("a member name"));
        }
        let key = self.scanner.token_value().into();
        let span = target.span().to(self.token_end());
        self.next_token();
        Ok(Expr::Member {
            target: Box::new(target),
            key,
            bracket: false,
            span,
        })
    }

    /// `target["key"]`
    fn parse_element_access(&mut self, target: Expr) -> Result<Expr, TemplateError> {
        self.next_token();
        if self.current_token != SyntaxKind::StringLiteral || self.scanner.is_unterminated() {
            return Err(self.unexpected_token("a string key"));
        }
        let key = self.scanner.token_value().into();
        self.next_token();
        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseBracketToken)?;
        Ok(Expr::Member {
            span: target.span().to(end),
            target: Box::new(target),
            key,
            bracket: true,
        })
    }

    /// `callee(args)`
    fn parse_call(&mut self, callee: Expr) -> Result<Expr, TemplateError> {
        let open = self.token_start();
        self.depth += 1;
        if self.depth > MAX_EXPRESSION_DEPTH {
            return Err(TemplateError::NestingTooDeep {
                offset: open,
                limit: MAX_EXPRESSION_DEPTH as usize,
            });
        }
        self.next_token();

        let mut args = Vec::new();
        if self.current_token != SyntaxKind::CloseParenToken {
            loop {
                if args.len() == MAX_CALL_ARGUMENTS {
                    return Err(self.error_here(format!(
                        "too many arguments, at most {MAX_CALL_ARGUMENTS} are allowed"
                    )));
                }
                args.push(self.parse_expression()?);
                if self.current_token != SyntaxKind::CommaToken {
                    break;
                }
                self.next_token();
            }
        }

        let end = self.token_end();
        self.parse_expected(SyntaxKind::CloseParenToken)?;
        self.depth -= 1;
        Ok(Expr::Call {
            span: callee.span().to(end),
            callee: Box::new(callee),
            args,
        })
    }
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod tests;
