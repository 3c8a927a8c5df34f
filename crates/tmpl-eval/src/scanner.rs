//! Expression scanner.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Identifier,
    StringLiteral,
    NumericLiteral,
    TrueKeyword,
    FalseKeyword,
    DotToken,
    CommaToken,
    OpenBracketToken,
    CloseBracketToken,
    OpenParenToken,
    CloseParenToken,
    Unknown,
    EndOfFileToken,
}

impl SyntaxKind {
    /// Tokens that may follow `.` as a member name.
    pub fn is_identifier_or_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::Identifier | SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword
        )
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::NumericLiteral => "number",
            SyntaxKind::TrueKeyword => "\"true\"",
            SyntaxKind::FalseKeyword => "\"false\"",
            SyntaxKind::DotToken => "\".\"",
            SyntaxKind::CommaToken => "\",\"",
            SyntaxKind::OpenBracketToken => "\"[\"",
            SyntaxKind::CloseBracketToken => "\"]\"",
            SyntaxKind::OpenParenToken => "\"(\"",
            SyntaxKind::CloseParenToken => "\")\"",
            SyntaxKind::Unknown => "unexpected character",
            SyntaxKind::EndOfFileToken => "end of expression",
        };
        f.write_str(text)
    }
}

/// Single-pass scanner over one expression.
///
/// Positions are byte offsets into the scanned text; the parser adds the
/// offset of the expression inside its template.
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    unterminated: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            unterminated: false,
        }
    }

    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    pub fn token_start(&self) -> usize {
        self.token_start
    }

    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Identifier text, or the unescaped contents of a string literal.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    pub fn token_text(&self) -> &'a str {
        &self.text[self.token_start..self.pos]
    }

    /// Whether the current string literal ran into the end of the text.
    pub fn is_unterminated(&self) -> bool {
        self.unterminated
    }

    pub fn scan(&mut self) -> SyntaxKind {
        self.token_value.clear();
        self.unterminated = false;
        self.skip_whitespace();
        self.token_start = self.pos;

        let Some(ch) = self.peek() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '.' => self.single(SyntaxKind::DotToken),
            ',' => self.single(SyntaxKind::CommaToken),
            '[' => self.single(SyntaxKind::OpenBracketToken),
            ']' => self.single(SyntaxKind::CloseBracketToken),
            '(' => self.single(SyntaxKind::OpenParenToken),
            ')' => self.single(SyntaxKind::CloseParenToken),
            '"' | '\'' => self.scan_string(ch),
            '0'..='9' => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            c => {
                self.pos += c.len_utf8();
                SyntaxKind::Unknown
            }
        };
        self.token
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        while let Some(ch) = self.peek() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.token_value.push_str(&self.text[self.token_start..self.pos]);
        match self.token_value.as_str() {
            "true" => SyntaxKind::TrueKeyword,
            "false" => SyntaxKind::FalseKeyword,
            _ => SyntaxKind::Identifier,
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.pos += 1;
        }
        self.token_value.push_str(&self.text[self.token_start..self.pos]);
        SyntaxKind::NumericLiteral
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        loop {
            let Some(ch) = self.peek() else {
                self.unterminated = true;
                return SyntaxKind::StringLiteral;
            };
            self.pos += ch.len_utf8();
            match ch {
                c if c == quote => return SyntaxKind::StringLiteral,
                '\\' => {
                    let Some(escaped) = self.peek() else {
                        self.unterminated = true;
                        return SyntaxKind::StringLiteral;
                    };
                    self.pos += escaped.len_utf8();
                    self.token_value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                }
                c => self.token_value.push(c),
            }
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
