use super::*;

fn scan_all(text: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            return tokens;
        }
        tokens.push((kind, scanner.token_value().to_string()));
    }
}

#[test]
fn test_scans_member_access_chain() {
    let kinds: Vec<SyntaxKind> = scan_all(r#"point["x"].getX( 1, true )"#)
        .into_iter()
        .map(|(kind, _)| kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::StringLiteral,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::OpenParenToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::CommaToken,
            SyntaxKind::TrueKeyword,
            SyntaxKind::CloseParenToken,
        ]
    );
}

#[test]
fn test_string_escapes() {
    let tokens = scan_all(r#"'it\'s' "a\"b\n""#);
    assert_eq!(tokens[0], (SyntaxKind::StringLiteral, "it's".to_string()));
    assert_eq!(tokens[1], (SyntaxKind::StringLiteral, "a\"b\n".to_string()));
}

#[test]
fn test_unterminated_string() {
    let mut scanner = Scanner::new(r#""abc"#);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.is_unterminated());
}

#[test]
fn test_token_positions() {
    let mut scanner = Scanner::new("  ab . c");
    scanner.scan();
    assert_eq!((scanner.token_start(), scanner.token_end()), (2, 4));
    assert_eq!(scanner.token(), SyntaxKind::Identifier);
    scanner.scan();
    assert_eq!(scanner.token(), SyntaxKind::DotToken);
    assert_eq!(scanner.token_text(), ".");
    scanner.scan();
    assert_eq!(scanner.token_start(), 7);
}

#[test]
fn test_unknown_character() {
    let mut scanner = Scanner::new("a + b");
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.token_text(), "+");
}
