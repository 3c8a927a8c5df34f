use super::*;

fn parse(text: &str) -> Expr {
    parse_expression(text, 0).expect("valid expression")
}

fn syntax_error(text: &str) -> String {
    match parse_expression(text, 0) {
        Err(TemplateError::Syntax { message, .. }) => message,
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_member_access_and_calls() {
    let expr = parse("point.getX()");
    let Expr::Call { callee, args, span } = &expr else {
        panic!("expected a call, got {expr:?}");
    };
    assert!(args.is_empty());
    assert_eq!(*span, Span::new(0, 12));
    let Expr::Member {
        target,
        key,
        bracket,
        span,
    } = &**callee
    else {
        panic!("expected a member access");
    };
    assert_eq!(&**key, "getX");
    assert!(!bracket);
    assert_eq!(*span, Span::new(0, 10));
    assert!(matches!(&**target, Expr::Variable { name, .. } if &**name == "point"));
}

#[test]
fn test_bracket_access() {
    let expr = parse(r#"user["first name"]"#);
    assert!(matches!(
        &expr,
        Expr::Member { key, bracket: true, span, .. }
            if &**key == "first name" && *span == Span::new(0, 18)
    ));
}

#[test]
fn test_call_arguments() {
    let expr = parse(r#"point.scale(2, "a", false, other.x)"#);
    let Expr::Call { args, .. } = &expr else {
        panic!("expected a call");
    };
    assert_eq!(args.len(), 4);
    assert_eq!(args[0], Expr::Literal {
        value: Literal::Int(2),
        span: Span::new(12, 1),
    });
    assert!(matches!(&args[3], Expr::Member { .. }));
}

#[test]
fn test_display_is_canonical_source() {
    assert_eq!(parse("a . b ( 1 ,'x' )").to_string(), r#"a.b(1, "x")"#);
    assert_eq!(parse(r#"a["b c"]()"#).to_string(), r#"a["b c"]()"#);
}

#[test]
fn test_keywords_are_valid_member_names() {
    assert!(matches!(parse("flags.true"), Expr::Member { key, .. } if &*key == "true"));
}

#[test]
fn test_base_offset_shifts_spans() {
    let expr = parse_expression("a.b", 10).expect("valid");
    assert_eq!(expr.span(), Span::new(10, 3));
    assert_eq!(expr.span().end(), 13);
}

#[test]
fn test_syntax_errors() {
    assert_eq!(
        syntax_error("a.b c"),
        "unexpected identifier, expected end of expression"
    );
    assert_eq!(
        syntax_error("a."),
        "unexpected end of expression, expected a member name"
    );
    assert_eq!(
        syntax_error("a[b]"),
        "unexpected identifier, expected a string key"
    );
    assert_eq!(syntax_error(r#"a["b"#), "unterminated string literal");
    assert_eq!(
        syntax_error("a(1"),
        "unexpected end of expression, expected \")\""
    );
    assert_eq!(
        syntax_error("a + b"),
        "unexpected character \"+\", expected end of expression"
    );
    assert_eq!(
        syntax_error("99999999999999999999"),
        "integer literal is out of range"
    );
}

#[test]
fn test_error_offset() {
    let Err(TemplateError::Syntax { offset, .. }) = parse_expression("a.b c", 5) else {
        panic!("expected a syntax error");
    };
    assert_eq!(offset, 9);
}

#[test]
fn test_call_nesting_limit() {
    let depth = MAX_EXPRESSION_DEPTH as usize;
    let ok = format!("{}1{}", "f(".repeat(depth), ")".repeat(depth));
    assert!(parse_expression(&ok, 0).is_ok());

    let too_deep = format!("{}1{}", "f(".repeat(depth + 1), ")".repeat(depth + 1));
    assert!(matches!(
        parse_expression(&too_deep, 0),
        Err(TemplateError::NestingTooDeep { .. })
    ));
}

#[test]
fn test_access_chain_limit() {
    let ok = format!("a{}", ".b".repeat(MAX_ACCESS_CHAIN_LENGTH));
    assert!(parse_expression(&ok, 0).is_ok());

    let too_long = format!("a{}", ".b".repeat(MAX_ACCESS_CHAIN_LENGTH + 1));
    assert_eq!(
        parse_expression(&too_long, 0),
        Err(TemplateError::NestingTooDeep {
            offset: 1 + 2 * MAX_ACCESS_CHAIN_LENGTH as u32,
            limit: MAX_ACCESS_CHAIN_LENGTH,
        })
    );
}

#[test]
fn test_argument_limit() {
    let args = vec!["1"; MAX_CALL_ARGUMENTS + 1].join(", ");
    let message = syntax_error(&format!("f({args})"));
    assert!(message.starts_with("too many arguments"), "{message}");
}
