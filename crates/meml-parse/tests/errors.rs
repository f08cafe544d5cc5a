use meml_parse::{parse_document, parse_str, ParseError, TokKind};

#[test]
fn missing_closing_brace_names_it() {
    let err = parse_str("{\na: 1\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::Mismatch {
            expected: TokKind::RBrace,
            found: None,
            span: None,
        }
    );
    assert_eq!(err.to_string(), "expected '}', found end of input");
}

#[test]
fn missing_newline_after_open_brace() {
    let err = parse_str("{}").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Mismatch { expected: TokKind::Newline, found: Some(ref f), .. } if f == "}"
    ));
    assert!(err.to_string().contains("expected newline, found '}'"));
}

#[test]
fn missing_colon_after_key() {
    let err = parse_document("name \"Adam\"").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Mismatch { expected: TokKind::Colon, found: Some(ref f), .. } if f == "\"Adam\""
    ));
}

#[test]
fn last_entry_without_newline_before_brace() {
    let err = parse_str("{\na: 1}").unwrap_err();
    assert!(matches!(err, ParseError::InvalidScalar { ref lexeme, .. } if lexeme == "}"));
}

#[test]
fn unclosed_list() {
    let err = parse_document("xs: [\n1\n").unwrap_err();
    // the wrapper's closing brace shows up where a list row was expected
    assert!(matches!(err, ParseError::InvalidScalar { ref lexeme, .. } if lexeme == "}"));
}

#[test]
fn document_must_start_with_brace() {
    let err = parse_str("a: 1\n").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Mismatch { expected: TokKind::LBrace, found: Some(ref f), .. } if f == "a"
    ));
}

#[test]
fn already_wrapped_text_cannot_be_wrapped_again() {
    assert!(parse_document("{\na: 1\n}").is_err());
}

#[test]
fn errors_carry_spans() {
    let err = parse_str("{\na 1\n}").unwrap_err();
    let span = err.span().expect("span");
    assert_eq!((span.start, span.end), (4, 5));
    assert_eq!(err.to_string(), "expected ':', found '1' at 4..5");
}
