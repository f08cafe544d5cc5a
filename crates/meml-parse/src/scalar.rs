use crate::error::ParseError;
use crate::token::Tok;
use meml_ast::value::Value;

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(&['+', '-'][..]).unwrap_or(s)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_integer(s: &str) -> bool {
    all_digits(strip_sign(s))
}

fn is_float(s: &str) -> bool {
    match strip_sign(s).split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => false,
    }
}

fn is_ident(s: &str) -> bool {
    let mut bytes = s.bytes();
    matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Interior of a `q`-quoted lexeme. The quote may appear inside only when
/// escaped; escapes are returned untouched.
fn quoted_interior(s: &str, q: char) -> Option<&str> {
    let inner = s.strip_prefix(q)?.strip_suffix(q)?;
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                None | Some('\n') => return None,
                Some(_) => {}
            },
            c if c == q => return None,
            _ => {}
        }
    }
    Some(inner)
}

/// Classifies one atom lexeme: quoted string, float, integer, then keyword.
pub fn coerce_scalar(tok: &Tok) -> Result<Value, ParseError> {
    let text = tok.text.as_str();
    let invalid = || ParseError::InvalidScalar {
        lexeme: tok.text.clone(),
        span: tok.span,
    };

    if let Some(inner) = quoted_interior(text, '"').or_else(|| quoted_interior(text, '\'')) {
        return Ok(Value::String(inner.to_string()));
    }
    if is_float(text) {
        return text.parse().map(Value::Float).map_err(|_| invalid());
    }
    if is_integer(text) {
        return text
            .parse()
            .map(Value::Integer)
            .map_err(|_| ParseError::NumberOutOfRange {
                lexeme: tok.text.clone(),
                span: tok.span,
            });
    }
    if is_ident(text) {
        return Ok(Value::Keyword(tok.text.clone()));
    }
    Err(invalid())
}
