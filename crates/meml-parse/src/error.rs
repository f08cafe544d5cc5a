use crate::token::TokKind;
use meml_ast::span::Span;

/// Every variant aborts the parse; no partial tree is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A required delimiter was not the token actually present.
    /// `found == None` means the input ended.
    Mismatch {
        expected: TokKind,
        found: Option<String>,
        span: Option<Span>,
    },
    /// A lexeme in value position that is not a string, number or identifier.
    InvalidScalar { lexeme: String, span: Span },
    /// Integer literal outside the `i64` range.
    NumberOutOfRange { lexeme: String, span: Span },
    /// Dicts and lists nested deeper than `ParseOptions::max_depth`.
    DepthLimitExceeded { depth: usize, span: Span },
    /// Tokens left over after the root dict closed.
    TrailingInput { lexeme: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Mismatch { span, .. } => *span,
            ParseError::InvalidScalar { span, .. }
            | ParseError::NumberOutOfRange { span, .. }
            | ParseError::DepthLimitExceeded { span, .. }
            | ParseError::TrailingInput { span, .. } => Some(*span),
        }
    }
}

fn show(lexeme: &str) -> String {
    if lexeme == "\n" {
        "newline".to_string()
    } else {
        format!("'{}'", lexeme)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ParseError::Mismatch {
                expected,
                found: Some(found),
                span,
            } => {
                write!(f, "expected {}, found {}", expected, show(found))?;
                if let Some(span) = span {
                    write!(f, " at {}..{}", span.start, span.end)?;
                }
                Ok(())
            }
            ParseError::Mismatch {
                expected,
                found: None,
                ..
            } => write!(f, "expected {}, found end of input", expected),
            ParseError::InvalidScalar { lexeme, span } => write!(
                f,
                "invalid value {} at {}..{}",
                show(lexeme),
                span.start,
                span.end
            ),
            ParseError::NumberOutOfRange { lexeme, span } => write!(
                f,
                "integer literal out of range '{}' at {}..{}",
                lexeme, span.start, span.end
            ),
            ParseError::DepthLimitExceeded { depth, span } => write!(
                f,
                "nesting depth limit of {} exceeded at {}..{}",
                depth, span.start, span.end
            ),
            ParseError::TrailingInput { lexeme, span } => write!(
                f,
                "unexpected {} after end of document at {}..{}",
                show(lexeme),
                span.start,
                span.end
            ),
        }
    }
}

impl std::error::Error for ParseError {}
