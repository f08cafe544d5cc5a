use meml_ast::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    // punctuation
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    /// One or more line breaks, folded.
    Newline,
    /// String, number or identifier; classified at parse time.
    Atom,
}

impl TokKind {
    /// Source text of a structural kind. `Atom` has none.
    pub fn lexeme(self) -> Option<&'static str> {
        match self {
            TokKind::LBrace => Some("{"),
            TokKind::RBrace => Some("}"),
            TokKind::LBracket => Some("["),
            TokKind::RBracket => Some("]"),
            TokKind::Colon => Some(":"),
            TokKind::Newline => Some("\n"),
            TokKind::Atom => None,
        }
    }

    pub(crate) fn structural(c: char) -> Option<TokKind> {
        match c {
            '{' => Some(TokKind::LBrace),
            '}' => Some(TokKind::RBrace),
            '[' => Some(TokKind::LBracket),
            ']' => Some(TokKind::RBracket),
            ':' => Some(TokKind::Colon),
            '\n' => Some(TokKind::Newline),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.lexeme() {
            Some("\n") => f.write_str("newline"),
            Some(s) => write!(f, "'{}'", s),
            None => f.write_str("value"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tok {
    pub kind: TokKind,
    /// Raw lexeme as it appears in the source.
    pub text: String,
    pub span: Span,
}

impl Tok {
    /// Builds a token without position info, e.g. for driving the parser by hand.
    pub fn from_lexeme(text: &str) -> Tok {
        let mut chars = text.chars();
        let kind = match (chars.next(), chars.next()) {
            (Some(c), None) => TokKind::structural(c).unwrap_or(TokKind::Atom),
            _ => TokKind::Atom,
        };
        Tok {
            kind,
            text: text.to_string(),
            span: Span::default(),
        }
    }

    pub fn is(&self, kind: TokKind) -> bool {
        self.kind == kind
    }
}
