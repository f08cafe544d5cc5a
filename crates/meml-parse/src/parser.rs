use crate::error::ParseError;
use crate::scalar::coerce_scalar;
use crate::token::{Tok, TokKind};
use meml_ast::span::Span;
use meml_ast::value::{Dict, List, Tuple, Value};
use tracing::debug;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Rows inside dicts and lists end at a newline (or end of input).
const ROW_END: &[TokKind] = &[TokKind::Newline];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting of dicts and lists, the root dict counting as 1.
    pub max_depth: usize,
    /// Fail on tokens after the root dict instead of ignoring them.
    pub reject_trailing: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_trailing: false,
        }
    }
}

/// Single-lookahead recursive descent over a fully lexed token slice.
/// The cursor only moves forward.
pub struct Parser<'t> {
    toks: &'t [Tok],
    pos: usize,
    depth: usize,
    opts: ParseOptions,
}

impl<'t> Parser<'t> {
    pub fn new(toks: &'t [Tok]) -> Self {
        Self::with_options(toks, ParseOptions::default())
    }

    pub fn with_options(toks: &'t [Tok], opts: ParseOptions) -> Self {
        Self {
            toks,
            pos: 0,
            depth: 0,
            opts,
        }
    }

    /// Token under the cursor, `None` past the end.
    pub fn current(&self) -> Option<&'t Tok> {
        self.toks.get(self.pos)
    }

    /// Returns the current token and advances. With `expected`, a token of
    /// another kind (or end of input) is a mismatch and nothing is consumed.
    pub fn consume(&mut self, expected: Option<TokKind>) -> Result<Option<&'t Tok>, ParseError> {
        match expected {
            Some(kind) => self.expect(kind).map(Some),
            None => {
                let tok = self.current();
                if tok.is_some() {
                    self.pos += 1;
                }
                Ok(tok)
            }
        }
    }

    fn expect(&mut self, kind: TokKind) -> Result<&'t Tok, ParseError> {
        match self.current() {
            Some(tok) if tok.is(kind) => {
                self.pos += 1;
                Ok(tok)
            }
            other => Err(ParseError::Mismatch {
                expected: kind,
                found: other.map(|t| t.text.clone()),
                span: other.map(|t| t.span),
            }),
        }
    }

    fn enter(&mut self, span: Span) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.opts.max_depth {
            return Err(ParseError::DepthLimitExceeded {
                depth: self.opts.max_depth,
                span,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parses the root dict. Whatever follows its closing brace is left unread,
    /// unless `reject_trailing` is set; then only a single newline may follow.
    pub fn parse(&mut self) -> Result<Dict, ParseError> {
        let dict = self.parse_dict()?;
        if !self.opts.reject_trailing {
            return Ok(dict);
        }
        if matches!(self.current(), Some(t) if t.is(TokKind::Newline)) {
            self.pos += 1;
        }
        if let Some(tok) = self.current() {
            return Err(ParseError::TrailingInput {
                lexeme: tok.text.clone(),
                span: tok.span,
            });
        }
        Ok(dict)
    }

    /// `'{' NL (key ':' tuple NL)* '}'`. Any token is accepted as a key, verbatim.
    pub fn parse_dict(&mut self) -> Result<Dict, ParseError> {
        let open = self.expect(TokKind::LBrace)?;
        self.enter(open.span)?;
        self.expect(TokKind::Newline)?;

        let mut dict = Dict::new();
        while let Some(key) = self.current() {
            if key.is(TokKind::RBrace) {
                break;
            }
            self.pos += 1;
            self.expect(TokKind::Colon)?;
            let tuple = self.parse_tuple(ROW_END)?;
            if dict.contains_key(&key.text) {
                debug!(key = %key.text, start = key.span.start, "duplicate key, later value wins");
            }
            dict.insert(key.text.clone(), tuple);
            self.expect(TokKind::Newline)?;
        }

        self.expect(TokKind::RBrace)?;
        self.leave();
        Ok(dict)
    }

    /// `'[' NL (tuple NL)* ']'`
    pub fn parse_list(&mut self) -> Result<List, ParseError> {
        let open = self.expect(TokKind::LBracket)?;
        self.enter(open.span)?;
        self.expect(TokKind::Newline)?;

        let mut rows = List::new();
        while let Some(tok) = self.current() {
            if tok.is(TokKind::RBracket) {
                break;
            }
            rows.push(self.parse_tuple(ROW_END)?);
            self.expect(TokKind::Newline)?;
        }

        self.expect(TokKind::RBracket)?;
        self.leave();
        Ok(rows)
    }

    /// Zero or more values up to end of input, a `:`, or any kind in `until`.
    pub fn parse_tuple(&mut self, until: &[TokKind]) -> Result<Tuple, ParseError> {
        let mut values = Tuple::new();
        while let Some(tok) = self.current() {
            if tok.is(TokKind::Colon) || until.contains(&tok.kind) {
                break;
            }
            let value = match tok.kind {
                TokKind::LBrace => Value::Dict(self.parse_dict()?),
                TokKind::LBracket => Value::List(self.parse_list()?),
                _ => {
                    self.pos += 1;
                    coerce_scalar(tok)?
                }
            };
            values.push(value);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(lexemes: &[&str]) -> Vec<Tok> {
        lexemes.iter().map(|s| Tok::from_lexeme(s)).collect()
    }

    #[test]
    fn current_and_consume_walk_forward() {
        let ts = toks(&["{", "\n"]);
        let mut p = Parser::new(&ts);
        assert_eq!(p.current().map(|t| t.text.as_str()), Some("{"));
        assert_eq!(p.consume(None).unwrap().map(|t| t.kind), Some(TokKind::LBrace));
        assert_eq!(p.consume(Some(TokKind::Newline)).unwrap().map(|t| t.kind), Some(TokKind::Newline));
        assert!(p.current().is_none());
        assert_eq!(p.consume(None).unwrap(), None);
    }

    #[test]
    fn consume_with_wrong_kind_does_not_advance() {
        let ts = toks(&["a"]);
        let mut p = Parser::new(&ts);
        let err = p.consume(Some(TokKind::Colon)).unwrap_err();
        assert_eq!(
            err,
            ParseError::Mismatch {
                expected: TokKind::Colon,
                found: Some("a".into()),
                span: Some(Span::default()),
            }
        );
        assert_eq!(p.current().map(|t| t.text.as_str()), Some("a"));
    }

    #[test]
    fn tuple_stops_at_colon_and_stop_set() {
        let ts = toks(&["1", "x", ":", "2"]);
        let mut p = Parser::new(&ts);
        assert_eq!(
            p.parse_tuple(ROW_END).unwrap(),
            vec![Value::Integer(1), Value::keyword("x")]
        );
        assert_eq!(p.current().map(|t| t.kind), Some(TokKind::Colon));

        let ts = toks(&["1", "\n", "2"]);
        let mut p = Parser::new(&ts);
        assert_eq!(p.parse_tuple(ROW_END).unwrap(), vec![Value::Integer(1)]);
    }

    #[test]
    fn empty_tuple_at_newline() {
        let ts = toks(&["\n"]);
        let mut p = Parser::new(&ts);
        assert_eq!(p.parse_tuple(ROW_END).unwrap(), Tuple::new());
        assert_eq!(p.current().map(|t| t.kind), Some(TokKind::Newline));
    }

    #[test]
    fn dict_from_hand_built_tokens() {
        let ts = toks(&["{", "\n", "a", ":", "1", "\n", "b", ":", "\n", "}"]);
        let dict = Parser::new(&ts).parse().unwrap();
        assert_eq!(dict["a"], vec![Value::Integer(1)]);
        assert_eq!(dict["b"], Tuple::new());
    }

    #[test]
    fn list_rows_are_tuples() {
        let ts = toks(&["[", "\n", "1", "2", "\n", "{", "\n", "}", "\n", "]"]);
        let list = Parser::new(&ts).parse_list().unwrap();
        assert_eq!(
            list,
            vec![
                vec![Value::Integer(1), Value::Integer(2)],
                vec![Value::Dict(Dict::new())],
            ]
        );
    }

    #[test]
    fn closing_brace_inside_row_is_not_a_value() {
        let ts = toks(&["{", "\n", "a", ":", "1", "}"]);
        let err = Parser::new(&ts).parse().unwrap_err();
        assert!(matches!(err, ParseError::InvalidScalar { ref lexeme, .. } if lexeme == "}"));
    }

    #[test]
    fn depth_limit_applies_to_root() {
        let ts = toks(&["{", "\n", "}"]);
        let opts = ParseOptions {
            max_depth: 0,
            ..ParseOptions::default()
        };
        let err = Parser::with_options(&ts, opts).parse().unwrap_err();
        assert!(matches!(err, ParseError::DepthLimitExceeded { depth: 0, .. }));
    }

    #[test]
    fn trailing_tokens_after_root_are_ignored() {
        let ts = toks(&["{", "\n", "a", ":", "1", "\n", "}", "\n", "}"]);
        let mut p = Parser::new(&ts);
        let dict = p.parse().unwrap();
        assert_eq!(dict["a"], vec![Value::Integer(1)]);
        assert_eq!(p.current().map(|t| t.kind), Some(TokKind::Newline));
    }

    #[test]
    fn trailing_tokens_rejected_on_request() {
        let opts = ParseOptions {
            reject_trailing: true,
            ..ParseOptions::default()
        };
        let ts = toks(&["{", "\n", "}", "\n"]);
        assert!(Parser::with_options(&ts, opts).parse().is_ok());

        let ts = toks(&["{", "\n", "}", "x"]);
        let err = Parser::with_options(&ts, opts).parse().unwrap_err();
        assert!(matches!(err, ParseError::TrailingInput { ref lexeme, .. } if lexeme == "x"));
    }
}
