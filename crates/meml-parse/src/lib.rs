#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod error;
mod lexer;
mod parser;
mod scalar;
mod token;

pub use error::ParseError;
pub use lexer::{lexemes, tokenize, Lexer};
pub use parser::{ParseOptions, Parser, DEFAULT_MAX_DEPTH};
pub use scalar::coerce_scalar;
pub use token::{Tok, TokKind};

use meml_ast::value::Dict;
use tracing::debug;

/// Parses a document whose outermost syntax is a `{ ... }` mapping.
///
/// Positions in errors are `u32` byte offsets; inputs of 4 GiB or more
/// still parse, but offsets beyond that saturate at `u32::MAX`.
pub fn parse_str(src: &str) -> Result<Dict, ParseError> {
    parse_str_with(src, &ParseOptions::default())
}

pub fn parse_str_with(src: &str, opts: &ParseOptions) -> Result<Dict, ParseError> {
    let toks = tokenize(src);
    debug!(bytes = src.len(), tokens = toks.len(), "parsing document");
    let dict = Parser::with_options(&toks, *opts).parse()?;
    debug!(entries = dict.len(), "parsed document");
    Ok(dict)
}

/// Encloses bare top-level entries in a root mapping.
pub fn wrap(src: &str) -> String {
    format!("{{\n{}\n}}", src)
}

/// Parses bare top-level entries, i.e. `parse_str(&wrap(src))`.
pub fn parse_document(src: &str) -> Result<Dict, ParseError> {
    parse_str(&wrap(src))
}
