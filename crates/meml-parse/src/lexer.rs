use crate::token::{Tok, TokKind};
use meml_ast::span::Span;
use tracing::{debug, trace};

/// Ordered-choice scanner. At each position the first matching class wins:
/// newline run, then (after blanks) comment, punctuation, double-quoted string,
/// single-quoted string, float, integer, identifier. Anything else is skipped.
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    after_newline: bool,
    skipped: Option<(usize, usize)>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            after_newline: false,
            skipped: None,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn byte_at(&self, i: usize) -> Option<u8> {
        self.bytes().get(i).copied()
    }

    fn char_len_at(&self, i: usize) -> usize {
        self.src[i..].chars().next().map_or(1, char::len_utf8)
    }

    fn tok(&mut self, kind: TokKind, start: usize, end: usize) -> Tok {
        self.flush_skipped();
        self.after_newline = kind == TokKind::Newline;
        self.pos = end;
        Tok {
            kind,
            text: self.src[start..end].to_string(),
            span: Span::new(start, end),
        }
    }

    fn note_skipped(&mut self, start: usize, end: usize) {
        match &mut self.skipped {
            Some((_, run_end)) if *run_end == start => *run_end = end,
            _ => {
                self.flush_skipped();
                self.skipped = Some((start, end));
            }
        }
    }

    fn flush_skipped(&mut self) {
        if let Some((start, end)) = self.skipped.take() {
            let text = &self.src[start..end];
            debug!(start, end, text, "skipped unrecognized input");
        }
    }

    /// Index of the last `\n` in the run of spaces/tabs/newlines at the cursor.
    fn newline_run(&self) -> Option<usize> {
        let mut last = None;
        let mut i = self.pos;
        while let Some(b) = self.byte_at(i) {
            match b {
                b'\n' => last = Some(i),
                b' ' | b'\t' => {}
                _ => break,
            }
            i += 1;
        }
        last
    }

    fn skip_blanks(&mut self) {
        while matches!(self.byte_at(self.pos), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }

    fn comment_end(&self, start: usize) -> Option<usize> {
        if self.byte_at(start) != Some(b'#') {
            return None;
        }
        let rest = &self.bytes()[start..];
        Some(start + rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len()))
    }

    /// `q`-quoted string where a backslash escapes any character but a newline.
    fn quoted_end(&self, start: usize, q: u8) -> Option<usize> {
        if self.byte_at(start) != Some(q) {
            return None;
        }
        let mut i = start + 1;
        loop {
            match self.byte_at(i)? {
                b if b == q => return Some(i + 1),
                b'\\' => match self.byte_at(i + 1)? {
                    b'\n' => return None,
                    _ => i += 1 + self.char_len_at(i + 1),
                },
                _ => i += 1,
            }
        }
    }

    fn digits_end(&self, start: usize) -> Option<usize> {
        let mut i = start;
        while matches!(self.byte_at(i), Some(b) if b.is_ascii_digit()) {
            i += 1;
        }
        (i > start).then_some(i)
    }

    /// Signed float (`1.5`, digits required on both sides) or integer.
    fn number_end(&self, start: usize) -> Option<usize> {
        let mut i = start;
        if matches!(self.byte_at(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let int_end = self.digits_end(i)?;
        if self.byte_at(int_end) == Some(b'.') {
            if let Some(frac_end) = self.digits_end(int_end + 1) {
                return Some(frac_end);
            }
        }
        Some(int_end)
    }

    fn ident_end(&self, start: usize) -> Option<usize> {
        match self.byte_at(start) {
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => {}
            _ => return None,
        }
        let mut i = start + 1;
        while matches!(self.byte_at(i), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            i += 1;
        }
        Some(i)
    }

    /// Next token, or `None` at end of input. Consecutive newlines fold into one.
    pub fn next_tok(&mut self) -> Option<Tok> {
        loop {
            if let Some(nl) = self.newline_run() {
                if self.after_newline {
                    self.pos = nl + 1;
                    continue;
                }
                return Some(self.tok(TokKind::Newline, nl, nl + 1));
            }

            self.skip_blanks();
            let start = self.pos;
            let Some(b) = self.byte_at(start) else {
                self.flush_skipped();
                return None;
            };

            if let Some(end) = self.comment_end(start) {
                self.pos = end;
                continue;
            }
            if let Some(kind) = TokKind::structural(b as char) {
                return Some(self.tok(kind, start, start + 1));
            }
            let end = self
                .quoted_end(start, b'"')
                .or_else(|| self.quoted_end(start, b'\''))
                .or_else(|| self.number_end(start))
                .or_else(|| self.ident_end(start));
            if let Some(end) = end {
                return Some(self.tok(TokKind::Atom, start, end));
            }

            let end = start + self.char_len_at(start);
            self.note_skipped(start, end);
            self.pos = end;
        }
    }
}

/// Lexes the whole input up front.
pub fn tokenize(src: &str) -> Vec<Tok> {
    let mut lex = Lexer::new(src);
    let toks: Vec<Tok> = std::iter::from_fn(|| lex.next_tok()).collect();
    trace!(count = toks.len(), "tokenized");
    toks
}

/// Raw lexemes only, structural tokens included as their literal text.
pub fn lexemes(src: &str) -> Vec<String> {
    tokenize(src).into_iter().map(|t| t.text).collect()
}
