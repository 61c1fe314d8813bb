//! Term lexer for the interior of one parenthesized group.
//!
//! The interior is a run of signed terms with no separators, e.g. `9+i-j` or
//! `-3.4j+k`. Each term is an optional sign, an optional magnitude (digits and
//! dots) and an optional basis letter; the lexer reads the longest such term at
//! every position. A position where no term starts holds a character the
//! grammar has no place for: it is skipped and its span recorded in
//! [`Lexed::dropped`] so callers can decide whether that is acceptable.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::algebra::{Basis, Sign};
use crate::syntax::Span;

/// One signed coefficient-basis term, e.g. `-3.4j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    /// `+` when the text carried `+` or no sign at all.
    pub sign: Sign,
    /// Digits and dots exactly as written; may be empty.
    pub magnitude: String,
    pub basis: Basis,
    /// Position of the term in the full input line.
    pub span: Span,
}

impl Term {
    /// The signed numeric text with any leading `+` already stripped.
    pub fn numeric_text(&self) -> String {
        match self.sign {
            Sign::Plus => self.magnitude.clone(),
            Sign::Minus => format!("-{}", self.magnitude),
        }
    }

    /// True when the coefficient is written without a trailing digit and is
    /// read with an implied `1`, as in `i`, `-j` or `2.k`.
    pub fn has_implicit_one(&self) -> bool {
        self.basis != Basis::Real && !self.magnitude.ends_with(|c: char| c.is_ascii_digit())
    }

    /// Resolves the coefficient of this term.
    ///
    /// Imaginary terms whose numeric text does not end in a digit get a `1`
    /// appended before parsing (`i` is 1, `-i` is -1). Real terms are parsed
    /// as written, so a real term made of a bare sign has no value. Literals
    /// that do not parse or overflow to infinity yield `None`.
    pub fn coefficient(&self) -> Option<f64> {
        let mut text = self.numeric_text();
        if self.has_implicit_one() {
            text.push('1');
        }
        text.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

/// Result of lexing one group interior.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexed {
    pub terms: Vec<Term>,
    pub dropped: Vec<Span>,
}

struct Cursor<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.char_indices().peekable(),
            len: source.len(),
        }
    }

    fn pos(&mut self) -> usize {
        self.chars.peek().map_or(self.len, |(index, _)| *index)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn next(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    fn eat(&mut self, accept: impl Fn(char) -> bool) -> Option<char> {
        let c = self.peek().filter(|c| accept(*c))?;
        self.next();
        Some(c)
    }
}

/// Splits a group interior into terms.
///
/// `offset` is the byte position of `body` within the full line; all spans in
/// the result are relative to the line.
pub fn tokenize(body: &str, offset: usize) -> Lexed {
    let mut cursor = Cursor::new(body);
    let mut lexed = Lexed::default();

    while let Some(c) = cursor.peek() {
        let start = cursor.pos();
        match lex_term(&mut cursor) {
            Some((sign, magnitude, basis)) => {
                let span = Span::new(start, cursor.pos()).shifted(offset);
                tracing::trace!(?sign, %magnitude, ?basis, ?span, "term");
                lexed.terms.push(Term {
                    sign,
                    magnitude,
                    basis,
                    span,
                });
            }
            None => {
                cursor.next();
                lexed
                    .dropped
                    .push(Span::new(start, start + c.len_utf8()).shifted(offset));
            }
        }
    }

    lexed
}

fn lex_term(cursor: &mut Cursor) -> Option<(Sign, String, Basis)> {
    let sign = cursor.eat(|c| c == '+' || c == '-').map(|c| match c {
        '-' => Sign::Minus,
        _ => Sign::Plus,
    });

    let mut magnitude = String::new();
    while let Some(c) = cursor.eat(|c| c.is_ascii_digit() || c == '.') {
        magnitude.push(c);
    }

    let basis = cursor.eat(|c| Basis::from_letter(c).is_some());

    if sign.is_none() && magnitude.is_empty() && basis.is_none() {
        return None;
    }

    Some((
        sign.unwrap_or(Sign::Plus),
        magnitude,
        basis.and_then(Basis::from_letter).unwrap_or(Basis::Real),
    ))
}
