//! Syntax module for quaternion expressions
//!
//! This module provides the source-location types shared by the lexer and the
//! parser, and the options that control how strictly a line is read.

use serde::{Deserialize, Serialize};

pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, Lexed, Term};
pub use parser::{parse, parse_with};

/// Represents a span in the source line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Moves the span right by `offset` bytes.
    pub fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Wrapper for carrying source span information with any value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

/// How a line is read.
///
/// The default is permissive: characters the lexer cannot place are dropped and
/// a repeated basis inside one group overwrites the earlier term. Strict mode
/// turns both into `MalformedGroup` errors, along with groups that hold no
/// terms at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub strict: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

/// Helper to check if a span is valid for a given source string.
pub fn assert_valid_span(span: Span, source: &str) {
    debug_assert!(
        span.start <= span.end && span.end <= source.len(),
        "Invalid span: {{start: {}, end: {}}} for source of length {}",
        span.start,
        span.end,
        source.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_shift() {
        let span = Span::new(1, 3).shifted(4);
        assert_eq!(span, Span::new(5, 7));
        assert_eq!(span.len(), 2);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_default_options_are_permissive() {
        assert!(!ParseOptions::default().strict);
        assert!(ParseOptions::strict().strict);
    }
}
