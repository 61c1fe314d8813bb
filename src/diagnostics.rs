//! Unified, `miette`-based diagnostics for the quatern engine.
//!
//! Every failure produced while reading, multiplying or printing a line is a
//! [`QuatError`]. Build them with the `err_msg!` and `err_ctx!` macros rather
//! than by hand:
//!
//! - `err_msg!(EmptyReduction, "no groups in input")` for message-only errors.
//! - `err_ctx!(InvalidNumericLiteral, "bad literal", src, span)` when the
//!   offending line and a span are at hand, with an optional trailing help.
//!
//! Pass `src` as a `&SourceArc` and `span` as a [`Span`]; the macros clone and
//! wrap as needed.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::syntax::Span;

pub type SourceArc = Arc<NamedSource<String>>;

/// Type-safe error classification that corresponds to `QuatError` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Malformed groups and numeric literals
    Parse,
    /// Reduction and arithmetic failures
    Eval,
    /// Failures reading input or writing output
    Io,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Parse => "Parse",
            ErrorType::Eval => "Eval",
            ErrorType::Io => "Io",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal, composable error context for diagnostics.
#[derive(Debug, Default, Clone)]
pub struct ErrorContext {
    /// The line the error refers to (if any).
    pub source: Option<SourceArc>,
    /// The primary span within that line (if any).
    pub span: Option<Span>,
    /// An optional help message.
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_source_and_span(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }
}

/// Every failure mode of the parse, reduce and format pipeline.
#[derive(Debug, Error)]
pub enum QuatError {
    #[error("Malformed group: {message}")]
    MalformedGroup { message: String, ctx: ErrorContext },
    #[error("Invalid numeric literal: {message}")]
    InvalidNumericLiteral { message: String, ctx: ErrorContext },
    #[error("Empty reduction: {message}")]
    EmptyReduction { message: String, ctx: ErrorContext },
    #[error("Non-finite result: {message}")]
    NonFiniteResult { message: String, ctx: ErrorContext },
    #[error("I/O error: {message}")]
    Io {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl QuatError {
    fn get_ctx(&self) -> &ErrorContext {
        match self {
            QuatError::MalformedGroup { ctx, .. }
            | QuatError::InvalidNumericLiteral { ctx, .. }
            | QuatError::EmptyReduction { ctx, .. }
            | QuatError::NonFiniteResult { ctx, .. }
            | QuatError::Io { ctx, .. } => ctx,
        }
    }

    fn message(&self) -> &str {
        match self {
            QuatError::MalformedGroup { message, .. }
            | QuatError::InvalidNumericLiteral { message, .. }
            | QuatError::EmptyReduction { message, .. }
            | QuatError::NonFiniteResult { message, .. }
            | QuatError::Io { message, .. } => message,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            QuatError::MalformedGroup { .. } | QuatError::InvalidNumericLiteral { .. } => {
                ErrorType::Parse
            }
            QuatError::EmptyReduction { .. } | QuatError::NonFiniteResult { .. } => {
                ErrorType::Eval
            }
            QuatError::Io { .. } => ErrorType::Io,
        }
    }

    /// Stable diagnostic code, e.g. `quatern::invalid_numeric_literal`.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            QuatError::MalformedGroup { .. } => "malformed_group",
            QuatError::InvalidNumericLiteral { .. } => "invalid_numeric_literal",
            QuatError::EmptyReduction { .. } => "empty_reduction",
            QuatError::NonFiniteResult { .. } => "non_finite_result",
            QuatError::Io { .. } => "io",
        }
    }

    /// Attaches the `std::io::Error` that caused an `Io` failure.
    pub fn io(message: impl Into<String>, cause: std::io::Error) -> Self {
        QuatError::Io {
            message: message.into(),
            ctx: ErrorContext::none(),
            source: Some(cause),
        }
    }
}

impl Diagnostic for QuatError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(format!("quatern::{}", self.code_suffix())))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.get_ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.get_ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.get_ctx().span?;
        let len = if span.end > span.start {
            span.end - span.start
        } else {
            1
        };
        let label = LabeledSpan::new(Some(self.message().to_string()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Converts a source line into a `SourceArc` for use in error contexts.
pub fn to_error_source<S: AsRef<str>>(source: S) -> SourceArc {
    Arc::new(NamedSource::new("input", source.as_ref().to_string()))
}

/// Prints a `QuatError` with full miette diagnostics on stderr.
pub fn print_error(error: QuatError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

/// Constructs a `QuatError` variant with a formatted message and no context.
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $msg:expr, $($arg:expr),+) => {
        $crate::QuatError::$variant {
            message: format!($msg, $($arg),+),
            ctx: $crate::ErrorContext::none(),
        }
    };
    ($variant:ident, $msg:expr) => {
        $crate::QuatError::$variant {
            message: format!("{}", $msg),
            ctx: $crate::ErrorContext::none(),
        }
    };
}

/// Constructs a `QuatError` variant tied to a source line and span, with an
/// optional help message.
#[macro_export]
macro_rules! err_ctx {
    ($variant:ident, $msg:expr, $src:expr, $span:expr, $help:expr) => {
        $crate::QuatError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext {
                source: Some($crate::diagnostics::SourceArc::clone($src)),
                span: Some($span),
                help: Some(format!("{}", $help)),
            },
        }
    };
    ($variant:ident, $msg:expr, $src:expr, $span:expr) => {
        $crate::QuatError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext::with_source_and_span(
                $crate::diagnostics::SourceArc::clone($src),
                $span,
            ),
        }
    };
}

#[cfg(test)]
mod diagnostics_tests {
    use miette::Report;

    use super::*;

    #[test]
    fn test_report_includes_label_and_help() {
        let src = to_error_source("(i+-)");
        let err = crate::err_ctx!(
            InvalidNumericLiteral,
            "'-' has no digits",
            &src,
            Span::new(3, 4),
            "write the coefficient explicitly"
        );
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("'-' has no digits"));
        assert!(output.contains("write the coefficient explicitly"));
        assert!(output.contains("quatern::invalid_numeric_literal"));
    }

    #[test]
    fn test_message_only_error_has_no_labels() {
        let err = crate::err_msg!(EmptyReduction, "nothing to multiply in {:?}", "abc");
        assert!(err.labels().is_none());
        assert_eq!(err.error_type(), ErrorType::Eval);
        assert_eq!(
            err.to_string(),
            "Empty reduction: nothing to multiply in \"abc\""
        );
    }

    #[test]
    fn test_io_error_keeps_its_cause() {
        use std::error::Error;

        let cause = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err = QuatError::io("reading stdin", cause);
        assert_eq!(err.error_type(), ErrorType::Io);
        assert!(err.source().is_some());
    }
}
