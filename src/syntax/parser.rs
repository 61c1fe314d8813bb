//! Quaternion expression parser
//!
//! Extracts parenthesized groups from a line with the pest grammar, lexes each
//! group interior into terms and assigns every term's coefficient to its basis.
//! A later term with the same basis replaces an earlier one in permissive mode.

use pest::{error::Error, Parser};
use pest_derive::Parser;

use crate::algebra::{Basis, Quaternion};
use crate::diagnostics::{to_error_source, QuatError};
use crate::syntax::{assert_valid_span, lexer::tokenize, ParseOptions, Span, Spanned, Term};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct QuaternionParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses every parenthesized group in `text`, left to right, permissively.
pub fn parse(text: &str) -> Result<Vec<Quaternion>, QuatError> {
    parse_with(text, &ParseOptions::default())
}

/// Parses every parenthesized group in `text` under `options`.
///
/// Text with no groups yields an empty vector.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Vec<Quaternion>, QuatError> {
    let groups = groups(text)?;
    tracing::debug!(groups = groups.len(), strict = options.strict, "parsing line");

    groups
        .iter()
        .map(|group| build_quaternion(text, group, options))
        .collect()
}

/// Returns the interior of every group together with the span of the whole
/// group, parentheses included.
pub fn groups(text: &str) -> Result<Vec<Spanned<&str>>, QuatError> {
    let mut pairs =
        QuaternionParser::parse(Rule::line, text).map_err(|e| convert_parse_error(e, text))?;

    let Some(line) = pairs.next() else {
        return Ok(vec![]);
    };

    Ok(line
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::group)
        .map(|group| {
            let span = Span::new(group.as_span().start(), group.as_span().end());
            assert_valid_span(span, text);
            let body = group.into_inner().next().map_or("", |body| body.as_str());
            Spanned { value: body, span }
        })
        .collect())
}

// ============================================================================
// QUATERNION BUILDER
// ============================================================================

fn build_quaternion(
    text: &str,
    group: &Spanned<&str>,
    options: &ParseOptions,
) -> Result<Quaternion, QuatError> {
    let lexed = tokenize(group.value, group.span.start + 1);

    if let Some(&first) = lexed.dropped.first() {
        if options.strict {
            let found = text.get(first.start..first.end).unwrap_or("?");
            return Err(crate::err_ctx!(
                MalformedGroup,
                format!("unexpected character '{}'", found),
                &to_error_source(text),
                first,
                "terms are written as [+|-][digits][i|j|k] with no separators"
            ));
        }
        tracing::debug!(
            dropped = lexed.dropped.len(),
            group = group.value,
            "skipping characters outside the term grammar"
        );
    }

    if options.strict && lexed.terms.is_empty() {
        return Err(crate::err_ctx!(
            MalformedGroup,
            "group contains no terms",
            &to_error_source(text),
            group.span
        ));
    }

    let mut seen: [Option<Span>; 4] = [None; 4];
    lexed.terms.iter().try_fold(Quaternion::ZERO, |q, term| {
        if let Some(previous) = seen[term.basis.index()].replace(term.span) {
            if options.strict {
                return Err(repeated_basis_error(text, term, previous));
            }
            tracing::debug!(basis = %term.basis, "later term replaces earlier one");
        }
        let value = term
            .coefficient()
            .ok_or_else(|| invalid_literal_error(text, term))?;
        Ok(q.with_component(term.basis, value))
    })
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn invalid_literal_error(text: &str, term: &Term) -> QuatError {
    let literal = text.get(term.span.start..term.span.end).unwrap_or("?");
    let message = format!("'{}' is not a number", literal);
    let src = to_error_source(text);
    if term.basis == Basis::Real && !term.magnitude.contains(|c: char| c.is_ascii_digit()) {
        return crate::err_ctx!(
            InvalidNumericLiteral,
            message,
            &src,
            term.span,
            "a real term needs digits, e.g. 1 or -1"
        );
    }
    crate::err_ctx!(InvalidNumericLiteral, message, &src, term.span)
}

fn repeated_basis_error(text: &str, term: &Term, previous: Span) -> QuatError {
    let label = match term.basis {
        Basis::Real => "real".to_string(),
        other => other.symbol().to_string(),
    };
    crate::err_ctx!(
        MalformedGroup,
        format!("{} component is given more than once", label),
        &to_error_source(text),
        term.span,
        format!(
            "first given at {}..{}; combine the terms into one coefficient",
            previous.start, previous.end
        )
    )
}

fn convert_parse_error(error: Error<Rule>, text: &str) -> QuatError {
    let span = match error.location {
        pest::error::InputLocation::Pos(pos) => Span::new(pos, pos),
        pest::error::InputLocation::Span((start, end)) => Span::new(start, end),
    };
    crate::err_ctx!(
        MalformedGroup,
        format!("unreadable line: {}", error.variant.message()),
        &to_error_source(text),
        span
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;

    #[test]
    fn test_simple_parse() {
        let qs = parse("(i+j)").unwrap();
        assert_eq!(qs, vec![Quaternion::new(0.0, 1.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_complex_parse() {
        let qs = parse("(9+i-j)(k-8.4j)").unwrap();
        assert_eq!(
            qs,
            vec![
                Quaternion::new(9.0, 1.0, -1.0, 0.0),
                Quaternion::new(0.0, 0.0, -8.4, 1.0),
            ]
        );
    }

    #[test]
    fn test_no_groups() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("i+j").unwrap().is_empty());
        assert!(parse("(i+j").unwrap().is_empty());
    }

    #[test]
    fn test_group_spans() {
        let found = groups("x(i)  (2j)").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].value, "i");
        assert_eq!(found[0].span, Span::new(1, 4));
        assert_eq!(found[1].value, "2j");
        assert_eq!(found[1].span, Span::new(6, 10));
    }

    #[test]
    fn test_group_runs_to_first_close() {
        let found = groups("(a(b)c)").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, "a(b");
    }

    #[test]
    fn test_repeated_basis_keeps_last() {
        let qs = parse("(i+2i)").unwrap();
        assert_eq!(qs[0], Quaternion::new(0.0, 2.0, 0.0, 0.0));
    }

    #[test]
    fn test_empty_group_is_zero() {
        assert_eq!(parse("()").unwrap(), vec![Quaternion::ZERO]);
    }

    #[test]
    fn test_sign_only_real_term_fails() {
        let err = parse("(i+)").unwrap_err();
        assert!(matches!(err, QuatError::InvalidNumericLiteral { .. }));
        assert_eq!(err.error_type(), ErrorType::Parse);
    }

    #[test]
    fn test_strict_rejects_dropped_characters() {
        let err = parse_with("(2i j)", &ParseOptions::strict()).unwrap_err();
        assert!(matches!(err, QuatError::MalformedGroup { .. }));
        assert!(parse("(2i j)").is_ok());
    }

    #[test]
    fn test_strict_rejects_repeated_basis_and_empty_groups() {
        let strict = ParseOptions::strict();
        assert!(matches!(
            parse_with("(i+2i)", &strict),
            Err(QuatError::MalformedGroup { .. })
        ));
        assert!(matches!(
            parse_with("()", &strict),
            Err(QuatError::MalformedGroup { .. })
        ));
        assert!(parse_with("(9+i-j)(k-8.4j)", &strict).is_ok());
    }
}
