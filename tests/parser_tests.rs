// tests/parser_tests.rs

use quatern::syntax::parser::groups;
use quatern::{parse, parse_with, ErrorType, ParseOptions, QuatError, Quaternion};

// A helper to unwrap the quaternions parsed from one line.
fn parsed(line: &str) -> Vec<Quaternion> {
    parse(line).unwrap_or_else(|e| panic!("failed to parse {line:?}: {e}"))
}

#[test]
fn test_parse_single_group() {
    let qs = parsed("(i+j)");
    assert_eq!(qs.len(), 1);
    assert_eq!(qs[0].r, 0.0);
    assert_eq!(qs[0].i, 1.0);
    assert_eq!(qs[0].j, 1.0);
    assert_eq!(qs[0].k, 0.0);
}

#[test]
fn test_parse_two_groups_in_order() {
    let qs = parsed("(9+i-j)(k-8.4j)");
    assert_eq!(qs.len(), 2);
    assert_eq!(qs[0], Quaternion::new(9.0, 1.0, -1.0, 0.0));
    assert_eq!(qs[1], Quaternion::new(0.0, 0.0, -8.4, 1.0));
}

#[test]
fn test_parse_all_components() {
    let qs = parsed("(-99i+j-10k+7)");
    assert_eq!(qs[0], Quaternion::new(7.0, -99.0, 1.0, -10.0));
}

#[test]
fn test_text_between_groups_is_ignored() {
    let qs = parsed("x = (i) * (j);");
    assert_eq!(
        qs,
        vec![
            Quaternion::new(0.0, 1.0, 0.0, 0.0),
            Quaternion::new(0.0, 0.0, 1.0, 0.0),
        ]
    );
}

#[test]
fn test_decimal_forms() {
    let qs = parsed("(.5i+2.25j-0.125)");
    assert_eq!(qs[0], Quaternion::new(-0.125, 0.5, 2.25, 0.0));
}

#[test]
fn test_last_term_wins_within_group() {
    assert_eq!(parsed("(i+2i)")[0], Quaternion::new(0.0, 2.0, 0.0, 0.0));
    assert_eq!(parsed("(1+2-3)")[0], Quaternion::new(-3.0, 0.0, 0.0, 0.0));
}

#[test]
fn test_groups_do_not_share_state() {
    let qs = parsed("(5+i)(j)");
    assert_eq!(qs[1], Quaternion::new(0.0, 0.0, 1.0, 0.0));
}

#[test]
fn test_group_extraction_is_non_greedy() {
    let found = groups("(i)(j)").unwrap();
    let bodies: Vec<_> = found.iter().map(|g| g.value).collect();
    assert_eq!(bodies, vec!["i", "j"]);
}

#[test]
fn test_unclosed_group_is_plain_text() {
    assert!(parsed("(i+j").is_empty());
    assert_eq!(parsed("(i+j(k)").len(), 1);
}

#[test]
fn test_invalid_literals_fail() {
    for line in ["(1.2.3)", "(i-)", "(.)", "(-)"] {
        let err = parse(line).unwrap_err();
        assert!(
            matches!(err, QuatError::InvalidNumericLiteral { .. }),
            "{line}: {err}"
        );
        assert_eq!(err.error_type(), ErrorType::Parse);
    }
}

#[test]
fn test_error_points_at_term() {
    use miette::Diagnostic;

    let err = parse("(i)(2j+-)").unwrap_err();
    let labels: Vec<_> = err.labels().unwrap().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 6);
    assert_eq!(labels[0].len(), 1);
}

#[test]
fn test_strict_mode() {
    let strict = ParseOptions::strict();
    assert!(parse_with("(i+j)(k)", &strict).is_ok());
    for line in ["(i j)", "(i)()", "(k+2k)", "(i,j)"] {
        assert!(
            matches!(
                parse_with(line, &strict),
                Err(QuatError::MalformedGroup { .. })
            ),
            "{line} should be rejected"
        );
    }
}
