use crate::{
    algebra::Quaternion,
    diagnostics::{to_error_source, QuatError},
    format::format,
    syntax::{parser, ParseOptions, Span},
};

// ============================================================================
// REDUCTION
// ============================================================================

/// Left-folds `quaternions` with the Hamilton product in encounter order.
///
/// There is no identity for an empty sequence; callers get `EmptyReduction`.
pub fn product<I>(quaternions: I) -> Result<Quaternion, QuatError>
where
    I: IntoIterator<Item = Quaternion>,
{
    quaternions
        .into_iter()
        .reduce(Quaternion::multiply)
        .ok_or_else(|| crate::err_msg!(EmptyReduction, "no quaternions to multiply"))
}

// ============================================================================
// EXECUTION PIPELINE
// ============================================================================

/// Line-at-a-time pipeline: parse, multiply in order, format.
///
/// Holds only configuration; every call starts from a clean state, so a
/// failing line never affects the next one.
#[derive(Debug, Clone, Default)]
pub struct ExecutionPipeline {
    pub options: ParseOptions,
}

impl ExecutionPipeline {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn parse_source(&self, line: &str) -> Result<Vec<Quaternion>, QuatError> {
        parser::parse_with(line, &self.options)
    }

    /// Parses `line` and multiplies its groups together.
    pub fn evaluate(&self, line: &str) -> Result<Quaternion, QuatError> {
        let quaternions = self.parse_source(line)?;
        let count = quaternions.len();

        let result = product(quaternions).map_err(|_| {
            crate::err_ctx!(
                EmptyReduction,
                "input has no parenthesized groups",
                &to_error_source(line),
                Span::new(0, line.len()),
                "write each factor in parentheses, e.g. (i+j)(k)"
            )
        })?;

        if !result.is_finite() {
            return Err(crate::err_ctx!(
                NonFiniteResult,
                format!("product of {} factors overflowed: {:?}", count, result),
                &to_error_source(line),
                Span::new(0, line.len())
            ));
        }

        tracing::debug!(factors = count, ?result, "evaluated line");
        Ok(result)
    }

    /// Evaluates `line` and renders the product in canonical form.
    pub fn execute(&self, line: &str) -> Result<String, QuatError> {
        self.evaluate(line).map(|q| format(&q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorType;

    #[test]
    fn test_product_keeps_order() {
        let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(product([i, j]).unwrap(), Quaternion::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(product([j, i]).unwrap(), Quaternion::new(0.0, 0.0, 0.0, -1.0));
    }

    #[test]
    fn test_product_of_one_is_itself() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(product([q]).unwrap(), q);
    }

    #[test]
    fn test_empty_product_fails() {
        let err = product(Vec::new()).unwrap_err();
        assert!(matches!(err, QuatError::EmptyReduction { .. }));
    }

    #[test]
    fn test_execute() {
        let pipeline = ExecutionPipeline::default();
        assert_eq!(pipeline.execute("(i+j)(k)").unwrap(), "i-j");
        assert_eq!(pipeline.execute("(i+j+20)(j-9)").unwrap(), "-9i+11j+k-181");
    }

    #[test]
    fn test_line_without_groups() {
        let err = ExecutionPipeline::default().execute("i+j").unwrap_err();
        assert!(matches!(err, QuatError::EmptyReduction { .. }));
        assert_eq!(err.error_type(), ErrorType::Eval);
    }

    #[test]
    fn test_overflow_is_reported() {
        let big = format!("({})", "9".repeat(300));
        let line = format!("{big}{big}");
        let err = ExecutionPipeline::default().execute(&line).unwrap_err();
        assert!(matches!(err, QuatError::NonFiniteResult { .. }));
    }

    #[test]
    fn test_failed_line_does_not_affect_next() {
        let pipeline = ExecutionPipeline::default();
        assert!(pipeline.execute("(i+-)").is_err());
        assert_eq!(
            pipeline.execute("(10i)(10j-k+1)(-99i+j-10k+7)(4)").unwrap(),
            "-520i-38920j+6800k+7920"
        );
    }
}
