pub use crate::algebra::{multiply_base, Basis, Quaternion, Sign};
pub use crate::diagnostics::{ErrorContext, ErrorType, QuatError};
pub use crate::engine::{product, ExecutionPipeline};
pub use crate::format::format;
pub use crate::syntax::{parse, parse_with, ParseOptions, Span};

pub mod algebra;
pub mod cli;
pub mod diagnostics;
pub mod engine;
pub mod format;
pub mod repl;
pub mod syntax;
