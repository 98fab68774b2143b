use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum Error {
    #[error("syntax error: expected {expected}, found {found}")]
    #[diagnostic(code(syntax_error))]
    Syntax {
        expected: String,
        found: String,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("variable '{name}' is not bound")]
    #[diagnostic(
        code(unbound_variable),
        help("bind it with a `name value` argument pair")
    )]
    UnboundVariable { name: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Evaluation(#[from] EvaluationError),
}

#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum EvaluationError {
    #[error("division by zero")]
    #[diagnostic(code(division_by_zero))]
    DivisionByZero,

    #[error("log of non-positive value {0}")]
    #[diagnostic(code(log_of_non_positive))]
    LogOfNonPositive(f64),

    #[error("sqrt of negative value {0}")]
    #[diagnostic(code(sqrt_of_negative))]
    SqrtOfNegative(f64),
}

impl Error {
    pub(crate) fn syntax(
        expected: impl Into<String>,
        found: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Self {
        Self::Syntax {
            expected: expected.into(),
            found: found.into(),
            span: span.into(),
        }
    }
}
