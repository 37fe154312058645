use thiserror::Error;

/// Errors raised by the timing core.
///
/// Everything except [`HarnessError::UncontrolledFault`] is a usage error: the
/// benchmark itself is defined or invoked incorrectly and its measurement is
/// invalid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HarnessError {
    /// Timer or reporter misuse, e.g. `stop` without `start`.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),
    /// Statistics were finalized without a single sample.
    #[error("no timing samples were recorded")]
    InsufficientData,
    /// A case with this name is already registered.
    #[error("benchmark `{0}` is already registered")]
    DuplicateName(String),
    /// A run was requested with zero iterations.
    #[error("invalid iteration count {0}, must be at least 1")]
    InvalidIterations(u64),
    /// An argument sweep mixes integer and floating-point values.
    #[error("argument sweep mixes {expected} and {found} values")]
    MixedArgumentKinds {
        expected: &'static str,
        found: &'static str,
    },
    /// An argument sweep was built without any values.
    #[error("argument sweep is empty")]
    EmptySweep,
    /// No registered case matches the requested label.
    #[error("no benchmark named `{0}`")]
    UnknownCase(String),
    /// The code under test crashed. Raised by drivers that isolate runs.
    #[error("`{label}` faulted: {message}")]
    UncontrolledFault { label: String, message: String },
}

impl HarnessError {
    pub(crate) fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionViolation(msg.into())
    }

    /// Whether this error indicates a defect in the benchmark definition.
    pub fn is_usage_error(&self) -> bool {
        !matches!(self, Self::UncontrolledFault { .. })
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
