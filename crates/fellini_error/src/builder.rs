//! Builder error types.

/// Kinds of builder errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required field was not set before calling build
    #[display("Missing required field: {}", _0)]
    MissingField(String),
    /// A field value failed validation
    #[display("Invalid field value: {}", _0)]
    InvalidValue(String),
}

/// Builder error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    /// The kind of error that occurred
    pub kind: BuilderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
