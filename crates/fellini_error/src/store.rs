//! Record store error types.

/// Kinds of store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// Failed to create a store directory
    #[display("Failed to create store directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write a collection file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read a collection file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Record not found in the requested collection
    #[display("Record not found: {}", _0)]
    NotFound(String),
    /// Failed to serialize or deserialize a record
    #[display("Serialization failed: {}", _0)]
    Serialization(String),
    /// Invalid store path
    #[display("Invalid store path: {}", _0)]
    InvalidPath(String),
}

/// Store error with location tracking.
///
/// # Examples
///
/// ```
/// use fellini_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::NotFound("projects/abc".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
