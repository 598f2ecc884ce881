//! Generation agent error types.

/// Specific error conditions for agent operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AgentErrorKind {
    /// The external service returned an error response
    #[display("Service error ({}): {}", status, message)]
    ServiceError {
        /// HTTP status code returned by the service
        status: u16,
        /// Response body or message
        message: String,
    },
    /// The external service could not be reached
    #[display("Service unreachable: {}", _0)]
    Unreachable(String),
    /// The service reply could not be parsed
    #[display("Failed to parse service reply: {}", _0)]
    ParseError(String),
    /// Required credentials are missing or incomplete
    #[display("Missing credentials: {}", _0)]
    MissingCredentials(String),
    /// Failed to write a generated artifact to disk
    #[display("Failed to write artifact: {}", _0)]
    ArtifactWrite(String),
    /// An external tool invocation failed
    #[display("Tool invocation failed: {}", _0)]
    ToolFailed(String),
}

/// Error type for agent operations.
///
/// # Examples
///
/// ```
/// use fellini_error::{AgentError, AgentErrorKind};
///
/// let err = AgentError::new(AgentErrorKind::Unreachable("tts endpoint".to_string()));
/// assert!(format!("{}", err).contains("unreachable"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Agent Error: {} at line {} in {}", kind, line, file)]
pub struct AgentError {
    /// The specific error condition
    pub kind: AgentErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl AgentError {
    /// Create a new AgentError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AgentErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
