//! Top-level error wrapper types.

use crate::{
    AgentError, BuilderError, ConfigError, HttpError, JsonError, PipelineError, ServerError,
    StoreError,
};

/// The foundation error enum. Every concern-specific error in the workspace
/// converts into one of these variants.
///
/// # Examples
///
/// ```
/// use fellini_error::{FelliniError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: FelliniError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FelliniErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Record store error
    #[from(StoreError)]
    Store(StoreError),
    /// Generation agent error
    #[from(AgentError)]
    Agent(AgentError),
    /// Pipeline orchestration error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Fellini error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fellini_error::{FelliniResult, ConfigError};
///
/// fn might_fail() -> FelliniResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fellini Error: {}", _0)]
pub struct FelliniError(Box<FelliniErrorKind>);

impl FelliniError {
    /// Create a new error from a kind.
    pub fn new(kind: FelliniErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FelliniErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FelliniErrorKind
impl<T> From<T> for FelliniError
where
    T: Into<FelliniErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fellini operations.
///
/// # Examples
///
/// ```
/// use fellini_error::{FelliniResult, HttpError};
///
/// fn fetch_data() -> FelliniResult<String> {
///     Err(HttpError::new("404 Not Found"))?
/// }
/// ```
pub type FelliniResult<T> = std::result::Result<T, FelliniError>;
