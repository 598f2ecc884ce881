//! Provenance wrapper for fallback-capable results.

use serde::{Deserialize, Serialize};

/// A value produced either by a live external call or by the local fallback
/// path.
///
/// Both variants are success values from the orchestrator's viewpoint; only
/// genuinely unexpected errors propagate as failures. The provenance is kept
/// so callers can log which path ran.
///
/// # Examples
///
/// ```
/// use fellini_core::Sourced;
///
/// let live = Sourced::Live(42);
/// let sub = Sourced::Fallback(42);
/// assert!(!live.is_fallback());
/// assert!(sub.is_fallback());
/// assert_eq!(live.into_inner(), sub.into_inner());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "lowercase")]
pub enum Sourced<T> {
    /// Produced by the external service
    Live(T),
    /// Produced by the local substitute path
    Fallback(T),
}

impl<T> Sourced<T> {
    /// Unwrap the inner value, discarding provenance.
    pub fn into_inner(self) -> T {
        match self {
            Self::Live(value) | Self::Fallback(value) => value,
        }
    }

    /// Borrow the inner value.
    pub fn inner(&self) -> &T {
        match self {
            Self::Live(value) | Self::Fallback(value) => value,
        }
    }

    /// Whether the value came from the substitute path.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}
