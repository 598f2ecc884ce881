//! Project status machine.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a [`crate::VideoProject`].
///
/// Status only moves forward through the fixed stage order; `Failed` is a
/// terminal state reachable from any other state. The orchestrator enforces
/// transitions via [`ProjectStatus::can_advance_to`].
///
/// # Examples
///
/// ```
/// use fellini_core::ProjectStatus;
///
/// assert!(ProjectStatus::Generating.can_advance_to(ProjectStatus::Editing));
/// assert!(!ProjectStatus::Editing.can_advance_to(ProjectStatus::Generating));
/// assert!(ProjectStatus::Uploading.can_advance_to(ProjectStatus::Failed));
/// assert!(!ProjectStatus::Failed.can_advance_to(ProjectStatus::Pending));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProjectStatus {
    /// Created but no stage has run yet
    Pending,
    /// Script accepted, media generation in progress
    Generating,
    /// Video assembly in progress
    Editing,
    /// Metadata attached, final render settling
    Rendering,
    /// Upload to the video host in progress
    Uploading,
    /// Upload acknowledged by the host
    Published,
    /// Terminal failure state
    Failed,
}

impl ProjectStatus {
    /// Position of this status in the forward stage order.
    ///
    /// `Failed` has no position; it sits outside the ordering.
    pub fn stage_index(&self) -> Option<usize> {
        match self {
            Self::Pending => Some(0),
            Self::Generating => Some(1),
            Self::Editing => Some(2),
            Self::Rendering => Some(3),
            Self::Uploading => Some(4),
            Self::Published => Some(5),
            Self::Failed => None,
        }
    }

    /// Whether a transition from `self` to `next` respects the forward-only
    /// ordering.
    ///
    /// Any non-terminal status may move to `Failed`; `Failed` and
    /// `Published` permit no further movement.
    pub fn can_advance_to(&self, next: ProjectStatus) -> bool {
        match (self.stage_index(), next.stage_index()) {
            // Failed is terminal
            (None, _) => false,
            // Anything live may fail
            (Some(_), None) => true,
            (Some(current), Some(target)) => target > current,
        }
    }

    /// Whether this status is terminal (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Published | Self::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_order_is_strict() {
        let order = [
            ProjectStatus::Pending,
            ProjectStatus::Generating,
            ProjectStatus::Editing,
            ProjectStatus::Rendering,
            ProjectStatus::Uploading,
            ProjectStatus::Published,
        ];

        for (i, from) in order.iter().enumerate() {
            for (j, to) in order.iter().enumerate() {
                assert_eq!(from.can_advance_to(*to), j > i, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn failed_is_reachable_and_terminal() {
        assert!(ProjectStatus::Pending.can_advance_to(ProjectStatus::Failed));
        assert!(ProjectStatus::Uploading.can_advance_to(ProjectStatus::Failed));
        assert!(!ProjectStatus::Failed.can_advance_to(ProjectStatus::Generating));
        assert!(!ProjectStatus::Failed.can_advance_to(ProjectStatus::Failed));
    }

    #[test]
    fn wire_form_is_lowercase() {
        let json = serde_json::to_string(&ProjectStatus::Uploading).unwrap();
        assert_eq!(json, "\"uploading\"");
        let back: ProjectStatus = serde_json::from_str("\"published\"").unwrap();
        assert_eq!(back, ProjectStatus::Published);
    }
}
