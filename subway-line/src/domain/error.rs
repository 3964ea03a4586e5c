//! Section path error types.
//!
//! Every variant except [`PathError::BrokenInvariant`] is a validation
//! failure the caller can correct. Validation failures are raised before
//! the path is touched, so a failed call leaves it unchanged.

use super::{Distance, LineId, StationId};

/// Errors from [`SectionPath`](super::SectionPath) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// New section is not shorter than the section it would split
    #[error("section of length {requested} does not fit inside existing section of length {existing}")]
    SectionTooLong {
        requested: Distance,
        existing: Distance,
    },

    /// Both endpoints are already on the line
    #[error("stations {up} and {down} are both already on the line")]
    SectionsAlreadyExist { up: StationId, down: StationId },

    /// The section does not extend the line from exactly one known station
    #[error("section {up} -> {down} does not connect to the line")]
    DisconnectedSection { up: StationId, down: StationId },

    /// Removal requested for a station that is not on the last section
    #[error("station {0} is not the end station of the line")]
    NotEndStation(StationId),

    /// Removal requested on a line with no sections
    #[error("line has no sections")]
    EmptyPath,

    /// Section was built for another line
    #[error("section belongs to line {actual}, expected line {expected}")]
    LineMismatch { expected: LineId, actual: LineId },

    /// Stored sections no longer form a simple path
    #[error("section path is inconsistent: {0}")]
    BrokenInvariant(&'static str),
}

impl PathError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            PathError::SectionTooLong { .. } => "SECTION_TOO_LONG",
            PathError::SectionsAlreadyExist { .. } => "SECTIONS_ALREADY_EXIST",
            PathError::DisconnectedSection { .. } => "DISCONNECTED_SECTION",
            PathError::NotEndStation(_) => "NOT_END_STATION",
            PathError::EmptyPath => "EMPTY_PATH",
            PathError::LineMismatch { .. } => "LINE_MISMATCH",
            PathError::BrokenInvariant(_) => "BROKEN_INVARIANT",
        }
    }

    /// Returns true for errors caused by a bug rather than by the request.
    pub fn is_internal(&self) -> bool {
        matches!(self, PathError::BrokenInvariant(_))
    }
}
