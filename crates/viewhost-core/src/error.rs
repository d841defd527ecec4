//! Errors raised by the anchor node's structural operations.

use std::fmt;

/// Failure of a structural operation.
///
/// Every variant is a synchronous precondition violation raised before any
/// mutation begins, so a returned error guarantees the nested-view sequence,
/// the physical tree, and the content-parent links are all unchanged. None
/// of these are retryable runtime conditions; they report caller bugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
    /// A structural operation targeted a component-root view. Component
    /// views are pinned to their component and cannot be relocated.
    ComponentViewNotMovable,
    /// An operation referenced a position outside the current sequence.
    IndexOutOfRange { index: usize, len: usize },
    /// A move was requested for a view this anchor does not track.
    ViewNotAttached,
}

impl fmt::Display for AnchorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnchorError::ComponentViewNotMovable => {
                write!(f, "component views are not relocatable")
            }
            AnchorError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} nested views")
            }
            AnchorError::ViewNotAttached => {
                write!(f, "view is not attached to this anchor")
            }
        }
    }
}

impl std::error::Error for AnchorError {}
