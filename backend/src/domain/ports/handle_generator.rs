//! Source of candidate handles.

use crate::domain::Handle;

/// Produces uniformly distributed candidate handles.
///
/// Candidates are not checked for uniqueness; the allocator relies on the
/// store to reject collisions.
#[cfg_attr(test, mockall::automock)]
pub trait HandleGenerator: Send + Sync {
    /// Draw the next candidate.
    fn next_candidate(&self) -> Handle;
}
