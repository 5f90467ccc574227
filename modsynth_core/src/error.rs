//! Error types for `modsynth_core`.
//!
//! Kept hand-rolled (rather than `thiserror`) so this crate stays usable
//! under `no_std`; `modsynth_planner`, which is `std`-only, uses
//! `thiserror` for its richer, entity-carrying error taxonomy.

use core::fmt;

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Result type alias for `modsynth_core` operations.
pub type Result<T> = core::result::Result<T, CoreError>;

/// Errors raised by `Universe` and `Subset` operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// `Universe::index` was called with a member that was never declared.
    MemberNotFound(
        #[cfg(feature = "alloc")] String,
        #[cfg(not(feature = "alloc"))] (),
    ),

    /// A universe was asked to hold more members than a `Subset` can index.
    UniverseTooLarge(usize, usize),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "alloc")]
            CoreError::MemberNotFound(name) => write!(f, "member `{name}` is not present in this universe"),
            #[cfg(not(feature = "alloc"))]
            CoreError::MemberNotFound(()) => write!(f, "member is not present in this universe"),
            CoreError::UniverseTooLarge(len, max) => {
                write!(f, "universe has {len} members, exceeding the maximum of {max}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}
