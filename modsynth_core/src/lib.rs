//! # modsynth_core
//!
//! Foundational index and bitset primitives shared by the modulation-network
//! planner: dense [`Universe`] index assignment, [`Subset`] bitsets, and
//! [`Relation`] adjacency matrices.
//!
//! These types perform the planner's reachability fixpoints and
//! predecessor queries as word-sized set operations instead of graph
//! traversals. Construction (assigning a `Universe` its members) is the
//! only place that allocates; every `Subset`/`Relation` operation after
//! that is plain integer arithmetic over an inline word array.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod relation;
pub mod subset;
pub mod universe;

pub use error::{CoreError, Result};
pub use relation::Relation;
pub use subset::Subset;
pub use universe::Universe;
