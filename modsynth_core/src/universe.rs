//! Dense index assignment for a fixed collection of members.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::{
    error::{CoreError, Result},
    subset::{Subset, MAX_MEMBERS},
};

/// Fixes a mapping from a sequence of members to consecutive indices
/// `0..len()`.
///
/// A `Universe` is built once (at synth finalization) and never mutated
/// afterwards; every [`Subset`] over it borrows the `Universe` for its
/// lifetime so that set operations never need to re-resolve members.
#[derive(Debug)]
pub struct Universe<M> {
    members: Vec<M>,
}

impl<M: PartialEq> Universe<M> {
    /// Build a `Universe` from an ordered, deduplicated member list.
    ///
    /// Declaration order becomes index order, which is what makes planner
    /// output deterministic: two synths declared the same way produce the
    /// same index assignment.
    pub fn new(members: Vec<M>) -> Result<Self> {
        if members.len() > MAX_MEMBERS {
            return Err(CoreError::UniverseTooLarge(members.len(), MAX_MEMBERS));
        }
        Ok(Self { members })
    }

    /// Number of members in this universe.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if this universe has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The dense index of `member`, or `None` if it was never declared.
    #[inline]
    pub fn find(&self, member: &M) -> Option<usize> {
        self.members.iter().position(|m| m == member)
    }

    /// The dense index of `member`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MemberNotFound`] if `member` is absent.
    pub fn index(&self, member: &M) -> Result<usize>
    where
        M: core::fmt::Debug,
    {
        self.find(member).ok_or_else(|| {
            #[cfg(feature = "alloc")]
            {
                CoreError::MemberNotFound(alloc::format!("{member:?}"))
            }
            #[cfg(not(feature = "alloc"))]
            {
                CoreError::MemberNotFound(())
            }
        })
    }

    /// The member at dense index `i`, or `None` if out of range.
    #[inline]
    pub fn at(&self, i: usize) -> Option<&M> {
        self.members.get(i)
    }

    /// All declared members, in index order.
    #[inline]
    pub fn members(&self) -> &[M] {
        &self.members
    }

    /// Build a `Subset` containing exactly the given members.
    ///
    /// # Panics
    ///
    /// Panics (via debug assertion) if a member was never declared in
    /// this universe; callers that cannot guarantee membership should use
    /// [`Universe::find`] themselves first.
    pub fn subset<'u>(&'u self, members: impl IntoIterator<Item = M>) -> Subset<'u, M> {
        let mut s = Subset::empty(self);
        for m in members {
            let idx = self.find(&m).expect("subset member not declared in universe");
            s.add_index(idx);
        }
        s
    }

    /// The subset containing every member of this universe.
    #[inline]
    pub fn all<'u>(&'u self) -> Subset<'u, M> {
        Subset::full(self)
    }

    /// The empty subset of this universe.
    #[inline]
    pub fn none<'u>(&'u self) -> Subset<'u, M> {
        Subset::empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let u = Universe::new(vec!['a', 'b', 'c']).unwrap();
        for i in 0..u.len() {
            let m = *u.at(i).unwrap();
            assert_eq!(u.index(&m).unwrap(), i);
        }
    }

    #[test]
    fn find_missing_member() {
        let u = Universe::new(vec!['a', 'b', 'c']).unwrap();
        assert_eq!(u.find(&'z'), None);
        assert!(u.index(&'z').is_err());
    }

    #[test]
    fn all_and_none() {
        let u = Universe::new(vec!['a', 'b', 'c']).unwrap();
        assert_eq!(u.all().len(), 3);
        assert_eq!(u.none().len(), 0);
    }
}
