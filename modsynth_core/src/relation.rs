//! Binary relations stored as a row-vector of [`Subset`]s.

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::{subset::Subset, universe::Universe};

/// A binary relation `R ⊆ U1 × U2`, stored as `|U1|` rows, each a
/// [`Subset`] over `U2`: row `i` is `{ j : (u1_i, u2_j) ∈ R }`.
///
/// Mutable during planner construction (graph building); read-only for
/// the remainder of a plan's lifetime.
pub struct Relation<'u1, 'u2, M1, M2> {
    u1: &'u1 Universe<M1>,
    rows: Vec<Subset<'u2, M2>>,
}

impl<'u1, 'u2, M1, M2> Relation<'u1, 'u2, M1, M2> {
    /// Build the empty relation over `u1 × u2`.
    pub fn new(u1: &'u1 Universe<M1>, u2: &'u2 Universe<M2>) -> Self {
        Self {
            u1,
            rows: (0..u1.len()).map(|_| Subset::empty(u2)).collect(),
        }
    }

    /// Add the pair `(a, b)` to this relation.
    ///
    /// # Panics
    ///
    /// Panics if `a` is not declared in `u1`, or `b` is not declared in
    /// the `u2` universe the relation was built with.
    pub fn add(&mut self, a: &M1, b: &M2)
    where
        M1: PartialEq,
        M2: PartialEq,
    {
        let i = self.u1.find(a).expect("relation member not declared in u1");
        self.rows[i].add(b);
    }

    /// Returns `true` if `(a, b) ∈ R`.
    pub fn contains(&self, a: &M1, b: &M2) -> bool
    where
        M1: PartialEq,
        M2: PartialEq,
    {
        match self.u1.find(a) {
            Some(i) => self.rows[i].get(b),
            None => false,
        }
    }

    /// The row for `U1` index `i`: `{ j : (u1_i, u2_j) ∈ R }`.
    pub fn at(&self, i: usize) -> &Subset<'u2, M2> {
        &self.rows[i]
    }

    /// The row for member `a`.
    ///
    /// # Panics
    ///
    /// Panics if `a` is not declared in `u1`.
    pub fn get(&self, a: &M1) -> &Subset<'u2, M2>
    where
        M1: PartialEq,
    {
        let i = self.u1.find(a).expect("relation member not declared in u1");
        self.at(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_query() {
        let modules = Universe::new(vec!["A", "B", "C"]).unwrap();
        let mut r = Relation::new(&modules, &modules);
        r.add(&"B", &"A");
        r.add(&"C", &"B");

        assert!(r.contains(&"B", &"A"));
        assert!(!r.contains(&"A", &"B"));
        assert!(r.get(&"B").contains(&"A"));
        assert_eq!(r.at(1).len(), 1);
    }
}
