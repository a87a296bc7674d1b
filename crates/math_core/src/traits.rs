use crate::error::Result;
use crate::set::MathSet;
use std::collections::{BTreeSet, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// A trait for values that can be members of a `MathSet`.
/// Beyond equality and hashing no structure is assumed.
pub trait Element: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// Rejects values that cannot take part in set semantics (e.g. values that are not equal
    /// to themselves). Called on every element when a set is constructed.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Membership test, iteration and cardinality: the capabilities every set-like value offers.
pub trait SetLike<E: Element> {
    fn contains(&self, element: &E) -> bool;

    fn cardinality(&self) -> usize;

    fn members(&self) -> Box<dyn Iterator<Item = &E> + '_>;
}

impl<E: Element> SetLike<E> for HashSet<E> {
    fn contains(&self, element: &E) -> bool {
        HashSet::contains(self, element)
    }

    fn cardinality(&self) -> usize {
        self.len()
    }

    fn members(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.iter())
    }
}

impl<E: Element + Ord> SetLike<E> for BTreeSet<E> {
    fn contains(&self, element: &E) -> bool {
        BTreeSet::contains(self, element)
    }

    fn cardinality(&self) -> usize {
        self.len()
    }

    fn members(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.iter())
    }
}

/// Domain, codomain and pair membership: the capabilities shared by relations and functions.
pub trait RelationLike<A: Element, B: Element> {
    fn domain(&self) -> &MathSet<A>;

    fn codomain(&self) -> &MathSet<B>;

    fn relates(&self, a: &A, b: &B) -> bool;
}

/// A storage strategy for the pair set of a relation.
///
/// Implementations must agree on observable behaviour; they differ only in lookup cost
/// and memory footprint.
pub trait PairStore<A: Element, B: Element> {
    fn contains(&self, a: &A, b: &B) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all stored pairs, in no particular order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&A, &B)> + '_>;

    /// Iterates over every `b` with `(a, b)` stored.
    fn successors(&self, a: &A) -> Box<dyn Iterator<Item = &B> + '_>;
}
