//! Pluggable storage for the pair sets of relations.
//!
//! Every strategy implements [`PairStore`]; a relation holds a [`PairStorage`] that dispatches
//! to the concrete one. The choice never changes observable results, only costs:
//! hashed adjacency for small or irregular relations, a dense `nalgebra` matrix for small
//! dense ones (composition becomes a matrix product), CSR for large sparse ones.

pub mod dense;
pub mod hashed;
pub mod indexer;
pub mod sparse;
pub mod types;

use self::dense::DensePairs;
use self::hashed::HashedPairs;
use self::sparse::SparsePairs;
use self::types::{Encoding, EncodingSettings};
use crate::set::MathSet;
use crate::traits::{Element, PairStore};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub(crate) enum PairStorage<A: Element, B: Element> {
    Hashed(HashedPairs<A, B>),
    Dense(DensePairs<A, B>),
    Sparse(SparsePairs<A, B>),
}

impl<A: Element, B: Element> PairStorage<A, B> {
    /// Builds storage for already-validated, deduplicated pairs.
    pub(crate) fn build(
        requested: Encoding,
        settings: &EncodingSettings,
        domain: &MathSet<A>,
        codomain: &MathSet<B>,
        pairs: HashSet<(A, B)>,
    ) -> Self {
        let encoding = settings.resolve(
            requested,
            domain.cardinality(),
            codomain.cardinality(),
            pairs.len(),
        );
        match encoding {
            Encoding::Dense => PairStorage::Dense(DensePairs::new(domain, codomain, pairs)),
            Encoding::Sparse => PairStorage::Sparse(SparsePairs::new(domain, codomain, pairs)),
            Encoding::Hashed | Encoding::Auto => PairStorage::Hashed(HashedPairs::new(pairs)),
        }
    }

    pub(crate) fn encoding(&self) -> Encoding {
        match self {
            PairStorage::Hashed(_) => Encoding::Hashed,
            PairStorage::Dense(_) => Encoding::Dense,
            PairStorage::Sparse(_) => Encoding::Sparse,
        }
    }

    pub(crate) fn inverse(&self) -> PairStorage<B, A> {
        match self {
            PairStorage::Hashed(p) => PairStorage::Hashed(p.inverse()),
            PairStorage::Dense(p) => PairStorage::Dense(p.inverse()),
            PairStorage::Sparse(p) => PairStorage::Sparse(p.inverse()),
        }
    }

    /// Matrix-product composition, available when both sides are dense.
    pub(crate) fn compose_dense<C: Element>(
        &self,
        other: &PairStorage<B, C>,
    ) -> Option<PairStorage<A, C>> {
        match (self, other) {
            (PairStorage::Dense(left), PairStorage::Dense(right)) => {
                Some(PairStorage::Dense(left.compose(right)))
            }
            _ => None,
        }
    }

    pub(crate) fn to_pair_set(&self) -> HashSet<(A, B)> {
        self.iter().map(|(a, b)| (a.clone(), b.clone())).collect()
    }
}

impl<A: Element, B: Element> PairStore<A, B> for PairStorage<A, B> {
    fn contains(&self, a: &A, b: &B) -> bool {
        match self {
            PairStorage::Hashed(p) => p.contains(a, b),
            PairStorage::Dense(p) => p.contains(a, b),
            PairStorage::Sparse(p) => p.contains(a, b),
        }
    }

    fn len(&self) -> usize {
        match self {
            PairStorage::Hashed(p) => p.len(),
            PairStorage::Dense(p) => p.len(),
            PairStorage::Sparse(p) => p.len(),
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&A, &B)> + '_> {
        match self {
            PairStorage::Hashed(p) => p.iter(),
            PairStorage::Dense(p) => p.iter(),
            PairStorage::Sparse(p) => p.iter(),
        }
    }

    fn successors(&self, a: &A) -> Box<dyn Iterator<Item = &B> + '_> {
        match self {
            PairStorage::Hashed(p) => p.successors(a),
            PairStorage::Dense(p) => p.successors(a),
            PairStorage::Sparse(p) => p.successors(a),
        }
    }
}
