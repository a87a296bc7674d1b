use crate::error::{MathError, Result, Side};
use crate::set::{unordered_hash, MathSet};
use crate::storage::types::{Encoding, EncodingSettings};
use crate::storage::PairStorage;
use crate::traits::{Element, PairStore, RelationLike, SetLike};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable binary relation between a domain set and a codomain set.
///
/// Every pair references members of the declared sets; this is checked when the relation is
/// built. Equality compares the two sets and the pair set, never the storage encoding.
#[derive(Clone)]
pub struct MathRelation<A: Element, B: Element> {
    domain: MathSet<A>,
    codomain: MathSet<B>,
    pairs: PairStorage<A, B>,
    settings: EncodingSettings,
}

/// Fails unless the codomain of `left` is the same set as the domain of `right`.
pub(crate) fn check_composable<A, B, C>(
    left: &impl RelationLike<A, B>,
    right: &impl RelationLike<B, C>,
) -> Result<()>
where
    A: Element,
    B: Element,
    C: Element,
{
    if left.codomain() != right.domain() {
        return Err(MathError::TypeMismatch(format!(
            "codomain of the left operand ({} elements) is not the domain of the right operand ({} elements)",
            left.codomain().cardinality(),
            right.domain().cardinality()
        )));
    }
    Ok(())
}

/// Fails with a domain error if `subset` has a member outside `carrier`.
pub(crate) fn check_within<E: Element>(
    subset: &impl SetLike<E>,
    carrier: &MathSet<E>,
    side: Side,
) -> Result<()> {
    match subset.members().find(|e| !carrier.contains(e)) {
        Some(outside) => Err(MathError::domain(side, outside)),
        None => Ok(()),
    }
}

impl<A: Element, B: Element> MathRelation<A, B> {
    pub fn new(
        domain: MathSet<A>,
        codomain: MathSet<B>,
        pairs: impl IntoIterator<Item = (A, B)>,
    ) -> Result<Self> {
        Self::with_settings(domain, codomain, pairs, Encoding::Auto, EncodingSettings::default())
    }

    pub fn with_encoding(
        domain: MathSet<A>,
        codomain: MathSet<B>,
        pairs: impl IntoIterator<Item = (A, B)>,
        encoding: Encoding,
    ) -> Result<Self> {
        Self::with_settings(domain, codomain, pairs, encoding, EncodingSettings::default())
    }

    /// Validates referential integrity and stores the pairs with the requested encoding.
    /// Relations derived from this one (compositions, inverses) reuse `settings`.
    pub fn with_settings(
        domain: MathSet<A>,
        codomain: MathSet<B>,
        pairs: impl IntoIterator<Item = (A, B)>,
        encoding: Encoding,
        settings: EncodingSettings,
    ) -> Result<Self> {
        let mut checked = HashSet::new();
        for (a, b) in pairs {
            if !domain.contains(&a) {
                tracing::trace!(element = ?a, "pair outside relation domain");
                return Err(MathError::domain(Side::Domain, &a));
            }
            if !codomain.contains(&b) {
                tracing::trace!(element = ?b, "pair outside relation codomain");
                return Err(MathError::domain(Side::Codomain, &b));
            }
            checked.insert((a, b));
        }
        let pairs = PairStorage::build(encoding, &settings, &domain, &codomain, checked);
        Ok(Self {
            domain,
            codomain,
            pairs,
            settings,
        })
    }

    /// The relation containing every pair of `domain × codomain`.
    pub fn full(domain: MathSet<A>, codomain: MathSet<B>) -> Self {
        let pairs = domain.cartesian_product(&codomain).iter().cloned().collect();
        let settings = EncodingSettings::default();
        let pairs = PairStorage::build(Encoding::Auto, &settings, &domain, &codomain, pairs);
        Self {
            domain,
            codomain,
            pairs,
            settings,
        }
    }

    fn from_storage(
        domain: MathSet<A>,
        codomain: MathSet<B>,
        pairs: PairStorage<A, B>,
        settings: EncodingSettings,
    ) -> Self {
        Self {
            domain,
            codomain,
            pairs,
            settings,
        }
    }

    pub fn domain(&self) -> &MathSet<A> {
        &self.domain
    }

    pub fn codomain(&self) -> &MathSet<B> {
        &self.codomain
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, a: &A, b: &B) -> bool {
        self.pairs.contains(a, b)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&A, &B)> + '_ {
        self.pairs.iter()
    }

    pub(crate) fn successors<'a>(&'a self, a: &A) -> impl Iterator<Item = &'a B> + 'a {
        self.pairs.successors(a)
    }

    pub fn encoding(&self) -> Encoding {
        self.pairs.encoding()
    }

    pub fn settings(&self) -> &EncodingSettings {
        &self.settings
    }

    /// Returns an equal relation stored with a different encoding.
    pub fn reencode(&self, encoding: Encoding) -> Self {
        let pairs = PairStorage::build(
            encoding,
            &self.settings,
            &self.domain,
            &self.codomain,
            self.pairs.to_pair_set(),
        );
        Self::from_storage(self.domain.clone(), self.codomain.clone(), pairs, self.settings)
    }

    /// `(a, c)` is in the result iff some `b` has `(a, b)` in `self` and `(b, c)` in `other`.
    pub fn compose<C: Element>(&self, other: &MathRelation<B, C>) -> Result<MathRelation<A, C>> {
        check_composable(self, other)?;

        let pairs = match self.pairs.compose_dense(&other.pairs) {
            Some(dense) => dense,
            None => {
                let mut composed = HashSet::new();
                for (a, b) in self.iter() {
                    for c in other.successors(b) {
                        composed.insert((a.clone(), c.clone()));
                    }
                }
                PairStorage::build(
                    Encoding::Auto,
                    &self.settings,
                    &self.domain,
                    &other.codomain,
                    composed,
                )
            }
        };

        Ok(MathRelation::from_storage(
            self.domain.clone(),
            other.codomain.clone(),
            pairs,
            self.settings,
        ))
    }

    /// Swaps the components of every pair, and the domain with the codomain.
    pub fn inverse(&self) -> MathRelation<B, A> {
        MathRelation::from_storage(
            self.codomain.clone(),
            self.domain.clone(),
            self.pairs.inverse(),
            self.settings,
        )
    }

    /// Everything related to some member of `subset`, which must lie within the domain.
    pub fn image(&self, subset: &impl SetLike<A>) -> Result<MathSet<B>> {
        check_within(subset, &self.domain, Side::Domain)?;
        let mut image = HashSet::new();
        for a in subset.members() {
            image.extend(self.successors(a).cloned());
        }
        Ok(MathSet::from_validated(image))
    }

    /// Everything related to some member of `subset`, which must lie within the codomain.
    pub fn preimage(&self, subset: &impl SetLike<B>) -> Result<MathSet<A>> {
        check_within(subset, &self.codomain, Side::Codomain)?;
        let preimage = self
            .iter()
            .filter(|(_, b)| subset.contains(b))
            .map(|(a, _)| a.clone())
            .collect();
        Ok(MathSet::from_validated(preimage))
    }

    /// Domain members that appear as a first component.
    pub fn domain_of_definition(&self) -> MathSet<A> {
        MathSet::from_validated(self.iter().map(|(a, _)| a.clone()).collect())
    }

    /// Codomain members that appear as a second component.
    pub fn range(&self) -> MathSet<B> {
        MathSet::from_validated(self.iter().map(|(_, b)| b.clone()).collect())
    }
}

/// Predicates for relations on a single set. Each fails with a type mismatch when the domain
/// and codomain differ.
impl<A: Element> MathRelation<A, A> {
    pub fn identity(set: MathSet<A>) -> Self {
        let pairs = set.iter().map(|a| (a.clone(), a.clone())).collect();
        let settings = EncodingSettings::default();
        let pairs = PairStorage::build(Encoding::Auto, &settings, &set, &set, pairs);
        Self::from_storage(set.clone(), set, pairs, settings)
    }

    fn require_endorelation(&self) -> Result<()> {
        if self.domain != self.codomain {
            return Err(MathError::TypeMismatch(
                "property is only defined when the domain equals the codomain".to_string(),
            ));
        }
        Ok(())
    }

    /// Every member relates to itself. The empty relation on the empty set is reflexive.
    pub fn is_reflexive(&self) -> Result<bool> {
        self.require_endorelation()?;
        Ok(self.domain.iter().all(|a| self.contains(a, a)))
    }

    pub fn is_symmetric(&self) -> Result<bool> {
        self.require_endorelation()?;
        Ok(self.iter().all(|(a, b)| self.contains(b, a)))
    }

    pub fn is_antisymmetric(&self) -> Result<bool> {
        self.require_endorelation()?;
        Ok(self.iter().all(|(a, b)| a == b || !self.contains(b, a)))
    }

    pub fn is_transitive(&self) -> Result<bool> {
        self.require_endorelation()?;
        Ok(self
            .iter()
            .all(|(a, b)| self.successors(b).all(|c| self.contains(a, c))))
    }

    pub fn is_equivalence(&self) -> Result<bool> {
        Ok(self.is_reflexive()? && self.is_symmetric()? && self.is_transitive()?)
    }

    pub fn is_partial_order(&self) -> Result<bool> {
        Ok(self.is_reflexive()? && self.is_antisymmetric()? && self.is_transitive()?)
    }
}

impl<A: Element, B: Element> RelationLike<A, B> for MathRelation<A, B> {
    fn domain(&self) -> &MathSet<A> {
        &self.domain
    }

    fn codomain(&self) -> &MathSet<B> {
        &self.codomain
    }

    fn relates(&self, a: &A, b: &B) -> bool {
        self.contains(a, b)
    }
}

impl<A: Element, B: Element> PartialEq for MathRelation<A, B> {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain
            && self.codomain == other.codomain
            && self.len() == other.len()
            && self.iter().all(|(a, b)| other.contains(a, b))
    }
}

impl<A: Element, B: Element> Eq for MathRelation<A, B> {}

impl<A: Element, B: Element> Hash for MathRelation<A, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.domain.hash(state);
        self.codomain.hash(state);
        self.len().hash(state);
        unordered_hash(self.iter()).hash(state);
    }
}

impl<A: Element, B: Element> Element for MathRelation<A, B> {}

impl<A: Element, B: Element> fmt::Debug for MathRelation<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MathRelation")
            .field("domain", &self.domain)
            .field("codomain", &self.codomain)
            .field("pairs", &PairsDebug(self))
            .field("encoding", &self.encoding())
            .finish()
    }
}

struct PairsDebug<'a, A: Element, B: Element>(&'a MathRelation<A, B>);

impl<A: Element, B: Element> fmt::Debug for PairsDebug<'_, A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}
