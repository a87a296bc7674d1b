use crate::error::{MathError, Result, Side};
use crate::relation::{check_composable, check_within, MathRelation};
use crate::set::MathSet;
use crate::storage::types::{Encoding, EncodingSettings};
use crate::traits::{Element, RelationLike, SetLike};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A single-valued relation: every domain element maps to at most one codomain element.
///
/// Functions may be partial. `apply` outside the domain of definition is an error, never a
/// sentinel value.
#[derive(Clone)]
pub struct MathFunction<A: Element, B: Element> {
    relation: MathRelation<A, B>,
    table: HashMap<A, B>,
}

impl<A: Element, B: Element> MathFunction<A, B> {
    pub fn new(
        domain: MathSet<A>,
        codomain: MathSet<B>,
        pairs: impl IntoIterator<Item = (A, B)>,
    ) -> Result<Self> {
        Self::try_from(MathRelation::new(domain, codomain, pairs)?)
    }

    pub fn with_encoding(
        domain: MathSet<A>,
        codomain: MathSet<B>,
        pairs: impl IntoIterator<Item = (A, B)>,
        encoding: Encoding,
    ) -> Result<Self> {
        Self::try_from(MathRelation::with_encoding(domain, codomain, pairs, encoding)?)
    }

    /// Like `new`, but also requires a value for every domain element.
    pub fn total(
        domain: MathSet<A>,
        codomain: MathSet<B>,
        pairs: impl IntoIterator<Item = (A, B)>,
    ) -> Result<Self> {
        let function = Self::new(domain, codomain, pairs)?;
        if let Some(missing) = function
            .domain()
            .iter()
            .find(|a| !function.table.contains_key(*a))
        {
            return Err(MathError::undefined(missing));
        }
        Ok(function)
    }

    fn from_table(
        domain: MathSet<A>,
        codomain: MathSet<B>,
        table: HashMap<A, B>,
        settings: EncodingSettings,
    ) -> Result<Self> {
        let relation = MathRelation::with_settings(
            domain,
            codomain,
            table.iter().map(|(a, b)| (a.clone(), b.clone())),
            Encoding::Auto,
            settings,
        )?;
        Ok(Self { relation, table })
    }

    pub fn domain(&self) -> &MathSet<A> {
        self.relation.domain()
    }

    pub fn codomain(&self) -> &MathSet<B> {
        self.relation.codomain()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn as_relation(&self) -> &MathRelation<A, B> {
        &self.relation
    }

    pub fn into_relation(self) -> MathRelation<A, B> {
        self.relation
    }

    pub fn iter(&self) -> impl Iterator<Item = (&A, &B)> + '_ {
        self.table.iter()
    }

    /// Returns the value at `element`, or an undefined error if the function has none.
    pub fn apply(&self, element: &A) -> Result<&B> {
        self.table
            .get(element)
            .ok_or_else(|| MathError::undefined(element))
    }

    /// `self` followed by `other`. Where `other` is undefined at `self(a)` the composite is
    /// undefined at `a`.
    pub fn compose<C: Element>(&self, other: &MathFunction<B, C>) -> Result<MathFunction<A, C>> {
        check_composable(self, other)?;
        let table = self
            .table
            .iter()
            .filter_map(|(a, b)| other.table.get(b).map(|c| (a.clone(), c.clone())))
            .collect();
        MathFunction::from_table(
            self.domain().clone(),
            other.codomain().clone(),
            table,
            *self.relation.settings(),
        )
    }

    pub fn is_injective(&self) -> bool {
        let values: HashSet<&B> = self.table.values().collect();
        values.len() == self.table.len()
    }

    /// Every member of `codomain` is a value of the function.
    pub fn is_surjective(&self, codomain: &MathSet<B>) -> bool {
        let values: HashSet<&B> = self.table.values().collect();
        codomain.iter().all(|b| values.contains(b))
    }

    /// Injective and surjective onto `codomain`, judged on the pairs alone.
    pub fn is_bijective(&self, codomain: &MathSet<B>) -> bool {
        self.is_injective() && self.is_surjective(codomain)
    }

    pub fn is_total(&self) -> bool {
        self.table.len() == self.domain().cardinality()
    }

    /// The inverse relation. Rebuild a function from it with `MathFunction::try_from`, which
    /// succeeds exactly when `self` is injective.
    pub fn inverse(&self) -> MathRelation<B, A> {
        self.relation.inverse()
    }

    pub fn domain_of_definition(&self) -> MathSet<A> {
        MathSet::from_validated(self.table.keys().cloned().collect())
    }

    pub fn range(&self) -> MathSet<B> {
        MathSet::from_validated(self.table.values().cloned().collect())
    }

    pub fn image(&self, subset: &impl SetLike<A>) -> Result<MathSet<B>> {
        self.relation.image(subset)
    }

    /// The same function with its domain narrowed to `subset`.
    pub fn restrict(&self, subset: &MathSet<A>) -> Result<Self> {
        check_within(subset, self.domain(), Side::Domain)?;
        let table = self
            .table
            .iter()
            .filter(|(a, _)| subset.contains(a))
            .map(|(a, b)| (a.clone(), b.clone()))
            .collect();
        Self::from_table(
            subset.clone(),
            self.codomain().clone(),
            table,
            *self.relation.settings(),
        )
    }
}

impl<A: Element> MathFunction<A, A> {
    pub fn identity(set: MathSet<A>) -> Self {
        let table = set.iter().map(|a| (a.clone(), a.clone())).collect();
        Self {
            relation: MathRelation::identity(set),
            table,
        }
    }
}

/// Succeeds when no domain element relates to two different codomain elements.
impl<A: Element, B: Element> TryFrom<MathRelation<A, B>> for MathFunction<A, B> {
    type Error = MathError;

    fn try_from(relation: MathRelation<A, B>) -> Result<Self> {
        let mut table = HashMap::with_capacity(relation.len());
        for (a, b) in relation.iter() {
            match table.entry(a.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(b.clone());
                }
                Entry::Occupied(slot) => {
                    tracing::trace!(element = ?a, "relation is not single-valued");
                    return Err(MathError::NotAFunction {
                        element: format!("{a:?}"),
                        first: format!("{:?}", slot.get()),
                        second: format!("{b:?}"),
                    });
                }
            }
        }
        Ok(Self { relation, table })
    }
}

impl<A: Element, B: Element> RelationLike<A, B> for MathFunction<A, B> {
    fn domain(&self) -> &MathSet<A> {
        self.relation.domain()
    }

    fn codomain(&self) -> &MathSet<B> {
        self.relation.codomain()
    }

    fn relates(&self, a: &A, b: &B) -> bool {
        self.table.get(a) == Some(b)
    }
}

impl<A: Element, B: Element> PartialEq for MathFunction<A, B> {
    fn eq(&self, other: &Self) -> bool {
        self.relation == other.relation
    }
}

impl<A: Element, B: Element> Eq for MathFunction<A, B> {}

impl<A: Element, B: Element> Hash for MathFunction<A, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.relation.hash(state);
    }
}

impl<A: Element, B: Element> Element for MathFunction<A, B> {}

impl<A: Element, B: Element> fmt::Debug for MathFunction<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MathFunction")
            .field("domain", self.domain())
            .field("codomain", self.codomain())
            .field("table", &self.table)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn set<E: Element>(values: Vec<E>) -> MathSet<E> {
        MathSet::new(values).expect("valid elements")
    }

    fn letters() -> MathFunction<i32, &'static str> {
        MathFunction::new(set(vec![1, 2]), set(vec!["a", "b"]), vec![(1, "a"), (2, "b")])
            .expect("valid function")
    }

    #[test]
    fn multi_valued_pairs_are_rejected() {
        let err = MathFunction::new(set(vec![1]), set(vec!["a", "b"]), vec![(1, "a"), (1, "b")])
            .expect_err("1 maps to two values");
        assert_eq!(err.kind(), ErrorKind::NotAFunction);
    }

    #[test]
    fn repeated_identical_pairs_are_fine() {
        let f = MathFunction::new(set(vec![1]), set(vec!["a"]), vec![(1, "a"), (1, "a")])
            .expect("duplicates collapse");
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn referential_integrity_is_still_checked() {
        let err = MathFunction::new(set(vec![1]), set(vec!["a"]), vec![(2, "a")])
            .expect_err("2 is outside the domain");
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn apply_outside_definition_is_undefined() {
        let partial = MathFunction::new(set(vec![1, 2, 3]), set(vec!["a"]), vec![(1, "a")])
            .expect("valid partial function");
        assert_eq!(partial.apply(&1), Ok(&"a"));

        let err = partial.apply(&2).expect_err("2 has no value");
        assert_eq!(err.kind(), ErrorKind::Undefined);
        assert!(partial.apply(&42).is_err());
        assert!(!partial.is_total());
    }

    #[test]
    fn composition_of_functions() {
        let f = letters();
        let g = MathFunction::new(
            set(vec!["a", "b"]),
            set(vec![true, false]),
            vec![("a", true), ("b", false)],
        )
        .expect("valid");

        let h = f.compose(&g).expect("compatible");
        assert_eq!(h.apply(&1), Ok(&true));
        assert_eq!(h.apply(&2), Ok(&false));
        assert!(h.is_total());
    }

    #[test]
    fn composition_is_partial_where_second_is_undefined() {
        let f = letters();
        let g = MathFunction::new(set(vec!["a", "b"]), set(vec![0u8]), vec![("a", 0u8)])
            .expect("valid");

        let h = f.compose(&g).expect("compatible");
        assert_eq!(h.apply(&1), Ok(&0u8));
        assert_eq!(h.apply(&2).map_err(|e| e.kind()), Err(ErrorKind::Undefined));
        assert_eq!(h.domain(), f.domain());
    }

    #[test]
    fn composition_requires_matching_sets() {
        let f = letters();
        let g = MathFunction::new(set(vec!["a"]), set(vec![1]), vec![("a", 1)]).expect("valid");
        let err = f.compose(&g).expect_err("sets differ");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn injective_surjective_bijective() {
        let f = letters();
        assert!(f.is_injective());
        assert!(f.is_surjective(&set(vec!["a", "b"])));
        assert!(f.is_bijective(&set(vec!["a", "b"])));
        assert!(!f.is_surjective(&set(vec!["a", "b", "c"])));

        let collapse = MathFunction::new(set(vec![1, 2]), set(vec!["a", "b"]), vec![(1, "a"), (2, "a")])
            .expect("valid");
        assert!(!collapse.is_injective());
        assert!(!collapse.is_bijective(&set(vec!["a"])));
    }

    #[test]
    fn inverse_rebuilds_only_when_injective() {
        let f = letters();
        let back = MathFunction::try_from(f.inverse()).expect("injective function inverts");
        assert_eq!(back.apply(&"b"), Ok(&2));
        assert_eq!(back.compose(&f).expect("compatible"), MathFunction::identity(set(vec!["a", "b"])));

        let collapse = MathFunction::new(set(vec![1, 2]), set(vec!["a"]), vec![(1, "a"), (2, "a")])
            .expect("valid");
        let err = MathFunction::try_from(collapse.inverse()).expect_err("not injective");
        assert_eq!(err.kind(), ErrorKind::NotAFunction);
    }

    #[test]
    fn total_constructor_reports_missing_element() {
        let err = MathFunction::total(set(vec![1, 2]), set(vec!["a"]), vec![(1, "a")])
            .expect_err("2 has no value");
        assert_eq!(err, MathError::undefined(&2));
        assert!(MathFunction::total(set(vec![1]), set(vec!["a"]), vec![(1, "a")]).is_ok());
    }

    #[test]
    fn restrict_narrows_domain() {
        let f = letters();
        let narrowed = f.restrict(&set(vec![2])).expect("subset of domain");
        assert_eq!(narrowed.domain(), &set(vec![2]));
        assert_eq!(narrowed.apply(&2), Ok(&"b"));
        assert!(narrowed.apply(&1).is_err());
        assert!(f.restrict(&set(vec![5])).is_err());

        assert_eq!(f.image(&set(vec![1])).expect("in domain"), set(vec!["a"]));
        assert_eq!(f.range(), set(vec!["a", "b"]));
        assert_eq!(f.domain_of_definition(), set(vec![1, 2]));
    }

    #[test]
    fn encoding_does_not_affect_equality() {
        let hashed = MathFunction::with_encoding(
            set(vec![1, 2]),
            set(vec!["a", "b"]),
            vec![(1, "a"), (2, "b")],
            Encoding::Hashed,
        )
        .expect("valid");
        let dense = MathFunction::with_encoding(
            set(vec![1, 2]),
            set(vec!["a", "b"]),
            vec![(1, "a"), (2, "b")],
            Encoding::Dense,
        )
        .expect("valid");
        assert_eq!(hashed, dense);
        assert_eq!(dense.as_relation().encoding(), Encoding::Dense);
    }
}
