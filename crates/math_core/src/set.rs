use crate::error::Result;
use crate::traits::{Element, SetLike};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable finite set.
///
/// Equality and hashing depend only on the members, never on construction order.
#[derive(Clone)]
pub struct MathSet<E: Element> {
    elements: HashSet<E>,
}

impl<E: Element> MathSet<E> {
    /// Builds a set from any collection, dropping duplicates.
    /// Fails if an element does not pass `Element::validate`.
    pub fn new<I>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
    {
        let iter = elements.into_iter();
        let mut set = HashSet::with_capacity(iter.size_hint().0);
        for element in iter {
            if let Err(err) = element.validate() {
                tracing::trace!(error = %err, "rejected set element");
                return Err(err);
            }
            set.insert(element);
        }
        Ok(Self { elements: set })
    }

    pub fn empty() -> Self {
        Self {
            elements: HashSet::new(),
        }
    }

    pub fn singleton(element: E) -> Result<Self> {
        Self::new(std::iter::once(element))
    }

    /// Wraps members that have already been validated (they come out of other sets).
    pub(crate) fn from_validated(elements: HashSet<E>) -> Self {
        Self { elements }
    }

    pub fn contains(&self, element: &E) -> bool {
        self.elements.contains(element)
    }

    pub fn cardinality(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.elements.iter()
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::from_validated(self.elements.union(&other.elements).cloned().collect())
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_validated(
            self.elements
                .intersection(&other.elements)
                .cloned()
                .collect(),
        )
    }

    pub fn difference(&self, other: &Self) -> Self {
        Self::from_validated(self.elements.difference(&other.elements).cloned().collect())
    }

    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self::from_validated(
            self.elements
                .symmetric_difference(&other.elements)
                .cloned()
                .collect(),
        )
    }

    pub fn is_subset(&self, other: &impl SetLike<E>) -> bool {
        self.cardinality() <= other.cardinality() && self.iter().all(|e| other.contains(e))
    }

    pub fn is_superset(&self, other: &impl SetLike<E>) -> bool {
        other.cardinality() <= self.cardinality() && other.members().all(|e| self.contains(e))
    }

    pub fn is_disjoint(&self, other: &impl SetLike<E>) -> bool {
        if self.cardinality() <= other.cardinality() {
            !self.iter().any(|e| other.contains(e))
        } else {
            !other.members().any(|e| self.contains(e))
        }
    }

    /// Returns a new set that also contains `element`.
    pub fn with_element(&self, element: E) -> Result<Self> {
        element.validate()?;
        let mut elements = self.elements.clone();
        elements.insert(element);
        Ok(Self::from_validated(elements))
    }

    /// Returns a new set without `element`.
    pub fn without_element(&self, element: &E) -> Self {
        let mut elements = self.elements.clone();
        elements.remove(element);
        Self::from_validated(elements)
    }

    pub fn cartesian_product<B: Element>(&self, other: &MathSet<B>) -> MathSet<(E, B)> {
        let mut pairs = HashSet::with_capacity(self.cardinality() * other.cardinality());
        for a in self.iter() {
            for b in other.iter() {
                pairs.insert((a.clone(), b.clone()));
            }
        }
        MathSet::from_validated(pairs)
    }

    pub fn to_sorted_vec(&self) -> Vec<E>
    where
        E: Ord,
    {
        let mut out: Vec<E> = self.elements.iter().cloned().collect();
        out.sort();
        out
    }
}

impl<E: Element> PartialEq for MathSet<E> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<E: Element> Eq for MathSet<E> {}

/// Combines member hashes with a wrapping sum, so the result ignores iteration order.
pub(crate) fn unordered_hash<T: Hash>(items: impl IntoIterator<Item = T>) -> u64 {
    items.into_iter().fold(0u64, |acc, item| {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        acc.wrapping_add(hasher.finish())
    })
}

impl<E: Element> Hash for MathSet<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements.len().hash(state);
        unordered_hash(&self.elements).hash(state);
    }
}

// Members were validated when the set was built.
impl<E: Element> Element for MathSet<E> {}

impl<E: Element> SetLike<E> for MathSet<E> {
    fn contains(&self, element: &E) -> bool {
        self.elements.contains(element)
    }

    fn cardinality(&self) -> usize {
        self.elements.len()
    }

    fn members(&self) -> Box<dyn Iterator<Item = &E> + '_> {
        Box::new(self.elements.iter())
    }
}

impl<'a, E: Element> IntoIterator for &'a MathSet<E> {
    type Item = &'a E;
    type IntoIter = std::collections::hash_set::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<E: Element> Default for MathSet<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E: Element> fmt::Debug for MathSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.elements.iter()).finish()
    }
}

impl<E: Element + fmt::Display> fmt::Display for MathSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "∅");
        }
        let mut rendered: Vec<String> = self.elements.iter().map(|e| e.to_string()).collect();
        rendered.sort();
        write!(f, "{{{}}}", rendered.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Value;
    use crate::error::ErrorKind;

    fn set(values: &[i32]) -> MathSet<i32> {
        MathSet::new(values.iter().copied()).expect("integers are valid elements")
    }

    #[test]
    fn union_merges_overlapping_sets() {
        let result = set(&[1, 2, 3]).union(&set(&[3, 4]));
        assert_eq!(result, set(&[1, 2, 3, 4]));
        assert_eq!(result.cardinality(), 4);
    }

    #[test]
    fn duplicates_collapse_and_order_is_irrelevant() {
        let a = set(&[3, 1, 2, 1, 3]);
        let b = set(&[1, 2, 3]);
        assert_eq!(a, b);
        assert_eq!(a.cardinality(), 3);

        let mut ha = DefaultHasher::new();
        let mut hb = DefaultHasher::new();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }

    #[test]
    fn difference_and_symmetric_difference() {
        let a = set(&[1, 2, 3]);
        let b = set(&[2, 3, 4]);
        assert_eq!(a.difference(&b), set(&[1]));
        assert_eq!(b.difference(&a), set(&[4]));
        assert!(a.difference(&a).is_empty());
        assert_eq!(a.symmetric_difference(&b), set(&[1, 4]));
    }

    #[test]
    fn intersection_with_empty_is_empty() {
        let a = set(&[1, 2]);
        assert!(a.intersection(&MathSet::empty()).is_empty());
        assert_eq!(a.intersection(&set(&[2, 5])), set(&[2]));
    }

    #[test]
    fn subset_superset_disjoint() {
        let small = set(&[1, 2]);
        let big = set(&[1, 2, 3]);
        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));
        assert!(big.is_superset(&small));
        assert!(small.is_disjoint(&set(&[7, 8])));
        assert!(!small.is_disjoint(&big));
        assert!(MathSet::<i32>::empty().is_subset(&small));
    }

    #[test]
    fn predicates_accept_std_sets() {
        let std_set: HashSet<i32> = [1, 2, 3, 4].into_iter().collect();
        assert!(set(&[1, 4]).is_subset(&std_set));
        assert!(!set(&[1, 9]).is_subset(&std_set));
    }

    #[test]
    fn construction_rejects_nan() {
        let err = MathSet::new(vec![Value::Int(1), Value::Float(f64::NAN)])
            .expect_err("NaN should be rejected");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn with_and_without_element_leave_original_untouched() {
        let base = set(&[1, 2]);
        let grown = base.with_element(3).expect("valid element");
        let shrunk = base.without_element(&1);
        assert_eq!(base, set(&[1, 2]));
        assert_eq!(grown, set(&[1, 2, 3]));
        assert_eq!(shrunk, set(&[2]));
    }

    #[test]
    fn cartesian_product_pairs_every_member() {
        let letters = MathSet::new(["a", "b"]).expect("valid");
        let product = set(&[1, 2, 3]).cartesian_product(&letters);
        assert_eq!(product.cardinality(), 6);
        assert!(product.contains(&(2, "b")));
    }

    #[test]
    fn sets_of_sets_hash_by_content() {
        let family = MathSet::new(vec![set(&[1, 2]), set(&[2, 1]), set(&[3])]).expect("valid");
        assert_eq!(family.cardinality(), 2);
        assert!(family.contains(&set(&[1, 2])));
    }

    #[test]
    fn display_sorts_rendered_members() {
        assert_eq!(MathSet::<i32>::empty().to_string(), "∅");
        assert_eq!(set(&[2, 1]).to_string(), "{1, 2}");
        assert_eq!(set(&[3, 1, 2]).to_sorted_vec(), vec![1, 2, 3]);
    }
}
