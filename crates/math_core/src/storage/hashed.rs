use crate::traits::{Element, PairStore};
use std::collections::{HashMap, HashSet};

/// Pairs kept as an adjacency map from each first component to its successors.
#[derive(Debug, Clone)]
pub struct HashedPairs<A: Element, B: Element> {
    adjacency: HashMap<A, HashSet<B>>,
    len: usize,
}

impl<A: Element, B: Element> HashedPairs<A, B> {
    pub fn new(pairs: impl IntoIterator<Item = (A, B)>) -> Self {
        let mut adjacency: HashMap<A, HashSet<B>> = HashMap::new();
        let mut len = 0;
        for (a, b) in pairs {
            if adjacency.entry(a).or_default().insert(b) {
                len += 1;
            }
        }
        Self { adjacency, len }
    }

    pub fn inverse(&self) -> HashedPairs<B, A> {
        HashedPairs::new(self.iter().map(|(a, b)| (b.clone(), a.clone())))
    }
}

impl<A: Element, B: Element> PairStore<A, B> for HashedPairs<A, B> {
    fn contains(&self, a: &A, b: &B) -> bool {
        self.adjacency
            .get(a)
            .map_or(false, |successors| successors.contains(b))
    }

    fn len(&self) -> usize {
        self.len
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&A, &B)> + '_> {
        Box::new(
            self.adjacency
                .iter()
                .flat_map(|(a, successors)| successors.iter().map(move |b| (a, b))),
        )
    }

    fn successors(&self, a: &A) -> Box<dyn Iterator<Item = &B> + '_> {
        match self.adjacency.get(a) {
            Some(successors) => Box::new(successors.iter()),
            None => Box::new(std::iter::empty()),
        }
    }
}
