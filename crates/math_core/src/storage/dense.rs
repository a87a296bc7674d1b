use super::indexer::Indexer;
use crate::set::MathSet;
use crate::traits::{Element, PairStore};
use nalgebra::DMatrix;

/// Pairs kept as a boolean adjacency matrix.
/// Row `i` is the `i`-th domain element, column `j` the `j`-th codomain element.
#[derive(Debug, Clone)]
pub struct DensePairs<A: Element, B: Element> {
    rows: Indexer<A>,
    cols: Indexer<B>,
    matrix: DMatrix<bool>,
    len: usize,
}

impl<A: Element, B: Element> DensePairs<A, B> {
    /// Pairs must reference members of `domain` and `codomain`.
    pub fn new(
        domain: &MathSet<A>,
        codomain: &MathSet<B>,
        pairs: impl IntoIterator<Item = (A, B)>,
    ) -> Self {
        let rows = Indexer::new(domain);
        let cols = Indexer::new(codomain);
        let mut matrix = DMatrix::from_element(rows.len(), cols.len(), false);
        for (a, b) in pairs {
            if let (Some(i), Some(j)) = (rows.position(&a), cols.position(&b)) {
                matrix[(i, j)] = true;
            }
        }
        Self::from_matrix(rows, cols, matrix)
    }

    fn from_matrix(rows: Indexer<A>, cols: Indexer<B>, matrix: DMatrix<bool>) -> Self {
        let len = matrix.iter().filter(|&&cell| cell).count();
        Self {
            rows,
            cols,
            matrix,
            len,
        }
    }

    pub fn matrix(&self) -> &DMatrix<bool> {
        &self.matrix
    }

    pub fn inverse(&self) -> DensePairs<B, A> {
        DensePairs {
            rows: self.cols.clone(),
            cols: self.rows.clone(),
            matrix: self.matrix.transpose(),
            len: self.len,
        }
    }

    /// Boolean matrix product. The codomain of `self` and the domain of `other` must be the
    /// same set; their indexings may differ, so `other` is re-indexed first.
    pub fn compose<C: Element>(&self, other: &DensePairs<B, C>) -> DensePairs<A, C> {
        let left = self.matrix.map(|cell| cell as u32);
        let mut right = DMatrix::<u32>::zeros(self.cols.len(), other.cols.len());
        for k in 0..other.rows.len() {
            let Some(row) = self.cols.position(other.rows.get(k)) else {
                continue;
            };
            for j in 0..other.cols.len() {
                if other.matrix[(k, j)] {
                    right[(row, j)] = 1;
                }
            }
        }

        let product = left * right;
        tracing::debug!(
            rows = product.nrows(),
            cols = product.ncols(),
            "composed dense relations via matrix product"
        );
        DensePairs::from_matrix(
            self.rows.clone(),
            other.cols.clone(),
            product.map(|paths| paths > 0),
        )
    }
}

impl<A: Element, B: Element> PairStore<A, B> for DensePairs<A, B> {
    fn contains(&self, a: &A, b: &B) -> bool {
        match (self.rows.position(a), self.cols.position(b)) {
            (Some(i), Some(j)) => self.matrix[(i, j)],
            _ => false,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&A, &B)> + '_> {
        Box::new((0..self.rows.len()).flat_map(move |i| {
            (0..self.cols.len())
                .filter(move |&j| self.matrix[(i, j)])
                .map(move |j| (self.rows.get(i), self.cols.get(j)))
        }))
    }

    fn successors(&self, a: &A) -> Box<dyn Iterator<Item = &B> + '_> {
        match self.rows.position(a) {
            Some(i) => Box::new(
                (0..self.cols.len())
                    .filter(move |&j| self.matrix[(i, j)])
                    .map(move |j| self.cols.get(j)),
            ),
            None => Box::new(std::iter::empty()),
        }
    }
}
