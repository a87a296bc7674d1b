use super::indexer::Indexer;
use crate::set::MathSet;
use crate::traits::{Element, PairStore};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

/// Pairs kept as a CSR pattern; only the positions of stored entries matter.
#[derive(Debug, Clone)]
pub struct SparsePairs<A: Element, B: Element> {
    rows: Indexer<A>,
    cols: Indexer<B>,
    matrix: CsrMatrix<u8>,
}

impl<A: Element, B: Element> SparsePairs<A, B> {
    /// Pairs must be distinct and reference members of `domain` and `codomain`.
    pub fn new(
        domain: &MathSet<A>,
        codomain: &MathSet<B>,
        pairs: impl IntoIterator<Item = (A, B)>,
    ) -> Self {
        let rows = Indexer::new(domain);
        let cols = Indexer::new(codomain);
        let mut coo = CooMatrix::new(rows.len(), cols.len());
        for (a, b) in pairs {
            if let (Some(i), Some(j)) = (rows.position(&a), cols.position(&b)) {
                coo.push(i, j, 1u8);
            }
        }
        Self {
            rows,
            cols,
            matrix: CsrMatrix::from(&coo),
        }
    }

    pub fn matrix(&self) -> &CsrMatrix<u8> {
        &self.matrix
    }

    pub fn inverse(&self) -> SparsePairs<B, A> {
        SparsePairs {
            rows: self.cols.clone(),
            cols: self.rows.clone(),
            matrix: self.matrix.transpose(),
        }
    }

    /// Sorted column indices stored in row `i`.
    fn row_columns(&self, i: usize) -> &[usize] {
        let offsets = self.matrix.row_offsets();
        &self.matrix.col_indices()[offsets[i]..offsets[i + 1]]
    }
}

impl<A: Element, B: Element> PairStore<A, B> for SparsePairs<A, B> {
    fn contains(&self, a: &A, b: &B) -> bool {
        match (self.rows.position(a), self.cols.position(b)) {
            (Some(i), Some(j)) => self.row_columns(i).binary_search(&j).is_ok(),
            _ => false,
        }
    }

    fn len(&self) -> usize {
        self.matrix.nnz()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&A, &B)> + '_> {
        Box::new((0..self.rows.len()).flat_map(move |i| {
            self.row_columns(i)
                .iter()
                .map(move |&j| (self.rows.get(i), self.cols.get(j)))
        }))
    }

    fn successors(&self, a: &A) -> Box<dyn Iterator<Item = &B> + '_> {
        match self.rows.position(a) {
            Some(i) => Box::new(self.row_columns(i).iter().map(move |&j| self.cols.get(j))),
            None => Box::new(std::iter::empty()),
        }
    }
}
