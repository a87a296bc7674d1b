//! Encoding selection for relation pair storage.

use serde::{Deserialize, Serialize};

/// Which storage strategy a relation uses for its pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// Choose from the relation's size and density using `EncodingSettings`.
    Auto,
    /// Adjacency map of hash sets.
    Hashed,
    /// Boolean matrix over the indexed domain and codomain.
    Dense,
    /// Compressed sparse row matrix over the indexed domain and codomain.
    Sparse,
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Auto
    }
}

/// Thresholds used to resolve `Encoding::Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodingSettings {
    /// Largest `|domain| * |codomain|` for which a dense matrix is considered.
    pub dense_max_cells: usize,
    /// Minimum fraction of set cells for a dense matrix to be chosen.
    pub dense_min_density: f64,
    /// Smallest `|domain| * |codomain|` for which the sparse encoding is chosen.
    pub sparse_min_cells: usize,
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            dense_max_cells: 4096,
            dense_min_density: 0.25,
            sparse_min_cells: 1024,
        }
    }
}

impl EncodingSettings {
    /// Resolves `requested` to a concrete encoding. Explicit requests are returned unchanged.
    pub fn resolve(&self, requested: Encoding, rows: usize, cols: usize, pairs: usize) -> Encoding {
        if requested != Encoding::Auto {
            return requested;
        }

        let cells = rows.saturating_mul(cols);
        let resolved = if cells == 0 {
            Encoding::Hashed
        } else if cells <= self.dense_max_cells
            && pairs as f64 / cells as f64 >= self.dense_min_density
        {
            Encoding::Dense
        } else if cells >= self.sparse_min_cells {
            Encoding::Sparse
        } else {
            Encoding::Hashed
        };

        tracing::debug!(rows, cols, pairs, ?resolved, "resolved pair encoding");
        resolved
    }
}
