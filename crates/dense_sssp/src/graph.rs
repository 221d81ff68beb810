use std::fmt;

use crate::INF;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("cannot allocate a {vertex_count}x{vertex_count} weight matrix")]
    TooLarge { vertex_count: usize },
}

/// Dense adjacency matrix of a directed graph.
///
/// - `weight(i, j)` is the weight of the edge `i -> j`, or [`INF`] when the
///   edge is absent.
/// - Weights are stored row-major, so row `i` holds the outgoing edges of
///   vertex `i`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GraphStore {
    vertex_count: usize,
    weights: Vec<u64>,
}

impl GraphStore {
    /// Builds a graph with every edge absent.
    pub fn try_new(vertex_count: usize) -> Result<Self, GraphError> {
        let len = vertex_count
            .checked_mul(vertex_count)
            .ok_or(GraphError::TooLarge { vertex_count })?;

        let mut weights = Vec::new();
        weights
            .try_reserve_exact(len)
            .map_err(|_| GraphError::TooLarge { vertex_count })?;
        weights.resize(len, INF);

        Ok(Self {
            vertex_count,
            weights,
        })
    }

    /// Takes ownership of `n * n` row-major weights.
    pub fn from_row_major(vertex_count: usize, mut weights: Vec<u64>) -> Self {
        assert_eq!(
            Some(weights.len()),
            vertex_count.checked_mul(vertex_count),
            "weight matrix must be square"
        );
        for w in &mut weights {
            *w = (*w).min(INF);
        }

        Self {
            vertex_count,
            weights,
        }
    }

    /// Builds a graph from explicit rows; `None` marks an absent edge.
    pub fn from_rows(rows: &[Vec<Option<u64>>]) -> Self {
        let n = rows.len();
        let mut weights = Vec::with_capacity(n * n);
        for row in rows {
            assert_eq!(row.len(), n, "weight matrix must be square");
            weights.extend(row.iter().map(|w| w.map_or(INF, |w| w.min(INF))));
        }

        Self {
            vertex_count: n,
            weights,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn weight(&self, from: usize, to: usize) -> u64 {
        self.weights[self.index(from, to)]
    }

    #[inline]
    pub fn set_weight(&mut self, from: usize, to: usize, weight: u64) {
        let idx = self.index(from, to);
        self.weights[idx] = weight.min(INF);
    }

    #[inline]
    pub fn row(&self, from: usize) -> &[u64] {
        assert!(from < self.vertex_count, "vertex out of range");
        let start = from * self.vertex_count;
        &self.weights[start..start + self.vertex_count]
    }

    pub fn edge_count(&self) -> usize {
        self.weights.iter().filter(|&&w| w < INF).count()
    }

    #[inline]
    fn index(&self, from: usize, to: usize) -> usize {
        assert!(
            from < self.vertex_count && to < self.vertex_count,
            "edge ({from}, {to}) out of range for {} vertices",
            self.vertex_count
        );
        from * self.vertex_count + to
    }
}

/// Writes the graph in the whitespace-separated loader format.
impl fmt::Display for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.vertex_count)?;
        for u in 0..self.vertex_count {
            for (j, &w) in self.row(u).iter().enumerate() {
                if j > 0 {
                    f.write_str("  ")?;
                }
                if w >= INF {
                    f.write_str("*")?;
                } else {
                    write!(f, "{w}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
