use tracing::debug;
use tracing::trace;

use crate::INF;
use crate::graph::GraphStore;

/// Which distances a run has to produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Goal {
    AllDistances,
    OneDistance(usize),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("illegal destination vertex {destination} (graph has {vertex_count} vertices)")]
pub struct InvalidDestination {
    pub destination: usize,
    pub vertex_count: usize,
}

impl Goal {
    pub fn validate(self, vertex_count: usize) -> Result<Self, InvalidDestination> {
        match self {
            Self::OneDistance(destination) if destination >= vertex_count => {
                Err(InvalidDestination {
                    destination,
                    vertex_count,
                })
            }
            goal => Ok(goal),
        }
    }
}

/// Distances from vertex 0; [`INF`] marks vertices with no known path.
///
/// A table from a one-destination run holds final distances for the
/// destination and for vertices settled before it; all other vertices read
/// as unreachable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistanceTable {
    dist: Vec<u64>,
}

impl DistanceTable {
    #[inline]
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    #[inline]
    pub fn get(&self, v: usize) -> Option<u64> {
        let d = self.dist[v];
        (d < INF).then_some(d)
    }

    #[inline]
    pub fn is_reachable(&self, v: usize) -> bool {
        self.dist[v] < INF
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.dist
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<u64>)> + '_ {
        (0..self.dist.len()).map(|v| (v, self.get(v)))
    }
}

/// Outcome of one selection/relaxation round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    /// `vertex` is settled at its final `distance` and its edges relaxed.
    Settled { vertex: usize, distance: u64 },
    /// Every remaining unsettled vertex is unreachable (or none remain).
    Exhausted,
    /// The destination was selected; it is not marked settled.
    ReachedDestination { vertex: usize, distance: u64 },
}

/// Label-setting shortest paths from vertex 0 over a dense matrix.
///
/// Selection is a linear scan over the unsettled vertices, so a full run is
/// `O(n^2)`. Ties are broken by the smallest vertex index.
#[derive(Debug)]
pub struct ShortestPathEngine<'g> {
    graph: &'g GraphStore,
    dist: Vec<u64>,
    settled: Vec<bool>,
    destination: Option<usize>,
}

impl<'g> ShortestPathEngine<'g> {
    pub fn new(graph: &'g GraphStore) -> Self {
        let n = graph.vertex_count();
        assert!(n >= 1, "graph must have at least one vertex");

        let mut dist = vec![INF; n];
        dist[0] = 0;

        Self {
            graph,
            dist,
            settled: vec![false; n],
            destination: None,
        }
    }

    /// Stops the next [`step`](Self::step) that selects `destination`.
    pub fn with_destination(mut self, destination: usize) -> Self {
        assert!(
            destination < self.graph.vertex_count(),
            "destination {destination} out of range for {} vertices",
            self.graph.vertex_count()
        );
        self.destination = Some(destination);
        self
    }

    #[inline]
    pub fn distances(&self) -> &[u64] {
        &self.dist
    }

    #[inline]
    pub fn is_settled(&self, v: usize) -> bool {
        self.settled[v]
    }

    pub fn step(&mut self) -> Step {
        let Some(current) = self.select_min() else {
            return Step::Exhausted;
        };
        let distance = self.dist[current];
        trace!(vertex = current, distance, "selected");

        if self.destination == Some(current) {
            return Step::ReachedDestination {
                vertex: current,
                distance,
            };
        }

        self.settled[current] = true;
        self.relax(current, distance);
        Step::Settled {
            vertex: current,
            distance,
        }
    }

    /// Runs to completion for `goal`, replacing any destination set earlier.
    ///
    /// After an early exit only the destination and the settled vertices keep
    /// their distance; every other slot is reset to [`INF`].
    pub fn run(mut self, goal: Goal) -> DistanceTable {
        match goal {
            Goal::OneDistance(destination) => self = self.with_destination(destination),
            Goal::AllDistances => self.destination = None,
        }

        let n = self.graph.vertex_count();
        let mut settled = 0_usize;
        for _ in 0..n {
            match self.step() {
                Step::Settled { .. } => settled += 1,
                Step::Exhausted => break,
                Step::ReachedDestination { vertex, .. } => {
                    self.discard_tentative(vertex);
                    break;
                }
            }
        }
        debug!(vertices = n, settled, ?goal, "shortest path run finished");

        DistanceTable { dist: self.dist }
    }

    fn discard_tentative(&mut self, keep: usize) {
        for (v, (d, &done)) in self.dist.iter_mut().zip(&self.settled).enumerate() {
            if !done && v != keep {
                *d = INF;
            }
        }
    }

    /// Unsettled vertex with the smallest finite distance, first index on ties.
    fn select_min(&self) -> Option<usize> {
        let mut best = None;
        let mut best_dist = INF;
        for (v, (&d, &done)) in self.dist.iter().zip(&self.settled).enumerate() {
            if !done && d < best_dist {
                best_dist = d;
                best = Some(v);
            }
        }
        best
    }

    fn relax(&mut self, current: usize, distance: u64) {
        let graph = self.graph;
        // vertex 0 is always settled first, so it is never a target
        for (v, &w) in graph.row(current).iter().enumerate().skip(1) {
            if self.settled[v] {
                continue;
            }
            let cand = distance.saturating_add(w).min(INF);
            if cand < self.dist[v] {
                self.dist[v] = cand;
            }
        }
    }
}

pub fn shortest_distances(graph: &GraphStore, goal: Goal) -> DistanceTable {
    ShortestPathEngine::new(graph).run(goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_graph() -> GraphStore {
        GraphStore::from_rows(&[
            vec![None, Some(1), Some(4)],
            vec![None, None, Some(1)],
            vec![None, None, None],
        ])
    }

    #[test]
    fn three_vertex_example() {
        let table = shortest_distances(&example_graph(), Goal::AllDistances);
        assert_eq!(table.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn single_vertex() {
        let g = GraphStore::from_rows(&[vec![None]]);
        let table = shortest_distances(&g, Goal::AllDistances);
        assert_eq!(table.as_slice(), &[0]);
        let table = shortest_distances(&g, Goal::OneDistance(0));
        assert_eq!(table.get(0), Some(0));
    }

    #[test]
    fn unreachable_vertex_stays_infinite() {
        let g = GraphStore::from_rows(&[
            vec![None, Some(3), None],
            vec![Some(2), None, None],
            vec![Some(1), Some(1), None],
        ]);
        let table = shortest_distances(&g, Goal::AllDistances);
        assert_eq!(table.get(1), Some(3));
        assert_eq!(table.get(2), None);
        assert!(!table.is_reachable(2));
        assert_eq!(table.as_slice()[2], INF);
    }

    #[test]
    fn ties_settle_lowest_index_first() {
        let g = GraphStore::from_rows(&[
            vec![None, Some(5), Some(5), Some(5)],
            vec![None, None, None, None],
            vec![None, None, None, None],
            vec![None, None, None, None],
        ]);
        let mut engine = ShortestPathEngine::new(&g);
        let order: Vec<_> = std::iter::from_fn(|| match engine.step() {
            Step::Settled { vertex, .. } => Some(vertex),
            _ => None,
        })
        .collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn early_exit_leaves_destination_unsettled() {
        let g = example_graph();
        let mut engine = ShortestPathEngine::new(&g).with_destination(1);
        assert_eq!(
            engine.step(),
            Step::Settled {
                vertex: 0,
                distance: 0
            }
        );
        assert_eq!(
            engine.step(),
            Step::ReachedDestination {
                vertex: 1,
                distance: 1
            }
        );
        assert!(!engine.is_settled(1));
        // vertex 2 was only relaxed through vertex 0
        assert_eq!(engine.distances(), &[0, 1, 4]);
    }

    #[test]
    fn one_distance_run_drops_tentative_distances() {
        let table = shortest_distances(&example_graph(), Goal::OneDistance(1));
        assert_eq!(table.as_slice(), &[0, 1, INF]);
        assert_eq!(table.get(2), None);
    }

    #[test]
    fn run_goal_overrides_earlier_destination() {
        let g = example_graph();
        let table = ShortestPathEngine::new(&g)
            .with_destination(1)
            .run(Goal::AllDistances);
        assert_eq!(table.as_slice(), &[0, 1, 2]);

        let table = ShortestPathEngine::new(&g)
            .with_destination(1)
            .run(Goal::OneDistance(2));
        assert_eq!(table.get(2), Some(2));
    }

    #[test]
    fn exhausted_after_all_settled() {
        let g = example_graph();
        let mut engine = ShortestPathEngine::new(&g);
        for _ in 0..3 {
            assert!(matches!(engine.step(), Step::Settled { .. }));
        }
        assert_eq!(engine.step(), Step::Exhausted);
    }

    #[test]
    fn huge_weights_saturate_instead_of_wrapping() {
        let big = INF - 1;
        let g = GraphStore::from_rows(&[
            vec![None, Some(big), None],
            vec![None, None, Some(big)],
            vec![None, None, None],
        ]);
        let table = shortest_distances(&g, Goal::AllDistances);
        assert_eq!(table.get(1), Some(big));
        assert_eq!(table.get(2), None);
    }

    #[test]
    fn zero_weight_edges() {
        let g = GraphStore::from_rows(&[
            vec![None, Some(0), Some(9)],
            vec![None, None, Some(0)],
            vec![Some(0), None, None],
        ]);
        let table = shortest_distances(&g, Goal::AllDistances);
        assert_eq!(table.as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn validate_rejects_out_of_range_destination() {
        assert_eq!(
            Goal::OneDistance(3).validate(3),
            Err(InvalidDestination {
                destination: 3,
                vertex_count: 3
            })
        );
        assert_eq!(Goal::OneDistance(2).validate(3), Ok(Goal::OneDistance(2)));
        assert_eq!(Goal::AllDistances.validate(1), Ok(Goal::AllDistances));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn unvalidated_destination_is_a_contract_violation() {
        let g = example_graph();
        let _ = shortest_distances(&g, Goal::OneDistance(3));
    }
}
