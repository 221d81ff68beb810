use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::graph::GraphError;
use crate::graph::GraphStore;

pub const DEFAULT_MAX_WEIGHT: u64 = 10;
pub const DEFAULT_SEED: u64 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorConfig {
    pub vertex_count: usize,
    pub max_weight: u64,
    pub seed: u64,
    /// Probability that an off-diagonal edge exists. At `1.0` every ordered
    /// pair `(i, j)` with `i != j` gets an edge and only self-edges are absent.
    pub density: f64,
}

impl GeneratorConfig {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            max_weight: DEFAULT_MAX_WEIGHT,
            seed: DEFAULT_SEED,
            density: 1.0,
        }
    }
}

/// Builds a random dense graph, deterministic in the config.
///
/// Weights are drawn from `[0, max_weight]` and a drawn 0 becomes 1, so
/// every present edge is positive. Self-edges are always absent.
pub fn random_graph(config: &GeneratorConfig) -> Result<GraphStore, GraphError> {
    let n = config.vertex_count;
    let mut graph = GraphStore::try_new(n)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let sparse = config.density < 1.0;
    let density = config.density.clamp(0.0, 1.0);

    for u in 0..n {
        for v in 0..n {
            if u == v {
                continue;
            }
            let w = rng.random_range(0..=config.max_weight).max(1);
            if sparse && !rng.random_bool(density) {
                continue;
            }
            graph.set_weight(u, v, w);
        }
    }

    debug!(
        vertices = n,
        edges = graph.edge_count(),
        seed = config.seed,
        "generated random graph"
    );
    Ok(graph)
}

/// Serialized form of [`random_graph`] with default density.
pub fn generate(vertex_count: usize, max_weight: u64, seed: u64) -> Result<String, GraphError> {
    let config = GeneratorConfig {
        max_weight,
        seed,
        ..GeneratorConfig::new(vertex_count)
    };
    Ok(random_graph(&config)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::INF;
    use crate::loader::parse;

    #[test]
    fn deterministic_for_seed() {
        let a = generate(12, 20, 7).unwrap();
        let b = generate(12, 20, 7).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, generate(12, 20, 8).unwrap());
    }

    #[test]
    fn weights_in_range_and_self_edges_absent() {
        for seed in 0..10_u64 {
            let g = random_graph(&GeneratorConfig {
                seed,
                max_weight: 3,
                ..GeneratorConfig::new(9)
            })
            .unwrap();
            for u in 0..9 {
                for v in 0..9 {
                    let w = g.weight(u, v);
                    if u == v {
                        assert_eq!(w, INF);
                    } else {
                        assert!((1..=3).contains(&w), "seed={seed} w={w}");
                    }
                }
            }
        }
    }

    #[test]
    fn zero_max_weight_maps_to_one() {
        let g = random_graph(&GeneratorConfig {
            max_weight: 0,
            ..GeneratorConfig::new(4)
        })
        .unwrap();
        assert_eq!(g.edge_count(), 12);
        assert!((0..4).all(|u| g.row(u).iter().all(|&w| w == 1 || w == INF)));
    }

    #[test]
    fn output_round_trips_through_loader() {
        let text = generate(6, 10, 1).unwrap();
        let parsed = parse(&text).unwrap();
        let direct = random_graph(&GeneratorConfig::new(6)).unwrap();
        assert_eq!(parsed, direct);
    }

    #[test]
    fn density_drops_edges() {
        let full = random_graph(&GeneratorConfig::new(40)).unwrap();
        assert_eq!(full.edge_count(), 40 * 39);

        let sparse = random_graph(&GeneratorConfig {
            density: 0.25,
            ..GeneratorConfig::new(40)
        })
        .unwrap();
        assert!(sparse.edge_count() < full.edge_count() / 2);

        let empty = random_graph(&GeneratorConfig {
            density: 0.0,
            ..GeneratorConfig::new(5)
        })
        .unwrap();
        assert_eq!(empty.edge_count(), 0);
    }
}
