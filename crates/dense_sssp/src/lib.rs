pub mod cli;
mod engine;
pub mod generator;
pub mod graph;
pub mod loader;
mod report;

pub use engine::DistanceTable;
pub use engine::Goal;
pub use engine::InvalidDestination;
pub use engine::ShortestPathEngine;
pub use engine::Step;
pub use engine::shortest_distances;
pub use graph::GraphError;
pub use graph::GraphStore;
pub use loader::LoadError;
pub use report::report;

/// Weight of an absent edge and distance of an unreachable vertex.
pub const INF: u64 = u64::MAX / 4;
