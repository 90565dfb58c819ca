pub mod chain;
pub mod preferential;
pub mod star;
pub mod uniform;

pub use chain::LinearChain;
pub use preferential::PreferentialAttachment;
pub use star::Star;
pub use uniform::UniformAttachment;

use akern_graph::GrowingGraph;

/// A synthetic growing-network process.
pub trait GrowthModel {
    /// Generate an `n`-node network, deterministically for a given seed.
    fn generate(&self, n: usize, seed: u64) -> GrowingGraph;
}
