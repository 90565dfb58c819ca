use akern_graph::GrowingGraph;
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::GrowthModel;

/// Linear preferential attachment: each arriving node cites existing nodes
/// with probability proportional to `indegree + zero_appeal`.
///
/// `zero_appeal` keeps uncited nodes reachable; with it at 1 and one edge
/// per node this is the classic Barabasi-Albert citation process.
#[derive(Clone, Copy, Debug)]
pub struct PreferentialAttachment {
    pub edges_per_node: usize,
    pub zero_appeal: f64,
}

impl PreferentialAttachment {
    pub fn new(edges_per_node: usize, zero_appeal: f64) -> Self {
        Self {
            edges_per_node,
            zero_appeal,
        }
    }

    /// The textbook process: one edge per node, unit zero-appeal.
    pub fn standard() -> Self {
        Self::new(1, 1.0)
    }
}

impl GrowthModel for PreferentialAttachment {
    fn generate(&self, n: usize, seed: u64) -> GrowingGraph {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut graph = GrowingGraph::new();
        let mut indegree = vec![0u64; n];
        let mut weights = Vec::with_capacity(n);
        let mut targets = Vec::with_capacity(self.edges_per_node);

        for node in 0..n {
            targets.clear();
            if node > 0 {
                weights.clear();
                weights.extend(
                    indegree[..node]
                        .iter()
                        .map(|&d| d as f64 + self.zero_appeal),
                );
                let dist = WeightedIndex::new(&weights)
                    .expect("weights are positive for zero_appeal > 0");
                for _ in 0..self.edges_per_node.min(node) {
                    targets.push(dist.sample(&mut rng));
                }
            }
            graph
                .push_node(&targets)
                .expect("drawn targets precede their sources");
            for &t in &targets {
                indegree[t] += 1;
            }
        }
        graph
    }
}
