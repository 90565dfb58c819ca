use akern_graph::GrowingGraph;

use crate::GrowthModel;

/// Linear chain: every node cites its immediate predecessor and nothing
/// else, so each cited node is cited exactly once.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearChain;

impl LinearChain {
    pub fn new() -> Self {
        Self
    }

    /// In-degree never exceeds 1 on a chain.
    pub fn exact_max_in_degree(&self) -> usize {
        1
    }
}

impl GrowthModel for LinearChain {
    fn generate(&self, n: usize, _seed: u64) -> GrowingGraph {
        let mut graph = GrowingGraph::new();
        for node in 0..n {
            let targets: &[usize] = if node == 0 { &[] } else { &[node - 1] };
            graph
                .push_node(targets)
                .expect("chain targets precede their sources");
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_shape() {
        let graph = LinearChain::new().generate(5, 0);
        assert_eq!(graph.vcount(), 5);
        assert_eq!(graph.ecount(), 4);
        assert_eq!(graph.in_degrees(), vec![1, 1, 1, 1, 0]);
        assert_eq!(graph.max_in_degree(), LinearChain::new().exact_max_in_degree());
    }
}
