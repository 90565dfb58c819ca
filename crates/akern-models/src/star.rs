use akern_graph::GrowingGraph;

use crate::GrowthModel;

/// Star: every node after the first cites node 0 exclusively, so only the
/// hub ever climbs the degree classes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Star;

impl Star {
    pub fn new() -> Self {
        Self
    }

    /// The hub collects one citation per later node.
    pub fn exact_max_in_degree(&self, n: usize) -> usize {
        n.saturating_sub(1)
    }
}

impl GrowthModel for Star {
    fn generate(&self, n: usize, _seed: u64) -> GrowingGraph {
        let mut graph = GrowingGraph::new();
        for node in 0..n {
            let targets: &[usize] = if node == 0 { &[] } else { &[0] };
            graph
                .push_node(targets)
                .expect("star targets precede their sources");
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_shape() {
        let graph = Star::new().generate(6, 0);
        assert_eq!(graph.vcount(), 6);
        assert_eq!(graph.ecount(), 5);
        assert_eq!(graph.in_degrees()[0], 5);
        assert_eq!(graph.max_in_degree(), Star::new().exact_max_in_degree(6));
    }
}
