use nalgebra::{DMatrix, DVector};

use akern_graph::GrowingGraph;

use crate::binning::AgeBinning;
use crate::error::AkernResult;
use crate::interrupt::Interrupt;
use crate::F;

/// Recompute the structural sum `S(t)` in place from a degree kernel.
///
/// `S(t)` is the total kernel-weighted attractiveness of the network at
/// arrival time `t`: the newcomer adds its class-0 mass, and every citation
/// shifts one node up a degree class, adjusting the total by the kernel
/// difference of the two classes. `st` must have one entry per node.
pub fn update_degree_st(
    graph: &GrowingGraph,
    st: &mut DVector<F>,
    kernel: &DVector<F>,
    interrupt: &Interrupt,
) -> AkernResult<()> {
    let n = graph.vcount();
    debug_assert_eq!(st.len(), n);

    let mut indegree = vec![0usize; n];
    st[0] = kernel[0];

    for node in 1..n {
        interrupt.check()?;
        let mut sum = st[node - 1] + kernel[0];
        for &to in graph.out_neighbors(node) {
            let class = indegree[to];
            indegree[to] += 1;
            sum += kernel[class + 1] - kernel[class];
        }
        st[node] = sum;
    }
    Ok(())
}

/// Recompute the structural sum in place from a (degree, age-bin) kernel.
///
/// On top of the degree transitions, each `S(t)` also absorbs the kernel
/// deltas of every node whose age bin advances at that instant, so the value
/// matches the class state the estimator sees when node `t + 1`'s edges are
/// measured.
pub fn update_degree_age_st(
    graph: &GrowingGraph,
    st: &mut DVector<F>,
    kernel: &DMatrix<F>,
    binning: &AgeBinning,
    interrupt: &Interrupt,
) -> AkernResult<()> {
    let n = graph.vcount();
    debug_assert_eq!(st.len(), n);

    let mut indegree = vec![0usize; n];
    st[0] = if binning.binwidth > 1 {
        kernel[(0, 0)]
    } else {
        kernel[(0, 1)]
    };

    for node in 1..n {
        interrupt.check()?;
        let mut sum = st[node - 1] + kernel[(0, 0)];

        for &to in graph.out_neighbors(node) {
            let degree = indegree[to];
            let bin = binning.bin_of(to, node);
            indegree[to] += 1;
            sum += kernel[(degree + 1, bin)] - kernel[(degree, bin)];
        }

        for (slider, entered) in binning.crossings(node) {
            let degree = indegree[slider];
            sum += kernel[(degree, entered)] - kernel[(degree, entered - 1)];
        }

        st[node] = sum;
    }
    Ok(())
}
