use nalgebra::{DMatrix, DVector};

use akern_graph::GrowingGraph;

use crate::binning::AgeBinning;
use crate::error::AkernResult;
use crate::interrupt::Interrupt;
use crate::F;

/// Cumulative hazard: `cumst[i + 1] = cumst[i] + outdeg(i) / S(i)`.
///
/// One unit of "exposure" per observed edge, normalized by the total
/// attractiveness at the moment the edge arrived. Class exposures are
/// integrals of membership against this series.
fn cumulative_hazard(graph: &GrowingGraph, st: &DVector<F>) -> Vec<F> {
    let n = graph.vcount();
    let mut cumst = vec![0.0; n + 1];
    for i in 0..n {
        cumst[i + 1] = cumst[i] + graph.out_degree(i) as F / st[i];
    }
    cumst
}

/// Per-class exposure ledger. On every membership change the class's open
/// interval is settled at the pre-change count, then the count moves; the
/// checkpoint stores the node time the interval was (re)opened at.
struct Ledger {
    count: Vec<u64>,
    mark: Vec<usize>,
    exposure: Vec<F>,
}

impl Ledger {
    fn new(classes: usize) -> Self {
        Self {
            count: vec![0; classes],
            mark: vec![0; classes],
            exposure: vec![0.0; classes],
        }
    }

    fn settle(&mut self, class: usize, cumst: &[F], now: usize) {
        self.exposure[class] += self.count[class] as F * (cumst[now] - cumst[self.mark[class]]);
        self.mark[class] = now;
    }

    fn raise(&mut self, class: usize, cumst: &[F], now: usize) {
        self.settle(class, cumst, now);
        self.count[class] += 1;
    }

    fn lower(&mut self, class: usize, cumst: &[F], now: usize) {
        self.settle(class, cumst, now);
        debug_assert!(self.count[class] > 0, "class {class} is empty");
        self.count[class] -= 1;
    }

    fn close(mut self, cumst: &[F], end: usize) -> Vec<F> {
        for class in 0..self.count.len() {
            self.settle(class, cumst, end);
        }
        self.exposure
    }
}

/// Model-implied total citation count per degree class.
///
/// Each class's accumulated exposure (membership integrated against the
/// cumulative hazard) is scaled by its kernel value; for a kernel and `S(t)`
/// series produced by the same fit, the totals sum to the edge count.
pub fn expected_degree(
    graph: &GrowingGraph,
    kernel: &DVector<F>,
    st: &DVector<F>,
    maxdeg: usize,
    interrupt: &Interrupt,
) -> AkernResult<DVector<F>> {
    let n = graph.vcount();
    let classes = maxdeg + 1;
    let cumst = cumulative_hazard(graph, st);

    let mut indegree = vec![0usize; n];
    let mut ledger = Ledger::new(classes);

    for node in 0..n {
        interrupt.check()?;
        for &to in graph.out_neighbors(node) {
            let class = indegree[to];
            indegree[to] += 1;
            ledger.lower(class, &cumst, node);
            ledger.raise(class + 1, &cumst, node);
        }
        ledger.raise(0, &cumst, node);
    }

    let exposure = ledger.close(&cumst, n);
    let mut expected = DVector::zeros(classes);
    for class in 0..classes {
        expected[class] = exposure[class] * kernel[class];
    }
    Ok(expected)
}

/// Model-implied total citation count per (degree, age-bin) class.
pub fn expected_degree_age(
    graph: &GrowingGraph,
    kernel: &DMatrix<F>,
    st: &DVector<F>,
    maxdeg: usize,
    binning: &AgeBinning,
    interrupt: &Interrupt,
) -> AkernResult<DMatrix<F>> {
    let n = graph.vcount();
    let classes = maxdeg + 1;
    let agebins = binning.agebins;
    let cumst = cumulative_hazard(graph, st);

    // classes are laid out row-major as degree * agebins + bin
    let cell = |degree: usize, bin: usize| degree * agebins + bin;

    let mut indegree = vec![0usize; n];
    let mut ledger = Ledger::new(classes * agebins);

    for node in 0..n {
        interrupt.check()?;
        for &to in graph.out_neighbors(node) {
            let degree = indegree[to];
            let bin = binning.bin_of(to, node);
            indegree[to] += 1;
            ledger.lower(cell(degree, bin), &cumst, node);
            ledger.raise(cell(degree + 1, bin), &cumst, node);
        }
        ledger.raise(cell(0, 0), &cumst, node);
        for (slider, entered) in binning.crossings(node) {
            let degree = indegree[slider];
            ledger.lower(cell(degree, entered - 1), &cumst, node);
            ledger.raise(cell(degree, entered), &cumst, node);
        }
    }

    let exposure = ledger.close(&cumst, n);
    let mut expected = DMatrix::zeros(classes, agebins);
    for degree in 0..classes {
        for bin in 0..agebins {
            expected[(degree, bin)] = exposure[cell(degree, bin)] * kernel[(degree, bin)];
        }
    }
    Ok(expected)
}
