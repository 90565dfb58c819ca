use nalgebra::{DMatrix, DVector};

use akern_graph::GrowingGraph;

use crate::binning::AgeBinning;
use crate::classes::{DegreeAgeClasses, DegreeClasses};
use crate::error::AkernResult;
use crate::interrupt::Interrupt;
use crate::F;

/// Which optional outputs a measurement pass should produce.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeasureRequest {
    pub sd: bool,
    pub normfact: bool,
    pub cites: bool,
}

/// One measurement pass over the arrival sequence, degree classes only.
#[derive(Clone, Debug)]
pub struct DegreeMeasurement {
    pub kernel: DVector<F>,
    pub sd: Option<DVector<F>>,
    pub normfact: Option<DVector<F>>,
    pub cites: Option<DVector<F>>,
}

/// One measurement pass over the arrival sequence, (degree, age-bin) classes.
#[derive(Clone, Debug)]
pub struct DegreeAgeMeasurement {
    pub kernel: DMatrix<F>,
    pub sd: Option<DMatrix<F>>,
    pub normfact: Option<DMatrix<F>>,
    pub cites: Option<DMatrix<F>>,
}

/// Estimate the attachment kernel over in-degree classes.
///
/// Replays edge arrivals in order. Every out-edge of node `t` to an earlier
/// node `u` contributes the one-sample estimate `xk = S(t-1) / ntk[class]`,
/// the inverse-probability weight of that single observed attachment, folded
/// into the class's running mean by Welford's update. All edges of a node
/// are measured against the class state from before the node arrived; only
/// then are the degree transitions applied. Swapping those two phases would
/// let an edge's own degree increment contaminate its measurement.
///
/// `st` is the structural-sum series of the previous round and must have one
/// entry per node. Classes that were never populated come back with kernel 0
/// and normalization factor 1.
pub fn measure_degree(
    graph: &GrowingGraph,
    st: &DVector<F>,
    maxdeg: usize,
    request: MeasureRequest,
    interrupt: &Interrupt,
) -> AkernResult<DegreeMeasurement> {
    let n = graph.vcount();
    let classes = maxdeg + 1;

    let mut indegree = vec![0usize; n];
    let mut tracker = DegreeClasses::new(classes);
    let mut kernel = DVector::zeros(classes);
    let mut sq = DVector::zeros(classes);
    let mut cites = DVector::zeros(classes);
    let mut edges: u64 = 0;

    for node in 0..n {
        interrupt.check()?;
        let neis = graph.out_neighbors(node);

        // measure
        for &to in neis {
            let class = indegree[to];
            let xk = st[node - 1] / tracker.count(class) as F;
            let oldmean = kernel[class];
            cites[class] += 1.0;
            kernel[class] += (xk - oldmean) / cites[class];
            if request.sd {
                sq[class] += (xk - oldmean) * (xk - kernel[class]);
            }
        }

        // update
        edges += neis.len() as u64;
        for &to in neis {
            let class = indegree[to];
            indegree[to] += 1;
            tracker.promote(class, edges);
        }
        tracker.admit(edges);
    }

    let mut normfact = DVector::from_vec(tracker.finish(edges));
    finalize(
        kernel.as_mut_slice(),
        sq.as_mut_slice(),
        cites.as_slice(),
        normfact.as_mut_slice(),
        request.sd,
    );

    Ok(DegreeMeasurement {
        kernel,
        sd: request.sd.then_some(sq),
        normfact: request.normfact.then_some(normfact),
        cites: request.cites.then_some(cites),
    })
}

/// Estimate the attachment kernel over (in-degree, age-bin) classes.
///
/// Same estimator as [`measure_degree`], with a second class axis: besides
/// degree promotions on citation, a node slides into the next age bin every
/// `binwidth` arrivals. Both transition kinds close and reopen the
/// normalization checkpoints of the vacated and entered classes.
pub fn measure_degree_age(
    graph: &GrowingGraph,
    st: &DVector<F>,
    maxdeg: usize,
    binning: &AgeBinning,
    request: MeasureRequest,
    interrupt: &Interrupt,
) -> AkernResult<DegreeAgeMeasurement> {
    let n = graph.vcount();
    let classes = maxdeg + 1;

    let mut indegree = vec![0usize; n];
    let mut tracker = DegreeAgeClasses::new(classes, binning.agebins);
    tracker.seed_first_node(binning);
    let mut kernel = DMatrix::zeros(classes, binning.agebins);
    let mut sq = DMatrix::zeros(classes, binning.agebins);
    let mut cites = DMatrix::zeros(classes, binning.agebins);
    let mut edges: u64 = 0;

    for node in 1..n {
        interrupt.check()?;
        let neis = graph.out_neighbors(node);

        // measure
        for &to in neis {
            let class = (indegree[to], binning.bin_of(to, node));
            let xk = st[node - 1] / tracker.count(class) as F;
            let oldmean = kernel[class];
            cites[class] += 1.0;
            kernel[class] += (xk - oldmean) / cites[class];
            if request.sd {
                sq[class] += (xk - oldmean) * (xk - kernel[class]);
            }
        }

        // update: citations, then the newcomer, then age-bin slides
        edges += neis.len() as u64;
        for &to in neis {
            let degree = indegree[to];
            let bin = binning.bin_of(to, node);
            indegree[to] += 1;
            tracker.promote_degree(degree, bin, edges);
        }
        tracker.admit(edges);
        for (slider, entered) in binning.crossings(node) {
            tracker.promote_age(indegree[slider], entered, edges);
        }
    }

    let mut normfact = tracker.finish(edges);
    finalize(
        kernel.as_mut_slice(),
        sq.as_mut_slice(),
        cites.as_slice(),
        normfact.as_mut_slice(),
        request.sd,
    );

    Ok(DegreeAgeMeasurement {
        kernel,
        sd: request.sd.then_some(sq),
        normfact: request.normfact.then_some(normfact),
        cites: request.cites.then_some(cites),
    })
}

/// Shared close-out: convert per-observation means into time-density
/// estimates and finish the sample standard deviation. Operates on the
/// contiguous class storage, so the degree and degree-age variants share it.
fn finalize(kernel: &mut [F], sq: &mut [F], cites: &[F], normfact: &mut [F], want_sd: bool) {
    for class in 0..kernel.len() {
        if normfact[class] == 0.0 {
            // never populated: zero rate by definition
            kernel[class] = 0.0;
            normfact[class] = 1.0;
        }
        let oldmean = kernel[class];
        kernel[class] *= cites[class] / normfact[class];
        if want_sd {
            sq[class] +=
                oldmean * oldmean * cites[class] * (1.0 - cites[class] / normfact[class]);
            sq[class] = (sq[class] / (normfact[class] - 1.0)).sqrt();
        }
    }
}
