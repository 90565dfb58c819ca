use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use akern_graph::GrowingGraph;

use crate::binning::AgeBinning;
use crate::error::{AkernError, AkernResult};
use crate::estimate::{measure_degree, measure_degree_age, MeasureRequest};
use crate::expected::{expected_degree, expected_degree_age};
use crate::interrupt::Interrupt;
use crate::likelihood::{score_degree, score_degree_age};
use crate::structural::{update_degree_age_st, update_degree_st};
use crate::F;

/// What a fit should compute besides the kernel itself.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FitOptions {
    pub iterations: usize,
    pub sd: bool,
    pub normfact: bool,
    pub cites: bool,
    pub expected: bool,
    pub likelihood: bool,
}

impl FitOptions {
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            sd: false,
            normfact: false,
            cites: false,
            expected: false,
            likelihood: false,
        }
    }

    pub fn with_sd(mut self) -> Self {
        self.sd = true;
        self
    }

    pub fn with_normfact(mut self) -> Self {
        self.normfact = true;
        self
    }

    pub fn with_cites(mut self) -> Self {
        self.cites = true;
        self
    }

    pub fn with_expected(mut self) -> Self {
        self.expected = true;
        self
    }

    pub fn with_likelihood(mut self) -> Self {
        self.likelihood = true;
        self
    }

    pub fn with_all(self) -> Self {
        self.with_sd()
            .with_normfact()
            .with_cites()
            .with_expected()
            .with_likelihood()
    }

    fn validate(&self, graph: &GrowingGraph) -> AkernResult<()> {
        if graph.is_empty() {
            return Err(AkernError::EmptyGraph);
        }
        if self.iterations == 0 {
            return Err(AkernError::BadIterations(self.iterations));
        }
        Ok(())
    }

    fn final_request(&self) -> MeasureRequest {
        MeasureRequest {
            sd: self.sd,
            normfact: self.normfact,
            cites: self.cites,
        }
    }
}

/// Converged degree-kernel fit.
///
/// `kernel[k]` is the normalized attachment rate of a node with in-degree
/// `k`; `st[t]` is the structural sum under the final kernel. The optional
/// fields are present when the corresponding [`FitOptions`] flag was set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DegreeFit {
    pub kernel: DVector<F>,
    pub sd: Option<DVector<F>>,
    pub normfact: Option<DVector<F>>,
    pub cites: Option<DVector<F>>,
    pub expected: Option<DVector<F>>,
    pub logprob: Option<F>,
    pub lognull: Option<F>,
    pub st: DVector<F>,
}

/// Converged (degree, age-bin) kernel fit; matrices are indexed
/// `(degree, age_bin)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DegreeAgeFit {
    pub kernel: DMatrix<F>,
    pub sd: Option<DMatrix<F>>,
    pub normfact: Option<DMatrix<F>>,
    pub cites: Option<DMatrix<F>>,
    pub expected: Option<DMatrix<F>>,
    pub logprob: Option<F>,
    pub lognull: Option<F>,
    pub st: DVector<F>,
}

/// Fit a nonparametric attachment kernel over in-degree classes.
///
/// Runs exactly `iterations` rounds of measure, normalize to unit mass,
/// recompute `S(t)`; the first round measures against `S(t) = 1`. There is
/// no convergence check. The final round also produces whatever optional
/// outputs were requested.
pub fn fit_degree_kernel(
    graph: &GrowingGraph,
    options: &FitOptions,
    interrupt: &Interrupt,
) -> AkernResult<DegreeFit> {
    options.validate(graph)?;
    let n = graph.vcount();
    let maxdeg = graph.max_in_degree();
    let mut st = DVector::from_element(n, 1.0);

    for round in 1..options.iterations {
        interrupt.check()?;
        let mut m = measure_degree(graph, &st, maxdeg, MeasureRequest::default(), interrupt)?;
        m.kernel.unscale_mut(m.kernel.sum());
        update_degree_st(graph, &mut st, &m.kernel, interrupt)?;
        debug!(round, "degree kernel round done");
    }

    interrupt.check()?;
    let mut m = measure_degree(graph, &st, maxdeg, options.final_request(), interrupt)?;
    m.kernel.unscale_mut(m.kernel.sum());
    update_degree_st(graph, &mut st, &m.kernel, interrupt)?;
    debug!(round = options.iterations, "degree kernel final round done");

    let expected = if options.expected {
        Some(expected_degree(graph, &m.kernel, &st, maxdeg, interrupt)?)
    } else {
        None
    };
    let (logprob, lognull) = if options.likelihood {
        let (p, n0) = score_degree(graph, &m.kernel, &st, maxdeg, interrupt)?;
        (Some(p), Some(n0))
    } else {
        (None, None)
    };

    Ok(DegreeFit {
        kernel: m.kernel,
        sd: m.sd,
        normfact: m.normfact,
        cites: m.cites,
        expected,
        logprob,
        lognull,
        st,
    })
}

/// Fit a nonparametric attachment kernel over (in-degree, age-bin) classes.
///
/// Same driver as [`fit_degree_kernel`], with node age discretized into
/// `agebins` bins of width `vcount / agebins + 1` arrivals.
pub fn fit_degree_age_kernel(
    graph: &GrowingGraph,
    agebins: usize,
    options: &FitOptions,
    interrupt: &Interrupt,
) -> AkernResult<DegreeAgeFit> {
    options.validate(graph)?;
    let n = graph.vcount();
    let binning = AgeBinning::new(n, agebins)?;
    let maxdeg = graph.max_in_degree();
    let mut st = DVector::from_element(n, 1.0);

    for round in 1..options.iterations {
        interrupt.check()?;
        let mut m = measure_degree_age(
            graph,
            &st,
            maxdeg,
            &binning,
            MeasureRequest::default(),
            interrupt,
        )?;
        m.kernel.unscale_mut(m.kernel.sum());
        update_degree_age_st(graph, &mut st, &m.kernel, &binning, interrupt)?;
        debug!(round, "degree-age kernel round done");
    }

    interrupt.check()?;
    let mut m = measure_degree_age(
        graph,
        &st,
        maxdeg,
        &binning,
        options.final_request(),
        interrupt,
    )?;
    m.kernel.unscale_mut(m.kernel.sum());
    update_degree_age_st(graph, &mut st, &m.kernel, &binning, interrupt)?;
    debug!(round = options.iterations, "degree-age kernel final round done");

    let expected = if options.expected {
        Some(expected_degree_age(
            graph, &m.kernel, &st, maxdeg, &binning, interrupt,
        )?)
    } else {
        None
    };
    let (logprob, lognull) = if options.likelihood {
        let (p, n0) = score_degree_age(graph, &m.kernel, &st, maxdeg, &binning, interrupt)?;
        (Some(p), Some(n0))
    } else {
        (None, None)
    };

    Ok(DegreeAgeFit {
        kernel: m.kernel,
        sd: m.sd,
        normfact: m.normfact,
        cites: m.cites,
        expected,
        logprob,
        lognull,
        st,
    })
}
