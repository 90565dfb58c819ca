use akern_core::{
    fit_degree_age_kernel, fit_degree_kernel, AkernError, FitOptions, Interrupt,
};
use akern_models::{GrowthModel, PreferentialAttachment};

#[test]
fn single_age_bin_reduces_to_degree_kernel() {
    // with one age bin the bin width exceeds the network lifetime, so the
    // aging axis is inert and the two estimators must agree bit for bit
    let graph = PreferentialAttachment::standard().generate(400, 21);
    let options = FitOptions::new(3).with_all();

    let degree = fit_degree_kernel(&graph, &options, &Interrupt::new()).unwrap();
    let aged = fit_degree_age_kernel(&graph, 1, &options, &Interrupt::new()).unwrap();

    assert_eq!(aged.kernel.ncols(), 1);
    for class in 0..degree.kernel.len() {
        assert_eq!(
            aged.kernel[(class, 0)].to_bits(),
            degree.kernel[class].to_bits(),
            "kernels diverge at class {class}"
        );
    }
    let aged_expected = aged.expected.unwrap();
    let degree_expected = degree.expected.unwrap();
    for class in 0..degree_expected.len() {
        assert_eq!(
            aged_expected[(class, 0)].to_bits(),
            degree_expected[class].to_bits(),
            "expected counts diverge at class {class}"
        );
    }
    assert_eq!(aged.st.as_slice(), degree.st.as_slice(), "S(t) diverges");
    assert_eq!(aged.logprob.unwrap().to_bits(), degree.logprob.unwrap().to_bits());
    assert_eq!(aged.lognull.unwrap().to_bits(), degree.lognull.unwrap().to_bits());
}

#[test]
fn age_kernel_mass_is_normalized() {
    let graph = PreferentialAttachment::standard().generate(600, 4);
    for agebins in [1, 4, 16] {
        let options = FitOptions::new(2);
        let fit =
            fit_degree_age_kernel(&graph, agebins, &options, &Interrupt::new()).unwrap();
        assert!(
            (fit.kernel.sum() - 1.0).abs() < 1e-9,
            "kernel mass {} with {agebins} bins",
            fit.kernel.sum()
        );
    }
}

#[test]
fn age_axis_shape_follows_bin_count() {
    let graph = PreferentialAttachment::standard().generate(200, 8);
    let options = FitOptions::new(1).with_normfact();
    let fit = fit_degree_age_kernel(&graph, 7, &options, &Interrupt::new()).unwrap();

    assert_eq!(fit.kernel.nrows(), graph.max_in_degree() + 1);
    assert_eq!(fit.kernel.ncols(), 7);
    assert_eq!(fit.normfact.unwrap().shape(), fit.kernel.shape());
}

#[test]
fn more_bins_than_nodes_is_valid() {
    // binwidth collapses to one arrival per bin; nodes then change age bin
    // at every single step
    let graph = PreferentialAttachment::standard().generate(12, 2);
    let options = FitOptions::new(2).with_expected();
    let fit = fit_degree_age_kernel(&graph, 40, &options, &Interrupt::new()).unwrap();

    assert!((fit.kernel.sum() - 1.0).abs() < 1e-9);
    let total: f64 = fit.expected.unwrap().sum();
    assert!(
        (total - graph.ecount() as f64).abs() < 1e-8,
        "expected total {total} vs {}",
        graph.ecount()
    );
}

#[test]
fn zero_age_bins_is_rejected() {
    let graph = PreferentialAttachment::standard().generate(50, 1);
    let options = FitOptions::new(1);
    assert_eq!(
        fit_degree_age_kernel(&graph, 0, &options, &Interrupt::new()).unwrap_err(),
        AkernError::BadAgeBins(0)
    );
}
