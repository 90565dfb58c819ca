use akern_core::{fit_degree_age_kernel, fit_degree_kernel, FitOptions, Interrupt};
use akern_models::{GrowthModel, PreferentialAttachment, UniformAttachment};
use approx::assert_relative_eq;

// The expected-citation totals integrate membership against the hazard
// normalized by the same S(t) the kernel produced, so summed over classes
// they must reproduce the edge count exactly.

#[test]
fn degree_expected_total_matches_edge_count() {
    let graph = PreferentialAttachment::standard().generate(1000, 42);
    let options = FitOptions::new(3).with_expected();
    let fit = fit_degree_kernel(&graph, &options, &Interrupt::new()).unwrap();

    let total: f64 = fit.expected.unwrap().sum();
    println!(
        "expected total {:.6} vs edge count {}",
        total,
        graph.ecount()
    );
    assert_relative_eq!(total, graph.ecount() as f64, max_relative = 1e-8);
}

#[test]
fn degree_expected_total_on_multi_edge_network() {
    let graph = UniformAttachment::new(4).generate(600, 13);
    let options = FitOptions::new(2).with_expected();
    let fit = fit_degree_kernel(&graph, &options, &Interrupt::new()).unwrap();

    let total: f64 = fit.expected.unwrap().sum();
    assert_relative_eq!(total, graph.ecount() as f64, max_relative = 1e-8);
}

#[test]
fn degree_age_expected_total_matches_edge_count() {
    let graph = PreferentialAttachment::standard().generate(800, 42);
    let options = FitOptions::new(3).with_expected();
    let fit = fit_degree_age_kernel(&graph, 6, &options, &Interrupt::new()).unwrap();

    let total: f64 = fit.expected.unwrap().sum();
    println!(
        "degree-age expected total {:.6} vs edge count {}",
        total,
        graph.ecount()
    );
    assert_relative_eq!(total, graph.ecount() as f64, max_relative = 1e-8);
}

#[test]
fn expected_counts_are_nonnegative() {
    let graph = PreferentialAttachment::new(2, 0.5).generate(500, 3);
    let options = FitOptions::new(3).with_expected();
    let fit = fit_degree_kernel(&graph, &options, &Interrupt::new()).unwrap();

    for (class, value) in fit.expected.unwrap().iter().enumerate() {
        assert!(*value >= 0.0, "class {class} expected {value}");
    }
}
