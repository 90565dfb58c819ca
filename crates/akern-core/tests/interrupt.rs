use akern_core::{
    fit_degree_age_kernel, fit_degree_kernel, AkernError, FitOptions, Interrupt,
};
use akern_models::{GrowthModel, PreferentialAttachment};

#[test]
fn triggered_interrupt_aborts_degree_fit() {
    let graph = PreferentialAttachment::standard().generate(200, 1);
    let options = FitOptions::new(5).with_all();

    let interrupt = Interrupt::new();
    interrupt.trigger();

    assert_eq!(
        fit_degree_kernel(&graph, &options, &interrupt).unwrap_err(),
        AkernError::Interrupted,
        "no partial output may survive an interrupted fit"
    );
}

#[test]
fn triggered_interrupt_aborts_degree_age_fit() {
    let graph = PreferentialAttachment::standard().generate(200, 1);
    let options = FitOptions::new(5);

    let interrupt = Interrupt::new();
    interrupt.trigger();

    assert_eq!(
        fit_degree_age_kernel(&graph, 8, &options, &interrupt).unwrap_err(),
        AkernError::Interrupted
    );
}

#[test]
fn empty_graph_is_rejected_before_any_work() {
    let graph = akern_graph::GrowingGraph::new();
    let options = FitOptions::new(3);
    assert_eq!(
        fit_degree_kernel(&graph, &options, &Interrupt::new()).unwrap_err(),
        AkernError::EmptyGraph
    );
}

#[test]
fn zero_iterations_is_rejected() {
    let graph = PreferentialAttachment::standard().generate(50, 1);
    let options = FitOptions::new(0);
    assert_eq!(
        fit_degree_kernel(&graph, &options, &Interrupt::new()).unwrap_err(),
        AkernError::BadIterations(0)
    );
}
