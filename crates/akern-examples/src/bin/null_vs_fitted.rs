use akern_core::{fit_degree_kernel, FitOptions, Interrupt};
use akern_graph::GrowingGraph;
use akern_models::{GrowthModel, PreferentialAttachment, UniformAttachment};

fn advantage(graph: &GrowingGraph) -> (f64, f64) {
    let options = FitOptions::new(5).with_likelihood();
    let fit = fit_degree_kernel(graph, &options, &Interrupt::new())
        .expect("fit on a generated network");
    (
        fit.logprob.expect("likelihood was requested"),
        fit.lognull.expect("likelihood was requested"),
    )
}

fn main() {
    // The fitted kernel should explain a preferential network far better
    // than uniform attachment, and a uniform network barely better
    let n = 1500;

    let pa = PreferentialAttachment::standard().generate(n, 11);
    let (pa_fit, pa_null) = advantage(&pa);

    let uniform = UniformAttachment::new(1).generate(n, 11);
    let (un_fit, un_null) = advantage(&uniform);

    println!("Goodness of fit vs uniform-attachment null");
    println!("==========================================");
    println!("preferential network:");
    println!("  fitted: {:>12.2}", pa_fit);
    println!("  null:   {:>12.2}", pa_null);
    println!("  advantage: {:>9.2}", pa_fit - pa_null);
    println!();
    println!("uniform network:");
    println!("  fitted: {:>12.2}", un_fit);
    println!("  null:   {:>12.2}", un_null);
    println!("  advantage: {:>9.2}", un_fit - un_null);
}
