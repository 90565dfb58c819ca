use akern_core::{fit_degree_age_kernel, FitOptions, Interrupt};
use akern_models::{GrowthModel, PreferentialAttachment};

fn main() {
    // How much of the attachment rate is degree, how much is recency?
    let n = 1000;
    let agebins = 8;
    let graph = PreferentialAttachment::standard().generate(n, 7);

    println!("Fitting degree x age kernel ({} age bins)", agebins);
    println!("Nodes: {}, Edges: {}", graph.vcount(), graph.ecount());
    println!();

    let options = FitOptions::new(5);
    let fit = fit_degree_age_kernel(&graph, agebins, &options, &Interrupt::new())
        .expect("fit on a generated network");

    // marginals over each axis
    let (classes, bins) = fit.kernel.shape();
    println!("degree marginals (first 8 classes):");
    for degree in 0..classes.min(8) {
        let mass: f64 = (0..bins).map(|b| fit.kernel[(degree, b)]).sum();
        println!("  degree {:>2}: {:.6}", degree, mass);
    }

    println!("age-bin marginals:");
    for bin in 0..bins {
        let mass: f64 = (0..classes).map(|d| fit.kernel[(d, bin)]).sum();
        println!("  bin {:>2}: {:.6}", bin, mass);
    }

    println!();
    println!("kernel mass: {:.9}", fit.kernel.sum());
}
