use crate::{degree_age_rows, degree_rows, read_edge_list, write_edge_list, write_fit_with_manifest, RunManifest};
use akern_core::{fit_degree_age_kernel, fit_degree_kernel, FitOptions, Interrupt};
use akern_models::{GrowthModel, LinearChain, PreferentialAttachment, Star, UniformAttachment};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "akern")]
#[command(about = "AKERN - Attachment Kernel Estimation for Growing Networks")]
#[command(
    long_about = "Nonparametric attachment-kernel fitting for growing directed networks, \
                  with optional node-age dependence and goodness-of-fit scoring"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fit an attachment kernel to an edge-list network and write Parquet
    Fit {
        /// Input edge list (`source target` per line)
        #[arg(long)]
        input: PathBuf,

        /// Kernel variant
        #[arg(long, value_enum, default_value = "degree")]
        variant: VariantType,

        /// Estimation rounds
        #[arg(long, default_value = "5")]
        iterations: usize,

        /// Age bins (degree-age variant only)
        #[arg(long, default_value = "10")]
        age_bins: usize,

        /// Also compute per-class expected citation counts
        #[arg(long)]
        expected: bool,

        /// Also score the fit against the uniform-attachment null
        #[arg(long)]
        likelihood: bool,

        /// Output Parquet file
        #[arg(long)]
        out: PathBuf,
    },

    /// Generate a synthetic growing network and write it as an edge list
    Generate {
        /// Growth model
        #[arg(long, value_enum)]
        model: ModelType,

        /// Number of nodes
        #[arg(long)]
        nodes: usize,

        /// Out-edges per arriving node (random models)
        #[arg(long, default_value = "1")]
        edges_per_node: usize,

        /// Baseline attractiveness of uncited nodes (preferential model)
        #[arg(long, default_value = "1.0")]
        zero_appeal: f64,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output edge-list file
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Clone, Debug, ValueEnum)]
pub enum VariantType {
    #[value(name = "degree")]
    Degree,
    #[value(name = "degree-age")]
    DegreeAge,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ModelType {
    #[value(name = "chain")]
    Chain,
    #[value(name = "star")]
    Star,
    #[value(name = "uniform")]
    Uniform,
    #[value(name = "preferential")]
    Preferential,
}

/// Interrupt handle that trips on Ctrl-C.
fn ctrl_c_interrupt() -> Interrupt {
    let interrupt = Interrupt::new();
    let handle = interrupt.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.trigger();
        }
    });
    interrupt
}

#[allow(clippy::too_many_arguments)]
pub async fn run_fit_command(
    input: PathBuf,
    variant: VariantType,
    iterations: usize,
    age_bins: usize,
    expected: bool,
    likelihood: bool,
    out: PathBuf,
) -> anyhow::Result<()> {
    let graph = read_edge_list(&input)?;
    info!(
        vcount = graph.vcount(),
        ecount = graph.ecount(),
        "loaded network"
    );

    println!("AKERN Fit");
    println!("=========");
    println!("Input: {}", input.display());
    println!("Variant: {:?}", variant);
    println!("Iterations: {}", iterations);
    println!("Nodes: {}", graph.vcount());
    println!("Edges: {}", graph.ecount());
    println!("Max in-degree: {}", graph.max_in_degree());

    let mut options = FitOptions::new(iterations)
        .with_sd()
        .with_normfact()
        .with_cites();
    if expected {
        options = options.with_expected();
    }
    if likelihood {
        options = options.with_likelihood();
    }

    let interrupt = ctrl_c_interrupt();
    let input_name = input.display().to_string();

    let (rows, manifest) = match variant {
        VariantType::Degree => {
            let fit = fit_degree_kernel(&graph, &options, &interrupt)?;
            let manifest = RunManifest::new("degree", iterations, None, &input_name, &graph);
            println!();
            println!("Fitted {} degree classes", fit.kernel.len());
            print_scores(fit.logprob, fit.lognull);
            (degree_rows(&fit), with_scores(manifest, fit.logprob, fit.lognull))
        }
        VariantType::DegreeAge => {
            let fit = fit_degree_age_kernel(&graph, age_bins, &options, &interrupt)?;
            let manifest =
                RunManifest::new("degree-age", iterations, Some(age_bins), &input_name, &graph);
            println!();
            println!(
                "Fitted {} degree classes x {} age bins",
                fit.kernel.nrows(),
                fit.kernel.ncols()
            );
            print_scores(fit.logprob, fit.lognull);
            (
                degree_age_rows(&fit),
                with_scores(manifest, fit.logprob, fit.lognull),
            )
        }
    };

    let manifest_path = out.with_extension("manifest.json");
    write_fit_with_manifest(&rows, &manifest, &out, &manifest_path)?;
    println!("Done.");
    Ok(())
}

fn with_scores(mut manifest: RunManifest, logprob: Option<f64>, lognull: Option<f64>) -> RunManifest {
    manifest.logprob = logprob;
    manifest.lognull = lognull;
    manifest
}

fn print_scores(logprob: Option<f64>, lognull: Option<f64>) {
    if let (Some(fitted), Some(null)) = (logprob, lognull) {
        println!("Log-likelihood (fitted): {:.4}", fitted);
        println!("Log-likelihood (null):   {:.4}", null);
        println!("Advantage over null:     {:.4}", fitted - null);
    }
}

pub async fn run_generate_command(
    model: ModelType,
    nodes: usize,
    edges_per_node: usize,
    zero_appeal: f64,
    seed: u64,
    out: PathBuf,
) -> anyhow::Result<()> {
    println!("AKERN Generate");
    println!("==============");
    println!("Model: {:?}", model);
    println!("Nodes: {}", nodes);
    println!("Seed: {}", seed);

    let graph = match model {
        ModelType::Chain => LinearChain::new().generate(nodes, seed),
        ModelType::Star => Star::new().generate(nodes, seed),
        ModelType::Uniform => UniformAttachment::new(edges_per_node).generate(nodes, seed),
        ModelType::Preferential => {
            PreferentialAttachment::new(edges_per_node, zero_appeal).generate(nodes, seed)
        }
    };

    write_edge_list(&graph, &out)?;
    println!(
        "Wrote {} nodes / {} edges to {}",
        graph.vcount(),
        graph.ecount(),
        out.display()
    );
    Ok(())
}
