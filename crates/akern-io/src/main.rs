use akern_io::cli::{run_fit_command, run_generate_command, Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fit {
            input,
            variant,
            iterations,
            age_bins,
            expected,
            likelihood,
            out,
        } => {
            run_fit_command(
                input, variant, iterations, age_bins, expected, likelihood, out,
            )
            .await?;
        }
        Commands::Generate {
            model,
            nodes,
            edges_per_node,
            zero_appeal,
            seed,
            out,
        } => {
            run_generate_command(model, nodes, edges_per_node, zero_appeal, seed, out).await?;
        }
    }

    Ok(())
}
