use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalyst_cli::cli::{Cli, Commands, OutputFormat};
use catalyst_cli::{commands, render};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let dir = commands::resolve_catalog_dir(cli.catalog);
    let snapshot = commands::load_catalog(&dir)?;

    let output = match cli.command {
        Commands::Calculate { scenario, inputs } => {
            let request = inputs.to_request(Some(scenario));
            let result = commands::calculate(&snapshot, &request)?;
            match cli.format {
                OutputFormat::Json => serde_json::to_string_pretty(&result)?,
                OutputFormat::Text => render::render_result(
                    snapshot.catalog.get(&result.scenario_id),
                    &result,
                    snapshot.currency(&result.currency),
                ),
            }
        }
        Commands::Compare { scenarios, inputs } => {
            let request = inputs.to_comparison(scenarios);
            let ranked = commands::compare(&snapshot, &request)?;
            match cli.format {
                OutputFormat::Json => serde_json::to_string_pretty(&ranked)?,
                OutputFormat::Text => {
                    let label = ranked
                        .first()
                        .and_then(|c| snapshot.currency(&c.result.currency));
                    render::render_comparison(&ranked, label)
                }
            }
        }
        Commands::Scenarios { category } => {
            let listed = commands::scenarios(&snapshot, category.as_deref());
            match cli.format {
                OutputFormat::Json => serde_json::to_string_pretty(&listed)?,
                OutputFormat::Text => render::render_scenarios(&listed),
            }
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}
