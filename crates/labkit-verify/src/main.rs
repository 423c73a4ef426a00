//! CLI entry point for labkit-verify.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use labkit_core::config::Settings;
use labkit_graph::{GraphClient, GraphConfig};

use labkit_verify::catalog::catalog;
use labkit_verify::config::VerifyConfig;
use labkit_verify::runner::{Runner, Selection};
use labkit_verify::sweep;

#[derive(Parser)]
#[command(name = "labkit-verify")]
#[command(about = "Verify Neo4j course lab state against a running database")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: labkit).
    #[arg(short, long, default_value = "labkit", global = true)]
    config: String,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run lab verification suites.
    Run {
        /// Only this lab (1-17).
        #[arg(long, conflicts_with = "day")]
        lab: Option<u32>,
        /// Only this course day (1-3).
        #[arg(long)]
        day: Option<u32>,
        /// Write the JSON report here.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Execute every Cypher block of every lab file.
    Sweep {
        /// Drop constraints and delete all data first.
        #[arg(long)]
        reset: bool,
        #[arg(long)]
        labs_dir: Option<PathBuf>,
    },
    /// Count executable Cypher blocks per lab file.
    Coverage {
        #[arg(long)]
        labs_dir: Option<PathBuf>,
    },
    /// List every lab suite and its checks.
    List,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json_logs {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    let settings = Settings::load(&cli.config)?;
    let verify_config: VerifyConfig = settings.section("verify")?;

    match cli.command {
        Command::Run { lab, day, json } => {
            // Validate the selection before connecting.
            let selection = Selection::from_args(lab, day)?;
            let graph = connect(&settings).await?;

            let report = Runner::new(&graph, &verify_config).run(selection).await;
            print!("{}", report.render_text());

            let json_path = json.or_else(|| verify_config.report_path.as_ref().map(PathBuf::from));
            if let Some(path) = json_path {
                report.write_json(&path)?;
                tracing::info!(path = %path.display(), "Report written");
            }
            std::process::exit(report.exit_code());
        }
        Command::Sweep { reset, labs_dir } => {
            let labs_dir = labs_dir.unwrap_or_else(|| PathBuf::from(&verify_config.labs_dir));
            let graph = connect(&settings).await?;

            let report = sweep::run_sweep(&graph, &labs_dir, &verify_config, reset).await?;
            print!("{}", report.render_text());
            if !report.passed() {
                std::process::exit(1);
            }
        }
        Command::Coverage { labs_dir } => {
            let labs_dir = labs_dir.unwrap_or_else(|| PathBuf::from(&verify_config.labs_dir));
            let entries = sweep::coverage(&labs_dir)?;
            if entries.is_empty() {
                anyhow::bail!("No Cypher blocks found in {}", labs_dir.display());
            }
            print!("{}", sweep::render_coverage(&entries));
        }
        Command::List => {
            for suite in catalog() {
                println!(
                    "{} [{}] {} ({})",
                    suite.number,
                    suite.day(),
                    suite.title,
                    suite.expected_state
                );
                for check in &suite.checks {
                    println!("    {}", check.name);
                }
            }
        }
    }

    Ok(())
}

/// Connect and prove the server answers. Verification cannot proceed
/// without a database.
async fn connect(settings: &Settings) -> anyhow::Result<GraphClient> {
    let graph_config = GraphConfig::from(&settings.neo4j()?);
    let graph = GraphClient::connect(&graph_config).await?;
    graph.verify_connectivity().await?;
    Ok(graph)
}
