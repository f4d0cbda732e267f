// Pitching scouting report entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Initialize tracing (stderr)
// 3. Load config and apply command-line overrides
// 4. Load team and conference tables, build and write the report

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pitchscout_app::app::{self, RunOptions};
use pitchscout_app::config;
use pitchscout_app::render::OutputFormat;
use tracing::{error, info};

/// Build a pitching staff scouting report from a team stats CSV.
#[derive(Debug, Parser)]
#[command(name = "pitchscout", version, about)]
struct Args {
    /// Team pitching CSV, e.g. `Gordon_pitching.csv`.
    team_csv: PathBuf,

    /// Conference-wide pitcher CSV used for percentiles and rankings.
    #[arg(long)]
    conference: Option<PathBuf>,

    /// Config file (default: config/report.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Directory to write the report into.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let args = Args::parse();

    // 2. Initialize tracing
    init_tracing()?;
    info!("pitchscout starting up");

    // 3. Load config
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let config = config::load_config(args.config.as_deref(), &cwd)
        .context("failed to load configuration")?;

    let options = RunOptions {
        team_csv: args.team_csv,
        conference_csv: args.conference,
        format: args.format,
        output_dir: args.output_dir,
    };

    // 4. Build and write
    match app::run(&options, &config) {
        Ok(path) => {
            println!("{}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("Report generation failed: {e:#}");
            Err(e)
        }
    }
}

/// Initialize tracing to stderr so stdout only carries the output path.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pitchscout=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
