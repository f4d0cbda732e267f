// Run orchestration: load inputs, build the document, write it out.
//
// Fatal problems (missing team file, missing columns, bad config) surface as
// errors before anything is written. A missing conference table is not
// fatal; the conference sections are left out.

use std::path::{Path, PathBuf};

use anyhow::Context;
use pitchscout_stats::record::{load_conference_table, load_team_table};
use pitchscout_stats::Conference;
use tracing::{info, warn};

use crate::config::Config;
use crate::render::style::ReportStyle;
use crate::render::{write_report, OutputFormat};
use crate::report::{build_report, team_name_from_path, ReportInputs};

/// Per-run inputs that come from the command line rather than the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub team_csv: PathBuf,
    /// Overrides `input.conference_csv`.
    pub conference_csv: Option<PathBuf>,
    /// Overrides `output.format`.
    pub format: Option<OutputFormat>,
    /// Overrides `output.dir`.
    pub output_dir: Option<PathBuf>,
}

/// Load the conference table if one is configured and present.
pub fn load_conference(path: Option<&Path>, config: &Config) -> anyhow::Result<Option<Conference>> {
    let Some(path) = path else {
        info!("No conference data configured; skipping percentiles and rankings");
        return Ok(None);
    };
    if !path.exists() {
        warn!(
            "Conference file {} not found; skipping percentiles and rankings",
            path.display()
        );
        return Ok(None);
    }
    let records = load_conference_table(path, config.input.innings_policy)
        .with_context(|| format!("failed to load conference data from {}", path.display()))?;
    let conference = Conference::new(records);
    if conference.is_empty() {
        warn!(
            "Conference file {} has no season rows; skipping percentiles and rankings",
            path.display()
        );
        return Ok(None);
    }
    info!(
        "Loaded conference data with {} pitchers",
        conference.pitchers().len()
    );
    Ok(Some(conference))
}

/// Produce one report. Returns the path written.
pub fn run(options: &RunOptions, config: &Config) -> anyhow::Result<PathBuf> {
    let style = ReportStyle::from_config(&config.style).context("invalid report style")?;

    let team = load_team_table(&options.team_csv, config.input.innings_policy)
        .with_context(|| format!("failed to load team data from {}", options.team_csv.display()))?;
    info!("Loaded {} rows from {}", team.len(), options.team_csv.display());

    let conference_path = options
        .conference_csv
        .as_deref()
        .or(config.input.conference_csv.as_deref());
    let conference = load_conference(conference_path, config)?;

    let inputs = ReportInputs {
        team_name: team_name_from_path(&options.team_csv),
        team,
        conference,
    };
    let doc = build_report(&inputs, &config.qualification);

    let format = options.format.unwrap_or(config.output.format);
    let dir = options.output_dir.as_deref().unwrap_or(&config.output.dir);
    let path = write_report(&doc, &style, format, dir, &config.output.suffix)
        .context("failed to write report")?;
    Ok(path)
}
