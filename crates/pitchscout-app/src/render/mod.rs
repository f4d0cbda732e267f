// Document renderers. Each turns a finished ReportDocument into file contents.

pub mod json;
pub mod markdown;
pub mod style;

use crate::report::ReportDocument;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use style::ReportStyle;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write report {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to format report: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Output document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }

    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Markdown => Box::new(markdown::MarkdownRenderer),
            OutputFormat::Json => Box::new(json::JsonRenderer),
        }
    }
}

pub trait Renderer {
    fn render(&self, doc: &ReportDocument, style: &ReportStyle) -> Result<String, RenderError>;
}

/// `<team>_<suffix>.<ext>`
pub fn output_file_name(team_name: &str, suffix: &str, format: OutputFormat) -> String {
    format!("{}_{}.{}", team_name, suffix, format.extension())
}

/// Render the whole document in memory, then write it in one go so a failed
/// render never leaves a partial file behind.
pub fn write_report(
    doc: &ReportDocument,
    style: &ReportStyle,
    format: OutputFormat,
    dir: &Path,
    suffix: &str,
) -> Result<PathBuf, RenderError> {
    let contents = format.renderer().render(doc, style)?;
    let path = dir.join(output_file_name(&doc.team_name, suffix, format));

    let io_err = |source| RenderError::Io {
        path: path.display().to_string(),
        source,
    };
    std::fs::create_dir_all(dir).map_err(io_err)?;
    std::fs::write(&path, contents).map_err(io_err)?;

    info!("Scouting report generated: {}", path.display());
    Ok(path)
}
