// Configuration loading and parsing (report.toml).
//
// Every section is optional; anything left out falls back to the built-in
// defaults, so a run with no config file at all behaves like the stock report.

use crate::render::style::Rgb;
use crate::render::OutputFormat;
use pitchscout_stats::{InningsPolicy, QualificationThresholds};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Config file looked up under the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/report.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// report.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub qualification: QualificationThresholds,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub style: StyleConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Conference reference table. Skipped with a warning if it does not exist.
    pub conference_csv: Option<PathBuf>,
    pub innings_policy: InningsPolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub dir: PathBuf,
    /// Appended to the team name to form the output file name.
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            dir: PathBuf::from("."),
            suffix: "Pitching_Report".into(),
        }
    }
}

/// Colors and tier cut-offs, as hex strings straight from the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub title_color: String,
    pub player_color: String,
    pub section_color: String,
    pub percentile_low: String,
    pub percentile_mid: String,
    pub percentile_high: String,
    pub tier_top_color: String,
    pub tier_middle_color: String,
    pub tier_bottom_color: String,
    /// Share of the conference counted as the top tier.
    pub tier_top_fraction: f64,
    /// Share of the conference counted as top or middle tier.
    pub tier_middle_fraction: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title_color: "#1f4788".into(),
            player_color: "#c41e3a".into(),
            section_color: "#1f4788".into(),
            percentile_low: "#2952a3".into(),
            percentile_mid: "#ffffff".into(),
            percentile_high: "#cc0000".into(),
            tier_top_color: "#00aa00".into(),
            tier_middle_color: "#ffa500".into(),
            tier_bottom_color: "#ff0000".into(),
            tier_top_fraction: 0.25,
            tier_middle_fraction: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate a config file.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load the config for a run.
///
/// An explicit path must exist. Without one, `config/report.toml` under
/// `base_dir` is used when present, else the built-in defaults.
pub fn load_config(explicit: Option<&Path>, base_dir: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }
    let fallback = base_dir.join(DEFAULT_CONFIG_PATH);
    if fallback.exists() {
        load_config_from(&fallback)
    } else {
        debug!("no {} found, using built-in defaults", fallback.display());
        Ok(Config::default())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let q = &config.qualification;
    let thresholds: &[(&str, f64)] = &[
        ("qualification.rate_min_ip", q.rate_min_ip),
        ("qualification.groundout_min_ip", q.groundout_min_ip),
    ];
    for (name, val) in thresholds {
        if !val.is_finite() || *val < 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be a non-negative number, got {val}"),
            });
        }
    }

    if config.output.suffix.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "output.suffix".into(),
            message: "must not be empty".into(),
        });
    }

    let s = &config.style;
    let colors: &[(&str, &str)] = &[
        ("style.title_color", s.title_color.as_str()),
        ("style.player_color", s.player_color.as_str()),
        ("style.section_color", s.section_color.as_str()),
        ("style.percentile_low", s.percentile_low.as_str()),
        ("style.percentile_mid", s.percentile_mid.as_str()),
        ("style.percentile_high", s.percentile_high.as_str()),
        ("style.tier_top_color", s.tier_top_color.as_str()),
        ("style.tier_middle_color", s.tier_middle_color.as_str()),
        ("style.tier_bottom_color", s.tier_bottom_color.as_str()),
    ];
    for (name, hex) in colors {
        if Rgb::parse_hex(hex).is_none() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("expected a #rrggbb color, got {hex:?}"),
            });
        }
    }

    let (top, mid) = (s.tier_top_fraction, s.tier_middle_fraction);
    if !(0.0..=1.0).contains(&top) || !(0.0..=1.0).contains(&mid) || top > mid {
        return Err(ConfigError::ValidationError {
            field: "style.tier_top_fraction".into(),
            message: format!(
                "tier fractions must satisfy 0 <= top <= middle <= 1, got {top} and {mid}"
            ),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
