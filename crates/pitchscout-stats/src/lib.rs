// Pitching stat engine: CSV rows, innings conversion, team aggregates,
// conference percentiles, and team rankings.

pub mod conference;
pub mod innings;
pub mod percentile;
pub mod ranking;
pub mod record;
pub mod splits;
pub mod totals;

pub use conference::Conference;
pub use innings::{convert_innings, validate_innings, InningsError, InningsPolicy};
pub use percentile::{percentile_rank, pitcher_percentiles, Direction, QualificationThresholds};
pub use ranking::{conference_standing, rank_team, ConferenceStanding, RankedMetric, TeamRank};
pub use record::{LoadError, PitcherRecord, RowKind, TableKind};
pub use totals::{compute_team_stats, PitchingTotals, RateStat, TeamAggregate};
