// Report assembly: turns loaded tables into a renderer-ready document.
//
// Everything numeric is computed and formatted here. Renderers only lay out
// the strings and positions they are given.

pub mod format;

use chrono::Datelike;
use pitchscout_stats::percentile::pitcher_percentiles;
use pitchscout_stats::ranking::conference_standing;
use pitchscout_stats::splits::display_label;
use pitchscout_stats::{
    compute_team_stats, Conference, PitcherRecord, QualificationThresholds, RankedMetric, RateStat,
    RowKind, TeamAggregate,
};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

use format::{count_or, fixed, innings_or, percent, text_or, NOT_AVAILABLE};

pub const REPORT_TITLE: &str = "PITCHING STAFF SCOUTING REPORT";

/// Rows of the blank scouting-notes grid on every pitcher page.
pub const NOTE_AREAS: &[&str] = &["Strengths", "Weaknesses", "Game Plan", "Key Matchups"];

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub team_name: String,
    pub season: String,
    pub generated_on: String,
    pub summary: Vec<StatLine>,
    /// Empty when no conference data was supplied.
    pub rankings: Vec<RankingChart>,
    pub pitchers: Vec<PitcherPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    pub label: String,
    pub value: String,
}

impl StatLine {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

/// One team-vs-conference chart.
#[derive(Debug, Clone, Serialize)]
pub struct RankingChart {
    pub title: String,
    pub metric: RankedMetric,
    pub value: String,
    pub rank: usize,
    pub total: usize,
    pub best: String,
    pub worst: String,
    /// Team position on a 0..=1 axis, best at 1.
    pub team_position: f64,
    /// Every conference team's position on the same axis.
    pub conference_positions: Vec<f64>,
}

impl RankingChart {
    pub fn rank_text(&self) -> String {
        format!("Rank: {}/{}", self.rank, self.total)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PitcherPage {
    pub name: String,
    pub number: String,
    pub year: String,
    pub position: String,
    pub bats_throws: String,
    pub primary: Vec<StatLine>,
    pub splits: Vec<SplitLine>,
    /// Empty when no conference data was supplied or nothing qualified.
    pub percentiles: Vec<PercentileBar>,
}

impl PitcherPage {
    pub fn heading(&self) -> String {
        format!("{} - #{}", self.name, self.number)
    }

    pub fn subheading(&self) -> String {
        format!("{} | {} | {}", self.year, self.position, self.bats_throws)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitLine {
    pub situation: String,
    pub ip: String,
    pub h: String,
    pub bb: String,
    pub so: String,
    pub baa: String,
    pub ops: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileBar {
    pub label: String,
    pub percentile: u8,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Everything one report is built from.
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub team_name: String,
    pub team: Vec<PitcherRecord>,
    pub conference: Option<Conference>,
}

/// Team label from an input file name: the first `_`-separated token,
/// capitalized. Without an underscore the file stem is used.
pub fn team_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let token = match file_name.split_once('_') {
        Some((first, _)) => first.to_string(),
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    capitalize(&token)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub fn build_report(inputs: &ReportInputs, thresholds: &QualificationThresholds) -> ReportDocument {
    let aggregate = compute_team_stats(&inputs.team);
    info!(
        "{}: {} pitchers, {:.1} IP, ERA {:.2}",
        inputs.team_name, aggregate.pitchers, aggregate.totals.innings, aggregate.era
    );

    let season = inputs
        .team
        .first()
        .and_then(|r| r.year.clone())
        .unwrap_or_else(|| chrono::Local::now().year().to_string());

    let rankings = match &inputs.conference {
        Some(conference) => ranking_charts(&aggregate, conference),
        None => Vec::new(),
    };

    let pitchers = pitcher_order(&inputs.team)
        .into_iter()
        .filter_map(|name| pitcher_page(name, &inputs.team, inputs.conference.as_ref(), thresholds))
        .collect::<Vec<_>>();
    debug!("built {} pitcher pages", pitchers.len());

    ReportDocument {
        title: REPORT_TITLE.to_string(),
        team_name: inputs.team_name.clone(),
        season,
        generated_on: chrono::Local::now().format("%Y-%m-%d").to_string(),
        summary: summary_lines(&aggregate),
        rankings,
        pitchers,
    }
}

fn summary_lines(t: &TeamAggregate) -> Vec<StatLine> {
    vec![
        StatLine::new("Team ERA", fixed(Some(t.era), 2)),
        StatLine::new("Team WHIP", fixed(Some(t.whip), 2)),
        StatLine::new("Total Innings", fixed(Some(t.totals.innings), 1)),
        StatLine::new("Total Strikeouts", count_or(Some(t.totals.strikeouts), "0")),
        StatLine::new("Total Walks", count_or(Some(t.totals.walks), "0")),
        StatLine::new("K/BB Ratio", fixed(Some(t.k_bb_ratio), 2)),
        StatLine::new("Hits Allowed", count_or(Some(t.totals.hits), "0")),
        StatLine::new("BAA", fixed(Some(t.baa), 3)),
        StatLine::new("OPS Against", fixed(Some(t.ops), 3)),
        StatLine::new("K%", percent(Some(t.k_rate))),
        StatLine::new("BB%", percent(Some(t.bb_rate))),
        StatLine::new("Ground Ball %", percent(Some(t.groundout_rate))),
    ]
}

fn ranking_charts(team: &TeamAggregate, conference: &Conference) -> Vec<RankingChart> {
    [RankedMetric::Era, RankedMetric::StrikeoutMinusWalkRate]
        .into_iter()
        .filter_map(|metric| {
            let standing = conference_standing(team, conference, metric)?;
            let show = |v: f64| match metric {
                RankedMetric::Era => fixed(Some(v), 2),
                RankedMetric::StrikeoutMinusWalkRate => percent(Some(v)),
            };
            Some(RankingChart {
                title: metric.label().to_string(),
                metric,
                value: show(standing.team_value),
                rank: standing.rank.rank,
                total: standing.rank.total,
                best: show(standing.best),
                worst: show(standing.worst),
                team_position: standing.axis_position(standing.team_value),
                conference_positions: standing
                    .conference_values
                    .iter()
                    .map(|&v| standing.axis_position(v))
                    .collect(),
            })
        })
        .collect()
}

/// Distinct player names from main rows, most raw innings first. Rows with
/// no innings sort last; equal innings keep file order.
fn pitcher_order(team: &[PitcherRecord]) -> Vec<&str> {
    let mut main: Vec<&PitcherRecord> = team.iter().filter(|r| r.is_main()).collect();
    main.sort_by(|a, b| match (a.ip, b.ip) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let mut names: Vec<&str> = Vec::new();
    for r in main {
        let name = r.player_name();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

fn pitcher_page(
    name: &str,
    team: &[PitcherRecord],
    conference: Option<&Conference>,
    thresholds: &QualificationThresholds,
) -> Option<PitcherPage> {
    let rows: Vec<&PitcherRecord> = team.iter().filter(|r| r.player_name() == name).collect();
    let (main, jersey) = rows.iter().find_map(|r| match r.kind() {
        RowKind::Main { jersey } => Some((*r, jersey)),
        RowKind::Split { .. } => None,
    })?;

    let splits = rows
        .iter()
        .filter_map(|r| match r.kind() {
            RowKind::Split { label } => Some(split_line(label, r)),
            RowKind::Main { .. } => None,
        })
        .collect();

    let percentiles = conference
        .map(|c| {
            pitcher_percentiles(main, c, thresholds)
                .into_iter()
                .map(|e| PercentileBar {
                    label: e.label.to_string(),
                    percentile: e.percentile,
                })
                .collect()
        })
        .unwrap_or_default();

    Some(PitcherPage {
        name: name.to_string(),
        number: jersey.to_string(),
        year: text_or(main.yr.as_deref(), NOT_AVAILABLE),
        position: text_or(main.pos.as_deref(), "P"),
        bats_throws: text_or(main.b_t.as_deref(), NOT_AVAILABLE),
        primary: primary_lines(main),
        splits,
        percentiles,
    })
}

fn primary_lines(r: &PitcherRecord) -> Vec<StatLine> {
    let k_bb = match (r.so, r.bb) {
        (Some(so), Some(bb)) => Some(so / bb.max(1.0)),
        _ => None,
    };
    vec![
        StatLine::new("Appearances", count_or(r.app, "0")),
        StatLine::new("Games Started", count_or(r.gs, "0")),
        StatLine::new("ERA", fixed(r.rate(RateStat::Era), 2)),
        StatLine::new("Innings Pitched", innings_or(r.ip, "0")),
        StatLine::new("Wins", count_or(r.w, "0")),
        StatLine::new("Losses", count_or(r.l, "0")),
        StatLine::new("Saves", count_or(r.sv, "0")),
        StatLine::new("Strikeouts", count_or(r.so, "0")),
        StatLine::new("Walks", count_or(r.bb, "0")),
        StatLine::new("K/BB Ratio", fixed(k_bb, 2)),
        StatLine::new("Hits Allowed", count_or(r.h, "0")),
        StatLine::new("Home Runs", count_or(r.hr_a, "0")),
        StatLine::new("BAA", fixed(r.rate(RateStat::Baa), 3)),
        StatLine::new("OPS Against", fixed(r.rate(RateStat::Ops), 3)),
        StatLine::new("Ground Ball %", percent(r.rate(RateStat::GroundoutRate))),
        StatLine::new("Fly Out %", percent(r.rate(RateStat::FlyoutRate))),
        StatLine::new("K%", percent(r.rate(RateStat::StrikeoutRate))),
        StatLine::new("BB%", percent(r.rate(RateStat::WalkRate))),
    ]
}

fn split_line(label: &str, r: &PitcherRecord) -> SplitLine {
    let rate = |stat: RateStat| match r.rate(stat).filter(|v| v.is_finite()) {
        Some(v) => format!("{v:.3}"),
        None => "-".to_string(),
    };
    SplitLine {
        situation: display_label(label),
        ip: innings_or(r.ip, "-"),
        h: count_or(r.h, "-"),
        bb: count_or(r.bb, "-"),
        so: count_or(r.so, "-"),
        baa: rate(RateStat::Baa),
        ops: rate(RateStat::Ops),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
