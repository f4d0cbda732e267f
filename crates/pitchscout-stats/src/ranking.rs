// Team-vs-conference ranking for the summary page charts.

use crate::conference::Conference;
use crate::percentile::Direction;
use crate::totals::TeamAggregate;
use serde::Serialize;

/// 1-based rank among `total` conference teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamRank {
    pub rank: usize,
    pub total: usize,
}

/// Team metrics charted against the conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankedMetric {
    Era,
    StrikeoutMinusWalkRate,
}

impl RankedMetric {
    pub fn label(&self) -> &'static str {
        match self {
            RankedMetric::Era => "Team ERA vs Conference",
            RankedMetric::StrikeoutMinusWalkRate => "K% - BB% vs Conference",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            RankedMetric::Era => Direction::LowerIsBetter,
            RankedMetric::StrikeoutMinusWalkRate => Direction::HigherIsBetter,
        }
    }

    pub fn value(&self, team: &TeamAggregate) -> f64 {
        match self {
            RankedMetric::Era => team.era,
            RankedMetric::StrikeoutMinusWalkRate => team.k_minus_bb_rate(),
        }
    }
}

/// Rank = 1 + number of teams strictly better. Tied teams share a rank.
pub fn rank_team(team_value: f64, conference_values: &[f64], direction: Direction) -> TeamRank {
    let better = conference_values
        .iter()
        .filter(|&&v| direction.is_better(v, team_value))
        .count();
    TeamRank {
        rank: better + 1,
        total: conference_values.len(),
    }
}

/// Everything a renderer needs to draw one conference comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConferenceStanding {
    pub metric: RankedMetric,
    pub team_value: f64,
    pub rank: TeamRank,
    /// Every conference team's value, sorted ascending.
    pub conference_values: Vec<f64>,
    pub best: f64,
    pub worst: f64,
}

impl ConferenceStanding {
    /// Position of `value` on a 0..=1 axis with the best team at 1.
    /// A conference with no spread puts everyone in the middle.
    pub fn axis_position(&self, value: f64) -> f64 {
        let (lo, hi) = match self.metric.direction() {
            Direction::LowerIsBetter => (self.best, self.worst),
            Direction::HigherIsBetter => (self.worst, self.best),
        };
        if hi <= lo {
            return 0.5;
        }
        let pos = match self.metric.direction() {
            Direction::LowerIsBetter => (hi - value) / (hi - lo),
            Direction::HigherIsBetter => (value - lo) / (hi - lo),
        };
        pos.clamp(0.0, 1.0)
    }
}

/// Compare one team against every conference team on `metric`.
/// `None` when the conference has no teams.
pub fn conference_standing(
    team: &TeamAggregate,
    conference: &Conference,
    metric: RankedMetric,
) -> Option<ConferenceStanding> {
    let mut values: Vec<f64> = conference
        .team_aggregates()
        .iter()
        .map(|t| metric.value(&t.aggregate))
        .collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let team_value = metric.value(team);
    let rank = rank_team(team_value, &values, metric.direction());
    let min = values[0];
    let max = values[values.len() - 1];
    let (best, worst) = match metric.direction() {
        Direction::LowerIsBetter => (min, max),
        Direction::HigherIsBetter => (max, min),
    };

    Some(ConferenceStanding {
        metric,
        team_value,
        rank,
        conference_values: values,
        best,
        worst,
    })
}
