// Percentile ranks against the conference population.

use crate::conference::Conference;
use crate::record::PitcherRecord;
use crate::totals::{PitchingTotals, RateStat};
use serde::{Deserialize, Serialize};

/// Which way is good for a stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    LowerIsBetter,
    HigherIsBetter,
}

impl Direction {
    /// True if `a` is strictly better than `b`.
    pub fn is_better(&self, a: f64, b: f64) -> bool {
        match self {
            Direction::LowerIsBetter => a < b,
            Direction::HigherIsBetter => a > b,
        }
    }
}

/// Minimum true innings for a conference pitcher to join a population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualificationThresholds {
    /// ERA, WHIP, K%, BB%, BAA, OPS.
    pub rate_min_ip: f64,
    /// Ground-out percentage.
    pub groundout_min_ip: f64,
}

impl Default for QualificationThresholds {
    fn default() -> Self {
        Self {
            rate_min_ip: 10.0,
            groundout_min_ip: 5.0,
        }
    }
}

/// A stat shown on the percentile chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentileStat {
    pub stat: RateStat,
    pub label: &'static str,
    pub direction: Direction,
}

/// Percentile chart rows, in display order.
pub const PERCENTILE_STATS: &[PercentileStat] = &[
    PercentileStat { stat: RateStat::Era, label: "ERA", direction: Direction::LowerIsBetter },
    PercentileStat { stat: RateStat::Whip, label: "WHIP", direction: Direction::LowerIsBetter },
    PercentileStat { stat: RateStat::StrikeoutRate, label: "K%", direction: Direction::HigherIsBetter },
    PercentileStat { stat: RateStat::WalkRate, label: "BB%", direction: Direction::LowerIsBetter },
    PercentileStat { stat: RateStat::Baa, label: "BAA", direction: Direction::LowerIsBetter },
    PercentileStat { stat: RateStat::Ops, label: "OPS", direction: Direction::LowerIsBetter },
    PercentileStat { stat: RateStat::GroundoutRate, label: "GB%", direction: Direction::HigherIsBetter },
];

impl PercentileStat {
    pub fn min_innings(&self, thresholds: &QualificationThresholds) -> f64 {
        match self.stat {
            RateStat::GroundoutRate => thresholds.groundout_min_ip,
            _ => thresholds.rate_min_ip,
        }
    }

    /// A conference pitcher's value in the population. WHIP is always
    /// rederived from hits, walks and converted innings, ignoring any stored
    /// `whip` column.
    pub fn population_value(&self, record: &PitcherRecord) -> Option<f64> {
        match self.stat {
            RateStat::Whip => PitchingTotals::from_record(record).whip(),
            stat => record.rate(stat),
        }
    }
}

/// One computed percentile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileEntry {
    pub label: &'static str,
    pub stat: RateStat,
    pub value: f64,
    /// 0..=100, where 100 is always best.
    pub percentile: u8,
    pub population: usize,
}

/// Share of the population at or below `value`, flipped for lower-is-better
/// stats so that 100 means best. Rounds half to even. `None` for an empty
/// population.
pub fn percentile_rank(value: f64, population: &[f64], direction: Direction) -> Option<u8> {
    if population.is_empty() {
        return None;
    }
    let at_or_below = population.iter().filter(|&&v| v <= value).count();
    let frac = at_or_below as f64 / population.len() as f64 * 100.0;
    let pct = match direction {
        Direction::LowerIsBetter => 100.0 - frac,
        Direction::HigherIsBetter => frac,
    };
    Some(pct.round_ties_even().clamp(0.0, 100.0) as u8)
}

/// Percentiles for one pitcher's season line against the conference.
///
/// A stat is left out when the pitcher has no value for it or when no
/// conference pitcher qualifies.
pub fn pitcher_percentiles(
    record: &PitcherRecord,
    conference: &Conference,
    thresholds: &QualificationThresholds,
) -> Vec<PercentileEntry> {
    let mut entries = Vec::new();
    for def in PERCENTILE_STATS {
        let Some(value) = record.rate(def.stat) else {
            continue;
        };
        let population: Vec<f64> = conference
            .qualified(def.min_innings(thresholds))
            .filter_map(|p| def.population_value(p))
            .collect();
        if let Some(percentile) = percentile_rank(value, &population, def.direction) {
            entries.push(PercentileEntry {
                label: def.label,
                stat: def.stat,
                value,
                percentile,
                population: population.len(),
            });
        }
    }
    entries
}
