// Conference-wide reference population.

use crate::record::PitcherRecord;
use crate::totals::{compute_team_stats, TeamAggregate};
use tracing::{debug, warn};

/// Season-total rows for every pitcher in the conference.
///
/// Split rows are dropped on construction, so nothing downstream can pull a
/// "vs LHB" line into a percentile population or a team total.
#[derive(Debug, Clone, Default)]
pub struct Conference {
    pitchers: Vec<PitcherRecord>,
}

/// One conference team's aggregate line.
#[derive(Debug, Clone)]
pub struct ConferenceTeam {
    pub team_id: String,
    pub aggregate: TeamAggregate,
}

impl Conference {
    pub fn new(records: Vec<PitcherRecord>) -> Self {
        let total = records.len();
        let pitchers: Vec<PitcherRecord> = records.into_iter().filter(|r| r.is_main()).collect();
        debug!(
            "conference reference: {} main rows of {} total",
            pitchers.len(),
            total
        );
        Self { pitchers }
    }

    pub fn pitchers(&self) -> &[PitcherRecord] {
        &self.pitchers
    }

    pub fn is_empty(&self) -> bool {
        self.pitchers.is_empty()
    }

    /// Pitchers with at least `min_innings` true innings.
    pub fn qualified(&self, min_innings: f64) -> impl Iterator<Item = &PitcherRecord> {
        self.pitchers
            .iter()
            .filter(move |p| p.innings() >= min_innings)
    }

    /// Aggregate every team, in order of first appearance. Rows without a
    /// team id are left out.
    pub fn team_aggregates(&self) -> Vec<ConferenceTeam> {
        let mut order: Vec<&str> = Vec::new();
        let mut skipped = 0usize;
        for p in &self.pitchers {
            match p.team_id.as_deref() {
                Some(id) if !order.contains(&id) => order.push(id),
                Some(_) => {}
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("{} conference rows have no team_id and were not ranked", skipped);
        }

        order
            .into_iter()
            .map(|id| ConferenceTeam {
                team_id: id.to_string(),
                aggregate: compute_team_stats(
                    self.pitchers
                        .iter()
                        .filter(|p| p.team_id.as_deref() == Some(id)),
                ),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: &str, team: Option<&str>, ip: f64, er: f64) -> PitcherRecord {
        PitcherRecord {
            number: Some(number.into()),
            team_id: team.map(String::from),
            ip: Some(ip),
            er: Some(er),
            ..Default::default()
        }
    }

    #[test]
    fn splits_dropped_on_construction() {
        let conf = Conference::new(vec![
            row("1", Some("A"), 10.0, 1.0),
            row("vs LHB", Some("A"), 4.0, 0.0),
        ]);
        assert_eq!(conf.pitchers().len(), 1);
    }

    #[test]
    fn qualification_gate_uses_true_innings() {
        let conf = Conference::new(vec![
            row("1", Some("A"), 8.0, 1.0),
            row("2", Some("A"), 9.2, 1.0),
            row("3", Some("A"), 10.0, 1.0),
        ]);
        assert_eq!(conf.qualified(10.0).count(), 1);
        assert_eq!(conf.qualified(5.0).count(), 3);
    }

    #[test]
    fn teams_grouped_in_first_appearance_order() {
        let conf = Conference::new(vec![
            row("1", Some("B"), 9.0, 3.0),
            row("2", Some("A"), 9.0, 1.0),
            row("3", Some("B"), 9.0, 1.0),
            row("4", None, 9.0, 9.0),
        ]);
        let teams = conf.team_aggregates();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].team_id, "B");
        assert_eq!(teams[0].aggregate.pitchers, 2);
        assert!((teams[0].aggregate.era - 2.0).abs() < 1e-9);
        assert_eq!(teams[1].team_id, "A");
        assert!((teams[1].aggregate.era - 1.0).abs() < 1e-9);
    }
}
