// Counting-stat sums and the rate stats derived from them.
//
// Team numbers are always recomputed from summed counts. Averaging each
// pitcher's own ERA would weight a two-inning reliever the same as a starter.

use crate::record::PitcherRecord;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Rate stats
// ---------------------------------------------------------------------------

/// Every rate stat the report can derive from counting stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RateStat {
    Era,
    Whip,
    Baa,
    Ops,
    StrikeoutRate,
    WalkRate,
    GroundoutRate,
    FlyoutRate,
}

// ---------------------------------------------------------------------------
// PitchingTotals
// ---------------------------------------------------------------------------

/// Summed counting stats over any set of rows. Absent cells count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PitchingTotals {
    /// True innings, already converted from baseball notation.
    pub innings: f64,
    pub earned_runs: f64,
    pub strikeouts: f64,
    pub batters_faced: f64,
    pub walks: f64,
    pub hit_by_pitch: f64,
    pub intentional_walks: f64,
    pub sac_hits: f64,
    pub sac_flies: f64,
    pub hits: f64,
    pub doubles: f64,
    pub triples: f64,
    pub home_runs: f64,
    pub fly_outs: f64,
    pub ground_outs: f64,
}

fn ratio(num: f64, den: f64) -> Option<f64> {
    (den > 0.0).then(|| num / den)
}

impl PitchingTotals {
    /// Totals of a single row, whatever its kind.
    pub fn from_record(record: &PitcherRecord) -> Self {
        let mut totals = Self::default();
        totals.add(record);
        totals
    }

    /// Totals over the main rows of `records`; split rows are ignored.
    pub fn add(&mut self, r: &PitcherRecord) {
        let v = |x: Option<f64>| x.unwrap_or(0.0);
        self.innings += r.innings();
        self.earned_runs += v(r.er);
        self.strikeouts += v(r.so);
        self.batters_faced += v(r.bf);
        self.walks += v(r.bb);
        self.hit_by_pitch += v(r.hb);
        self.intentional_walks += v(r.ibb);
        self.sac_hits += v(r.sha);
        self.sac_flies += v(r.sfa);
        self.hits += v(r.h);
        self.doubles += v(r.x2b_a);
        self.triples += v(r.x3b_a);
        self.home_runs += v(r.hr_a);
        self.fly_outs += v(r.fo);
        self.ground_outs += v(r.go);
    }

    /// Official at-bats against: batters faced minus walks, HBP, IBB, and sacrifices.
    pub fn at_bats(&self) -> f64 {
        self.batters_faced
            - (self.walks
                + self.hit_by_pitch
                + self.intentional_walks
                + self.sac_hits
                + self.sac_flies)
    }

    pub fn singles(&self) -> f64 {
        self.hits - (self.doubles + self.triples + self.home_runs)
    }

    pub fn era(&self) -> Option<f64> {
        ratio(9.0 * self.earned_runs, self.innings)
    }

    pub fn whip(&self) -> Option<f64> {
        ratio(self.hits + self.walks, self.innings)
    }

    pub fn baa(&self) -> Option<f64> {
        ratio(self.hits, self.at_bats())
    }

    pub fn obp(&self) -> Option<f64> {
        ratio(
            self.hits + self.walks + self.hit_by_pitch,
            self.at_bats() + self.walks + self.hit_by_pitch + self.sac_flies,
        )
    }

    pub fn slg(&self) -> Option<f64> {
        let total_bases =
            self.singles() + 2.0 * self.doubles + 3.0 * self.triples + 4.0 * self.home_runs;
        ratio(total_bases, self.at_bats())
    }

    /// OBP + SLG, with an undefined component counted as zero. `None` only
    /// when neither component is defined.
    pub fn ops(&self) -> Option<f64> {
        match (self.obp(), self.slg()) {
            (None, None) => None,
            (obp, slg) => Some(obp.unwrap_or(0.0) + slg.unwrap_or(0.0)),
        }
    }

    pub fn strikeout_rate(&self) -> Option<f64> {
        ratio(self.strikeouts, self.batters_faced)
    }

    pub fn walk_rate(&self) -> Option<f64> {
        ratio(self.walks, self.batters_faced)
    }

    pub fn groundout_rate(&self) -> Option<f64> {
        ratio(self.ground_outs, self.ground_outs + self.fly_outs)
    }

    pub fn flyout_rate(&self) -> Option<f64> {
        ratio(self.fly_outs, self.ground_outs + self.fly_outs)
    }

    /// Strikeouts per walk. With zero walks this is the raw strikeout count.
    pub fn strikeout_walk_ratio(&self) -> f64 {
        ratio(self.strikeouts, self.walks).unwrap_or(self.strikeouts)
    }

    pub fn rate(&self, stat: RateStat) -> Option<f64> {
        match stat {
            RateStat::Era => self.era(),
            RateStat::Whip => self.whip(),
            RateStat::Baa => self.baa(),
            RateStat::Ops => self.ops(),
            RateStat::StrikeoutRate => self.strikeout_rate(),
            RateStat::WalkRate => self.walk_rate(),
            RateStat::GroundoutRate => self.groundout_rate(),
            RateStat::FlyoutRate => self.flyout_rate(),
        }
    }
}

impl PitcherRecord {
    /// This row's own value for a rate stat: the precomputed column when the
    /// input has one, otherwise derived from the row's counting stats.
    pub fn rate(&self, stat: RateStat) -> Option<f64> {
        self.precomputed(stat)
            .or_else(|| PitchingTotals::from_record(self).rate(stat))
    }
}

// ---------------------------------------------------------------------------
// TeamAggregate
// ---------------------------------------------------------------------------

/// Staff-wide pitching line. Undefined ratios are reported as 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TeamAggregate {
    pub pitchers: usize,
    pub totals: PitchingTotals,
    pub era: f64,
    pub whip: f64,
    pub baa: f64,
    pub obp: f64,
    pub slg: f64,
    pub ops: f64,
    pub k_rate: f64,
    pub bb_rate: f64,
    pub groundout_rate: f64,
    pub flyout_rate: f64,
    pub k_bb_ratio: f64,
}

impl TeamAggregate {
    /// K% minus BB%, the command metric charted against the conference.
    pub fn k_minus_bb_rate(&self) -> f64 {
        self.k_rate - self.bb_rate
    }
}

/// Aggregate the main rows of one team.
pub fn compute_team_stats<'a, I>(records: I) -> TeamAggregate
where
    I: IntoIterator<Item = &'a PitcherRecord>,
{
    let mut totals = PitchingTotals::default();
    let mut pitchers = 0;
    for record in records.into_iter().filter(|r| r.is_main()) {
        totals.add(record);
        pitchers += 1;
    }
    let obp = totals.obp().unwrap_or(0.0);
    let slg = totals.slg().unwrap_or(0.0);

    TeamAggregate {
        pitchers,
        totals,
        era: totals.era().unwrap_or(0.0),
        whip: totals.whip().unwrap_or(0.0),
        baa: totals.baa().unwrap_or(0.0),
        obp,
        slg,
        ops: obp + slg,
        k_rate: totals.strikeout_rate().unwrap_or(0.0),
        bb_rate: totals.walk_rate().unwrap_or(0.0),
        groundout_rate: totals.groundout_rate().unwrap_or(0.0),
        flyout_rate: totals.flyout_rate().unwrap_or(0.0),
        k_bb_ratio: totals.strikeout_walk_ratio(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn pitcher(number: &str, ip: f64, er: f64, h: f64, bb: f64, so: f64, bf: f64) -> PitcherRecord {
        PitcherRecord {
            number: Some(number.into()),
            player: Some(format!("P{number}")),
            ip: Some(ip),
            er: Some(er),
            h: Some(h),
            bb: Some(bb),
            so: Some(so),
            bf: Some(bf),
            ..Default::default()
        }
    }

    #[test]
    fn two_pitcher_staff() {
        let records = vec![
            pitcher("11", 10.0, 4.0, 8.0, 3.0, 10.0, 40.0),
            pitcher("22", 5.1, 2.0, 5.0, 2.0, 6.0, 22.0),
        ];
        let team = compute_team_stats(&records);

        assert_eq!(team.pitchers, 2);
        assert!((team.totals.innings - (15.0 + 1.0 / 3.0)).abs() < TOL);
        assert!((team.era - 54.0 / (46.0 / 3.0)).abs() < TOL);
        assert!((team.whip - 18.0 / (46.0 / 3.0)).abs() < TOL);
        assert_eq!(format!("{:.2}", team.era), "3.52");
        assert_eq!(format!("{:.2}", team.whip), "1.17");
        assert!((team.k_rate - 16.0 / 62.0).abs() < TOL);
        assert!((team.bb_rate - 5.0 / 62.0).abs() < TOL);
        assert!((team.k_bb_ratio - 16.0 / 5.0).abs() < TOL);
    }

    #[test]
    fn split_rows_never_summed() {
        let mut split = pitcher("vs LHB", 9.0, 9.0, 9.0, 9.0, 9.0, 90.0);
        split.number = Some("vs LHB".into());
        let records = vec![pitcher("11", 3.0, 1.0, 2.0, 1.0, 4.0, 12.0), split];

        let team = compute_team_stats(&records);
        assert_eq!(team.pitchers, 1);
        assert_eq!(team.totals.earned_runs, 1.0);
        assert_eq!(team.totals.batters_faced, 12.0);
        assert!((team.totals.innings - 3.0).abs() < TOL);
    }

    #[test]
    fn team_of_one_matches_pitcher_rates() {
        let mut record = pitcher("7", 6.2, 3.0, 7.0, 2.0, 9.0, 30.0);
        record.hb = Some(1.0);
        record.sfa = Some(1.0);
        record.x2b_a = Some(2.0);
        record.hr_a = Some(1.0);
        record.go = Some(8.0);
        record.fo = Some(4.0);

        let team = compute_team_stats(std::slice::from_ref(&record));
        for (stat, team_value) in [
            (RateStat::Era, team.era),
            (RateStat::Whip, team.whip),
            (RateStat::Baa, team.baa),
            (RateStat::Ops, team.ops),
            (RateStat::StrikeoutRate, team.k_rate),
            (RateStat::WalkRate, team.bb_rate),
            (RateStat::GroundoutRate, team.groundout_rate),
            (RateStat::FlyoutRate, team.flyout_rate),
        ] {
            let own = record.rate(stat).unwrap();
            assert!((own - team_value).abs() < TOL, "{stat:?}: {own} vs {team_value}");
        }
    }

    #[test]
    fn slash_line_formulas() {
        let mut record = pitcher("1", 9.0, 2.0, 10.0, 4.0, 8.0, 45.0);
        record.hb = Some(1.0);
        record.ibb = Some(1.0);
        record.sha = Some(1.0);
        record.sfa = Some(2.0);
        record.x2b_a = Some(3.0);
        record.x3b_a = Some(1.0);
        record.hr_a = Some(2.0);
        let t = PitchingTotals::from_record(&record);

        // 45 - (4 + 1 + 1 + 1 + 2)
        assert_eq!(t.at_bats(), 36.0);
        assert_eq!(t.singles(), 4.0);
        assert!((t.baa().unwrap() - 10.0 / 36.0).abs() < TOL);
        assert!((t.obp().unwrap() - 15.0 / 43.0).abs() < TOL);
        // 4 + 6 + 3 + 8 total bases
        assert!((t.slg().unwrap() - 21.0 / 36.0).abs() < TOL);
        assert!((t.ops().unwrap() - (15.0 / 43.0 + 21.0 / 36.0)).abs() < TOL);
    }

    #[test]
    fn zero_denominators_degrade_to_zero() {
        let record = PitcherRecord {
            number: Some("9".into()),
            ..Default::default()
        };
        let team = compute_team_stats(std::slice::from_ref(&record));
        assert_eq!(team.era, 0.0);
        assert_eq!(team.whip, 0.0);
        assert_eq!(team.baa, 0.0);
        assert_eq!(team.ops, 0.0);
        assert_eq!(team.k_rate, 0.0);
        assert_eq!(team.groundout_rate, 0.0);
        assert_eq!(team.k_bb_ratio, 0.0);
    }

    #[test]
    fn strikeout_walk_ratio_falls_back_to_strikeouts() {
        let records = vec![pitcher("4", 5.0, 0.0, 2.0, 0.0, 7.0, 18.0)];
        let team = compute_team_stats(&records);
        assert_eq!(team.k_bb_ratio, 7.0);
    }

    #[test]
    fn pitcher_rate_prefers_precomputed_column() {
        let mut record = pitcher("4", 5.0, 5.0, 2.0, 0.0, 7.0, 18.0);
        record.era = Some(1.23);
        assert_eq!(record.rate(RateStat::Era), Some(1.23));
        assert!((record.rate(RateStat::Whip).unwrap() - 0.4).abs() < TOL);
    }

    #[test]
    fn pitcher_rate_undefined_without_innings() {
        let record = pitcher("4", 0.0, 1.0, 2.0, 1.0, 0.0, 3.0);
        assert_eq!(record.rate(RateStat::Era), None);
        assert_eq!(record.rate(RateStat::Whip), None);
    }
}
