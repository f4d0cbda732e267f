// Pitcher stat rows and CSV loading.
//
// One row per player per context. Season-total rows carry the jersey number
// in the `number` column; situational splits reuse that column for a label
// such as "vs LHB", which is how the two are told apart.

use crate::innings::{convert_innings, validate_innings, InningsError, InningsPolicy};
use crate::totals::RateStat;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One stat row for a pitcher, either season totals or a situational split.
///
/// Every numeric field is optional: blank or non-numeric cells load as
/// `None` rather than failing the row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PitcherRecord {
    #[serde(default, deserialize_with = "text")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub player: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub yr: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub pos: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub b_t: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub team_id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub year: Option<String>,

    #[serde(default, deserialize_with = "number")]
    pub ip: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub h: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub bb: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub so: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub er: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub bf: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub hb: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub ibb: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub sha: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub sfa: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub x2b_a: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub x3b_a: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub hr_a: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub fo: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub go: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub app: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub gs: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub w: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub l: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub sv: Option<f64>,

    // Precomputed rate columns, used as-is when present.
    #[serde(default, deserialize_with = "number")]
    pub era: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub whip: Option<f64>,
    #[serde(default, rename = "BAA", deserialize_with = "number")]
    pub baa: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub ops: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub k_perc: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub bb_perc: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub groundout_perc: Option<f64>,
    #[serde(default, deserialize_with = "number")]
    pub flyout_perc: Option<f64>,
}

/// Whether a row is a season total or a situational split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind<'a> {
    Main { jersey: &'a str },
    Split { label: &'a str },
}

/// Which input table is being loaded; decides the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Team,
    Conference,
}

impl TableKind {
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::Team => TEAM_COLUMNS,
            TableKind::Conference => CONFERENCE_COLUMNS,
        }
    }
}

const TEAM_COLUMNS: &[&str] = &[
    "number", "player", "yr", "pos", "b_t", "ip", "er", "so", "bf", "bb", "hb", "ibb", "sha",
    "sfa", "h", "x2b_a", "x3b_a", "hr_a", "fo", "go", "app", "gs", "w", "l", "sv", "team_id",
    "year",
];

const CONFERENCE_COLUMNS: &[&str] = &[
    "number", "player", "ip", "er", "so", "bf", "bb", "hb", "ibb", "sha", "sfa", "h", "x2b_a",
    "x3b_a", "hr_a", "fo", "go", "team_id",
];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} is missing required columns: {}", columns.join(", "))]
    MissingColumns { path: String, columns: Vec<String> },

    #[error("invalid innings for '{player}' in {path}: {error}")]
    InvalidInnings {
        path: String,
        player: String,
        #[source]
        error: InningsError,
    },

    #[error("{path} produced zero rows")]
    Empty { path: String },
}

// ---------------------------------------------------------------------------
// Record behavior
// ---------------------------------------------------------------------------

/// True for a season-total jersey field: non-empty, ASCII digits only.
pub fn is_main_number(number: &str) -> bool {
    !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit())
}

impl PitcherRecord {
    pub fn kind(&self) -> RowKind<'_> {
        match self.number.as_deref() {
            Some(n) if is_main_number(n) => RowKind::Main { jersey: n },
            Some(label) => RowKind::Split { label },
            None => RowKind::Split { label: "" },
        }
    }

    pub fn is_main(&self) -> bool {
        matches!(self.kind(), RowKind::Main { .. })
    }

    pub fn player_name(&self) -> &str {
        self.player.as_deref().unwrap_or("")
    }

    /// Innings converted from baseball notation to true innings.
    pub fn innings(&self) -> f64 {
        convert_innings(self.ip)
    }

    /// The precomputed column for a rate stat, if the input carried one.
    pub fn precomputed(&self, stat: RateStat) -> Option<f64> {
        match stat {
            RateStat::Era => self.era,
            RateStat::Whip => self.whip,
            RateStat::Baa => self.baa,
            RateStat::Ops => self.ops,
            RateStat::StrikeoutRate => self.k_perc,
            RateStat::WalkRate => self.bb_perc,
            RateStat::GroundoutRate => self.groundout_perc,
            RateStat::FlyoutRate => self.flyout_perc,
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("nan")))
}

fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

// ---------------------------------------------------------------------------
// Reader-based loader
// ---------------------------------------------------------------------------

/// Read stat rows from any CSV source. `path` only labels errors and logs.
///
/// Missing required columns abort the load; malformed rows are skipped.
pub fn read_records<R: Read>(
    rdr: R,
    path: &str,
    table: TableKind,
    policy: InningsPolicy,
) -> Result<Vec<PitcherRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let headers = reader.headers().map_err(|e| LoadError::Csv {
        path: path.to_string(),
        source: e,
    })?;
    let present: HashSet<&str> = headers.iter().collect();
    let missing: Vec<String> = table
        .required_columns()
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: path.to_string(),
            columns: missing,
        });
    }

    let mut records = Vec::new();
    for (line, result) in reader.deserialize::<PitcherRecord>().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed row {} in {}: {}", line + 2, path, e);
                continue;
            }
        };
        if let Some(ip) = record.ip {
            if let Err(error) = validate_innings(ip) {
                match policy {
                    InningsPolicy::Warn => {
                        warn!("'{}' in {}: {}", record.player_name(), path, error);
                    }
                    InningsPolicy::Reject => {
                        return Err(LoadError::InvalidInnings {
                            path: path.to_string(),
                            player: record.player_name().to_string(),
                            error,
                        });
                    }
                }
            }
        }
        records.push(record);
    }

    debug!(
        "read {} rows ({} main) from {}",
        records.len(),
        records.iter().filter(|r| r.is_main()).count(),
        path
    );
    Ok(records)
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load the team roster table. A table with no rows at all is an error.
pub fn load_team_table(path: &Path, policy: InningsPolicy) -> Result<Vec<PitcherRecord>, LoadError> {
    let label = path.display().to_string();
    let records = read_records(open(path)?, &label, TableKind::Team, policy)?;
    if records.is_empty() {
        return Err(LoadError::Empty { path: label });
    }
    Ok(records)
}

/// Load the conference-wide reference table.
pub fn load_conference_table(
    path: &Path,
    policy: InningsPolicy,
) -> Result<Vec<PitcherRecord>, LoadError> {
    let label = path.display().to_string();
    read_records(open(path)?, &label, TableKind::Conference, policy)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TEAM_HEADER: &str = "number,player,yr,pos,b_t,ip,er,so,bf,bb,hb,ibb,sha,sfa,h,x2b_a,x3b_a,hr_a,fo,go,app,gs,w,l,sv,team_id,year";

    fn team_csv(rows: &[&str]) -> String {
        let mut out = TEAM_HEADER.to_string();
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    fn read_team(csv_data: &str) -> Result<Vec<PitcherRecord>, LoadError> {
        read_records(csv_data.as_bytes(), "team.csv", TableKind::Team, InningsPolicy::Warn)
    }

    #[test]
    fn main_and_split_rows_classified() {
        let data = team_csv(&[
            "12,Sam Reyes,Jr,P,R/R,10.0,4,10,40,3,1,0,0,1,8,2,0,1,9,12,5,2,1,1,0,450,2024",
            "vs LHB,Sam Reyes,,,,4.1,2,3,18,1,0,0,0,0,4,1,0,0,3,5,,,,,,450,2024",
        ]);
        let records = read_team(&data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind(), RowKind::Main { jersey: "12" });
        assert_eq!(records[1].kind(), RowKind::Split { label: "vs LHB" });
        assert!(records[0].is_main());
        assert!(!records[1].is_main());
    }

    #[test]
    fn missing_number_is_a_split() {
        let record = PitcherRecord::default();
        assert_eq!(record.kind(), RowKind::Split { label: "" });
    }

    #[test]
    fn numeric_text_rules() {
        assert!(is_main_number("7"));
        assert!(is_main_number("007"));
        assert!(!is_main_number(""));
        assert!(!is_main_number("12.0"));
        assert!(!is_main_number("vs RHB"));
        assert!(!is_main_number("-3"));
    }

    #[test]
    fn blank_and_garbage_numbers_are_absent() {
        let data = team_csv(&[
            "3,Pat Lee,So,P,L/L,,x,5,,2,0,0,0,0,4,0,0,0,1,1,3,0,0,0,0,450,2024",
        ]);
        let records = read_team(&data).unwrap();
        assert_eq!(records[0].ip, None);
        assert_eq!(records[0].er, None);
        assert_eq!(records[0].bf, None);
        assert_eq!(records[0].so, Some(5.0));
        assert_eq!(records[0].innings(), 0.0);
    }

    #[test]
    fn precomputed_columns_read_when_present() {
        let data = "number,player,yr,pos,b_t,ip,er,so,bf,bb,hb,ibb,sha,sfa,h,x2b_a,x3b_a,hr_a,fo,go,app,gs,w,l,sv,team_id,year,era,whip,BAA
5,Kai Moss,Sr,P,R/R,9.0,3,8,36,2,0,0,0,0,7,1,0,0,6,8,4,1,1,0,0,450,2024,3.00,1.00,0.219";
        let records = read_team(data).unwrap();
        assert_eq!(records[0].precomputed(RateStat::Era), Some(3.0));
        assert_eq!(records[0].precomputed(RateStat::Whip), Some(1.0));
        assert_eq!(records[0].precomputed(RateStat::Baa), Some(0.219));
        assert_eq!(records[0].precomputed(RateStat::Ops), None);
    }

    #[test]
    fn missing_columns_rejected() {
        let data = "number,player,ip\n1,A,1.0";
        let err = read_team(data).unwrap_err();
        match err {
            LoadError::MissingColumns { columns, .. } => {
                assert!(columns.contains(&"er".to_string()));
                assert!(columns.contains(&"year".to_string()));
                assert!(!columns.contains(&"ip".to_string()));
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn conference_needs_fewer_columns() {
        let data = "number,player,ip,er,so,bf,bb,hb,ibb,sha,sfa,h,x2b_a,x3b_a,hr_a,fo,go,team_id
9,Remy Ortiz,12.0,5,14,50,4,1,0,0,0,10,2,0,1,8,11,300";
        let records =
            read_records(data.as_bytes(), "conf.csv", TableKind::Conference, InningsPolicy::Warn)
                .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].team_id.as_deref(), Some("300"));
        assert_eq!(records[0].yr, None);
    }

    #[test]
    fn malformed_rows_skipped() {
        let data = team_csv(&[
            "1,Good One,Fr,P,R/R,3.0,1,2,12,1,0,0,0,0,2,0,0,0,1,1,1,0,0,0,0,450,2024",
            "2,Short Row,Fr",
            "3,Good Two,Fr,P,R/R,2.1,0,3,9,0,0,0,0,0,1,0,0,0,2,1,1,0,0,0,0,450,2024",
        ]);
        let records = read_team(&data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].player_name(), "Good One");
        assert_eq!(records[1].player_name(), "Good Two");
    }

    #[test]
    fn whitespace_trimmed() {
        let data = team_csv(&[
            " 4 ,  Jo Park  ,Fr,P,R/R,1.0,0,1,4,0,0,0,0,0,1,0,0,0,1,1,1,0,0,0,0,450,2024",
        ]);
        let records = read_team(&data).unwrap();
        assert_eq!(records[0].player_name(), "Jo Park");
        assert!(records[0].is_main());
    }

    #[test]
    fn reject_policy_fails_on_bad_innings() {
        let data = team_csv(&[
            "1,Bad Notation,Fr,P,R/R,4.3,1,2,12,1,0,0,0,0,2,0,0,0,1,1,1,0,0,0,0,450,2024",
        ]);
        let err = read_records(data.as_bytes(), "team.csv", TableKind::Team, InningsPolicy::Reject)
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidInnings { ref player, .. } if player == "Bad Notation"));

        let kept = read_team(&data).unwrap();
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn team_file_not_found() {
        let err = load_team_table(Path::new("/nonexistent/team_pitching.csv"), InningsPolicy::Warn)
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
