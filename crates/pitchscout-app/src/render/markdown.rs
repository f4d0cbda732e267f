// Markdown renderer. Colors go through inline HTML spans, which most
// Markdown viewers pass through.

use super::style::{ReportStyle, Rgb};
use super::{RenderError, Renderer};
use crate::report::{
    PercentileBar, PitcherPage, RankingChart, ReportDocument, StatLine, NOTE_AREAS,
};
use std::fmt::{self, Write};

/// Cells in a percentile or ranking track.
const TRACK_WIDTH: usize = 21;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &ReportDocument, style: &ReportStyle) -> Result<String, RenderError> {
        let mut out = String::new();
        summary_page(&mut out, doc, style)?;
        for page in &doc.pitchers {
            out.push_str("\n---\n\n");
            pitcher_page(&mut out, page, style)?;
        }
        Ok(out)
    }
}

fn colored(text: &str, color: Rgb) -> String {
    format!("<span style=\"color:{}\">{}</span>", color.to_hex(), text)
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn stat_table(out: &mut String, header: (&str, &str), lines: &[StatLine]) -> fmt::Result {
    writeln!(out, "| {} | {} |", header.0, header.1)?;
    out.push_str("|---|---|\n");
    for line in lines {
        writeln!(out, "| {} | {} |", cell(&line.label), cell(&line.value))?;
    }
    Ok(())
}

/// A fixed-width track with `marker` at `position` (0..=1) and `dot` at
/// every entry of `others`.
fn track(position: f64, others: &[f64], marker: char, dot: char) -> String {
    let slot = |p: f64| ((p.clamp(0.0, 1.0) * (TRACK_WIDTH - 1) as f64).round()) as usize;
    let mut cells = vec!['-'; TRACK_WIDTH];
    for &p in others {
        cells[slot(p)] = dot;
    }
    cells[slot(position)] = marker;
    cells.into_iter().collect()
}

fn summary_page(out: &mut String, doc: &ReportDocument, style: &ReportStyle) -> fmt::Result {
    writeln!(out, "# {}\n", colored(&doc.title, style.title))?;
    writeln!(out, "{} | Season: {}\n", doc.team_name, doc.season)?;
    writeln!(out, "_Generated {}_\n", doc.generated_on)?;

    stat_table(out, ("TEAM PITCHING SUMMARY", ""), &doc.summary)?;

    if !doc.rankings.is_empty() {
        writeln!(out, "\n## {}\n", colored("CONFERENCE RANKINGS", style.section))?;
        for chart in &doc.rankings {
            ranking_chart(out, chart, style)?;
        }
    }
    Ok(())
}

fn ranking_chart(out: &mut String, chart: &RankingChart, style: &ReportStyle) -> fmt::Result {
    let tier = style.tier(chart.rank, chart.total);
    writeln!(out, "### {}\n", chart.title)?;
    writeln!(
        out,
        "`Worst {} Best`\n",
        track(chart.team_position, &chart.conference_positions, '●', 'o')
    )?;
    writeln!(
        out,
        "- Value: **{}** ({})",
        chart.value,
        colored(tier.label(), style.tier_color(tier))
    )?;
    writeln!(out, "- {}", chart.rank_text())?;
    writeln!(out, "- Best: {} / Worst: {}\n", chart.best, chart.worst)
}

fn pitcher_page(out: &mut String, page: &PitcherPage, style: &ReportStyle) -> fmt::Result {
    writeln!(out, "## {}\n", colored(&page.heading(), style.player))?;
    writeln!(out, "{}\n", page.subheading())?;

    stat_table(out, ("Stat", "Value"), &page.primary)?;
    out.push('\n');

    writeln!(out, "### {}\n", colored("Situational", style.section))?;
    if page.splits.is_empty() {
        out.push_str("No situational data\n\n");
    } else {
        out.push_str("| Situation | IP | H | BB | SO | BAA | OPS |\n");
        out.push_str("|---|---|---|---|---|---|---|\n");
        for s in &page.splits {
            writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} | {} |",
                cell(&s.situation),
                s.ip,
                s.h,
                s.bb,
                s.so,
                s.baa,
                s.ops
            )?;
        }
        out.push('\n');
    }

    writeln!(out, "### {}\n", colored("Conference Percentiles", style.section))?;
    if page.percentiles.is_empty() {
        out.push_str("No percentile data\n\n");
    } else {
        percentile_table(out, &page.percentiles, style)?;
    }

    writeln!(out, "### {}\n", colored("Notes", style.section))?;
    out.push_str("| Area | Notes |\n|---|---|\n");
    for area in NOTE_AREAS {
        writeln!(out, "| {} | |", area)?;
    }
    Ok(())
}

fn percentile_table(out: &mut String, bars: &[PercentileBar], style: &ReportStyle) -> fmt::Result {
    out.push_str("| Stat | 0 · 50 · 100 | Pctl |\n|---|---|---|\n");
    for bar in bars {
        let position = f64::from(bar.percentile) / 100.0;
        writeln!(
            out,
            "| _{}_ | `{}` | {} |",
            cell(&bar.label),
            track(position, &[0.0, 0.5, 1.0], '●', 'o'),
            colored(&bar.percentile.to_string(), style.percentile_color(bar.percentile)),
        )?;
    }
    out.push('\n');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{PitcherPage, SplitLine};

    fn doc(with_conference: bool) -> ReportDocument {
        let page = PitcherPage {
            name: "Sam Reyes".into(),
            number: "12".into(),
            year: "Jr".into(),
            position: "P".into(),
            bats_throws: "R/R".into(),
            primary: vec![StatLine {
                label: "ERA".into(),
                value: "3.60".into(),
            }],
            splits: if with_conference {
                vec![SplitLine {
                    situation: "vs LHB".into(),
                    ip: "4.1".into(),
                    h: "4".into(),
                    bb: "1".into(),
                    so: "3".into(),
                    baa: "0.250".into(),
                    ops: "0.700".into(),
                }]
            } else {
                Vec::new()
            },
            percentiles: if with_conference {
                vec![PercentileBar {
                    label: "ERA".into(),
                    percentile: 80,
                }]
            } else {
                Vec::new()
            },
        };
        ReportDocument {
            title: "PITCHING STAFF SCOUTING REPORT".into(),
            team_name: "Gordon".into(),
            season: "2024".into(),
            generated_on: "2024-05-01".into(),
            summary: vec![StatLine {
                label: "Team ERA".into(),
                value: "3.52".into(),
            }],
            rankings: if with_conference {
                vec![RankingChart {
                    title: "Team ERA vs Conference".into(),
                    metric: pitchscout_stats::RankedMetric::Era,
                    value: "3.52".into(),
                    rank: 2,
                    total: 8,
                    best: "2.10".into(),
                    worst: "6.30".into(),
                    team_position: 0.5,
                    conference_positions: vec![0.0, 1.0],
                }]
            } else {
                Vec::new()
            },
            pitchers: vec![page],
        }
    }

    #[test]
    fn track_places_marker_over_dots() {
        assert_eq!(track(0.5, &[0.0, 0.5, 1.0], '●', 'o'), "o---------●---------o");
        assert_eq!(track(1.0, &[], 'X', 'o'), "--------------------X");
    }

    #[test]
    fn stat_table_escapes_pipes() {
        let mut out = String::new();
        let lines = [StatLine {
            label: "B/T".into(),
            value: "R|R".into(),
        }];
        stat_table(&mut out, ("Stat", "Value"), &lines).unwrap();
        assert_eq!(out, "| Stat | Value |\n|---|---|\n| B/T | R\\|R |\n");
    }

    #[test]
    fn renders_without_conference() {
        let out = MarkdownRenderer.render(&doc(false), &ReportStyle::default()).unwrap();
        assert!(out.contains("PITCHING STAFF SCOUTING REPORT"));
        assert!(out.contains("Gordon | Season: 2024"));
        assert!(out.contains("| Team ERA | 3.52 |"));
        assert!(!out.contains("CONFERENCE RANKINGS"));
        assert!(out.contains("Sam Reyes - #12"));
        assert!(out.contains("No situational data"));
        assert!(out.contains("No percentile data"));
        assert!(out.contains("| Key Matchups | |"));
    }

    #[test]
    fn renders_conference_sections() {
        let out = MarkdownRenderer.render(&doc(true), &ReportStyle::default()).unwrap();
        assert!(out.contains("CONFERENCE RANKINGS"));
        assert!(out.contains("Rank: 2/8"));
        assert!(out.contains("top quarter"));
        assert!(out.contains("| vs LHB | 4.1 | 4 | 1 | 3 | 0.250 | 0.700 |"));
        assert!(out.contains(">80</span>"));
        assert!(!out.contains("No percentile data"));
    }
}
