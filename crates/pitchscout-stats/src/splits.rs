// Display names for situational split rows.

/// (substring, display name) pairs. Evaluated in order, first match wins, so
/// longer patterns that share a prefix ("scorepos2") must come first.
pub const SPLIT_LABELS: &[(&str, &str)] = &[
    ("vs lhb", "vs LHB"),
    ("vs lh", "vs LHB"),
    ("vs rhb", "vs RHB"),
    ("vs rh", "vs RHB"),
    ("with runners ob", "Runners On"),
    ("scorepos2", "RISP 2-Out"),
    ("scorepos", "RISP"),
    ("runners2", "Runners on 2nd"),
    ("bases loaded", "Bases Loaded"),
    ("bases empty", "Bases Empty"),
    ("w2outs", "2 Outs"),
    ("leadoff", "vs Leadoff"),
];

/// Longest raw label shown when no pattern matches.
const FALLBACK_CHARS: usize = 20;

pub fn display_label(raw: &str) -> String {
    let lower = raw.to_lowercase();
    SPLIT_LABELS
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| raw.chars().take(FALLBACK_CHARS).collect())
}
