// Report style: colors and tier cut-offs, resolved once per run.

use crate::config::{ConfigError, StyleConfig};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise blend toward `other`; `t` in 0..=1. Truncates like the
    /// integer color math it replaces.
    fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t) as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Where a team's conference rank falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankTier {
    Top,
    Middle,
    Bottom,
}

impl RankTier {
    pub fn label(&self) -> &'static str {
        match self {
            RankTier::Top => "top quarter",
            RankTier::Middle => "top half",
            RankTier::Bottom => "bottom half",
        }
    }
}

/// Resolved style handed to every renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    pub title: Rgb,
    pub player: Rgb,
    pub section: Rgb,
    pub percentile_low: Rgb,
    pub percentile_mid: Rgb,
    pub percentile_high: Rgb,
    pub tier_top: Rgb,
    pub tier_middle: Rgb,
    pub tier_bottom: Rgb,
    pub tier_top_fraction: f64,
    pub tier_middle_fraction: f64,
}

impl ReportStyle {
    pub fn from_config(config: &StyleConfig) -> Result<Self, ConfigError> {
        let color = |field: &str, hex: &str| {
            Rgb::parse_hex(hex).ok_or_else(|| ConfigError::ValidationError {
                field: format!("style.{field}"),
                message: format!("expected a #rrggbb color, got {hex:?}"),
            })
        };
        Ok(Self {
            title: color("title_color", &config.title_color)?,
            player: color("player_color", &config.player_color)?,
            section: color("section_color", &config.section_color)?,
            percentile_low: color("percentile_low", &config.percentile_low)?,
            percentile_mid: color("percentile_mid", &config.percentile_mid)?,
            percentile_high: color("percentile_high", &config.percentile_high)?,
            tier_top: color("tier_top_color", &config.tier_top_color)?,
            tier_middle: color("tier_middle_color", &config.tier_middle_color)?,
            tier_bottom: color("tier_bottom_color", &config.tier_bottom_color)?,
            tier_top_fraction: config.tier_top_fraction,
            tier_middle_fraction: config.tier_middle_fraction,
        })
    }

    /// Marker color for a percentile: low color at 0, mid at 50, high at 100.
    pub fn percentile_color(&self, percentile: u8) -> Rgb {
        let p = f64::from(percentile.min(100));
        if p <= 50.0 {
            self.percentile_low.lerp(&self.percentile_mid, p / 50.0)
        } else {
            self.percentile_mid.lerp(&self.percentile_high, (p - 50.0) / 50.0)
        }
    }

    pub fn tier(&self, rank: usize, total: usize) -> RankTier {
        let rank = rank as f64;
        let total = total as f64;
        if rank <= total * self.tier_top_fraction {
            RankTier::Top
        } else if rank <= total * self.tier_middle_fraction {
            RankTier::Middle
        } else {
            RankTier::Bottom
        }
    }

    pub fn tier_color(&self, tier: RankTier) -> Rgb {
        match tier {
            RankTier::Top => self.tier_top,
            RankTier::Middle => self.tier_middle,
            RankTier::Bottom => self.tier_bottom,
        }
    }
}

impl Default for ReportStyle {
    fn default() -> Self {
        // The default StyleConfig only holds valid colors.
        match Self::from_config(&StyleConfig::default()) {
            Ok(style) => style,
            Err(_) => unreachable!("default style colors are valid hex"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let c = Rgb::parse_hex("#1F4788").unwrap();
        assert_eq!(c, Rgb::new(0x1f, 0x47, 0x88));
        assert_eq!(c.to_hex(), "#1f4788");
        assert_eq!(Rgb::parse_hex("c41e3a"), Some(Rgb::new(0xc4, 0x1e, 0x3a)));
    }

    #[test]
    fn bad_hex_rejected() {
        assert!(Rgb::parse_hex("#12345").is_none());
        assert!(Rgb::parse_hex("#zzzzzz").is_none());
        assert!(Rgb::parse_hex("crimson").is_none());
    }

    #[test]
    fn percentile_gradient_endpoints() {
        let style = ReportStyle::default();
        assert_eq!(style.percentile_color(0), Rgb::new(41, 82, 163));
        assert_eq!(style.percentile_color(50), Rgb::new(255, 255, 255));
        assert_eq!(style.percentile_color(100), Rgb::new(204, 0, 0));
    }

    #[test]
    fn percentile_gradient_midpoints() {
        let style = ReportStyle::default();
        // 25th: halfway from (41,82,163) to white, truncated.
        assert_eq!(style.percentile_color(25), Rgb::new(148, 168, 209));
        // 75th: halfway from white to (204,0,0).
        assert_eq!(style.percentile_color(75), Rgb::new(229, 127, 127));
    }

    #[test]
    fn tiers_by_rank() {
        let style = ReportStyle::default();
        assert_eq!(style.tier(1, 8), RankTier::Top);
        assert_eq!(style.tier(2, 8), RankTier::Top);
        assert_eq!(style.tier(3, 8), RankTier::Middle);
        assert_eq!(style.tier(4, 8), RankTier::Middle);
        assert_eq!(style.tier(5, 8), RankTier::Bottom);
        assert_eq!(style.tier_color(RankTier::Top).to_hex(), "#00aa00");
    }
}
