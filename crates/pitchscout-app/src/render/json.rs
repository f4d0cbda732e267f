// JSON renderer: the document model plus resolved colors for each marker.

use super::style::ReportStyle;
use super::{RenderError, Renderer};
use crate::report::ReportDocument;
use serde_json::{json, Value};

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &ReportDocument, style: &ReportStyle) -> Result<String, RenderError> {
        let mut value = serde_json::to_value(doc)?;

        if let Some(charts) = value.get_mut("rankings").and_then(Value::as_array_mut) {
            for (chart, source) in charts.iter_mut().zip(&doc.rankings) {
                let tier = style.tier(source.rank, source.total);
                chart["tier"] = json!(tier);
                chart["color"] = json!(style.tier_color(tier).to_hex());
            }
        }

        if let Some(pages) = value.get_mut("pitchers").and_then(Value::as_array_mut) {
            for (page, source) in pages.iter_mut().zip(&doc.pitchers) {
                let Some(bars) = page.get_mut("percentiles").and_then(Value::as_array_mut) else {
                    continue;
                };
                for (bar, src) in bars.iter_mut().zip(&source.percentiles) {
                    bar["color"] = json!(style.percentile_color(src.percentile).to_hex());
                }
            }
        }

        value["style"] = json!({
            "title": style.title.to_hex(),
            "player": style.player.to_hex(),
            "section": style.section.to_hex(),
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }
}
