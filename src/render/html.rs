//! Server-side HTML rendering of the dashboard page.
//!
//! The page is self-contained: inline CSS, inline SVG charts, no scripts and
//! no external assets. The toggle is a plain link that re-requests the page
//! with the opposite `optimized` flag.

use std::f64::consts::PI;

use super::{
    ANALYST_NOTES, BAR_CHART_TITLE, CARD_TITLE, DATA_AUTHENTICITY, Dashboard, FOOTER, KpiTile, PANELS_TITLE,
    PIE_CHART_TITLE, Panel, PanelKind, SUBTITLE, TITLE, TOGGLE_LABEL, Tone,
};
use crate::scenario::{ChartSeries, TimeSlice};
use crate::utils::format::{escape_html as esc, format_number};

const NAVY: &str = "#002D62";
const GOLD: &str = "#D4AF37";
const SLATE: &str = "#94a3b8";
const GREEN: &str = "#34d399";
const RED: &str = "#f87171";

/// Bar fill per series, in [`ChartSeries::series`] order.
const BAR_COLORS: [&str; 2] = [SLATE, NAVY];
/// Slice fill per time label.
const SLICE_COLORS: [&str; 3] = [NAVY, GOLD, SLATE];

const STYLE: &str = r#"
:root {
  --bg: #fcfbf4;
  --surface: #ffffff;
  --border: #e2e8f0;
  --text: #0f172a;
  --text-muted: #64748b;
  --navy: #002D62;
  --gold: #D4AF37;
  --green: #34d399;
  --red: #f87171;
  --radius: 12px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: var(--bg); color: var(--text); font-family: var(--font); font-size: 14px; line-height: 1.5; }

.app { max-width: 1200px; margin: 0 auto; padding: 32px 24px; }

header h1 { color: var(--navy); font-size: 32px; }
header .subtitle { color: var(--text-muted); margin-bottom: 24px; }

/* Toggle */
.toggle { display: inline-flex; align-items: center; gap: 10px; color: var(--text); text-decoration: none; font-weight: 600; margin-bottom: 24px; }
.toggle .track { width: 44px; height: 24px; border-radius: 12px; background: #cbd5e1; position: relative; transition: 0.2s; }
.toggle .track::before { content: ''; position: absolute; width: 18px; height: 18px; left: 3px; top: 3px; border-radius: 50%; background: #fff; transition: 0.2s; }
.toggle .state { color: var(--text-muted); font-weight: 400; }
.toggle.on .track { background: var(--navy); }
.toggle.on .track::before { transform: translateX(20px); background: var(--gold); }

/* KPI tiles */
.kpis { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }
.kpi { background: var(--surface); padding: 20px; border-radius: var(--radius); box-shadow: 0 4px 6px rgba(0,0,0,0.05); border-top: 5px solid var(--gold); }
.kpi .title { color: var(--text-muted); font-size: 13px; font-weight: 600; }
.kpi .value { color: var(--navy); font-size: 2.5rem; font-weight: 700; }
.kpi .caption { color: var(--text-muted); font-size: 12px; margin-bottom: 4px; }
.kpi .help { color: var(--text-muted); font-size: 12px; font-style: italic; }
.delta { display: inline-block; font-size: 0.9rem; font-weight: 600; padding: 1px 8px; border-radius: 6px; }
.delta.positive { background: #d1fae5; color: #047857; }
.delta.negative { background: #fee2e2; color: #b91c1c; }
.delta.neutral { background: #f1f5f9; color: var(--text-muted); }

hr.divider { border: none; border-top: 1px solid var(--border); margin: 32px 0; }

/* Layout */
.grid { display: grid; grid-template-columns: 2fr 1fr; gap: 32px; }
h2 { color: var(--navy); font-size: 18px; margin-bottom: 12px; }
.chart { background: var(--surface); border-radius: var(--radius); padding: 16px; margin-bottom: 24px; border: 1px solid var(--border); }
.legend { display: flex; gap: 16px; justify-content: flex-end; font-size: 12px; color: var(--text-muted); }
.swatch { display: inline-block; width: 10px; height: 10px; border-radius: 50%; margin-right: 6px; }

/* Panels */
.panel { padding: 12px 16px; border-radius: 8px; margin-bottom: 12px; }
.panel.success { background: #dcfce7; color: #166534; }
.panel.info { background: #dbeafe; color: #1e40af; }
.panel.warning { background: #fee2e2; color: #991b1b; }

/* Summary card */
.card { background: var(--navy); padding: 25px; border-radius: 15px; color: #fff; }
.card h3 { color: var(--gold); margin-bottom: 12px; }
.card .label { font-size: 0.8rem; color: #cbd5e1; }
.card .big { font-size: 1.5rem; font-weight: 700; margin-bottom: 1rem; }
.card hr { opacity: 0.2; margin: 12px 0; }
.card .row { display: flex; justify-content: space-between; margin-top: 10px; }

footer { margin-top: 32px; }
footer .info { background: #dbeafe; color: #1e40af; padding: 12px 16px; border-radius: 8px; margin-bottom: 12px; }
footer .authenticity { background: var(--surface); border: 1px solid var(--border); border-radius: 8px; padding: 12px 16px; grid-column: 1 / -1; }
footer .authenticity .label { font-size: 11px; font-weight: 700; text-transform: uppercase; color: var(--text-muted); margin: 0; }
footer .notes { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; color: var(--text-muted); font-size: 13px; }
"#;

/// Render the complete page for one dashboard model.
pub fn render_page(dash: &Dashboard) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", esc(TITLE)));
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n<div class=\"app\">\n"));

    html.push_str(&format!(
        "<header>\n<h1>🐾 {}</h1>\n<p class=\"subtitle\">{}</p>\n</header>\n",
        esc(TITLE),
        esc(SUBTITLE)
    ));
    html.push_str(&render_toggle(dash));

    html.push_str("<section class=\"kpis\">\n");
    for tile in &dash.tiles {
        html.push_str(&render_tile(tile));
    }
    html.push_str("</section>\n<hr class=\"divider\">\n<div class=\"grid\">\n");

    // Left column
    html.push_str(&format!(
        "<div>\n<h2>{}</h2>\n<div class=\"chart\">\n",
        esc(BAR_CHART_TITLE)
    ));
    html.push_str(&render_bar_chart(&dash.chart));
    html.push_str(&format!("</div>\n<h2>{}</h2>\n", esc(PANELS_TITLE)));
    for panel in &dash.panels {
        html.push_str(&render_panel(panel));
    }
    html.push_str("</div>\n");

    // Right column
    html.push_str(&format!(
        "<div>\n<h2>{}</h2>\n<div class=\"chart\">\n",
        esc(PIE_CHART_TITLE)
    ));
    html.push_str(&render_donut(&dash.time_slices));
    html.push_str("</div>\n");
    html.push_str(&render_card(dash));
    html.push_str("</div>\n</div>\n");

    html.push_str(&render_footer());
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_toggle(dash: &Dashboard) -> String {
    let optimized = dash.scenario.is_optimized();
    let target = dash.scenario.flipped();
    format!(
        "<a class=\"toggle{}\" href=\"/?optimized={}\" role=\"switch\" aria-checked=\"{}\" title=\"Switch to {}\"><span class=\"track\"></span>{} <span class=\"state\">{}</span></a>\n",
        if optimized { " on" } else { "" },
        target.is_optimized(),
        optimized,
        esc(target.label()),
        esc(TOGGLE_LABEL),
        esc(dash.scenario.label())
    )
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "positive",
        Tone::Negative => "negative",
        Tone::Neutral => "neutral",
    }
}

fn render_tile(tile: &KpiTile) -> String {
    let delta = tile
        .delta
        .map(|d| {
            format!(
                "<span class=\"delta {}\">{}</span>",
                tone_class(tile.delta_tone),
                esc(d)
            )
        })
        .unwrap_or_default();
    let help = tile
        .help
        .map(|h| format!("<div class=\"help\">{}</div>", esc(h)))
        .unwrap_or_default();

    format!(
        "<div class=\"kpi\"><div class=\"title\">{}</div><div class=\"value\">{}</div><div class=\"caption\">{}</div>{delta}{help}</div>\n",
        esc(tile.title),
        esc(&tile.value),
        esc(tile.subtitle),
    )
}

fn render_panel(panel: &Panel) -> String {
    let class = match panel.kind {
        PanelKind::Success => "success",
        PanelKind::Info => "info",
        PanelKind::Warning => "warning",
    };
    format!(
        "<div class=\"panel {class}\">{}</div>\n",
        esc(panel.text)
    )
}

fn render_card(dash: &Dashboard) -> String {
    let card = &dash.card;
    let tax_color = match card.logistics_tax_tone {
        Tone::Negative => RED,
        _ => GREEN,
    };
    format!(
        "<div class=\"card\">\n<h3>{}</h3>\n\
         <p class=\"label\">EFFICIENCY STATUS</p>\n<p class=\"big\">{}</p>\n\
         <p class=\"label\">LOGISTICS TAX</p>\n<p class=\"big\" style=\"color: {tax_color};\">{}</p>\n\
         <hr>\n\
         <div class=\"row\"><span>CLV Projection:</span><span style=\"color: {GOLD}; font-weight: bold;\">{}</span></div>\n\
         <div class=\"row\"><span>Unit CAC:</span><span style=\"color: {GREEN}; font-weight: bold;\">{}</span></div>\n\
         </div>\n",
        esc(CARD_TITLE),
        esc(card.efficiency_status),
        esc(card.logistics_tax),
        esc(card.clv_projection),
        esc(card.unit_cac),
    )
}

fn render_footer() -> String {
    let notes: String = ANALYST_NOTES
        .iter()
        .map(|(heading, body)| format!("<p><strong>{}:</strong> {}</p>", esc(heading), esc(body)))
        .collect();
    format!(
        "<footer>\n<div class=\"info\"><strong>Data Validation:</strong> {}</div>\n<div class=\"notes\">{notes}<div class=\"authenticity\"><p class=\"label\">{}</p><p>{}</p></div></div>\n</footer>\n",
        esc(FOOTER),
        esc(DATA_AUTHENTICITY.0),
        esc(DATA_AUTHENTICITY.1)
    )
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

const BAR_WIDTH: f64 = 640.0;
const BAR_HEIGHT: f64 = 320.0;
const PLOT_LEFT: f64 = 72.0;
const PLOT_TOP: f64 = 16.0;
const PLOT_BOTTOM: f64 = 32.0;
const GRID_LINES: u32 = 4;

/// Grouped bar chart: one group per category, one bar per series.
pub fn render_bar_chart(chart: &ChartSeries) -> String {
    let plot_w = BAR_WIDTH - PLOT_LEFT;
    let plot_h = BAR_HEIGHT - PLOT_TOP - PLOT_BOTTOM;
    let baseline = PLOT_TOP + plot_h;
    let max = chart.max_value().max(1) as f64;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg viewBox=\"0 0 {BAR_WIDTH} {BAR_HEIGHT}\" width=\"100%\" role=\"img\" aria-label=\"{}\">\n",
        esc(BAR_CHART_TITLE)
    ));

    for step in 0..=GRID_LINES {
        let fraction = f64::from(step) / f64::from(GRID_LINES);
        let y = baseline - plot_h * fraction;
        let label = (max * fraction).round() as u64;
        svg.push_str(&format!(
            "<line x1=\"{PLOT_LEFT}\" y1=\"{y:.1}\" x2=\"{BAR_WIDTH}\" y2=\"{y:.1}\" stroke=\"#e2e8f0\" stroke-dasharray=\"3 3\"/>\
             <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" text-anchor=\"end\" fill=\"#64748b\">{}</text>\n",
            PLOT_LEFT - 6.0,
            y + 4.0,
            format_number(label)
        ));
    }

    let group_w = plot_w / chart.categories.len() as f64;
    let bar_w = group_w / (chart.series.len() as f64 + 1.0);
    for (ci, category) in chart.categories.iter().enumerate() {
        let group_x = PLOT_LEFT + group_w * ci as f64;
        for (si, series) in chart.series.iter().enumerate() {
            let value = series.values[ci];
            let h = plot_h * value as f64 / max;
            let x = group_x + bar_w * (si as f64 + 0.5);
            svg.push_str(&format!(
                "<rect x=\"{x:.1}\" y=\"{:.1}\" width=\"{bar_w:.1}\" height=\"{h:.1}\" fill=\"{}\" data-series=\"{}\" data-value=\"{value}\"><title>{}: {}</title></rect>\n",
                baseline - h,
                BAR_COLORS[si % BAR_COLORS.len()],
                esc(series.name),
                esc(series.legend),
                format_number(value),
            ));
        }
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"12\" text-anchor=\"middle\" fill=\"#0f172a\">{}</text>\n",
            group_x + group_w / 2.0,
            baseline + 20.0,
            esc(category)
        ));
    }
    svg.push_str("</svg>\n");

    let legend: String = chart
        .series
        .iter()
        .enumerate()
        .map(|(si, s)| {
            format!(
                "<span><span class=\"swatch\" style=\"background: {}\"></span>{}</span>",
                BAR_COLORS[si % BAR_COLORS.len()],
                esc(s.legend)
            )
        })
        .collect();
    svg.push_str(&format!("<div class=\"legend\">{legend}</div>\n"));
    svg
}

const DONUT_SIZE: f64 = 220.0;
const DONUT_OUTER: f64 = 100.0;
const DONUT_HOLE: f64 = 0.6;

/// Donut chart drawn as dashed circle strokes, one per slice.
pub fn render_donut(slices: &[TimeSlice]) -> String {
    let inner = DONUT_OUTER * DONUT_HOLE;
    let radius = (DONUT_OUTER + inner) / 2.0;
    let stroke = DONUT_OUTER - inner;
    let circumference = 2.0 * PI * radius;
    let center = DONUT_SIZE / 2.0;
    let total: u32 = slices.iter().map(|s| s.percent).sum();
    let total = f64::from(total.max(1));

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg viewBox=\"0 0 {DONUT_SIZE} {DONUT_SIZE}\" width=\"100%\" role=\"img\" aria-label=\"{}\">\n",
        esc(PIE_CHART_TITLE)
    ));

    let mut offset = 0.0;
    for (i, slice) in slices.iter().enumerate() {
        let len = circumference * f64::from(slice.percent) / total;
        svg.push_str(&format!(
            "<circle cx=\"{center}\" cy=\"{center}\" r=\"{radius}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{stroke}\" \
             stroke-dasharray=\"{len:.3} {:.3}\" stroke-dashoffset=\"{:.3}\" transform=\"rotate(-90 {center} {center})\" \
             data-label=\"{}\" data-percent=\"{}\"><title>{}: {}%</title></circle>\n",
            SLICE_COLORS[i % SLICE_COLORS.len()],
            circumference - len,
            -offset,
            esc(slice.label),
            slice.percent,
            esc(slice.label),
            slice.percent,
        ));
        offset += len;
    }
    svg.push_str("</svg>\n");

    let legend: String = slices
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "<span><span class=\"swatch\" style=\"background: {}\"></span>{} {}%</span>",
                SLICE_COLORS[i % SLICE_COLORS.len()],
                esc(s.label),
                s.percent
            )
        })
        .collect();
    svg.push_str(&format!("<div class=\"legend\">{legend}</div>\n"));
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    #[test]
    fn page_contains_all_sections_in_order() {
        let html = render_page(&Dashboard::build(Scenario::Optimized));
        let order = [
            TITLE,
            "Pricing &amp; Revenue Intelligence Dashboard v2.4",
            TOGGLE_LABEL,
            "Revenue / Van-Hour",
            "class=\"divider\"",
            BAR_CHART_TITLE,
            PANELS_TITLE,
            PIE_CHART_TITLE,
            CARD_TITLE,
            "Data Validation:",
        ];
        let mut last = 0;
        for needle in order {
            let pos = html[last..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing or out of order: {needle}"));
            last += pos;
        }
    }

    #[test]
    fn toggle_links_to_opposite_scenario() {
        let on = render_page(&Dashboard::build(Scenario::Optimized));
        assert!(on.contains("class=\"toggle on\" href=\"/?optimized=false\""));

        let off = render_page(&Dashboard::build(Scenario::Fragmented));
        assert!(off.contains("class=\"toggle\" href=\"/?optimized=true\""));
    }

    #[test]
    fn toggle_names_current_and_target_scenarios() {
        let off = render_page(&Dashboard::build(Scenario::Fragmented));
        assert!(off.contains("title=\"Switch to Cluster-Optimized\""));
        assert!(off.contains("<span class=\"state\">Fragmented</span>"));

        let on = render_page(&Dashboard::build(Scenario::Optimized));
        assert!(on.contains("title=\"Switch to Fragmented\""));
        assert!(on.contains("<span class=\"state\">Cluster-Optimized</span>"));
    }

    #[test]
    fn tiles_show_captions() {
        let html = render_page(&Dashboard::build(Scenario::Fragmented));
        assert!(html.contains("<div class=\"caption\">Efficiency Target: ₹2,500+</div>"));
        assert!(html.contains("<div class=\"caption\">Post OPEX &amp; Logistics Tax</div>"));
    }

    #[test]
    fn footer_carries_data_authenticity_card() {
        let html = render_page(&Dashboard::build(Scenario::Optimized));
        let footer = &html[html.find("<footer>").unwrap()..];
        assert!(footer.contains("<p class=\"label\">Data Authenticity</p>"));
        assert!(footer.contains("Bala Bharath Kumar Pavuluri | M036-24"));
    }

    #[test]
    fn summary_card_colours_logistics_tax() {
        let on = render_page(&Dashboard::build(Scenario::Optimized));
        assert!(on.contains(&format!("color: {GREEN};\">10% (Minimized)")));

        let off = render_page(&Dashboard::build(Scenario::Fragmented));
        assert!(off.contains(&format!("color: {RED};\">42% (Critical)")));
    }

    #[test]
    fn panel_text_is_escaped() {
        let html = render_page(&Dashboard::build(Scenario::Optimized));
        assert!(html.contains("High Density &#39;Pet Corridor&#39; Detected"));
        assert!(!html.contains("Strategic intervention required"));
    }

    #[test]
    fn bar_chart_draws_four_bars_with_values() {
        let svg = render_bar_chart(&crate::scenario::chart_series());
        assert_eq!(svg.matches("<rect").count(), 4);
        for value in [151200, 18144, 422400, 202752] {
            assert!(svg.contains(&format!("data-value=\"{value}\"")));
        }
        assert!(svg.contains("Fragmented Model"));
        assert!(svg.contains("Cluster Model"));
    }

    #[test]
    fn donut_draws_one_arc_per_slice() {
        let dash = Dashboard::build(Scenario::Fragmented);
        let svg = render_donut(&dash.time_slices);
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("data-label=\"Service\" data-percent=\"45\""));
        assert!(svg.contains("data-label=\"Admin\" data-percent=\"10\""));
    }
}
