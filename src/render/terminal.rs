//! Coloured terminal rendering of the dashboard.

use colored::{ColoredString, Colorize};

use super::{
    ANALYST_NOTES, BAR_CHART_TITLE, CARD_TITLE, DATA_AUTHENTICITY, Dashboard, FOOTER, PANELS_TITLE, PIE_CHART_TITLE,
    PanelKind, SUBTITLE, TITLE, TOGGLE_LABEL, Tone,
};
use crate::scenario::ChartSeries;
use crate::utils::format::format_number;

/// Width of the longest bar in the text charts.
const BAR_COLUMNS: usize = 40;

/// Print the whole dashboard, top to bottom.
pub fn print_dashboard(dash: &Dashboard) {
    println!("{}", format!("🐾 {TITLE}").bold().cyan());
    println!("{}", SUBTITLE.dimmed());
    println!();

    let switch = if dash.scenario.is_optimized() {
        "[● ON ]".green().bold()
    } else {
        "[ OFF○]".red().bold()
    };
    println!(
        "  {switch} {TOGGLE_LABEL} {}",
        format!("({})", dash.scenario.label()).dimmed()
    );
    println!();

    // KPI tiles
    for tile in &dash.tiles {
        let delta = tile
            .delta
            .map(|d| format!(" {}", toned(d, tile.delta_tone)))
            .unwrap_or_default();
        println!("  {:<22} {:>8}{}", tile.title.bold(), tile.value, delta);
        println!("  {:<22} {}", "", tile.subtitle.dimmed());
        if let Some(help) = tile.help {
            println!("  {:<22} {}", "", help.dimmed());
        }
    }
    println!("{}", "-".repeat(60));

    print_comparison(&dash.chart);
    println!();

    println!("{}", PANELS_TITLE.bold().cyan());
    for panel in &dash.panels {
        let text = match panel.kind {
            PanelKind::Success => panel.text.green(),
            PanelKind::Info => panel.text.blue(),
            PanelKind::Warning => panel.text.red(),
        };
        println!("  {text}");
    }
    println!();

    println!("{}", PIE_CHART_TITLE.bold().cyan());
    for slice in &dash.time_slices {
        println!(
            "  {:<8} {:>3}% {}",
            slice.label,
            slice.percent,
            bar(u64::from(slice.percent), 100, BAR_COLUMNS / 2)
        );
    }
    println!();

    let card = &dash.card;
    println!("{}", CARD_TITLE.bold().yellow());
    println!("  {} {}", "Efficiency status:".dimmed(), card.efficiency_status.bold());
    println!(
        "  {} {}",
        "Logistics tax:    ".dimmed(),
        toned(card.logistics_tax, card.logistics_tax_tone).bold()
    );
    println!("  {} {}", "CLV Projection:   ".dimmed(), card.clv_projection.yellow());
    println!("  {} {}", "Unit CAC:         ".dimmed(), card.unit_cac.green());
    println!();

    println!("{} {}", "Data Validation:".bold(), FOOTER);
    for (heading, body) in ANALYST_NOTES {
        println!("  {} {}", format!("{heading}:").dimmed(), body.dimmed());
    }
    let (heading, body) = DATA_AUTHENTICITY;
    println!("  {} {}", heading.to_uppercase().dimmed(), body);
}

/// Print the revenue vs profit comparison as a grouped text bar chart.
pub fn print_comparison(chart: &ChartSeries) {
    println!("{}", BAR_CHART_TITLE.bold().cyan());
    let max = chart.max_value();

    for (ci, category) in chart.categories.iter().enumerate() {
        println!("  {}", category.bold());
        for (si, series) in chart.series.iter().enumerate() {
            let value = series.values[ci];
            let bars = bar(value, max, BAR_COLUMNS);
            let bars = if si == 0 { bars.dimmed() } else { bars.blue() };
            println!(
                "    {:<18} {:>9} {}",
                series.legend,
                format_number(value),
                bars
            );
        }
    }
}

fn toned(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Positive => text.green(),
        Tone::Negative => text.red(),
        Tone::Neutral => text.normal(),
    }
}

/// A horizontal bar of `width` columns at full scale.
fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (value as f64 / max as f64 * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}
