//! Page model and renderers.
//!
//! [`Dashboard::build`] gathers everything one render pass needs from a
//! single scenario: the view model, the four KPI tiles, both charts, the
//! narrative panels and the summary card. Each piece is produced by an
//! independent function over the same view model. The renderers in
//! [`html`] and [`terminal`] only interpolate this model; colours and
//! markup live there and nowhere else.

pub mod html;
pub mod terminal;

use serde::Serialize;

use crate::scenario::{ChartSeries, Scenario, TimeSlice, ViewModel, chart_series, time_slices};
use crate::utils::format::{format_quantity, rupees};

pub const TITLE: &str = "Pawcare Strategic Optimizer";
pub const SUBTITLE: &str = "Pricing & Revenue Intelligence Dashboard v2.4";
pub const TOGGLE_LABEL: &str = "Cluster-Optimized Mode";
pub const BAR_CHART_TITLE: &str = "Monthly Revenue vs Profit Comparison";
pub const PANELS_TITLE: &str = "Geospatial Cluster Analysis";
pub const PIE_CHART_TITLE: &str = "Time Utilization";
pub const CARD_TITLE: &str = "Strategic Validation";

/// Attribution card next to the footer, `(heading, body)`.
pub const DATA_AUTHENTICITY: (&str, &str) = (
    "Data Authenticity",
    "Bala Bharath Kumar Pavuluri | M036-24",
);

pub const FOOTER: &str = "Report generated for Bala Bharath Kumar Pavuluri (M036-24) | Entrepreneurial Marketing Group 7";

/// Standing notes shown under the footer, `(heading, body)`.
pub const ANALYST_NOTES: [(&str, &str); 2] = [
    (
        "Analyst Note",
        "Cluster optimization assumes the 20/2 rule (20 clients per 2km radius). Failure to hit this density results in a return to fragmented margins.",
    ),
    (
        "Target Secured",
        "Current HSR Layout cluster has reached 14 anchor clients.",
    ),
];

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// Semantic colouring hint. Renderers map it to concrete colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Tone {
    fn of(scenario: Scenario) -> Self {
        if scenario.is_optimized() {
            Self::Positive
        } else {
            Self::Negative
        }
    }

    /// Tone of a signed delta label such as `"-42%"`.
    fn of_delta(label: &str) -> Self {
        if label.starts_with('-') {
            Self::Negative
        } else {
            Self::Positive
        }
    }
}

/// A single-value KPI tile with an optional delta badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiTile {
    pub title: &'static str,
    pub value: String,
    /// Caption under the value.
    pub subtitle: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<&'static str>,
    pub delta_tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Success,
    Info,
    Warning,
}

/// A narrative callout in the cluster analysis section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub kind: PanelKind,
    pub text: &'static str,
}

/// The "Strategic Validation" card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub efficiency_status: &'static str,
    pub logistics_tax: &'static str,
    pub logistics_tax_tone: Tone,
    pub clv_projection: &'static str,
    pub unit_cac: &'static str,
}

pub fn kpi_tiles(scenario: Scenario, vm: &ViewModel) -> [KpiTile; 4] {
    let optimized = scenario.is_optimized();
    [
        KpiTile {
            title: "Revenue / Van-Hour",
            value: rupees(vm.revenue_per_van_hour),
            subtitle: "Efficiency Target: ₹2,500+",
            delta: Some(vm.revenue_per_van_hour_delta_label),
            delta_tone: Tone::of_delta(vm.revenue_per_van_hour_delta_label),
            help: None,
        },
        KpiTile {
            title: "Daily Appointments",
            value: format_quantity(vm.daily_appointments),
            subtitle: "Capacity utilization",
            delta: None,
            delta_tone: Tone::Neutral,
            help: Some("Target is 7-8 for profitability"),
        },
        KpiTile {
            title: "Net Profit Margin",
            value: format!("{}%", vm.net_margin_percent),
            subtitle: "Post OPEX & Logistics Tax",
            delta: Some(if optimized { "Healthy" } else { "Critical" }),
            delta_tone: Tone::of(scenario),
            help: None,
        },
        KpiTile {
            title: "Avg Order Value",
            value: rupees(vm.average_order_value),
            subtitle: "Gateway conversion rate",
            delta: Some(if optimized {
                "Med-Upsell Active"
            } else {
                "Basic Only"
            }),
            delta_tone: Tone::of(scenario),
            help: None,
        },
    ]
}

pub fn narrative_panels(scenario: Scenario) -> Vec<Panel> {
    match scenario {
        Scenario::Optimized => vec![
            Panel {
                kind: PanelKind::Success,
                text: "✅ High Density 'Pet Corridor' Detected: 8 appointments secured in HSR Layout Cluster.",
            },
            Panel {
                kind: PanelKind::Info,
                text: "Logistics Tax: 10% minimized via proximity-based routing.",
            },
        ],
        Scenario::Fragmented => vec![Panel {
            kind: PanelKind::Warning,
            text: "⚠️ Logistics Tax: 42% Travel Overhead. Strategic intervention required to build density.",
        }],
    }
}

pub fn summary_card(scenario: Scenario, vm: &ViewModel) -> SummaryCard {
    SummaryCard {
        efficiency_status: vm.efficiency_status,
        logistics_tax: vm.logistics_tax_label,
        logistics_tax_tone: Tone::of(scenario),
        clv_projection: vm.customer_lifetime_value_label,
        unit_cac: vm.customer_acquisition_cost_label,
    }
}

// ---------------------------------------------------------------------------
// Page model
// ---------------------------------------------------------------------------

/// Everything one render pass displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub scenario: Scenario,
    pub view_model: ViewModel,
    pub tiles: [KpiTile; 4],
    pub chart: ChartSeries,
    pub time_slices: [TimeSlice; 3],
    pub panels: Vec<Panel>,
    pub card: SummaryCard,
}

impl Dashboard {
    pub fn build(scenario: Scenario) -> Self {
        let view_model = scenario.view_model();
        Self {
            scenario,
            tiles: kpi_tiles(scenario, &view_model),
            chart: chart_series(),
            time_slices: time_slices(&view_model),
            panels: narrative_panels(scenario),
            card: summary_card(scenario, &view_model),
            view_model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimized_tiles_show_formatted_values() {
        let dash = Dashboard::build(Scenario::Optimized);
        let values: Vec<_> = dash.tiles.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(values, ["₹2800", "8", "48%", "₹2400"]);
        assert_eq!(dash.tiles[0].delta, Some("133%"));
        assert_eq!(dash.tiles[0].delta_tone, Tone::Positive);
        assert_eq!(dash.tiles[2].delta, Some("Healthy"));
    }

    #[test]
    fn fragmented_tiles_show_negative_deltas() {
        let dash = Dashboard::build(Scenario::Fragmented);
        assert_eq!(dash.tiles[1].value, "3.5");
        assert_eq!(dash.tiles[0].delta_tone, Tone::Negative);
        assert_eq!(dash.tiles[3].delta, Some("Basic Only"));
        assert_eq!(dash.tiles[1].help, Some("Target is 7-8 for profitability"));
    }

    #[test]
    fn tiles_carry_fixed_subtitles() {
        for scenario in Scenario::ALL {
            let subtitles: Vec<_> = Dashboard::build(scenario)
                .tiles
                .iter()
                .map(|t| t.subtitle)
                .collect();
            assert_eq!(
                subtitles,
                [
                    "Efficiency Target: ₹2,500+",
                    "Capacity utilization",
                    "Post OPEX & Logistics Tax",
                    "Gateway conversion rate",
                ]
            );
        }
    }

    #[test]
    fn panels_depend_on_scenario() {
        let optimized = narrative_panels(Scenario::Optimized);
        assert_eq!(optimized.len(), 2);
        assert_eq!(optimized[0].kind, PanelKind::Success);
        assert_eq!(optimized[1].kind, PanelKind::Info);

        let fragmented = narrative_panels(Scenario::Fragmented);
        assert_eq!(fragmented.len(), 1);
        assert_eq!(fragmented[0].kind, PanelKind::Warning);
        assert!(fragmented[0].text.contains("42% Travel Overhead"));
    }

    #[test]
    fn summary_card_colours_tax_by_scenario() {
        let card = Dashboard::build(Scenario::Fragmented).card;
        assert_eq!(card.logistics_tax, "42% (Critical)");
        assert_eq!(card.logistics_tax_tone, Tone::Negative);
        assert_eq!(card.unit_cac, "₹4,800");
    }

    #[test]
    fn chart_is_identical_across_scenarios() {
        assert_eq!(
            Dashboard::build(Scenario::Optimized).chart,
            Dashboard::build(Scenario::Fragmented).chart
        );
    }
}
