//! Scenario selection and the view model table.
//!
//! The dashboard only ever shows one of two precomputed business scenarios.
//! Both are compile-time constants held in a single two-entry table keyed by
//! [`Scenario`]. [`build_view_model`] is the only way the rest of the crate
//! obtains display values, and it is a pure lookup: no ambient state, no
//! presentation concerns, no failure modes.

pub mod chart;

use serde::{Deserialize, Serialize};

pub use chart::{ChartSeries, Series, TimeSlice, chart_series, time_slices};

// ---------------------------------------------------------------------------
// Scenario flag
// ---------------------------------------------------------------------------

/// The scenario toggle: cluster-optimized routing vs fragmented routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Cluster-optimized mode (the toggle's default position).
    #[default]
    Optimized,
    Fragmented,
}

impl Scenario {
    pub const ALL: [Self; 2] = [Self::Optimized, Self::Fragmented];

    pub fn is_optimized(self) -> bool {
        matches!(self, Self::Optimized)
    }

    /// The opposite toggle position.
    pub fn flipped(self) -> Self {
        match self {
            Self::Optimized => Self::Fragmented,
            Self::Fragmented => Self::Optimized,
        }
    }

    /// Human-facing name used in toggles and headings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Optimized => "Cluster-Optimized",
            Self::Fragmented => "Fragmented",
        }
    }

    /// Parse a user-supplied flag value.
    ///
    /// Accepts boolean spellings (`true`/`false`, `1`/`0`, `yes`/`no`,
    /// `on`/`off`) as well as scenario names. Returns `None` for anything
    /// else so callers can decide on the fallback.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" | "optimized" | "cluster" | "cluster-optimized" => {
                Some(Self::Optimized)
            }
            "0" | "false" | "no" | "off" | "fragmented" => Some(Self::Fragmented),
            _ => None,
        }
    }

    /// Resolve an optional, possibly malformed flag, falling back to `default`.
    pub fn resolve(raw: Option<&str>, default: Scenario) -> Self {
        raw.and_then(Self::parse).unwrap_or(default)
    }

    fn index(self) -> usize {
        match self {
            Self::Optimized => 0,
            Self::Fragmented => 1,
        }
    }

    /// The constant view model for this scenario.
    pub fn view_model(self) -> ViewModel {
        VIEW_MODELS[self.index()].clone()
    }
}

impl From<bool> for Scenario {
    fn from(optimized: bool) -> Self {
        if optimized {
            Self::Optimized
        } else {
            Self::Fragmented
        }
    }
}

impl From<Scenario> for bool {
    fn from(scenario: Scenario) -> Self {
        scenario.is_optimized()
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Optimized => write!(f, "optimized"),
            Self::Fragmented => write!(f, "fragmented"),
        }
    }
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Display-ready values for one scenario.
///
/// String fields are pre-formatted labels and are shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub revenue_per_van_hour: u32,
    pub daily_appointments: f64,
    pub average_order_value: u32,
    pub net_margin_percent: u32,
    pub monthly_revenue: u64,
    pub monthly_profit: u64,
    pub logistics_tax_label: &'static str,
    pub efficiency_status: &'static str,
    pub customer_lifetime_value_label: &'static str,
    pub customer_acquisition_cost_label: &'static str,
    pub revenue_per_van_hour_delta_label: &'static str,
    /// Percent of a working day spent on `[service, travel, admin]`.
    pub time_allocation: [u32; 3],
}

impl ViewModel {
    pub fn time_allocation_total(&self) -> u32 {
        self.time_allocation.iter().sum()
    }

    /// Monthly profit as implied by revenue and margin.
    ///
    /// `monthly_profit` is stored independently; this is what it would be if
    /// it were derived instead.
    pub fn implied_monthly_profit(&self) -> u64 {
        self.monthly_revenue * u64::from(self.net_margin_percent) / 100
    }

    /// Check the invariants every scenario constant must satisfy.
    ///
    /// Returns a description of each violation; empty means valid.
    pub fn violations(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let total = self.time_allocation_total();
        if total != 100 {
            problems.push(format!("time allocation sums to {total}, expected 100"));
        }

        let implied = self.implied_monthly_profit();
        if implied != self.monthly_profit {
            problems.push(format!(
                "monthly profit {} does not match revenue x margin ({implied})",
                self.monthly_profit
            ));
        }

        problems
    }
}

/// Both scenario constants, indexed by [`Scenario::index`].
static VIEW_MODELS: [ViewModel; 2] = [
    ViewModel {
        revenue_per_van_hour: 2800,
        daily_appointments: 8.0,
        average_order_value: 2400,
        net_margin_percent: 48,
        monthly_revenue: 422_400,
        monthly_profit: 202_752,
        logistics_tax_label: "10% (Minimized)",
        efficiency_status: "High Efficiency",
        customer_lifetime_value_label: "₹45,000",
        customer_acquisition_cost_label: "₹2,200",
        revenue_per_van_hour_delta_label: "133%",
        time_allocation: [85, 10, 5],
    },
    ViewModel {
        revenue_per_van_hour: 888,
        daily_appointments: 3.5,
        average_order_value: 1800,
        net_margin_percent: 12,
        monthly_revenue: 151_200,
        monthly_profit: 18_144,
        logistics_tax_label: "42% (Critical)",
        efficiency_status: "Operational Loss Risk",
        customer_lifetime_value_label: "₹22,000",
        customer_acquisition_cost_label: "₹4,800",
        revenue_per_van_hour_delta_label: "-42%",
        time_allocation: [45, 45, 10],
    },
];

/// Build the view model for a toggle position.
pub fn build_view_model(optimized: bool) -> ViewModel {
    Scenario::from(optimized).view_model()
}

// ---------------------------------------------------------------------------
// Invariant report
// ---------------------------------------------------------------------------

/// Result of validating one scenario constant.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioCheck {
    pub scenario: Scenario,
    pub problems: Vec<String>,
}

impl ScenarioCheck {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Validate every scenario constant plus the chart table built from them.
pub fn validate_all() -> Vec<ScenarioCheck> {
    let chart = chart_series();

    Scenario::ALL
        .iter()
        .map(|&scenario| {
            let vm = scenario.view_model();
            let mut problems = vm.violations();

            let expected = [vm.monthly_revenue, vm.monthly_profit];
            if chart.series_for(scenario).values != expected {
                problems.push("chart series does not mirror the view model".to_string());
            }

            ScenarioCheck { scenario, problems }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_conversion_is_lossless() {
        assert_eq!(Scenario::from(true), Scenario::Optimized);
        assert_eq!(Scenario::from(false), Scenario::Fragmented);
        assert!(bool::from(Scenario::Optimized));
        assert!(!bool::from(Scenario::Fragmented));
    }

    #[test]
    fn default_is_optimized() {
        assert_eq!(Scenario::default(), Scenario::Optimized);
    }

    #[test]
    fn parse_accepts_bool_and_name_spellings() {
        assert_eq!(Scenario::parse("true"), Some(Scenario::Optimized));
        assert_eq!(Scenario::parse("ON"), Some(Scenario::Optimized));
        assert_eq!(Scenario::parse("optimized"), Some(Scenario::Optimized));
        assert_eq!(Scenario::parse(" 0 "), Some(Scenario::Fragmented));
        assert_eq!(Scenario::parse("Fragmented"), Some(Scenario::Fragmented));
        assert_eq!(Scenario::parse("maybe"), None);
        assert_eq!(Scenario::parse(""), None);
    }

    #[test]
    fn resolve_falls_back_on_missing_or_malformed() {
        assert_eq!(
            Scenario::resolve(None, Scenario::Optimized),
            Scenario::Optimized
        );
        assert_eq!(
            Scenario::resolve(Some("???"), Scenario::Optimized),
            Scenario::Optimized
        );
        assert_eq!(
            Scenario::resolve(Some("false"), Scenario::Optimized),
            Scenario::Fragmented
        );
    }

    #[test]
    fn flipped_toggles_back_and_forth() {
        assert_eq!(Scenario::Optimized.flipped(), Scenario::Fragmented);
        assert_eq!(Scenario::Optimized.flipped().flipped(), Scenario::Optimized);
    }

    #[test]
    fn display_matches_serde_names() {
        for scenario in Scenario::ALL {
            let json = serde_json::to_string(&scenario).unwrap();
            assert_eq!(json, format!("\"{scenario}\""));
        }
    }

    #[test]
    fn both_constants_satisfy_invariants() {
        for scenario in Scenario::ALL {
            assert!(
                scenario.view_model().violations().is_empty(),
                "{scenario} violates an invariant"
            );
        }
    }

    #[test]
    fn violations_reports_bad_allocation_and_profit() {
        let mut vm = build_view_model(true);
        vm.time_allocation = [80, 10, 5];
        vm.monthly_profit = 1;
        let problems = vm.violations();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("95"));
    }

    #[test]
    fn validate_all_passes() {
        let report = validate_all();
        assert_eq!(report.len(), 2);
        assert!(report.iter().all(ScenarioCheck::is_ok));
    }
}
