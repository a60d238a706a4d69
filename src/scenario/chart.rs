//! Chart data derived from the scenario table.
//!
//! The revenue/profit comparison always shows both scenarios side by side,
//! so it takes no scenario argument. The time utilization slices follow the
//! selected view model.

use serde::Serialize;

use super::{Scenario, ViewModel};

/// Category labels of the grouped bar chart, in display order.
pub const CATEGORIES: [&str; 2] = ["Revenue", "Profit"];

/// Slice labels of the time utilization chart, in display order.
pub const TIME_LABELS: [&str; 3] = ["Service", "Travel", "Admin"];

/// One bar series: a value per entry of [`CATEGORIES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    pub name: &'static str,
    /// Legend text.
    pub legend: &'static str,
    pub scenario: Scenario,
    pub values: [u64; 2],
}

/// The static revenue vs profit comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub categories: [&'static str; 2],
    /// `[fragmented, optimized]`, the order bars are drawn in.
    pub series: [Series; 2],
}

impl ChartSeries {
    pub fn series_for(&self, scenario: Scenario) -> &Series {
        match scenario {
            Scenario::Fragmented => &self.series[0],
            Scenario::Optimized => &self.series[1],
        }
    }

    /// Largest value across all series; the bar chart's y-axis ceiling.
    pub fn max_value(&self) -> u64 {
        self.series
            .iter()
            .flat_map(|s| s.values)
            .max()
            .unwrap_or(0)
    }
}

/// Build the comparison table from both scenario constants.
pub fn chart_series() -> ChartSeries {
    let series = |scenario: Scenario, name: &'static str, legend: &'static str| {
        let vm = scenario.view_model();
        Series {
            name,
            legend,
            scenario,
            values: [vm.monthly_revenue, vm.monthly_profit],
        }
    };

    ChartSeries {
        categories: CATEGORIES,
        series: [
            series(Scenario::Fragmented, "Fragmented", "Fragmented Model"),
            series(Scenario::Optimized, "Optimized", "Cluster Model"),
        ],
    }
}

/// A labelled slice of the time utilization chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlice {
    pub label: &'static str,
    pub percent: u32,
}

pub fn time_slices(vm: &ViewModel) -> [TimeSlice; 3] {
    let [service, travel, admin] = vm.time_allocation;
    [
        TimeSlice {
            label: TIME_LABELS[0],
            percent: service,
        },
        TimeSlice {
            label: TIME_LABELS[1],
            percent: travel,
        },
        TimeSlice {
            label: TIME_LABELS[2],
            percent: admin,
        },
    ]
}
