//! Scenario table tests.
//!
//! Checks the exact constants behind both toggle positions, the invariants
//! they must satisfy, and that the comparison chart never follows the toggle.

use pawcare::scenario::{Scenario, ViewModel, build_view_model, chart_series, time_slices};

fn optimized_literal() -> ViewModel {
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
    }
}

fn fragmented_literal() -> ViewModel {
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
    }
}

// ---------------------------------------------------------------------------
// Exact records
// ---------------------------------------------------------------------------

#[test]
fn optimized_record_is_exact() {
    assert_eq!(build_view_model(true), optimized_literal());
}

#[test]
fn fragmented_record_is_exact() {
    assert_eq!(build_view_model(false), fragmented_literal());
}

#[test]
fn optimized_headline_values() {
    let vm = build_view_model(true);
    assert_eq!(vm.revenue_per_van_hour, 2800);
    assert_eq!(vm.daily_appointments, 8.0);
    assert_eq!(vm.efficiency_status, "High Efficiency");
}

#[test]
fn fragmented_headline_values() {
    let vm = build_view_model(false);
    assert_eq!(vm.revenue_per_van_hour, 888);
    assert_eq!(vm.logistics_tax_label, "42% (Critical)");
    assert_eq!(vm.time_allocation, [45, 45, 10]);
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

#[test]
fn time_allocation_sums_to_100() {
    assert_eq!(build_view_model(true).time_allocation_total(), 100);
    assert_eq!(build_view_model(false).time_allocation_total(), 100);
}

#[test]
fn stored_profit_matches_revenue_times_margin() {
    for flag in [true, false] {
        let vm = build_view_model(flag);
        assert_eq!(vm.implied_monthly_profit(), vm.monthly_profit);
    }
}

#[test]
fn builder_is_idempotent() {
    assert_eq!(build_view_model(true), build_view_model(true));
    assert_eq!(build_view_model(false), build_view_model(false));
}

#[test]
fn toggle_round_trip_reproduces_first_record() {
    let first = build_view_model(true);
    let _ = build_view_model(false);
    let again = build_view_model(true);
    assert_eq!(first, again);
}

#[test]
fn builder_agrees_with_scenario_lookup() {
    for scenario in Scenario::ALL {
        assert_eq!(build_view_model(scenario.into()), scenario.view_model());
    }
}

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

#[test]
fn chart_series_mirrors_view_models() {
    let chart = chart_series();
    let fragmented = build_view_model(false);
    let optimized = build_view_model(true);

    assert_eq!(chart.categories, ["Revenue", "Profit"]);
    assert_eq!(
        chart.series_for(Scenario::Fragmented).values,
        [fragmented.monthly_revenue, fragmented.monthly_profit]
    );
    assert_eq!(
        chart.series_for(Scenario::Optimized).values,
        [optimized.monthly_revenue, optimized.monthly_profit]
    );
}

#[test]
fn toggling_does_not_change_chart() {
    let before = chart_series();
    let _ = build_view_model(false);
    let _ = build_view_model(true);
    assert_eq!(before, chart_series());
}

#[test]
fn time_slices_follow_the_toggle() {
    let on: Vec<_> = time_slices(&build_view_model(true))
        .iter()
        .map(|s| s.percent)
        .collect();
    let off: Vec<_> = time_slices(&build_view_model(false))
        .iter()
        .map(|s| s.percent)
        .collect();
    assert_eq!(on, [85, 10, 5]);
    assert_eq!(off, [45, 45, 10]);
}
