//! CLI command implementations for pawcare.
//!
//! Provides subcommand handlers for:
//! - `pawcare serve`: run the web dashboard
//! - `pawcare show --scenario S`: render the dashboard in the terminal
//! - `pawcare compare`: the revenue vs profit comparison
//! - `pawcare check`: scenario invariants, config and request log status
//! - `pawcare config show|init|set|reset`: configuration management

use anyhow::Result;
use colored::Colorize;

use crate::analytics::logger;
use crate::config;
use crate::render::{Dashboard, terminal};
use crate::scenario::{self, ChartSeries, Scenario, ViewModel};
use crate::utils::format::format_quantity;
use crate::web;

/// Output format for data commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// pawcare serve
// ---------------------------------------------------------------------------

/// Run the web dashboard until interrupted.
pub fn run_serve(addr: Option<String>, no_open: bool) -> Result<()> {
    let cfg = config::load();
    let addr = addr.unwrap_or_else(|| cfg.web.addr.clone());
    web::serve(&cfg, &addr, cfg.web.open_browser && !no_open)
}

// ---------------------------------------------------------------------------
// pawcare show
// ---------------------------------------------------------------------------

/// Render the dashboard for one scenario.
///
/// A missing or unrecognised `--scenario` falls back to the configured
/// default.
pub fn run_show(scenario_arg: Option<&str>, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let scenario = Scenario::resolve(scenario_arg, cfg.general.default_scenario);

    if let Some(raw) = scenario_arg
        && Scenario::parse(raw).is_none()
    {
        eprintln!(
            "{}",
            format!("Unknown scenario '{raw}', showing {scenario}.").yellow()
        );
    }

    let dash = Dashboard::build(scenario);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dash)?),
        OutputFormat::Csv => print_view_model_csv(&dash.view_model),
        OutputFormat::Table => terminal::print_dashboard(&dash),
    }

    Ok(())
}

fn print_view_model_csv(vm: &ViewModel) {
    println!("field,value");
    for (field, value) in view_model_rows(vm) {
        println!("{field},{}", csv_escape(&value));
    }
}

/// Flatten a view model into `(field, value)` rows.
fn view_model_rows(vm: &ViewModel) -> Vec<(&'static str, String)> {
    let [service, travel, admin] = vm.time_allocation;
    vec![
        ("revenue_per_van_hour", vm.revenue_per_van_hour.to_string()),
        ("daily_appointments", format_quantity(vm.daily_appointments)),
        ("average_order_value", vm.average_order_value.to_string()),
        ("net_margin_percent", vm.net_margin_percent.to_string()),
        ("monthly_revenue", vm.monthly_revenue.to_string()),
        ("monthly_profit", vm.monthly_profit.to_string()),
        ("logistics_tax_label", vm.logistics_tax_label.to_string()),
        ("efficiency_status", vm.efficiency_status.to_string()),
        (
            "customer_lifetime_value_label",
            vm.customer_lifetime_value_label.to_string(),
        ),
        (
            "customer_acquisition_cost_label",
            vm.customer_acquisition_cost_label.to_string(),
        ),
        (
            "revenue_per_van_hour_delta_label",
            vm.revenue_per_van_hour_delta_label.to_string(),
        ),
        ("time_service_pct", service.to_string()),
        ("time_travel_pct", travel.to_string()),
        ("time_admin_pct", admin.to_string()),
    ]
}

/// Quote a CSV field when it contains a separator or quote.
fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// pawcare compare
// ---------------------------------------------------------------------------

/// Show the scenario-independent revenue vs profit comparison.
pub fn run_compare(format: OutputFormat) -> Result<()> {
    let chart = scenario::chart_series();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&chart)?),
        OutputFormat::Csv => print_chart_csv(&chart),
        OutputFormat::Table => terminal::print_comparison(&chart),
    }

    Ok(())
}

fn print_chart_csv(chart: &ChartSeries) {
    let names: Vec<_> = chart.series.iter().map(|s| s.name).collect();
    println!("category,{}", names.join(","));
    for (ci, category) in chart.categories.iter().enumerate() {
        let values: Vec<_> = chart
            .series
            .iter()
            .map(|s| s.values[ci].to_string())
            .collect();
        println!("{category},{}", values.join(","));
    }
}

// ---------------------------------------------------------------------------
// pawcare check
// ---------------------------------------------------------------------------

/// Validate the scenario table and report config and log status.
pub fn run_check() -> Result<()> {
    println!("{}", "Pawcare Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    // 0. Scenario invariants
    let report = scenario::validate_all();
    for check in &report {
        let detail = if check.is_ok() {
            "allocation sums to 100, profit matches margin, chart mirrors values".to_string()
        } else {
            check.problems.join("; ")
        };
        print_health_item(
            &format!("Scenario: {}", check.scenario),
            check.is_ok(),
            &detail,
        );
    }

    // 1. Config files
    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.pawcare/config.toml found"
        } else {
            "not found (run `pawcare config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".pawcare.toml found"
        } else {
            "none (optional)"
        },
    );
    print_health_item(
        "Default scenario",
        true,
        &cfg.general.default_scenario.to_string(),
    );

    // 2. Request log
    let log_path = logger::request_log_path(&cfg.logging);
    let log_exists = log_path.as_ref().is_some_and(|p| p.exists());
    let detail = match (&log_path, log_exists) {
        (Some(path), true) => {
            let entries = logger::read_all_entries(path);
            let counts = logger::scenario_counts(&entries);
            format!(
                "{} entries ({} optimized, {} fragmented, {} api)",
                entries.len(),
                counts.optimized,
                counts.fragmented,
                counts.other
            )
        }
        _ if !cfg.logging.enabled => "disabled".to_string(),
        _ => "no log file yet".to_string(),
    };
    print_health_item("Request log", log_exists, &detail);

    if report.iter().any(|c| !c.is_ok()) {
        anyhow::bail!("scenario table failed validation");
    }

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// pawcare config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective Pawcare Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if global_exists {
        println!("  {} {}", "✓".green(), "~/.pawcare/config.toml".dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            "~/.pawcare/config.toml (not found)".dimmed()
        );
    }
    if project_exists {
        println!("  {} {}", "✓".green(), ".pawcare.toml".dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), ".pawcare.toml (not found)".dimmed());
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "PAWCARE_* environment variables".dimmed()
    );

    Ok(())
}

/// Initialize a default config file at `~/.pawcare/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn view_model_rows_cover_every_field() {
        let rows = view_model_rows(&scenario::build_view_model(false));
        assert_eq!(rows.len(), 14);
        assert!(rows.contains(&("daily_appointments", "3.5".to_string())));
        assert!(rows.contains(&("time_travel_pct", "45".to_string())));
    }

    #[test]
    fn csv_escape_quotes_separators() {
        assert_eq!(csv_escape("₹45,000"), "\"₹45,000\"");
        assert_eq!(csv_escape("High Efficiency"), "High Efficiency");
        assert_eq!(csv_escape("a\"b"), "\"a\"\"b\"");
    }
}
