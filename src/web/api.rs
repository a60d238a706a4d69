//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a JSON [`Reply`].

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analytics::logger;
use crate::config::{self, PawcareConfig};
use crate::scenario::{self, ChartSeries, Scenario, ScenarioCheck, ViewModel};

use super::Reply;

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

/// View model API response.
#[derive(Serialize)]
struct ViewModelResponse {
    scenario: Scenario,
    optimized: bool,
    view_model: ViewModel,
}

/// Both scenarios, keyed by name.
#[derive(Serialize)]
struct ScenariosResponse {
    optimized: ViewModel,
    fragmented: ViewModel,
}

/// Health API response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    default_scenario: Scenario,
    scenarios: Vec<ScenarioCheck>,
    config_exists: bool,
    log_enabled: bool,
    log_exists: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success reply.
fn json_response<T: Serialize>(data: &T) -> Result<Reply> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Reply::json(body))
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/view-model?optimized=<flag>`: the selected scenario's values.
pub fn get_view_model(scenario: Scenario) -> Result<Reply> {
    json_response(&ViewModelResponse {
        scenario,
        optimized: scenario.is_optimized(),
        view_model: scenario.view_model(),
    })
}

/// `GET /api/chart`: the revenue vs profit comparison (scenario-independent).
pub fn get_chart() -> Result<Reply> {
    let chart: ChartSeries = scenario::chart_series();
    json_response(&chart)
}

/// `GET /api/scenarios`: both view models.
pub fn get_scenarios() -> Result<Reply> {
    json_response(&ScenariosResponse {
        optimized: Scenario::Optimized.view_model(),
        fragmented: Scenario::Fragmented.view_model(),
    })
}

/// `GET /api/health`: scenario invariants plus config/log status.
pub fn get_health(cfg: &PawcareConfig) -> Result<Reply> {
    let scenarios = scenario::validate_all();
    let status = if scenarios.iter().all(ScenarioCheck::is_ok) {
        "ok"
    } else {
        "degraded"
    };

    let config_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let log_exists = logger::request_log_path(&cfg.logging)
        .map(|p| p.exists())
        .unwrap_or(false);

    json_response(&HealthResponse {
        status,
        default_scenario: cfg.general.default_scenario,
        scenarios,
        config_exists,
        log_enabled: cfg.logging.enabled,
        log_exists,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
