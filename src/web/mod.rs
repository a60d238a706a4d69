//! Embedded web dashboard for pawcare.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The server-rendered dashboard page, with the scenario toggle carried in
//!   the `?optimized=` query parameter
//! - JSON API endpoints for the view model, chart data and invariant health
//!
//! Launched via `pawcare serve` (default: `http://127.0.0.1:8501`).

mod api;

use anyhow::{Context, Result};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::analytics::logger::{self, RequestLogEntry};
use crate::config::PawcareConfig;
use crate::render::{Dashboard, html};
use crate::scenario::Scenario;

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the web dashboard server on `addr`.
///
/// Blocks the current thread. Handles requests sequentially (sufficient for
/// a local single-user dashboard). A failing handler produces a 500 response
/// and the server keeps running.
pub fn serve(config: &PawcareConfig, addr: &str, open: bool) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    println!("pawcare dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    if open {
        let _ = open_browser(&format!("http://{addr}"));
    }

    for request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let reply = dispatch(&method, &url, config).unwrap_or_else(|e| Reply::error(&e));
        let status = reply.status;
        let scenario = reply.scenario;

        let _ = request.respond(reply.into_response());

        // Brief access log
        println!(
            "{} {} {} {}",
            method,
            url,
            status,
            chrono::Local::now().format("%H:%M:%S")
        );
        logger::log_request(
            &config.logging,
            &RequestLogEntry::new(&method.to_string(), strip_query(&url), scenario, status),
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

/// A transport-independent response, converted to `tiny_http` at the edge.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// Scenario rendered, when the endpoint depends on one.
    pub scenario: Option<Scenario>,
}

impl Reply {
    fn html(body: String, scenario: Scenario) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_HTML,
            body: body.into_bytes(),
            scenario: Some(scenario),
        }
    }

    fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_JSON,
            body: body.into_bytes(),
            scenario: None,
        }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            ..Self::json(r#"{"error": "not found"}"#.to_string())
        }
    }

    fn error(err: &anyhow::Error) -> Self {
        let body = serde_json::json!({ "error": format!("{err:#}") }).to_string();
        Self {
            status: 500,
            ..Self::json(body)
        }
    }

    fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    fn into_response(self) -> Response<std::io::Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body).with_status_code(StatusCode(self.status));
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], self.content_type.as_bytes()) {
            response = response.with_header(header);
        }
        response
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
pub fn dispatch(method: &Method, url: &str, config: &PawcareConfig) -> Result<Reply> {
    let path = strip_query(url);
    let default = config.general.default_scenario;

    match (method, path) {
        // Page
        (&Method::Get, "/") | (&Method::Get, "/index.html") => {
            let scenario = requested_scenario(url, default);
            Ok(Reply::html(
                html::render_page(&Dashboard::build(scenario)),
                scenario,
            ))
        }

        // API
        (&Method::Get, "/api/view-model") => {
            let scenario = requested_scenario(url, default);
            Ok(api::get_view_model(scenario)?.with_scenario(scenario))
        }
        (&Method::Get, "/api/chart") => api::get_chart(),
        (&Method::Get, "/api/scenarios") => api::get_scenarios(),
        (&Method::Get, "/api/health") => api::get_health(config),

        // 404
        _ => Ok(Reply::not_found()),
    }
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

/// Read a query parameter's raw value.
fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    url.split_once('?')?.1.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == name).then_some(v)
    })
}

/// Scenario selected by `?optimized=`, or `default` when absent or unparseable.
fn requested_scenario(url: &str, default: Scenario) -> Scenario {
    Scenario::resolve(query_param(url, "optimized"), default)
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}
