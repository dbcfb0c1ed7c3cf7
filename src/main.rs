//! Application entry point for the `pm-monitor` backend service.
//!
//! Startup sequence:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Building the sheet source behind its freshness cache
//! - Mounting all API routes via the `routes` gateway
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `SHEET_URL` (**required**) – spreadsheet link or CSV URL
//! - `SHEET_TTL_SECS` (optional) – cache freshness window (default: 5)
//! - `AXUM_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `AXUM_SPAN_EVENTS` (optional) – span event mode for tracing
use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use pm_monitor::{config, routes, CachedSource, SheetSource};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let sheet = SheetSource::new(&cfg.sheet_url, cfg.fetch_timeout)
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
    tracing::info!("Reading sheet from: {}", sheet.url());

    let source = Arc::new(CachedSource::new(sheet, cfg.sheet_ttl));
    tracing::info!("Sheet cache freshness window: {:?}", source.ttl());
    let app: Router = routes::router(source);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.http_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// - Color output: `FORCE_COLOR=1|true|yes` forces on, `0|false|no` forces
///   off, anything else auto-detects a TTY
/// - Span events from `AXUM_SPAN_EVENTS`: `"full"`, `"enter_exit"`, or
///   CLOSE only by default
/// - Level from `RUST_LOG`, else `AXUM_LOG_LEVEL`, else `debug`
///
/// Call once, before any tracing macro.
fn init_tracing() {
    // ---
    let span_events = match env::var("AXUM_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("AXUM_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},hyper=info,reqwest=info"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
