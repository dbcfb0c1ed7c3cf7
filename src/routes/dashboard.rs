// src/routes/dashboard.rs
//! `GET /api/dashboard`: fetch, clean, summarize, and return the view.
//!
//! The whole pipeline reruns per request. A fetch failure becomes an error
//! view with HTTP 502; the server keeps running and the next request tries
//! again.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use tracing::{debug, error, info, warn};

use crate::{DashboardView, TableSource};

// ---

pub fn router<S: TableSource>() -> Router<Arc<S>> {
    // ---
    Router::new().route("/api/dashboard", get(handler::<S>))
}

async fn handler<S: TableSource>(State(source): State<Arc<S>>) -> impl IntoResponse {
    // ---
    info!("GET /api/dashboard - Starting pipeline");

    debug!("GET /api/dashboard - Step 1: fetch");
    let table = match source.fetch().await {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to fetch sheet data: {}", e);
            return (StatusCode::BAD_GATEWAY, Json(DashboardView::from_error(&e)));
        }
    };

    debug!("GET /api/dashboard - Step 2: normalize and summarize");
    let view = DashboardView::build(&table);

    let status = match &view {
        DashboardView::Ok { raw, dropped_rows, .. } => {
            info!(
                "Pipeline complete, {} readings ({} dropped)",
                raw.len(),
                dropped_rows
            );
            StatusCode::OK
        }
        DashboardView::NoData { dropped_rows, .. } => {
            warn!("Pipeline complete, no usable readings ({} dropped)", dropped_rows);
            StatusCode::OK
        }
        DashboardView::Error { details, .. } => {
            error!("Sheet data rejected: {}", details);
            StatusCode::BAD_GATEWAY
        }
    };

    (status, Json(view))
}
