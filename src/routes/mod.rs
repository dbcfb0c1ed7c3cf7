use std::sync::Arc;

use axum::Router;

use crate::TableSource;

mod dashboard;
mod health;

// ---

pub fn router<S: TableSource>(source: Arc<S>) -> Router {
    // ---
    dashboard::router::<S>()
        .merge(health::router::<Arc<S>>())
        .with_state(source)
}
