//! Fetch boundary: where tables come from.
//!
//! [`SheetSource`] downloads a CSV over HTTP; [`CachedSource`] wraps any
//! [`TableSource`] with a fixed freshness window so repeated dashboard loads
//! inside the window reuse the last table.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{SourceError, Table};

// ---

/// Anything that can produce the current raw table.
pub trait TableSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<Arc<Table>, SourceError>> + Send;
}

/// Turn a spreadsheet edit link into its CSV export link.
///
/// `https://docs.google.com/spreadsheets/d/<id>/edit?gid=7#gid=7` becomes
/// `https://docs.google.com/spreadsheets/d/<id>/export?format=csv&gid=7`.
/// Any other URL is returned unchanged.
pub fn csv_export_url(url: &str) -> String {
    // ---
    const MARKER: &str = "docs.google.com/spreadsheets/d/";

    let Some(start) = url.find(MARKER) else {
        return url.to_string();
    };
    let id_start = start + MARKER.len();
    let rest = &url[id_start..];
    let id_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let id = &rest[..id_len];

    if id.is_empty() || rest[id_len..].contains("export") {
        return url.to_string();
    }

    let gid = url
        .rfind("gid=")
        .map(|pos| {
            url[pos + 4..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect::<String>()
        })
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| "0".to_string());

    format!("{}{}/export?format=csv&gid={}", &url[..id_start], id, gid)
}

/// HTTP-backed source reading a CSV document.
#[derive(Debug, Clone)]
pub struct SheetSource {
    // ---
    client: reqwest::Client,
    url: String,
}

impl SheetSource {
    // ---
    pub fn new(sheet_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        // ---
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let url = csv_export_url(sheet_url);
        debug!("Sheet export URL: {}", url);

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TableSource for SheetSource {
    async fn fetch(&self) -> Result<Arc<Table>, SourceError> {
        // ---
        debug!("Fetching table from: {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response.bytes().await?;
        let table = Table::from_csv(body.as_ref())?;

        info!(
            "Fetched {} rows ({} columns) from data source",
            table.len(),
            table.columns.len()
        );
        Ok(Arc::new(table))
    }
}

/// Read-through cache with a fixed time-to-live.
///
/// Failures are not cached; the next call fetches again.
pub struct CachedSource<S> {
    // ---
    inner: S,
    ttl: Duration,
    slot: Mutex<Option<(Instant, Arc<Table>)>>,
}

impl<S: TableSource> CachedSource<S> {
    // ---
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<S: TableSource> TableSource for CachedSource<S> {
    async fn fetch(&self) -> Result<Arc<Table>, SourceError> {
        // ---
        // Held across the fetch so concurrent misses share one download.
        let mut slot = self.slot.lock().await;

        if let Some((fetched_at, table)) = slot.as_ref() {
            if fetched_at.elapsed() < self.ttl {
                debug!("Cache hit (age {:?})", fetched_at.elapsed());
                return Ok(Arc::clone(table));
            }
        }

        debug!("Cache miss, fetching");
        let table = self.inner.fetch().await?;
        *slot = Some((Instant::now(), Arc::clone(&table)));
        Ok(table)
    }
}
