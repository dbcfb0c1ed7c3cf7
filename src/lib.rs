//! PM2.5 / PM10 air-quality dashboard backend.
//!
//! Pipeline per request: fetch the sheet (through a TTL cache), clean the
//! rows into a sorted [`Dataset`], summarize, and hand a [`DashboardView`]
//! to the HTTP layer.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod normalize;
pub mod routes;
pub mod source;
pub mod summary;
pub mod table;

pub use config::Config;
pub use dashboard::DashboardView;
pub use error::{ErrorKind, SourceError};
pub use models::{Dataset, Measurement, Reading, ThresholdState, PM25_ALERT_THRESHOLD};
pub use normalize::Normalized;
pub use source::{CachedSource, SheetSource, TableSource};
pub use summary::DeviceAverage;
pub use table::Table;
