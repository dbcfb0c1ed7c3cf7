//! Dashboard view model: everything the presenter draws, in one value.
//!
//! Three outcomes per request: a populated view, a "no data" notice when
//! cleaning left nothing, or an error panel with remediation hints.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::summary::{average_by_device, latest_reading, threshold_state, DeviceAverage};
use crate::{normalize, ErrorKind, Measurement, Reading, SourceError, Table, ThresholdState};

// ---

pub const NO_DATA_MESSAGE: &str = "No readings found in the sheet; check the spreadsheet contents";

pub const REMEDIATION: &[&str] = &[
    "Check that SHEET_URL points at the right spreadsheet",
    "Check that the sheet is shared as 'Anyone with the link' with 'Viewer' access",
    "Check that the sheet has the columns: date, real_time, device, pm2.5, pm10",
];

/// Summary cards for the latest reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    // ---
    pub device: String,
    #[serde(rename = "pm2.5")]
    pub pm25: Measurement,
    pub pm10: Measurement,
    /// Raw time-of-day text, shown as "last updated".
    pub real_time: String,
    pub timestamp: NaiveDateTime,
    pub threshold: ThresholdState,
}

impl From<&Reading> for Snapshot {
    fn from(r: &Reading) -> Self {
        Self {
            device: r.device.clone(),
            pm25: r.pm25,
            pm10: r.pm10,
            real_time: r.real_time.clone(),
            timestamp: r.timestamp,
            threshold: threshold_state(r.pm25),
        }
    }
}

/// One point of the PM2.5 / PM10 time-series chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: NaiveDateTime,
    #[serde(rename = "pm2.5")]
    pub pm25: Measurement,
    pub pm10: Measurement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    Ok {
        snapshot: Snapshot,
        series: Vec<SeriesPoint>,
        device_averages: Vec<DeviceAverage>,
        /// Newest first.
        raw: Vec<Reading>,
        dropped_rows: usize,
    },
    NoData {
        message: &'static str,
        dropped_rows: usize,
    },
    Error {
        message: &'static str,
        details: String,
        kind: ErrorKind,
        remediation: &'static [&'static str],
    },
}

impl DashboardView {
    // ---
    /// Run normalize + summarize over a fetched table.
    pub fn build(table: &Table) -> Self {
        // ---
        let normalized = match normalize::normalize(table) {
            Ok(n) => n,
            Err(e) => return Self::from_error(&e),
        };
        let dataset = &normalized.dataset;

        let Some(latest) = latest_reading(dataset) else {
            return DashboardView::NoData {
                message: NO_DATA_MESSAGE,
                dropped_rows: normalized.dropped,
            };
        };

        DashboardView::Ok {
            snapshot: Snapshot::from(latest),
            series: dataset
                .readings()
                .iter()
                .map(|r| SeriesPoint {
                    timestamp: r.timestamp,
                    pm25: r.pm25,
                    pm10: r.pm10,
                })
                .collect(),
            device_averages: average_by_device(dataset),
            raw: dataset.newest_first().cloned().collect(),
            dropped_rows: normalized.dropped,
        }
    }

    pub fn from_error(err: &SourceError) -> Self {
        DashboardView::Error {
            message: "Failed to load data from the sheet",
            details: err.to_string(),
            kind: err.kind(),
            remediation: REMEDIATION,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DashboardView::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn create_test_table(rows: &[[&str; 5]]) -> Table {
        // ---
        Table::new(
            ["date", "real_time", "device", "pm2.5", "pm10"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_populated_view() {
        // ---
        let table = create_test_table(&[
            ["23/11/2025", "0:24:37", "D1", "55", "40"],
            ["22/11/2025", "23:00:00", "D2", "12", "20"],
            ["not-a-date", "x", "D2", "10", "20"],
        ]);

        let DashboardView::Ok {
            snapshot,
            series,
            device_averages,
            raw,
            dropped_rows,
        } = DashboardView::build(&table)
        else {
            panic!("expected populated view");
        };

        assert_eq!(snapshot.device, "D1");
        assert_eq!(snapshot.real_time, "0:24:37");
        assert_eq!(snapshot.threshold, ThresholdState::Alert);
        assert_eq!(series.len(), 2);
        assert!(series[0].timestamp < series[1].timestamp);
        assert_eq!(device_averages.len(), 2);
        assert_eq!(raw[0].device, "D1");
        assert_eq!(raw[1].device, "D2");
        assert_eq!(dropped_rows, 1);
    }

    #[test]
    fn test_no_data_view() {
        // ---
        let table = create_test_table(&[["bad", "bad", "D1", "1", "1"]]);
        assert_eq!(
            DashboardView::build(&table),
            DashboardView::NoData {
                message: NO_DATA_MESSAGE,
                dropped_rows: 1,
            }
        );
    }

    #[test]
    fn test_missing_column_view() {
        // ---
        let table = Table::new(vec!["date".into(), "device".into()], vec![]);
        let view = DashboardView::build(&table);
        assert!(view.is_error());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["kind"], "format");
        assert_eq!(json["remediation"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_view_json_shape() {
        // ---
        let table = create_test_table(&[["23/11/2025", "0:24:37", "D1", "NaN", "40"]]);
        let json = serde_json::to_value(DashboardView::build(&table)).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["snapshot"]["pm2.5"], serde_json::Value::Null);
        assert_eq!(json["snapshot"]["threshold"], "normal");
        assert_eq!(json["snapshot"]["timestamp"], "2025-11-23T00:24:37");
        assert_eq!(json["device_averages"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_blank_device_row_shown_but_not_averaged() {
        // ---
        let table = create_test_table(&[
            ["23/11/2025", "0:24:37", "", "80", "1"],
            ["23/11/2025", "1:24:37", "D1", "10", "1"],
        ]);
        let json = serde_json::to_value(DashboardView::build(&table)).unwrap();

        assert_eq!(json["raw"].as_array().unwrap().len(), 2);
        let averages = json["device_averages"].as_array().unwrap();
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0]["device"], "D1");
        assert_eq!(averages[0]["pm2.5"], 10.0);
    }
}
