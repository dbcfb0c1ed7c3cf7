//! Snapshot and per-device aggregates over a cleaned [`Dataset`].

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{Dataset, Measurement, Reading, ThresholdState, PM25_ALERT_THRESHOLD};

// ---

/// Mean PM2.5 for one device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceAverage {
    // ---
    pub device: String,
    #[serde(rename = "pm2.5")]
    pub pm25_mean: f64,
    /// Number of numeric PM2.5 values behind the mean.
    pub samples: usize,
}

/// The most recent reading, or `None` for an empty dataset.
pub fn latest_reading(dataset: &Dataset) -> Option<&Reading> {
    dataset.readings().last()
}

/// `Alert` iff the value is numeric and strictly above the threshold.
pub fn threshold_state(pm25: Measurement) -> ThresholdState {
    match pm25 {
        Measurement::Value(v) if v > PM25_ALERT_THRESHOLD => ThresholdState::Alert,
        _ => ThresholdState::Normal,
    }
}

/// Average PM2.5 per device, sorted by device name.
///
/// Unparsable cells are skipped. Readings with a blank device stay in the
/// dataset but belong to no group. A device with no numeric PM2.5 at all is
/// left out rather than reported with an undefined mean.
pub fn average_by_device(dataset: &Dataset) -> Vec<DeviceAverage> {
    // ---
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for reading in dataset.readings() {
        if reading.device.trim().is_empty() {
            continue;
        }
        if let Some(v) = reading.pm25.value() {
            let entry = sums.entry(reading.device.as_str()).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(device, (sum, samples))| DeviceAverage {
            device: device.to_string(),
            pm25_mean: sum / samples as f64,
            samples,
        })
        .collect()
}
