//! Simple data models for the air-quality pipeline.

use chrono::NaiveDateTime;
use serde::Serialize;

// ---

/// PM2.5 concentration (µg/m³) above which a reading is flagged.
pub const PM25_ALERT_THRESHOLD: f64 = 50.0;

/// A coerced measurement cell.
///
/// Serializes as a plain number, or `null` when the cell was not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Measurement {
    Value(f64),
    Unparsable,
}

impl Measurement {
    // ---
    /// Coerce a cell to a number; blanks, text and non-finite values
    /// (`NaN`, `inf`) become [`Measurement::Unparsable`].
    pub fn parse(cell: &str) -> Self {
        // ---
        match cell.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Measurement::Value(v),
            _ => Measurement::Unparsable,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Measurement::Value(v) => Some(*v),
            Measurement::Unparsable => None,
        }
    }
}

/// Presentation hint for a PM2.5 value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdState {
    Normal,
    Alert,
}

/// One cleaned, timestamped sensor row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    // ---
    pub device: String,
    pub date: String,
    pub real_time: String,
    pub timestamp: NaiveDateTime,
    #[serde(rename = "pm2.5")]
    pub pm25: Measurement,
    pub pm10: Measurement,
}

/// Cleaned readings, ascending by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    // ---
    readings: Vec<Reading>,
}

impl Dataset {
    // ---
    /// Build a dataset, sorting by timestamp. The sort is stable, so rows
    /// sharing a timestamp keep their source order.
    pub fn from_readings(mut readings: Vec<Reading>) -> Self {
        readings.sort_by_key(|r| r.timestamp);
        Self { readings }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Newest first, for the raw table view.
    pub fn newest_first(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::NaiveDate;

    fn create_test_reading(device: &str, hour: u32, pm25: f64) -> Reading {
        // ---
        Reading {
            device: device.to_string(),
            date: "23/11/2025".to_string(),
            real_time: format!("{hour}:00:00"),
            timestamp: NaiveDate::from_ymd_opt(2025, 11, 23)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            pm25: Measurement::Value(pm25),
            pm10: Measurement::Value(pm25 / 2.0),
        }
    }

    #[test]
    fn test_measurement_coercion() {
        // ---
        assert_eq!(Measurement::parse("55"), Measurement::Value(55.0));
        assert_eq!(Measurement::parse(" 12.5 "), Measurement::Value(12.5));
        assert_eq!(Measurement::parse("NaN"), Measurement::Unparsable);
        assert_eq!(Measurement::parse("inf"), Measurement::Unparsable);
        assert_eq!(Measurement::parse(""), Measurement::Unparsable);
        assert_eq!(Measurement::parse("n/a"), Measurement::Unparsable);
    }

    #[test]
    fn test_measurement_serialization() {
        // ---
        assert_eq!(serde_json::to_string(&Measurement::Value(4.5)).unwrap(), "4.5");
        assert_eq!(serde_json::to_string(&Measurement::Unparsable).unwrap(), "null");
    }

    #[test]
    fn test_dataset_sorted_and_stable() {
        // ---
        let dataset = Dataset::from_readings(vec![
            create_test_reading("B", 5, 1.0),
            create_test_reading("A", 3, 2.0),
            create_test_reading("C", 5, 3.0),
        ]);

        let devices: Vec<_> = dataset.readings().iter().map(|r| r.device.as_str()).collect();
        assert_eq!(devices, vec!["A", "B", "C"]);

        let newest: Vec<_> = dataset.newest_first().map(|r| r.device.as_str()).collect();
        assert_eq!(newest, vec!["C", "B", "A"]);
    }
}
