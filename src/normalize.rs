//! Cleaning stage: raw [`Table`] in, sorted [`Dataset`] out.
//!
//! Rows whose `date` + `real_time` cannot be read as a day-first timestamp
//! are dropped and counted, never reported as errors. Measurement cells are
//! coerced independently, so a bad number does not cost the row its place.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::{Dataset, Measurement, Reading, SourceError, Table};

// ---

pub const COL_DATE: &str = "date";
pub const COL_TIME: &str = "real_time";
pub const COL_DEVICE: &str = "device";
pub const COL_PM25: &str = "pm2.5";
pub const COL_PM10: &str = "pm10";

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Result of the filter stage: the kept rows plus how many were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub dataset: Dataset,
    pub dropped: usize,
}

struct Columns {
    date: usize,
    time: usize,
    device: usize,
    pm25: usize,
    pm10: usize,
}

impl Columns {
    fn locate(table: &Table) -> Result<Self, SourceError> {
        // ---
        let find = |name: &'static str| {
            table
                .column_index(name)
                .ok_or(SourceError::MissingColumn(name))
        };

        Ok(Self {
            date: find(COL_DATE)?,
            time: find(COL_TIME)?,
            device: find(COL_DEVICE)?,
            pm25: find(COL_PM25)?,
            pm10: find(COL_PM10)?,
        })
    }
}

/// Parse `"<date> <time>"` with the day before the month.
///
/// Returns `None` for anything that does not match, including impossible
/// calendar dates such as `31/02/2025`.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    // ---
    let combined = format!("{} {}", date.trim(), time.trim());

    DATE_FORMATS.iter().find_map(|df| {
        TIME_FORMATS.iter().find_map(|tf| {
            NaiveDateTime::parse_from_str(&combined, &format!("{df} {tf}")).ok()
        })
    })
}

/// Clean a fetched table.
///
/// Fails only when a required column is absent; every per-row problem is
/// absorbed. An empty [`Dataset`] is a normal outcome.
pub fn normalize(table: &Table) -> Result<Normalized, SourceError> {
    // ---
    let cols = Columns::locate(table)?;

    let mut readings = Vec::with_capacity(table.len());
    let mut dropped = 0;

    for row in 0..table.len() {
        let date = table.cell(row, cols.date);
        let real_time = table.cell(row, cols.time);

        let Some(timestamp) = parse_timestamp(date, real_time) else {
            debug!("Dropping row {}: unparsable timestamp '{} {}'", row, date, real_time);
            dropped += 1;
            continue;
        };

        readings.push(Reading {
            device: table.cell(row, cols.device).trim().to_string(),
            date: date.to_string(),
            real_time: real_time.to_string(),
            timestamp,
            pm25: Measurement::parse(table.cell(row, cols.pm25)),
            pm10: Measurement::parse(table.cell(row, cols.pm10)),
        });
    }

    info!(
        "Normalized {} rows: kept {}, dropped {}",
        table.len(),
        readings.len(),
        dropped
    );

    Ok(Normalized {
        dataset: Dataset::from_readings(readings),
        dropped,
    })
}

/// Render a dataset back into the source table shape.
pub fn dataset_to_table(dataset: &Dataset) -> Table {
    // ---
    let cell = |m: &Measurement| m.value().map(|v| v.to_string()).unwrap_or_default();

    let columns = [COL_DATE, COL_TIME, COL_DEVICE, COL_PM25, COL_PM10]
        .iter()
        .map(|c| c.to_string())
        .collect();

    let rows = dataset
        .readings()
        .iter()
        .map(|r| {
            vec![
                r.date.clone(),
                r.real_time.clone(),
                r.device.clone(),
                cell(&r.pm25),
                cell(&r.pm10),
            ]
        })
        .collect();

    Table::new(columns, rows)
}
