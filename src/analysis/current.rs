/// Current-reading selection.
///
/// Feeds publish a fixed set of slots per day and fill them in as the
/// observations arrive, so the tail of a series is usually empty. The
/// "current" reading is the last slot that actually holds a value.

use std::collections::BTreeMap;

use crate::model::{CurrentReading, Measurements, Station};

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Returns the most recent non-empty `(key, reading)` pair.
///
/// Scans from the last inserted entry backwards, skipping empty readings
/// (see `is_empty_reading`).
///
/// Returns `None` for an empty series or one where every slot is empty.
pub fn find_current_reading(measurements: &Measurements) -> Option<CurrentReading> {
    measurements
        .iter()
        .rev()
        .find(|(_, reading)| !is_empty_reading(reading))
        .map(|(time, reading)| CurrentReading::new(time, reading))
}

/// A slot counts as empty when it is blank, a numeric zero (`0`, `0.0`,
/// `-0`), or `false`. A zero is never reported as the current reading.
pub fn is_empty_reading(reading: &str) -> bool {
    let reading = reading.trim();
    reading.is_empty()
        || reading.eq_ignore_ascii_case("false")
        || reading.parse::<f64>().is_ok_and(|v| v == 0.0)
}

/// Looks up `station_name` and returns its current reading.
///
/// Never fails: a station missing from the feed yields the
/// "Podaci za stanicu … nisu dostupni." placeholder, and a station with no
/// filled slot yields the `-` / `-` placeholder.
pub fn lookup_current_reading(
    stations: &BTreeMap<String, Station>,
    station_name: &str,
) -> CurrentReading {
    let Some(station) = stations.get(station_name) else {
        tracing::warn!("station {} not present in feed", station_name);
        return CurrentReading::station_unavailable(station_name);
    };

    match find_current_reading(&station.measurements) {
        Some(reading) => reading,
        None => {
            tracing::warn!(
                "station {} has {} slots but no reading yet",
                station_name,
                station.measurements.len()
            );
            CurrentReading::no_reading()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
