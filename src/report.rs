/// Per-feed getters and page assembly.
///
/// Each getter fetches its feed, parses it, and reduces it to what the page
/// shows for one station. The getters share nothing but the HTTP client and
/// can run in any order; `collect_page` runs them in sequence by default
/// or on a small thread pool when `parallel_fetch` is set.

use std::collections::BTreeMap;
use std::sync::mpsc;

use chrono::{Local, NaiveDate};
use reqwest::blocking::Client;
use threadpool::ThreadPool;

use crate::analysis::current::lookup_current_reading;
use crate::config::AppConfig;
use crate::ingest::feed::extract_stations;
use crate::ingest::fetch_feed;
use crate::ingest::xml::{FeedNode, parse_document};
use crate::model::{CurrentReading, FeedError, Measurements, Station};
use crate::render::PageContext;

const STAMP_KEY: &str = "DatumTermin";
const STAMP_DATE_KEY: &str = "Datum";
const STAMP_TERM_KEY: &str = "Termin";

/// Feeds older than this many days are reported as stale.
const STALE_AFTER_DAYS: i64 = 1;

// ---------------------------------------------------------------------------
// Feed stamp
// ---------------------------------------------------------------------------

/// Date and observation hour published at the top of the general feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedStamp {
    /// Date exactly as the feed prints it, e.g. `19.10.2026`.
    pub date: String,
    /// Observation hour, e.g. `14`.
    pub read_time: String,
    /// `date` parsed, if it is in the expected `dd.mm.yyyy` form.
    pub parsed_date: Option<NaiveDate>,
}

impl FeedStamp {
    pub fn from_document(doc: &FeedNode) -> Result<Self, FeedError> {
        let stamp = doc
            .get(STAMP_KEY)
            .ok_or_else(|| FeedError::MissingField(STAMP_KEY.to_string()))?;
        let date = stamp.text_field(STAMP_DATE_KEY)?.to_string();
        let read_time = stamp.text_field(STAMP_TERM_KEY)?.to_string();
        let parsed_date = parse_feed_date(&date);

        Ok(Self {
            date,
            read_time,
            parsed_date,
        })
    }

    /// True when the feed date is more than a day behind `today`.
    /// Unparseable dates are never considered stale.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.parsed_date
            .map(|d| (today - d).num_days() > STALE_AFTER_DAYS)
            .unwrap_or(false)
    }
}

/// Parses `19.10.2026` (a trailing `.` as in `19.10.2026.` is accepted).
fn parse_feed_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim().trim_end_matches('.');
    NaiveDate::parse_from_str(trimmed, "%d.%m.%Y").ok()
}

/// What the general weather feed contributes to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralReadings {
    pub measurements: Measurements,
    pub stamp: FeedStamp,
}

// ---------------------------------------------------------------------------
// Getters
// ---------------------------------------------------------------------------

fn fetch_stations(client: &Client, url: &str) -> Result<(FeedNode, BTreeMap<String, Station>), FeedError> {
    let body = fetch_feed(client, url)?;
    let doc = parse_document(&body)?;
    let stations = extract_stations(&doc)?;
    Ok((doc, stations))
}

/// Current UV index for `station_name`.
pub fn uv_reading(client: &Client, url: &str, station_name: &str) -> Result<CurrentReading, FeedError> {
    let (_, stations) = fetch_stations(client, url)?;
    Ok(lookup_current_reading(&stations, station_name))
}

/// Current sea temperature for `station_name`.
pub fn sea_reading(client: &Client, url: &str, station_name: &str) -> Result<CurrentReading, FeedError> {
    let (_, stations) = fetch_stations(client, url)?;
    Ok(lookup_current_reading(&stations, station_name))
}

/// All general measurements for `station_name` plus the feed's date stamp.
///
/// Unlike the UV and sea getters there is no placeholder here: the page has
/// nothing meaningful to show without this station, so a missing station is
/// `FeedError::StationNotFound`.
pub fn general_readings(client: &Client, url: &str, station_name: &str) -> Result<GeneralReadings, FeedError> {
    let (doc, mut stations) = fetch_stations(client, url)?;
    let stamp = FeedStamp::from_document(&doc)?;

    if stamp.is_stale(Local::now().date_naive()) {
        tracing::warn!("general feed is stale: dated {}", stamp.date);
    }

    let station = stations
        .remove(station_name)
        .ok_or_else(|| FeedError::StationNotFound(station_name.to_string()))?;

    Ok(GeneralReadings {
        measurements: station.measurements,
        stamp,
    })
}

// ---------------------------------------------------------------------------
// Page assembly
// ---------------------------------------------------------------------------

/// Runs all three getters and assembles the template context.
///
/// Any getter error aborts the whole collection; nothing is rendered from a
/// partial set of feeds.
pub fn collect_page(client: &Client, config: &AppConfig) -> Result<PageContext, FeedError> {
    let (uv, general, sea) = if config.parallel_fetch {
        collect_parallel(client, config)?
    } else {
        let city = config.city.as_str();
        let uv = uv_reading(client, &config.sources.uv, city)?;
        let general = general_readings(client, &config.sources.general, city)?;
        let sea = sea_reading(client, &config.sources.sea, city)?;
        (uv, general, sea)
    };

    Ok(build_page(&config.city, uv, general, sea))
}

fn build_page(city: &str, uv: CurrentReading, general: GeneralReadings, sea: CurrentReading) -> PageContext {
    PageContext {
        city: city.to_string(),
        date: general.stamp.date,
        read_time: general.stamp.read_time,
        general_data: general.measurements,
        uv_index: uv.value,
        uv_read_time: uv.time,
        sea_temp: sea.value,
        sea_read_time: sea.time,
    }
}

enum Collected {
    Uv(Result<CurrentReading, FeedError>),
    General(Result<GeneralReadings, FeedError>),
    Sea(Result<CurrentReading, FeedError>),
}

fn collect_parallel(
    client: &Client,
    config: &AppConfig,
) -> Result<(CurrentReading, GeneralReadings, CurrentReading), FeedError> {
    let pool = ThreadPool::new(3);
    let (tx, rx) = mpsc::channel();

    // reqwest's blocking client is reference-counted; clones share one pool
    {
        let (client, tx, url, city) = (client.clone(), tx.clone(), config.sources.uv.clone(), config.city.clone());
        pool.execute(move || {
            let _ = tx.send(Collected::Uv(uv_reading(&client, &url, &city)));
        });
    }
    {
        let (client, tx, url, city) = (client.clone(), tx.clone(), config.sources.general.clone(), config.city.clone());
        pool.execute(move || {
            let _ = tx.send(Collected::General(general_readings(&client, &url, &city)));
        });
    }
    {
        let (client, tx, url, city) = (client.clone(), tx, config.sources.sea.clone(), config.city.clone());
        pool.execute(move || {
            let _ = tx.send(Collected::Sea(sea_reading(&client, &url, &city)));
        });
    }

    gather(rx)
}

/// Waits for all three feeds. The first error wins; a sender dropped
/// without reporting is `WorkerLost`.
fn gather(
    rx: mpsc::Receiver<Collected>,
) -> Result<(CurrentReading, GeneralReadings, CurrentReading), FeedError> {
    let (mut uv, mut general, mut sea) = (None, None, None);
    for collected in rx.iter().take(3) {
        match collected {
            Collected::Uv(r) => uv = Some(r?),
            Collected::General(r) => general = Some(r?),
            Collected::Sea(r) => sea = Some(r?),
        }
    }

    match (uv, general, sea) {
        (Some(uv), Some(general), Some(sea)) => Ok((uv, general, sea)),
        // a worker panicked and dropped its sender without reporting
        _ => Err(FeedError::WorkerLost),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    #[test]
    fn test_stamp_read_from_general_fixture() {
        let doc = parse_document(fixture_general_xml()).unwrap();
        let stamp = FeedStamp::from_document(&doc).expect("fixture has DatumTermin");

        assert_eq!(stamp.date, "19.10.2026");
        assert_eq!(stamp.read_time, "14");
        assert_eq!(stamp.parsed_date, NaiveDate::from_ymd_opt(2026, 10, 19));
    }

    #[test]
    fn test_stamp_missing_is_error() {
        let doc = parse_document(fixture_uv_xml()).unwrap();
        let result = FeedStamp::from_document(&doc);
        assert!(matches!(result, Err(FeedError::MissingField(ref k)) if k == "DatumTermin"));
    }

    #[test]
    fn test_feed_date_accepts_trailing_dot_and_rejects_garbage() {
        assert_eq!(parse_feed_date("01.02.2026."), NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(parse_feed_date(" 01.02.2026 "), NaiveDate::from_ymd_opt(2026, 2, 1));
        assert_eq!(parse_feed_date("danas"), None);
    }

    #[test]
    fn test_staleness_threshold() {
        let stamp = FeedStamp {
            date: "19.10.2026".to_string(),
            read_time: "14".to_string(),
            parsed_date: NaiveDate::from_ymd_opt(2026, 10, 19),
        };
        let day = |d| NaiveDate::from_ymd_opt(2026, 10, d).unwrap();

        assert!(!stamp.is_stale(day(19)));
        assert!(!stamp.is_stale(day(20)), "one day behind is still current");
        assert!(stamp.is_stale(day(21)));

        let unparsed = FeedStamp { parsed_date: None, ..stamp };
        assert!(!unparsed.is_stale(day(31)));
    }

    #[test]
    fn test_build_page_maps_fields_to_template_names() {
        let doc = parse_document(fixture_general_xml()).unwrap();
        let general = GeneralReadings {
            measurements: [("Temp", "17.4")].into_iter().collect(),
            stamp: FeedStamp::from_document(&doc).unwrap(),
        };

        let page = build_page(
            "Malinska",
            CurrentReading::new("t12", "6.3"),
            general,
            CurrentReading::new("t14", "20.6"),
        );

        assert_eq!(page.city, "Malinska");
        assert_eq!(page.date, "19.10.2026");
        assert_eq!(page.read_time, "14");
        assert_eq!(page.uv_index, "6.3");
        assert_eq!(page.uv_read_time, "t12");
        assert_eq!(page.sea_temp, "20.6");
        assert_eq!(page.sea_read_time, "t14");
        assert_eq!(page.general_data.get("Temp"), Some("17.4"));
    }

    #[test]
    fn test_gather_reports_worker_lost_when_a_feed_never_reports() {
        let doc = parse_document(fixture_general_xml()).unwrap();
        let general = GeneralReadings {
            measurements: Measurements::new(),
            stamp: FeedStamp::from_document(&doc).unwrap(),
        };

        let (tx, rx) = mpsc::channel();
        tx.send(Collected::Uv(Ok(CurrentReading::new("t12", "6.3")))).unwrap();
        tx.send(Collected::General(Ok(general))).unwrap();
        // the sea worker went away without sending
        drop(tx);

        assert!(matches!(gather(rx), Err(FeedError::WorkerLost)));
    }

    #[test]
    fn test_gather_returns_first_error() {
        let (tx, rx) = mpsc::channel();
        tx.send(Collected::Sea(Err(FeedError::UnrecognizedLayout))).unwrap();
        drop(tx);

        assert!(matches!(gather(rx), Err(FeedError::UnrecognizedLayout)));
    }
}
