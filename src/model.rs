/// Shared data types for the weather page service.
///
/// Everything here lives for a single run: stations are built fresh from
/// each fetched feed and dropped once the current reading is extracted.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Station data
// ---------------------------------------------------------------------------

/// Ordered series of `(key, reading)` pairs for one station.
///
/// Keys are timestamps (UV, sea temperature) or measurement labels
/// (general weather). Insertion order is the order the feed lists them,
/// oldest first; the reading selector depends on that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Measurements(Vec<(String, String)>);

impl Measurements {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, key: impl Into<String>, reading: impl Into<String>) {
        self.0.push((key.into(), reading.into()));
    }

    /// First reading stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Measurements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// Serialized as a map so templates can both iterate it and index by label.
impl serde::Serialize for Measurements {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, reading) in &self.0 {
            map.serialize_entry(key, reading)?;
        }
        map.end()
    }
}

/// A named measurement site and its readings from one feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub name: String,
    pub measurements: Measurements,
}

/// The two-element result handed to the renderer for the UV and sea feeds.
///
/// For a missing station both fields carry placeholders instead of data, so
/// the page always has something to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentReading {
    pub time: String,
    pub value: String,
}

/// Sentinel shown in place of a value that could not be read.
pub const NO_VALUE: &str = "-";

impl CurrentReading {
    pub fn new(time: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            value: value.into(),
        }
    }

    /// Placeholder for a station the feed does not list.
    pub fn station_unavailable(station_name: &str) -> Self {
        Self::new(
            format!("Podaci za stanicu {} nisu dostupni.", station_name),
            NO_VALUE,
        )
    }

    /// Placeholder for a listed station whose series has no reading yet.
    pub fn no_reading() -> Self {
        Self::new(NO_VALUE, NO_VALUE)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures while fetching or interpreting a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("response from {0} is not valid UTF-8")]
    NotUtf8(String),

    #[error("malformed XML: {0}")]
    Xml(#[from] xmltree::ParseError),

    #[error("document is neither city-grouped (Grad) nor row-based (Podatci)")]
    UnrecognizedLayout,

    #[error("missing field '{0}'")]
    MissingField(String),

    #[error("field '{0}' is not plain text")]
    NotText(String),

    #[error("row for station '{station}' has {values} values but the header lists {labels} labels")]
    RowTooLong {
        station: String,
        values: usize,
        labels: usize,
    },

    #[error("station '{0}' is not listed in the feed")]
    StationNotFound(String),

    #[error("a feed worker exited without reporting a result")]
    WorkerLost,
}
