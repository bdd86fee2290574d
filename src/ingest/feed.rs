/// Station extraction for the two DHMZ feed layouts.
///
/// The feeds come in two shapes once converted by `xml.rs`:
///
/// City-grouped (UV index, sea temperature):
///   Grad[]
///     .GradIme   — station name
///     .Podatci   — measurements already keyed, in feed order
///
/// Row-based (general weather):
///   Podatci[0].Termin[]   — header row: ordered measurement labels
///   Podatci[1..]
///     .Postaja            — station name
///     .Termin[]           — values, positionally aligned with the header
///
/// The layout is decided up front by `classify`, so a document matching
/// neither shape fails with `UnrecognizedLayout` instead of surfacing as an
/// indexing error deep inside row parsing.

use std::collections::BTreeMap;

use crate::ingest::xml::FeedNode;
use crate::model::{FeedError, Measurements, Station};

const CITY_GROUP_KEY: &str = "Grad";
const CITY_NAME_KEY: &str = "GradIme";
const ROWS_KEY: &str = "Podatci";
const STATION_NAME_KEY: &str = "Postaja";
const TERM_KEY: &str = "Termin";

/// Which of the known layouts a converted document follows.
#[derive(Debug)]
pub enum FeedLayout<'a> {
    /// One `Grad` element per station.
    CityGrouped(&'a [FeedNode]),
    /// Header row followed by data rows.
    RowBased {
        labels: Vec<&'a str>,
        rows: &'a [FeedNode],
    },
    Unrecognized,
}

/// Inspects a document and picks its layout without extracting anything.
pub fn classify(doc: &FeedNode) -> FeedLayout<'_> {
    if let Some(groups) = doc.get(CITY_GROUP_KEY) {
        return FeedLayout::CityGrouped(groups.items());
    }

    let Some(rows) = doc.get(ROWS_KEY) else {
        return FeedLayout::Unrecognized;
    };
    let rows = rows.items();
    let Some((header, data_rows)) = rows.split_first() else {
        return FeedLayout::Unrecognized;
    };
    let Some(header_terms) = header.get(TERM_KEY) else {
        return FeedLayout::Unrecognized;
    };

    let mut labels = Vec::new();
    for term in header_terms.items() {
        match term.as_text() {
            Some(label) => labels.push(label),
            None => return FeedLayout::Unrecognized,
        }
    }

    FeedLayout::RowBased {
        labels,
        rows: data_rows,
    }
}

/// Builds the station map for any supported feed document.
///
/// Station names are unique keys; if a feed lists the same name twice the
/// later entry replaces the earlier one.
///
/// # Errors
/// - `FeedError::UnrecognizedLayout` — neither `Grad` nor a usable `Podatci` header.
/// - `FeedError::MissingField` — a group or row without its name field.
/// - `FeedError::NotText` — a measurement that is itself a nested structure.
/// - `FeedError::RowTooLong` — a data row with more values than header labels.
pub fn extract_stations(doc: &FeedNode) -> Result<BTreeMap<String, Station>, FeedError> {
    let stations = match classify(doc) {
        FeedLayout::CityGrouped(groups) => stations_from_groups(groups)?,
        FeedLayout::RowBased { labels, rows } => stations_from_rows(&labels, rows)?,
        FeedLayout::Unrecognized => return Err(FeedError::UnrecognizedLayout),
    };

    tracing::debug!("extracted {} stations", stations.len());
    Ok(stations)
}

fn stations_from_groups(groups: &[FeedNode]) -> Result<BTreeMap<String, Station>, FeedError> {
    let mut stations = BTreeMap::new();

    for group in groups {
        let name = group.text_field(CITY_NAME_KEY)?.to_string();

        let mut measurements = Measurements::new();
        if let Some(data) = group.get(ROWS_KEY) {
            for (key, reading) in data.entries() {
                let reading = reading
                    .as_text()
                    .ok_or_else(|| FeedError::NotText(format!("{}/{}", ROWS_KEY, key)))?;
                measurements.push(key.as_str(), reading);
            }
        }

        stations.insert(name.clone(), Station { name, measurements });
    }

    Ok(stations)
}

fn stations_from_rows(
    labels: &[&str],
    rows: &[FeedNode],
) -> Result<BTreeMap<String, Station>, FeedError> {
    let mut stations = BTreeMap::new();

    for row in rows {
        let name = row.text_field(STATION_NAME_KEY)?.to_string();
        let values = row.get(TERM_KEY).map(FeedNode::items).unwrap_or(&[]);

        if values.len() > labels.len() {
            return Err(FeedError::RowTooLong {
                station: name,
                values: values.len(),
                labels: labels.len(),
            });
        }

        let mut measurements = Measurements::new();
        for (label, value) in labels.iter().zip(values) {
            let value = value
                .as_text()
                .ok_or_else(|| FeedError::NotText(format!("{}/{}", TERM_KEY, label)))?;
            measurements.push(*label, value);
        }

        stations.insert(name.clone(), Station { name, measurements });
    }

    Ok(stations)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;
    use crate::ingest::xml::parse_document;

    fn stations_for(xml: &str) -> BTreeMap<String, Station> {
        let doc = parse_document(xml).expect("fixture should be valid XML");
        extract_stations(&doc).expect("fixture should extract")
    }

    // --- Layout classification ----------------------------------------------

    #[test]
    fn test_classify_uv_fixture_as_city_grouped() {
        let doc = parse_document(fixture_uv_xml()).unwrap();
        assert!(matches!(classify(&doc), FeedLayout::CityGrouped(g) if g.len() == 3));
    }

    #[test]
    fn test_classify_general_fixture_as_row_based() {
        let doc = parse_document(fixture_general_xml()).unwrap();
        match classify(&doc) {
            FeedLayout::RowBased { labels, rows } => {
                assert_eq!(labels, vec!["Temp", "Vlaga", "Tlak", "VjetarSmjer", "VjetarBrzina", "Vrijeme"]);
                assert_eq!(rows.len(), 3, "header row must be excluded");
            }
            other => panic!("expected RowBased, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_unknown_document_as_unrecognized() {
        let doc = parse_document("<Nesto><Drugo>1</Drugo></Nesto>").unwrap();
        assert!(matches!(classify(&doc), FeedLayout::Unrecognized));
    }

    #[test]
    fn test_classify_rows_without_header_terms_as_unrecognized() {
        let doc = parse_document("<R><Podatci><Postaja>Pula</Postaja></Podatci></R>").unwrap();
        assert!(matches!(classify(&doc), FeedLayout::Unrecognized));
    }

    // --- City-grouped extraction --------------------------------------------

    #[test]
    fn test_city_grouped_yields_one_station_per_group() {
        let stations = stations_for(fixture_uv_xml());
        let names: Vec<_> = stations.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Malinska", "Split", "Zagreb"]);
    }

    #[test]
    fn test_city_grouped_measurements_copied_verbatim_in_order() {
        let stations = stations_for(fixture_uv_xml());
        let malinska = &stations["Malinska"];
        assert_eq!(malinska.name, "Malinska");

        let pairs: Vec<_> = malinska.measurements.iter().collect();
        assert_eq!(
            pairs,
            vec![("t08", "2.1"), ("t10", "4.6"), ("t12", "6.3"), ("t14", ""), ("t16", "")]
        );
    }

    #[test]
    fn test_city_grouped_single_group_is_handled() {
        let xml = "<UVI><Grad><GradIme>Pula</GradIme><Podatci><t08>1</t08></Podatci></Grad></UVI>";
        let stations = stations_for(xml);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations["Pula"].measurements.get("t08"), Some("1"));
    }

    #[test]
    fn test_city_grouped_missing_name_is_error() {
        let doc = parse_document("<UVI><Grad><Podatci><t08>1</t08></Podatci></Grad></UVI>").unwrap();
        let result = extract_stations(&doc);
        assert!(
            matches!(result, Err(FeedError::MissingField(ref k)) if k == "GradIme"),
            "got {:?}",
            result
        );
    }

    // --- Row-based extraction -----------------------------------------------

    #[test]
    fn test_row_based_keys_come_from_header_labels() {
        let stations = stations_for(fixture_general_xml());
        let malinska = &stations["Malinska"];

        assert_eq!(malinska.measurements.len(), 6);
        assert_eq!(malinska.measurements.get("Temp"), Some("17.4"));
        assert_eq!(malinska.measurements.get("Vlaga"), Some("71"));
        assert_eq!(malinska.measurements.get("Vrijeme"), Some("pretežno vedro"));
    }

    #[test]
    fn test_row_based_excludes_header_row() {
        let stations = stations_for(fixture_general_xml());
        assert_eq!(stations.len(), 3);
        assert!(!stations.contains_key(""), "header row has no Postaja and must not become a station");
    }

    #[test]
    fn test_row_based_row_longer_than_header_is_error() {
        let xml = "<H><Podatci><Termin>A</Termin></Podatci>\
                   <Podatci><Postaja>Pula</Postaja><Termin>1</Termin><Termin>2</Termin></Podatci></H>";
        let doc = parse_document(xml).unwrap();
        let result = extract_stations(&doc);
        assert!(
            matches!(result, Err(FeedError::RowTooLong { values: 2, labels: 1, .. })),
            "got {:?}",
            result
        );
    }

    #[test]
    fn test_row_based_short_row_pairs_leading_labels() {
        let xml = "<H><Podatci><Termin>A</Termin><Termin>B</Termin></Podatci>\
                   <Podatci><Postaja>Pula</Postaja><Termin>1</Termin></Podatci></H>";
        let stations = stations_for(xml);
        let pairs: Vec<_> = stations["Pula"].measurements.iter().collect();
        assert_eq!(pairs, vec![("A", "1")]);
    }

    #[test]
    fn test_unrecognized_layout_is_error_not_panic() {
        let doc = parse_document("<Nesto><Drugo>1</Drugo></Nesto>").unwrap();
        assert!(matches!(extract_stations(&doc), Err(FeedError::UnrecognizedLayout)));
    }
}
