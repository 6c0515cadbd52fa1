//! CSV reader for the location seed file.
//!
//! Expects a header row containing at least `city`, `state_name`, `zip`, `lat`
//! and `lng`. Other columns are ignored.

use std::collections::HashSet;
use std::io::Read;

use serde::Deserialize;

use crate::features::locations::models::Location;

/// Column width of `locations.city` and `locations.region`
const MAX_NAME_CHARS: usize = 64;

#[derive(Debug, Deserialize)]
struct LocationRecord {
    city: String,
    state_name: String,
    zip: i32,
    lat: f64,
    lng: f64,
}

/// Rows accepted from a seed file, and how many were rejected
#[derive(Debug, Default)]
pub struct ParsedLocations {
    pub locations: Vec<Location>,
    pub skipped: usize,
}

/// Parse location rows, skipping malformed, out-of-range and duplicate entries.
pub fn read_locations<R: Read>(reader: R) -> ParsedLocations {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut parsed = ParsedLocations::default();
    let mut seen = HashSet::new();

    for (index, row) in csv_reader.deserialize::<LocationRecord>().enumerate() {
        // Header is line 1
        let line = index + 2;

        let record = match row {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line, e);
                parsed.skipped += 1;
                continue;
            }
        };

        if !(1..=99_999).contains(&record.zip) {
            tracing::warn!("Skipping line {}: zip {} out of range", line, record.zip);
            parsed.skipped += 1;
            continue;
        }

        if record.city.is_empty() {
            tracing::warn!("Skipping line {}: empty city for zip {}", line, record.zip);
            parsed.skipped += 1;
            continue;
        }

        if record.city.chars().count() > MAX_NAME_CHARS
            || record.state_name.chars().count() > MAX_NAME_CHARS
        {
            tracing::warn!(
                "Skipping line {}: city or region longer than {} characters",
                line,
                MAX_NAME_CHARS
            );
            parsed.skipped += 1;
            continue;
        }

        let location = Location {
            zip: record.zip,
            city: record.city,
            region: record.state_name,
            lat: record.lat,
            lng: record.lng,
        };

        if let Err(e) = location.coordinate() {
            tracing::warn!("Skipping line {} (zip {}): {}", line, location.zip, e);
            parsed.skipped += 1;
            continue;
        }

        if !seen.insert(location.zip) {
            tracing::warn!("Skipping line {}: duplicate zip {}", line, location.zip);
            parsed.skipped += 1;
            continue;
        }

        parsed.locations.push(location);
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_rows_and_ignores_extra_columns() {
        let data = "\
zip,lat,lng,city,state_id,state_name,population
60601,41.8855,-87.6221,Chicago,IL,Illinois,15083
00601,18.1800,-66.7522,Adjuntas,PR,Puerto Rico,17113
";
        let parsed = read_locations(data.as_bytes());

        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.locations.len(), 2);
        assert_eq!(parsed.locations[0].zip, 60601);
        assert_eq!(parsed.locations[0].city, "Chicago");
        assert_eq!(parsed.locations[0].region, "Illinois");
        assert_eq!(parsed.locations[1].zip, 601);
        assert_eq!(parsed.locations[1].region, "Puerto Rico");
    }

    #[test]
    fn test_skips_invalid_rows() {
        let data = "\
city,state_name,zip,lat,lng
Chicago,Illinois,60601,41.8855,-87.6221
Nowhere,Illinois,60602,95.0,-87.6
Broken,Illinois,abc,41.0,-87.0
Chicago,Illinois,60601,41.8855,-87.6221
,Illinois,60603,41.0,-87.0
Kansas City,Missouri,64101,39.1024,-94.6016
";
        let parsed = read_locations(data.as_bytes());

        let zips: Vec<i32> = parsed.locations.iter().map(|l| l.zip).collect();
        assert_eq!(zips, vec![60601, 64101]);
        assert_eq!(parsed.skipped, 4);
    }

    #[test]
    fn test_skips_names_too_long_for_the_table() {
        let data = format!(
            "city,state_name,zip,lat,lng\n{},Illinois,60601,41.8855,-87.6221\nChicago,{},60602,41.88,-87.62\nKansas City,Missouri,64101,39.1024,-94.6016\n",
            "C".repeat(65),
            "R".repeat(65)
        );
        let parsed = read_locations(data.as_bytes());

        let zips: Vec<i32> = parsed.locations.iter().map(|l| l.zip).collect();
        assert_eq!(zips, vec![64101]);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_empty_file() {
        let parsed = read_locations("city,state_name,zip,lat,lng\n".as_bytes());
        assert!(parsed.locations.is_empty());
        assert_eq!(parsed.skipped, 0);
    }
}
