use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "Unknown";

// Edge metadata a fronting proxy reports about the caller. Extracted here,
// then carried as an opaque bag; the sequence actor never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub region: String,
    pub timezone: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub colo: String,
}

fn header_or_unknown(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(UNKNOWN)
        .to_string()
}

impl Location {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            city: header_or_unknown(headers, "x-geo-city"),
            country: header_or_unknown(headers, "x-geo-country"),
            region: header_or_unknown(headers, "x-geo-region"),
            timezone: header_or_unknown(headers, "x-geo-timezone"),
            latitude: header_or_unknown(headers, "x-geo-latitude"),
            longitude: header_or_unknown(headers, "x-geo-longitude"),
            postal_code: header_or_unknown(headers, "x-geo-postal-code"),
            colo: header_or_unknown(headers, "x-geo-colo"),
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::from_headers(&HeaderMap::new())
    }
}
