//! Fixed coordinates and canned GeoJSON used across crate tests.

use hazard_common::GeoPoint;

/// Coordinates used as stable test anchors.
pub mod coords {
    use super::GeoPoint;

    /// Tokyo Tower
    pub const TOKYO_TOWER: GeoPoint = GeoPoint {
        lat: 35.6586,
        lon: 139.7454,
    };

    /// Osaka Castle
    pub const OSAKA_CASTLE: GeoPoint = GeoPoint {
        lat: 34.6873,
        lon: 135.5262,
    };

    /// Northern Hokkaido, near the top of Japan's latitude range
    pub const WAKKANAI: GeoPoint = GeoPoint {
        lat: 45.4157,
        lon: 141.6730,
    };
}

/// A GeoJSON FeatureCollection with one square polygon around `center`,
/// extending `half_deg` degrees in each direction.
pub fn square_feature_collection(center: GeoPoint, half_deg: f64) -> String {
    let (lat, lon) = (center.lat, center.lon);
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [lon - half_deg, lat - half_deg],
                    [lon + half_deg, lat - half_deg],
                    [lon + half_deg, lat + half_deg],
                    [lon - half_deg, lat + half_deg],
                    [lon - half_deg, lat - half_deg]
                ]]
            }
        }]
    })
    .to_string()
}

/// An empty GeoJSON FeatureCollection.
pub fn empty_feature_collection() -> String {
    serde_json::json!({ "type": "FeatureCollection", "features": [] }).to_string()
}
