use serde::{Deserialize, Serialize};

/// Earth's mean radius in kilometers (for the Haversine formula)
const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A WGS84 coordinate pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between two points in kilometers (Haversine).
///
/// Symmetric and deterministic; callers sort on this value directly and
/// round only when attaching it to a response.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.latitude.to_radians();
    let lat2_rad = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Round a distance to two decimals for presentation
pub fn round_km(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}

/// Latitude/longitude window around a point, clamped to valid ranges.
///
/// Used as a coarse SQL prefilter; exact Haversine filtering happens
/// in-process afterwards, so the box only has to be a superset.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn around(center: GeoPoint, radius_km: f64) -> Self {
        // 1 degree of latitude is approximately 111km; longitude shrinks
        // with latitude, so widen conservatively near the poles.
        let lat_delta = radius_km / 111.0;
        let lon_delta = lat_delta / center.latitude.to_radians().cos().abs().max(0.01);

        Self {
            min_lat: (center.latitude - lat_delta).max(-90.0),
            max_lat: (center.latitude + lat_delta).min(90.0),
            min_lon: (center.longitude - lon_delta).max(-180.0),
            max_lon: (center.longitude + lon_delta).min(180.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_known_distance() {
        // Bangalore city center to Whitefield, approx 15km
        let center = GeoPoint::new(12.9716, 77.5946);
        let whitefield = GeoPoint::new(12.9698, 77.7500);

        let distance = haversine_km(center, whitefield);
        assert!(distance > 14.0 && distance < 18.0);
    }

    #[test]
    fn haversine_symmetric() {
        let a = GeoPoint::new(-6.2088, 106.8456);
        let b = GeoPoint::new(-6.9175, 107.6191);

        assert_eq!(haversine_km(a, b), haversine_km(b, a));
    }

    #[test]
    fn haversine_same_point_is_zero() {
        let p = GeoPoint::new(12.97, 77.59);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn round_km_two_decimals() {
        assert_eq!(round_km(1.0949), 1.09);
        assert_eq!(round_km(1.095), 1.1);
        assert_eq!(round_km(0.0), 0.0);
    }

    #[test]
    fn bounding_box_contains_center() {
        let center = GeoPoint::new(12.97, 77.59);
        let bbox = BoundingBox::around(center, 20.0);

        assert!(bbox.min_lat < center.latitude && center.latitude < bbox.max_lat);
        assert!(bbox.min_lon < center.longitude && center.longitude < bbox.max_lon);
    }

    #[test]
    fn bounding_box_clamps_to_valid_ranges() {
        let bbox = BoundingBox::around(GeoPoint::new(89.9, 179.9), 20_000.0);

        assert!(bbox.min_lat >= -90.0 && bbox.max_lat <= 90.0);
        assert!(bbox.min_lon >= -180.0 && bbox.max_lon <= 180.0);
    }
}
