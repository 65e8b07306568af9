/// Maximum number of candidates pulled from the catalog before filtering
pub const CANDIDATE_FETCH_LIMIT: usize = 100;

/// Radius for the broad candidate fetch. Larger than any great-circle
/// distance on Earth, so the fetch is effectively unrestricted.
pub const BROAD_SEARCH_RADIUS_KM: f64 = 20_000.0;

/// Service-type hint value that disables category filtering
pub const UNKNOWN_SERVICE_TYPE: &str = "unknown";

/// Target-location label when geocoding is skipped or fails
pub const FALLBACK_LOCATION_LABEL: &str = "your current location";
