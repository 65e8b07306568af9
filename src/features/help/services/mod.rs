pub mod category_matcher;
mod geocoding_service;
mod help_service;
mod radius_policy;

pub use geocoding_service::{GeocodedPlace, Geocoder, NominatimGeocoder};
pub use help_service::HelpService;
pub use radius_policy::RadiusPolicy;
