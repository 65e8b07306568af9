use async_trait::async_trait;
use serde::Deserialize;

use crate::core::config::GeocodingConfig;
use crate::core::error::{AppError, Result};

/// A resolved place: coordinates plus a display label
#[derive(Debug, Clone)]
pub struct GeocodedPlace {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// Place-name lookup collaborator.
///
/// Both an error and a no-match answer are recoverable: the query pipeline
/// falls back to the requester's own coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place_name: &str) -> Result<Option<GeocodedPlace>>;
}

/// Nominatim API response structure
#[derive(Debug, Deserialize)]
struct NominatimResponse {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// Geocoding via the Nominatim free-form search endpoint
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: GeocodingConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("HelplineCore/1.0 (emergency-services-locator)")
                .build()
                .expect("Failed to build HTTP client"),
            base_url: config.base_url,
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, place_name: &str) -> Result<Option<GeocodedPlace>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(place_name)
        );

        tracing::debug!("Geocoding: {} -> {}", place_name, url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Nominatim request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Nominatim request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::warn!("Nominatim returned status: {}", response.status());
            return Ok(None);
        }

        let results: Vec<NominatimResponse> = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Nominatim response: {:?}", e);
            AppError::ExternalServiceError(format!("Failed to parse Nominatim response: {}", e))
        })?;

        let Some(hit) = results.into_iter().next() else {
            return Ok(None);
        };

        let (Ok(latitude), Ok(longitude)) = (hit.lat.parse::<f64>(), hit.lon.parse::<f64>())
        else {
            tracing::warn!("Nominatim returned unparseable coordinates for '{}'", place_name);
            return Ok(None);
        };

        Ok(Some(GeocodedPlace {
            latitude,
            longitude,
            display_name: hit.display_name.unwrap_or_else(|| place_name.to_string()),
        }))
    }
}
