use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::catalog::models::ServiceRecord;

/// A help request: free-text query plus requester coordinates
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct HelpQueryDto {
    /// Free-text description of the problem
    #[schema(example = "I need a hospital near Indiranagar")]
    pub query: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: Option<f64>,
    /// Service-type hint, e.g. "hospital"
    pub service_type: Option<String>,
    /// Place name mentioned in the query, resolved via geocoding
    pub location_mentioned: Option<String>,
    /// "High", "Medium" or "Low"; anything else is treated as Medium
    pub urgency: Option<String>,
}

/// A matching service annotated with its distance from the target
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NearbyServiceDto {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub location: Option<String>,
    pub address: Option<String>,
    pub mobile_no: Option<String>,
    pub timings: Option<String>,
    pub cost: Option<String>,
    pub contact: Option<String>,
    pub available: bool,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the resolved target, rounded to two decimals
    pub distance_km: f64,
}

impl NearbyServiceDto {
    pub fn from_record(record: ServiceRecord, distance_km: f64) -> Self {
        Self {
            id: record.id,
            name: record.name,
            service_type: record.service_type,
            location: record.location,
            address: record.address,
            mobile_no: record.mobile_no,
            timings: record.timings,
            cost: record.cost,
            contact: record.contact,
            available: record.available,
            latitude: record.latitude,
            longitude: record.longitude,
            distance_km,
        }
    }
}

/// The interpreted query echoed back with the ranked matches
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HelpResponseDto {
    pub original_query: String,
    pub understood_service: String,
    /// Human-readable label for the resolved target
    pub target_location: String,
    /// [latitude, longitude] of the resolved target
    pub target_coordinates: Vec<f64>,
    /// [latitude, longitude] of the requester
    pub user_coordinates: Vec<f64>,
    pub urgency: String,
    pub radius_km: f64,
    /// Matches within the radius, ascending by distance
    pub nearby_services: Vec<NearbyServiceDto>,
    /// Explanation when no services matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
