use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::catalog::models::{NewServiceRecord, ServiceRecord};

/// One row of an uploaded service catalog CSV.
///
/// Header names follow the source datasets: `name`, `type`, `location`,
/// `address`, `mobile_no`, `timings`, `cost`, `contact`, `available`,
/// `latitude`, `longitude`.
#[derive(Debug, Deserialize, Validate)]
pub struct CsvServiceRow {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub service_type: String,
    pub location: Option<String>,
    pub address: Option<String>,
    pub mobile_no: Option<String>,
    pub timings: Option<String>,
    pub cost: Option<String>,
    pub contact: Option<String>,
    pub available: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: f64,
}

impl CsvServiceRow {
    pub fn into_record(self) -> NewServiceRecord {
        let available = parse_available(self.available.as_deref());
        NewServiceRecord {
            name: self.name,
            service_type: self.service_type,
            location: self.location,
            address: self.address,
            mobile_no: self.mobile_no,
            timings: self.timings,
            cost: self.cost,
            contact: self.contact,
            available,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Blank availability defaults to true; the source datasets mark it sparsely
fn parse_available(raw: Option<&str>) -> bool {
    match raw {
        None => true,
        Some(s) => !matches!(s.trim().to_lowercase().as_str(), "false" | "0" | "no"),
    }
}

/// Upload request DTO for OpenAPI documentation.
/// The handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadServicesDto {
    /// CSV file with one service per row
    #[schema(format = Binary, content_media_type = "text/csv")]
    pub file: String,
}

/// Result of a catalog upload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UploadSummaryDto {
    pub inserted: u64,
}

/// A catalog record as returned by the listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponseDto {
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
}

impl From<ServiceRecord> for ServiceResponseDto {
    fn from(record: ServiceRecord) -> Self {
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
        }
    }
}
