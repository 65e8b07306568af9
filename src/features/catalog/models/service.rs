use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::geo::GeoPoint;

/// A catalog entry: one point-of-interest service.
///
/// Coordinates are required; the schema enforces NOT NULL so every
/// persisted record is geo-searchable. Records are bulk-inserted and
/// read-only afterwards.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub name: String,
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
    pub created_at: DateTime<Utc>,
}

impl ServiceRecord {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Candidate record before insertion; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewServiceRecord {
    pub name: String,
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
