use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::catalog::models::{NewServiceRecord, ServiceRecord};
use crate::shared::geo::GeoPoint;

mod memory;
mod postgres;

pub use memory::MemoryCatalog;
pub use postgres::PostgresCatalog;

/// Storage contract for the service catalog.
///
/// Backends are interchangeable and selected at configuration time: a
/// Postgres store that pushes a coarse prefilter into SQL, and an
/// in-memory brute-force scan. Pushing work into the store is an
/// optimization only; the logical result must match a full per-record
/// distance scan.
#[async_trait]
pub trait ServiceCatalogStore: Send + Sync {
    /// Assigns each candidate a fresh unique id and persists the whole
    /// batch atomically; a failure inserts nothing.
    async fn insert_many(&self, records: Vec<NewServiceRecord>) -> Result<u64>;

    /// Records within `radius_km` of `point`, ascending by distance,
    /// truncated to `limit`. Equidistant records keep insertion order.
    async fn nearby(
        &self,
        point: GeoPoint,
        limit: usize,
        radius_km: f64,
    ) -> Result<Vec<ServiceRecord>>;

    /// Distinct service-type labels, sorted, for the type menu
    async fn distinct_types(&self) -> Result<Vec<String>>;

    /// Every record, in insertion order, for administrative listing
    async fn all_records(&self) -> Result<Vec<ServiceRecord>>;
}
