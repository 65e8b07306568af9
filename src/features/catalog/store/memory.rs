use std::cmp::Ordering;
use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::catalog::models::{NewServiceRecord, ServiceRecord};
use crate::shared::geo::{haversine_km, GeoPoint};

use super::ServiceCatalogStore;

/// Brute-force scan backend: the whole catalog lives in memory and every
/// lookup computes distances per record. Suits small single-node
/// deployments and tests; data does not survive a restart.
#[derive(Default)]
pub struct MemoryCatalog {
    records: RwLock<Vec<ServiceRecord>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServiceCatalogStore for MemoryCatalog {
    async fn insert_many(&self, records: Vec<NewServiceRecord>) -> Result<u64> {
        let now = Utc::now();
        let rows: Vec<ServiceRecord> = records
            .into_iter()
            .map(|r| ServiceRecord {
                id: Uuid::new_v4(),
                name: r.name,
                service_type: r.service_type,
                location: r.location,
                address: r.address,
                mobile_no: r.mobile_no,
                timings: r.timings,
                cost: r.cost,
                contact: r.contact,
                available: r.available,
                latitude: r.latitude,
                longitude: r.longitude,
                created_at: now,
            })
            .collect();

        let inserted = rows.len() as u64;
        // Single extend under the write lock: readers see the whole batch
        // or none of it
        self.records.write().await.extend(rows);
        Ok(inserted)
    }

    async fn nearby(
        &self,
        point: GeoPoint,
        limit: usize,
        radius_km: f64,
    ) -> Result<Vec<ServiceRecord>> {
        let records = self.records.read().await;

        let mut matches: Vec<(f64, ServiceRecord)> = records
            .iter()
            .map(|r| (haversine_km(point, r.point()), r.clone()))
            .filter(|(distance, _)| *distance <= radius_km)
            .collect();

        // sort_by is stable: equidistant records keep insertion order
        matches.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        matches.truncate(limit);

        Ok(matches.into_iter().map(|(_, r)| r).collect())
    }

    async fn distinct_types(&self) -> Result<Vec<String>> {
        let records = self.records.read().await;
        let types: BTreeSet<String> = records.iter().map(|r| r.service_type.clone()).collect();
        Ok(types.into_iter().collect())
    }

    async fn all_records(&self) -> Result<Vec<ServiceRecord>> {
        Ok(self.records.read().await.clone())
    }
}
