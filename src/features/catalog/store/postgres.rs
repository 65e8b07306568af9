use std::cmp::Ordering;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::catalog::models::{NewServiceRecord, ServiceRecord};
use crate::shared::geo::{haversine_km, BoundingBox, GeoPoint};

use super::ServiceCatalogStore;

/// Postgres-backed catalog store.
///
/// Nearby lookups push a bounding-box prefilter into SQL (served by the
/// (latitude, longitude) index) and apply the exact Haversine filter and
/// ordering in-process, so results match the brute-force backend.
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceCatalogStore for PostgresCatalog {
    async fn insert_many(&self, records: Vec<NewServiceRecord>) -> Result<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to begin insert transaction: {:?}", e);
            AppError::Storage(e)
        })?;

        let inserted = records.len() as u64;
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO services (
                    id, name, service_type, location, address, mobile_no,
                    timings, cost, contact, available, latitude, longitude
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(record.name)
            .bind(record.service_type)
            .bind(record.location)
            .bind(record.address)
            .bind(record.mobile_no)
            .bind(record.timings)
            .bind(record.cost)
            .bind(record.contact)
            .bind(record.available)
            .bind(record.latitude)
            .bind(record.longitude)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert service: {:?}", e);
                AppError::Storage(e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit service batch: {:?}", e);
            AppError::Storage(e)
        })?;

        Ok(inserted)
    }

    async fn nearby(
        &self,
        point: GeoPoint,
        limit: usize,
        radius_km: f64,
    ) -> Result<Vec<ServiceRecord>> {
        let bbox = BoundingBox::around(point, radius_km);

        // Insertion order in the prefilter keeps distance ties deterministic
        let candidates: Vec<ServiceRecord> = sqlx::query_as::<_, ServiceRecord>(
            r#"
            SELECT id, name, service_type, location, address, mobile_no,
                   timings, cost, contact, available, latitude, longitude, created_at
            FROM services
            WHERE latitude BETWEEN $1 AND $2
              AND longitude BETWEEN $3 AND $4
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(bbox.min_lat)
        .bind(bbox.max_lat)
        .bind(bbox.min_lon)
        .bind(bbox.max_lon)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch nearby services: {:?}", e);
            AppError::Storage(e)
        })?;

        // The box is only a superset; exact distance decides
        let mut matches: Vec<(f64, ServiceRecord)> = candidates
            .into_iter()
            .map(|r| (haversine_km(point, r.point()), r))
            .filter(|(distance, _)| *distance <= radius_km)
            .collect();

        matches.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        matches.truncate(limit);

        Ok(matches.into_iter().map(|(_, r)| r).collect())
    }

    async fn distinct_types(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT service_type
            FROM services
            ORDER BY service_type ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list service types: {:?}", e);
            AppError::Storage(e)
        })
    }

    async fn all_records(&self) -> Result<Vec<ServiceRecord>> {
        sqlx::query_as::<_, ServiceRecord>(
            r#"
            SELECT id, name, service_type, location, address, mobile_no,
                   timings, cost, contact, available, latitude, longitude, created_at
            FROM services
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list services: {:?}", e);
            AppError::Storage(e)
        })
    }
}
