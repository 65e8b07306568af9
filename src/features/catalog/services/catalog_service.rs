use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::CsvServiceRow;
use crate::features::catalog::models::{NewServiceRecord, ServiceRecord};
use crate::features::catalog::store::ServiceCatalogStore;

/// Service for catalog ingest and listing
pub struct CatalogService {
    store: Arc<dyn ServiceCatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ServiceCatalogStore>) -> Self {
        Self { store }
    }

    /// Parse an uploaded CSV and insert the whole batch.
    ///
    /// A malformed row rejects the entire upload: ingest is all-or-nothing,
    /// so a query never observes a partially-inserted batch.
    pub async fn ingest_csv(&self, data: &[u8]) -> Result<u64> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data);

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<CsvServiceRow>().enumerate() {
            let row = row.map_err(|e| {
                AppError::Validation(format!("CSV row {}: {}", index + 1, e))
            })?;
            row.validate().map_err(|e| {
                AppError::Validation(format!("CSV row {}: {}", index + 1, e))
            })?;
            records.push(row.into_record());
        }

        if records.is_empty() {
            return Err(AppError::Validation(
                "CSV contains no service rows".to_string(),
            ));
        }

        self.bulk_ingest(records).await
    }

    /// Insert pre-built records; the store assigns ids
    pub async fn bulk_ingest(&self, records: Vec<NewServiceRecord>) -> Result<u64> {
        let count = self.store.insert_many(records).await?;
        tracing::info!("Ingested {} services into the catalog", count);
        Ok(count)
    }

    /// Distinct type labels for the service-type menu
    pub async fn list_service_types(&self) -> Result<Vec<String>> {
        self.store.distinct_types().await
    }

    pub async fn list_all(&self) -> Result<Vec<ServiceRecord>> {
        self.store.all_records().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::store::MemoryCatalog;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryCatalog::new()))
    }

    #[tokio::test]
    async fn ingest_csv_inserts_all_rows() {
        let csv = "\
name,type,location,address,mobile_no,timings,cost,contact,available,latitude,longitude
City Hospital,Hospital,Indiranagar,12 Main Rd,9876543210,24x7,,reception,true,12.97,77.59
Night Pharmacy,Pharmacy,Koramangala,,,,low,,,12.93,77.62
";
        let svc = service();
        let inserted = svc.ingest_csv(csv.as_bytes()).await.unwrap();
        assert_eq!(inserted, 2);

        let records = svc.list_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "City Hospital");
        assert_eq!(records[0].service_type, "Hospital");
        assert_eq!(records[1].location.as_deref(), Some("Koramangala"));
        // Blank availability defaults to true
        assert!(records[1].available);
    }

    #[tokio::test]
    async fn ingest_csv_rejects_unparseable_coordinates() {
        let csv = "\
name,type,location,address,mobile_no,timings,cost,contact,available,latitude,longitude
City Hospital,Hospital,,,,,,,true,not-a-number,77.59
";
        let result = service().ingest_csv(csv.as_bytes()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn ingest_csv_rejects_out_of_range_coordinates() {
        let csv = "\
name,type,location,address,mobile_no,timings,cost,contact,available,latitude,longitude
City Hospital,Hospital,,,,,,,true,123.0,77.59
";
        let result = service().ingest_csv(csv.as_bytes()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn ingest_csv_rejects_empty_file() {
        let csv = "name,type,location,address,mobile_no,timings,cost,contact,available,latitude,longitude\n";
        let result = service().ingest_csv(csv.as_bytes()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn malformed_row_aborts_the_whole_batch() {
        let csv = "\
name,type,location,address,mobile_no,timings,cost,contact,available,latitude,longitude
Good Hospital,Hospital,,,,,,,true,12.97,77.59
,Hospital,,,,,,,true,12.98,77.60
";
        let svc = service();
        let result = svc.ingest_csv(csv.as_bytes()).await;
        assert!(result.is_err());
        assert!(svc.list_all().await.unwrap().is_empty());
    }
}
