use std::cmp::Ordering;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::catalog::store::ServiceCatalogStore;
use crate::features::help::dtos::{HelpQueryDto, HelpResponseDto, NearbyServiceDto};
use crate::features::help::models::Urgency;
use crate::features::help::services::category_matcher::filter_by_service_type;
use crate::features::help::services::geocoding_service::Geocoder;
use crate::features::help::services::radius_policy::RadiusPolicy;
use crate::shared::constants::{
    BROAD_SEARCH_RADIUS_KM, CANDIDATE_FETCH_LIMIT, FALLBACK_LOCATION_LABEL, UNKNOWN_SERVICE_TYPE,
};
use crate::shared::geo::{haversine_km, round_km, GeoPoint};

/// The help-query pipeline: resolve target coordinates, fetch broad
/// candidates from the catalog, filter by category and radius, then rank
/// by distance. Deterministic for a fixed query and catalog state.
pub struct HelpService {
    catalog: Arc<dyn ServiceCatalogStore>,
    geocoder: Arc<dyn Geocoder>,
    radius_policy: RadiusPolicy,
}

impl HelpService {
    pub fn new(
        catalog: Arc<dyn ServiceCatalogStore>,
        geocoder: Arc<dyn Geocoder>,
        radius_policy: RadiusPolicy,
    ) -> Self {
        Self {
            catalog,
            geocoder,
            radius_policy,
        }
    }

    pub async fn submit_help_query(&self, dto: HelpQueryDto) -> Result<HelpResponseDto> {
        if dto.query.trim().is_empty() {
            return Err(AppError::Validation("Query text is required".to_string()));
        }

        let (user_lat, user_lon) = match (dto.latitude, dto.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(AppError::Validation(
                    "Location coordinates are required".to_string(),
                ))
            }
        };
        let user_point = GeoPoint::new(user_lat, user_lon);

        let service_type = dto
            .service_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_SERVICE_TYPE)
            .to_string();
        let urgency = Urgency::parse(dto.urgency.as_deref());

        tracing::debug!(
            service_type = %service_type,
            urgency = %urgency,
            location_mentioned = ?dto.location_mentioned,
            "Interpreted help query"
        );

        let (target, target_location) = self
            .resolve_target(user_point, dto.location_mentioned.as_deref())
            .await;

        // Superset fetch; category and radius filtering happen below
        let candidates = self
            .catalog
            .nearby(target, CANDIDATE_FETCH_LIMIT, BROAD_SEARCH_RADIUS_KM)
            .await?;

        let type_filtered = filter_by_service_type(&candidates, &service_type);

        let radius_km = self.radius_policy.radius_for(urgency);
        let mut matched: Vec<(f64, _)> = type_filtered
            .into_iter()
            .map(|record| (haversine_km(target, record.point()), record))
            .filter(|(distance, _)| *distance <= radius_km)
            .collect();

        if matched.is_empty() {
            return Ok(HelpResponseDto {
                original_query: dto.query,
                understood_service: service_type.clone(),
                target_location,
                target_coordinates: vec![target.latitude, target.longitude],
                user_coordinates: vec![user_lat, user_lon],
                urgency: urgency.to_string(),
                radius_km,
                nearby_services: Vec::new(),
                message: Some(format!(
                    "No {} services found within {}km of the target location. \
                     Try increasing the search radius or selecting a different service type.",
                    service_type, radius_km
                )),
            });
        }

        // Sort on the unrounded distance; rounding happens only when the
        // value is attached to the response
        matched.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let nearby_services = matched
            .into_iter()
            .map(|(distance, record)| NearbyServiceDto::from_record(record, round_km(distance)))
            .collect();

        Ok(HelpResponseDto {
            original_query: dto.query,
            understood_service: service_type,
            target_location,
            target_coordinates: vec![target.latitude, target.longitude],
            user_coordinates: vec![user_lat, user_lon],
            urgency: urgency.to_string(),
            radius_km,
            nearby_services,
            message: None,
        })
    }

    /// Geocode the mentioned place if any; any failure falls back to the
    /// requester's own coordinates.
    async fn resolve_target(
        &self,
        user_point: GeoPoint,
        location_mentioned: Option<&str>,
    ) -> (GeoPoint, String) {
        let Some(place) = location_mentioned.map(str::trim).filter(|s| !s.is_empty()) else {
            return (user_point, FALLBACK_LOCATION_LABEL.to_string());
        };

        match self.geocoder.geocode(place).await {
            Ok(Some(hit)) => (
                GeoPoint::new(hit.latitude, hit.longitude),
                hit.display_name,
            ),
            Ok(None) => {
                tracing::warn!("No geocoding match for '{}', using requester location", place);
                (user_point, FALLBACK_LOCATION_LABEL.to_string())
            }
            Err(e) => {
                tracing::warn!("Geocoding failed for '{}': {}, using requester location", place, e);
                (user_point, FALLBACK_LOCATION_LABEL.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::core::config::SearchConfig;
    use crate::features::catalog::models::NewServiceRecord;
    use crate::features::catalog::store::MemoryCatalog;
    use crate::features::help::services::geocoding_service::GeocodedPlace;

    struct StaticGeocoder(Option<GeocodedPlace>);

    #[async_trait]
    impl Geocoder for StaticGeocoder {
        async fn geocode(&self, _place_name: &str) -> Result<Option<GeocodedPlace>> {
            Ok(self.0.clone())
        }
    }

    struct FailingGeocoder;

    #[async_trait]
    impl Geocoder for FailingGeocoder {
        async fn geocode(&self, _place_name: &str) -> Result<Option<GeocodedPlace>> {
            Err(AppError::ExternalServiceError("lookup timed out".to_string()))
        }
    }

    fn record(name: &str, service_type: &str, latitude: f64, longitude: f64) -> NewServiceRecord {
        NewServiceRecord {
            name: name.to_string(),
            service_type: service_type.to_string(),
            location: None,
            address: None,
            mobile_no: None,
            timings: None,
            cost: None,
            contact: None,
            available: true,
            latitude,
            longitude,
        }
    }

    fn radius_policy() -> RadiusPolicy {
        RadiusPolicy::new(&SearchConfig {
            radius_high_km: 50.0,
            radius_medium_km: 20.0,
            radius_low_km: 10.0,
        })
    }

    async fn service_with(
        records: Vec<NewServiceRecord>,
        geocoder: Arc<dyn Geocoder>,
    ) -> HelpService {
        let catalog = Arc::new(MemoryCatalog::new());
        if !records.is_empty() {
            catalog.insert_many(records).await.unwrap();
        }
        HelpService::new(catalog, geocoder, radius_policy())
    }

    fn query(text: &str, latitude: f64, longitude: f64) -> HelpQueryDto {
        HelpQueryDto {
            query: text.to_string(),
            latitude: Some(latitude),
            longitude: Some(longitude),
            service_type: None,
            location_mentioned: None,
            urgency: None,
        }
    }

    #[tokio::test]
    async fn finds_the_city_hospital_about_a_kilometer_away() {
        let svc = service_with(
            vec![record("City Hospital", "Hospital", 12.97, 77.59)],
            Arc::new(StaticGeocoder(None)),
        )
        .await;

        let mut dto = query("I need a hospital", 12.97, 77.60);
        dto.service_type = Some("hospital".to_string());
        dto.urgency = Some("Medium".to_string());

        let result = svc.submit_help_query(dto).await.unwrap();

        assert_eq!(result.nearby_services.len(), 1);
        assert_eq!(result.nearby_services[0].name, "City Hospital");
        assert!((result.nearby_services[0].distance_km - 1.09).abs() < 0.05);
        assert_eq!(result.urgency, "Medium");
        assert_eq!(result.radius_km, 20.0);
        assert!(result.message.is_none());
    }

    #[tokio::test]
    async fn no_pharmacy_yields_empty_list_and_message() {
        let svc = service_with(
            vec![record("City Hospital", "Hospital", 12.97, 77.59)],
            Arc::new(StaticGeocoder(None)),
        )
        .await;

        let mut dto = query("need medicine", 12.97, 77.60);
        dto.service_type = Some("pharmacy".to_string());

        let result = svc.submit_help_query(dto).await.unwrap();

        assert!(result.nearby_services.is_empty());
        let message = result.message.unwrap();
        assert!(message.contains("pharmacy"));
        assert!(message.contains("20km"));
    }

    #[tokio::test]
    async fn results_are_sorted_ascending_by_distance() {
        let svc = service_with(
            vec![
                record("Farther Hospital", "Hospital", 13.02, 77.59),
                record("Nearest Hospital", "Hospital", 12.975, 77.59),
                record("Middle Hospital", "Hospital", 13.00, 77.59),
            ],
            Arc::new(StaticGeocoder(None)),
        )
        .await;

        let mut dto = query("hospital please", 12.97, 77.59);
        dto.service_type = Some("hospital".to_string());

        let result = svc.submit_help_query(dto).await.unwrap();
        let names: Vec<&str> = result
            .nearby_services
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Nearest Hospital", "Middle Hospital", "Farther Hospital"]
        );

        let distances: Vec<f64> = result
            .nearby_services
            .iter()
            .map(|s| s.distance_km)
            .collect();
        let mut sorted = distances.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(distances, sorted);
    }

    #[tokio::test]
    async fn urgency_widens_and_narrows_the_radius() {
        // ~15km north of the requester
        let records = vec![record("Regional Hospital", "Hospital", 13.105, 77.59)];

        let svc = service_with(records.clone(), Arc::new(StaticGeocoder(None))).await;
        let mut dto = query("hospital", 12.97, 77.59);
        dto.service_type = Some("hospital".to_string());
        dto.urgency = Some("Low".to_string());
        let low = svc.submit_help_query(dto).await.unwrap();
        assert!(low.nearby_services.is_empty());
        assert_eq!(low.radius_km, 10.0);

        let svc = service_with(records, Arc::new(StaticGeocoder(None))).await;
        let mut dto = query("hospital", 12.97, 77.59);
        dto.service_type = Some("hospital".to_string());
        dto.urgency = Some("High".to_string());
        let high = svc.submit_help_query(dto).await.unwrap();
        assert_eq!(high.nearby_services.len(), 1);
        assert_eq!(high.radius_km, 50.0);
    }

    #[tokio::test]
    async fn unknown_urgency_behaves_like_medium() {
        let records = vec![record("City Hospital", "Hospital", 12.97, 77.59)];

        let svc = service_with(records.clone(), Arc::new(StaticGeocoder(None))).await;
        let mut dto = query("hospital", 12.97, 77.60);
        dto.urgency = Some("Critical".to_string());
        let critical = svc.submit_help_query(dto).await.unwrap();

        let svc = service_with(records, Arc::new(StaticGeocoder(None))).await;
        let mut dto = query("hospital", 12.97, 77.60);
        dto.urgency = Some("Medium".to_string());
        let medium = svc.submit_help_query(dto).await.unwrap();

        assert_eq!(critical.radius_km, medium.radius_km);
        assert_eq!(critical.urgency, "Medium");
    }

    #[tokio::test]
    async fn mentioned_location_uses_geocoded_target() {
        let geocoded = GeocodedPlace {
            latitude: 13.00,
            longitude: 77.60,
            display_name: "Hebbal, Bengaluru".to_string(),
        };
        let svc = service_with(
            vec![record("Hebbal Clinic", "Hospital", 13.00, 77.60)],
            Arc::new(StaticGeocoder(Some(geocoded))),
        )
        .await;

        let mut dto = query("hospital near hebbal", 12.90, 77.50);
        dto.service_type = Some("hospital".to_string());
        dto.location_mentioned = Some("Hebbal".to_string());

        let result = svc.submit_help_query(dto).await.unwrap();

        assert_eq!(result.target_location, "Hebbal, Bengaluru");
        assert_eq!(result.target_coordinates, vec![13.00, 77.60]);
        assert_eq!(result.user_coordinates, vec![12.90, 77.50]);
        assert_eq!(result.nearby_services[0].distance_km, 0.0);
    }

    #[tokio::test]
    async fn geocoding_failure_falls_back_to_requester_location() {
        let svc = service_with(
            vec![record("City Hospital", "Hospital", 12.97, 77.59)],
            Arc::new(FailingGeocoder),
        )
        .await;

        let mut dto = query("hospital near downtown", 12.97, 77.60);
        dto.service_type = Some("hospital".to_string());
        dto.location_mentioned = Some("downtown".to_string());

        let result = svc.submit_help_query(dto).await.unwrap();

        assert_eq!(result.target_location, "your current location");
        assert_eq!(result.target_coordinates, vec![12.97, 77.60]);
        assert_eq!(result.nearby_services.len(), 1);
    }

    #[tokio::test]
    async fn empty_query_text_is_rejected_before_the_pipeline() {
        let svc = service_with(Vec::new(), Arc::new(StaticGeocoder(None))).await;

        let result = svc.submit_help_query(query("  ", 12.97, 77.59)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn missing_coordinates_are_rejected() {
        let svc = service_with(Vec::new(), Arc::new(StaticGeocoder(None))).await;

        let mut dto = query("help", 0.0, 0.0);
        dto.latitude = None;

        let result = svc.submit_help_query(dto).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn missing_service_type_returns_everything_in_radius() {
        let svc = service_with(
            vec![
                record("City Hospital", "Hospital", 12.97, 77.59),
                record("Quick Fix Garage", "Auto Repair", 12.98, 77.59),
            ],
            Arc::new(StaticGeocoder(None)),
        )
        .await;

        let result = svc
            .submit_help_query(query("anything nearby", 12.97, 77.59))
            .await
            .unwrap();

        assert_eq!(result.understood_service, "unknown");
        assert_eq!(result.nearby_services.len(), 2);
    }

    #[tokio::test]
    async fn repeated_queries_are_idempotent() {
        let svc = service_with(
            vec![
                record("City Hospital", "Hospital", 12.97, 77.59),
                record("Lakeside Hospital", "Hospital", 12.99, 77.61),
            ],
            Arc::new(StaticGeocoder(None)),
        )
        .await;

        let mut dto = query("hospital", 12.97, 77.60);
        dto.service_type = Some("hospital".to_string());

        let first = svc.submit_help_query(dto.clone()).await.unwrap();
        let second = svc.submit_help_query(dto).await.unwrap();

        let first_ids: Vec<_> = first.nearby_services.iter().map(|s| s.id).collect();
        let second_ids: Vec<_> = second.nearby_services.iter().map(|s| s.id).collect();
        assert_eq!(first_ids, second_ids);

        let first_distances: Vec<_> =
            first.nearby_services.iter().map(|s| s.distance_km).collect();
        let second_distances: Vec<_> =
            second.nearby_services.iter().map(|s| s.distance_km).collect();
        assert_eq!(first_distances, second_distances);
    }

    #[tokio::test]
    async fn insert_then_query_round_trip_returns_all_records() {
        let catalog = Arc::new(MemoryCatalog::new());
        let batch: Vec<NewServiceRecord> = (0..4)
            .map(|i| {
                record(
                    &format!("Hospital {}", i),
                    "Hospital",
                    12.97 + i as f64 * 0.005,
                    77.59,
                )
            })
            .collect();
        catalog.insert_many(batch).await.unwrap();

        let svc = HelpService::new(
            catalog,
            Arc::new(StaticGeocoder(None)),
            radius_policy(),
        );

        let mut dto = query("hospital", 12.97, 77.59);
        dto.service_type = Some("hospital".to_string());
        let result = svc.submit_help_query(dto).await.unwrap();

        assert_eq!(result.nearby_services.len(), 4);
        let mut ids: Vec<_> = result.nearby_services.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
