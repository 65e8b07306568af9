use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{ServiceResponseDto, UploadServicesDto, UploadSummaryDto};
use crate::features::catalog::services::CatalogService;
use crate::shared::types::{ApiResponse, Meta};

/// Upload a service catalog CSV
///
/// Accepts multipart/form-data with a single `file` field containing the
/// CSV. The whole batch is inserted atomically; any malformed row rejects
/// the upload.
#[utoipa::path(
    post,
    path = "/api/services/upload",
    tag = "services",
    request_body(
        content = UploadServicesDto,
        content_type = "multipart/form-data",
        description = "CSV upload with columns: name, type, location, address, mobile_no, timings, cost, contact, available, latitude, longitude",
    ),
    responses(
        (status = 201, description = "Services uploaded successfully", body = ApiResponse<UploadSummaryDto>),
        (status = 400, description = "Missing file or malformed CSV row"),
        (status = 503, description = "Service catalog unavailable")
    )
)]
pub async fn upload_services(
    State(service): State<Arc<CatalogService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadSummaryDto>>)> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;
                file_data = Some(data.to_vec());
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    let inserted = service.ingest_csv(&file_data).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(UploadSummaryDto { inserted }),
            Some(format!("{} services uploaded successfully.", inserted)),
            None,
        )),
    ))
}

/// List distinct service types observed across the catalog
#[utoipa::path(
    get,
    path = "/api/services/types",
    tag = "services",
    responses(
        (status = 200, description = "Sorted set of service type labels", body = ApiResponse<Vec<String>>),
        (status = 503, description = "Service catalog unavailable")
    )
)]
pub async fn list_service_types(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let types = service.list_service_types().await?;
    Ok(Json(ApiResponse::success(Some(types), None, None)))
}

/// List every catalog record (administrative)
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "services",
    responses(
        (status = 200, description = "All catalog records", body = ApiResponse<Vec<ServiceResponseDto>>),
        (status = 503, description = "Service catalog unavailable")
    )
)]
pub async fn list_all_services(
    State(service): State<Arc<CatalogService>>,
) -> Result<Json<ApiResponse<Vec<ServiceResponseDto>>>> {
    let records = service.list_all().await?;
    let total = records.len() as i64;
    let dtos: Vec<ServiceResponseDto> = records.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}
