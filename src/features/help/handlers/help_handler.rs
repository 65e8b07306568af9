use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::help::dtos::{HelpQueryDto, HelpResponseDto};
use crate::features::help::services::HelpService;
use crate::shared::types::ApiResponse;

/// Find nearby services for a help request
///
/// Resolves the target location (geocoding the mentioned place when
/// present), then returns matching services within the urgency-driven
/// radius, ascending by distance. An empty match list is a normal outcome
/// and carries an explanatory message.
#[utoipa::path(
    post,
    path = "/api/help",
    tag = "help",
    request_body = HelpQueryDto,
    responses(
        (status = 200, description = "Ranked nearby services (possibly empty)", body = ApiResponse<HelpResponseDto>),
        (status = 400, description = "Missing query text or coordinates"),
        (status = 503, description = "Service catalog unavailable")
    )
)]
pub async fn submit_help_query(
    State(service): State<Arc<HelpService>>,
    Json(dto): Json<HelpQueryDto>,
) -> Result<Json<ApiResponse<HelpResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let result = service.submit_help_query(dto).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}
