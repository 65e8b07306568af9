use utoipa::{Modify, OpenApi};

use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers};
use crate::features::help::{dtos as help_dtos, handlers as help_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Catalog
        catalog_handlers::upload_services,
        catalog_handlers::list_service_types,
        catalog_handlers::list_all_services,
        // Help
        help_handlers::submit_help_query,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Catalog
            catalog_dtos::UploadServicesDto,
            catalog_dtos::UploadSummaryDto,
            catalog_dtos::ServiceResponseDto,
            ApiResponse<catalog_dtos::UploadSummaryDto>,
            ApiResponse<Vec<String>>,
            ApiResponse<Vec<catalog_dtos::ServiceResponseDto>>,
            // Help
            help_dtos::HelpQueryDto,
            help_dtos::NearbyServiceDto,
            help_dtos::HelpResponseDto,
            ApiResponse<help_dtos::HelpResponseDto>,
        )
    ),
    tags(
        (name = "services", description = "Service catalog ingest and listings"),
        (name = "help", description = "Location-based help queries"),
    ),
    info(
        title = "Helpline API",
        version = "0.1.0",
        description = "Location-based emergency-services lookup API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
