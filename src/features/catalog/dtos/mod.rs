pub mod service_dto;

pub use service_dto::{CsvServiceRow, ServiceResponseDto, UploadServicesDto, UploadSummaryDto};
