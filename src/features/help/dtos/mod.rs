pub mod help_dto;

pub use help_dto::{HelpQueryDto, HelpResponseDto, NearbyServiceDto};
