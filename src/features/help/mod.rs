//! Help-query feature: the geo-filter -> keyword-filter -> radius-filter ->
//! distance-sort pipeline behind `POST /api/help`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{HelpService, NominatimGeocoder, RadiusPolicy};
