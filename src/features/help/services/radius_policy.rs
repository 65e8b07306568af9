use crate::core::config::SearchConfig;
use crate::features::help::models::Urgency;

/// Maps urgency to a search radius in kilometers.
///
/// The values come from configuration, which guarantees
/// high > medium > low at load time.
#[derive(Debug, Clone)]
pub struct RadiusPolicy {
    high_km: f64,
    medium_km: f64,
    low_km: f64,
}

impl RadiusPolicy {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            high_km: config.radius_high_km,
            medium_km: config.radius_medium_km,
            low_km: config.radius_low_km,
        }
    }

    pub fn radius_for(&self, urgency: Urgency) -> f64 {
        match urgency {
            Urgency::High => self.high_km,
            Urgency::Medium => self.medium_km,
            Urgency::Low => self.low_km,
        }
    }
}
