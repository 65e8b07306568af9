use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coarse priority label driving the search radius
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    /// Case-insensitive; unrecognized or absent values fall back to Medium
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("high") => Urgency::High,
            Some("low") => Urgency::Low,
            _ => Urgency::Medium,
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Urgency::High => write!(f, "High"),
            Urgency::Medium => write!(f, "Medium"),
            Urgency::Low => write!(f, "Low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognized_levels() {
        assert_eq!(Urgency::parse(Some("High")), Urgency::High);
        assert_eq!(Urgency::parse(Some("medium")), Urgency::Medium);
        assert_eq!(Urgency::parse(Some("LOW")), Urgency::Low);
    }

    #[test]
    fn parse_unknown_or_absent_is_medium() {
        assert_eq!(Urgency::parse(None), Urgency::Medium);
        assert_eq!(Urgency::parse(Some("")), Urgency::Medium);
        assert_eq!(Urgency::parse(Some("Critical")), Urgency::Medium);
    }
}
