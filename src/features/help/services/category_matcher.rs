use crate::features::catalog::models::ServiceRecord;
use crate::shared::constants::UNKNOWN_SERVICE_TYPE;

/// Static category -> synonym table for fuzzy type matching.
///
/// Matching is substring-based in both directions, so some synonyms
/// over-match on purpose (e.g. "hotel" under "food"); the table is part of
/// the observable behavior and is kept as-is.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "hospital",
        &["hospital", "medical", "healthcare", "clinic", "emergency"],
    ),
    (
        "doctor",
        &["doctor", "physician", "medical", "clinic", "healthcare"],
    ),
    ("ambulance", &["ambulance", "emergency", "medical transport"]),
    (
        "automobile",
        &["automobile", "car", "mechanic", "garage", "vehicle", "repair", "auto"],
    ),
    (
        "pharmacy",
        &["pharmacy", "medicine", "medical", "chemist", "drug store"],
    ),
    (
        "food",
        &["food", "restaurant", "cafe", "catering", "meal", "hotel"],
    ),
    ("police", &["police", "security", "law enforcement", "thief"]),
    (
        "fire",
        &["fire", "firefighter", "emergency", "fire extinguisher"],
    ),
];

/// Filter candidates by a free-text service-type hint.
///
/// Cascade, all comparisons case-insensitive substring:
/// 1. Empty or "unknown" hint: no filtering.
/// 2. Every category whose name or synonyms appear in the hint pools its
///    keywords; candidates whose type contains any pooled keyword survive.
/// 3. No category matched: fall back to the raw hint as a substring.
/// 4. Keyword filtering matched nothing: retry the raw-substring filter
///    before giving up.
pub fn filter_by_service_type(
    candidates: &[ServiceRecord],
    service_type: &str,
) -> Vec<ServiceRecord> {
    let hint = service_type.trim();
    if hint.is_empty() || hint.eq_ignore_ascii_case(UNKNOWN_SERVICE_TYPE) {
        return candidates.to_vec();
    }

    let hint_lower = hint.to_lowercase();

    let mut matching_keywords: Vec<String> = Vec::new();
    for (category, keywords) in CATEGORY_KEYWORDS {
        let hint_mentions_category = std::iter::once(category)
            .chain(keywords.iter())
            .any(|keyword| hint_lower.contains(&keyword.to_lowercase()));

        if hint_mentions_category {
            matching_keywords.extend(keywords.iter().map(|k| k.to_lowercase()));
            matching_keywords.push(category.to_lowercase());
        }
    }

    let filtered = if !matching_keywords.is_empty() {
        candidates
            .iter()
            .filter(|record| {
                let record_type = record.service_type.to_lowercase();
                matching_keywords
                    .iter()
                    .any(|keyword| record_type.contains(keyword))
            })
            .cloned()
            .collect::<Vec<_>>()
    } else {
        filter_by_raw_hint(candidates, &hint_lower)
    };

    // A hint that matched a category by name can still miss every record's
    // type via synonyms; give the raw hint a direct chance
    if filtered.is_empty() {
        return filter_by_raw_hint(candidates, &hint_lower);
    }

    filtered
}

fn filter_by_raw_hint(candidates: &[ServiceRecord], hint_lower: &str) -> Vec<ServiceRecord> {
    candidates
        .iter()
        .filter(|record| record.service_type.to_lowercase().contains(hint_lower))
        .cloned()
        .collect()
}
