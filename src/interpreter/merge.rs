use crate::extractors::ExtractedFields;
use crate::models::SearchCriteria;

/// Combine external extractor output with heuristic output, field by field.
///
/// Scalar fields come from `external` when present and from `fallback`
/// otherwise. Tags keep the external ones first, then append each fallback
/// stem not already in the list. A stem is appended even when an external tag
/// is an inflection of it, so "luminoso" and "luminos" can both score.
pub fn merge(external: ExtractedFields, fallback: ExtractedFields) -> SearchCriteria {
    let zone = non_blank(external.zone).or_else(|| non_blank(fallback.zone));
    let max_price = external
        .max_price
        .filter(|p| *p != 0)
        .or(fallback.max_price.filter(|p| *p != 0));
    let room_count = external
        .num_rooms
        .filter(|r| *r > 0)
        .or(fallback.num_rooms.filter(|r| *r > 0));

    let mut tags: Vec<String> = Vec::new();
    for tag in external.tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    for stem in fallback.tags {
        let stem = stem.trim().to_lowercase();
        if !stem.is_empty() && !tags.contains(&stem) {
            tags.push(stem);
        }
    }

    SearchCriteria {
        zone,
        max_price,
        room_count,
        tags,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
