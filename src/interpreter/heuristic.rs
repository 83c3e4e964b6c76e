//! Rule-based criteria extraction.
//!
//! Used on its own when no external extractor is configured, and as the
//! per-field fallback when one is. All rules run on the lowercased query and
//! are independent of each other.

use crate::extractors::ExtractedFields;
use regex::Regex;
use std::sync::OnceLock;

/// Tag stems searched for in the query, in scan order.
///
/// Stems rather than full words so that inflections ("luminoso", "luminosa",
/// "balcón", "balcones") all match.
pub const TAG_STEMS: [&str; 6] = ["luminos", "balc", "ascensor", "mascot", "terraza", "reform"];

/// Extract whatever criteria the query text states explicitly
pub fn extract(query: &str) -> ExtractedFields {
    let lowered = query.to_lowercase();

    ExtractedFields {
        zone: extract_zone(&lowered),
        max_price: extract_max_price(&lowered),
        num_rooms: extract_rooms(&lowered),
        tags: extract_tags(&lowered),
    }
}

/// First 3-4 digit amount followed by a euro sign
pub fn extract_max_price(lowered: &str) -> Option<i64> {
    static PRICE: OnceLock<Regex> = OnceLock::new();
    let re = PRICE.get_or_init(|| Regex::new(r"([0-9]{3,4})\s*€").expect("Invalid price regex"));

    re.captures(lowered)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .filter(|price| *price > 0)
}

/// First integer followed by "hab", "habitación" or "habitaciones"
pub fn extract_rooms(lowered: &str) -> Option<u32> {
    static ROOMS: OnceLock<Regex> = OnceLock::new();
    let re = ROOMS.get_or_init(|| {
        Regex::new(r"([0-9]+)\s*(hab|habitación|habitaciones)").expect("Invalid rooms regex")
    });

    re.captures(lowered)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|rooms| *rooms > 0)
}

/// Words after the first "en ", e.g. "en madrid centro, ..." gives "madrid centro"
pub fn extract_zone(lowered: &str) -> Option<String> {
    static ZONE: OnceLock<Regex> = OnceLock::new();
    let re = ZONE.get_or_init(|| Regex::new(r"en\s+([a-záéíóúñ ]{3,40})").expect("Invalid zone regex"));

    re.captures(lowered)
        .map(|caps| caps[1].trim().to_string())
        .filter(|zone| !zone.is_empty())
}

pub fn extract_tags(lowered: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for stem in TAG_STEMS {
        if lowered.contains(stem) && !tags.iter().any(|t| t == stem) {
            tags.push(stem.to_string());
        }
    }
    tags
}
