use crate::models::{Listing, ScoredListing, SearchCriteria};

/// Points per tag found in the listing text
const TAG_POINTS: f64 = 1.0;
/// Bonus for listings at or under the price ceiling
const VALUE_BONUS: f64 = 0.5;
/// Tags are matched on this many leading characters
const TAG_PREFIX_CHARS: usize = 4;

/// Filter listings by the criteria, score the survivors and return the best `limit`.
///
/// Ordering is by score descending; equal scores keep their input order.
pub fn filter_and_rank<'a>(
    listings: &'a [Listing],
    criteria: &SearchCriteria,
    limit: usize,
) -> Vec<ScoredListing<'a>> {
    let mut ranked: Vec<ScoredListing<'a>> = listings
        .iter()
        .filter(|listing| passes_filters(listing, criteria))
        .map(|listing| ScoredListing {
            listing,
            score: score_listing(listing, criteria),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

/// Whether a listing satisfies every criterion that is set
pub fn passes_filters(listing: &Listing, criteria: &SearchCriteria) -> bool {
    if let Some(zone) = criteria.zone.as_deref().filter(|z| !z.is_empty()) {
        if !listing.zone.to_lowercase().contains(&zone.to_lowercase()) {
            return false;
        }
    }

    if let Some(max_price) = criteria.max_price {
        if listing.price.is_nan() || listing.price > max_price as f64 {
            return false;
        }
    }

    if let Some(rooms) = criteria.room_count {
        if listing.rooms != rooms {
            return false;
        }
    }

    true
}

/// Tag matches plus the value bonus.
///
/// The bonus repeats the price filter, so after filtering it adds the same
/// 0.5 to every result whenever a price ceiling is set.
pub fn score_listing(listing: &Listing, criteria: &SearchCriteria) -> f64 {
    let text = format!("{} {}", listing.description, listing.title).to_lowercase();

    let mut score = 0.0;
    for tag in &criteria.tags {
        let prefix: String = tag.to_lowercase().chars().take(TAG_PREFIX_CHARS).collect();
        if !prefix.is_empty() && text.contains(&prefix) {
            score += TAG_POINTS;
        }
    }

    if let Some(max_price) = criteria.max_price {
        if listing.price <= max_price as f64 {
            score += VALUE_BONUS;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, zone: &str, price: f64, rooms: u32, description: &str) -> Listing {
        Listing {
            id: id.to_string(),
            title: format!("Piso {}", id),
            zone: zone.to_string(),
            price,
            rooms,
            area: 60.0,
            description: description.to_string(),
        }
    }

    #[test]
    fn test_filters_are_independent() {
        let listings = vec![
            listing("1", "Madrid Centro", 1100.0, 2, ""),
            listing("2", "Retiro", 900.0, 2, ""),
            listing("3", "Madrid Centro", 1500.0, 3, ""),
        ];

        let by_zone = SearchCriteria {
            zone: Some("CENTRO".to_string()),
            ..Default::default()
        };
        let ids: Vec<_> = filter_and_rank(&listings, &by_zone, 10)
            .iter()
            .map(|s| s.listing.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);

        let by_price = SearchCriteria {
            max_price: Some(1100),
            ..Default::default()
        };
        let ids: Vec<_> = filter_and_rank(&listings, &by_price, 10)
            .iter()
            .map(|s| s.listing.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);

        let by_rooms = SearchCriteria {
            room_count: Some(3),
            ..Default::default()
        };
        let ids: Vec<_> = filter_and_rank(&listings, &by_rooms, 10)
            .iter()
            .map(|s| s.listing.id.as_str())
            .collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn test_empty_criteria_keeps_everything_with_zero_score() {
        let listings = vec![
            listing("1", "Madrid Centro", 1100.0, 2, "luminoso"),
            listing("2", "Retiro", 900.0, 2, ""),
        ];

        let ranked = filter_and_rank(&listings, &SearchCriteria::default(), 10);

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_tag_prefix_matches_title_and_description() {
        let mut with_title = listing("1", "Retiro", 900.0, 1, "interior");
        with_title.title = "Ático con terraza".to_string();
        let with_description = listing("2", "Retiro", 900.0, 1, "Balcones a la calle, luminosa");

        let criteria = SearchCriteria {
            tags: vec!["terraza".to_string(), "balc".to_string(), "luminos".to_string()],
            ..Default::default()
        };

        assert_eq!(score_listing(&with_title, &criteria), 1.0);
        assert_eq!(score_listing(&with_description, &criteria), 2.0);
    }

    #[test]
    fn test_value_bonus_applies_to_every_result() {
        let listings = vec![
            listing("1", "Retiro", 700.0, 1, ""),
            listing("2", "Retiro", 1000.0, 1, ""),
        ];
        let criteria = SearchCriteria {
            max_price: Some(1000),
            ..Default::default()
        };

        let ranked = filter_and_rank(&listings, &criteria, 10);

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|s| s.score == 0.5));
    }

    #[test]
    fn test_sorted_by_score_with_stable_ties() {
        let listings = vec![
            listing("a", "Retiro", 900.0, 1, "interior"),
            listing("b", "Retiro", 900.0, 1, "con ascensor"),
            listing("c", "Retiro", 900.0, 1, "reformado"),
            listing("d", "Retiro", 900.0, 1, "ascensor y reforma"),
        ];
        let criteria = SearchCriteria {
            tags: vec!["ascensor".to_string(), "reform".to_string()],
            ..Default::default()
        };

        let ids: Vec<_> = filter_and_rank(&listings, &criteria, 10)
            .iter()
            .map(|s| s.listing.id.as_str())
            .collect();

        assert_eq!(ids, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn test_limit_truncates() {
        let listings: Vec<_> = (0..5)
            .map(|i| listing(&i.to_string(), "Retiro", 900.0, 1, ""))
            .collect();

        assert_eq!(filter_and_rank(&listings, &SearchCriteria::default(), 3).len(), 3);
        assert!(filter_and_rank(&listings, &SearchCriteria::default(), 0).is_empty());
    }

    #[test]
    fn test_empty_listings() {
        let criteria = SearchCriteria {
            zone: Some("retiro".to_string()),
            max_price: Some(900),
            room_count: Some(1),
            tags: vec!["luminos".to_string()],
        };
        assert!(filter_and_rank(&[], &criteria, 3).is_empty());
    }
}
