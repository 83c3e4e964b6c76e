use serde::{de, Deserialize, Deserializer, Serialize};

/// A rental listing from the sample table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: String,
    #[serde(alias = "titulo")]
    pub title: String,
    #[serde(alias = "zona")]
    pub zone: String,
    /// Monthly rent (EUR)
    #[serde(alias = "precio")]
    pub price: f64,
    #[serde(alias = "num_hab", alias = "num_rooms", deserialize_with = "whole_rooms")]
    pub rooms: u32,
    /// Size in square meters
    #[serde(alias = "m2")]
    pub area: f64,
    #[serde(alias = "desc", default)]
    pub description: String,
}

/// Room counts may be written as floats ("2.0") but must be whole and non-negative
fn whole_rooms<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let rooms = f64::deserialize(deserializer)?;
    if rooms.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&rooms) {
        Ok(rooms as u32)
    } else {
        Err(de::Error::custom(format!("invalid room count {}", rooms)))
    }
}

/// Filter criteria derived from a free-text query.
///
/// Every field is independently optional; an absent field imposes no filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchCriteria {
    /// Case-insensitive substring matched against the listing zone
    pub zone: Option<String>,
    /// Price ceiling (inclusive)
    pub max_price: Option<i64>,
    /// Exact room count
    pub room_count: Option<u32>,
    /// Keyword stems, ordered, no duplicates
    pub tags: Vec<String>,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        self.zone.is_none()
            && self.max_price.is_none()
            && self.room_count.is_none()
            && self.tags.is_empty()
    }
}

/// A listing that passed the filters, with its ranking score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredListing<'a> {
    pub listing: &'a Listing,
    pub score: f64,
}
