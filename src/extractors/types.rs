use crate::extractors::error::ExtractionError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Criteria fields as returned by one extraction source.
///
/// Both the external extractor and the heuristic scan produce this shape, so
/// the fallback merge can work field by field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractedFields {
    pub zone: Option<String>,
    pub max_price: Option<i64>,
    pub num_rooms: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ExtractedFields {
    /// Convert a loosely typed JSON mapping into typed fields.
    ///
    /// Accepts English (`zone`, `max_price`, `num_rooms`, `tags`) and Spanish
    /// (`zona`, `max_precio`, `num_hab`, `etiquetas`) keys. Fields that are
    /// missing, empty, zero or of the wrong type come back as absent.
    pub fn from_json(value: &Value) -> Result<Self, ExtractionError> {
        let map = value.as_object().ok_or_else(|| {
            ExtractionError::Malformed(format!("expected a JSON object, got `{}`", value))
        })?;

        let zone = lookup(map, &["zone", "zona"])
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|z| !z.is_empty())
            .map(str::to_string);

        let max_price = lookup(map, &["max_price", "max_precio"])
            .and_then(|v| nonzero_integer("max_price", v));

        // A negative room count has no u32 representation and is dropped
        let num_rooms = lookup(map, &["num_rooms", "num_hab", "room_count"])
            .and_then(|v| nonzero_integer("num_rooms", v))
            .and_then(|n| u32::try_from(n).ok());

        let tags = match lookup(map, &["tags", "etiquetas"]) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(other) => {
                debug!("Ignoring non-list tags value: {}", other);
                Vec::new()
            }
            None => Vec::new(),
        };

        Ok(Self {
            zone,
            max_price,
            num_rooms,
            tags,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.zone.is_none() && self.max_price.is_none() && self.num_rooms.is_none() && self.tags.is_empty()
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| map.get(*key))
        .find(|value| !value.is_null())
}

/// Integers, truncated floats and numeric strings are accepted; zero counts as absent
fn nonzero_integer(field: &str, value: &Value) -> Option<i64> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed {
        Some(0) => None,
        Some(n) => Some(n),
        None => {
            debug!("Ignoring non-numeric {} value: {}", field, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_english_keys() {
        let fields = ExtractedFields::from_json(&json!({
            "zone": "Chamberí",
            "max_price": 950,
            "num_rooms": 1,
            "tags": ["terraza"]
        }))
        .unwrap();

        assert_eq!(fields.zone.as_deref(), Some("Chamberí"));
        assert_eq!(fields.max_price, Some(950));
        assert_eq!(fields.num_rooms, Some(1));
        assert_eq!(fields.tags, vec!["terraza".to_string()]);
    }

    #[test]
    fn test_spanish_keys_and_numeric_strings() {
        let fields = ExtractedFields::from_json(&json!({
            "zona": "Madrid Centro",
            "max_precio": "1200",
            "num_hab": 2.0,
            "etiquetas": ["luminoso", 3, "balcón"]
        }))
        .unwrap();

        assert_eq!(fields.zone.as_deref(), Some("Madrid Centro"));
        assert_eq!(fields.max_price, Some(1200));
        assert_eq!(fields.num_rooms, Some(2));
        assert_eq!(fields.tags, vec!["luminoso".to_string(), "balcón".to_string()]);
    }

    #[test]
    fn test_invalid_numbers_are_absent() {
        let fields = ExtractedFields::from_json(&json!({
            "zone": "   ",
            "max_price": "cheap",
            "num_rooms": 0,
            "tags": "luminoso"
        }))
        .unwrap();

        assert!(fields.is_empty());
    }

    #[test]
    fn test_negative_price_is_kept() {
        let fields = ExtractedFields::from_json(&json!({
            "max_price": -5,
            "num_rooms": -1
        }))
        .unwrap();

        assert_eq!(fields.max_price, Some(-5));
        assert_eq!(fields.num_rooms, None);
    }

    #[test]
    fn test_null_falls_through_to_alias() {
        let fields = ExtractedFields::from_json(&json!({
            "max_price": null,
            "max_precio": 800
        }))
        .unwrap();

        assert_eq!(fields.max_price, Some(800));
    }

    #[test]
    fn test_non_object_is_malformed() {
        let err = ExtractedFields::from_json(&json!(["zone", "Madrid"])).unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
    }
}
