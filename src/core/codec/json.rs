use serde_json::{
    Map,
    Value,
};

use crate::core::{
    models::{
        CanonicalResult,
        ConsonantCounts,
    },
    AnalyzerError,
};

// The .NET service serializes with PascalCase names.
const SLOW_BIKE_COUNT_KEYS: [&str; 2] = ["slowBikeCount", "SlowBikeCount"];
const CONSONANT_COUNTS_KEYS: [&str; 2] = ["consonantCounts", "ConsonantCounts"];

pub(super) fn decode(value: &Value) -> Result<CanonicalResult, AnalyzerError> {
    let object = value
        .as_object()
        .ok_or_else(|| AnalyzerError::malformed("JSON response is not an object"))?;

    let slow_bike_count = lookup(object, &SLOW_BIKE_COUNT_KEYS).map(count_value).unwrap_or(0);

    let consonant_counts = match lookup(object, &CONSONANT_COUNTS_KEYS).and_then(Value::as_object)
    {
        Some(map) => {
            map.iter().map(|(letter, count)| (letter.as_str(), count_value(count))).collect()
        }
        None => ConsonantCounts::new(),
    };

    Ok(CanonicalResult { slow_bike_count, consonant_counts })
}

fn lookup<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| object.get(*key))
}

fn count_value(value: &Value) -> u64 {
    match value {
        Value::Number(number) => number.as_u64().unwrap_or(0),
        Value::String(text) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let result = decode(&json!({})).unwrap();
        assert_eq!(result, CanonicalResult::default());

        let result = decode(&json!({ "slowBikeCount": 3 })).unwrap();
        assert_eq!(result.slow_bike_count, 3);
        assert!(result.consonant_counts.is_empty());
    }

    #[test]
    fn test_pascal_case_keys() {
        let result =
            decode(&json!({ "SlowBikeCount": 1, "ConsonantCounts": { "b": 2, "k": 1 } })).unwrap();
        assert_eq!(result.slow_bike_count, 1);
        assert_eq!(result.consonant_counts.get("b"), Some(2));
        assert_eq!(result.consonant_counts.get("k"), Some(1));
    }

    #[test]
    fn test_non_numeric_values_count_as_zero() {
        let result = decode(&json!({
            "slowBikeCount": "7",
            "consonantCounts": { "s": -1, "t": "x", "r": 2.5, "n": null }
        }))
        .unwrap();

        assert_eq!(result.slow_bike_count, 7);
        let counts: Vec<u64> = result.consonant_counts.iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_non_object_root_is_malformed() {
        assert!(matches!(decode(&json!([1, 2])), Err(AnalyzerError::MalformedPayload(_))));
        assert!(matches!(decode(&json!("text")), Err(AnalyzerError::MalformedPayload(_))));
    }
}
