use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a timestamp, mapping null, unparsable strings and Go's zero time
/// (`0001-01-01T00:00:00Z`) to `None`.
pub fn lenient_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(parse_time))
}

pub fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
        .filter(|t| t.year() > 1)
}

/// Treat an explicit `null` like a missing field
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Stamp {
        #[serde(default, deserialize_with = "lenient_time")]
        at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "null_default")]
        tags: Vec<String>,
    }

    fn stamp(json: &str) -> Stamp {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_time() {
        let s = stamp(r#"{"at": "2024-05-02T08:30:00+02:00"}"#);
        assert_eq!(s.at.unwrap().to_rfc3339(), "2024-05-02T06:30:00+00:00");
    }

    #[test]
    fn test_degenerate_times() {
        assert!(stamp(r#"{"at": "0001-01-01T00:00:00Z"}"#).at.is_none());
        assert!(stamp(r#"{"at": null}"#).at.is_none());
        assert!(stamp(r#"{"at": "yesterday"}"#).at.is_none());
        assert!(stamp(r#"{"at": 12}"#).at.is_none());
        assert!(stamp(r#"{}"#).at.is_none());
    }

    #[test]
    fn test_null_default() {
        assert!(stamp(r#"{"tags": null}"#).tags.is_empty());
        assert_eq!(stamp(r#"{"tags": ["a"]}"#).tags, vec!["a"]);
    }
}
