//! Accessors over a decoded `application/x-www-form-urlencoded` body.
//!
//! Bodies are kept as ordered key/value pairs so that repeated keys (a
//! multi-select such as `genres`) survive decoding.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::utils::error::AppError;

const NAIVE_TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

const CHECKED_VALUES: [&str; 5] = ["y", "yes", "true", "on", "1"];

#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl FormData {
    fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
    }

    /// A trimmed, non-empty value.
    pub fn required(&self, key: &str) -> Result<String, AppError> {
        match self.first(key) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(AppError::ValidationError(format!("'{}' is required", key))),
        }
    }

    /// Blank and missing values both read as `None`.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.first(key)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn all(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Checkbox semantics: unchecked boxes are simply absent from the body.
    pub fn flag(&self, key: &str) -> bool {
        self.first(key)
            .map(|value| {
                CHECKED_VALUES
                    .iter()
                    .any(|checked| value.eq_ignore_ascii_case(checked))
            })
            .unwrap_or(false)
    }

    pub fn id(&self, key: &str) -> Result<i32, AppError> {
        let raw = self.required(key)?;
        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(AppError::ValidationError(format!(
                "'{}' must be a positive integer, got '{}'",
                key, raw
            ))),
        }
    }

    pub fn timestamp(&self, key: &str) -> Result<DateTime<Utc>, AppError> {
        let raw = self.required(key)?;
        parse_timestamp(&raw).ok_or_else(|| {
            AppError::ValidationError(format!("'{}' is not a valid date and time: '{}'", key, raw))
        })
    }
}

/// RFC 3339, or a naive date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_required_rejects_blank() {
        let data = form(&[("name", "   ")]);
        assert!(matches!(
            data.required("name"),
            Err(AppError::ValidationError(_))
        ));
        assert!(data.required("city").is_err());
    }

    #[test]
    fn test_required_trims() {
        let data = form(&[("name", "  The Musical Hop ")]);
        assert_eq!(data.required("name").unwrap(), "The Musical Hop");
    }

    #[test]
    fn test_optional_blank_is_none() {
        let data = form(&[("phone", ""), ("website", "https://example.com")]);
        assert_eq!(data.optional("phone"), None);
        assert_eq!(data.optional("missing"), None);
        assert_eq!(
            data.optional("website").as_deref(),
            Some("https://example.com")
        );
    }

    #[test]
    fn test_repeated_keys_collect() {
        let data = form(&[("genres", "Jazz"), ("name", "x"), ("genres", "Folk"), ("genres", "")]);
        assert_eq!(data.all("genres"), vec!["Jazz", "Folk"]);
    }

    #[test]
    fn test_flag_values() {
        assert!(form(&[("seeking_talent", "y")]).flag("seeking_talent"));
        assert!(form(&[("seeking_talent", "On")]).flag("seeking_talent"));
        assert!(!form(&[("seeking_talent", "no")]).flag("seeking_talent"));
        assert!(!form(&[]).flag("seeking_talent"));
    }

    #[test]
    fn test_id_must_be_positive_integer() {
        assert_eq!(form(&[("artist_id", "4")]).id("artist_id").unwrap(), 4);
        assert!(form(&[("artist_id", "0")]).id("artist_id").is_err());
        assert!(form(&[("artist_id", "four")]).id("artist_id").is_err());
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2035-04-01 20:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2035-04-01T20:00"), Some(expected));
        assert_eq!(parse_timestamp("2035-04-01T20:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2035-04-01T22:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("next tuesday"), None);
    }
}
