//! Form payloads and their validation
//!
//! Every field arrives as an optional string, exactly as submitted, so the
//! handlers can echo the raw input back when validation fails.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use setlistify_common::db::NewSong;

/// Longest setlist name accepted, in characters, after trimming
pub const MAX_SETLIST_NAME_CHARS: usize = 100;

/// Parse an identifier field
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Parse the leading integer of a numeric form field
///
/// An optional sign followed by digits; anything after the digits is ignored,
/// so `"96.5"` is 96 and `"1e3"` is 1. Blank input, input without leading
/// digits, and values outside `i64` yield `None`.
pub fn parse_number(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let unsigned = raw.strip_prefix(&['+', '-'][..]).unwrap_or(raw);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }

    let sign_len = raw.len() - unsigned.len();
    raw[..sign_len + digits].parse().ok()
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Song create/update form
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SongForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub key: Option<String>,
    pub tempo: Option<String>,
    pub duration_minutes: Option<String>,
    pub duration_seconds: Option<String>,
}

impl SongForm {
    /// Validate for creation: a non-blank title is required
    pub fn validate_new(&self) -> Result<NewSong, ApiError> {
        let title = non_blank(&self.title)
            .ok_or_else(|| ApiError::validation("Song title is required", self.echo()))?;

        Ok(self.normalize(title))
    }

    /// Validate for update: both a numeric id and a non-blank title are required
    pub fn validate_update(&self) -> Result<(i64, NewSong), ApiError> {
        let id = non_blank(&self.id).and_then(parse_id);
        let title = non_blank(&self.title);

        match (id, title) {
            (Some(id), Some(title)) => Ok((id, self.normalize(title))),
            _ => Err(ApiError::validation("Song id and title are required", self.echo())),
        }
    }

    /// Zero tempo and zero duration are treated as unset
    fn normalize(&self, title: &str) -> NewSong {
        NewSong {
            title: title.to_string(),
            key: non_blank(&self.key).map(str::to_string),
            tempo: self.tempo.as_deref().and_then(parse_number).filter(|t| *t != 0),
            duration_seconds: self.total_seconds().filter(|d| *d != 0),
        }
    }

    /// `minutes * 60 + seconds`, either part optional
    ///
    /// A total that does not fit in `i64` is treated as unparsable.
    fn total_seconds(&self) -> Option<i64> {
        let minutes = self.duration_minutes.as_deref().and_then(parse_number);
        let seconds = self.duration_seconds.as_deref().and_then(parse_number);

        match (minutes, seconds) {
            (None, None) => None,
            (minutes, seconds) => minutes
                .unwrap_or(0)
                .checked_mul(60)?
                .checked_add(seconds.unwrap_or(0)),
        }
    }

    fn echo(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Setlist create form
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SetlistForm {
    pub name: Option<String>,
}

impl SetlistForm {
    /// Trimmed name, 1..=100 characters
    pub fn validate(&self) -> Result<String, ApiError> {
        let echo = || serde_json::json!({ "name": self.name.clone().unwrap_or_default() });

        let name = non_blank(&self.name)
            .ok_or_else(|| ApiError::validation("Setlist name is required", echo()))?;

        if name.chars().count() > MAX_SETLIST_NAME_CHARS {
            return Err(ApiError::validation(
                format!(
                    "Setlist name cannot be longer than {} characters",
                    MAX_SETLIST_NAME_CHARS
                ),
                echo(),
            ));
        }

        Ok(name.to_string())
    }
}

/// Form carrying a single entity id (delete actions)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdForm {
    pub id: Option<String>,
}

impl IdForm {
    pub fn parse(&self, what: &str) -> Result<i64, ApiError> {
        non_blank(&self.id)
            .and_then(parse_id)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid {} id", what)))
    }
}

/// Add/remove-song form on the setlist page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SongIdForm {
    #[serde(rename = "songId")]
    pub song_id: Option<String>,
}

impl SongIdForm {
    pub fn parse(&self) -> Result<i64, ApiError> {
        non_blank(&self.song_id)
            .and_then(parse_id)
            .ok_or_else(|| ApiError::BadRequest("Invalid song id".to_string()))
    }
}

/// Reorder form: `newOrder` holds a JSON array of song ids
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReorderForm {
    #[serde(rename = "newOrder")]
    pub new_order: Option<String>,
}

impl ReorderForm {
    /// Song ids in their new order
    ///
    /// Accepts numbers and numeric strings as array elements.
    pub fn parse(&self) -> Result<Vec<i64>, ApiError> {
        let raw = self
            .new_order
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("Missing new order data".to_string()))?;

        let value: Value = serde_json::from_str(raw)
            .map_err(|_| ApiError::BadRequest("Order data is not valid JSON".to_string()))?;

        let items = value
            .as_array()
            .ok_or_else(|| ApiError::BadRequest("Order data must be an array".to_string()))?;

        items
            .iter()
            .map(|item| {
                let id = match item {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => parse_id(s),
                    _ => None,
                };
                id.ok_or_else(|| {
                    ApiError::BadRequest(format!("Invalid song id in order: {}", item))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str) -> SongForm {
        SongForm {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_song_title_required() {
        let err = form("   ").validate_new().unwrap_err();

        match err {
            ApiError::Validation { input, .. } => assert_eq!(input["title"], "   "),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_song_fields_normalized() {
        let song = SongForm {
            title: Some("  Take Five ".to_string()),
            key: Some("  ".to_string()),
            tempo: Some("172.9".to_string()),
            duration_minutes: Some("5".to_string()),
            duration_seconds: Some("24".to_string()),
            ..Default::default()
        }
        .validate_new()
        .unwrap();

        assert_eq!(song.title, "Take Five");
        assert_eq!(song.key, None);
        assert_eq!(song.tempo, Some(172));
        assert_eq!(song.duration_seconds, Some(324));
    }

    #[test]
    fn test_duration_parts_optional() {
        let only_minutes = SongForm {
            duration_minutes: Some("3".to_string()),
            ..form("A")
        };
        let only_seconds = SongForm {
            duration_seconds: Some("45".to_string()),
            ..form("A")
        };
        let garbage = SongForm {
            tempo: Some("fast".to_string()),
            duration_minutes: Some("abc".to_string()),
            ..form("A")
        };

        assert_eq!(only_minutes.validate_new().unwrap().duration_seconds, Some(180));
        assert_eq!(only_seconds.validate_new().unwrap().duration_seconds, Some(45));

        let song = garbage.validate_new().unwrap();
        assert_eq!(song.tempo, None);
        assert_eq!(song.duration_seconds, None);
    }

    #[test]
    fn test_parse_number_reads_leading_integer() {
        assert_eq!(parse_number("120"), Some(120));
        assert_eq!(parse_number(" -7 "), Some(-7));
        assert_eq!(parse_number("96.5"), Some(96));
        assert_eq!(parse_number("1e18"), Some(1));
        assert_eq!(parse_number("12bpm"), Some(12));
        assert_eq!(parse_number("bpm12"), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("99999999999999999999"), None);
    }

    #[test]
    fn test_huge_duration_does_not_overflow() {
        let max_minutes = SongForm {
            duration_minutes: Some(i64::MAX.to_string()),
            ..form("A")
        };
        let overflowing_sum = SongForm {
            duration_minutes: Some((i64::MAX / 60).to_string()),
            duration_seconds: Some("60".to_string()),
            ..form("A")
        };
        let exponent = SongForm {
            duration_minutes: Some("1e18".to_string()),
            ..form("A")
        };

        assert_eq!(max_minutes.validate_new().unwrap().duration_seconds, None);
        assert_eq!(overflowing_sum.validate_new().unwrap().duration_seconds, None);
        assert_eq!(exponent.validate_new().unwrap().duration_seconds, Some(60));
    }

    #[test]
    fn test_zero_tempo_and_duration_are_unset() {
        let song = SongForm {
            tempo: Some("0".to_string()),
            duration_minutes: Some("0".to_string()),
            duration_seconds: Some("0".to_string()),
            ..form("Silence")
        }
        .validate_new()
        .unwrap();

        assert_eq!(song.tempo, None);
        assert_eq!(song.duration_seconds, None);
    }

    #[test]
    fn test_update_requires_id() {
        assert!(form("A").validate_update().is_err());

        let with_id = SongForm {
            id: Some("12".to_string()),
            ..form("A")
        };
        let (id, song) = with_id.validate_update().unwrap();
        assert_eq!(id, 12);
        assert_eq!(song.title, "A");
    }

    #[test]
    fn test_setlist_name_limits() {
        let exact = SetlistForm {
            name: Some(format!("  {}  ", "x".repeat(100))),
        };
        let too_long = SetlistForm {
            name: Some("x".repeat(101)),
        };
        let empty = SetlistForm {
            name: Some(" ".to_string()),
        };

        assert_eq!(exact.validate().unwrap().len(), 100);
        assert!(matches!(too_long.validate(), Err(ApiError::Validation { .. })));
        assert!(matches!(empty.validate(), Err(ApiError::Validation { .. })));
        assert!(SetlistForm { name: None }.validate().is_err());
    }

    #[test]
    fn test_setlist_name_counts_characters_not_bytes() {
        let form = SetlistForm {
            name: Some("ż".repeat(100)),
        };

        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_reorder_parse() {
        let parse = |raw: &str| {
            ReorderForm {
                new_order: Some(raw.to_string()),
            }
            .parse()
        };

        assert_eq!(parse("[3, \"1\", 2]").unwrap(), vec![3, 1, 2]);
        assert_eq!(parse("[]").unwrap(), Vec::<i64>::new());
        assert!(parse("{\"a\": 1}").is_err());
        assert!(parse("[1,").is_err());
        assert!(parse("[1, null]").is_err());
        assert!(ReorderForm { new_order: None }.parse().is_err());
    }
}
