//! Save Record
//!
//! Progress snapshot shared by the local store, the remote endpoint and the
//! save server. The JSON form has exactly five keys: `name`, `score`,
//! `level`, `map` and `created_at`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key the current save lives under in a key/value store
pub const CURRENT_SAVE_KEY: &str = "current_save";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("invalid save JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Save {
    pub name: String,
    pub score: u32,
    pub level: u32,
    /// Layout rows the level was built from
    pub map: Vec<String>,
    pub created_at: String,
}

impl Save {
    /// A fresh save stamped with today's date
    pub fn new(name: impl Into<String>, level: u32, map: Vec<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            level,
            map,
            created_at: today(),
        }
    }

    /// One-line summary for logs and listings
    pub fn pretty(&self) -> String {
        format!("{} {} {}", self.name, self.score, self.level)
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, SaveError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, SaveError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Local date as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(map: Vec<String>) -> Save {
        Save {
            name: "Player 1".to_string(),
            score: 7,
            level: 2,
            map,
            created_at: "2024-05-01".to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        let save = sample(vec!["X X".into(), "XPX".into(), "XXX".into()]);
        let json = save.to_json().unwrap();
        assert_eq!(Save::from_json(&json).unwrap(), save);

        let empty = sample(Vec::new());
        assert_eq!(Save::from_json(&empty.to_json().unwrap()).unwrap(), empty);

        let blank_rows = sample(vec![String::new(), "   ".into()]);
        assert_eq!(Save::from_value(blank_rows.to_value().unwrap()).unwrap(), blank_rows);
    }

    #[test]
    fn test_exactly_five_keys() {
        let value = sample(Vec::new()).to_value().unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["created_at", "level", "map", "name", "score"]);
    }

    #[test]
    fn test_rejects_missing_and_extra_keys() {
        assert!(Save::from_json(r#"{"name":"a","score":1,"level":0,"map":[]}"#).is_err());
        let extra = r#"{"name":"a","score":1,"level":0,"map":[],"created_at":"x","hp":3}"#;
        assert!(Save::from_json(extra).is_err());
    }

    #[test]
    fn test_new_is_dated() {
        let save = Save::new("Ana", 0, vec!["P".into()]);
        assert_eq!(save.score, 0);
        assert_eq!(save.created_at.len(), 10);
        assert_eq!(save.pretty(), "Ana 0 0");
    }
}
