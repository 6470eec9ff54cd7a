//! Save server core
//!
//! Request handling for the `save_server` binary, kept free of any socket
//! code so it can be tested directly:
//! - `POST /save` stores the body by player name, answers 200 with it
//! - `GET /save?name=<n>` answers the stored save or 404
//!
//! The latest accepted save is also written to a JSON file.

use crate::save::Save;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// HTTP-ish reply: status code and JSON body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    fn json(status: u16, body: String) -> Self {
        Self { status, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "detail": message }).to_string())
    }
}

#[derive(Debug, Default)]
pub struct SaveRegistry {
    saves: HashMap<String, Save>,
    /// Where the latest save is mirrored, if anywhere
    save_file: Option<PathBuf>,
}

impl SaveRegistry {
    pub fn new(save_file: Option<PathBuf>) -> Self {
        Self {
            saves: HashMap::new(),
            save_file,
        }
    }

    pub fn len(&self) -> usize {
        self.saves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saves.is_empty()
    }

    /// Route one request
    pub fn handle(&mut self, method: &str, url: &str, body: &str) -> Reply {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        if path != "/save" {
            return Reply::error(404, "not found");
        }
        match method {
            "POST" => self.post(body),
            "GET" => self.get(query),
            _ => Reply::error(405, "method not allowed"),
        }
    }

    fn post(&mut self, body: &str) -> Reply {
        let save = match Save::from_json(body) {
            Ok(save) => save,
            Err(e) => {
                warn!("Rejected save: {}", e);
                return Reply::error(422, &e.to_string());
            }
        };
        let json = match save.to_json() {
            Ok(json) => json,
            Err(e) => return Reply::error(500, &e.to_string()),
        };

        if let Some(path) = &self.save_file {
            if let Err(e) = std::fs::write(path, &json) {
                warn!("Could not write {}: {}", path.display(), e);
            }
        }
        info!("Stored save {}", save.pretty());
        self.saves.insert(save.name.clone(), save);
        Reply::json(200, json)
    }

    fn get(&self, query: &str) -> Reply {
        let name = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "name")
            .map(|(_, value)| urlencoding::decode(value).map(|v| v.into_owned()));

        let name = match name {
            Some(Ok(name)) => name,
            Some(Err(_)) => return Reply::error(422, "name is not valid UTF-8"),
            None => return Reply::error(422, "missing name"),
        };

        match self.saves.get(&name).map(Save::to_json) {
            Some(Ok(json)) => Reply::json(200, json),
            Some(Err(e)) => Reply::error(500, &e.to_string()),
            None => Reply::error(404, "save not found"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn body(name: &str, score: u32) -> String {
        Save {
            name: name.into(),
            score,
            level: 0,
            map: vec!["P".into()],
            created_at: "2024-05-01".into(),
        }
        .to_json()
        .unwrap()
    }

    #[test]
    fn test_post_then_get() {
        let mut registry = SaveRegistry::new(None);
        let reply = registry.handle("POST", "/save", &body("Player 1", 5));
        assert_eq!(reply.status, 200);
        assert_eq!(Save::from_json(&reply.body).unwrap().score, 5);

        let reply = registry.handle("GET", "/save?name=Player%201", "");
        assert_eq!(reply.status, 200);
        assert_eq!(Save::from_json(&reply.body).unwrap().name, "Player 1");
    }

    #[test]
    fn test_latest_save_wins() {
        let mut registry = SaveRegistry::new(None);
        registry.handle("POST", "/save", &body("a", 1));
        registry.handle("POST", "/save", &body("a", 9));
        assert_eq!(registry.len(), 1);
        let reply = registry.handle("GET", "/save?name=a", "");
        assert_eq!(Save::from_json(&reply.body).unwrap().score, 9);
    }

    #[test]
    fn test_errors() {
        let mut registry = SaveRegistry::new(None);
        assert_eq!(registry.handle("GET", "/save?name=ghost", "").status, 404);
        assert_eq!(registry.handle("GET", "/save", "").status, 422);
        assert_eq!(registry.handle("POST", "/save", "{\"name\":1}").status, 422);
        assert_eq!(registry.handle("DELETE", "/save", "").status, 405);
        assert_eq!(registry.handle("GET", "/other", "").status, 404);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_mirrors_latest_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        let mut registry = SaveRegistry::new(Some(path.clone()));
        registry.handle("POST", "/save", &body("b", 3));

        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(Save::from_json(&written).unwrap().score, 3);
    }
}
