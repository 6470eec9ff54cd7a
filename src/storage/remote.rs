//! Remote save endpoint client
//!
//! Blocking `ureq` calls with a bounded timeout. Run them off the frame
//! loop (see `async_ops`).

use super::StorageError;
use crate::save::Save;
use std::time::Duration;

/// Default endpoint, matching the bundled save server
pub const DEFAULT_SAVE_URL: &str = "http://localhost:8000/save";

#[derive(Clone)]
pub struct RemoteSave {
    url: String,
    agent: ureq::Agent,
}

impl std::fmt::Debug for RemoteSave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSave").field("url", &self.url).finish()
    }
}

impl RemoteSave {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            url: url.into(),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the save as JSON; anything but 200 is an error
    pub fn post(&self, save: &Save) -> Result<u16, StorageError> {
        let body = save.to_value()?;
        let response = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(convert_error)?;

        match response.status() {
            200 => Ok(200),
            other => Err(StorageError::HttpStatus(other)),
        }
    }

    /// GET the save stored under `name`
    pub fn fetch(&self, name: &str) -> Result<Save, StorageError> {
        let url = format!("{}?name={}", self.url, urlencoding::encode(name));
        let response = self.agent.get(&url).call().map_err(convert_error)?;
        let body = response.into_string()?;
        Ok(Save::from_json(&body)?)
    }
}

/// Convert ureq error to StorageError
fn convert_error(e: ureq::Error) -> StorageError {
    match e {
        ureq::Error::Status(404, _) => StorageError::NotFound("save not found".into()),
        ureq::Error::Status(code, _) => StorageError::HttpStatus(code),
        other => StorageError::Network(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::thread;

    /// One-shot local endpoint answering every request with `status`
    fn serve_once(status: u16) -> (String, thread::JoinHandle<String>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let handle = thread::spawn(move || {
            let mut request = server.recv().unwrap();
            let mut body = String::new();
            request.as_reader().read_to_string(&mut body).unwrap();
            let response = tiny_http::Response::from_string(body.clone()).with_status_code(status);
            request.respond(response).unwrap();
            body
        });
        (format!("http://127.0.0.1:{}/save", port), handle)
    }

    /// One-shot endpoint replying `body` with `status`; yields the request URL
    fn reply_once(status: u16, body: String) -> (String, thread::JoinHandle<String>) {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let handle = thread::spawn(move || {
            let request = server.recv().unwrap();
            let url = request.url().to_string();
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            request.respond(response).unwrap();
            url
        });
        (format!("http://127.0.0.1:{}/save", port), handle)
    }

    fn sample() -> Save {
        Save {
            name: "Player 1".into(),
            score: 2,
            level: 0,
            map: vec!["P".into()],
            created_at: "2024-05-01".into(),
        }
    }

    #[test]
    fn test_post_ok() {
        let (url, server) = serve_once(200);
        let remote = RemoteSave::new(url, Duration::from_secs(5));
        assert_eq!(remote.post(&sample()), Ok(200));

        let received = server.join().unwrap();
        assert_eq!(Save::from_json(&received).unwrap(), sample());
    }

    #[test]
    fn test_post_non_200() {
        let (url, server) = serve_once(201);
        let remote = RemoteSave::new(url, Duration::from_secs(5));
        assert_eq!(remote.post(&sample()), Err(StorageError::HttpStatus(201)));
        server.join().unwrap();

        let (url, server) = serve_once(500);
        let remote = RemoteSave::new(url, Duration::from_secs(5));
        assert_eq!(remote.post(&sample()), Err(StorageError::HttpStatus(500)));
        server.join().unwrap();
    }

    #[test]
    fn test_fetch_by_name() {
        let (url, server) = reply_once(200, sample().to_json().unwrap());
        let remote = RemoteSave::new(url, Duration::from_secs(5));
        assert_eq!(remote.fetch("Player 1"), Ok(sample()));
        assert_eq!(server.join().unwrap(), "/save?name=Player%201");
    }

    #[test]
    fn test_fetch_missing() {
        let (url, server) = reply_once(404, "not found".into());
        let remote = RemoteSave::new(url, Duration::from_secs(5));
        assert!(matches!(remote.fetch("nobody"), Err(StorageError::NotFound(_))));
        server.join().unwrap();
    }

    #[test]
    fn test_connection_refused() {
        let remote = RemoteSave::new("http://127.0.0.1:9/save", Duration::from_millis(200));
        assert!(matches!(remote.post(&sample()), Err(StorageError::Network(_))));
    }
}
