//! Private HTTP client for the tagplayer control server
//!
//! This crate provides a minimal blocking client for the plain `GET` routes
//! exposed by node-sonos-http-api style servers. It distinguishes failures
//! that never reached the server from responses the server rejected, since
//! callers react differently to the two.

mod error;

pub use error::HttpError;

use std::time::Duration;

/// Default connect timeout for control requests
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default read timeout for control requests
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// A successful (2xx) response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code returned by the server
    pub status: u16,
    /// Response body, if it could be read as text
    pub body: Option<String>,
}

/// A minimal HTTP client for control-server communication
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    /// Create a new client with the default timeouts
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT)
    }

    /// Create a new client with explicit connect and read timeouts
    pub fn with_timeouts(connect: Duration, read: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(connect)
                .timeout_read(read)
                .build(),
        }
    }

    /// Send a `GET` request to `url`
    ///
    /// Any 2xx status is a success. The body is optional: a response whose
    /// body cannot be read is still a success since the server accepted the
    /// request.
    pub fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        match self.agent.get(url).call() {
            Ok(response) => {
                let status = response.status();
                let body = read_body(response);

                if (200..300).contains(&status) {
                    Ok(HttpResponse { status, body })
                } else {
                    Err(HttpError::Status { code: status, body })
                }
            }
            Err(ureq::Error::Status(code, response)) => Err(HttpError::Status {
                code,
                body: read_body(response),
            }),
            Err(ureq::Error::Transport(transport)) => {
                Err(HttpError::Transport(transport.to_string()))
            }
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn read_body(response: ureq::Response) -> Option<String> {
    match response.into_string() {
        Ok(body) if !body.is_empty() => Some(body),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Failed to read response body: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_get_success_returns_body() {
        let mut server = Server::new();
        let mock = server
            .mock("GET", "/Bad/playpause")
            .with_status(200)
            .with_body(r#"{"status":"success"}"#)
            .create();

        let client = HttpClient::new();
        let response = client
            .get(&format!("{}/Bad/playpause", server.url()))
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body.as_deref(), Some(r#"{"status":"success"}"#));
        mock.assert();
    }

    #[test]
    fn test_get_empty_body_is_still_success() {
        let mut server = Server::new();
        let _mock = server.mock("GET", "/Bad/next").with_status(204).create();

        let response = HttpClient::new()
            .get(&format!("{}/Bad/next", server.url()))
            .unwrap();

        assert_eq!(response.status, 204);
        assert!(response.body.is_none());
    }

    #[test]
    fn test_get_server_error_is_status() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/Bad/next")
            .with_status(500)
            .with_body("boom")
            .create();

        let err = HttpClient::new()
            .get(&format!("{}/Bad/next", server.url()))
            .unwrap_err();

        match err {
            HttpError::Status { code, body } => {
                assert_eq!(code, 500);
                assert_eq!(body.as_deref(), Some("boom"));
            }
            other => panic!("Expected HttpError::Status, got {:?}", other),
        }
    }

    #[test]
    fn test_get_unreachable_host_is_transport() {
        // Port 1 on loopback is not listening in any sane test environment
        let client = HttpClient::with_timeouts(Duration::from_secs(1), Duration::from_secs(1));
        let err = client.get("http://127.0.0.1:1/Bad/next").unwrap_err();

        assert!(err.is_transport(), "expected transport error, got {:?}", err);
    }

    #[test]
    fn test_client_default() {
        let _client = HttpClient::default();
    }
}
