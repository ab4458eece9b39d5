use http_client::HttpClient;

use crate::{ControlRequest, ControllerConfig, Result};

/// Successful response from the control server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlResponse {
    pub status: u16,
    pub body: Option<String>,
}

/// Anything that can deliver a control request
///
/// `ControlClient` is the production implementation. Dispatchers only see
/// this trait, which keeps them testable without a server.
pub trait ControlTransport: Send + Sync {
    /// Send one request and wait for the result
    fn send(&self, request: &ControlRequest) -> Result<ControlResponse>;
}

/// A client for executing control requests against a control server
///
/// Bridges the typed `ControlRequest` and the private http-client crate.
///
/// ```rust,no_run
/// use tagplayer_api::{Command, ControlClient, ControlRequest, ControlTransport, ControllerConfig, Room};
///
/// let client = ControlClient::new(ControllerConfig::default());
/// let request = ControlRequest::command(Room::new("Bad")?, Command::Next, 3);
/// let response = client.send(&request)?;
/// println!("HTTP {}", response.status);
/// # Ok::<(), tagplayer_api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ControlClient {
    http: HttpClient,
    config: ControllerConfig,
}

impl ControlClient {
    /// Create a client using the configured timeouts
    pub fn new(config: ControllerConfig) -> Self {
        let http = HttpClient::with_timeouts(config.connect_timeout(), config.read_timeout());
        Self { http, config }
    }

    /// Create a client with a custom HTTP client
    pub fn with_http_client(http: HttpClient, config: ControllerConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

impl ControlTransport for ControlClient {
    fn send(&self, request: &ControlRequest) -> Result<ControlResponse> {
        let url = request.url(&self.config);
        let response = self.http.get(&url)?;

        Ok(ControlResponse {
            status: response.status,
            body: response.body,
        })
    }
}
