use herald_core::{
    DispatcherConfig, HttpMethod, NotificationError, NotificationRequest, NotificationResult,
    classify_status,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, error, instrument, warn};

/// Sends validated notifications over HTTP.
///
/// Each dispatcher owns its timeout configuration and the `reqwest::Client`
/// built from it. Changing a timeout rebuilds the client, so the new value
/// governs every later request. Sending only needs `&self`; reconfiguring
/// needs `&mut self`.
pub struct NotificationDispatcher {
    config: DispatcherConfig,
    client: Client,
}

impl NotificationDispatcher {
    /// Create a dispatcher from optional timeouts, in milliseconds.
    ///
    /// Absent or zero values fall back to the defaults (10 000 ms to connect,
    /// 60 000 ms per socket read).
    pub fn new(
        connection_timeout_ms: Option<u64>,
        socket_timeout_ms: Option<u64>,
    ) -> Result<Self, NotificationError> {
        Self::from_config(DispatcherConfig::new(
            connection_timeout_ms,
            socket_timeout_ms,
        ))
    }

    /// Create a dispatcher from a full configuration.
    pub fn from_config(config: DispatcherConfig) -> Result<Self, NotificationError> {
        let config = config.normalized();
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Current connection timeout in milliseconds.
    pub fn connection_timeout_ms(&self) -> u64 {
        self.config.connection_timeout_ms
    }

    /// Current socket timeout in milliseconds.
    pub fn socket_timeout_ms(&self) -> u64 {
        self.config.socket_timeout_ms
    }

    /// Configured attempt budget. Notifications are still sent once.
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }

    /// Change the connection timeout. Zero selects the default.
    ///
    /// On error the previous configuration stays in effect.
    pub fn set_connection_timeout(&mut self, ms: u64) -> Result<(), NotificationError> {
        let config = self.config.clone().with_connection_timeout_ms(ms);
        self.reconfigure(config)
    }

    /// Change the socket timeout. Zero selects the default.
    ///
    /// On error the previous configuration stays in effect.
    pub fn set_socket_timeout(&mut self, ms: u64) -> Result<(), NotificationError> {
        let config = self.config.clone().with_socket_timeout_ms(ms);
        self.reconfigure(config)
    }

    fn reconfigure(&mut self, config: DispatcherConfig) -> Result<(), NotificationError> {
        let client = build_client(&config)?;
        debug!(
            connection_timeout_ms = config.connection_timeout_ms,
            socket_timeout_ms = config.socket_timeout_ms,
            "applied dispatcher timeouts"
        );
        self.config = config;
        self.client = client;
        Ok(())
    }

    /// Validate and send a notification.
    ///
    /// Returns `Ok(true)` when the endpoint answers below 300 and `Ok(false)`
    /// when no response could be obtained (refused connection, timeout, DNS
    /// failure). Invalid input and 3xx/4xx/5xx responses are errors. An
    /// absent argument is passed as an empty string.
    ///
    /// The returned future performs exactly one request and resolves once it
    /// has completed; nothing keeps running in the background. Callers
    /// outside an async context can drive it with a runtime's `block_on`.
    pub async fn send(
        &self,
        url: &str,
        method: &str,
        content_type: &str,
        body: &str,
    ) -> Result<bool, NotificationError> {
        let request = NotificationRequest::parse(url, method, content_type, body)?;
        let result = self.dispatch(&request).await?;
        Ok(result.success)
    }

    /// Send an already validated notification and classify the response.
    #[instrument(
        skip(self, request),
        fields(
            method = %request.method(),
            content_type = %request.content_type(),
            url = %request.url(),
        )
    )]
    pub async fn dispatch(
        &self,
        request: &NotificationRequest,
    ) -> Result<NotificationResult, NotificationError> {
        debug!(body_len = request.body().len(), "dispatching notification");

        let response = match self.build_request(request).send().await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    error = %e,
                    timed_out = e.is_timeout(),
                    connect_failed = e.is_connect(),
                    "failed to deliver notification"
                );
                return Ok(NotificationResult::undelivered());
            }
        };

        let status = response.status();

        // Drain the body so a stalled response counts as undelivered.
        if let Err(e) = response.bytes().await {
            error!(
                error = %e,
                status = status.as_u16(),
                timed_out = e.is_timeout(),
                "failed to read notification response"
            );
            return Ok(NotificationResult::undelivered());
        }

        let text = status.canonical_reason().unwrap_or_default();
        match classify_status(status.as_u16(), text) {
            Ok(result) => {
                debug!(status = status.as_u16(), "notification delivered");
                Ok(result)
            }
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "endpoint rejected notification");
                Err(e)
            }
        }
    }

    fn build_request(&self, request: &NotificationRequest) -> RequestBuilder {
        let url = request.url().clone();
        let builder = match request.method() {
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
        };
        builder
            .header(CONTENT_TYPE, request.content_type().mime())
            .body(request.body().to_owned())
    }
}

fn build_client(config: &DispatcherConfig) -> Result<Client, NotificationError> {
    let redirect = if config.follow_redirects {
        reqwest::redirect::Policy::default()
    } else {
        reqwest::redirect::Policy::none()
    };

    Client::builder()
        .connect_timeout(config.connection_timeout())
        .read_timeout(config.socket_timeout())
        .redirect(redirect)
        .build()
        .map_err(|e| NotificationError::HttpClient(e.to_string()))
}
