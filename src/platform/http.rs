//! Safe wrapper over HTTP fetching
//!
//! [`Fetcher`] wraps an HTTP client and converts transport failures into
//! classified failures. Transport errors narrow into sub-kinds by their
//! flags: an elapsed deadline is the abort kind, a refused connection the
//! not-allowed kind, anything else keeps the plain platform kind. A
//! non-success status is still a settled success here; only transport
//! failure lands in the failure channel.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::deferred::{defer, AsyncOutcome};
use crate::error::Classified;
use crate::outcome::Outcome;

/// Configuration for the HTTP fetch wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total deadline for a request, from send to the end of the body.
    /// Default: 30 seconds
    pub timeout: Duration,

    /// Deadline for establishing the connection.
    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// Value sent as the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

impl HttpConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection deadline.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Builds a client honoring this configuration.
    pub fn build_client(&self) -> Outcome<Client, Classified> {
        let built = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.clone())
            .build();
        match built {
            Ok(client) => Outcome::Success(client),
            Err(err) => Outcome::Failure(Classified::new(err)),
        }
    }
}

/// HTTP fetch wrapper holding a configured client.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds a fetcher from a configuration.
    pub fn with_config(config: &HttpConfig) -> Outcome<Self, Classified> {
        config.build_client().map_ok(|client| Self { client })
    }

    /// Wraps an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a URL, settling to the response or a classified transport
    /// failure.
    pub fn fetch(&self, url: Url) -> AsyncOutcome<Response, Classified> {
        let request = self.client.get(url);
        AsyncOutcome::from_try_future(async move {
            request.send().await.map_err(|err| {
                let classified = Classified::new(err);
                debug!(kind = classified.kind().as_str(), "fetch transport failure");
                classified
            })
        })
    }

    /// Fetches a URL and decodes the response body as JSON. Body and decode
    /// failures join the failure channel with their own classification.
    pub fn fetch_json<T>(&self, url: Url) -> AsyncOutcome<T, Classified>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.fetch(url).and_then(|response| {
            AsyncOutcome::from_try_future(async move {
                response.json::<T>().await.map_err(Classified::new)
            })
        })
    }
}

/// Fetches a URL with a default-configured client.
pub fn fetch(url: Url) -> AsyncOutcome<Response, Classified> {
    match Fetcher::with_config(&HttpConfig::default()) {
        Outcome::Success(fetcher) => fetcher.fetch(url),
        Outcome::Failure(error) => defer(Outcome::Failure(error)),
    }
}
