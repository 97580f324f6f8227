//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry logic (max 3 retries)
//! - Rate limit error handling
//! - Optional HTTP basic credentials per package source

use crate::error::RegistryError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("nuscan/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// HTTP basic credentials for an authenticated feed
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep secrets out of debug logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
    credentials: Option<Credentials>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error(
                    "",
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
            credentials: None,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Attach basic credentials to every request (builder pattern)
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Perform a GET request with retry logic and error context
    ///
    /// Returns `Ok(None)` for HTTP 404 so callers decide whether a missing
    /// resource is an error.
    pub async fn get_with_context(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<Option<reqwest::Response>, RegistryError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            debug!("GET {} (attempt {})", url, attempt + 1);

            let mut request = self.client.get(url);
            if let Some(credentials) = &self.credentials {
                request = request.basic_auth(&credentials.username, Some(&credentials.password));
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(RegistryError::rate_limit_exceeded(registry));

                        if attempt < self.max_retries {
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay *= 2;
                            continue;
                        }
                        break;
                    }

                    if status == StatusCode::NOT_FOUND {
                        return Ok(None);
                    }

                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        return Err(RegistryError::AuthenticationError {
                            registry: registry.to_string(),
                            message: format!("HTTP {}", status),
                        });
                    }

                    if !status.is_success() {
                        return Err(RegistryError::network_error(
                            package,
                            registry,
                            format!("HTTP {}", status),
                        ));
                    }

                    return Ok(Some(response));
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error = Some(RegistryError::timeout(package, registry));
                    } else {
                        last_error = Some(RegistryError::network_error(
                            package,
                            registry,
                            e.to_string(),
                        ));
                    }

                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| RegistryError::network_error(package, registry, "unknown error")))
    }

    /// Perform a GET request and parse the JSON body, `None` on HTTP 404
    pub async fn get_json_optional<T: DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<Option<T>, RegistryError> {
        let Some(response) = self.get_with_context(url, package, registry).await? else {
            return Ok(None);
        };

        response.json::<T>().await.map(Some).map_err(|e| {
            RegistryError::invalid_response(
                package,
                registry,
                format!("failed to parse JSON from {}: {}", url, e),
            )
        })
    }

    /// Perform a GET request and parse the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        self.get_json_optional(url, package, registry)
            .await?
            .ok_or_else(|| {
                RegistryError::invalid_response(
                    package,
                    registry,
                    format!("{} returned HTTP 404", url),
                )
            })
    }
}
