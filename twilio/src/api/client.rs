use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::common::{ApiErrorResponse, Form};
use super::error::ApiError;

/// Twilio product APIs, each served from its own host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Accounts,
    Api,
    Autopilot,
    Chat,
    Conversations,
    FlexApi,
    Proxy,
    Serverless,
    TaskRouter,
    Trunking,
    Video,
}

impl Product {
    fn subdomain(self) -> &'static str {
        match self {
            Product::Accounts => "accounts",
            Product::Api => "api",
            Product::Autopilot => "autopilot",
            Product::Chat => "chat",
            Product::Conversations => "conversations",
            Product::FlexApi => "flex-api",
            Product::Proxy => "proxy",
            Product::Serverless => "serverless",
            Product::TaskRouter => "taskrouter",
            Product::Trunking => "trunking",
            Product::Video => "video",
        }
    }

    pub fn default_base_url(self) -> String {
        format!("https://{}.twilio.com", self.subdomain())
    }
}

/// Basic auth pair sent with every request
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Account SID and auth token
    AuthToken { account_sid: String, auth_token: String },
    /// API key SID and secret, acting on behalf of `account_sid`
    ApiKey {
        account_sid: String,
        key_sid: String,
        secret: String,
    },
}

impl Credentials {
    pub fn account_sid(&self) -> &str {
        match self {
            Credentials::AuthToken { account_sid, .. } => account_sid,
            Credentials::ApiKey { account_sid, .. } => account_sid,
        }
    }

    fn basic_auth(&self) -> (&str, &str) {
        match self {
            Credentials::AuthToken {
                account_sid,
                auth_token,
            } => (account_sid, auth_token),
            Credentials::ApiKey {
                key_sid, secret, ..
            } => (key_sid, secret),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::AuthToken { account_sid, .. } => f
                .debug_struct("AuthToken")
                .field("account_sid", account_sid)
                .finish_non_exhaustive(),
            Credentials::ApiKey {
                account_sid,
                key_sid,
                ..
            } => f
                .debug_struct("ApiKey")
                .field("account_sid", account_sid)
                .field("key_sid", key_sid)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub timeout_seconds: u64,
}

impl RetryConfig {
    /// Delay before retry `attempt` (1-based), doubling from the initial
    /// backoff and capped at `max_backoff_ms`
    pub fn backoff(&self, attempt: u32) -> u64 {
        2_u64
            .checked_pow(attempt.saturating_sub(1))
            .and_then(|factor| self.initial_backoff_ms.checked_mul(factor))
            .map_or(self.max_backoff_ms, |backoff| backoff.min(self.max_backoff_ms))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 4,
            initial_backoff_ms: 100,
            max_backoff_ms: 10000,
            timeout_seconds: 30,
        }
    }
}

/// Twilio REST client shared by every resource
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    credentials: Credentials,
    /// Routes every product to one server instead of the product hosts
    base_url: Option<String>,
    retry_config: RetryConfig,
}

impl Client {
    /// Create a new API client with default retry configuration
    pub fn new(credentials: Credentials) -> Result<Self, ApiError> {
        Self::with_config(credentials, None, RetryConfig::default())
    }

    /// Create a new API client with custom retry configuration and an
    /// optional base URL override
    pub fn with_config(
        credentials: Credentials,
        base_url: Option<String>,
        retry_config: RetryConfig,
    ) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(retry_config.timeout_seconds))
            .user_agent(concat!("terraform-provider-twilio/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                credentials,
                base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
                retry_config,
            }),
        })
    }

    /// Account the credentials act on
    pub fn account_sid(&self) -> &str {
        self.inner.credentials.account_sid()
    }

    pub fn base_url(&self, product: Product) -> String {
        match &self.inner.base_url {
            Some(url) => url.clone(),
            None => product.default_base_url(),
        }
    }

    /// Absolute URL for a path, or for a page link which may already be absolute
    pub fn url(&self, product: Product, path: &str) -> String {
        match url::Url::parse(path) {
            Ok(absolute) => match &self.inner.base_url {
                Some(base) => format!("{}{}", base, &absolute[url::Position::BeforePath..]),
                None => absolute.into(),
            },
            Err(_) => format!("{}{}", self.base_url(product), path),
        }
    }

    /// Execute a GET request with retry logic
    pub async fn get<T: DeserializeOwned>(&self, product: Product, path: &str) -> Result<T, ApiError> {
        self.get_url(&self.url(product, path)).await
    }

    /// Execute a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        product: Product,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(product, path);
        self.execute_with_retry(
            || async {
                tracing::debug!("GET request to: {} {:?}", url, query);

                self.authorized(self.inner.http_client.get(&url))
                    .query(query)
                    .send()
                    .await
            },
            &url,
        )
        .await
    }

    /// GET an absolute URL, as handed out by page links
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.execute_with_retry(
            || async {
                tracing::debug!("GET request to: {}", url);

                self.authorized(self.inner.http_client.get(url)).send().await
            },
            url,
        )
        .await
    }

    /// Execute a form-encoded POST request with retry logic
    pub async fn post<T: DeserializeOwned>(
        &self,
        product: Product,
        path: &str,
        form: &Form,
    ) -> Result<T, ApiError> {
        let url = self.url(product, path);
        self.execute_with_retry(
            || async {
                tracing::debug!("POST request to: {} fields {:?}", url, form.keys());

                self.authorized(self.inner.http_client.post(&url))
                    .form(form.fields())
                    .send()
                    .await
            },
            &url,
        )
        .await
    }

    /// Execute a DELETE request with retry logic
    pub async fn delete(&self, product: Product, path: &str) -> Result<(), ApiError> {
        let url = self.url(product, path);
        self.execute_with_retry::<_, _, serde::de::IgnoredAny>(
            || async {
                tracing::debug!("DELETE request to: {}", url);

                self.authorized(self.inner.http_client.delete(&url))
                    .send()
                    .await
            },
            &url,
        )
        .await
        .map(|_| ())
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let (username, password) = self.inner.credentials.basic_auth();
        builder.basic_auth(username, Some(password))
    }

    /// Execute request with retry logic
    async fn execute_with_retry<F, Fut, T>(&self, request_fn: F, url: &str) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
        T: DeserializeOwned,
    {
        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.inner.retry_config.max_retries {
            if attempt > 0 {
                let backoff = self.inner.retry_config.backoff(attempt);
                tracing::debug!(
                    "Retrying request to {} after {}ms (attempt {})",
                    url,
                    backoff,
                    attempt
                );
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }

            match request_fn().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        return self.parse_success_response(response).await;
                    }

                    if status == reqwest::StatusCode::UNAUTHORIZED {
                        return Err(ApiError::AuthError);
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(ApiError::RateLimited);
                    } else if status.is_server_error() {
                        last_error = Some(self.error_from_response(response).await);
                    } else {
                        return Err(self.error_from_response(response).await);
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        last_error =
                            Some(ApiError::Timeout(self.inner.retry_config.timeout_seconds));
                    } else if e.is_connect() {
                        last_error = Some(ApiError::ServiceUnavailable);
                    } else {
                        return Err(ApiError::RequestError(e));
                    }
                }
            }

            attempt += 1;
        }

        Err(last_error.unwrap_or(ApiError::ServiceUnavailable))
    }

    /// Parse successful response; an empty body (204) decodes as JSON null
    async fn parse_success_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let text = response.text().await?;
        tracing::trace!("API response body: {}", text);

        let body = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str::<T>(body).map_err(|e| {
            tracing::error!("Failed to deserialize response: {}, body: {}", e, text);
            ApiError::ParseError(format!("Failed to parse response: {}", e))
        })
    }

    /// Turns an error response into `ApiError::ApiError`, keeping Twilio's
    /// error code when the body carries one
    async fn error_from_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        match serde_json::from_str::<ApiErrorResponse>(&text) {
            Ok(body) => ApiError::ApiError {
                status,
                code: body.code,
                message: body.message.unwrap_or(text),
                more_info: body.more_info,
            },
            Err(_) => ApiError::ApiError {
                status,
                code: None,
                message: text,
                more_info: None,
            },
        }
    }
}
