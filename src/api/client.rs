//! HTTP transport for the Content Management API
//!
//! Wraps a `reqwest::Client` with bearer authentication, the CMA content
//! type, optional retry on rate limiting and server errors, and the single
//! error handler that turns failed responses into [`ApiError`]s.

use super::error::{ApiError, ApiErrorResponse, Result};
use super::query::Query;
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default API host
pub const DEFAULT_HOST: &str = "api.contentful.com";

/// Media type of every request body
pub const CMA_CONTENT_TYPE: &str = "application/vnd.contentful.management.v1+json";

/// User agent for API requests
const USER_AGENT: &str = concat!("cma-client/", env!("CARGO_PKG_VERSION"));

pub(crate) const VERSION_HEADER: &str = "X-Contentful-Version";
pub(crate) const TEAM_HEADER: &str = "x-contentful-team";
pub(crate) const ALPHA_FEATURE_HEADER: &str = "x-contentful-enable-alpha-feature";
const REQUEST_ID_HEADER: &str = "x-contentful-request-id";
const RATE_LIMIT_RESET_HEADER: &str = "x-contentful-ratelimit-reset";

/// Upper bound for a single retry wait
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Extra headers attached to a single request
pub(crate) type Headers<'a> = &'a [(&'static str, String)];

/// Connection settings used by [`crate::create_client`]
#[derive(Clone)]
pub struct ClientParams {
    /// Management API access token
    pub access_token: String,
    /// Host name, or a full base URL when it contains a scheme
    pub host: String,
    /// Use plain HTTP for a bare host name
    pub insecure: bool,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry on 429 and 5xx responses
    pub retry_on_error: bool,
    /// Maximum number of retries per request
    pub retry_limit: u32,
    /// Base wait between retries, doubled after every attempt
    pub retry_delay: Duration,
    /// Application name appended to the user agent
    pub application: Option<String>,
}

impl ClientParams {
    /// Params for the default host with the given token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            host: DEFAULT_HOST.to_string(),
            insecure: false,
            timeout: Duration::from_secs(30),
            retry_on_error: true,
            retry_limit: 5,
            retry_delay: Duration::from_millis(500),
            application: None,
        }
    }

    /// Overrides the host (or full base URL)
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_retry(mut self, retry_on_error: bool, retry_limit: u32) -> Self {
        self.retry_on_error = retry_on_error;
        self.retry_limit = retry_limit;
        self
    }

    pub fn with_application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(application.into());
        self
    }

    /// Resolves the base URL every request path is joined onto
    pub fn base_url(&self) -> Result<Url> {
        let raw = if self.host.contains("://") {
            self.host.clone()
        } else {
            let scheme = if self.insecure { "http" } else { "https" };
            format!("{}://{}", scheme, self.host)
        };
        let with_slash = if raw.ends_with('/') { raw } else { format!("{}/", raw) };
        Url::parse(&with_slash).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", with_slash, e)))
    }

    fn user_agent(&self) -> String {
        match &self.application {
            Some(app) => format!("{} app/{}", USER_AGENT, app),
            None => USER_AGENT.to_string(),
        }
    }
}

impl fmt::Debug for ClientParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientParams")
            .field("access_token", &mask_token(&self.access_token))
            .field("host", &self.host)
            .field("insecure", &self.insecure)
            .field("timeout", &self.timeout)
            .field("retry_on_error", &self.retry_on_error)
            .field("retry_limit", &self.retry_limit)
            .field("application", &self.application)
            .finish()
    }
}

struct Inner {
    http_client: Client,
    base_url: Url,
    access_token: String,
    retry_on_error: bool,
    retry_limit: u32,
    retry_delay: Duration,
}

/// Shared, cheaply clonable handle every wrapped entity keeps
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<Inner>,
}

impl HttpClient {
    /// Builds the underlying `reqwest::Client` from `params`
    pub fn new(params: &ClientParams) -> Result<Self> {
        let base_url = params.base_url()?;
        let http_client = Client::builder()
            .timeout(params.timeout)
            .user_agent(params.user_agent())
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            inner: Arc::new(Inner {
                http_client,
                base_url,
                access_token: params.access_token.clone(),
                retry_on_error: params.retry_on_error,
                retry_limit: params.retry_limit,
                retry_delay: params.retry_delay,
            }),
        })
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Builds the absolute URL for `path` with `query` appended
    pub fn url(&self, path: &str, query: Option<&Query>) -> Result<Url> {
        let mut url = self
            .inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", path, e)))?;
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.iter() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Make an authenticated GET request
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&Query>,
        headers: Headers<'_>,
    ) -> Result<T> {
        let response = self.send(Method::GET, path, query, headers, None).await?;
        decode(response).await
    }

    /// Make an authenticated POST request with a JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        headers: Headers<'_>,
    ) -> Result<T> {
        let body = encode(body)?;
        let response = self.send(Method::POST, path, None, headers, Some(body)).await?;
        decode(response).await
    }

    /// Make an authenticated PUT request, with or without a JSON body
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        headers: Headers<'_>,
    ) -> Result<T> {
        let body = body.map(encode).transpose()?;
        let response = self.send(Method::PUT, path, None, headers, body).await?;
        decode(response).await
    }

    /// PUT without a body, for endpoints that answer `204 No Content`
    pub(crate) async fn put_no_content(&self, path: &str, headers: Headers<'_>) -> Result<()> {
        self.send(Method::PUT, path, None, headers, None).await?;
        Ok(())
    }

    /// Make an authenticated DELETE request that discards the response body
    pub(crate) async fn delete(&self, path: &str, headers: Headers<'_>) -> Result<()> {
        self.send(Method::DELETE, path, None, headers, None).await?;
        Ok(())
    }

    /// Same as [`HttpClient::delete`] but decodes the response body
    pub(crate) async fn delete_returning<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Headers<'_>,
    ) -> Result<T> {
        let response = self.send(Method::DELETE, path, None, headers, None).await?;
        decode(response).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&Query>,
        headers: Headers<'_>,
        body: Option<Vec<u8>>,
    ) -> Result<Response> {
        let url = self.url(path, query)?;
        let mut attempt = 0;

        loop {
            log::debug!("{} {}", method, url);

            let mut request = self
                .inner
                .http_client
                .request(method.clone(), url.clone())
                .bearer_auth(&self.inner.access_token);
            for (name, value) in headers {
                request = request.header(*name, value.as_str());
            }
            if let Some(bytes) = &body {
                request = request
                    .header(reqwest::header::CONTENT_TYPE, CMA_CONTENT_TYPE)
                    .body(bytes.clone());
            }

            let response = request.send().await?;
            if response.status().is_success() {
                return Ok(response);
            }

            let error = handle_error_response(response).await;
            if self.inner.retry_on_error && error.is_retryable() && attempt < self.inner.retry_limit
            {
                let wait = retry_wait(&error, self.inner.retry_delay, attempt);
                log::warn!(
                    "{} {} failed ({}), retrying in {:?} (attempt {}/{})",
                    method,
                    url.path(),
                    error,
                    wait,
                    attempt + 1,
                    self.inner.retry_limit
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
                continue;
            }
            return Err(error);
        }
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("access_token", &mask_token(&self.inner.access_token))
            .finish()
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| ApiError::Parse(e.to_string()))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Converts a non-success response into an [`ApiError`]
async fn handle_error_response(response: Response) -> ApiError {
    let status = response.status();
    let request_id = header_str(&response, REQUEST_ID_HEADER);
    let reset_secs = header_str(&response, RATE_LIMIT_RESET_HEADER).and_then(|v| v.parse().ok());
    let body = response.text().await.unwrap_or_default();

    if let Some(id) = &request_id {
        log::debug!("request {} failed with HTTP {}", id, status.as_u16());
    }

    let reason = status.canonical_reason().unwrap_or("Unknown error");
    error_from_parts(status.as_u16(), reason, &body, request_id, reset_secs)
}

fn header_str(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Maps a status code and error body onto an [`ApiError`]
pub(crate) fn error_from_parts(
    status: u16,
    reason: &str,
    body: &str,
    request_id: Option<String>,
    reset_secs: Option<u64>,
) -> ApiError {
    let parsed = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let message = match &parsed {
        Some(p) => p.get_message(),
        None if body.trim().is_empty() => reason.to_string(),
        None => body.to_string(),
    };

    match status {
        401 => ApiError::Unauthorized(message),
        403 => ApiError::PermissionDenied(message),
        404 => ApiError::NotFound(message),
        409 => ApiError::VersionMismatch(message),
        422 => ApiError::ValidationFailed {
            message,
            details: parsed.and_then(|p| p.details),
        },
        429 => ApiError::RateLimited { reset_secs },
        500..=599 => ApiError::ServerError { status, message },
        _ => ApiError::Api {
            status,
            id: parsed.as_ref().and_then(|p| p.error_id()),
            request_id: request_id.or_else(|| parsed.and_then(|p| p.request_id)),
            message,
        },
    }
}

fn retry_wait(error: &ApiError, base: Duration, attempt: u32) -> Duration {
    let wait = match error {
        ApiError::RateLimited {
            reset_secs: Some(secs),
        } => Duration::from_secs(*secs),
        _ => base.saturating_mul(2u32.saturating_pow(attempt)),
    };
    wait.min(MAX_RETRY_DELAY)
}

/// Percent-encodes an id for use as a single path segment
pub(crate) fn encode_segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Keeps the last four characters of a token
pub(crate) fn mask_token(token: &str) -> String {
    let visible: String = token
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if token.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_defaults_to_https() {
        let params = ClientParams::new("token");
        assert_eq!(params.base_url().unwrap().as_str(), "https://api.contentful.com/");
    }

    #[test]
    fn test_base_url_insecure_and_full() {
        let mut params = ClientParams::new("token").with_host("localhost:8080");
        params.insecure = true;
        assert_eq!(params.base_url().unwrap().as_str(), "http://localhost:8080/");

        let params = ClientParams::new("token").with_host("http://127.0.0.1:9000/cma");
        assert_eq!(params.base_url().unwrap().as_str(), "http://127.0.0.1:9000/cma/");
    }

    #[test]
    fn test_url_building() {
        let client = HttpClient::new(&ClientParams::new("token")).unwrap();
        let url = client.url("organizations/org-1/teams", None).unwrap();
        assert_eq!(url.as_str(), "https://api.contentful.com/organizations/org-1/teams");

        let query = Query::new().limit(5).param("sys.team.sys.id", "team-1");
        let url = client.url("/organizations/org-1/team_space_memberships", Some(&query)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.contentful.com/organizations/org-1/team_space_memberships?limit=5&sys.team.sys.id=team-1"
        );
    }

    #[test]
    fn test_encoded_ids_stay_in_their_segment() {
        assert_eq!(encode_segment("team-1"), "team-1");

        let client = HttpClient::new(&ClientParams::new("token")).unwrap();
        let path = format!("organizations/org-1/teams/{}", encode_segment("a/b?c#d"));
        let url = client.url(&path, None).unwrap();
        assert_eq!(url.path(), "/organizations/org-1/teams/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_error_mapping() {
        let body = r#"{"sys":{"type":"Error","id":"NotFound"},"message":"The resource could not be found."}"#;
        match error_from_parts(404, "Not Found", body, None, None) {
            ApiError::NotFound(message) => assert_eq!(message, "The resource could not be found."),
            other => panic!("unexpected {:?}", other),
        }

        match error_from_parts(422, "Unprocessable Entity", r#"{"sys":{"id":"ValidationFailed"},"message":"bad","details":{"errors":[]}}"#, None, None) {
            ApiError::ValidationFailed { message, details } => {
                assert_eq!(message, "bad");
                assert!(details.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }

        match error_from_parts(429, "Too Many Requests", "", None, Some(3)) {
            ApiError::RateLimited { reset_secs } => assert_eq!(reset_secs, Some(3)),
            other => panic!("unexpected {:?}", other),
        }

        match error_from_parts(400, "Bad Request", r#"{"sys":{"id":"BadRequest"},"message":"nope","requestId":"r-1"}"#, None, None) {
            ApiError::Api { status, id, request_id, .. } => {
                assert_eq!(status, 400);
                assert_eq!(id.as_deref(), Some("BadRequest"));
                assert_eq!(request_id.as_deref(), Some("r-1"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_error_mapping_plain_body() {
        match error_from_parts(502, "Bad Gateway", "upstream down", None, None) {
            ApiError::ServerError { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected {:?}", other),
        }
        match error_from_parts(403, "Forbidden", "", None, None) {
            ApiError::PermissionDenied(message) => assert_eq!(message, "Forbidden"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_retry_wait() {
        let base = Duration::from_millis(100);
        let server = ApiError::ServerError { status: 500, message: String::new() };
        assert_eq!(retry_wait(&server, base, 0), Duration::from_millis(100));
        assert_eq!(retry_wait(&server, base, 3), Duration::from_millis(800));
        let limited = ApiError::RateLimited { reset_secs: Some(2) };
        assert_eq!(retry_wait(&limited, base, 4), Duration::from_secs(2));
        let huge = ApiError::RateLimited { reset_secs: Some(3600) };
        assert_eq!(retry_wait(&huge, base, 0), MAX_RETRY_DELAY);
    }

    #[test]
    fn test_token_is_masked() {
        assert_eq!(mask_token("CFPAT-abcdef1234"), "****1234");
        assert_eq!(mask_token("abc"), "****");
        let debug = format!("{:?}", ClientParams::new("CFPAT-secret-value"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("cma-client/"));
        let params = ClientParams::new("t").with_application("my-app/1.0");
        assert!(params.user_agent().ends_with("app/my-app/1.0"));
    }
}
