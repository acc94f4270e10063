use crate::api::models::{AddCredentialRequest, RemoveCredentialRequest, WireCredential};
use crate::error::ApiError;
use crate::storage::config::{DEFAULT_TIMEOUT_SECS, Endpoints, RemoveMethod};
use crate::utils::error_helpers::*;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = concat!("keycloud/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the keycloud credential service
#[derive(Debug, Clone)]
pub struct KeycloudClient {
    client: Client,
    pub base_url: String,
    pub session_token: Option<String>,
    pub endpoints: Endpoints,
    timeout_secs: u64,
}

impl KeycloudClient {
    // Create baseClient with default settings
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: String, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, "client_init", timeout_secs))?;

        Ok(KeycloudClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token: None,
            endpoints: Endpoints::default(),
            timeout_secs,
        })
    }

    pub fn with_session_token(mut self, token: String) -> Self {
        self.session_token = Some(token);
        self
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_token.is_some()
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = &self.session_token {
            request = request.bearer_auth(token);
        }

        request
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        request
            .send()
            .await
            .map_err(|e| convert_request_error(e, endpoint, self.timeout_secs))
    }

    /// Anything but 200 is a rejection; the body is kept for diagnostics only
    async fn expect_ok(response: Response, endpoint: &str) -> Result<Response, ApiError> {
        let status = response.status();
        if status == StatusCode::OK {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(rejected(status.as_u16(), endpoint, error_text))
    }

    /// Fetch every stored credential in server order
    pub async fn fetch_credentials(&self) -> Result<Vec<WireCredential>, ApiError> {
        let endpoint = self.endpoints.list.as_str();
        log::debug!("GET {}", endpoint);

        let response = self
            .send(self.build_request(Method::GET, endpoint), endpoint)
            .await?;
        let response = Self::expect_ok(response, endpoint).await?;

        // Read as text; a malformed payload is a decode error, not a transport one
        let body = response
            .text()
            .await
            .map_err(|e| convert_request_error(e, endpoint, self.timeout_secs))?;
        let credentials: Vec<WireCredential> =
            serde_json::from_str(&body).map_err(|e| convert_json_error(e, endpoint))?;

        log::debug!("{} returned {} credentials", endpoint, credentials.len());
        Ok(credentials)
    }

    /// Store a new credential; the response body is ignored
    pub async fn add_credential(
        &self,
        username: &str,
        password: &str,
        url: &str,
    ) -> Result<(), ApiError> {
        let endpoint = self.endpoints.add.as_str();
        log::debug!("POST {} for '{}' at '{}'", endpoint, username, url);

        let body = AddCredentialRequest {
            username,
            password,
            url,
        };
        let response = self
            .send(self.build_request(Method::POST, endpoint).json(&body), endpoint)
            .await?;
        Self::expect_ok(response, endpoint).await?;
        Ok(())
    }

    /// Delete the credential identified by username and url
    pub async fn remove_credential(&self, username: &str, url: &str) -> Result<(), ApiError> {
        let endpoint = self.endpoints.remove.as_str();
        let method = match self.endpoints.remove_method {
            RemoveMethod::Post => Method::POST,
            RemoveMethod::Delete => Method::DELETE,
        };
        log::debug!("{} {} for '{}' at '{}'", method, endpoint, username, url);

        let body = RemoveCredentialRequest { username, url };
        let response = self
            .send(self.build_request(method, endpoint).json(&body), endpoint)
            .await?;
        Self::expect_ok(response, endpoint).await?;
        Ok(())
    }
}
