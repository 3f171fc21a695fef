//! HTTP client wrapper shared by every API in the crate
//!
//! Requests carry `Authorization: Bearer <token>` whenever the session holds a
//! token. A `401` from any endpoint clears the session and sends the navigator
//! to the login route before the error reaches the caller.

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, RequestBuilder, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use medinear_session::SessionStore;

use crate::error::{Error, FieldError, Result};

/// `{ success, data, message }` wrapper used by every resource endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

/// Authenticated client for the backend API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: &str, client: Client, session: SessionStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Create a GET request
    pub fn get(&self, path: &str) -> ApiRequest<'_> {
        ApiRequest::new(self, Method::GET, path)
    }

    /// Create a POST request
    pub fn post(&self, path: &str) -> ApiRequest<'_> {
        ApiRequest::new(self, Method::POST, path)
    }

    /// Create a PUT request
    pub fn put(&self, path: &str) -> ApiRequest<'_> {
        ApiRequest::new(self, Method::PUT, path)
    }
}

/// Helper for building and executing one request
pub struct ApiRequest<'a> {
    api: &'a ApiClient,
    method: Method,
    path: String,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl<'a> ApiRequest<'a> {
    fn new(api: &'a ApiClient, method: Method, path: &str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            api,
            method,
            path: path.to_string(),
            headers,
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Add a query parameter
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    fn build(&self) -> Result<RequestBuilder> {
        let mut url = Url::parse(&format!("{}{}", self.api.base_url, self.path))?;

        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                pairs.append_pair(key, value);
            }
        }

        let mut headers = self.headers.clone();
        if let Some(token) = self.api.session.token() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        let mut req = self
            .api
            .client
            .request(self.method.clone(), url.as_str())
            .headers(headers);

        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    async fn dispatch(&self) -> Result<Response> {
        log::debug!("{} {}", self.method, self.path);

        let response = self.build()?.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.api.session.expire();
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            log::debug!("{} {} failed with {}", self.method, self.path, status);
            return Err(Error::Api {
                status: status.as_u16(),
                message: body.message,
                errors: body.errors,
            });
        }

        Ok(response)
    }

    /// Execute the request and parse the whole response body
    pub async fn send<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.dispatch().await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Execute the request and return the `data` member of the envelope
    pub async fn send_data<T: DeserializeOwned>(&self) -> Result<T> {
        let envelope: Envelope<T> = self.send().await?;
        Ok(envelope.data)
    }

    /// Execute the request, ignoring the response body
    pub async fn send_empty(&self) -> Result<()> {
        self.dispatch().await?;
        Ok(())
    }
}
