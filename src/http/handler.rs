//! Request handler
//!
//! The single point of contact with the remote service:
//! - Resolves endpoints against the versioned API root
//! - Attaches the bearer token and user agent
//! - Turns non-2xx responses into `Error::HttpStatus`
//! - Returns parsed JSON or the raw response
//!
//! There is no retry logic here; every failure goes straight to the caller.

use super::request::RequestConfig;
use crate::auth::Auth;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Sends authenticated requests on behalf of the client
pub struct RequestHandler {
    client: Client,
    config: ClientConfig,
    auth: Auth,
}

impl RequestHandler {
    /// Create a handler with its own HTTP client
    pub fn new(config: ClientConfig, auth: Auth) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self::with_client(client, config, auth))
    }

    /// Create a handler reusing an existing HTTP client
    pub fn with_client(client: Client, config: ClientConfig, auth: Auth) -> Self {
        Self {
            client,
            config,
            auth,
        }
    }

    /// Credential state used for the bearer header
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Mutable access to the credentials
    pub fn auth_mut(&mut self) -> &mut Auth {
        &mut self.auth
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET and parse the body as JSON
    pub async fn get(&self, config: RequestConfig) -> Result<Value> {
        self.get_json(config).await
    }

    /// GET and deserialize the body
    pub async fn get_json<T: DeserializeOwned>(&self, config: RequestConfig) -> Result<T> {
        let response = self.request(Method::GET, config).await?;
        parse_json(response).await
    }

    /// GET returning the response untouched (after the status check)
    pub async fn get_raw(&self, config: RequestConfig) -> Result<Response> {
        self.request(Method::GET, config).await
    }

    /// POST with the config's JSON body
    pub async fn post(&self, config: RequestConfig) -> Result<Response> {
        self.request(Method::POST, config).await
    }

    /// POST and deserialize the body
    pub async fn post_json<T: DeserializeOwned>(&self, config: RequestConfig) -> Result<T> {
        let response = self.post(config).await?;
        parse_json(response).await
    }

    /// DELETE
    pub async fn delete(&self, config: RequestConfig) -> Result<Response> {
        self.request(Method::DELETE, config).await
    }

    /// Make a generic request
    pub async fn request(&self, method: Method, config: RequestConfig) -> Result<Response> {
        let url = self.resolve_url(&config)?;

        let mut req = self.client.request(method.clone(), &url);

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        req = self.auth.apply(req);

        debug!("{} {}", method, url);
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} {} failed with {}", method, url, status.as_u16());
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("{} {} -> {}", method, url, status.as_u16());
        Ok(response)
    }

    /// Build the full URL for a request
    ///
    /// An absolute `url` wins; otherwise `endpoint` is joined to the
    /// versioned API root. Having neither is a configuration error.
    pub fn resolve_url(&self, config: &RequestConfig) -> Result<String> {
        if let Some(url) = &config.url {
            return Ok(url.clone());
        }

        match &config.endpoint {
            Some(endpoint) => Ok(format!(
                "{}/{}",
                self.config.api_root(),
                endpoint.trim_start_matches('/')
            )),
            None => Err(Error::config("either an endpoint or a url is required")),
        }
    }
}

impl std::fmt::Debug for RequestHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestHandler")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// Read the body and deserialize it, reporting malformed JSON as `JsonParse`
async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}
