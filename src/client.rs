//! The Ex Libris Alma / Primo API client.

use reqwest::Client;
use url::Url;

use crate::error::{ExLibrisError, Result};
use crate::region::{EndpointFamily, Endpoints, Region};

const USER_AGENT: &str = "exlibris-client/0.1.0";

/// Async client for the Ex Libris Alma / Primo APIs.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> exlibris_client::error::Result<()> {
/// use exlibris_client::{ExLibrisClient, Query, Region};
///
/// let mut client = ExLibrisClient::from_env()?;
/// client.set_region(Region::Apac);
///
/// let results = client
///     .search_resources(Query::new().contains("title", "cancer"))
///     .await?;
/// println!("{}", results["info"]["total"]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ExLibrisClient {
    pub(crate) http: Client,
    pub(crate) api_key: String,
    pub(crate) endpoints: Endpoints,
}

impl ExLibrisClient {
    /// Create a new client with the given API key.
    ///
    /// No timeout is applied; callers wanting deadlines should race the
    /// returned futures themselves.
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_key: api_key.into(),
            endpoints: Endpoints::default(),
        }
    }

    /// Create a client from the `EXLIBRIS_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("EXLIBRIS_API_KEY").map_err(|_| ExLibrisError::AuthRequired)?;
        if key.is_empty() {
            return Err(ExLibrisError::AuthRequired);
        }
        Ok(Self::new(key))
    }

    /// Store a new API key, verbatim. Alma validates keys at request
    /// time, not here.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.api_key = key.into();
    }

    /// Builder-style variant of [`set_key`](Self::set_key).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.set_key(key);
        self
    }

    /// Point the search, request, and user-search endpoints at a
    /// region's host.
    ///
    /// The get-by-ID endpoint is deliberately left alone; see
    /// [`Endpoints::apply_region`].
    pub fn set_region(&mut self, region: Region) {
        self.endpoints.apply_region(region);
    }

    /// Builder-style variant of [`set_region`](Self::set_region).
    pub fn with_region(mut self, region: Region) -> Self {
        self.set_region(region);
        self
    }

    /// Override one endpoint family with a direct base URL.
    pub fn set_endpoint(&mut self, family: EndpointFamily, base_url: &str) -> Result<()> {
        let url = Url::parse(base_url)
            .map_err(|e| ExLibrisError::Config(format!("invalid endpoint URL {base_url:?}: {e}")))?;
        self.endpoints
            .set(family, url.as_str().trim_end_matches('/').to_string());
        Ok(())
    }

    /// Builder-style variant of [`set_endpoint`](Self::set_endpoint).
    pub fn with_endpoint(mut self, family: EndpointFamily, base_url: &str) -> Result<Self> {
        self.set_endpoint(family, base_url)?;
        Ok(self)
    }

    /// Current endpoint configuration.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GET with the API key in an `Authorization: apikey ...` header.
    ///
    /// Only the PNX search endpoint accepts header credentials.
    pub(crate) async fn get_with_header_key(
        &self,
        base: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<String> {
        let url = format!("{}{}", base, path);
        tracing::debug!(%url, "GET (header auth)");
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("apikey {}", self.api_key))
            .header("User-Agent", USER_AGENT)
            .query(params)
            .send()
            .await?;

        handle_response(response).await
    }

    /// GET with the API key as an `apikey` query parameter. Alma's
    /// validation rejects header credentials on these endpoints.
    pub(crate) async fn get_with_query_key(
        &self,
        base: &str,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<String> {
        let url = format!("{}{}", base, path);
        tracing::debug!(%url, "GET (query auth)");
        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        handle_response(response).await
    }

    /// POST an XML document, with the API key as a query parameter.
    pub(crate) async fn post_xml(&self, base: &str, path: &str, body: String) -> Result<String> {
        let url = format!("{}{}", base, path);
        tracing::debug!(%url, bytes = body.len(), "POST application/xml");
        let response = self
            .http
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/xml")
            .query(&[("apikey", self.api_key.as_str())])
            .body(body)
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Map an HTTP response to its raw body, or to [`ExLibrisError::Api`]
/// carrying the raw body on a non-2xx status.
async fn handle_response(response: reqwest::Response) -> Result<String> {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    if (200..300).contains(&status) {
        Ok(body)
    } else {
        Err(ExLibrisError::Api { status, body })
    }
}
