//! PNX resource endpoints: search and get-by-ID.
//!
//! Both operations return the response JSON structurally unchanged as
//! a [`serde_json::Value`]; callers pick out the `docs` / `info`
//! fields they need. The two endpoints authenticate differently (a
//! header for search, a query parameter for get) because Alma enforces
//! a different convention on each; do not unify them.

use crate::client::ExLibrisClient;
use crate::error::Result;
use crate::query::Query;

impl ExLibrisClient {
    /// Search for resources (papers, articles, books) via the Primo
    /// PNX search API.
    ///
    /// Accepts anything convertible to a [`Query`]: a raw PNX query
    /// string, or a term query built with [`Query::contains`] /
    /// [`Query::exact`].
    pub async fn search_resources(&self, query: impl Into<Query>) -> Result<serde_json::Value> {
        let q = query.into().translate();
        let body = self
            .get_with_header_key(
                &self.endpoints.resources_search,
                "/primo/v1/pnxs",
                &[("q", q.as_str())],
            )
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch a single PNX record by its document ID.
    ///
    /// Always answered from the default host regardless of region; see
    /// [`crate::region::Endpoints::apply_region`].
    pub async fn get_resource(&self, id: &str) -> Result<serde_json::Value> {
        let path = format!("/primo/v1/pnxs/L/{}", id);
        let body = self
            .get_with_query_key(&self.endpoints.resources_get, &path, &[])
            .await?;
        Ok(serde_json::from_str(&body)?)
    }
}
