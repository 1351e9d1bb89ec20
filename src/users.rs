//! Alma user directory: search and XML response handling.

use serde::{Deserialize, Serialize};

use crate::client::ExLibrisClient;
use crate::error::{ExLibrisError, Result};

/// A normalized Alma user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Primary identifier.
    pub id: String,
    /// Link to the full user resource, when the API provides one.
    pub url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A reference to an Alma user: either a bare ID or a full record from
/// [`search_users`](ExLibrisClient::search_users).
#[derive(Debug, Clone)]
pub enum UserRef {
    Id(String),
    Record(UserRecord),
}

impl UserRef {
    /// The user's primary ID.
    ///
    /// Fails with [`ExLibrisError::InvalidUser`] when the reference
    /// carries no usable ID, so callers can bail out before any I/O.
    pub fn resolve(&self) -> Result<String> {
        let id = match self {
            UserRef::Id(id) => id.as_str(),
            UserRef::Record(record) => record.id.as_str(),
        };
        if id.is_empty() {
            return Err(ExLibrisError::InvalidUser);
        }
        Ok(id.to_string())
    }
}

impl From<&str> for UserRef {
    fn from(id: &str) -> Self {
        UserRef::Id(id.to_string())
    }
}

impl From<String> for UserRef {
    fn from(id: String) -> Self {
        UserRef::Id(id)
    }
}

impl From<&UserRecord> for UserRef {
    fn from(record: &UserRecord) -> Self {
        UserRef::Record(record.clone())
    }
}

impl From<UserRecord> for UserRef {
    fn from(record: UserRecord) -> Self {
        UserRef::Record(record)
    }
}

/// Query for [`search_users`](ExLibrisClient::search_users).
///
/// Pagination and ordering controls ride alongside the match terms.
/// Terms are encoded in Alma's comma-joined `field~value` fuzzy
/// syntax, which is unrelated to the Primo grammar in [`crate::query`]
/// and must stay that way.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    limit: Option<u32>,
    offset: Option<u32>,
    order_by: Option<String>,
    terms: Vec<(String, String)>,
}

impl UserQuery {
    /// Create an empty query (matches everyone, first page).
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of returned records.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first `offset` records.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sort the records by the given field.
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    /// Match a field against a value (e.g. `email`, `last_name`,
    /// `primary_id`).
    pub fn field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.terms.push((field.into(), value.into()));
        self
    }

    // Comma-joined `field~value` tokens for the `q` parameter.
    fn encode_terms(&self) -> String {
        self.terms
            .iter()
            .map(|(field, value)| format!("{}~{}", field, value))
            .collect::<Vec<_>>()
            .join(",")
    }
}

// XML shape of the Alma `<users>` collection. Unknown elements and
// attributes (total_record_count and friends) are ignored.
#[derive(Debug, Deserialize)]
struct UsersXml {
    #[serde(rename = "user", default)]
    users: Vec<UserXml>,
}

#[derive(Debug, Deserialize)]
struct UserXml {
    #[serde(rename = "@link")]
    link: Option<String>,
    primary_id: Option<TextNode>,
    first_name: Option<TextNode>,
    last_name: Option<TextNode>,
}

#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$text")]
    text: Option<String>,
}

/// Parse the `<users>` collection out of a raw Alma response body.
///
/// The body may carry leading content before the collection root, so
/// parsing starts at the first `<users` occurrence. A body with no
/// collection at all, or a collection with no `user` children, is a
/// valid zero-match result, not an error. A single `user` child comes
/// back as a one-element list.
pub(crate) fn parse_user_list(body: &str) -> Result<Vec<UserRecord>> {
    let Some(start) = body.find("<users") else {
        return Ok(Vec::new());
    };

    let parsed: UsersXml = quick_xml::de::from_str(&body[start..])
        .map_err(|e| ExLibrisError::Parse(format!("invalid user list XML: {e}")))?;

    Ok(parsed
        .users
        .into_iter()
        .map(|user| UserRecord {
            id: user.primary_id.and_then(|node| node.text).unwrap_or_default(),
            url: user.link,
            first_name: user.first_name.and_then(|node| node.text),
            last_name: user.last_name.and_then(|node| node.text),
        })
        .collect())
}

impl ExLibrisClient {
    /// Find users matching a query.
    ///
    /// Zero matches is a normal outcome and yields an empty list.
    pub async fn search_users(&self, query: &UserQuery) -> Result<Vec<UserRecord>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = query.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(order_by) = &query.order_by {
            params.push(("order_by", order_by.clone()));
        }
        params.push(("q", query.encode_terms()));

        let params: Vec<(&str, &str)> = params
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .collect();

        let body = self
            .get_with_query_key(&self.endpoints.users_search, "/almaws/v1/users", &params)
            .await?;
        parse_user_list(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::EndpointFamily;

    const TWO_USERS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<users total_record_count="2">
  <user link="https://api-ap.hosted.exlibrisgroup.com/almaws/v1/users/jsmith">
    <primary_id>jsmith</primary_id>
    <first_name>Jane</first_name>
    <last_name>Smith</last_name>
    <status desc="Active">ACTIVE</status>
  </user>
  <user link="https://api-ap.hosted.exlibrisgroup.com/almaws/v1/users/bjones">
    <primary_id>bjones</primary_id>
    <first_name>Bob</first_name>
    <last_name>Jones</last_name>
  </user>
</users>"#;

    #[test]
    fn test_parse_two_users() {
        let users = parse_user_list(TWO_USERS).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, "jsmith");
        assert_eq!(
            users[0].url.as_deref(),
            Some("https://api-ap.hosted.exlibrisgroup.com/almaws/v1/users/jsmith")
        );
        assert_eq!(users[0].first_name.as_deref(), Some("Jane"));
        assert_eq!(users[1].last_name.as_deref(), Some("Jones"));
    }

    #[test]
    fn test_single_user_coerced_to_list() {
        let body = r#"<users total_record_count="1">
  <user link="https://example.com/users/solo">
    <primary_id>solo</primary_id>
    <first_name>Only</first_name>
    <last_name>One</last_name>
  </user>
</users>"#;
        let users = parse_user_list(body).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "solo");
    }

    #[test]
    fn test_empty_collection_is_empty_list() {
        let users = parse_user_list(r#"<users total_record_count="0"/>"#).unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_missing_collection_is_empty_list() {
        let users = parse_user_list("no xml here at all").unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_leading_junk_before_root_tolerated() {
        let body = format!("\u{feff}some diagnostic preamble\n{}", TWO_USERS);
        let users = parse_user_list(&body).unwrap();
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn test_missing_optional_fields_degrade() {
        let body = r#"<users><user><primary_id>bare</primary_id></user></users>"#;
        let users = parse_user_list(body).unwrap();
        assert_eq!(users[0].id, "bare");
        assert!(users[0].url.is_none());
        assert!(users[0].first_name.is_none());
        assert!(users[0].last_name.is_none());
    }

    #[test]
    fn test_encode_terms() {
        let query = UserQuery::new()
            .field("email", "jane@example.com")
            .field("last_name", "Smith");
        assert_eq!(query.encode_terms(), "email~jane@example.com,last_name~Smith");
    }

    #[test]
    fn test_user_ref_resolution() {
        assert_eq!(UserRef::from("u1").resolve().unwrap(), "u1");
        assert!(matches!(
            UserRef::from("").resolve().unwrap_err(),
            ExLibrisError::InvalidUser
        ));

        let record = UserRecord {
            id: "jsmith".to_string(),
            url: None,
            first_name: None,
            last_name: None,
        };
        assert_eq!(UserRef::from(&record).resolve().unwrap(), "jsmith");
    }

    #[tokio::test]
    async fn test_search_users_sends_query_and_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/almaws/v1/users")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("limit".into(), "10".into()),
                mockito::Matcher::UrlEncoded("q".into(), "last_name~Smith".into()),
                mockito::Matcher::UrlEncoded("apikey".into(), "sekrit".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/xml")
            .with_body(TWO_USERS)
            .create_async()
            .await;

        let client = ExLibrisClient::new("sekrit")
            .with_endpoint(EndpointFamily::UsersSearch, &server.url())
            .unwrap();
        let users = client
            .search_users(&UserQuery::new().limit(10).field("last_name", "Smith"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, "jsmith");
    }

    #[tokio::test]
    async fn test_search_users_error_surfaces_raw_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/almaws/v1/users")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .with_body("internal server sadness")
            .create_async()
            .await;

        let client = ExLibrisClient::new("sekrit")
            .with_endpoint(EndpointFamily::UsersSearch, &server.url())
            .unwrap();
        let err = client.search_users(&UserQuery::new()).await.unwrap_err();

        match err {
            ExLibrisError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal server sadness");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
