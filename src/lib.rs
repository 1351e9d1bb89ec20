//! # exlibris-client
//!
//! A Rust client for the Ex Libris Alma / Primo library-services APIs.
//!
//! Provides:
//! - **Resource search** over the Primo PNX index
//! - **Resource retrieval** by record ID
//! - **Resource-sharing requests** (interlibrary loan) against Alma
//! - **User lookup** in the Alma user directory
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> exlibris_client::error::Result<()> {
//! use exlibris_client::{ExLibrisClient, Query, Region};
//!
//! // Create client from the EXLIBRIS_API_KEY environment variable
//! let client = ExLibrisClient::from_env()?.with_region(Region::Apac);
//!
//! // Search for resources
//! let results = client
//!     .search_resources(Query::new().contains("title", "cancer"))
//!     .await?;
//! println!("{} matches", results["info"]["total"]);
//!
//! // Look up a user and request delivery of the first hit
//! use exlibris_client::{ResourceRequest, UserQuery};
//! let users = client
//!     .search_users(&UserQuery::new().field("last_name", "Smith"))
//!     .await?;
//! if let Some(user) = users.first() {
//!     let resource = ResourceRequest {
//!         title: Some("Fake book".to_string()),
//!         ..Default::default()
//!     };
//!     client.request_resource(&resource, user).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Query translation
//!
//! ```
//! use exlibris_client::Query;
//!
//! let query = Query::new()
//!     .contains("title", "foo")
//!     .exact("doi", "10.1000/182");
//! assert_eq!(query.translate(), "title,contains,foo;doi,exact,10.1000/182");
//! ```

pub mod client;
pub mod error;
pub mod query;
pub mod region;
pub mod resources;
pub mod sharing;
pub mod users;
pub mod xml;

// Re-export key types at the crate root.
pub use client::ExLibrisClient;
pub use error::ExLibrisError;
pub use query::{MatchMode, Query, Term};
pub use region::{EndpointFamily, Endpoints, Region};
pub use sharing::{build_sharing_request, ResourceRequest};
pub use users::{UserQuery, UserRecord, UserRef};
