//! Alma deployment regions and per-family endpoint resolution.
//!
//! Each API family (PNX get, PNX search, resource-sharing requests,
//! user search) has its own base-URL slot so that individual families
//! can be pointed elsewhere, which Alma itself requires: record
//! lookups only ever answer from the NA host.

use std::str::FromStr;

use crate::error::ExLibrisError;

/// Host used for every endpoint family until a region is applied.
const DEFAULT_HOST: &str = "https://api-na.hosted.exlibrisgroup.com";

/// A geographic Alma API deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Us,
    Eu,
    Apac,
}

impl Region {
    /// Base URL of this region's API host.
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::Us => "https://api-na.hosted.exlibrisgroup.com",
            Region::Eu => "https://api-eu.hosted.exlibrisgroup.com",
            Region::Apac => "https://api-ap.hosted.exlibrisgroup.com",
        }
    }
}

impl FromStr for Region {
    type Err = ExLibrisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "us" => Ok(Region::Us),
            "eu" => Ok(Region::Eu),
            "apac" => Ok(Region::Apac),
            other => Err(ExLibrisError::InvalidRegion(other.to_string())),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Region::Us => "us",
            Region::Eu => "eu",
            Region::Apac => "apac",
        })
    }
}

/// Selects one endpoint family for a direct URL override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFamily {
    ResourcesGet,
    ResourcesSearch,
    ResourcesRequest,
    UsersSearch,
}

/// Base URLs per API family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub resources_get: String,
    pub resources_search: String,
    pub resources_request: String,
    pub users_search: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            resources_get: DEFAULT_HOST.to_string(),
            resources_search: DEFAULT_HOST.to_string(),
            resources_request: DEFAULT_HOST.to_string(),
            users_search: DEFAULT_HOST.to_string(),
        }
    }
}

impl Endpoints {
    /// Point the search, request, and user-search families at the given
    /// region's host.
    ///
    /// The get-by-ID family is never updated here: Alma only serves PNX
    /// record lookups from one fixed host, whichever region owns the
    /// record.
    pub fn apply_region(&mut self, region: Region) {
        let base = region.base_url();
        self.resources_search = base.to_string();
        self.resources_request = base.to_string();
        self.users_search = base.to_string();
    }

    /// Replace the base URL of a single family.
    pub fn set(&mut self, family: EndpointFamily, base_url: String) {
        match family {
            EndpointFamily::ResourcesGet => self.resources_get = base_url,
            EndpointFamily::ResourcesSearch => self.resources_search = base_url,
            EndpointFamily::ResourcesRequest => self.resources_request = base_url,
            EndpointFamily::UsersSearch => self.users_search = base_url,
        }
    }
}
