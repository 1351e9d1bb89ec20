//! Resource-sharing (interlibrary-loan) requests.
//!
//! Assembles the `user_resource_sharing_request` XML document Alma's
//! resource-sharing endpoint expects: whitelisted fields only, built-in
//! defaults underneath caller values, XML-escaped text, and the
//! `format` / `pickup_location` elements rendered first with their
//! required attributes.

use chrono::Utc;

use crate::client::ExLibrisClient;
use crate::error::Result;
use crate::users::UserRef;
use crate::xml;

/// A resource-sharing request payload.
///
/// Only the fields Alma's `rest_user_resource_sharing_request` schema
/// accepts are representable. Absent fields are left out of the
/// document; the delivery options at the bottom pick up defaults when
/// unset.
#[derive(Debug, Clone, Default)]
pub struct ResourceRequest {
    pub title: Option<String>,
    /// ISSN of the reference. Alma is fussy about this field:
    /// non-digits are stripped, and unless exactly 10 digits remain
    /// the field is dropped from the document.
    pub issn: Option<String>,
    pub isbn: Option<String>,
    pub author: Option<String>,
    pub author_initials: Option<String>,
    pub year: Option<String>,
    pub publisher: Option<String>,
    pub place_of_publication: Option<String>,
    pub edition: Option<String>,
    pub specific_edition: Option<String>,
    pub volume: Option<String>,
    pub journal_title: Option<String>,
    pub issue: Option<String>,
    pub chapter: Option<String>,
    pub pages: Option<String>,
    pub start_page: Option<String>,
    pub end_page: Option<String>,
    pub part: Option<String>,
    pub source: Option<String>,
    pub series_title_number: Option<String>,
    pub doi: Option<String>,
    pub pmid: Option<String>,
    pub call_number: Option<String>,
    pub note: Option<String>,
    pub bib_note: Option<String>,
    pub lcc_number: Option<String>,
    pub oclc_number: Option<String>,
    /// Either `book` or `article`. Defaults to `article`.
    pub request_type: Option<String>,
    pub citation_type: Option<String>,

    // Delivery options. Alma's schema keeps these in the same document
    // as the bibliographic fields, so they live on the same record.
    /// Delivery format code, e.g. `PHYSICAL`. Defaults to `PHYSICAL`.
    pub format: Option<String>,
    pub allow_other_formats: Option<bool>,
    /// Pickup location code. Defaults to `MAIN`.
    pub pickup_location: Option<String>,
    pub additional_person_name: Option<String>,
    pub agree_to_copyright_terms: Option<bool>,
    /// `YYYY-MM-DD`. Defaults to today.
    pub last_interest_date: Option<String>,
    pub use_alternate_address: Option<bool>,
}

impl ResourceRequest {
    // Whitelisted fields in document order. Later entries override
    // colliding defaults in place; new keys append.
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();

        let entries: [(&'static str, &Option<String>); 29] = [
            ("title", &self.title),
            ("issn", &self.issn),
            ("isbn", &self.isbn),
            ("author", &self.author),
            ("author_initials", &self.author_initials),
            ("year", &self.year),
            ("publisher", &self.publisher),
            ("place_of_publication", &self.place_of_publication),
            ("edition", &self.edition),
            ("specific_edition", &self.specific_edition),
            ("volume", &self.volume),
            ("journal_title", &self.journal_title),
            ("issue", &self.issue),
            ("chapter", &self.chapter),
            ("pages", &self.pages),
            ("start_page", &self.start_page),
            ("end_page", &self.end_page),
            ("part", &self.part),
            ("source", &self.source),
            ("series_title_number", &self.series_title_number),
            ("doi", &self.doi),
            ("pmid", &self.pmid),
            ("call_number", &self.call_number),
            ("note", &self.note),
            ("bib_note", &self.bib_note),
            ("lcc_number", &self.lcc_number),
            ("oclc_number", &self.oclc_number),
            ("type", &self.request_type),
            ("citation_type", &self.citation_type),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                out.push((key, value.clone()));
            }
        }

        if let Some(format) = &self.format {
            out.push(("format", format.clone()));
        }
        if let Some(flag) = self.allow_other_formats {
            out.push(("allow_other_formats", flag.to_string()));
        }
        if let Some(location) = &self.pickup_location {
            out.push(("pickup_location", location.clone()));
        }
        if let Some(name) = &self.additional_person_name {
            out.push(("additional_person_name", name.clone()));
        }
        if let Some(flag) = self.agree_to_copyright_terms {
            out.push(("agree_to_copyright_terms", flag.to_string()));
        }
        if let Some(date) = &self.last_interest_date {
            out.push(("last_interest_date", date.clone()));
        }
        if let Some(flag) = self.use_alternate_address {
            out.push(("use_alternate_address", flag.to_string()));
        }

        out
    }
}

// Insertion-ordered field map. Overriding an existing key keeps its
// original position, so defaults stay at the head of the document and
// caller-only fields trail in whitelist order.
#[derive(Debug, Default)]
struct FieldMap(Vec<(&'static str, String)>);

impl FieldMap {
    fn set(&mut self, key: &'static str, value: String) {
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value.as_str())
    }

    fn remove(&mut self, key: &str) {
        self.0.retain(|(existing, _)| *existing != key);
    }

    fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, value.as_str()))
    }

    fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.0.iter_mut().map(|(_, value)| value)
    }
}

// Built-in defaults, applied before caller-supplied values.
fn default_fields() -> FieldMap {
    let mut map = FieldMap::default();
    map.set("format", "PHYSICAL".to_string());
    map.set("pickup_location", "MAIN".to_string());
    map.set("agree_to_copyright_terms", "true".to_string());
    map.set("allow_other_formats", "false".to_string());
    map.set(
        "last_interest_date",
        Utc::now().format("%Y-%m-%d").to_string(),
    );
    map.set("use_alternate_address", "false".to_string());
    map.set("type", "article".to_string());
    map
}

/// Resolve the user and assemble the sharing-request XML document.
///
/// Returns the resolved user ID and the document body. Fails with
/// [`ExLibrisError::InvalidUser`](crate::ExLibrisError::InvalidUser)
/// before any I/O when the user reference carries no usable ID.
pub fn build_sharing_request(
    resource: &ResourceRequest,
    user: &UserRef,
) -> Result<(String, String)> {
    let user_id = user.resolve()?;

    let mut map = default_fields();
    for (key, value) in resource.fields() {
        map.set(key, value);
    }

    for value in map.values_mut() {
        *value = xml::escape(value);
    }

    // Alma rejects requests whose ISSN is not exactly 10 digits.
    let issn_digits = map
        .get("issn")
        .map(|issn| issn.chars().filter(|c| c.is_ascii_digit()).collect::<String>());
    if let Some(digits) = issn_digits {
        if digits.len() == 10 {
            map.set("issn", digits);
        } else {
            map.remove("issn");
        }
    }

    Ok((user_id, serialize_document(&map)))
}

// Render the document: `format` first with a title-cased `desc`
// attribute, `pickup_location` second with an empty one, then every
// remaining field as a plain text element in map order. `type` is
// bookkeeping and never rendered.
fn serialize_document(map: &FieldMap) -> String {
    let format = map.get("format").unwrap_or_default();
    let pickup_location = map.get("pickup_location").unwrap_or_default();

    let mut doc = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><user_resource_sharing_request>"#,
    );
    doc.push_str(&format!(
        r#"<format desc="{}">{}</format>"#,
        xml::title_case(format),
        format
    ));
    doc.push_str(&format!(
        r#"<pickup_location desc="">{}</pickup_location>"#,
        pickup_location
    ));
    for (key, value) in map.iter() {
        if matches!(key, "format" | "pickup_location" | "type") {
            continue;
        }
        doc.push_str(&format!("<{key}>{value}</{key}>"));
    }
    doc.push_str("</user_resource_sharing_request>");
    doc
}

impl ExLibrisClient {
    /// Place a delivery request for a resource on behalf of a user.
    ///
    /// Success carries no payload: Alma acknowledges the request and
    /// returns nothing the caller needs.
    pub async fn request_resource(
        &self,
        resource: &ResourceRequest,
        user: impl Into<UserRef>,
    ) -> Result<()> {
        let (user_id, document) = build_sharing_request(resource, &user.into())?;
        let path = format!("/almaws/v1/users/{}/resource_sharing_requests", user_id);
        self.post_xml(&self.endpoints.resources_request, &path, document)
            .await?;
        Ok(())
    }
}
