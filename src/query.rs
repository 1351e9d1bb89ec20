//! Primo query translation.
//!
//! The PNX search API takes a flat `field,op,value` grammar joined
//! with `;`. [`Query`] models the two accepted input shapes: a
//! pre-formatted query string that is passed through untouched, and an
//! ordered list of per-field match terms.
//!
//! # Example
//!
//! ```
//! use exlibris_client::Query;
//!
//! let query = Query::new()
//!     .contains("title", "cancer")
//!     .exact("doi", "10.7326/0003-4819-161-12-201412160-02010");
//! assert_eq!(
//!     query.translate(),
//!     "title,contains,cancer;doi,exact,10.7326/0003-4819-161-12-201412160-02010"
//! );
//! ```

/// Match mode for a single query term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Substring containment anywhere within the field.
    Contains,
    /// Exact equality.
    Exact,
}

/// A single `field,op,value` search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub field: String,
    pub mode: MatchMode,
    pub value: String,
}

/// A Primo search query.
///
/// `Raw` queries are already in PNX syntax and the caller keeps full
/// control; `Terms` queries are translated field by field, preserving
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Raw(String),
    Terms(Vec<Term>),
}

impl Query {
    /// Create an empty term query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a containment term.
    pub fn contains(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(Term {
            field: field.into(),
            mode: MatchMode::Contains,
            value: value.into(),
        })
    }

    /// Add an exact-match term.
    pub fn exact(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(Term {
            field: field.into(),
            mode: MatchMode::Exact,
            value: value.into(),
        })
    }

    /// Render the query in PNX search syntax.
    ///
    /// Raw queries come back unchanged. Terms with an empty field name
    /// are dropped silently; an empty query renders as an empty string.
    pub fn translate(&self) -> String {
        match self {
            Query::Raw(raw) => raw.clone(),
            Query::Terms(terms) => terms
                .iter()
                .filter(|term| !term.field.is_empty())
                .map(|term| match term.mode {
                    MatchMode::Contains => {
                        format!("{},contains,{}", term.field, term.value)
                    }
                    MatchMode::Exact => format!("{},exact,{}", term.field, term.value),
                })
                .collect::<Vec<_>>()
                .join(";"),
        }
    }

    // Terms cannot be appended to a raw query; the raw string wins.
    fn push(self, term: Term) -> Self {
        match self {
            Query::Raw(_) => self,
            Query::Terms(mut terms) => {
                terms.push(term);
                Query::Terms(terms)
            }
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Query::Terms(Vec::new())
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Query::Raw(raw.to_string())
    }
}

impl From<String> for Query {
    fn from(raw: String) -> Self {
        Query::Raw(raw)
    }
}

impl From<&Query> for Query {
    fn from(query: &Query) -> Self {
        query.clone()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.translate())
    }
}
