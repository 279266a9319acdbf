//! HTTP transport for the concept catalog.
//!
//! [`HttpCatalog`] implements [`CatalogTransport`] against the catalog's
//! REST API: JSON endpoints for records, relations, topmost entries and
//! keyword search, plus RDF/XML documents served at each concept URI.

mod rdf;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use thesaurus_shared::{
    AppConfig, CatalogTransport, ConceptGraph, EntryKind, MatchMode, RawEdge, RawRecord,
    RelationKind, Result, ThesaurusError,
};
use tracing::{debug, warn};
use url::Url;

/// Default timeout in seconds for catalog requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Media type requested for concept graphs.
const RDF_XML: &str = "application/rdf+xml";

/// User-Agent string for catalog requests.
const USER_AGENT: &str = concat!("thesaurus/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Base URL of the REST API (a trailing `/` is added if missing).
    pub base_url: String,
    /// Timeout for HTTP requests in seconds.
    pub timeout_secs: u64,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for CatalogOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.service.url.clone(),
            timeout_secs: if config.service.timeout_secs == 0 {
                DEFAULT_TIMEOUT_SECS
            } else {
                config.service.timeout_secs
            },
        }
    }
}

// ---------------------------------------------------------------------------
// HttpCatalog
// ---------------------------------------------------------------------------

/// REST client for the concept catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Build a client for the configured catalog.
    pub fn new(opts: &CatalogOptions) -> Result<Self> {
        let base_url = prepare_base_url(&opts.base_url)?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| ThesaurusError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API method with URL-encoded query parameters.
    fn endpoint(&self, method: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(method)
            .map_err(|e| ThesaurusError::validation(format!("invalid endpoint {method}: {e}")))?;
        url.query_pairs_mut().extend_pairs(params.iter().copied());
        Ok(url)
    }

    /// GET a JSON document. `Ok(None)` on HTTP 404.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        debug!(%url, "catalog request");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ThesaurusError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ThesaurusError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ThesaurusError::Network(format!("{url}: failed to read body: {e}")))?;

        serde_json::from_str(&body)
            .map_err(|e| ThesaurusError::parse(format!("{url}: unexpected JSON: {e}")))
    }

    /// GET a JSON array; 404 and `null` both count as empty.
    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        Ok(self
            .get_json::<Option<Vec<T>>>(url)
            .await?
            .flatten()
            .unwrap_or_default())
    }

    /// Relation queries share parameters and blank-id handling.
    fn relation_endpoint(
        &self,
        method: &str,
        id: &str,
        relation: RelationKind,
        language: &str,
    ) -> Result<Url> {
        let relation_uri = relation.uri();
        self.endpoint(
            method,
            &[
                ("concept_uri", id),
                ("relation_uri", relation_uri.as_str()),
                ("language", language),
            ],
        )
    }
}

#[async_trait]
impl CatalogTransport for HttpCatalog {
    async fn fetch_record(&self, id: &str, language: &str) -> Result<Option<RawRecord>> {
        if id.trim().is_empty() {
            warn!("no concept id passed, returning no record");
            return Ok(None);
        }

        let url = self.endpoint("getConcept", &[("concept_uri", id), ("language", language)])?;
        Ok(self.get_json::<Option<RawRecord>>(url).await?.flatten())
    }

    async fn fetch_graph(&self, id: &str) -> Result<Option<ConceptGraph>> {
        if id.trim().is_empty() {
            warn!("no concept id passed, returning no graph");
            return Ok(None);
        }

        let url = Url::parse(id)
            .map_err(|e| ThesaurusError::validation(format!("concept id {id} is not a URL: {e}")))?;
        debug!(%url, "fetching concept graph");

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, RDF_XML)
            .send()
            .await
            .map_err(|e| ThesaurusError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ThesaurusError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ThesaurusError::Network(format!("{url}: failed to read body: {e}")))?;

        rdf::parse_concept_graph(&body, id).map(Some)
    }

    async fn fetch_edges(
        &self,
        id: &str,
        relation: RelationKind,
        language: &str,
    ) -> Result<Vec<RawEdge>> {
        if id.trim().is_empty() {
            warn!(%relation, "no concept id passed, returning no edges");
            return Ok(Vec::new());
        }

        let url = self.relation_endpoint("getAllConceptRelatives", id, relation, language)?;
        self.get_list(url).await
    }

    async fn fetch_related(
        &self,
        id: &str,
        relation: RelationKind,
        language: &str,
    ) -> Result<Vec<RawRecord>> {
        if id.trim().is_empty() {
            warn!(%relation, "no concept id passed, returning no related concepts");
            return Ok(Vec::new());
        }

        let url = self.relation_endpoint("getRelatedConcepts", id, relation, language)?;
        self.get_list(url).await
    }

    async fn fetch_topmost(&self, kind: EntryKind, language: &str) -> Result<Vec<RawRecord>> {
        let thesaurus_uri = kind.thesaurus_uri();
        let url = self.endpoint(
            "getTopmostConcepts",
            &[("thesaurus_uri", thesaurus_uri.as_str()), ("language", language)],
        )?;
        self.get_list(url).await
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        language: &str,
        mode: MatchMode,
    ) -> Result<Vec<RawRecord>> {
        if keyword.trim().is_empty() {
            warn!(keyword, "empty keyword passed, returning no concepts");
            return Ok(Vec::new());
        }

        let search_mode = mode.wire_value().to_string();
        let thesaurus_uri = EntryKind::Concept.thesaurus_uri();
        let url = self.endpoint(
            "getConceptsMatchingKeyword",
            &[
                ("keyword", keyword),
                ("search_mode", search_mode.as_str()),
                ("thesaurus_uri", thesaurus_uri.as_str()),
                ("language", language),
            ],
        )?;
        self.get_list(url).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse the base URL, making sure it ends with `/` so methods join below it.
fn prepare_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    Url::parse(&with_slash)
        .map_err(|e| ThesaurusError::config(format!("invalid service url '{raw}': {e}")))
}
