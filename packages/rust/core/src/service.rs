//! Query facade over a catalog transport.

use tracing::{debug, info, instrument, warn};

use thesaurus_shared::{
    CatalogTransport, MatchMode, RecordFormat, RelatedTerm, ServiceSettings, Term, TermTree,
};

use crate::catalog::LenientCatalog;
use crate::hierarchy::HierarchyBuilder;
use crate::matcher::{keywords_from_text, match_all, process_keywords};
use crate::normalize::{RawConcept, normalize, normalize_record};
use crate::related;

/// Vocabulary lookups, searches and hierarchy views.
///
/// Every operation takes an optional language; `None` (or a blank value)
/// falls back to the configured default. Region suffixes such as `de-AT`
/// are reduced to the language. Catalog failures never surface as errors:
/// they yield `None`, an empty list or an empty tree.
pub struct ThesaurusService<C> {
    catalog: C,
    settings: ServiceSettings,
}

impl<C: CatalogTransport> ThesaurusService<C> {
    pub fn new(catalog: C, settings: ServiceSettings) -> Self {
        Self { catalog, settings }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    fn language(&self, requested: Option<&str>) -> String {
        requested
            .and_then(language_code)
            .or_else(|| language_code(&self.settings.default_language))
            .unwrap_or_else(|| self.settings.default_language.clone())
    }

    /// Configured alternate language, reduced like requested languages.
    fn alternate_language(&self) -> Option<String> {
        self.settings
            .alternate_language
            .as_deref()
            .and_then(language_code)
    }

    fn lenient(&self) -> LenientCatalog<'_, C> {
        LenientCatalog::new(&self.catalog)
    }

    fn hierarchy(&self) -> HierarchyBuilder<'_, C> {
        HierarchyBuilder::new(&self.catalog)
    }

    /// Look up one entry by id.
    #[instrument(skip(self))]
    pub async fn term(&self, id: &str, language: Option<&str>) -> Option<Term> {
        if id.trim().is_empty() {
            warn!("blank term id");
            return None;
        }
        let language = self.language(language);

        match self.settings.record_format {
            RecordFormat::Json => {
                let record = self.lenient().record(id, &language).await?;
                let term = normalize_record(&record, &language);
                Some(self.with_alternate_name(term, &language).await)
            }
            RecordFormat::Rdf => {
                let graph = self.lenient().graph(id).await?;
                let term = normalize(&graph, &language);
                let alternate = self
                    .alternate_language()
                    .and_then(|alt| RawConcept::Graph(&graph).name(&alt));
                Some(term.with_alternate_name(alternate))
            }
        }
    }

    /// Search for `query` with `mode`.
    ///
    /// Multi-word queries are also searched word by word, and only terms
    /// whose name contains every word survive. Exact searches also carry
    /// the alternate-language name.
    #[instrument(skip(self))]
    pub async fn find_terms_from_query(
        &self,
        query: &str,
        mode: MatchMode,
        language: Option<&str>,
    ) -> Vec<Term> {
        let query = query.trim();
        if query.is_empty() {
            warn!("blank query");
            return Vec::new();
        }

        let language = self.language(language);
        let mode = if self.settings.force_contains {
            MatchMode::Contains
        } else {
            mode
        };

        let catalog = self.lenient();
        let mut batches = vec![catalog.search(query, &language, mode).await];

        let keywords = process_keywords(query.split_whitespace(), self.settings.analyze_max_words);
        if keywords.len() > 1 {
            for keyword in &keywords {
                batches.push(catalog.search(keyword, &language, mode).await);
            }
        }

        let terms = match_all(&batches, &keywords, &language);

        if mode != MatchMode::Exact || self.alternate_language().is_none() {
            return terms;
        }
        let mut enriched = Vec::with_capacity(terms.len());
        for term in terms {
            enriched.push(self.with_alternate_name(term, &language).await);
        }
        enriched
    }

    /// Terms whose name contains every one of `names`.
    #[instrument(skip(self))]
    pub async fn similar_terms(&self, names: &[String], language: Option<&str>) -> Vec<Term> {
        let keywords = process_keywords(
            names.iter().map(String::as_str),
            self.settings.analyze_max_words,
        );
        if keywords.is_empty() {
            warn!("no usable names for similarity search");
            return Vec::new();
        }

        let language = self.language(language);
        let catalog = self.lenient();

        let mut batches = Vec::with_capacity(keywords.len());
        for keyword in &keywords {
            batches.push(catalog.search(keyword, &language, MatchMode::Contains).await);
        }

        match_all(&batches, &keywords, &language)
    }

    /// Terms named exactly like one of the first `max_words` words of
    /// `text`.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn terms_from_text(
        &self,
        text: &str,
        max_words: usize,
        language: Option<&str>,
    ) -> Vec<Term> {
        if text.trim().is_empty() {
            warn!("blank text");
            return Vec::new();
        }

        let max_words = max_words.min(self.settings.analyze_max_words);
        let keywords = keywords_from_text(text, max_words);
        if keywords.is_empty() {
            debug!("text has no usable words");
            return Vec::new();
        }

        let language = self.language(language);
        let catalog = self.lenient();

        let mut batches = Vec::with_capacity(keywords.len());
        for keyword in &keywords {
            batches.push(catalog.search(keyword, &language, MatchMode::Exact).await);
        }

        let terms = match_all(&batches, &[], &language);
        info!(words = keywords.len(), found = terms.len(), "analyzed text");
        terms
    }

    /// The top-level entries.
    pub async fn top_level(&self, language: Option<&str>) -> TermTree {
        let language = self.language(language);
        self.hierarchy().top_level(&language).await
    }

    /// Children of `id`; the top level when `id` is `None`.
    pub async fn next_level(&self, id: Option<&str>, language: Option<&str>) -> TermTree {
        let language = self.language(language);
        match id {
            None => self.hierarchy().top_level(&language).await,
            Some(id) if id.trim().is_empty() => {
                warn!("blank parent id");
                TermTree::new()
            }
            Some(id) => self.hierarchy().next_level(id.trim(), &language).await,
        }
    }

    /// Path from `id` up to the top level.
    pub async fn path_to_top(&self, id: &str, language: Option<&str>) -> TermTree {
        if id.trim().is_empty() {
            warn!("blank term id");
            return TermTree::new();
        }
        let language = self.language(language);
        self.hierarchy().path_to_top(id.trim(), &language).await
    }

    /// Every neighbour of `id`, tagged parent, child or relative.
    pub async fn related_terms(&self, id: &str, language: Option<&str>) -> Vec<RelatedTerm> {
        if id.trim().is_empty() {
            warn!("blank term id");
            return Vec::new();
        }
        let language = self.language(language);
        related::related_terms(&self.catalog, id.trim(), &language).await
    }

    /// Attach the alternate-language name, fetching the entry again when
    /// the alternate differs from `language`.
    async fn with_alternate_name(&self, term: Term, language: &str) -> Term {
        let Some(alternate) = self.alternate_language() else {
            return term;
        };

        if alternate == language {
            let name = term.name.clone();
            return term.with_alternate_name(name);
        }

        let name = self
            .lenient()
            .record(&term.id, &alternate)
            .await
            .and_then(|record| normalize_record(&record, &alternate).name);
        term.with_alternate_name(name)
    }
}

/// Reduce a language tag such as ` de-AT` or `EN_gb` to its lowercase
/// language code. `None` for blank input.
fn language_code(tag: &str) -> Option<String> {
    let tag = tag.trim();
    let code = tag.split(['-', '_']).next().unwrap_or(tag).trim();
    (!code.is_empty()).then(|| code.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use thesaurus_shared::{ConceptGraph, TermType, predicates};

    use crate::testing::{MemoryCatalog, concept, supergroup};

    fn settings() -> ServiceSettings {
        ServiceSettings {
            default_language: "de".into(),
            ..ServiceSettings::default()
        }
    }

    fn water_catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .entry(&concept(9242), "de", "Wasser")
            .entry(&concept(9242), "en", "water (substance)")
            .entry(&concept(9305), "de", "Wasserschutz")
            .entry(&concept(9306), "de", "Wasserschutzgebiet")
            .entry(&concept(6962), "de", "Schutzgebiet")
            .entry(&concept(4869), "de", "Grundwasser")
            .entry(&supergroup(5499), "de", "NATURRAUM, ANTHROPOGENER RAUM")
            .top(&supergroup(5499))
    }

    #[tokio::test]
    async fn exact_search_finds_one_descriptor() {
        let service = ThesaurusService::new(water_catalog(), settings());
        let terms = service
            .find_terms_from_query("Wasser", MatchMode::Exact, None)
            .await;

        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].term_type, TermType::Descriptor);
        assert_eq!(terms[0].name.as_deref(), Some("Wasser"));
        assert!(terms[0].alternate_name.is_none());
    }

    #[tokio::test]
    async fn exact_search_carries_alternate_name() {
        let settings = ServiceSettings {
            alternate_language: Some("en".into()),
            ..settings()
        };
        let service = ThesaurusService::new(water_catalog(), settings);
        let terms = service
            .find_terms_from_query("wasser", MatchMode::Exact, Some("de"))
            .await;

        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].alternate_name.as_deref(), Some("water (substance)"));
    }

    #[tokio::test]
    async fn multi_word_query_requires_every_word() {
        let service = ThesaurusService::new(water_catalog(), settings());
        let terms = service
            .find_terms_from_query("Wasser Schutz", MatchMode::Contains, None)
            .await;

        let names: Vec<_> = terms.iter().map(Term::display_name).collect();
        assert_eq!(names, vec!["Wasserschutz", "Wasserschutzgebiet"]);
    }

    #[tokio::test]
    async fn forced_contains_overrides_mode() {
        let settings = ServiceSettings {
            force_contains: true,
            ..settings()
        };
        let service = ThesaurusService::new(water_catalog(), settings);
        let terms = service
            .find_terms_from_query("schutz", MatchMode::Exact, None)
            .await;

        let names: Vec<_> = terms.iter().map(Term::display_name).collect();
        assert_eq!(names, vec!["Wasserschutz", "Wasserschutzgebiet", "Schutzgebiet"]);
    }

    #[tokio::test]
    async fn blank_query_makes_no_requests() {
        let service = ThesaurusService::new(water_catalog(), settings());
        assert!(
            service
                .find_terms_from_query("   ", MatchMode::Contains, None)
                .await
                .is_empty()
        );
        assert_eq!(service.catalog().requests(), 0);
    }

    #[tokio::test]
    async fn failed_search_is_empty() {
        let catalog = water_catalog().failing("Wasser");
        let service = ThesaurusService::new(catalog, settings());
        assert!(
            service
                .find_terms_from_query("Wasser", MatchMode::Exact, None)
                .await
                .is_empty()
        );
    }

    #[tokio::test]
    async fn similar_terms_intersect_names() {
        let service = ThesaurusService::new(water_catalog(), settings());
        let names = vec!["wasser".to_string(), "gebiet.".to_string()];
        let terms = service.similar_terms(&names, None).await;

        let names: Vec<_> = terms.iter().map(Term::display_name).collect();
        assert_eq!(names, vec!["Wasserschutzgebiet"]);
    }

    #[tokio::test]
    async fn text_analysis_matches_exact_words() {
        let service = ThesaurusService::new(water_catalog(), settings());
        let terms = service
            .terms_from_text("Das Grundwasser ist Wasser, kein Schutzgebiet.", 10, None)
            .await;

        let names: Vec<_> = terms.iter().map(Term::display_name).collect();
        assert_eq!(names, vec!["Grundwasser", "Wasser", "Schutzgebiet"]);
    }

    #[tokio::test]
    async fn text_analysis_respects_word_limit() {
        let service = ThesaurusService::new(water_catalog(), settings());
        let terms = service
            .terms_from_text("Das Grundwasser ist Wasser", 2, None)
            .await;

        let names: Vec<_> = terms.iter().map(Term::display_name).collect();
        assert_eq!(names, vec!["Grundwasser"]);
    }

    #[tokio::test]
    async fn single_word_text_is_searched() {
        let service = ThesaurusService::new(water_catalog(), settings());
        let terms = service.terms_from_text("Wasser", 10, None).await;
        assert_eq!(terms.len(), 1);
    }

    #[tokio::test]
    async fn term_from_json_with_alternate() {
        let settings = ServiceSettings {
            alternate_language: Some("en".into()),
            ..settings()
        };
        let service = ThesaurusService::new(water_catalog(), settings);
        let term = service.term(&concept(9242), Some("de-DE")).await.expect("term");

        assert_eq!(term.name.as_deref(), Some("Wasser"));
        assert_eq!(term.alternate_name.as_deref(), Some("water (substance)"));
        assert_eq!(term.alternate_id.as_deref(), Some(concept(9242).as_str()));
    }

    #[tokio::test]
    async fn term_with_same_alternate_language() {
        let settings = ServiceSettings {
            alternate_language: Some("de".into()),
            ..settings()
        };
        let service = ThesaurusService::new(water_catalog(), settings);
        let term = service.term(&concept(9242), None).await.expect("term");
        assert_eq!(term.alternate_name.as_deref(), Some("Wasser"));
    }

    #[tokio::test]
    async fn term_from_graph() {
        let mut graph = ConceptGraph::new(concept(9242));
        graph.push_literal(predicates::SKOS_PREF_LABEL, "Wasser", Some("de"));
        graph.push_literal(predicates::SKOS_PREF_LABEL, "eau (substance)", Some("fr"));

        let settings = ServiceSettings {
            alternate_language: Some("fr".into()),
            record_format: RecordFormat::Rdf,
            ..settings()
        };
        let service = ThesaurusService::new(MemoryCatalog::new().graph(graph), settings);
        let term = service.term(&concept(9242), None).await.expect("term");

        assert_eq!(term.name.as_deref(), Some("Wasser"));
        assert_eq!(term.alternate_name.as_deref(), Some("eau (substance)"));
        assert_eq!(term.term_type, TermType::Descriptor);
    }

    #[tokio::test]
    async fn unknown_term_is_none() {
        let service = ThesaurusService::new(water_catalog(), settings());
        assert!(service.term(&concept(404), None).await.is_none());
        assert!(service.term(" ", None).await.is_none());
    }

    #[tokio::test]
    async fn next_level_without_id_is_top_level() {
        let service = ThesaurusService::new(water_catalog(), settings());
        let tree = service.next_level(None, None).await;

        assert_eq!(tree.entries().len(), 1);
        let top = tree.node(tree.entries()[0]);
        assert_eq!(top.id(), supergroup(5499));
        assert!(top.children().is_deferred());
    }

    #[tokio::test]
    async fn blank_ids_make_no_requests() {
        let service = ThesaurusService::new(water_catalog(), settings());
        assert!(service.next_level(Some(""), None).await.is_empty());
        assert!(service.path_to_top("  ", None).await.is_empty());
        assert!(service.related_terms("", None).await.is_empty());
        assert_eq!(service.catalog().requests(), 0);
    }

    #[tokio::test]
    async fn alternate_language_is_reduced_like_requested_ones() {
        for alternate in ["EN", " en-GB", "en_US"] {
            let settings = ServiceSettings {
                alternate_language: Some(alternate.into()),
                ..settings()
            };
            let service = ThesaurusService::new(water_catalog(), settings);

            let term = service.term(&concept(9242), None).await.expect("term");
            assert_eq!(
                term.alternate_name.as_deref(),
                Some("water (substance)"),
                "alternate {alternate:?}"
            );

            let terms = service
                .find_terms_from_query("Wasser", MatchMode::Exact, None)
                .await;
            assert_eq!(terms[0].alternate_name.as_deref(), Some("water (substance)"));
        }
    }

    #[tokio::test]
    async fn alternate_equal_to_requested_after_reduction_reuses_name() {
        let settings = ServiceSettings {
            alternate_language: Some("DE-at".into()),
            ..settings()
        };
        let service = ThesaurusService::new(water_catalog(), settings);
        let term = service.term(&concept(9242), Some("de")).await.expect("term");

        assert_eq!(term.alternate_name.as_deref(), Some("Wasser"));
        // One lookup, no second fetch for the alternate
        assert_eq!(service.catalog().requests(), 1);
    }

    #[tokio::test]
    async fn blank_alternate_language_is_ignored() {
        let settings = ServiceSettings {
            alternate_language: Some("  ".into()),
            ..settings()
        };
        let service = ThesaurusService::new(water_catalog(), settings);
        let term = service.term(&concept(9242), None).await.expect("term");
        assert!(term.alternate_name.is_none());
    }

    #[tokio::test]
    async fn similar_terms_without_usable_names_make_no_requests() {
        let service = ThesaurusService::new(water_catalog(), settings());

        assert!(service.similar_terms(&[], None).await.is_empty());

        let punctuation = vec!["...".to_string(), "!?".to_string(), " ".to_string()];
        assert!(service.similar_terms(&punctuation, None).await.is_empty());

        assert_eq!(service.catalog().requests(), 0);
    }

    #[tokio::test]
    async fn text_without_usable_words_makes_no_requests() {
        let service = ThesaurusService::new(water_catalog(), settings());
        assert!(service.terms_from_text("  ", 10, None).await.is_empty());
        assert!(service.terms_from_text("-- ... ,", 10, None).await.is_empty());
        assert_eq!(service.catalog().requests(), 0);
    }

    #[test]
    fn language_codes() {
        assert_eq!(language_code(" de-AT ").as_deref(), Some("de"));
        assert_eq!(language_code("EN_gb").as_deref(), Some("en"));
        assert_eq!(language_code("  "), None);
        assert_eq!(language_code("-x"), None);
    }

    #[test]
    fn language_fallback_and_region() {
        let service = ThesaurusService::new(MemoryCatalog::new(), settings());
        assert_eq!(service.language(None), "de");
        assert_eq!(service.language(Some(" ")), "de");
        assert_eq!(service.language(Some("en_GB")), "en");
        assert_eq!(service.language(Some("FR")), "fr");
    }
}
