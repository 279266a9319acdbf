//! Keyword preparation and result filtering for catalog searches.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use thesaurus_shared::{RawRecord, Term};

use crate::normalize::normalize_record;

static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{P}").expect("valid punctuation regex"));

/// Prepare search keywords: keep at most `max_keywords` tokens, strip
/// punctuation and drop whatever ends up empty.
pub fn process_keywords<'a, I>(tokens: I, max_keywords: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .take(max_keywords)
        .map(|token| PUNCTUATION_RE.replace_all(token, "").trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Split free text on whitespace and prepare the words as keywords.
pub fn keywords_from_text(text: &str, max_keywords: usize) -> Vec<String> {
    process_keywords(text.split_whitespace(), max_keywords)
}

/// Lowercase `text` following the casing rules of `language`.
pub fn lowercase(text: &str, language: &str) -> String {
    match language {
        // Dotted and dotless I are distinct letters here
        "tr" | "az" => text.replace('I', "ı").replace('İ', "i").to_lowercase(),
        _ => text.to_lowercase(),
    }
}

/// Merge search result batches into one list of terms.
///
/// Terms without a name in `language` are dropped. When `keyword_filter`
/// is non-empty, a term is kept only if its lowercased name contains every
/// lowercased keyword. Terms are deduplicated by name; the first
/// occurrence wins and result order follows the batches.
pub fn match_all(batches: &[Vec<RawRecord>], keyword_filter: &[String], language: &str) -> Vec<Term> {
    let filter: Vec<String> = keyword_filter
        .iter()
        .map(|keyword| lowercase(keyword.trim(), language))
        .filter(|keyword| !keyword.is_empty())
        .collect();

    let mut seen = HashSet::new();
    let mut matched = Vec::new();

    for record in batches.iter().flatten() {
        let term = normalize_record(record, language);
        let Some(name) = term.name.as_deref() else {
            debug!(id = %term.id, language, "term has no name in requested language, dropping");
            continue;
        };

        if !filter.is_empty() {
            let lowered = lowercase(name, language);
            if !filter.iter().all(|keyword| lowered.contains(keyword.as_str())) {
                continue;
            }
        }

        if seen.insert(name.to_string()) {
            matched.push(term);
        }
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use thesaurus_shared::LocalizedString;

    fn concept(n: u32, label: &str) -> RawRecord {
        RawRecord::labeled(
            format!("http://www.eionet.europa.eu/gemet/concept/{n}"),
            label,
            "de",
        )
    }

    fn names(terms: &[Term]) -> Vec<&str> {
        terms.iter().map(|t| t.display_name()).collect()
    }

    fn water_batches() -> Vec<Vec<RawRecord>> {
        vec![
            vec![concept(9242, "Wasser"), concept(9305, "Wasserschutz")],
            vec![
                concept(9305, "Wasserschutz"),
                concept(9306, "Wasserschutzgebiet"),
                concept(6962, "Schutzgebiet"),
            ],
        ]
    }

    #[test]
    fn and_filter_keeps_names_with_every_keyword() {
        let filter = vec!["wasser".to_string(), "schutz".to_string()];
        let terms = match_all(&water_batches(), &filter, "de");
        assert_eq!(names(&terms), vec!["Wasserschutz", "Wasserschutzgebiet"]);
    }

    #[test]
    fn filter_is_case_insensitive() {
        let filter = vec!["WASSER".to_string()];
        let terms = match_all(&water_batches(), &filter, "de");
        assert_eq!(
            names(&terms),
            vec!["Wasser", "Wasserschutz", "Wasserschutzgebiet"]
        );
    }

    #[test]
    fn empty_filter_is_a_superset() {
        let filter = vec!["wasser".to_string(), "schutz".to_string()];
        let filtered = match_all(&water_batches(), &filter, "de");
        let all = match_all(&water_batches(), &[], "de");

        assert_eq!(all.len(), 4);
        for term in &filtered {
            assert!(all.iter().any(|t| t.name == term.name));
        }
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let batches = vec![
            vec![concept(1, "Lärm")],
            vec![concept(2, "Lärm"), concept(3, "Lärmschutz")],
        ];
        let terms = match_all(&batches, &[], "de");

        assert_eq!(names(&terms), vec!["Lärm", "Lärmschutz"]);
        assert!(terms[0].id.ends_with("/1"));
    }

    #[test]
    fn nameless_terms_are_dropped() {
        let untranslated = RawRecord {
            uri: "http://www.eionet.europa.eu/gemet/concept/7".into(),
            preferred_label: Some(LocalizedString {
                string: "noise".into(),
                language: Some("en".into()),
            }),
            definition: None,
            thesaurus: None,
        };
        let batches = vec![vec![untranslated, concept(1, "Lärm")]];

        let terms = match_all(&batches, &[], "de");
        assert_eq!(names(&terms), vec!["Lärm"]);
    }

    #[test]
    fn no_batches_no_terms() {
        assert!(match_all(&[], &[], "de").is_empty());
        assert!(match_all(&[], &["wasser".to_string()], "de").is_empty());
        assert!(match_all(&[vec![], vec![]], &[], "de").is_empty());
    }

    #[test]
    fn blank_keywords_do_not_filter() {
        let filter = vec!["  ".to_string()];
        assert_eq!(match_all(&water_batches(), &filter, "de").len(), 4);
    }

    #[test]
    fn keywords_strip_punctuation_and_empties() {
        let keywords = process_keywords(["Wasser,", "(Schutz)", "--", "Gebiet!"], 10);
        assert_eq!(keywords, vec!["Wasser", "Schutz", "Gebiet"]);
    }

    #[test]
    fn keywords_are_capped_before_filtering() {
        let keywords = keywords_from_text("eins zwei ... drei vier", 3);
        assert_eq!(keywords, vec!["eins", "zwei"]);
    }

    #[test]
    fn turkish_lowercase() {
        assert_eq!(lowercase("IRMAK", "tr"), "ırmak");
        assert_eq!(lowercase("İZMİR", "tr"), "izmir");
        assert_eq!(lowercase("IRMAK", "de"), "irmak");
    }
}
