//! Whole-token skill matching against a catalog

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::catalog::SkillCatalog;
use crate::processing::normalizer::{is_word_char, normalize};
use aho_corasick::{AhoCorasick, MatchKind};

/// Matches every catalog term in one pass over the text.
///
/// Candidates come from an overlapping Aho-Corasick search, so terms that share
/// a prefix ("java" / "javascript", "c" / "c++") are all reported. A candidate
/// only counts when no word character touches either end of its span. Terms are
/// matched as literal bytes; regex metacharacters carry no meaning.
pub struct SkillMatcher {
    automaton: AhoCorasick,
    terms: Vec<String>,
}

impl SkillMatcher {
    pub fn new(catalog: &SkillCatalog) -> Result<Self> {
        let terms = catalog.terms().to_vec();
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&terms)
            .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to build skill matcher: {}", e)))?;

        Ok(Self { automaton, terms })
    }

    /// Sorted list of catalog terms found in `text`. The text is case-folded first.
    pub fn find(&self, text: &str) -> Vec<String> {
        self.find_normalized(&normalize(text))
    }

    /// Like [`find`](Self::find) for text that is already lower-cased.
    pub fn find_normalized(&self, text: &str) -> Vec<String> {
        let mut found = self.find_in_catalog_order(text);
        found.sort();
        found
    }

    /// Found terms in catalog declaration order. `text` must already be lower-cased.
    pub fn find_in_catalog_order(&self, text: &str) -> Vec<String> {
        self.presence(text)
            .into_iter()
            .zip(&self.terms)
            .filter_map(|(present, term)| present.then(|| term.clone()))
            .collect()
    }

    /// One flag per catalog term, in catalog order. `text` must already be lower-cased.
    pub fn presence(&self, text: &str) -> Vec<bool> {
        let mut hits = vec![false; self.terms.len()];
        if text.is_empty() {
            return hits;
        }

        for mat in self.automaton.find_overlapping_iter(text) {
            let idx = mat.pattern().as_usize();
            if !hits[idx] && is_whole_token(text, mat.start(), mat.end()) {
                hits[idx] = true;
            }
        }

        hits
    }

    pub fn skill_count(&self) -> usize {
        self.terms.len()
    }
}

/// True when the span `[start, end)` is not glued to a word character on either side.
fn is_whole_token(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Convenience wrapper: sorted catalog terms present in `text`.
pub fn match_skills(text: &str, catalog: &SkillCatalog) -> Result<Vec<String>> {
    Ok(SkillMatcher::new(catalog)?.find(text))
}
