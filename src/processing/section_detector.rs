//! Detection of the canonical resume sections

use crate::processing::normalizer::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical resume sections. Declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    #[serde(rename = "contact")]
    Contact,
    #[serde(rename = "summary/objective")]
    SummaryObjective,
    #[serde(rename = "education")]
    Education,
    #[serde(rename = "experience")]
    Experience,
    #[serde(rename = "projects")]
    Projects,
    #[serde(rename = "skills")]
    Skills,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Contact,
        SectionKind::SummaryObjective,
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Skills,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Contact => "contact",
            SectionKind::SummaryObjective => "summary/objective",
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Projects => "projects",
            SectionKind::Skills => "skills",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a rule's synonyms may sit inside the surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// No word character may touch either end of the phrase.
    WholeToken,
    /// The phrase may appear inside a longer word ("profile" in "profiles").
    Substring,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    pub kind: SectionKind,
    pub synonyms: &'static [&'static str],
    pub boundary: Boundary,
}

/// Fixed rule table, one entry per [`SectionKind`], in canonical order.
pub const SECTION_RULES: [SectionRule; 6] = [
    SectionRule {
        kind: SectionKind::Contact,
        synonyms: &["contact", "phone", "email", "linkedin", "github"],
        boundary: Boundary::Substring,
    },
    SectionRule {
        kind: SectionKind::SummaryObjective,
        synonyms: &["career objective", "summary", "objective", "profile"],
        boundary: Boundary::Substring,
    },
    SectionRule {
        kind: SectionKind::Education,
        synonyms: &["education"],
        boundary: Boundary::WholeToken,
    },
    SectionRule {
        kind: SectionKind::Experience,
        synonyms: &["experience", "work experience", "professional experience"],
        boundary: Boundary::WholeToken,
    },
    SectionRule {
        kind: SectionKind::Projects,
        synonyms: &["project", "projects", "personal projects"],
        boundary: Boundary::WholeToken,
    },
    SectionRule {
        kind: SectionKind::Skills,
        synonyms: &["skills", "technical skills", "core competencies"],
        boundary: Boundary::WholeToken,
    },
];

impl SectionRule {
    fn pattern(&self) -> String {
        let alternatives = self
            .synonyms
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");

        match self.boundary {
            Boundary::WholeToken => format!(r"\b(?:{})\b", alternatives),
            Boundary::Substring => format!("(?:{})", alternatives),
        }
    }
}

static COMPILED_RULES: Lazy<Vec<(SectionKind, Regex)>> = Lazy::new(|| {
    SECTION_RULES
        .iter()
        .map(|rule| {
            let regex = Regex::new(&rule.pattern()).expect("Invalid section rule pattern");
            (rule.kind, regex)
        })
        .collect()
});

/// Presence flag for every canonical section plus the present names in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFindings {
    pub present: Vec<SectionKind>,
    pub presence: BTreeMap<SectionKind, bool>,
}

impl SectionFindings {
    pub fn from_presence(presence: BTreeMap<SectionKind, bool>) -> Self {
        let present = presence
            .iter()
            .filter(|&(_, &found)| found)
            .map(|(&kind, _)| kind)
            .collect();

        Self { present, presence }
    }

    pub fn present_names(&self) -> Vec<String> {
        self.present.iter().map(|k| k.name().to_string()).collect()
    }

    /// Sections whose flag is false, in canonical order.
    pub fn missing(&self) -> Vec<SectionKind> {
        self.presence
            .iter()
            .filter(|&(_, &found)| !found)
            .map(|(&kind, _)| kind)
            .collect()
    }

    pub fn present_count(&self) -> usize {
        self.present.len()
    }

    pub fn total(&self) -> usize {
        self.presence.len()
    }
}

/// Detect sections in raw text. The text is case-folded first.
pub fn detect_sections(text: &str) -> SectionFindings {
    detect_sections_normalized(&normalize(text))
}

/// Detect sections in text that is already lower-cased.
pub fn detect_sections_normalized(text: &str) -> SectionFindings {
    let presence = COMPILED_RULES
        .iter()
        .map(|(kind, regex)| (*kind, regex.is_match(text)))
        .collect();

    SectionFindings::from_presence(presence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_all_keys_false() {
        let findings = detect_sections("");
        assert_eq!(findings.total(), 6);
        assert!(findings.presence.values().all(|&v| !v));
        assert!(findings.present.is_empty());
        assert_eq!(findings.missing(), SectionKind::ALL.to_vec());
    }

    #[test]
    fn test_present_names_in_canonical_order() {
        let text = "SKILLS\nRust\n\nEXPERIENCE\nAcme\n\nEducation\nBSc\n\nEmail: a@b.com";
        let findings = detect_sections(text);

        assert_eq!(
            findings.present_names(),
            vec!["contact", "education", "experience", "skills"]
        );
        assert_eq!(
            findings.missing(),
            vec![SectionKind::SummaryObjective, SectionKind::Projects]
        );
    }

    #[test]
    fn test_whole_token_sections() {
        assert!(!detect_sections("experienced engineer").presence[&SectionKind::Experience]);
        assert!(detect_sections("work experience:").presence[&SectionKind::Experience]);
        assert!(!detect_sections("skillset").presence[&SectionKind::Skills]);
        assert!(detect_sections("core competencies").presence[&SectionKind::Skills]);
        assert!(!detect_sections("coeducational").presence[&SectionKind::Education]);
    }

    #[test]
    fn test_project_singular_and_plural() {
        assert!(detect_sections("Project: compiler").presence[&SectionKind::Projects]);
        assert!(detect_sections("Personal Projects").presence[&SectionKind::Projects]);
        assert!(!detect_sections("projection").presence[&SectionKind::Projects]);
    }

    #[test]
    fn test_substring_sections() {
        assert!(detect_sections("Profiles on the web").presence[&SectionKind::SummaryObjective]);
        assert!(detect_sections("Career Objective").presence[&SectionKind::SummaryObjective]);
        assert!(detect_sections("github.com/someone").presence[&SectionKind::Contact]);
        assert!(detect_sections("Telephone 555").presence[&SectionKind::Contact]);
        assert!(!detect_sections("summa").presence[&SectionKind::SummaryObjective]);
    }

    #[test]
    fn test_all_sections_present() {
        let text = "Contact\nSummary\nEducation\nExperience\nProjects\nSkills";
        let findings = detect_sections(text);
        assert_eq!(findings.present_count(), 6);
        assert!(findings.missing().is_empty());
    }

    #[test]
    fn test_rule_table_matches_kinds() {
        let kinds: Vec<SectionKind> = SECTION_RULES.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, SectionKind::ALL.to_vec());
    }

    #[test]
    fn test_every_rule_compiles_and_matches_its_synonyms() {
        assert_eq!(COMPILED_RULES.len(), SECTION_RULES.len());

        for (rule, (kind, regex)) in SECTION_RULES.iter().zip(COMPILED_RULES.iter()) {
            assert_eq!(rule.kind, *kind);
            for synonym in rule.synonyms {
                assert!(regex.is_match(synonym), "{} does not match '{}'", kind, synonym);
            }
        }
    }

    #[test]
    fn test_section_kind_serializes_by_name() {
        let json = serde_json::to_string(&SectionKind::SummaryObjective).unwrap();
        assert_eq!(json, "\"summary/objective\"");
        assert_eq!(SectionKind::Projects.to_string(), "projects");
    }
}
