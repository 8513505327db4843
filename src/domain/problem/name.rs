//! Problem display names and their slug conversions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ProblemSlug, ValidationError};

/// Punctuation permitted in a problem name besides letters, digits, and spaces.
const NAME_PUNCTUATION: &str = "-+.,$'()";

/// Words kept lowercase by ordinary titlecase rules unless first or last.
const SMALL_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "of", "on", "or", "the",
    "to", "v", "via", "vs",
];

/// Display name of a problem.
///
/// Names are stored titlecased. The slug form is the lowercased name with
/// spaces replaced by underscores, so two names differing only in case or
/// spacing identify the same problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemName(String);

impl ProblemName {
    /// Creates a ProblemName from raw input, trimming and titlecasing it.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let titled = titlecase(&trimmed);
        let valid = titled
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || NAME_PUNCTUATION.contains(c));
        if !valid {
            return Err(ValidationError::invalid_format(
                "name",
                "only letters, digits, spaces, and -+.,$'() are allowed",
            ));
        }
        let length = titled.chars().count();
        if length > 60 {
            return Err(ValidationError::too_long("name", 60, length));
        }
        Ok(Self(titled))
    }

    /// Recovers a display name from a slug, assuming ordinary titlecase rules.
    pub fn from_slug(slug: &ProblemSlug) -> Result<Self, ValidationError> {
        Self::new(slug.as_str().replace('_', " "))
    }

    /// Derives the slug identifying this problem.
    pub fn slug(&self) -> ProblemSlug {
        ProblemSlug::from_normalized(self.0.to_lowercase().replace(' ', "_"))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Titlecases a phrase: capitalizes each word, keeps small words lowercase
/// unless first or last, and passes words with interior capitals through
/// unchanged so acronyms survive.
fn titlecase(input: &str) -> String {
    let words: Vec<&str> = input.split_whitespace().collect();
    let last = words.len().saturating_sub(1);
    let mut titled = Vec::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        let lowered = word.to_lowercase();
        if word.chars().skip(1).any(|c| c.is_ascii_uppercase()) {
            titled.push((*word).to_string());
        } else if i != 0 && i != last && SMALL_WORDS.contains(&lowered.as_str()) {
            titled.push(lowered);
        } else {
            titled.push(capitalize_first(&lowered));
        }
    }
    titled.join(" ")
}

/// Uppercases the first letter of a word, skipping leading punctuation.
fn capitalize_first(word: &str) -> String {
    let mut capitalized = false;
    word.chars()
        .map(|c| {
            if !capitalized && c.is_ascii_alphabetic() {
                capitalized = true;
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn name_titlecases_plain_words() {
        let name = ProblemName::new("poverty in appalachia").unwrap();
        assert_eq!(name.as_str(), "Poverty in Appalachia");
    }

    #[test]
    fn name_capitalizes_small_word_when_first_or_last() {
        let name = ProblemName::new("the war on drugs").unwrap();
        assert_eq!(name.as_str(), "The War on Drugs");
    }

    #[test]
    fn name_preserves_acronyms() {
        let name = ProblemName::new("HIV prevalence").unwrap();
        assert_eq!(name.as_str(), "HIV Prevalence");
    }

    #[test]
    fn name_capitalizes_after_leading_punctuation() {
        let name = ProblemName::new("homelessness (urban)").unwrap();
        assert_eq!(name.as_str(), "Homelessness (Urban)");
    }

    #[test]
    fn name_trims_and_collapses_whitespace() {
        let name = ProblemName::new("  water   scarcity  ").unwrap();
        assert_eq!(name.as_str(), "Water Scarcity");
    }

    #[test]
    fn name_rejects_empty_string() {
        match ProblemName::new("   ") {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "name"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn name_rejects_disallowed_characters() {
        assert!(ProblemName::new("pollution!").is_err());
        assert!(ProblemName::new("café culture").is_err());
    }

    #[test]
    fn name_rejects_overlong_value() {
        let raw = "word ".repeat(15);
        match ProblemName::new(raw) {
            Err(ValidationError::TooLong { field, max, .. }) => {
                assert_eq!(field, "name");
                assert_eq!(max, 60);
            }
            _ => panic!("Expected TooLong error"),
        }
    }

    #[test]
    fn name_converts_to_slug() {
        let name = ProblemName::new("Poverty in Appalachia").unwrap();
        assert_eq!(name.slug().as_str(), "poverty_in_appalachia");
    }

    #[test]
    fn name_recovered_from_slug() {
        let slug = ProblemSlug::new("war_on_drugs").unwrap();
        let name = ProblemName::from_slug(&slug).unwrap();
        assert_eq!(name.as_str(), "War on Drugs");
    }

    #[test]
    fn name_slug_keeps_punctuation() {
        let name = ProblemName::new("k-12 (public) education").unwrap();
        assert_eq!(name.slug().as_str(), "k-12_(public)_education");
    }

    proptest! {
        #[test]
        fn name_slug_round_trips_for_ordinary_names(
            words in prop::collection::vec("[a-z]{1,8}", 1..5)
        ) {
            let raw = words.join(" ");
            let name = ProblemName::new(&raw).unwrap();
            let recovered = ProblemName::from_slug(&name.slug()).unwrap();
            prop_assert_eq!(name, recovered);
        }
    }
}
