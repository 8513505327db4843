//! Problem aggregate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ProblemSlug, ValidationError};

use super::image::{normalize_url, ImageUrl};
use super::name::ProblemName;

/// A problem in the network, identified by its slug.
///
/// The name is fixed at creation; renaming would change the slug and with
/// it the identity of every connection touching the problem. Descriptive
/// fields may be replaced through uploads, images only accumulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    name: ProblemName,
    slug: ProblemSlug,
    definition: Option<String>,
    definition_url: Option<String>,
    sponsor: Option<String>,
    images: Vec<ImageUrl>,
}

impl Problem {
    /// Creates a problem with no descriptive fields yet.
    pub fn new(name: ProblemName) -> Self {
        let slug = name.slug();
        Self {
            name,
            slug,
            definition: None,
            definition_url: None,
            sponsor: None,
            images: Vec::new(),
        }
    }

    pub fn name(&self) -> &ProblemName {
        &self.name
    }

    pub fn slug(&self) -> &ProblemSlug {
        &self.slug
    }

    pub fn definition(&self) -> Option<&str> {
        self.definition.as_deref()
    }

    pub fn definition_url(&self) -> Option<&str> {
        self.definition_url.as_deref()
    }

    pub fn sponsor(&self) -> Option<&str> {
        self.sponsor.as_deref()
    }

    pub fn images(&self) -> &[ImageUrl] {
        &self.images
    }

    /// Replaces the definition, clearing it when blank.
    ///
    /// Returns true when the stored value changed.
    pub fn set_definition(&mut self, definition: &str) -> Result<bool, ValidationError> {
        let trimmed = definition.trim();
        let length = trimmed.chars().count();
        if length > 200 {
            return Err(ValidationError::too_long("definition", 200, length));
        }
        let value = (!trimmed.is_empty()).then(|| trimmed.to_string());
        Ok(self.replace_definition(value))
    }

    fn replace_definition(&mut self, value: Option<String>) -> bool {
        if value != self.definition {
            self.definition = value;
            true
        } else {
            false
        }
    }

    /// Replaces the definition source URL, clearing it when blank.
    pub fn set_definition_url(&mut self, url: &str) -> Result<bool, ValidationError> {
        let value = if url.trim().is_empty() {
            None
        } else {
            Some(normalize_url("definition_url", url)?)
        };
        if value != self.definition_url {
            self.definition_url = value;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Replaces the sponsor, clearing it when blank.
    pub fn set_sponsor(&mut self, sponsor: &str) -> Result<bool, ValidationError> {
        let trimmed = sponsor.trim();
        let length = trimmed.chars().count();
        if length > 60 {
            return Err(ValidationError::too_long("sponsor", 60, length));
        }
        let value = (!trimmed.is_empty()).then(|| trimmed.to_string());
        if value != self.sponsor {
            self.sponsor = value;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Appends an image unless an equal one is already present.
    ///
    /// Returns true when the image was added.
    pub fn add_image(&mut self, image: ImageUrl) -> bool {
        if self.images.contains(&image) {
            false
        } else {
            self.images.push(image);
            true
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(name: &str) -> Problem {
        Problem::new(ProblemName::new(name).unwrap())
    }

    #[test]
    fn new_problem_derives_slug_from_name() {
        let problem = problem("Poverty in Appalachia");
        assert_eq!(problem.name().as_str(), "Poverty in Appalachia");
        assert_eq!(problem.slug().as_str(), "poverty_in_appalachia");
        assert!(problem.definition().is_none());
        assert!(problem.images().is_empty());
    }

    #[test]
    fn set_definition_trims_and_reports_change() {
        let mut problem = problem("Hunger");
        assert!(problem.set_definition("  Not enough food.  ").unwrap());
        assert_eq!(problem.definition(), Some("Not enough food."));
        assert!(!problem.set_definition("Not enough food.").unwrap());
    }

    #[test]
    fn set_definition_clears_on_blank() {
        let mut problem = problem("Hunger");
        problem.set_definition("Not enough food.").unwrap();
        assert!(problem.set_definition("   ").unwrap());
        assert!(problem.definition().is_none());
    }

    #[test]
    fn set_definition_rejects_overlong_value() {
        let mut problem = problem("Hunger");
        let result = problem.set_definition(&"x".repeat(201));
        assert!(matches!(result, Err(ValidationError::TooLong { .. })));
    }

    #[test]
    fn set_definition_url_normalizes_value() {
        let mut problem = problem("Hunger");
        assert!(problem
            .set_definition_url("HTTP://Example.ORG/hunger")
            .unwrap());
        assert_eq!(problem.definition_url(), Some("http://example.org/hunger"));
    }

    #[test]
    fn set_definition_url_rejects_bad_scheme() {
        let mut problem = problem("Hunger");
        assert!(problem.set_definition_url("gopher://example.org").is_err());
    }

    #[test]
    fn set_sponsor_replaces_when_changed() {
        let mut problem = problem("Hunger");
        assert!(problem.set_sponsor(" Food Bank ").unwrap());
        assert_eq!(problem.sponsor(), Some("Food Bank"));
        assert!(!problem.set_sponsor("Food Bank").unwrap());
        assert!(problem.set_sponsor("Relief Fund").unwrap());
        assert_eq!(problem.sponsor(), Some("Relief Fund"));
    }

    #[test]
    fn add_image_deduplicates() {
        let mut problem = problem("Hunger");
        let image = ImageUrl::new("http://example.org/a.png").unwrap();
        assert!(problem.add_image(image.clone()));
        assert!(!problem.add_image(image));
        assert_eq!(problem.images().len(), 1);
    }

    #[test]
    fn add_image_deduplicates_after_normalization() {
        let mut problem = problem("Hunger");
        problem.add_image(ImageUrl::new("http://example.org/a.png").unwrap());
        let same = ImageUrl::new("HTTP://EXAMPLE.ORG/a.png").unwrap();
        assert!(!problem.add_image(same));
    }
}
