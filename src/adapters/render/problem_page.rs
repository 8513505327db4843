//! Server-rendered HTML for a community's problem page.
//!
//! Turns a community payload into a complete HTML document: the focal
//! problem's details on top, then one scrollable list per connection
//! category with each adjacent problem linked to its own community page.
//! The markup is deliberately plain so it can be styled or hydrated by any
//! frontend.

use crate::application::{CommunityPayload, CommunityPayloadEntry};
use crate::domain::problem::{ConnectionCategory, Problem};

/// Template-based generator for problem pages.
#[derive(Debug, Clone, Default)]
pub struct ProblemPageGenerator {
    // Configuration could be added here for customization
}

impl ProblemPageGenerator {
    /// Creates a new problem page generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the full HTML page for a community payload.
    pub fn generate(&self, payload: &CommunityPayload) -> String {
        let mut page = String::new();

        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n");
        page.push_str(&self.generate_head(payload.problem.name().as_str()));
        page.push_str("<body>\n<main class=\"community-page\">\n");
        page.push_str(&self.generate_problem_header(&payload.problem));
        page.push_str("<section class=\"connections\">\n");
        for (category, entries) in &payload.categories {
            page.push_str(&self.generate_category_section(*category, entries));
        }
        page.push_str("</section>\n</main>\n</body>\n</html>\n");

        page
    }

    /// Generates the document head.
    fn generate_head(&self, name: &str) -> String {
        let mut head = String::from("<head>\n<meta charset=\"utf-8\">\n");
        head.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        head.push_str(&format!(
            "<title>{} | Intertwine</title>\n",
            escape_html(name)
        ));
        head.push_str("</head>\n");
        head
    }

    /// Generates the focal problem's header: name, definition, sponsor, images.
    fn generate_problem_header(&self, problem: &Problem) -> String {
        let mut header = String::from("<header class=\"problem-header\">\n");
        header.push_str(&format!("<h1>{}</h1>\n", escape_html(problem.name().as_str())));

        if let Some(definition) = problem.definition() {
            header.push_str(&format!(
                "<p class=\"definition\">{}</p>\n",
                escape_html(definition)
            ));
        }
        if let Some(url) = problem.definition_url() {
            header.push_str(&format!(
                "<p class=\"definition-source\"><a href=\"{}\" rel=\"external\">{}</a></p>\n",
                escape_html(url),
                escape_html(url)
            ));
        }
        if let Some(sponsor) = problem.sponsor() {
            header.push_str(&format!(
                "<p class=\"sponsor\">Sponsored by {}</p>\n",
                escape_html(sponsor)
            ));
        }
        if !problem.images().is_empty() {
            header.push_str("<div class=\"problem-images\">\n");
            for image in problem.images() {
                header.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">\n",
                    escape_html(image.as_str()),
                    escape_html(problem.name().as_str())
                ));
            }
            header.push_str("</div>\n");
        }

        header.push_str("</header>\n");
        header
    }

    /// Generates one category's scroll container. An empty category still
    /// renders its container so client code can target it.
    fn generate_category_section(
        &self,
        category: ConnectionCategory,
        entries: &[CommunityPayloadEntry],
    ) -> String {
        let mut section = format!(
            "<section class=\"connection-list\" data-category=\"{}\">\n<h2>{}</h2>\n<ol class=\"connection-scroll\">\n",
            category,
            category_heading(category)
        );
        for entry in entries {
            section.push_str(&self.generate_entry(entry));
        }
        section.push_str("</ol>\n</section>\n");
        section
    }

    /// Generates one connection entry. Unrated connections carry no rating
    /// element at all, rather than a placeholder value.
    fn generate_entry(&self, entry: &CommunityPayloadEntry) -> String {
        let mut item = String::from("<li class=\"connection\">\n");
        item.push_str(&format!(
            "<a class=\"adjacent-problem\" href=\"{}\">{}</a>\n",
            escape_html(&entry.adjacent_community_url),
            escape_html(entry.adjacent_problem_name.as_str())
        ));
        if entry.aggregate.is_rated() {
            item.push_str(&format!(
                "<span class=\"rating\">{:.1}</span>\n",
                entry.aggregate.rating()
            ));
        }
        item.push_str("</li>\n");
        item
    }
}

/// Heading text for a connection category.
fn category_heading(category: ConnectionCategory) -> &'static str {
    match category {
        ConnectionCategory::Drivers => "Drivers",
        ConnectionCategory::Impacts => "Impacts",
        ConnectionCategory::Broader => "Broader Problems",
        ConnectionCategory::Narrower => "Narrower Problems",
    }
}

/// Escapes text for safe interpolation into HTML content and attributes.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::community::Community;
    use crate::domain::foundation::{ContributorId, GeoScope, OrgScope, ProblemSlug};
    use crate::domain::problem::{Connection, ConnectionAxis, ImageUrl, ProblemName};
    use crate::domain::rating::{
        AggregateRating, AggregationMethod, ContributedRating, RatingValue, RatingWeight,
    };

    fn test_generator() -> ProblemPageGenerator {
        ProblemPageGenerator::new()
    }

    fn slug(raw: &str) -> ProblemSlug {
        ProblemSlug::new(raw).unwrap()
    }

    fn community() -> Community {
        Community::new(
            slug("famine"),
            OrgScope::new("acme").unwrap(),
            GeoScope::global(),
        )
    }

    fn aggregate_with(
        connection: Connection,
        community: &Community,
        ratings: &[(i64, i64)],
    ) -> AggregateRating {
        let contributions: Vec<ContributedRating> = ratings
            .iter()
            .enumerate()
            .map(|(i, (rating, weight))| {
                ContributedRating::new(
                    connection.clone(),
                    community.problem().clone(),
                    community.org().clone(),
                    community.geo().clone(),
                    ContributorId::new(format!("user{}", i)).unwrap(),
                    RatingValue::try_from_i64(*rating).unwrap(),
                    RatingWeight::try_from_i64(*weight).unwrap(),
                )
                .unwrap()
            })
            .collect();
        AggregateRating::from_contributions(
            connection,
            community.clone(),
            AggregationMethod::Strict,
            &contributions,
        )
        .unwrap()
    }

    fn entry(
        community: &Community,
        driver: &str,
        ratings: &[(i64, i64)],
    ) -> CommunityPayloadEntry {
        let name = ProblemName::new(driver).unwrap();
        let connection =
            Connection::new(ConnectionAxis::Causal, name.slug(), community.problem().clone())
                .unwrap();
        let url = Community::uri_for(&name.slug(), community.org(), community.geo());
        CommunityPayloadEntry {
            aggregate: aggregate_with(connection, community, ratings),
            adjacent_problem_name: name,
            adjacent_community_url: url,
        }
    }

    fn test_payload() -> CommunityPayload {
        let community = community();
        let mut problem = Problem::new(ProblemName::new("Famine").unwrap());
        problem
            .set_definition("Widespread & severe lack of food.")
            .unwrap();
        problem
            .set_definition_url("https://example.org/famine")
            .unwrap();
        let categories = vec![
            (
                ConnectionCategory::Drivers,
                vec![
                    entry(&community, "Drought", &[(4, 1), (1, 1)]),
                    entry(&community, "Aquifer Depletion", &[]),
                ],
            ),
            (ConnectionCategory::Impacts, vec![]),
            (ConnectionCategory::Broader, vec![]),
            (ConnectionCategory::Narrower, vec![]),
        ];
        CommunityPayload {
            community,
            problem,
            aggregation: AggregationMethod::Strict,
            categories,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Problem Header Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn page_includes_problem_name_in_title_and_heading() {
        let page = test_generator().generate(&test_payload());

        assert!(page.contains("<title>Famine | Intertwine</title>"));
        assert!(page.contains("<h1>Famine</h1>"));
    }

    #[test]
    fn renders_definition_with_source_link() {
        let page = test_generator().generate(&test_payload());

        assert!(page.contains("Widespread &amp; severe lack of food."));
        assert!(page.contains("href=\"https://example.org/famine\""));
    }

    #[test]
    fn omits_definition_when_absent() {
        let mut payload = test_payload();
        payload.problem = Problem::new(ProblemName::new("Famine").unwrap());

        let page = test_generator().generate(&payload);

        assert!(!page.contains("class=\"definition\""));
        assert!(!page.contains("class=\"definition-source\""));
    }

    #[test]
    fn renders_sponsor_when_present() {
        let mut payload = test_payload();
        payload.problem.set_sponsor("Relief Works").unwrap();

        let page = test_generator().generate(&payload);

        assert!(page.contains("Sponsored by Relief Works"));
    }

    #[test]
    fn renders_problem_images() {
        let mut payload = test_payload();
        payload
            .problem
            .add_image(ImageUrl::new("https://example.org/famine.jpg").unwrap());

        let page = test_generator().generate(&payload);

        assert!(page.contains("<img src=\"https://example.org/famine.jpg\" alt=\"Famine\">"));
    }

    // ───────────────────────────────────────────────────────────────
    // Connection Section Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn renders_all_four_category_sections_in_order() {
        let page = test_generator().generate(&test_payload());

        let positions: Vec<usize> = ["drivers", "impacts", "broader", "narrower"]
            .iter()
            .map(|c| {
                page.find(&format!("data-category=\"{}\"", c))
                    .unwrap_or_else(|| panic!("missing category {}", c))
            })
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(page.contains("<h2>Broader Problems</h2>"));
    }

    #[test]
    fn empty_category_renders_container_without_entries() {
        let page = test_generator().generate(&test_payload());

        let narrower = page
            .split("data-category=\"narrower\"")
            .nth(1)
            .unwrap();
        let container = narrower.split("</section>").next().unwrap();
        assert!(container.contains("<ol class=\"connection-scroll\">"));
        assert!(!container.contains("<li"));
    }

    #[test]
    fn links_target_adjacent_communities() {
        let page = test_generator().generate(&test_payload());

        assert!(page.contains("href=\"/communities/drought?org=acme&amp;geo=global\""));
        assert!(page.contains(">Drought</a>"));
    }

    // ───────────────────────────────────────────────────────────────
    // Rating Display Tests
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn rated_connection_shows_one_decimal() {
        let page = test_generator().generate(&test_payload());

        // (4 + 1) / 2 with equal weights
        assert!(page.contains("<span class=\"rating\">2.5</span>"));
    }

    #[test]
    fn whole_number_rating_keeps_decimal_place() {
        let community = community();
        let mut payload = test_payload();
        payload.categories[0].1 = vec![entry(&community, "Drought", &[(3, 1)])];

        let page = test_generator().generate(&payload);

        assert!(page.contains("<span class=\"rating\">3.0</span>"));
    }

    #[test]
    fn unrated_connection_has_no_rating_element() {
        let page = test_generator().generate(&test_payload());

        assert_eq!(page.matches("class=\"rating\"").count(), 1);
    }
}
