//! Classification and segmentation of the model's reply.
//!
//! The model answers either with a bare sentinel token (the query was not
//! about food) or with free text whose section headings start with one of
//! four marker glyphs. Only [`classify`] ever looks at the sentinel; the rest
//! of the crate works with [`Classification`].

use log::debug;
use serde::Serialize;

/// Token the model is told to answer with for non-food queries.
pub(crate) const SENTINEL: &str = "NOT_FOOD_QUERY";

/// Message shown to the user when a query was judged not to be about food.
pub const NOT_FOOD_MESSAGE: &str = "Please ask about food-related topics only!";

/// A section heading marker, identified by the first character of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// 🍽️ plate
    Ingredients,
    /// 🔥 fire
    Procedure,
    /// ⚖️ scale
    Calories,
    /// 💡 bulb
    Tips,
}

impl Marker {
    /// All markers in the order the prompt asks for them.
    pub const ALL: [Marker; 4] = [
        Marker::Ingredients,
        Marker::Procedure,
        Marker::Calories,
        Marker::Tips,
    ];

    /// The leading character that identifies this marker.
    pub fn lead(self) -> char {
        match self {
            Marker::Ingredients => '\u{1F37D}',
            Marker::Procedure => '\u{1F525}',
            Marker::Calories => '\u{2696}',
            Marker::Tips => '\u{1F4A1}',
        }
    }

    /// The glyph as written in the prompt, including the emoji
    /// variation selector where one is used.
    pub fn glyph(self) -> &'static str {
        match self {
            Marker::Ingredients => "\u{1F37D}\u{FE0F}",
            Marker::Procedure => "\u{1F525}",
            Marker::Calories => "\u{2696}\u{FE0F}",
            Marker::Tips => "\u{1F4A1}",
        }
    }

    /// The heading label used in the prompt.
    pub fn label(self) -> &'static str {
        match self {
            Marker::Ingredients => "Ingredients",
            Marker::Procedure => "Cooking Procedure",
            Marker::Calories => "Calories",
            Marker::Tips => "Cooking Tips",
        }
    }

    pub fn from_char(c: char) -> Option<Marker> {
        Marker::ALL.into_iter().find(|marker| marker.lead() == c)
    }

    /// The marker a line starts with, if any.
    pub fn for_line(line: &str) -> Option<Marker> {
        line.chars().next().and_then(Marker::from_char)
    }
}

/// One display unit of a reply, in reply order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    /// A line starting with a marker glyph; `text` includes the glyph.
    Heading { marker: Marker, text: String },
    /// Any other non-empty line, kept verbatim.
    Paragraph { text: String },
    /// An empty line.
    Blank,
}

impl Section {
    /// The original line this section was built from.
    pub fn text(&self) -> &str {
        match self {
            Section::Heading { text, .. } | Section::Paragraph { text } => text,
            Section::Blank => "",
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, Section::Heading { .. })
    }
}

/// Split a reply body into sections, one per `'\n'`-separated line.
///
/// Never fails: a body without any marker glyph yields only paragraphs and
/// blanks. Lines are neither trimmed nor re-wrapped, so joining the
/// sections' [`Section::text`] with `'\n'` gives back `body`.
pub fn segment(body: &str) -> Vec<Section> {
    body.split('\n')
        .map(|line| match Marker::for_line(line) {
            Some(marker) => Section::Heading {
                marker,
                text: line.to_string(),
            },
            None if line.is_empty() => Section::Blank,
            None => Section::Paragraph {
                text: line.to_string(),
            },
        })
        .collect()
}

/// A reply that was not rejected, kept exactly as the model sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    body: String,
}

impl Recipe {
    pub fn new(body: impl Into<String>) -> Self {
        Recipe { body: body.into() }
    }

    /// The untrimmed reply text.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Segment the body for rendering.
    pub fn sections(&self) -> Vec<Section> {
        segment(&self.body)
    }

    /// The markers of every heading, in reply order.
    pub fn headings(&self) -> Vec<Marker> {
        self.body.split('\n').filter_map(Marker::for_line).collect()
    }

    /// The lines below the first heading for `marker`, up to the next
    /// heading, without leading or trailing blank lines.
    ///
    /// Returns `None` when the reply has no such heading.
    pub fn section_body(&self, marker: Marker) -> Option<String> {
        let mut lines = self.body.split('\n');
        lines.find(|line| Marker::for_line(line) == Some(marker))?;

        let content: Vec<&str> = lines
            .take_while(|line| Marker::for_line(line).is_none())
            .collect();

        let start = content.iter().position(|line| !line.trim().is_empty());
        let end = content.iter().rposition(|line| !line.trim().is_empty());

        match (start, end) {
            (Some(start), Some(end)) => Some(content[start..=end].join("\n")),
            _ => Some(String::new()),
        }
    }
}

/// Outcome of classifying a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// The model judged the query not to be about food.
    Rejected,
    /// A recipe reply to be segmented for display.
    Recipe(Recipe),
}

impl Classification {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Classification::Rejected)
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        match self {
            Classification::Recipe(recipe) => Some(recipe),
            Classification::Rejected => None,
        }
    }
}

/// Classify a raw reply.
///
/// Rejected iff the trimmed reply equals the sentinel exactly (case-sensitive).
/// Otherwise the untrimmed reply is kept for rendering.
pub fn classify(reply: String) -> Classification {
    if reply.trim() == SENTINEL {
        debug!("Reply is the non-food sentinel");
        Classification::Rejected
    } else {
        Classification::Recipe(Recipe::new(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRY: &str = "🍽️ Ingredients:\n- 500g chicken\n- 2 tbsp curry paste\n\n🔥 Cooking Procedure:\n1. Brown the chicken.\n2. Add the paste.\n\n⚖️ Calories:\nAbout 450 kcal per serving.\n\n💡 Cooking Tips:\nServe with rice.";

    #[test]
    fn test_classify_exact_sentinel() {
        assert_eq!(classify("NOT_FOOD_QUERY".to_string()), Classification::Rejected);
    }

    #[test]
    fn test_classify_sentinel_with_surrounding_whitespace() {
        assert!(classify("  NOT_FOOD_QUERY\n".to_string()).is_rejected());
        assert!(classify("\tNOT_FOOD_QUERY\r\n".to_string()).is_rejected());
    }

    #[test]
    fn test_classify_near_misses_are_recipes() {
        for reply in [
            "NOT_FOOD_QUERY please",
            "not_food_query",
            "Not_Food_Query",
            "\"NOT_FOOD_QUERY\"",
            "NOT_FOOD_QUERY.",
            "",
        ] {
            assert!(
                !classify(reply.to_string()).is_rejected(),
                "{reply:?} should not be rejected"
            );
        }
    }

    #[test]
    fn test_classify_keeps_untrimmed_body() {
        let reply = "\n  🍽️ Ingredients:\nflour\n\n".to_string();
        let classification = classify(reply.clone());
        assert_eq!(classification.recipe().unwrap().body(), reply);
    }

    #[test]
    fn test_heading_requires_leading_glyph() {
        let sections = segment("🍽️ Ingredients: flour\nIngredients: 🍽️ flour");
        assert_eq!(
            sections,
            vec![
                Section::Heading {
                    marker: Marker::Ingredients,
                    text: "🍽️ Ingredients: flour".to_string(),
                },
                Section::Paragraph {
                    text: "Ingredients: 🍽️ flour".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_indented_glyph_is_paragraph() {
        let sections = segment("  🔥 Cooking Procedure:");
        assert!(!sections[0].is_heading());
    }

    #[test]
    fn test_segment_preserves_lines() {
        let sections = segment(CURRY);
        assert_eq!(sections.len(), CURRY.split('\n').count());

        let rebuilt: Vec<&str> = sections.iter().map(Section::text).collect();
        assert_eq!(rebuilt.join("\n"), CURRY);
    }

    #[test]
    fn test_segment_keeps_whitespace_and_carriage_returns() {
        let body = "  indented  \r\n\n\ttab";
        let sections = segment(body);
        assert_eq!(
            sections,
            vec![
                Section::Paragraph {
                    text: "  indented  \r".to_string()
                },
                Section::Blank,
                Section::Paragraph {
                    text: "\ttab".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_segment_without_markers_degrades_to_text() {
        let sections = segment("Just some text\n\nabout soup");
        assert!(sections.iter().all(|s| !s.is_heading()));
        assert_eq!(sections[1], Section::Blank);
    }

    #[test]
    fn test_segment_empty_body_is_one_blank() {
        assert_eq!(segment(""), vec![Section::Blank]);
    }

    #[test]
    fn test_segment_is_idempotent() {
        assert_eq!(segment(CURRY), segment(CURRY));
    }

    #[test]
    fn test_headings_in_reply_order() {
        let recipe = Recipe::new(CURRY);
        assert_eq!(recipe.headings(), Marker::ALL.to_vec());
    }

    #[test]
    fn test_section_body() {
        let recipe = Recipe::new(CURRY);
        assert_eq!(
            recipe.section_body(Marker::Ingredients).unwrap(),
            "- 500g chicken\n- 2 tbsp curry paste"
        );
        assert_eq!(recipe.section_body(Marker::Tips).unwrap(), "Serve with rice.");
    }

    #[test]
    fn test_section_body_missing_or_empty() {
        let recipe = Recipe::new("🔥 Cooking Procedure:\n\n💡 Cooking Tips:\nStir.");
        assert_eq!(recipe.section_body(Marker::Ingredients), None);
        assert_eq!(recipe.section_body(Marker::Procedure).unwrap(), "");
    }

    #[test]
    fn test_marker_from_char() {
        for marker in Marker::ALL {
            assert_eq!(Marker::from_char(marker.lead()), Some(marker));
            assert!(marker.glyph().starts_with(marker.lead()));
        }
        assert_eq!(Marker::from_char('I'), None);
    }
}
