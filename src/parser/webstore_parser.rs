// Chrome Web Store detail-page extraction
use crate::model::ExtractedFields;
use scraper::{Html, Selector};

const TITLE_SUFFIX: &str = " - Chrome Web Store";

pub trait Parser {
    fn extract(&self, html: &str) -> ExtractedFields;
}

pub struct WebstoreParser {
    title_selector: Selector,
    ratings_selector: Selector,
    users_selector: Selector,
}

impl WebstoreParser {
    pub fn new() -> Self {
        Self {
            title_selector: Selector::parse("title").unwrap(),
            ratings_selector: Selector::parse("p.xJEoWe").unwrap(),
            users_selector: Selector::parse("div.F9iKBc").unwrap(),
        }
    }
}

impl Default for WebstoreParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for WebstoreParser {
    /// Best-effort extraction: each field comes back `None` when its element
    /// is missing or unusable, never failing the others.
    fn extract(&self, html: &str) -> ExtractedFields {
        let document = Html::parse_document(html);

        let name = document.select(&self.title_selector).next().map(|node| {
            let text = node.text().collect::<String>();
            let trimmed = text.trim();
            trimmed
                .strip_suffix(TITLE_SUFFIX)
                .unwrap_or(trimmed)
                .trim()
                .to_string()
        });

        let ratings = document
            .select(&self.ratings_selector)
            .next()
            .map(|node| node.text().collect::<String>().trim().to_string());

        let user_count = document
            .select(&self.users_selector)
            .next()
            .and_then(|node| parse_user_count(&node.text().collect::<String>()));

        ExtractedFields {
            name,
            ratings,
            user_count,
        }
    }
}

/// Accepts element text only if it mentions "users" (any case); the portion
/// before that word is the count, with thousands separators dropped. The
/// prefix is sliced from the original text so its casing survives.
fn parse_user_count(text: &str) -> Option<String> {
    let needle = b"users";
    // The window starts on an ascii byte whenever it matches, so the
    // position is always a valid char boundary.
    let idx = text
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))?;
    Some(text[..idx].trim().replace(',', ""))
}
