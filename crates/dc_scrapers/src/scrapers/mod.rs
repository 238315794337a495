pub mod droidcon;

pub use droidcon::DroidconScraper;

/// Common utilities for scrapers
pub(crate) mod utils {
    use dc_core::{Error, Result};
    use scraper::{ElementRef, Selector};

    pub fn parse_selector(selector: &str) -> Result<Selector> {
        Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector {}: {:?}", selector, e)))
    }

    /// Collapses whitespace runs the way rendered text reads.
    pub fn normalize_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn element_text(element: ElementRef<'_>) -> String {
        normalize_whitespace(&element.text().collect::<String>())
    }

    /// Text of the first match under `scope`, empty when nothing matches.
    pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> String {
        scope
            .select(selector)
            .next()
            .map(element_text)
            .unwrap_or_default()
    }

    pub fn first_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
        scope
            .select(selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(|value| value.trim().to_string())
    }

    /// Classes in the order they appear in the `class` attribute.
    pub fn class_names(element: ElementRef<'_>) -> Vec<&str> {
        element
            .value()
            .attr("class")
            .map(|classes| classes.split_whitespace().collect())
            .unwrap_or_default()
    }
}
