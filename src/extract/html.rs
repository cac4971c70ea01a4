// src/extract/html.rs
// =============================================================================
// Title and link extraction with a real HTML parser.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM, tolerating the broken markup real sites serve
// - Supports CSS selectors for finding elements
//
// Unlike MarkerExtractor this handles uppercase tags, single-quoted
// attributes and entities in titles. It only looks at <a href> links.
// Relative links are still dropped, not resolved, so both extractors admit
// the same kind of URL.
// =============================================================================

use anyhow::{anyhow, Result};
use indexmap::IndexSet;
use scraper::{Html, Selector};

use super::{is_absolute_link, Extractor, PageContent, NO_TITLE};

#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    title: Selector,
    anchors: Selector,
}

impl HtmlExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: parse_selector("title")?,
            anchors: parse_selector("a[href]")?,
        })
    }
}

impl Extractor for HtmlExtractor {
    fn extract(&self, content: &str) -> PageContent {
        let document = Html::parse_document(content);

        let title = document
            .select(&self.title)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());

        let links: IndexSet<String> = document
            .select(&self.anchors)
            .filter_map(|element| element.value().attr("href"))
            .map(str::trim)
            .filter(|href| is_absolute_link(href))
            .map(str::to_string)
            .collect();

        PageContent { title, links }
    }
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector '{}': {:?}", css, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> PageContent {
        HtmlExtractor::new().unwrap().extract(html)
    }

    #[test]
    fn test_title_from_document() {
        let page = extract("<html><head><TITLE>  Rust &amp; Friends </TITLE></head></html>");
        assert_eq!(page.title, "Rust & Friends");
    }

    #[test]
    fn test_missing_title() {
        let page = extract("<p>no head here</p>");
        assert_eq!(page.title, NO_TITLE);
    }

    #[test]
    fn test_same_filter_as_markers() {
        let html = r#"
            <a href="http://a">A</a>
            <a href="/relative">Rel</a>
            <a href="mailto:x@y.com">Mail</a>
            <a href='https://single.example'>Single</a>
        "#;
        let links: Vec<_> = extract(html).links.into_iter().collect();
        assert_eq!(links, vec!["http://a", "https://single.example"]);
    }

    #[test]
    fn test_ignores_non_anchor_hrefs() {
        let html = r#"<link href="https://cdn.example/site.css"><a href="https://page.example">P</a>"#;
        let links: Vec<_> = extract(html).links.into_iter().collect();
        assert_eq!(links, vec!["https://page.example"]);
    }
}
