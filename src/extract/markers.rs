// src/extract/markers.rs
// =============================================================================
// Title and link extraction by plain substring search.
//
// No HTML parsing happens here. The page is treated as text:
// - title: the text between the first "<title>" and the first "</title>"
// - links: the text between the quotes of every href="..."
//
// This is fast and never fails, but it only sees lowercase tags and
// double-quoted attributes. Use HtmlExtractor when that matters.
// =============================================================================

use indexmap::IndexSet;

use super::{is_absolute_link, Extractor, PageContent, NO_TITLE};

const TITLE_OPEN: &str = "<title>";
const TITLE_CLOSE: &str = "</title>";
const HREF_OPEN: &str = "href=\"";

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerExtractor;

impl Extractor for MarkerExtractor {
    fn extract(&self, content: &str) -> PageContent {
        PageContent {
            title: extract_title(content),
            links: extract_links(content),
        }
    }
}

// Both markers must be present and the opening one must end before the
// closing one starts, otherwise the page has no usable title.
fn extract_title(content: &str) -> String {
    let (Some(open), Some(close)) = (content.find(TITLE_OPEN), content.find(TITLE_CLOSE)) else {
        return NO_TITLE.to_string();
    };

    let start = open + TITLE_OPEN.len();
    if start > close {
        return NO_TITLE.to_string();
    }

    content[start..close].trim().to_string()
}

fn extract_links(content: &str) -> IndexSet<String> {
    let mut links = IndexSet::new();
    let mut rest = content;

    while let Some(pos) = rest.find(HREF_OPEN) {
        let value = &rest[pos + HREF_OPEN.len()..];
        // An unterminated href="... means there is nothing left to scan
        let Some(end) = value.find('"') else {
            break;
        };

        let link = &value[..end];
        if is_absolute_link(link) {
            links.insert(link.to_string());
        }
        rest = &value[end + 1..];
    }

    links
}
