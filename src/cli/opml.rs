//! Minimal OPML reader: pulls `(title, xmlUrl)` out of `<outline>` elements.

use std::path::Path;

use crate::app::{Result, RiffleError};
use crate::domain::SourceInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpmlFeed {
    pub title: String,
    pub url: String,
}

impl OpmlFeed {
    pub fn into_source(self, origin: &Path) -> SourceInput {
        SourceInput::new(self.title, self.url)
            .with_description(format!("Imported from OPML file: {}", origin.display()))
    }
}

/// Parse OPML content and extract feed URLs with titles.
///
/// Outlines without an `xmlUrl` are folders and are skipped. The title
/// falls back to `text`, then to the URL itself.
pub fn parse_opml(content: &str) -> Result<Vec<OpmlFeed>> {
    if !content.contains("<opml") {
        return Err(RiffleError::Opml("missing <opml> root element".into()));
    }

    let mut feeds = Vec::new();
    for element in content.split("<outline").skip(1) {
        let end = element.find('>').unwrap_or(element.len());
        let attrs = &element[..end];

        let Some(url) = extract_attr(attrs, "xmlUrl") else {
            continue;
        };
        let title = extract_attr(attrs, "title")
            .filter(|t| !t.is_empty())
            .or_else(|| extract_attr(attrs, "text"))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| url.clone());

        feeds.push(OpmlFeed { title, url });
    }

    Ok(feeds)
}

pub fn read_opml(path: &Path) -> Result<Vec<OpmlFeed>> {
    let content = std::fs::read_to_string(path)?;
    parse_opml(&content)
}

/// Extract an attribute value from an XML element string
fn extract_attr(attrs: &str, attr: &str) -> Option<String> {
    // leading space keeps "text" from matching inside e.g. "subtext"
    for quote in ['"', '\''] {
        let pattern = format!(" {}={}", attr, quote);
        let padded = format!(" {}", attrs.replace(['\n', '\t', '\r'], " "));
        if let Some(pos) = padded.find(&pattern) {
            let rest = &padded[pos + pattern.len()..];
            let end = rest.find(quote)?;
            return Some(html_escape::decode_html_entities(&rest[..end]).to_string());
        }
    }
    None
}
