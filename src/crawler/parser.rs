//! HTML parser for extracting word counts and links
//!
//! This module handles parsing HTML content to extract:
//! - Word counts over the visible text of the page body
//! - Links to follow (from <a> tags)

use crate::url::{resolve_link, PatternSet};
use scraper::{Html, Node, Selector};
use std::collections::HashMap;
use url::Url;

/// Elements whose text is never counted
const NON_VISIBLE_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedPage {
    /// Occurrences of each word in the page body
    pub word_counts: HashMap<String, usize>,

    /// All links found on the page (absolute URLs)
    pub links: Vec<String>,
}

/// Parses HTML content and extracts word counts and links
///
/// # Word Extraction Rules
///
/// - Only text inside `<body>` is counted; script, style, noscript and template content is
///   skipped
/// - Text is split on every character that is not alphanumeric
/// - Words are lowercased
/// - A word fully matching one of `ignored_words` is dropped
///
/// # Link Extraction Rules
///
/// Every `<a href>` without a `download` attribute, resolved against `base_url` by
/// [`resolve_link`].
///
/// # Example
///
/// ```
/// use url::Url;
/// use wordtide::crawler::parse_html;
/// use wordtide::url::PatternSet;
///
/// let html = r#"<html><body><p>Rust, rust and more Rust.</p><a href="/next">next</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url, &PatternSet::default());
/// assert_eq!(parsed.word_counts["rust"], 3);
/// assert_eq!(parsed.links, vec!["https://example.com/next".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url, ignored_words: &PatternSet) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        word_counts: extract_word_counts(&document, ignored_words),
        links: extract_links(&document, base_url),
    }
}

/// Counts the words of the body's visible text
fn extract_word_counts(document: &Html, ignored_words: &PatternSet) -> HashMap<String, usize> {
    let mut counts = HashMap::new();

    let Ok(body_selector) = Selector::parse("body") else {
        return counts;
    };

    for body in document.select(&body_selector) {
        for node in body.descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };

            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |e| NON_VISIBLE_ELEMENTS.contains(&e.name()))
            });
            if hidden {
                continue;
            }

            count_words(text, ignored_words, &mut counts);
        }
    }

    counts
}

/// Splits `text` into lowercase words and adds them to `counts`
pub(crate) fn count_words(
    text: &str,
    ignored_words: &PatternSet,
    counts: &mut HashMap<String, usize>,
) {
    for word in text.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }

        let word = word.to_lowercase();
        if ignored_words.matches(&word) {
            continue;
        }

        *counts.entry(word).or_insert(0) += 1;
    }
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(absolute_url) = element
                .value()
                .attr("href")
                .and_then(|href| resolve_link(href, base_url))
            {
                links.push(absolute_url);
            }
        }
    }

    links
}
