//! Marker-table driven extraction of mentions from results pages.
//!
//! Search engine markup is unversioned and changes without notice, so each
//! field is located through a priority-ordered list of CSS selectors. The
//! first selector yielding a non-empty value wins; when none match the field
//! is missing and the candidate degrades (empty snippet) or is dropped
//! (missing title or link). Nothing here fails: unknown markup yields an
//! empty [`BackendResult`].

use crate::types::{BackendResult, Mention};
use scraper::{ElementRef, Html, Selector};

/// Priority-ordered selectors used to extract results from one engine's page.
#[derive(Debug, Clone, Copy)]
pub struct MarkerTable {
    /// Result-block selectors. The first that matches anything defines the
    /// candidate set.
    pub blocks: &'static [&'static str],
    /// Title selectors, tried inside each block.
    pub title: &'static [&'static str],
    /// `(selector, attribute)` pairs for the result link, tried inside each block.
    pub link: &'static [(&'static str, &'static str)],
    /// Snippet selectors, tried inside each block.
    pub snippet: &'static [&'static str],
    /// Results-count indicator selectors, tried against the whole page.
    pub count: &'static [&'static str],
}

/// Selectors compiled once per extraction. Invalid entries are skipped.
struct Compiled {
    blocks: Vec<Selector>,
    title: Vec<Selector>,
    link: Vec<(Selector, &'static str)>,
    snippet: Vec<Selector>,
    count: Vec<Selector>,
}

impl Compiled {
    fn new(table: &MarkerTable) -> Self {
        Self {
            blocks: compile_all(table.blocks),
            title: compile_all(table.title),
            link: table
                .link
                .iter()
                .filter_map(|(sel, attr)| compile(sel).map(|s| (s, *attr)))
                .collect(),
            snippet: compile_all(table.snippet),
            count: compile_all(table.count),
        }
    }
}

fn compile(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::debug!(selector, error = ?e, "skipping invalid selector");
            None
        }
    }
}

fn compile_all(selectors: &[&str]) -> Vec<Selector> {
    selectors.iter().filter_map(|s| compile(s)).collect()
}

/// Collapse an element's text nodes into one whitespace-normalised string.
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty text among `selectors` within `scope`.
fn first_text(scope: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    selectors.iter().find_map(|sel| {
        scope
            .select(sel)
            .map(element_text)
            .find(|text| !text.is_empty())
    })
}

/// First non-empty attribute value among `selectors` within `scope`.
fn first_attr(scope: ElementRef<'_>, selectors: &[(Selector, &str)]) -> Option<String> {
    selectors.iter().find_map(|(sel, attr)| {
        scope
            .select(sel)
            .filter_map(|el| el.value().attr(attr))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(str::to_owned)
    })
}

/// Extract mentions and the results-count signal from `html`.
///
/// `rewrite_link` lets an engine unwrap its own redirect links; returning
/// `None` drops the candidate.
pub fn extract(
    table: &MarkerTable,
    html: &str,
    rewrite_link: impl Fn(&str) -> Option<String>,
) -> BackendResult {
    let document = Html::parse_document(html);
    let compiled = Compiled::new(table);
    let root = document.root_element();

    let blocks: Vec<ElementRef<'_>> = compiled
        .blocks
        .iter()
        .map(|sel| document.select(sel).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default();

    let mut mentions = Vec::new();
    for block in blocks {
        let Some(title) = first_text(block, &compiled.title) else {
            continue;
        };
        let Some(link) = first_attr(block, &compiled.link).and_then(|h| rewrite_link(&h)) else {
            continue;
        };
        let snippet = first_text(block, &compiled.snippet).unwrap_or_default();

        if let Some(mention) = Mention::new(&title, &link, &snippet) {
            mentions.push(mention);
        }
    }

    let total_count = first_text(root, &compiled.count).and_then(|text| parse_count(&text));

    tracing::debug!(count = mentions.len(), total = ?total_count, "results extracted");
    BackendResult {
        mentions,
        total_count,
    }
}

/// Parse the first run of digits in `text`, ignoring thousands separators.
///
/// A separator (`,` `.` `'` or a no-break space) only joins digits when it
/// is followed by a group of exactly three digits, so `"About 1,234 results"`
/// gives `1234`, `"12 results."` gives `12` and `"1.5 million"` gives `1`.
/// Returns `None` if there are no digits or the number overflows.
pub fn parse_count(text: &str) -> Option<u64> {
    let chars: Vec<char> = text.chars().collect();
    let start = chars.iter().position(char::is_ascii_digit)?;

    let mut digits = String::new();
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !(is_group_separator(c) && is_digit_group(&chars[i + 1..])) {
            break;
        }
        i += 1;
    }

    digits.parse().ok()
}

/// `rest` starts with exactly three digits.
fn is_digit_group(rest: &[char]) -> bool {
    rest.len() >= 3
        && rest[..3].iter().all(char::is_ascii_digit)
        && !rest.get(3).is_some_and(char::is_ascii_digit)
}

fn is_group_separator(c: char) -> bool {
    matches!(c, ',' | '.' | '\'' | '\u{a0}' | '\u{202f}')
}
