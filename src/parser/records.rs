use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::{debug, warn};

use super::clean::clean_title;
use crate::classify::assign_category;
use crate::publishers::CategoryTable;

static TITLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2").expect("BUG: hardcoded CSS selector 'h2' is invalid"));
static PUBLISHER_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("BUG: hardcoded CSS selector 'p' is invalid"));
static STEAM_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)steam key").unwrap());

/// One output row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub title: String,
    pub publisher: String,
    /// Empty when unassigned.
    pub category: String,
}

impl Record {
    /// `(column, value)` pairs in the record's natural field order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("title", self.title.as_str()),
            ("title_pub", self.publisher.as_str()),
            ("type", self.category.as_str()),
        ]
    }
}

pub fn is_steam_key(title: &str) -> bool {
    STEAM_KEY_RE.is_match(title)
}

pub fn normalize_entries(
    entries: &[ElementRef<'_>],
    table: &CategoryTable,
    include_steam_keys: bool,
) -> Vec<Record> {
    let mut records = Vec::with_capacity(entries.len());

    for entry in entries {
        let title = first_text(entry, &TITLE_SEL).map(|t| clean_title(&t));
        let publisher = first_text(entry, &PUBLISHER_SEL);

        if !include_steam_keys && title.as_deref().is_some_and(is_steam_key) {
            debug!("Skipping steam key in library output");
            continue;
        }

        let title = title.unwrap_or_else(|| {
            warn!(
                "No title was found for an entry (publisher: [{}])",
                publisher.as_deref().unwrap_or("")
            );
            String::new()
        });

        let mut skip_assignment = false;
        if publisher.is_none() {
            warn!("No publisher was found for title: [{}]", title);
            skip_assignment = true;
        }
        if table.is_empty() {
            warn!("No publisher information JSON was found");
            skip_assignment = true;
        }

        let category = match &publisher {
            Some(p) if !skip_assignment => assign_category(p, table),
            _ => {
                warn!("Skipping assignment of publisher for title: [{}]", title);
                String::new()
            }
        };

        records.push(Record {
            title,
            publisher: publisher.unwrap_or_default(),
            category,
        });
    }

    records
}

fn first_text(entry: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    entry
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}
