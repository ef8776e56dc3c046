use tracing::{debug, error};

use crate::publishers::{CategoryTable, PublisherList};

/// Broad category hinted at by a publisher's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    Game,
    Book,
}

impl Suggestion {
    pub fn as_str(self) -> &'static str {
        match self {
            Suggestion::Game => "Game",
            Suggestion::Book => "Book",
        }
    }
}

const SUGGESTIONS: &[(&str, Suggestion)] = &[
    ("game", Suggestion::Game),
    ("book", Suggestion::Book),
    ("publish", Suggestion::Book),
    ("press", Suggestion::Book),
    ("interactive", Suggestion::Game),
    ("studio", Suggestion::Game),
    ("software", Suggestion::Game),
];

/// Display name of the first category listing `publisher` (case-insensitive),
/// or an empty string when unassigned.
///
/// A category whose `publishers` is not a list aborts the whole lookup with an
/// empty result. A list with non-string items only skips that category.
pub fn assign_category(publisher: &str, table: &CategoryTable) -> String {
    let wanted = publisher.to_lowercase();
    let mut assignment = String::new();

    for (key, category) in table.iter() {
        let names = match &category.publishers {
            PublisherList::Names(names) => names,
            PublisherList::NotAList => return String::new(),
            PublisherList::BadItems(raw) => {
                error!("Cannot read publishers from category [{}]: {}", key, raw);
                continue;
            }
        };
        if names.iter().any(|p| p.to_lowercase() == wanted) {
            let display_name = category.display_name.clone().unwrap_or_default();
            debug!(
                "Found type assignment for [{}] => [{}]",
                publisher, display_name
            );
            assignment = display_name;
            break;
        }
    }

    if assignment.is_empty() {
        debug!("Unassigned type for publisher: [{}]", publisher);
        if let Some(hint) = suggest_category(publisher) {
            debug!(
                "Suggested category for publisher [{}]: [{}]",
                publisher,
                hint.as_str()
            );
        }
    }
    assignment
}

/// First keyword hit in the publisher name. Only a hint for editing the
/// category table; never applied to a record.
pub fn suggest_category(publisher: &str) -> Option<Suggestion> {
    if publisher.is_empty() {
        return None;
    }
    let lower = publisher.to_lowercase();
    SUGGESTIONS
        .iter()
        .find(|(text, _)| lower.contains(text))
        .map(|(_, cat)| *cat)
}
