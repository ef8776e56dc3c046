use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

static ENTRY_SEL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"div[class="selector-content"]"#)
        .expect("BUG: hardcoded entry selector is invalid")
});

/// Every catalog entry container in the document, in document order.
/// An empty result is left to the caller to judge.
pub fn find_entries(document: &Html) -> Vec<ElementRef<'_>> {
    let entries: Vec<_> = document.select(&ENTRY_SEL).collect();
    debug!("Found {} titles in HTML", entries.len());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_class_anywhere() {
        let doc = Html::parse_document(
            r#"<html><body>
            <div class="selector-content"><h2>One</h2></div>
            <section><div><div class="selector-content"><h2>Two</h2></div></div></section>
            <div class="selector-content extra"><h2>Not me</h2></div>
            <span class="selector-content"><h2>Nor me</h2></span>
            </body></html>"#,
        );
        let titles: Vec<String> = find_entries(&doc)
            .iter()
            .map(|e| e.text().collect::<String>())
            .collect();
        assert_eq!(titles, vec!["One", "Two"]);
    }

    #[test]
    fn no_matches_is_empty() {
        let doc = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        assert!(find_entries(&doc).is_empty());
    }

    #[test]
    fn library_fixture() {
        let html = std::fs::read_to_string("tests/fixtures/library.html").unwrap();
        let doc = Html::parse_document(&html);
        assert_eq!(find_entries(&doc).len(), 6);
    }
}
