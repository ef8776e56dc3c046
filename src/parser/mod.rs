pub mod clean;
pub mod entries;
pub mod records;

use scraper::Html;

use crate::error::CatalogError;
use crate::publishers::CategoryTable;
use records::Record;

/// HTML → entries → records. Zero entries means the page is not a library
/// snapshot, which is fatal.
pub fn process_page(
    source: &str,
    html: &str,
    table: &CategoryTable,
    include_steam_keys: bool,
) -> Result<Vec<Record>, CatalogError> {
    let document = Html::parse_document(html);
    let entries = entries::find_entries(&document);
    if entries.is_empty() {
        return Err(CatalogError::NoEntries(source.to_string()));
    }
    Ok(records::normalize_entries(&entries, table, include_steam_keys))
}
