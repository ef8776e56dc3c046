use std::sync::LazyLock;

use regex::Regex;

/// U+2019 after its UTF-8 bytes (E2 80 99) were decoded as Windows-1252 or
/// as Latin-1.
static MOJIBAKE_RSQUO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{e2}(?:\u{20ac}\u{2122}|\u{80}\u{99})").unwrap());

pub const RIGHT_SINGLE_QUOTE: &str = "\u{2019}";

/// Repair mis-encoded right single quotation marks. Nothing else is touched.
pub fn clean_title(title: &str) -> String {
    MOJIBAKE_RSQUO_RE
        .replace_all(title, RIGHT_SINGLE_QUOTE)
        .into_owned()
}
