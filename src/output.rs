use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::error::CatalogError;
use crate::parser::records::Record;

const TITLE: &str = "title";

/// Move `title` to the front, keeping the rest in their given order.
pub fn order_columns<'a>(mut columns: Vec<&'a str>) -> Vec<&'a str> {
    if let Some(pos) = columns.iter().position(|c| *c == TITLE) {
        if pos != 0 {
            debug!("Forcing {} to be first column", TITLE);
            let title = columns.remove(pos);
            columns.insert(0, title);
        }
    }
    columns
}

/// Header plus one row per record. Columns follow the first record's field
/// order after `order_columns`.
pub fn write_records<W: Write>(
    out: W,
    records: &[Record],
    delimiter: u8,
) -> Result<(), CatalogError> {
    let first = records.first().ok_or(CatalogError::EmptyOutput)?;
    debug!("Delimiter set to [{}]", (delimiter as char).escape_default());

    let columns = order_columns(first.fields().into_iter().map(|(c, _)| c).collect());

    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(out);

    wtr.write_record(&columns)?;
    for record in records {
        let fields = record.fields();
        let row = columns.iter().map(|col| {
            fields
                .iter()
                .find(|(c, _)| c == col)
                .map(|(_, v)| *v)
                .unwrap_or("")
        });
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(title: &str, publisher: &str, category: &str) -> Record {
        Record {
            title: title.to_string(),
            publisher: publisher.to_string(),
            category: category.to_string(),
        }
    }

    fn render(records: &[Record], delimiter: u8) -> String {
        let mut buf = Vec::new();
        write_records(&mut buf, records, delimiter).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn title_moves_first() {
        assert_eq!(
            order_columns(vec!["title_pub", "type", "title"]),
            vec!["title", "title_pub", "type"]
        );
        assert_eq!(
            order_columns(vec!["a", "title", "b"]),
            vec!["title", "a", "b"]
        );
    }

    #[test]
    fn columns_without_title_untouched() {
        assert_eq!(order_columns(vec!["b", "a"]), vec!["b", "a"]);
        assert_eq!(order_columns(vec![]), Vec::<&str>::new());
    }

    #[test]
    fn tab_separated_output() {
        let out = render(
            &[
                rec("Wasteland 2", "inXile Entertainment", "PC Games"),
                rec("Mystery", "", ""),
            ],
            b'\t',
        );
        assert_eq!(
            out,
            "title\ttitle_pub\ttype\nWasteland 2\tinXile Entertainment\tPC Games\nMystery\t\t\n"
        );
    }

    #[test]
    fn custom_delimiter_quotes_when_needed() {
        let out = render(&[rec("Hacking, 2nd Edition", "No Starch Press", "eBooks")], b',');
        assert_eq!(
            out,
            "title,title_pub,type\n\"Hacking, 2nd Edition\",No Starch Press,eBooks\n"
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut buf = Vec::new();
        let err = write_records(&mut buf, &[], b'\t').unwrap_err();
        assert!(matches!(err, CatalogError::EmptyOutput));
        assert!(buf.is_empty());
    }
}
