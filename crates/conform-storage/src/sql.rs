//! SQL text helpers shared by the backends.

use chrono::NaiveDate;

/// Quote an identifier, doubling embedded quotes.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Split `schema.table` into its parts. Unqualified names have no schema.
#[must_use]
pub fn split_table(table: &str) -> (Option<&str>, &str) {
    match table.split_once('.') {
        Some((schema, name)) if !schema.is_empty() && !name.is_empty() => (Some(schema), name),
        _ => (None, table),
    }
}

/// Quoted, optionally schema-qualified table reference.
#[must_use]
pub fn qualified_table(table: &str) -> String {
    match split_table(table) {
        (Some(schema), name) => format!("{}.{}", quote_ident(schema), quote_ident(name)),
        (None, name) => quote_ident(name),
    }
}

/// Parse the calendar date from the textual form of a date or timestamp.
///
/// Only the leading `YYYY-MM-DD` is considered.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let head = text.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn quotes_embedded_quotes() {
        assert_eq!(quote_ident("order"), "\"order\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn qualifies_schema_tables() {
        assert_eq!(qualified_table("sales.contacts"), "\"sales\".\"contacts\"");
        assert_eq!(qualified_table("contacts"), "\"contacts\"");
        assert_eq!(split_table(".contacts"), (None, ".contacts"));
    }

    #[rstest]
    #[case("2024-03-01", Some((2024, 3, 1)))]
    #[case("2024-03-01 12:30:00", Some((2024, 3, 1)))]
    #[case("2024-03-01T12:30:00+00:00", Some((2024, 3, 1)))]
    #[case("2024-3-1", None)]
    #[case("yesterday", None)]
    #[case("", None)]
    fn parses_leading_date(#[case] text: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parse_date(text), expected);
    }
}
