//! CSV table rendering.
//!
//! One row per filtered item under a fixed `Date,Title,Category,Description`
//! header. Every field is quote-wrapped with internal double quotes doubled;
//! fields with no value get the `不明` sentinel.

use crate::item::{AnnouncementItem, UNKNOWN};

/// Renders items as a CSV document.
pub fn render_table(items: &[AnnouncementItem]) -> String {
    let mut out = String::from("Date,Title,Category,Description\n");

    for item in items {
        let date = item.published_at.format("%Y/%m/%d").to_string();
        let title = or_unknown(&item.title);
        let category = or_unknown(&item.categories.join(", "));
        let description = or_unknown(&item.description);

        out.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",\"{}\"\n",
            escape(&date),
            escape(&title),
            escape(&category),
            escape(&description)
        ));
    }

    out
}

fn or_unknown(field: &str) -> String {
    if field.trim().is_empty() { UNKNOWN.to_string() } else { field.to_string() }
}

/// CSV escaping: double any embedded double quote.
fn escape(field: &str) -> String {
    field.replace('"', "\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(title: &str, description: &str, categories: &[&str]) -> AnnouncementItem {
        AnnouncementItem::new(
            title,
            "https://example.com",
            description,
            Utc.with_ymd_and_hms(2025, 4, 9, 0, 0, 0).unwrap(),
            categories.iter().map(|c| c.to_string()).collect(),
        )
    }

    #[test]
    fn test_header_row() {
        let csv = render_table(&[]);
        assert_eq!(csv, "Date,Title,Category,Description\n");
    }

    #[test]
    fn test_row_shape() {
        let csv = render_table(&[item("Release 1.0", "Now available", &["Release"])]);
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], "\"2025/04/09\",\"Release 1.0\",\"Release\",\"Now available\"");
    }

    #[test]
    fn test_quote_doubling() {
        let csv = render_table(&[item(r#"He said "hi""#, "body", &[])]);
        assert!(csv.contains(r#""He said ""hi""""#));
    }

    #[test]
    fn test_categories_joined() {
        let csv = render_table(&[item("t", "d", &["Release", "Security"])]);
        assert!(csv.contains("\"Release, Security\""));
    }

    #[test]
    fn test_unknown_sentinel_for_empty_description() {
        let csv = render_table(&[item("title only", "", &[])]);
        assert!(csv.contains(&format!("\"{}\"", UNKNOWN)));
    }
}
