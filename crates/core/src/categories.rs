//! Keyword-driven category classification.
//!
//! Announcement pages rarely label their entries consistently, so
//! categories are inferred from a static bilingual keyword table applied to
//! the title and body text, unioned with structural hints such as
//! `release-feature` class fragments. The result is deduplicated and never
//! empty: when nothing matches, the [`OTHER_CATEGORY`] sentinel is
//! substituted.

use crate::item::OTHER_CATEGORY;

/// Keyword fragments mapped to category labels.
///
/// Matching is case-insensitive substring containment; every matching
/// keyword contributes its category, so one text can yield several.
const KEYWORDS: &[(&str, &str)] = &[
    // English announcement vocabulary
    ("deprecated", "Deprecated"),
    ("deprecation", "Deprecated"),
    ("important", "Important"),
    ("critical", "Important"),
    ("shutdown", "End of Service"),
    ("end of life", "End of Service"),
    ("update", "Update"),
    ("new", "New"),
    ("feature", "Feature"),
    ("release", "Release"),
    ("beta", "Beta"),
    ("alpha", "Alpha"),
    ("preview", "Preview"),
    ("bug", "Bugfix"),
    ("fix", "Bugfix"),
    ("security", "Security"),
    ("notice", "Notice"),
    ("announcement", "Announcement"),
    ("maintenance", "Maintenance"),
    // Japanese announcement vocabulary
    ("重要", "Important"),
    ("緊急", "Important"),
    ("注意", "Notice"),
    ("お知らせ", "Notice"),
    ("リリース", "Release"),
    ("更新", "Update"),
    ("アップデート", "Update"),
    ("新機能", "Feature"),
    ("機能追加", "Feature"),
    ("バグ修正", "Bugfix"),
    ("不具合修正", "Bugfix"),
    ("修正", "Bugfix"),
    ("セキュリティ", "Security"),
    ("メンテナンス", "Maintenance"),
    ("廃止", "Deprecated"),
    ("提供終了", "Deprecated"),
    ("サポート終了", "End of Support"),
    ("サービス終了", "End of Service"),
    ("終了", "End of Service"),
];

/// Maps a `release-*` class-name fragment to its category.
///
/// Release-note pages mark entry types with classes like `release-feature`
/// or `release-deprecated`; the prefix is stripped and the remainder used
/// verbatim.
pub fn category_from_class(class: &str) -> Option<String> {
    let rest = class.strip_prefix("release-")?;
    if rest.is_empty() { None } else { Some(rest.to_string()) }
}

/// Classifies announcement text into a deduplicated, non-empty category set.
///
/// `hints` are structural class-name fragments gathered from the entry's
/// markup; `release-*` hints contribute their stripped suffix. Keyword
/// matches over `text` are unioned in afterwards.
///
/// # Example
///
/// ```rust
/// use kawaraban_core::categories::classify;
///
/// let cats = classify("重要なお知らせ", &[]);
/// assert!(cats.iter().any(|c| c == "Important"));
/// assert_eq!(classify("", &[]), vec!["Other".to_string()]);
/// ```
pub fn classify(text: &str, hints: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut categories = Vec::new();

    let mut push = |label: &str, seen: &mut Vec<String>, categories: &mut Vec<String>| {
        let lower = label.to_lowercase();
        if !seen.contains(&lower) {
            seen.push(lower);
            categories.push(label.to_string());
        }
    };

    for hint in hints {
        if let Some(category) = category_from_class(hint) {
            push(&category, &mut seen, &mut categories);
        }
    }

    let haystack = text.to_lowercase();
    for (keyword, category) in KEYWORDS {
        if haystack.contains(keyword) {
            push(category, &mut seen, &mut categories);
        }
    }

    if categories.is_empty() {
        categories.push(OTHER_CATEGORY.to_string());
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_important_japanese() {
        let cats = classify("重要なお知らせ", &[]);
        assert!(cats.contains(&"Important".to_string()));
        assert!(cats.contains(&"Notice".to_string()));
    }

    #[test]
    fn test_empty_text_yields_other() {
        assert_eq!(classify("", &[]), vec![OTHER_CATEGORY.to_string()]);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let cats = classify("SECURITY Advisory", &[]);
        assert!(cats.contains(&"Security".to_string()));
    }

    #[test]
    fn test_multiple_keywords_contribute() {
        let cats = classify("Deprecated API shutdown schedule", &[]);
        assert!(cats.contains(&"Deprecated".to_string()));
        assert!(cats.contains(&"End of Service".to_string()));
    }

    #[test]
    fn test_release_class_hint() {
        let hints = vec!["release-feature".to_string(), "devsite-banner".to_string()];
        let cats = classify("", &hints);
        assert_eq!(cats, vec!["feature".to_string()]);
    }

    #[test]
    fn test_hint_and_keyword_dedup() {
        let hints = vec!["release-deprecated".to_string()];
        let cats = classify("This API is deprecated", &hints);
        assert_eq!(cats.iter().filter(|c| c.eq_ignore_ascii_case("deprecated")).count(), 1);
    }

    #[test]
    fn test_category_from_class() {
        assert_eq!(category_from_class("release-fixed"), Some("fixed".to_string()));
        assert_eq!(category_from_class("release-"), None);
        assert_eq!(category_from_class("badge"), None);
    }

    #[test]
    fn test_end_of_support_japanese() {
        let cats = classify("サポート終了のご案内", &[]);
        assert!(cats.contains(&"End of Support".to_string()));
        // 終了 alone also matches the broader End of Service keyword
        assert!(cats.contains(&"End of Service".to_string()));
    }
}
