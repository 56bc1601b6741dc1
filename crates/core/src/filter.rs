//! Date-range and category filtering over extracted items.
//!
//! All predicates are conjunctive and operate on the item list without
//! mutating the items themselves, so filtering is idempotent: applying the
//! same options to an already filtered list returns it unchanged.

use chrono::NaiveDate;

use crate::item::AnnouncementItem;

/// Filter predicates for one run.
///
/// `None` fields impose no constraint. Category matching is
/// case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Keep items published on or after this date.
    pub since: Option<NaiveDate>,
    /// Keep items published on or before this date.
    pub until: Option<NaiveDate>,
    /// Keep only items carrying this category.
    pub category: Option<String>,
    /// Drop items carrying this category.
    pub exclude_category: Option<String>,
}

impl FilterOptions {
    fn keeps(&self, item: &AnnouncementItem) -> bool {
        let date = item.published_at.date_naive();

        if let Some(since) = self.since {
            if date < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if date > until {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !has_category(item, category) {
                return false;
            }
        }
        if let Some(excluded) = &self.exclude_category {
            if has_category(item, excluded) {
                return false;
            }
        }

        true
    }
}

fn has_category(item: &AnnouncementItem, wanted: &str) -> bool {
    let wanted = wanted.to_lowercase();
    item.categories.iter().any(|c| c.to_lowercase() == wanted)
}

/// Applies the filter predicates, preserving item order.
pub fn apply(items: Vec<AnnouncementItem>, options: &FilterOptions) -> Vec<AnnouncementItem> {
    items.into_iter().filter(|item| options.keeps(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(day: u32, categories: &[&str]) -> AnnouncementItem {
        AnnouncementItem::new(
            format!("item-{}", day),
            "https://example.com",
            "body",
            Utc.with_ymd_and_hms(2025, 4, day, 0, 0, 0).unwrap(),
            categories.iter().map(|c| c.to_string()).collect(),
        )
    }

    #[test]
    fn test_since_keeps_later_items() {
        let items = vec![item(1, &[]), item(2, &[]), item(10, &[]), item(11, &[]), item(12, &[])];
        let options =
            FilterOptions { since: NaiveDate::from_ymd_opt(2025, 4, 10), ..Default::default() };

        let kept = apply(items, &options);
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].title, "item-10");
        assert_eq!(kept[2].title, "item-12");
    }

    #[test]
    fn test_until_bound_inclusive() {
        let items = vec![item(1, &[]), item(2, &[]), item(3, &[])];
        let options =
            FilterOptions { until: NaiveDate::from_ymd_opt(2025, 4, 2), ..Default::default() };

        assert_eq!(apply(items, &options).len(), 2);
    }

    #[test]
    fn test_category_include_case_insensitive() {
        let items = vec![item(1, &["Security"]), item(2, &["Release"])];
        let options = FilterOptions { category: Some("security".to_string()), ..Default::default() };

        let kept = apply(items, &options);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "item-1");
    }

    #[test]
    fn test_category_exclude() {
        let items = vec![item(1, &["Security"]), item(2, &["Release"])];
        let options =
            FilterOptions { exclude_category: Some("SECURITY".to_string()), ..Default::default() };

        let kept = apply(items, &options);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "item-2");
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let items = vec![item(1, &["Release"]), item(5, &["Release"]), item(5, &["Security"])];
        let options = FilterOptions {
            since: NaiveDate::from_ymd_opt(2025, 4, 2),
            category: Some("release".to_string()),
            ..Default::default()
        };

        let kept = apply(items, &options);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "item-5");
        assert_eq!(kept[0].categories, vec!["Release".to_string()]);
    }

    #[test]
    fn test_idempotent() {
        let items = vec![item(1, &["Release"]), item(5, &["Security"]), item(9, &[])];
        let options = FilterOptions {
            since: NaiveDate::from_ymd_opt(2025, 4, 2),
            exclude_category: Some("security".to_string()),
            ..Default::default()
        };

        let once = apply(items, &options);
        let twice = apply(once.clone(), &options);

        assert_eq!(once.len(), twice.len());
        let titles = |v: &[AnnouncementItem]| v.iter().map(|i| i.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&once), titles(&twice));
    }

    #[test]
    fn test_no_options_keeps_everything() {
        let items = vec![item(1, &[]), item(2, &[])];
        assert_eq!(apply(items, &FilterOptions::default()).len(), 2);
    }
}
