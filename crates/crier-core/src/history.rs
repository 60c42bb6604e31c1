//! Post history and duplicate avoidance
//!
//! An in-memory view over the append-only history loaded through the
//! history store port. New candidates are screened against the most recent
//! records with a token-overlap similarity measure; exceeding the threshold
//! tells the pipeline to regenerate.

use crate::catalog::Category;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One previously generated and published post
///
/// Records are append-only: created once after a successful generation and
/// never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Calendar date of the post (one post per day)
    pub date: NaiveDate,
    /// Category the post was generated for
    pub category: Category,
    /// Full post body, without hashtags
    pub content: String,
    /// Hashtags attached to the post
    pub hashtags: Vec<String>,
    /// Holiday name when the post was holiday-themed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday: Option<String>,
    /// True when the pre-authored fallback was used instead of generated text
    #[serde(default)]
    pub fallback: bool,
}

/// Ordered sequence of all known post records, oldest first
#[derive(Debug, Clone, Default)]
pub struct PostHistory {
    records: Vec<PostRecord>,
}

impl PostHistory {
    /// Wraps records loaded from the history store
    pub fn new(records: Vec<PostRecord>) -> Self {
        Self { records }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no posts have been recorded yet (normal on the first run)
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first
    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }

    /// The most recent `count` records, oldest first
    pub fn recent(&self, count: usize) -> &[PostRecord] {
        let start = self.records.len().saturating_sub(count);
        &self.records[start..]
    }

    /// Registers a record in the in-memory view
    ///
    /// The caller is responsible for also appending to durable storage.
    pub fn push(&mut self, record: PostRecord) {
        self.records.push(record);
    }

    /// True when a post was already recorded for the given date
    pub fn has_post_on(&self, date: NaiveDate) -> bool {
        self.records.iter().any(|record| record.date == date)
    }

    /// Checks a candidate against the most recent `lookback` records
    ///
    /// Similarity is the Jaccard overlap of lowercased body tokens, with
    /// hashtag tokens excluded so two distinct posts sharing a tag set are
    /// never flagged on tags alone. Returns true when any compared record
    /// exceeds `threshold`, signaling the caller to regenerate.
    pub fn is_too_similar(&self, candidate: &str, lookback: usize, threshold: f64) -> bool {
        let candidate_tokens = body_tokens(candidate);
        if candidate_tokens.is_empty() {
            return false;
        }

        self.recent(lookback).iter().any(|record| {
            similarity(&candidate_tokens, &body_tokens(&record.content)) > threshold
        })
    }

    /// Picks the category for an ordinary (non-holiday) day
    ///
    /// Deterministic rotation: the successor of the most recently used
    /// category in catalog order, so the same category is never used two
    /// runs in a row. An empty history starts at the top of the catalog.
    pub fn next_category(&self) -> Category {
        match self.records.last() {
            Some(record) => record.category.next(),
            None => Category::ALL[0],
        }
    }
}

/// Lowercased word set of a post body, hashtags removed
fn body_tokens(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .filter(|word| !word.starts_with('#'))
        .map(|word| word.to_lowercase())
        .collect()
}

/// Jaccard overlap ratio of two token sets
fn similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, category: Category, content: &str) -> PostRecord {
        PostRecord {
            date: date.parse().unwrap(),
            category,
            content: content.to_string(),
            hashtags: vec!["#WebDesign".to_string(), "#Philadelphia".to_string()],
            holiday: None,
            fallback: false,
        }
    }

    const THRESHOLD: f64 = 0.3;
    const LOOKBACK: usize = 5;

    #[test]
    fn test_identical_candidate_is_flagged() {
        let content = "Make sure your website loads fast on every device";
        let history = PostHistory::new(vec![record(
            "2026-08-01",
            Category::WebDesignTip,
            content,
        )]);

        assert!(history.is_too_similar(content, LOOKBACK, THRESHOLD));
    }

    #[test]
    fn test_near_paraphrase_is_flagged() {
        let history = PostHistory::new(vec![record(
            "2026-08-01",
            Category::WebDesignTip,
            "Make sure your website loads fast on every device your customers use",
        )]);

        let candidate = "Make sure your website loads fast on every single device \
                         your customers prefer";
        assert!(history.is_too_similar(candidate, LOOKBACK, THRESHOLD));
    }

    #[test]
    fn test_distinct_posts_sharing_only_hashtags_are_not_flagged() {
        let history = PostHistory::new(vec![record(
            "2026-08-01",
            Category::SeoTips,
            "Page titles remain the cheapest wins in search rankings today \
             #WebDesign #SEO",
        )]);

        let candidate = "Our favorite Fishtown coffee spots for a Monday morning \
                         sketch session #WebDesign #SEO";
        assert!(!history.is_too_similar(candidate, LOOKBACK, THRESHOLD));
    }

    #[test]
    fn test_old_records_outside_lookback_are_ignored() {
        let content = "Make sure your website loads fast on every device";
        let mut records = vec![record("2026-08-01", Category::WebDesignTip, content)];
        for day in 2..=6 {
            records.push(record(
                &format!("2026-08-{:02}", day),
                Category::TechTrends,
                &format!("Completely different filler text number {}", day),
            ));
        }
        let history = PostHistory::new(records);

        // The matching record is 6 posts back, outside a lookback of 5
        assert!(!history.is_too_similar(content, 5, THRESHOLD));
        assert!(history.is_too_similar(content, 6, THRESHOLD));
    }

    #[test]
    fn test_empty_history_never_flags() {
        let history = PostHistory::default();
        assert!(!history.is_too_similar("anything at all", LOOKBACK, THRESHOLD));
        assert!(history.is_empty());
    }

    #[test]
    fn test_empty_candidate_never_flags() {
        let history = PostHistory::new(vec![record(
            "2026-08-01",
            Category::WebDesignTip,
            "some stored content",
        )]);
        assert!(!history.is_too_similar("", LOOKBACK, THRESHOLD));
        assert!(!history.is_too_similar("#WebDesign #SEO", LOOKBACK, THRESHOLD));
    }

    #[test]
    fn test_recent_returns_newest_records() {
        let history = PostHistory::new(vec![
            record("2026-08-01", Category::WebDesignTip, "one"),
            record("2026-08-02", Category::TechTrends, "two"),
            record("2026-08-03", Category::SeoTips, "three"),
        ]);

        let recent = history.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].content, "two");
        assert_eq!(recent[1].content, "three");

        // Asking for more than exists returns everything
        assert_eq!(history.recent(10).len(), 3);
    }

    #[test]
    fn test_next_category_rotates_and_avoids_last_used() {
        let history = PostHistory::new(vec![record(
            "2026-08-01",
            Category::WebDesignTip,
            "anything",
        )]);
        let next = history.next_category();
        assert_ne!(next, Category::WebDesignTip);
        assert_eq!(next, Category::WebDesignTip.next());
    }

    #[test]
    fn test_next_category_on_empty_history() {
        assert_eq!(PostHistory::default().next_category(), Category::ALL[0]);
    }

    #[test]
    fn test_record_json_round_trip() {
        let original = PostRecord {
            date: "2026-12-25".parse().unwrap(),
            category: Category::LocalCommunity,
            content: "Merry Christmas, Fishtown!".to_string(),
            hashtags: vec!["#Christmas".to_string()],
            holiday: Some("Christmas".to_string()),
            fallback: false,
        };

        let json = serde_json::to_string(&original).expect("Failed to serialize");
        let parsed: PostRecord = serde_json::from_str(&json).expect("Failed to parse");
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_record_json_defaults_for_missing_fields() {
        // Records written before the fallback flag existed still load
        let json = r#"{
            "date": "2026-08-01",
            "category": "seo_tips",
            "content": "older record",
            "hashtags": []
        }"#;
        let parsed: PostRecord = serde_json::from_str(json).expect("Failed to parse");
        assert!(!parsed.fallback);
        assert!(parsed.holiday.is_none());
    }
}
