//! # Activity Aggregator
//!
//! Builds the three independent aggregations from a record batch:
//! chronological (per calendar day), categorical (per taxonomy category),
//! and lexical (most frequent word tokens).

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::taxonomy::Category;
use super::ActivityRecord;

/// Maximum example messages retained per category
const EXAMPLES_PER_CATEGORY: usize = 3;

/// Maximum length of a retained example before truncation
const EXAMPLE_MAX_CHARS: usize = 100;

/// Word tokens of length >= 4, non-word characters as delimiters
const TOKEN_PATTERN: &str = r"\b\w{4,}\b";

/// Number of tokens kept in the lexical aggregation
const TOP_TOKENS: usize = 10;

/// Records per calendar day, ascending by date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Per-category count plus up to the first three example messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub category: Category,
    pub count: usize,
    pub examples: Vec<String>,
}

/// Occurrences of one lexical token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

/// The three aggregations, computed once per run and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregations {
    /// Chronological: records per calendar day, ascending
    pub by_date: Vec<DateCount>,
    /// Categorical: buckets in first-encounter order
    pub by_category: Vec<CategoryBucket>,
    /// Lexical: top tokens by frequency, first-encounter tie-break
    pub top_tokens: Vec<TokenCount>,
}

impl Aggregations {
    /// Aggregate a record batch along all three dimensions.
    ///
    /// Individual bad records never fail the build: an unparsable timestamp
    /// drops the record from the chronological aggregation only. An empty
    /// batch yields all-empty aggregations.
    pub fn build(records: &[ActivityRecord]) -> Aggregations {
        Aggregations {
            by_date: aggregate_by_date(records),
            by_category: aggregate_by_category(records),
            top_tokens: aggregate_tokens(records),
        }
    }

    /// Sum of categorical counts. Equals the batch size: every record is
    /// classified into exactly one category.
    pub fn total_classified(&self) -> usize {
        self.by_category.iter().map(|b| b.count).sum()
    }

    /// Category with the highest count, first-encounter tie-break
    pub fn most_active_category(&self) -> Option<Category> {
        let mut best: Option<&CategoryBucket> = None;
        for bucket in &self.by_category {
            if best.map_or(true, |b| bucket.count > b.count) {
                best = Some(bucket);
            }
        }
        best.map(|b| b.category)
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty() && self.by_category.is_empty() && self.top_tokens.is_empty()
    }
}

fn aggregate_by_date(records: &[ActivityRecord]) -> Vec<DateCount> {
    let mut day_counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        match DateTime::parse_from_rfc3339(&record.timestamp) {
            Ok(ts) => {
                let day = ts.with_timezone(&Utc).date_naive();
                *day_counts.entry(day).or_insert(0) += 1;
            }
            Err(_) => {
                tracing::debug!(id = %record.id, "skipping record with unparsable timestamp");
            }
        }
    }
    day_counts
        .into_iter()
        .map(|(date, count)| DateCount { date, count })
        .collect()
}

fn aggregate_by_category(records: &[ActivityRecord]) -> Vec<CategoryBucket> {
    let mut buckets: Vec<CategoryBucket> = Vec::new();
    for record in records {
        let category = Category::classify(&record.message);
        let idx = match buckets.iter().position(|b| b.category == category) {
            Some(idx) => idx,
            None => {
                buckets.push(CategoryBucket {
                    category,
                    count: 0,
                    examples: Vec::new(),
                });
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[idx];
        bucket.count += 1;
        if bucket.examples.len() < EXAMPLES_PER_CATEGORY {
            bucket.examples.push(truncate_example(&record.message));
        }
    }
    buckets
}

/// Flatten a message to one line, capped at 100 characters with an ellipsis
/// marker when longer.
fn truncate_example(message: &str) -> String {
    let clean = message.replace('\n', " ").trim().to_string();
    if clean.chars().count() > EXAMPLE_MAX_CHARS {
        let truncated: String = clean.chars().take(EXAMPLE_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        clean
    }
}

fn aggregate_tokens(records: &[ActivityRecord]) -> Vec<TokenCount> {
    let token_re = Regex::new(TOKEN_PATTERN).expect("token pattern is valid");

    // (count, first-seen index) per token, insertion order tracked for
    // deterministic tie-breaking
    let mut freq: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next_index = 0usize;

    for record in records {
        let lowered = record.message.to_lowercase();
        for token in token_re.find_iter(&lowered) {
            let entry = freq.entry(token.as_str().to_string()).or_insert_with(|| {
                let idx = next_index;
                next_index += 1;
                (0, idx)
            });
            entry.0 += 1;
        }
    }

    let mut counts: Vec<(String, usize, usize)> = freq
        .into_iter()
        .map(|(token, (count, first_seen))| (token, count, first_seen))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    counts.truncate(TOP_TOKENS);
    counts
        .into_iter()
        .map(|(token, count, _)| TokenCount { token, count })
        .collect()
}
