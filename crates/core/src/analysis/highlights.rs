//! # Highlight Composer
//!
//! Turns the categorical aggregation into grouped, human-readable exemplar
//! blocks for the report.

use super::aggregate::CategoryBucket;

/// Compose highlight lines from the categorical buckets.
///
/// One heading per category that has examples, followed by its example
/// lines. Buckets arrive in first-encounter order and are emitted in that
/// order, so output is reproducible for a given batch.
pub fn compose_highlights(buckets: &[CategoryBucket]) -> Vec<String> {
    let mut lines = Vec::new();
    for bucket in buckets {
        if bucket.examples.is_empty() {
            continue;
        }
        lines.push(format!(
            "### {} ({} records)",
            bucket.category.label(),
            bucket.count
        ));
        for example in &bucket.examples {
            lines.push(format!("- {example}"));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::taxonomy::Category;

    fn bucket(category: Category, count: usize, examples: &[&str]) -> CategoryBucket {
        CategoryBucket {
            category,
            count,
            examples: examples.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_heading_and_examples_per_category() {
        let buckets = vec![
            bucket(Category::FixDefect, 2, &["fix: a", "fix: c"]),
            bucket(Category::Feature, 1, &["feat: b"]),
        ];
        let lines = compose_highlights(&buckets);
        assert_eq!(lines[0], "### Bug Fixes (2 records)");
        assert_eq!(lines[1], "- fix: a");
        assert_eq!(lines[2], "- fix: c");
        assert_eq!(lines[3], "### Features (1 records)");
        assert_eq!(lines[4], "- feat: b");
    }

    #[test]
    fn test_zero_example_buckets_omitted() {
        let buckets = vec![
            bucket(Category::Other, 3, &[]),
            bucket(Category::FixDefect, 1, &["fix: a"]),
        ];
        let lines = compose_highlights(&buckets);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("### Bug Fixes"));
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        assert!(compose_highlights(&[]).is_empty());
    }

    #[test]
    fn test_preserves_bucket_order() {
        let buckets = vec![
            bucket(Category::Other, 1, &["chore: e"]),
            bucket(Category::FixDefect, 1, &["fix: a"]),
        ];
        let lines = compose_highlights(&buckets);
        assert!(lines[0].starts_with("### Other"));
        assert!(lines[2].starts_with("### Bug Fixes"));
    }
}
