//! # Category Taxonomy
//!
//! Fixed, ordered classification of activity messages. The scan order is a
//! binding contract: a message matching several keyword sets resolves to the
//! earliest category in the table.

use serde::{Deserialize, Serialize};

/// Category of an activity record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Bug fixes and defect repairs
    FixDefect,
    /// New features and additions
    Feature,
    /// Documentation changes
    Documentation,
    /// Removals and deletions
    Removal,
    /// Updates and upgrades
    Maintenance,
    /// Merges and pulled branches
    Integration,
    /// Everything else
    Other,
}

/// Keyword table, scanned top to bottom. Reordering changes classification
/// outcomes, so the whole taxonomy lives in this one const.
const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (Category::FixDefect, &["fix", "bug"]),
    (Category::Feature, &["add", "feature", "implement"]),
    (Category::Documentation, &["doc", "readme"]),
    (Category::Removal, &["remove", "delete"]),
    (Category::Maintenance, &["update", "upgrade"]),
    (Category::Integration, &["merge", "pull"]),
];

impl Category {
    /// Classify a free-text message. Case-insensitive substring containment,
    /// first match wins, `Other` as the default.
    pub fn classify(message: &str) -> Category {
        let message = message.to_lowercase();
        for (category, keywords) in KEYWORD_TABLE {
            if keywords.iter().any(|kw| message.contains(kw)) {
                return *category;
            }
        }
        Category::Other
    }

    /// Display name for reports
    pub fn label(&self) -> &'static str {
        match self {
            Category::FixDefect => "Bug Fixes",
            Category::Feature => "Features",
            Category::Documentation => "Documentation",
            Category::Removal => "Removals",
            Category::Maintenance => "Maintenance",
            Category::Integration => "Integrations",
            Category::Other => "Other",
        }
    }

    /// All categories in taxonomy order
    pub fn all() -> Vec<Category> {
        vec![
            Category::FixDefect,
            Category::Feature,
            Category::Documentation,
            Category::Removal,
            Category::Maintenance,
            Category::Integration,
            Category::Other,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_matching() {
        assert_eq!(Category::classify("fix: broken parser"), Category::FixDefect);
        assert_eq!(Category::classify("implement login flow"), Category::Feature);
        assert_eq!(Category::classify("readme touch-up"), Category::Documentation);
        assert_eq!(Category::classify("delete dead module"), Category::Removal);
        assert_eq!(Category::classify("upgrade tokio to 1.38"), Category::Maintenance);
        assert_eq!(Category::classify("Merge branch 'main'"), Category::Integration);
    }

    #[test]
    fn test_unmatched_falls_to_other() {
        assert_eq!(Category::classify("chore: bump version"), Category::Other);
        assert_eq!(Category::classify(""), Category::Other);
    }

    #[test]
    fn test_first_match_wins() {
        // "fix" is scanned before "feature"
        assert_eq!(Category::classify("fix feature toggle"), Category::FixDefect);
        // "doc" is scanned before "update"
        assert_eq!(Category::classify("update docs"), Category::Documentation);
        // "add" is scanned before "merge"
        assert_eq!(Category::classify("merge: add ci job"), Category::Feature);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(Category::classify("FIX CRASH ON STARTUP"), Category::FixDefect);
        assert_eq!(Category::classify("Update README"), Category::Documentation);
    }

    #[test]
    fn test_all_lists_taxonomy_order() {
        let all = Category::all();
        assert_eq!(all.len(), 7);
        assert_eq!(all[0], Category::FixDefect);
        assert_eq!(all[6], Category::Other);
    }
}
