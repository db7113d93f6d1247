//! Hierarchical account paths
//!
//! Accounts are written as `:`-separated alphanumeric segments, e.g.
//! `Expenses:Food:Groceries`. The parser keeps the ordered segments; joining
//! them with `:` reproduces the source text exactly.

use std::fmt;

use compact_str::CompactString;

/// A hierarchical account path: one or more sub-account names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Account {
    segments: Vec<CompactString>,
}

impl Account {
    /// Create an account from its sub-account names. At least one segment is
    /// required.
    pub fn new(segments: Vec<CompactString>) -> Self {
        debug_assert!(!segments.is_empty(), "account must have at least one segment");
        Account { segments }
    }

    /// The ordered sub-account names.
    pub fn segments(&self) -> &[CompactString] {
        &self.segments
    }

    /// The full `:`-joined account name.
    pub fn full_name(&self) -> String {
        self.segments.join(":")
    }

    /// Number of levels in the hierarchy.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(segments: &[&str]) -> Account {
        Account::new(segments.iter().map(|s| CompactString::from(*s)).collect())
    }

    #[test]
    fn test_single_level() {
        let account = account(&["Expenses"]);
        assert_eq!(account.full_name(), "Expenses");
        assert_eq!(account.depth(), 1);
    }

    #[test]
    fn test_display_joins_with_colons() {
        let account = account(&["Expenses", "Food", "Groceries"]);
        assert_eq!(account.to_string(), "Expenses:Food:Groceries");
        assert_eq!(account.to_string(), account.full_name());
    }

    #[test]
    fn test_segments_keep_order() {
        let account = account(&["Assets", "Savings"]);
        assert_eq!(account.segments(), &["Assets", "Savings"]);
    }
}
