//! Menu category ordering document

use serde::{Deserialize, Serialize};

/// Rank of a menu category in the public listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRank {
    pub name: String,
    pub order: i64,
}

/// Admin-configured category ordering, stored as one page document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOrder {
    #[serde(default)]
    pub categories: Vec<CategoryRank>,
}

impl CategoryOrder {
    /// Rank given to categories without an explicit order
    pub const UNRANKED: i64 = 9999;

    /// Explicit rank for a category name (exact match on trimmed names)
    pub fn rank_of(&self, category: &str) -> i64 {
        let category = category.trim();
        self.categories
            .iter()
            .rev()
            .find(|c| c.name == category)
            .map(|c| c.order)
            .unwrap_or(Self::UNRANKED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_of() {
        let order = CategoryOrder {
            categories: vec![
                CategoryRank { name: "PIZZE".into(), order: 0 },
                CategoryRank { name: "ANTIPASTI".into(), order: 1 },
            ],
        };
        assert_eq!(order.rank_of("PIZZE"), 0);
        assert_eq!(order.rank_of(" ANTIPASTI "), 1);
        assert_eq!(order.rank_of("pizze"), CategoryOrder::UNRANKED);
        assert_eq!(order.rank_of(""), CategoryOrder::UNRANKED);
    }

    #[test]
    fn test_later_duplicate_wins() {
        let order = CategoryOrder {
            categories: vec![
                CategoryRank { name: "DOLCI".into(), order: 3 },
                CategoryRank { name: "DOLCI".into(), order: 7 },
            ],
        };
        assert_eq!(order.rank_of("DOLCI"), 7);
    }
}
