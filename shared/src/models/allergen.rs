//! Allergen vocabulary (EU 14 + nickel)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Allergen tag. The declaration order is the canonical listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Allergen {
    #[serde(rename = "glutine")]
    Glutine,
    #[serde(rename = "crostacei")]
    Crostacei,
    #[serde(rename = "uova")]
    Uova,
    #[serde(rename = "pesce")]
    Pesce,
    #[serde(rename = "arachidi")]
    Arachidi,
    #[serde(rename = "soia")]
    Soia,
    #[serde(rename = "latte")]
    Latte,
    #[serde(rename = "frutta_a_guscio")]
    FruttaAGuscio,
    #[serde(rename = "sedano")]
    Sedano,
    #[serde(rename = "senape")]
    Senape,
    #[serde(rename = "sesamo")]
    Sesamo,
    #[serde(rename = "solfiti")]
    Solfiti,
    #[serde(rename = "lupini")]
    Lupini,
    #[serde(rename = "molluschi")]
    Molluschi,
    #[serde(rename = "nichel")]
    Nichel,
}

impl Allergen {
    /// Every tag, in canonical order
    pub const ALL: [Allergen; 15] = [
        Allergen::Glutine,
        Allergen::Crostacei,
        Allergen::Uova,
        Allergen::Pesce,
        Allergen::Arachidi,
        Allergen::Soia,
        Allergen::Latte,
        Allergen::FruttaAGuscio,
        Allergen::Sedano,
        Allergen::Senape,
        Allergen::Sesamo,
        Allergen::Solfiti,
        Allergen::Lupini,
        Allergen::Molluschi,
        Allergen::Nichel,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Allergen::Glutine => "glutine",
            Allergen::Crostacei => "crostacei",
            Allergen::Uova => "uova",
            Allergen::Pesce => "pesce",
            Allergen::Arachidi => "arachidi",
            Allergen::Soia => "soia",
            Allergen::Latte => "latte",
            Allergen::FruttaAGuscio => "frutta_a_guscio",
            Allergen::Sedano => "sedano",
            Allergen::Senape => "senape",
            Allergen::Sesamo => "sesamo",
            Allergen::Solfiti => "solfiti",
            Allergen::Lupini => "lupini",
            Allergen::Molluschi => "molluschi",
            Allergen::Nichel => "nichel",
        }
    }

    /// Look up a tag, ignoring surrounding whitespace and case
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        Self::ALL.into_iter().find(|a| a.as_str() == tag)
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deduplicated allergen set, always listed in canonical order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllergenSet(Vec<Allergen>);

impl AllergenSet {
    /// Build a set from free-form tags. Unknown tags are dropped.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let found: Vec<Allergen> = tags
            .into_iter()
            .filter_map(|t| Allergen::parse(t.as_ref()))
            .collect();
        Self(
            Allergen::ALL
                .into_iter()
                .filter(|a| found.contains(a))
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[Allergen] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Tags as stored in the `allergens text[]` column
    pub fn to_tags(&self) -> Vec<String> {
        self.0.iter().map(|a| a.as_str().to_string()).collect()
    }
}

impl From<Vec<String>> for AllergenSet {
    fn from(tags: Vec<String>) -> Self {
        Self::from_tags(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_and_space_insensitive() {
        assert_eq!(Allergen::parse(" Glutine "), Some(Allergen::Glutine));
        assert_eq!(Allergen::parse("FRUTTA_A_GUSCIO"), Some(Allergen::FruttaAGuscio));
        assert_eq!(Allergen::parse("peanuts"), None);
        assert_eq!(Allergen::parse(""), None);
    }

    #[test]
    fn test_set_follows_canonical_order() {
        let set = AllergenSet::from_tags(["nichel", "latte", "glutine", "latte", "bogus"]);
        assert_eq!(
            set.as_slice(),
            &[Allergen::Glutine, Allergen::Latte, Allergen::Nichel]
        );
    }

    #[test]
    fn test_serde_uses_tag_names() {
        let set = AllergenSet::from_tags(["sesamo", "frutta_a_guscio"]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!(["frutta_a_guscio", "sesamo"]));
    }

    #[test]
    fn test_vocabulary_has_fifteen_distinct_tags() {
        let mut names: Vec<&str> = Allergen::ALL.iter().map(|a| a.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 15);
    }
}
