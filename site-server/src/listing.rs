//! Public menu ordering
//!
//! Category rank first (admin order, unranked last), then position, then id.
//! A name comparison closes the order for rows that share an id.

use std::cmp::Ordering;

use shared::models::{CategoryOrder, MenuItem};

/// Sort available items for the public listing (stable)
pub fn sort_menu(mut items: Vec<MenuItem>, order: &CategoryOrder) -> Vec<MenuItem> {
    items.sort_by(|a, b| {
        order
            .rank_of(&a.category)
            .cmp(&order.rank_of(&b.category))
            .then(a.position.cmp(&b.position))
            .then(a.id.cmp(&b.id))
            .then_with(|| collate_it(&a.name, &b.name))
    });
    items
}

/// Case-insensitive comparison with Italian accented vowels folded
pub fn collate_it(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

fn fold(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'à' | 'á' => 'a',
            'è' | 'é' => 'e',
            'ì' | 'í' => 'i',
            'ò' | 'ó' => 'o',
            'ù' | 'ú' => 'u',
            other => other,
        })
        .collect()
}
