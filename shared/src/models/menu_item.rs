//! Menu item model

use serde::{Deserialize, Serialize};

use super::allergen::AllergenSet;

/// Menu item (IT text plus optional EN translations)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub category: String,
    /// Intra-category tie-break
    pub position: i64,
    pub is_available: bool,
    pub name_en: String,
    pub description_en: String,
    pub category_en: String,
    #[cfg_attr(feature = "db", sqlx(try_from = "Vec<String>"))]
    pub allergens: AllergenSet,
    pub image_url: Option<String>,
}

/// Create menu item payload (already sanitized)
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub category: String,
    pub position: i64,
    pub is_available: bool,
    pub name_en: String,
    pub description_en: String,
    pub category_en: String,
    pub allergens: AllergenSet,
    pub image_url: String,
}

/// Update menu item payload
///
/// `None` keeps the stored column. `image_url` distinguishes "absent"
/// (`None`) from "explicitly cleared" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub category: Option<String>,
    pub position: Option<i64>,
    pub is_available: Option<bool>,
    pub name_en: Option<String>,
    pub description_en: Option<String>,
    pub category_en: Option<String>,
    pub allergens: Option<AllergenSet>,
    pub image_url: Option<Option<String>>,
}

impl MenuItemUpdate {
    /// Apply this patch to an item (coalesce-to-existing)
    pub fn apply_to(&self, item: &mut MenuItem) {
        if let Some(v) = &self.name {
            item.name = v.clone();
        }
        if let Some(v) = &self.description {
            item.description = v.clone();
        }
        if let Some(v) = self.price_cents {
            item.price_cents = v;
        }
        if let Some(v) = &self.category {
            item.category = v.clone();
        }
        if let Some(v) = self.position {
            item.position = v;
        }
        if let Some(v) = self.is_available {
            item.is_available = v;
        }
        if let Some(v) = &self.name_en {
            item.name_en = v.clone();
        }
        if let Some(v) = &self.description_en {
            item.description_en = v.clone();
        }
        if let Some(v) = &self.category_en {
            item.category_en = v.clone();
        }
        if let Some(v) = &self.allergens {
            item.allergens = v.clone();
        }
        if let Some(v) = &self.image_url {
            item.image_url = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> MenuItem {
        MenuItem {
            id: 5,
            name: "Margherita".into(),
            description: "Pomodoro e mozzarella".into(),
            price_cents: 700,
            category: "PIZZE".into(),
            position: 1,
            is_available: true,
            name_en: String::new(),
            description_en: String::new(),
            category_en: "PIZZAS".into(),
            allergens: AllergenSet::from_tags(["glutine", "latte"]),
            image_url: Some("https://example.com/img/a.jpg".into()),
        }
    }

    #[test]
    fn test_empty_update_keeps_everything() {
        let mut it = item();
        MenuItemUpdate::default().apply_to(&mut it);
        assert_eq!(it, item());
    }

    #[test]
    fn test_update_clears_image_and_replaces_allergens() {
        let mut it = item();
        let patch = MenuItemUpdate {
            price_cents: Some(800),
            image_url: Some(None),
            allergens: Some(AllergenSet::default()),
            ..Default::default()
        };
        patch.apply_to(&mut it);
        assert_eq!(it.price_cents, 800);
        assert_eq!(it.image_url, None);
        assert!(it.allergens.is_empty());
        assert_eq!(it.name, "Margherita");
    }
}
