//! Product records as delivered by the catalog source.
//!
//! Products are immutable from the engine's point of view: they are created
//! by a catalog load and replaced wholesale on reload. Localized variants are
//! explicit optional fields rather than presence-checked dynamic properties;
//! the engine itself never reads them - translation is presentation work.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A sellable product from the catalog.
///
/// Prices are decimal amounts in the store's single display currency; stock
/// is the number of units available, with `0` meaning unavailable. `stock`
/// bounds cart quantities at mutation time but is never decremented here -
/// inventory is read-only display data for this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Localized name, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_ru: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ru: Option<String>,
    pub category: String,
    pub price: Decimal,
    /// Units available. Zero means the product cannot be added to a cart.
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub active_ingredient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_ingredient_ru: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub prescription: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage_form: Option<String>,
}

impl Product {
    /// Whether the product has at least one unit available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Case-insensitive substring match across the searchable text fields:
    /// name, description, active ingredient, and category.
    ///
    /// The needle is expected to be non-empty; callers treat empty queries
    /// as "match everything" before getting here.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.active_ingredient.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn aspirin() -> Product {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Aspirin Plus",
            "price": 509.0,
            "description": "Advanced pain relief and anti-inflammatory medication.",
            "category": "Pain Relief",
            "image": "aspirin.jpg",
            "prescription": false,
            "active_ingredient": "Acetylsalicylic Acid",
            "strength": "500mg",
            "dosage_form": "Tablet",
            "stock": 45
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_catalog_record() {
        let p = aspirin();
        assert_eq!(p.id, ProductId::new(1));
        assert_eq!(p.price, Decimal::new(5090, 1));
        assert_eq!(p.stock, 45);
        assert!(p.in_stock());
        assert_eq!(p.name_ru, None);
        assert_eq!(p.strength.as_deref(), Some("500mg"));
    }

    #[test]
    fn test_optional_localized_fields() {
        let p: Product = serde_json::from_value(serde_json::json!({
            "id": 2,
            "name": "Vitamin D3 Supreme",
            "name_ru": "Витамин D3",
            "description": "Premium vitamin D3 supplement.",
            "category": "Vitamins & Supplements",
            "price": 59.0,
            "stock": 0,
            "active_ingredient": "Cholecalciferol"
        }))
        .unwrap();
        assert_eq!(p.name_ru.as_deref(), Some("Витамин D3"));
        assert!(!p.in_stock());
    }

    #[test]
    fn test_matches_searches_all_text_fields() {
        let p = aspirin();
        assert!(p.matches("aspirin"));
        assert!(p.matches("PAIN RELIEF"));
        assert!(p.matches("acetylsalicylic"));
        assert!(p.matches("anti-inflammatory"));
        assert!(!p.matches("melatonin"));
    }
}
