//! Local answer rules: an ordered table of (predicate, handler) pairs.
//!
//! Rules are evaluated in sequence against the lowercased query; the first
//! rule whose predicate matches *and* whose handler produces an answer wins.
//! A handler may decline (return `None`) - e.g. a stock question about a
//! product we do not carry - and evaluation continues down the table.

use apteka_core::Product;

use crate::catalog::CatalogStore;

/// One dispatch rule.
struct Rule {
    applies: fn(&str) -> bool,
    answer: fn(&str, &CatalogStore) -> Option<String>,
}

/// Evaluation order matters: specific question shapes first, broad
/// category/price listings after, guidance last.
const RULES: &[Rule] = &[
    Rule { applies: is_stock_question, answer: answer_stock_question },
    Rule { applies: is_ingredient_question, answer: answer_ingredient_question },
    Rule { applies: is_category_listing, answer: answer_category_listing },
    Rule { applies: is_cheapest_question, answer: answer_cheapest },
    Rule { applies: is_premium_question, answer: answer_premium },
    Rule { applies: is_inventory_question, answer: answer_inventory },
    Rule { applies: |_| true, answer: answer_category_products },
    Rule { applies: is_help_question, answer: answer_help },
];

/// Run the query through the rule table.
pub(crate) fn answer_from_local(prompt: &str, catalog: &CatalogStore) -> Option<String> {
    let q = prompt.to_lowercase();
    RULES
        .iter()
        .filter(|rule| (rule.applies)(&q))
        .find_map(|rule| (rule.answer)(&q, catalog))
}

fn contains_any(q: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| q.contains(n))
}

// ---------------------------------------------------------------------------
// Stock questions: "do you have X in stock?"
// ---------------------------------------------------------------------------

fn is_stock_question(q: &str) -> bool {
    contains_any(q, &["do you have", "in stock", "available", "есть ли", "наличи"])
}

/// Words that carry no product meaning in a stock question.
const STOPWORDS: &[&str] = &[
    "the", "and", "you", "any", "have", "stock", "available", "does", "есть", "нас",
];

fn answer_stock_question(q: &str, catalog: &CatalogStore) -> Option<String> {
    let terms: Vec<&str> = q
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|w| w.len() >= 3 && !STOPWORDS.contains(w))
        .collect();
    if terms.is_empty() {
        return None;
    }

    let product = catalog
        .all()
        .iter()
        .find(|p| terms.iter().any(|t| p.matches(t)))?;

    Some(if product.in_stock() {
        format!(
            "Yes! {} is in stock. We have {} units available.\n\nPrice: ₽{}\n{}",
            product.name, product.stock, product.price, product.description
        )
    } else {
        format!(
            "Sorry, {} is currently out of stock.\n\nPrice: ₽{}\n{}\n\nWould you like me to show you similar products?",
            product.name, product.price, product.description
        )
    })
}

// ---------------------------------------------------------------------------
// Ingredient questions: "what contains magnesium?"
// ---------------------------------------------------------------------------

fn is_ingredient_question(q: &str) -> bool {
    contains_any(q, &["contains", "ingredient", "содержит"])
}

fn answer_ingredient_question(q: &str, catalog: &CatalogStore) -> Option<String> {
    let matches: Vec<&Product> = catalog
        .all()
        .iter()
        .filter(|p| {
            let ingredient = p.active_ingredient.to_lowercase();
            ingredient
                .split_whitespace()
                .any(|word| word.len() >= 4 && q.contains(word))
        })
        .collect();
    if matches.is_empty() {
        return None;
    }
    Some(format!(
        "Products with those ingredients:\n\n{}",
        format_products(&matches)
    ))
}

// ---------------------------------------------------------------------------
// Category listings and per-category products
// ---------------------------------------------------------------------------

fn is_category_listing(q: &str) -> bool {
    contains_any(q, &["categories", "категор"])
}

fn answer_category_listing(_q: &str, catalog: &CatalogStore) -> Option<String> {
    let categories = catalog.categories();
    if categories.is_empty() {
        return None;
    }
    let list = categories
        .iter()
        .map(|c| format!("• {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    Some(format!("Available categories:\n{list}"))
}

/// Unconditional predicate upstream; answers only when the query names a
/// known category.
fn answer_category_products(q: &str, catalog: &CatalogStore) -> Option<String> {
    let category = catalog
        .categories()
        .iter()
        .find(|c| q.contains(&c.to_lowercase()))?
        .clone();
    let matches: Vec<&Product> = catalog
        .all()
        .iter()
        .filter(|p| p.category == category)
        .collect();
    Some(format!(
        "Here are our {category} products:\n\n{}",
        format_products(&matches)
    ))
}

// ---------------------------------------------------------------------------
// Price questions
// ---------------------------------------------------------------------------

fn is_cheapest_question(q: &str) -> bool {
    contains_any(q, &["cheap", "affordable", "lowest price", "дешев"])
}

fn answer_cheapest(_q: &str, catalog: &CatalogStore) -> Option<String> {
    let mut products: Vec<&Product> = catalog.all().iter().collect();
    if products.is_empty() {
        return None;
    }
    products.sort_by(|a, b| a.price.cmp(&b.price));
    Some(format!(
        "Here are our most affordable products:\n\n{}",
        format_products(&products)
    ))
}

fn is_premium_question(q: &str) -> bool {
    contains_any(q, &["expensive", "premium", "дорог"])
}

fn answer_premium(_q: &str, catalog: &CatalogStore) -> Option<String> {
    let mut products: Vec<&Product> = catalog.all().iter().collect();
    if products.is_empty() {
        return None;
    }
    products.sort_by(|a, b| b.price.cmp(&a.price));
    Some(format!(
        "Here are our premium products:\n\n{}",
        format_products(&products)
    ))
}

// ---------------------------------------------------------------------------
// Inventory overview
// ---------------------------------------------------------------------------

fn is_inventory_question(q: &str) -> bool {
    contains_any(q, &["stock status", "inventory", "what is in stock"])
}

fn answer_inventory(_q: &str, catalog: &CatalogStore) -> Option<String> {
    let all = catalog.all();
    if all.is_empty() {
        return None;
    }
    let in_stock: Vec<&Product> = all.iter().filter(|p| p.in_stock()).collect();
    let out = all.len() - in_stock.len();
    Some(format!(
        "Stock status:\n• {} products in stock\n• {} products out of stock\n\nAvailable products:\n\n{}",
        in_stock.len(),
        out,
        format_products(&in_stock)
    ))
}

// ---------------------------------------------------------------------------
// Guidance
// ---------------------------------------------------------------------------

fn is_help_question(q: &str) -> bool {
    contains_any(q, &["help", "how to buy", "how do i", "order", "как купить"])
}

fn answer_help(_q: &str, _catalog: &CatalogStore) -> Option<String> {
    Some(
        "I can help you with:\n\
         • Finding products by name or condition\n\
         • Checking stock availability\n\
         • Showing products by category\n\
         • Getting prices and product information\n\n\
         To order: browse or search the catalog, add items to your cart, \
         then check out - we arrange payment and delivery over WhatsApp."
            .to_string(),
    )
}

// ---------------------------------------------------------------------------

const MAX_LISTED: usize = 5;

fn format_products(products: &[&Product]) -> String {
    products
        .iter()
        .take(MAX_LISTED)
        .map(|p| {
            let stock = if p.in_stock() {
                format!("In stock ({})", p.stock)
            } else {
                "Out of stock".to_string()
            };
            format!("{} - ₽{}\n{}\n{stock}", p.name, p.price, p.description)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LoadStatus, test_support::fallback_products};

    fn catalog() -> CatalogStore {
        CatalogStore::new(fallback_products(), LoadStatus::Primary)
    }

    #[test]
    fn test_stock_question_in_stock() {
        let answer = answer_from_local("Do you have aspirin in stock?", &catalog()).unwrap();
        assert!(answer.contains("Yes! Aspirin Plus is in stock"));
        assert!(answer.contains("45 units"));
    }

    #[test]
    fn test_stock_question_out_of_stock() {
        let answer = answer_from_local("Is magnesium available?", &catalog()).unwrap();
        assert!(answer.contains("Magnesium Complex is currently out of stock"));
    }

    #[test]
    fn test_stock_question_unknown_product_falls_through() {
        // The stock rule declines; no later rule matches either.
        assert!(answer_from_local("Do you have unicorn dust in stock?", &catalog()).is_none());
    }

    #[test]
    fn test_ingredient_question() {
        let answer = answer_from_local("What contains melatonin?", &catalog()).unwrap();
        assert!(answer.contains("Melatonin Sleep Aid"));
    }

    #[test]
    fn test_category_listing() {
        let answer = answer_from_local("What categories do you have?", &catalog()).unwrap();
        assert!(answer.contains("• Pain Relief"));
        assert!(answer.contains("• Minerals"));
    }

    #[test]
    fn test_category_products() {
        let answer = answer_from_local("Show me joint health products", &catalog()).unwrap();
        assert!(answer.contains("Joint Health products"));
        assert!(answer.contains("Glucosamine Joint Care"));
    }

    #[test]
    fn test_cheapest_lists_lowest_price_first() {
        let answer = answer_from_local("What are your cheapest products?", &catalog()).unwrap();
        let glucosamine2 = answer.find("Glucosamine Joint Care 2").unwrap();
        let aspirin = answer.find("Aspirin");
        // Aspirin (509.0) is the most expensive; it should not appear in the
        // top five affordable products at all.
        assert!(aspirin.is_none() || aspirin.unwrap() > glucosamine2);
    }

    #[test]
    fn test_inventory_overview() {
        let answer = answer_from_local("Give me the stock status", &catalog()).unwrap();
        assert!(answer.contains("11 products in stock"));
        assert!(answer.contains("3 products out of stock"));
    }

    #[test]
    fn test_help_guidance() {
        let answer = answer_from_local("help", &catalog()).unwrap();
        assert!(answer.contains("Checking stock availability"));
    }

    #[test]
    fn test_no_match_is_none() {
        assert!(answer_from_local("tell me a joke", &catalog()).is_none());
    }
}
