//! Pure query pipeline: category filter, text search, sort.
//!
//! Stages compose left to right over index views into a product slice, each
//! consuming the previous stage's output. Filter and search commute on set
//! membership; only sort is order-sensitive and therefore always runs last.
//! All three are total functions - "no match" yields an empty view, never an
//! error.

use apteka_core::Product;

/// Which field a sort orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
}

impl SortKey {
    /// Parse a user-supplied key. Unknown keys are `None`, which callers
    /// treat as "leave the view unchanged" rather than an error.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a user-supplied order; anything other than `desc` is ascending,
    /// matching the original's lenient handling.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "desc" { Self::Desc } else { Self::Asc }
    }
}

/// A sort instruction: key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

/// A full pipeline description, applied by
/// [`CatalogStore::apply`](crate::catalog::CatalogStore::apply).
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Exact category to retain; `None` (or the `"all"` sentinel) keeps
    /// everything.
    pub category: Option<String>,
    /// Free-text needle; empty or whitespace keeps everything.
    pub text: Option<String>,
    /// Final ordering; `None` keeps the prior stage's order.
    pub sort: Option<Sort>,
}

/// Retain view entries whose product matches `category` exactly.
///
/// `None`, empty, or the `"all"` sentinel return the input unchanged.
#[must_use]
pub fn filter_by_category(
    products: &[Product],
    view: Vec<usize>,
    category: Option<&str>,
) -> Vec<usize> {
    let Some(category) = category else {
        return view;
    };
    if category.is_empty() || category == "all" {
        return view;
    }
    view.into_iter()
        .filter(|&i| products.get(i).is_some_and(|p| p.category == category))
        .collect()
}

/// Retain view entries matching the needle (case-insensitive substring over
/// name, description, active ingredient, category).
///
/// An empty or whitespace-only needle returns the input unchanged.
#[must_use]
pub fn search(products: &[Product], view: Vec<usize>, needle: &str) -> Vec<usize> {
    let needle = needle.trim();
    if needle.is_empty() {
        return view;
    }
    view.into_iter()
        .filter(|&i| products.get(i).is_some_and(|p| p.matches(needle)))
        .collect()
}

/// Stable sort of the view by the given key and direction.
///
/// Names compare case-insensitively; prices compare numerically. Entries
/// with equal keys keep their relative order from the prior stage.
#[must_use]
pub fn sort_by(
    products: &[Product],
    mut view: Vec<usize>,
    key: SortKey,
    order: SortOrder,
) -> Vec<usize> {
    view.sort_by(|&a, &b| {
        let ord = match (products.get(a), products.get(b)) {
            (Some(pa), Some(pb)) => match key {
                SortKey::Name => pa.name.to_lowercase().cmp(&pb.name.to_lowercase()),
                SortKey::Price => pa.price.cmp(&pb.price),
            },
            _ => std::cmp::Ordering::Equal,
        };
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::fallback_products;

    fn full_view(products: &[Product]) -> Vec<usize> {
        (0..products.len()).collect()
    }

    fn names(products: &[Product], view: &[usize]) -> Vec<String> {
        view.iter()
            .filter_map(|&i| products.get(i))
            .map(|p| p.name.clone())
            .collect()
    }

    #[test]
    fn test_filter_all_sentinel_is_identity() {
        let products = fallback_products();
        let view = full_view(&products);
        assert_eq!(
            filter_by_category(&products, view.clone(), Some("all")),
            view
        );
        assert_eq!(filter_by_category(&products, view.clone(), Some("")), view);
        assert_eq!(filter_by_category(&products, view.clone(), None), view);
    }

    #[test]
    fn test_filter_exact_match_only() {
        let products = fallback_products();
        let view = filter_by_category(&products, full_view(&products), Some("Minerals"));
        assert_eq!(
            names(&products, &view),
            vec!["Magnesium Complex", "Zinc Immune Support"]
        );

        let none = filter_by_category(&products, full_view(&products), Some("Nonexistent"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_search_blank_query_is_identity() {
        let products = fallback_products();
        let view = full_view(&products);
        assert_eq!(search(&products, view.clone(), ""), view);
        assert_eq!(search(&products, view.clone(), "   "), view);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let products = fallback_products();
        // Matches the active ingredient field, not the name.
        let view = search(&products, full_view(&products), "CHOLECALCIFEROL");
        assert_eq!(names(&products, &view), vec!["Vitamin D3 Supreme"]);

        let none = search(&products, full_view(&products), "xyzzy");
        assert!(none.is_empty());
    }

    #[test]
    fn test_sort_by_price_stable() {
        let products = fallback_products();
        let sorted = sort_by(
            &products,
            full_view(&products),
            SortKey::Price,
            SortOrder::Asc,
        );
        let prices: Vec<_> = sorted
            .iter()
            .filter_map(|&i| products.get(i))
            .map(|p| p.price)
            .collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));

        // Ties keep catalog order: the many 59.0 products stay in id order.
        let tied: Vec<_> = sorted
            .iter()
            .filter_map(|&i| products.get(i))
            .filter(|p| p.price == rust_decimal::Decimal::new(590, 1))
            .map(|p| p.id)
            .collect();
        let mut expected = tied.clone();
        expected.sort();
        assert_eq!(tied, expected);
    }

    #[test]
    fn test_sort_by_name_desc() {
        let products = fallback_products();
        let sorted = sort_by(
            &products,
            full_view(&products),
            SortKey::Name,
            SortOrder::Desc,
        );
        let sorted_names = names(&products, &sorted);
        let mut expected = sorted_names.clone();
        expected.sort_by_key(|n| std::cmp::Reverse(n.to_lowercase()));
        assert_eq!(sorted_names, expected);
    }

    #[test]
    fn test_filter_and_search_commute_on_membership() {
        let products = fallback_products();
        let category = Some("Vitamins & Supplements");

        let filter_first = search(
            &products,
            filter_by_category(&products, full_view(&products), category),
            "vitamin",
        );
        let search_first = filter_by_category(
            &products,
            search(&products, full_view(&products), "vitamin"),
            category,
        );

        let mut a = filter_first.clone();
        let mut b = search_first.clone();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);

        // With sort applied last, the full pipelines agree on order too.
        let sorted_a = sort_by(&products, filter_first, SortKey::Price, SortOrder::Asc);
        let sorted_b = sort_by(&products, search_first, SortKey::Price, SortOrder::Asc);
        assert_eq!(sorted_a, sorted_b);
    }

    #[test]
    fn test_sort_key_parse_unknown_is_none() {
        assert_eq!(SortKey::parse("name"), Some(SortKey::Name));
        assert_eq!(SortKey::parse("price"), Some(SortKey::Price));
        assert_eq!(SortKey::parse("popularity"), None);
    }
}
