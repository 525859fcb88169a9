//! Catalog browsing: filtered, searched, sorted, paginated listing.

use apteka_storefront::App;
use apteka_storefront::query::{Query, Sort, SortKey, SortOrder};

use super::rub;

/// Run the query pipeline over the catalog and print one page of the view.
pub fn list(
    app: &mut App,
    category: Option<String>,
    search: Option<String>,
    sort: Option<String>,
    order: &str,
    page: usize,
) {
    let sort = sort
        .as_deref()
        .and_then(SortKey::parse)
        .map(|key| Sort {
            key,
            order: SortOrder::parse(order),
        });

    app.catalog_mut().apply(&Query {
        category,
        text: search,
        sort,
    });

    let paginator = *app.paginator();
    let view = app.catalog().view();
    let total = view.len();
    let slice = paginator.slice(&view, page);

    if total == 0 {
        println!("No products match.");
        return;
    }

    for product in slice.items {
        let stock = if product.in_stock() {
            format!("{} in stock", product.stock)
        } else {
            "out of stock".to_string()
        };
        let rx = if product.prescription { " [Rx]" } else { "" };
        println!(
            "#{:<4} {:<28} {:>12}  {}  ({}){rx}",
            product.id,
            product.name,
            rub(product.price),
            stock,
            product.category,
        );
    }

    println!();
    println!(
        "Page {page} of {} ({total} product{})",
        slice.total_pages,
        if total == 1 { "" } else { "s" }
    );
}

/// Print the distinct categories, derived from the full catalog.
pub fn categories(app: &App) {
    for category in app.catalog().categories() {
        println!("{category}");
    }
}
