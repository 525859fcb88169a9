//! Cart subcommands: show, add, remove, qty, toggle, clear.
//!
//! Declined operations (out of stock, stock limit reached) are notices on
//! stdout, not errors; the cart stays in a valid state either way.

use apteka_core::ProductId;
use apteka_storefront::App;
use apteka_storefront::cart::CartError;

use super::rub;
use crate::CartAction;

pub fn run(app: &mut App, action: &CartAction) {
    match *action {
        CartAction::Show => show(app),
        CartAction::Add { id } => add(app, ProductId::from(id)),
        CartAction::Remove { id } => {
            app.cart_mut().remove(ProductId::from(id));
            println!("Removed product #{id} from the cart.");
        }
        CartAction::Qty { id, qty } => set_quantity(app, ProductId::from(id), qty),
        CartAction::Toggle { id } => match app.cart_mut().toggle_selected(ProductId::from(id)) {
            Some(true) => println!("Product #{id} selected for checkout."),
            Some(false) => println!("Product #{id} deselected."),
            None => println!("Product #{id} is not in the cart."),
        },
        CartAction::Clear => {
            app.cart_mut().clear();
            println!("Cart cleared.");
        }
    }
}

fn show(app: &App) {
    let cart = app.cart();
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for line in cart.items() {
        let mark = if line.selected { "x" } else { " " };
        println!(
            "[{mark}] #{:<4} {:<28} {} × {:<3} = {}",
            line.id,
            line.name,
            rub(line.price),
            line.qty,
            rub(line.subtotal()),
        );
    }

    println!();
    println!(
        "{} item(s), total {}",
        cart.total_quantity(),
        rub(cart.total_price())
    );
}

fn add(app: &mut App, id: ProductId) {
    let Some(product) = app.catalog().find(id).cloned() else {
        println!("No product with id #{id}.");
        return;
    };

    match app.cart_mut().add(&product) {
        Ok(outcome) => println!(
            "Added {} (now {} of {} in cart).",
            product.name, outcome.qty, outcome.max
        ),
        Err(CartError::OutOfStock) => println!("{} is out of stock.", product.name),
        Err(CartError::LimitReached { max }) => {
            println!("Only {max} of {} available; cart already holds them all.", product.name);
        }
    }
}

fn set_quantity(app: &mut App, id: ProductId, qty: u32) {
    match app.set_cart_quantity(id, qty) {
        Some(outcome) if outcome.limited => println!(
            "Only {} available; quantity set to {}.",
            outcome.max, outcome.qty
        ),
        Some(outcome) => println!("Quantity set to {}.", outcome.qty),
        None => println!("Product #{id} is not in the cart."),
    }
}
