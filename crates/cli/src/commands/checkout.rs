//! Checkout: validate the order and print the WhatsApp hand-off link.
//!
//! Nothing is sent anywhere; the terminal equivalent of the hand-off is
//! printing the prefilled link for the user to open.

use apteka_storefront::checkout::Order;
use apteka_storefront::{App, AppError};

pub fn run(
    app: &mut App,
    name: &str,
    address: &str,
    selected_only: bool,
) -> Result<(), AppError> {
    let lines = if selected_only {
        app.cart().selected().into_iter().cloned().collect()
    } else {
        app.cart().items().to_vec()
    };

    let order = Order::new(name, address, lines)?;

    println!("{}", order.summary());
    println!();
    println!("Open this link to send the order via WhatsApp:");
    println!("{}", order.whatsapp_url(&app.config().whatsapp_phone));

    // The cart empties once the order is handed off.
    app.cart_mut().clear();

    Ok(())
}
