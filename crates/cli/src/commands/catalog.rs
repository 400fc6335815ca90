//! Catalog inspection commands.

use our_shop_client::catalog::Catalog;

/// Print the default product catalog.
#[allow(clippy::print_stdout)]
pub fn list() {
    let catalog = Catalog::with_defaults();
    for product in catalog.products() {
        println!("{:>3}  {:<12} {}", product.id, product.name, product.price);
    }
}
