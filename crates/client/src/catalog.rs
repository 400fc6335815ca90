//! Product catalog.
//!
//! The catalog is append-only for the lifetime of a client session: admins
//! can add products, nothing removes them. IDs come from a monotonic
//! counter so an id handed to a cart line stays unique even if removal is
//! ever introduced.

use rust_decimal::Decimal;
use url::Url;

use our_shop_core::{Price, PriceError, ProductId};

/// Errors that can occur when appending to the [`Catalog`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The product name is empty or whitespace-only.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The price is invalid.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// An opaque handle to a product image.
///
/// Bundled assets ship with the client; picked images come from the device
/// gallery or camera as local URIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// A bundled asset, referenced by key.
    Bundled(&'static str),
    /// A device-local image URI from the image picker.
    Uri(Url),
}

/// A purchasable product. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Catalog-assigned unique id.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Image handle for display.
    pub image: ImageRef,
}

/// The set of purchasable products known to the client.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    next_id: i32,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
            next_id: 0,
        }
    }

    /// Create a catalog seeded with the default product set.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for (name, price, asset) in [
            ("Laptop", Decimal::new(99_999, 2), "laptop.jpg"),
            ("iPhone", Decimal::new(69_999, 2), "iphone.jpg"),
            ("AirPods", Decimal::new(14_999, 2), "airpods.jpg"),
        ] {
            // Seed data is statically valid.
            let _ = catalog.add(name, price, ImageRef::Bundled(asset));
        }
        catalog
    }

    /// Append a new product, assigning it the next id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyName`] for a blank name and
    /// [`CatalogError::InvalidPrice`] for a negative price.
    pub fn add(
        &mut self,
        name: &str,
        price: Decimal,
        image: ImageRef,
    ) -> Result<Product, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let price = Price::usd(price)?;

        self.next_id += 1;
        let product = Product {
            id: ProductId::new(self.next_id),
            name: name.trim().to_owned(),
            price,
            image,
        };

        self.products.push(product.clone());
        Ok(product)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products, in insertion order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
