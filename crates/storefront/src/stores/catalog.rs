//! The product catalog, read from the `products` key.

use tracing::instrument;

use shopsphere_core::ProductId;

use crate::models::Product;
use crate::storage::{Storage, StorageError, keys, read_json_list, write_json};

/// Read access to the product list, plus bulk import.
pub struct ProductCatalog<'a, S: ?Sized> {
    storage: &'a S,
}

impl<'a, S: Storage + ?Sized> ProductCatalog<'a, S> {
    /// Create a catalog over `storage`.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// Every product, in catalog order. Empty when nothing has been imported.
    #[must_use]
    pub fn all(&self) -> Vec<Product> {
        read_json_list(self.storage, keys::PRODUCTS).into_records()
    }

    /// Products whose title contains `query`, ignoring case. The query is
    /// matched as given, so an empty query matches everything and surrounding
    /// whitespace must appear in the title.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Product> {
        self.all()
            .into_iter()
            .filter(|p| p.title_matches(query))
            .collect()
    }

    /// Look up one product.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<Product> {
        self.all().into_iter().find(|p| p.id == id)
    }

    /// Replace the catalog with `products`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be written.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub fn import(&self, products: &[Product]) -> Result<(), StorageError> {
        write_json(self.storage, keys::PRODUCTS, products)?;
        tracing::info!("Catalog imported");
        Ok(())
    }
}
