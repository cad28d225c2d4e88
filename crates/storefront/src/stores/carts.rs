//! Per-user carts, persisted under the `carts` key.
//!
//! Carts are located by exact email match. A user's record is created on the
//! first add-to-cart and is never deleted, even once its last line has been
//! removed. A record that fails to decode is left in place untouched; its
//! owner sees an empty cart, and a fresh record is added for them on their
//! next add-to-cart.

use tracing::instrument;

use shopsphere_core::{Price, ProductId, Quantity};

use crate::models::{CartItem, CartRecord, Product, QuantityAdjustment, UserIdentity};
use crate::storage::{JsonList, Storage, StorageError, keys, read_json_list, write_json};

/// Repository for user carts.
pub struct CartStore<'a, S: ?Sized> {
    storage: &'a S,
}

impl<'a, S: Storage + ?Sized> CartStore<'a, S> {
    /// Create a cart store over `storage`.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    fn load(&self) -> JsonList<CartRecord> {
        read_json_list(self.storage, keys::CARTS)
    }

    fn save(&self, carts: &JsonList<CartRecord>) -> Result<(), StorageError> {
        write_json(self.storage, keys::CARTS, carts)
    }

    /// Apply `change` to the user's record and persist all carts.
    ///
    /// Users without a record are left alone; nothing is written.
    fn update<F>(&self, user: &UserIdentity, change: F) -> Result<Vec<CartItem>, StorageError>
    where
        F: FnOnce(&mut CartRecord),
    {
        let mut carts = self.load();
        let Some(record) = carts.records_mut().find(|c| c.user.email == user.email) else {
            return Ok(Vec::new());
        };

        change(record);
        let items = record.items.clone();
        self.save(&carts)?;
        Ok(items)
    }

    /// Lines in the user's cart, in the order they were added.
    #[must_use]
    pub fn get_cart(&self, user: &UserIdentity) -> Vec<CartItem> {
        self.load()
            .into_records()
            .into_iter()
            .find(|c| c.user.email == user.email)
            .map(|c| c.items)
            .unwrap_or_default()
    }

    /// Add one unit of `product`, creating the line (and the user's cart)
    /// if needed. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the carts cannot be saved.
    #[instrument(skip(self, user, product), fields(email = %user.email, product_id = %product.id))]
    pub fn add_item(&self, user: &UserIdentity, product: &Product) -> Result<Quantity, StorageError> {
        let mut carts = self.load();
        if !carts.records().any(|c| c.user.email == user.email) {
            carts.push(CartRecord::new(user.clone()));
        }

        let quantity = carts
            .records_mut()
            .find(|c| c.user.email == user.email)
            .map_or(Quantity::ONE, |record| match record.item_mut(product.id) {
                Some(item) => {
                    item.quantity = item.quantity.incremented();
                    item.quantity
                }
                None => {
                    record.items.push(CartItem::new(product.clone()));
                    Quantity::ONE
                }
            });

        self.save(&carts)?;
        tracing::debug!(quantity = quantity.get(), "Added to cart");
        Ok(quantity)
    }

    /// Increase or decrease one line by a single unit. Decreasing a line
    /// with one unit leaves it unchanged. Returns the updated cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the carts cannot be saved.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub fn set_quantity(
        &self,
        user: &UserIdentity,
        item_id: ProductId,
        adjustment: QuantityAdjustment,
    ) -> Result<Vec<CartItem>, StorageError> {
        self.update(user, |record| {
            if let Some(item) = record.item_mut(item_id) {
                item.quantity = adjustment.apply(item.quantity);
            }
        })
    }

    /// Delete a line entirely, leaving the others untouched. Returns the
    /// updated cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the carts cannot be saved.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub fn remove_item(
        &self,
        user: &UserIdentity,
        item_id: ProductId,
    ) -> Result<Vec<CartItem>, StorageError> {
        self.update(user, |record| {
            record.items.retain(|item| item.id() != item_id);
        })
    }

    /// Quantity of one product in the user's cart.
    #[must_use]
    pub fn quantity_of(&self, user: &UserIdentity, item_id: ProductId) -> Option<Quantity> {
        self.get_cart(user)
            .iter()
            .find(|item| item.id() == item_id)
            .map(|item| item.quantity)
    }

    /// Total units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self, user: &UserIdentity) -> u32 {
        self.get_cart(user)
            .iter()
            .map(|item| item.quantity.get())
            .fold(0, u32::saturating_add)
    }
}

/// Sum of unit price times quantity over `items`.
///
/// Decimal arithmetic makes the result exact, so it does not depend on the
/// order of the lines.
#[must_use]
pub fn total_cost(items: &[CartItem]) -> Price {
    items.iter().map(CartItem::line_total).sum()
}
