//! Cart record types.

use serde::{Deserialize, Serialize};

use shopsphere_core::{Price, ProductId, Quantity};

use super::{Product, UserIdentity};

/// A product line in a user's cart.
///
/// Stored flattened: the product's own fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product as it was when first added.
    #[serde(flatten)]
    pub product: Product,
    /// Units in the cart, never below one.
    pub quantity: Quantity,
}

impl CartItem {
    /// A new line holding one unit of `product`.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: Quantity::ONE,
        }
    }

    /// Product ID of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// A user's cart as persisted under the `carts` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRecord {
    /// Owner of the cart; matched on email.
    pub user: UserIdentity,
    /// Lines in insertion order.
    #[serde(rename = "Products", alias = "items", default)]
    pub items: Vec<CartItem>,
}

impl CartRecord {
    /// An empty cart for `user`.
    #[must_use]
    pub const fn new(user: UserIdentity) -> Self {
        Self {
            user,
            items: Vec::new(),
        }
    }

    /// Mutable access to the line for `id`, if present.
    pub fn item_mut(&mut self, id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }
}

/// A one-step quantity change on a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityAdjustment {
    /// Add one unit.
    Increase,
    /// Remove one unit, unless only one is left.
    Decrease,
}

impl QuantityAdjustment {
    /// Apply the adjustment to `quantity`.
    #[must_use]
    pub fn apply(self, quantity: Quantity) -> Quantity {
        match self {
            Self::Increase => quantity.incremented(),
            Self::Decrease => quantity.decremented().unwrap_or(quantity),
        }
    }
}
