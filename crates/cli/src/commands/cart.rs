//! Cart commands.

use std::fmt;

use shopsphere_core::ProductId;
use shopsphere_storefront::error::{AppError, Notification};
use shopsphere_storefront::models::{CartItem, QuantityAdjustment};
use shopsphere_storefront::state::AppState;
use shopsphere_storefront::storage::Storage;
use shopsphere_storefront::stores::total_cost;

use super::CommandResult;

/// Cart item display data.
#[derive(Clone)]
pub struct CartItemView {
    pub title: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Clone)]
pub struct CartView {
    pub owner: String,
    pub items: Vec<CartItemView>,
    pub total: String,
}

impl CartView {
    fn new(owner: String, items: &[CartItem]) -> Self {
        Self {
            owner,
            items: items.iter().map(CartItemView::from).collect(),
            total: total_cost(items).to_string(),
        }
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            title: item.product.title.clone(),
            quantity: item.quantity.get(),
            price: item.product.price.to_string(),
            line_price: item.line_total().to_string(),
        }
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}'s Cart", self.owner)?;

        if self.items.is_empty() {
            return write!(f, "Your cart is empty.");
        }

        for item in &self.items {
            writeln!(f, "{}", item.title)?;
            writeln!(f, "  {} x {} = {}", item.price, item.quantity, item.line_price)?;
        }
        write!(f, "Total: {}", self.total)
    }
}

/// Show the logged-in user's cart.
pub fn show<S: Storage>(state: &AppState<S>) -> CommandResult {
    let user = state.require_user()?;
    let items = state.carts().get_cart(&user.identity());
    Ok(CartView::new(state.display_name(), &items).to_string())
}

/// Add one unit of a catalog product.
pub fn add<S: Storage>(state: &AppState<S>, id: ProductId) -> CommandResult {
    let user = state.require_user()?;
    let product = state
        .catalog()
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;

    let quantity = state.carts().add_item(&user.identity(), &product)?;
    Ok(Notification::success(format!("Product added to cart! Quantity: {quantity}")).to_string())
}

/// Change one line by a single unit and show the cart.
pub fn adjust<S: Storage>(
    state: &AppState<S>,
    id: ProductId,
    adjustment: QuantityAdjustment,
) -> CommandResult {
    let user = state.require_user()?;
    let items = state
        .carts()
        .set_quantity(&user.identity(), id, adjustment)?;
    Ok(CartView::new(state.display_name(), &items).to_string())
}

/// Remove a line and show the cart.
pub fn remove<S: Storage>(state: &AppState<S>, id: ProductId) -> CommandResult {
    let user = state.require_user()?;
    let items = state.carts().remove_item(&user.identity(), id)?;
    Ok(CartView::new(state.display_name(), &items).to_string())
}

/// Cart badge: total units in the cart.
///
/// Not a protected view: without a session it tells the visitor to log in.
pub fn count<S: Storage>(state: &AppState<S>) -> CommandResult {
    Ok(state.session().current().map_or_else(
        || "No items in cart. Please log in first.".to_string(),
        |user| state.carts().item_count(&user.identity()).to_string(),
    ))
}
