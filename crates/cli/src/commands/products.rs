//! Product listing, detail and import commands.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use shopsphere_core::ProductId;
use shopsphere_storefront::error::AppError;
use shopsphere_storefront::models::Product;
use shopsphere_storefront::state::AppState;
use shopsphere_storefront::storage::Storage;

use super::{CliError, CommandResult};

/// List the catalog, optionally filtered by a title search.
pub fn list<S: Storage>(state: &AppState<S>, search: Option<&str>) -> CommandResult {
    state.require_user()?;

    let catalog = state.catalog();
    let all = catalog.all();
    if all.is_empty() {
        return Ok("No products found in local storage.".to_string());
    }

    let products = match search {
        Some(query) => catalog.search(query),
        None => all,
    };

    let mut out = format!(
        "Welcome to {}\nExplore the latest trends and find the best deals!\n",
        state.config().store_name
    );

    if products.is_empty() {
        out.push_str("\nNo products found. Try a different search.");
        return Ok(out);
    }

    for product in &products {
        let _ = write!(out, "\n{:>4}  {}  {}", product.id, product.title, product.price);
    }

    Ok(out)
}

/// Show one product, with how many are already in the user's cart.
pub fn show<S: Storage>(state: &AppState<S>, id: ProductId) -> CommandResult {
    let user = state.require_user()?;

    let product = state
        .catalog()
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("Product {id}")))?;

    let mut out = format!("{}\n{}\n", product.title, product.price);
    if let Some(category) = &product.category {
        let _ = writeln!(out, "Category: {category}");
    }
    if let Some(rating) = &product.rating {
        let _ = writeln!(out, "Rating: {:.1} ({} reviews)", rating.rate, rating.count);
    }
    if !product.description.is_empty() {
        let _ = writeln!(out, "\n{}", product.description);
    }
    if let Some(quantity) = state.carts().quantity_of(&user.identity(), id) {
        let _ = writeln!(out, "\nIn your cart: {quantity}");
    }

    Ok(out.trim_end().to_string())
}

/// Replace the catalog with the products in a JSON file.
pub fn import<S: Storage>(state: &AppState<S>, path: &Path) -> CommandResult {
    let contents = fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let products: Vec<Product> =
        serde_json::from_str(&contents).map_err(|source| CliError::InvalidProducts {
            path: path.to_path_buf(),
            source,
        })?;

    state.catalog().import(&products)?;
    Ok(format!("Imported {} products.", products.len()))
}
