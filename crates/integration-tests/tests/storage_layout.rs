//! The persisted JSON layout: existing storage files load, and writes keep
//! the same shape.

#![allow(clippy::unwrap_used)]

use serde_json::json;

use shopsphere_core::{Price, ProductId};
use shopsphere_integration_tests::{PASSWORD, TestContext, login_form};
use shopsphere_storefront::stores::total_cost;

fn existing_storage() -> String {
    let users = json!([{
        "name": "shopper",
        "email": "shopper@example.com",
        "password": "Secret#123",
        "confirmPassword": "Secret#123"
    }]);
    let user = json!({
        "name": "shopper",
        "email": "shopper@example.com",
        "password": "Secret#123"
    });
    let carts = json!([{
        "user": {"name": "shopper", "email": "shopper@example.com"},
        "Products": [{
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Your perfect pack",
            "category": "men's clothing",
            "image": "https://example.com/backpack.jpg",
            "rating": {"rate": 3.9, "count": 120},
            "quantity": 2
        }]
    }]);

    json!({
        "users": users.to_string(),
        "user": user.to_string(),
        "carts": carts.to_string(),
        "username": "shopper"
    })
    .to_string()
}

#[test]
fn test_loads_existing_storage() {
    let ctx = TestContext::with_file_contents(&existing_storage());

    let me = ctx.state.require_user().unwrap();
    assert_eq!(me.email.as_str(), "shopper@example.com");
    assert_eq!(ctx.state.display_name(), "shopper");

    let cart = ctx.state.carts().get_cart(&me.identity());
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].product.category.as_deref(), Some("men's clothing"));
    assert_eq!(total_cost(&cart), Price::from_cents(21_990));
}

#[test]
fn test_existing_users_can_log_in() {
    let ctx = TestContext::with_file_contents(&existing_storage());
    ctx.state.auth().logout().unwrap();

    ctx.state
        .auth()
        .login(&login_form("shopper@example.com", PASSWORD))
        .unwrap();
    assert!(ctx.state.session().is_active());
}

#[test]
fn test_writes_keep_layout() {
    let ctx = TestContext::new();
    ctx.seed_catalog();
    ctx.register("shopper", "shopper@example.com");

    let me = ctx.state.require_user().unwrap().identity();
    let jacket = ctx.state.catalog().find(ProductId::new(3)).unwrap();
    ctx.state.carts().add_item(&me, &jacket).unwrap();

    let raw = ctx.raw_file();
    assert_eq!(raw["username"], "shopper");

    let users = ctx.raw_key("users").unwrap();
    assert_eq!(users[0]["password"], PASSWORD);

    let carts = ctx.raw_key("carts").unwrap();
    assert_eq!(carts[0]["user"], json!({"name": "shopper", "email": "shopper@example.com"}));
    assert_eq!(carts[0]["Products"][0]["id"], 3);
    assert_eq!(carts[0]["Products"][0]["price"], 55.99);
    assert_eq!(carts[0]["Products"][0]["quantity"], 1);

    let session = ctx.raw_key("user").unwrap();
    assert_eq!(session["email"], "shopper@example.com");
}

#[test]
fn test_logout_removes_session_key() {
    let ctx = TestContext::new();
    ctx.register("shopper", "shopper@example.com");
    ctx.state.auth().logout().unwrap();

    let raw = ctx.raw_file();
    assert!(raw.get("user").is_none());
    assert_eq!(raw["username"], "shopper");
}

#[test]
fn test_unreadable_keys_are_treated_as_empty() {
    let contents = json!({
        "users": "not json",
        "carts": "{\"wrong\": \"shape\"}",
        "products": "[1, 2"
    })
    .to_string();
    let ctx = TestContext::with_file_contents(&contents);

    assert!(ctx.state.users().all().is_empty());
    assert!(ctx.state.catalog().all().is_empty());

    ctx.register("shopper", "shopper@example.com");
    assert_eq!(ctx.state.users().all().len(), 1);
}

#[test]
fn test_one_bad_record_does_not_cost_the_others() {
    let bob_cart = json!({
        "user": {"name": "bob", "email": "bob@example.com"},
        "Products": [{"id": 7, "price": 3.5, "quantity": 1}]
    });
    let carts = json!([
        {
            "user": {"name": "alice", "email": "alice@example.com"},
            "Products": [{"id": 1, "title": "Backpack", "price": 109.95, "quantity": 1}]
        },
        bob_cart
    ]);
    let ghost = json!({"name": "ghost", "email": 42});
    let users = json!([
        {"name": "alice", "email": "alice@example.com", "password": PASSWORD},
        ghost
    ]);
    let contents = json!({
        "users": users.to_string(),
        "carts": carts.to_string()
    })
    .to_string();
    let mut ctx = TestContext::with_file_contents(&contents);
    ctx.seed_catalog();

    assert_eq!(ctx.state.users().all().len(), 1);
    let alice = ctx.state.users().all()[0].identity();
    assert_eq!(ctx.state.carts().get_cart(&alice).len(), 1);

    ctx.register("carol", "carol@example.com");
    let carol = ctx.state.require_user().unwrap().identity();
    let jacket = ctx.state.catalog().find(ProductId::new(3)).unwrap();
    ctx.state.carts().add_item(&carol, &jacket).unwrap();

    let stored_carts = ctx.raw_key("carts").unwrap();
    assert_eq!(stored_carts.as_array().unwrap().len(), 3);
    assert_eq!(stored_carts[0]["user"]["email"], "alice@example.com");
    assert_eq!(stored_carts[1], bob_cart);
    assert_eq!(stored_carts[2]["user"]["email"], "carol@example.com");

    let stored_users = ctx.raw_key("users").unwrap();
    assert_eq!(stored_users.as_array().unwrap().len(), 3);
    assert_eq!(stored_users[1], ghost);

    ctx.reopen();
    assert_eq!(ctx.state.carts().get_cart(&alice).len(), 1);
    assert_eq!(ctx.state.users().all().len(), 2);
}
