//! Registration, login and logout commands.

use shopsphere_storefront::error::Notification;
use shopsphere_storefront::forms::{LoginForm, RegisterForm};
use shopsphere_storefront::state::AppState;
use shopsphere_storefront::storage::Storage;

use super::CommandResult;

/// Register a new account and log in.
pub fn register<S: Storage>(state: &AppState<S>, form: &RegisterForm) -> CommandResult {
    state.auth().register(form)?;
    Ok(Notification::success("Registration Successful!").to_string())
}

/// Log in with email and password.
pub fn login<S: Storage>(state: &AppState<S>, form: &LoginForm) -> CommandResult {
    state.auth().login(form)?;
    Ok(Notification::success("Login Successful!").to_string())
}

/// Log out of the current session.
pub fn logout<S: Storage>(state: &AppState<S>) -> CommandResult {
    state.auth().logout()?;
    Ok(Notification::success("You have successfully logged out!").to_string())
}
