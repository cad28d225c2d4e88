//! Account details view.

use shopsphere_storefront::state::AppState;
use shopsphere_storefront::storage::Storage;

use super::CommandResult;

/// Show the logged-in user's name and email.
pub fn show<S: Storage>(state: &AppState<S>) -> CommandResult {
    let user = state.require_user()?;

    Ok(format!(
        "Account Details\n\nUser Information\nName: {}\nEmail: {}",
        user.name, user.email
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use crate::commands::test_support;

    #[test]
    fn test_account_details() {
        let state = test_support::logged_in_state();
        let view = show(&state).unwrap();
        assert!(view.contains("Name: shopper"));
        assert!(view.contains("Email: shopper@example.com"));
    }

    #[test]
    fn test_requires_login() {
        let state = test_support::state();
        let err = show(&state).unwrap_err();
        assert_eq!(err.user_message(), "Please log in first.");
    }
}
