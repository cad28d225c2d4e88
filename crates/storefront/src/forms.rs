//! Registration and login form validation.
//!
//! Validation reports every failing field at once, with the first failing
//! rule's message for each field.

use core::fmt;

use thiserror::Error;

use shopsphere_core::Email;

use crate::models::User;

/// Minimum name length, in characters.
const MIN_NAME_LENGTH: usize = 5;

/// Minimum password length, in characters.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that count as "special" in a password.
const PASSWORD_SPECIAL_CHARS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// A form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm password",
        })
    }
}

/// One failing field and the message to show beside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// All validation failures of a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.summary())]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    /// The failing fields, in form order.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    /// All messages joined for a single-line notification.
    #[must_use]
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn check(&mut self, field: Field, message: Option<&'static str>) {
        if let Some(message) = message {
            self.0.push(FieldError { field, message });
        }
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

/// Registration form input.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Validate the form and build the user to register.
    ///
    /// # Errors
    ///
    /// Returns `FormErrors` listing every failing field.
    pub fn validate(&self) -> Result<User, FormErrors> {
        let mut errors = FormErrors(Vec::new());

        errors.check(Field::Name, name_error(&self.name));

        let email = if self.email.is_empty() {
            errors.check(Field::Email, Some("Required"));
            None
        } else {
            match Email::parse(&self.email) {
                Ok(email) => Some(email),
                Err(_) => {
                    errors.check(Field::Email, Some("Invalid email address"));
                    None
                }
            }
        };

        errors.check(Field::Password, password_error(&self.password));

        let confirm = if self.confirm_password.is_empty() {
            Some("Confirm password is required")
        } else if self.confirm_password != self.password {
            Some("Passwords must match")
        } else {
            None
        };
        errors.check(Field::ConfirmPassword, confirm);

        match email {
            Some(email) => {
                errors.into_result(|| User::new(self.name.clone(), email, self.password.as_str()))
            }
            None => Err(errors),
        }
    }
}

/// Login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Check that both fields are filled in. The email format is not
    /// checked; a malformed email simply matches no user.
    ///
    /// # Errors
    ///
    /// Returns `FormErrors` listing every empty field.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors(Vec::new());
        errors.check(Field::Email, self.email.is_empty().then_some("Required"));
        errors.check(Field::Password, self.password.is_empty().then_some("Required"));
        errors.into_result(|| ())
    }
}

fn name_error(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("Required")
    } else if name.chars().count() < MIN_NAME_LENGTH {
        Some("Name must be at least 5 characters")
    } else {
        None
    }
}

fn password_error(password: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("Required")
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        Some("Password must be at least 8 characters")
    } else if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        Some("Password must contain at least one letter")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain at least one number")
    } else if !password.contains(PASSWORD_SPECIAL_CHARS) {
        Some("Password must contain at least one special character")
    } else {
        None
    }
}
