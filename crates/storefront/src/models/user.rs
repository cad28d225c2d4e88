//! User domain types.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use shopsphere_core::Email;

/// A registered storefront user.
///
/// The password is stored and compared in plaintext, exactly as entered at
/// registration. It is wrapped in `SecretString` only to keep it out of
/// `Debug` output and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Display name, unique across users.
    pub name: String,
    /// Email address, unique across users.
    pub email: Email,
    /// Plaintext password.
    #[serde(serialize_with = "expose_password", deserialize_with = "wrap_password")]
    pub password: SecretString,
}

impl User {
    /// Create a user.
    #[must_use]
    pub fn new(name: impl Into<String>, email: Email, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email,
            password: SecretString::from(password.into()),
        }
    }

    /// The identity fields recorded on the user's cart.
    #[must_use]
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    /// Exact comparison against a candidate password.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }
}

/// Name and email of a user, without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Display name.
    pub name: String,
    /// Email address; carts are matched on this.
    pub email: Email,
}

impl From<&User> for UserIdentity {
    fn from(user: &User) -> Self {
        user.identity()
    }
}

fn expose_password<S: Serializer>(password: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(password.expose_secret())
}

fn wrap_password<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}
