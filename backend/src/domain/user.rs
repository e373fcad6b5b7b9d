//! User identity and credential types.
//!
//! The marketplace references users by [`UserId`] everywhere; the full
//! profile is owned by the account directory and never embedded in gigs or
//! bids. Credential hashing strength is deliberately isolated behind
//! [`PasswordDigest`] so the mechanism can change without touching callers.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Unique user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user as exposed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Display name provided at registration.
    pub name: String,
    /// Contact e-mail; unique across the directory.
    pub email: String,
}

/// One-way digest of a user's password.
///
/// Never serialised; compared in constant shape via re-digesting the
/// candidate password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Digest a plaintext password.
    pub fn from_password(password: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Check a candidate password against the stored digest.
    pub fn matches(&self, password: &str) -> bool {
        Self::from_password(password) == *self
    }
}

/// Stored account record: public profile plus credential digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Public profile.
    pub user: User,
    /// Credential digest; never leaves the store boundary.
    pub password_digest: PasswordDigest,
}

/// Validation failures for registration input, first violated rule only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccountValidationError {
    /// Name is empty after trimming whitespace.
    #[error("name must not be empty")]
    EmptyName,
    /// E-mail does not look like an address.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Password is shorter than [`MIN_PASSWORD_LEN`] characters.
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

impl AccountValidationError {
    /// The offending input field, for structured error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::InvalidEmail => "email",
            Self::PasswordTooShort => "password",
        }
    }

    /// Stable detail code for the violated rule.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort => "password_too_short",
        }
    }
}

/// Validate registration input, reporting the first violated rule.
pub fn validate_new_account(
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), AccountValidationError> {
    if name.trim().is_empty() {
        return Err(AccountValidationError::EmptyName);
    }
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => return Err(AccountValidationError::InvalidEmail),
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountValidationError::PasswordTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "a@b.example", "longenough", AccountValidationError::EmptyName)]
    #[case("   ", "a@b.example", "longenough", AccountValidationError::EmptyName)]
    #[case("Ada", "not-an-email", "longenough", AccountValidationError::InvalidEmail)]
    #[case("Ada", "@b.example", "longenough", AccountValidationError::InvalidEmail)]
    #[case("Ada", "a@", "longenough", AccountValidationError::InvalidEmail)]
    #[case("Ada", "a@b.example", "short", AccountValidationError::PasswordTooShort)]
    fn rejects_invalid_registrations(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: AccountValidationError,
    ) {
        assert_eq!(validate_new_account(name, email, password), Err(expected));
    }

    #[rstest]
    fn accepts_valid_registration() {
        assert_eq!(
            validate_new_account("Ada Lovelace", "ada@example.com", "correct horse"),
            Ok(())
        );
    }

    #[rstest]
    fn digest_matches_only_original_password() {
        let digest = PasswordDigest::from_password("hunter2hunter2");
        assert!(digest.matches("hunter2hunter2"));
        assert!(!digest.matches("hunter2hunter3"));
    }
}
