//! Account directory service.
//!
//! Owns registration and credential checks. Session resolution itself lives
//! in the HTTP adapter; this service is the authority the adapter asks once
//! it has a user id in hand.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::ports::{AccountDirectory, UserStore};
use super::{validate_new_account, Error, PasswordDigest, User, UserAccount, UserId};

/// Account directory backed by a [`UserStore`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    /// Create a new service over the given store.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn normalise_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl<U> AccountDirectory for AccountService<U>
where
    U: UserStore,
{
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, Error> {
        validate_new_account(name, email, password).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": err.field(), "code": err.code() }))
        })?;

        let email = normalise_email(email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(Error::conflict("email already registered"));
        }

        let account = UserAccount {
            user: User {
                id: UserId::random(),
                name: name.trim().to_owned(),
                email,
            },
            password_digest: PasswordDigest::from_password(password),
        };
        self.users.insert(&account).await?;
        Ok(account.user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, Error> {
        let account = self
            .users
            .find_by_email(&normalise_email(email))
            .await?
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;
        if !account.password_digest.matches(password) {
            return Err(Error::unauthorized("invalid credentials"));
        }
        Ok(account.user)
    }

    async fn fetch_user(&self, id: &UserId) -> Result<User, Error> {
        Ok(self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("user not found"))?
            .user)
    }
}
