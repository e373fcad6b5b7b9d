//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to interact with the record
//! stores and the notification channel; driving ports are the use-cases the
//! inbound adapters call. Each driven trait exposes strongly typed errors so
//! adapters map their failures into predictable variants.

use async_trait::async_trait;
use thiserror::Error;

use super::{
    Bid, BidDraft, BidId, BidStatus, Error, Gig, GigDraft, GigId, GigStatus, HiredNotice, User,
    UserAccount, UserId,
};

/// Failures surfaced by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend connectivity failure; retryable by the caller.
    #[error("store connection failed: {message}")]
    Connection {
        /// Adapter-provided description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("store query failed: {message}")]
    Query {
        /// Adapter-provided description.
        message: String,
    },
}

impl StoreError {
    /// Helper for connection-oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Connection { message } => {
                Self::service_unavailable(format!("record store unavailable: {message}"))
            }
            StoreError::Query { message } => Self::internal(format!("record store error: {message}")),
        }
    }
}

/// Durable collection of gigs.
///
/// `set_status` exists for the hiring coordinator alone; no other component
/// may write a gig's status.
#[async_trait]
pub trait GigStore: Send + Sync {
    /// Persist a newly posted gig.
    async fn insert(&self, gig: &Gig) -> Result<(), StoreError>;

    /// Fetch a gig by identifier.
    async fn find_by_id(&self, id: &GigId) -> Result<Option<Gig>, StoreError>;

    /// List gigs, optionally filtered by a case-insensitive title substring,
    /// newest first.
    async fn list(&self, title_filter: Option<&str>) -> Result<Vec<Gig>, StoreError>;

    /// Overwrite a gig's status. Coordinator-only.
    async fn set_status(&self, id: &GigId, status: GigStatus) -> Result<(), StoreError>;
}

/// Durable collection of bids.
#[async_trait]
pub trait BidStore: Send + Sync {
    /// Persist a newly placed bid.
    async fn insert(&self, bid: &Bid) -> Result<(), StoreError>;

    /// Fetch a bid by identifier.
    async fn find_by_id(&self, id: &BidId) -> Result<Option<Bid>, StoreError>;

    /// List every bid on a gig, newest first.
    async fn list_by_gig(&self, gig_id: &GigId) -> Result<Vec<Bid>, StoreError>;

    /// Overwrite a bid's status. Coordinator-only.
    async fn set_status(&self, id: &BidId, status: BidStatus) -> Result<(), StoreError>;
}

/// Durable collection of user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a newly registered account.
    async fn insert(&self, account: &UserAccount) -> Result<(), StoreError>;

    /// Fetch an account by user identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, StoreError>;

    /// Fetch an account by e-mail address.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, StoreError>;
}

/// Best-effort push channel towards a user's live endpoints.
///
/// Delivery carries no result: with no endpoint registered the notice is
/// dropped, and a failed send only prunes the stale endpoint. This is a
/// presence notification, not a durable mailbox.
#[async_trait]
pub trait HiredNotifier: Send + Sync {
    /// Fan a hired notice out to every live endpoint of `freelancer`.
    async fn notify_hired(&self, freelancer: &UserId, notice: HiredNotice);
}

/// Read side of the gig board.
#[async_trait]
pub trait GigBoardQuery: Send + Sync {
    /// List gigs, optionally filtered by title substring.
    async fn list_gigs(&self, title_filter: Option<&str>) -> Result<Vec<Gig>, Error>;

    /// Fetch one gig or fail with `not_found`.
    async fn fetch_gig(&self, id: &GigId) -> Result<Gig, Error>;
}

/// Write side of the gig board.
#[async_trait]
pub trait GigBoardCommand: Send + Sync {
    /// Validate and post a new gig owned by `owner`.
    async fn post_gig(&self, owner: &UserId, draft: GigDraft) -> Result<Gig, Error>;
}

/// Read side of the bid board.
#[async_trait]
pub trait BidBoardQuery: Send + Sync {
    /// List the bids on a gig; restricted to the gig's owner.
    async fn bids_for_gig(&self, caller: &UserId, gig_id: &GigId) -> Result<Vec<Bid>, Error>;
}

/// Write side of the bid board.
#[async_trait]
pub trait BidBoardCommand: Send + Sync {
    /// Validate and place a bid by `caller` against an open gig.
    async fn place_bid(&self, caller: &UserId, draft: BidDraft) -> Result<Bid, Error>;
}

/// The hire use-case: atomically select one bid as winner.
#[async_trait]
pub trait HireCommand: Send + Sync {
    /// Hire `bid_id` on behalf of `caller`; see the hiring service for the
    /// full contract.
    async fn hire(&self, caller: &UserId, bid_id: &BidId) -> Result<Bid, Error>;
}

/// Account registration and credential checks.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Register a new account and return its public profile.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, Error>;

    /// Verify credentials and return the matching profile.
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, Error>;

    /// Fetch a user's public profile.
    async fn fetch_user(&self, id: &UserId) -> Result<User, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::connection("pool exhausted"), ErrorCode::ServiceUnavailable)]
    #[case(StoreError::query("row decode failed"), ErrorCode::InternalError)]
    fn store_errors_map_to_domain_codes(#[case] err: StoreError, #[case] expected: ErrorCode) {
        let mapped: Error = err.into();
        assert_eq!(mapped.code(), expected);
    }
}
