//! Bid aggregate: a freelancer's proposal against an open gig.
//!
//! For any gig, at most one bid ever reaches `hired`; the hiring coordinator
//! rejects the remaining `pending` bids as part of the same transition.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{GigId, UserId};

/// Minimum trimmed message length.
pub const MIN_MESSAGE_LEN: usize = 10;

/// Unique bid identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct BidId(Uuid);

impl BidId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for BidId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for BidId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    /// Awaiting the owner's decision.
    Pending,
    /// Selected as the winner; terminal.
    Hired,
    /// Passed over when another bid was hired; terminal.
    Rejected,
}

impl BidStatus {
    /// Whether the bid can still be hired.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// A submitted bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    /// Unique identifier.
    pub id: BidId,
    /// The gig this bid targets.
    pub gig_id: GigId,
    /// The bidding user.
    pub freelancer_id: UserId,
    /// Pitch message, at least [`MIN_MESSAGE_LEN`] trimmed characters.
    pub message: String,
    /// Asking price, strictly positive.
    pub price: Decimal,
    /// Lifecycle state.
    pub status: BidStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Unvalidated input for placing a bid.
#[derive(Debug, Clone, PartialEq)]
pub struct BidDraft {
    /// Target gig.
    pub gig_id: GigId,
    /// Proposed pitch message.
    pub message: String,
    /// Proposed price.
    pub price: Decimal,
}

/// Validation failures for bid drafts, first violated rule only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BidValidationError {
    /// Message shorter than [`MIN_MESSAGE_LEN`] trimmed characters.
    #[error("message must be at least {MIN_MESSAGE_LEN} characters")]
    MessageTooShort,
    /// Price is zero or negative.
    #[error("price must be greater than zero")]
    PriceNotPositive,
}

impl BidValidationError {
    /// The offending input field, for structured error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MessageTooShort => "message",
            Self::PriceNotPositive => "price",
        }
    }

    /// Stable detail code for the violated rule.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MessageTooShort => "message_too_short",
            Self::PriceNotPositive => "price_not_positive",
        }
    }
}

impl Bid {
    /// Validate a draft and place it as a new `pending` bid by `freelancer`.
    ///
    /// Gig-state preconditions (gig exists, gig open, caller is not the
    /// owner) are enforced by the marketplace service, which can see the gig
    /// store.
    pub fn place(freelancer: UserId, draft: BidDraft) -> Result<Self, BidValidationError> {
        if draft.message.trim().chars().count() < MIN_MESSAGE_LEN {
            return Err(BidValidationError::MessageTooShort);
        }
        if draft.price <= Decimal::ZERO {
            return Err(BidValidationError::PriceNotPositive);
        }
        Ok(Self {
            id: BidId::random(),
            gig_id: draft.gig_id,
            freelancer_id: freelancer,
            message: draft.message,
            price: draft.price,
            status: BidStatus::Pending,
            created_at: Utc::now(),
        })
    }
}
