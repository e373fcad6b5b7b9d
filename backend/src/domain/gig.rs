//! Gig aggregate: a posted job with a budget, owned by one user.
//!
//! `status` forms a monotonic state machine `open → assigned → completed`.
//! Only the hiring coordinator advances it; no other component writes the
//! field.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Minimum trimmed title length.
pub const MIN_TITLE_LEN: usize = 5;
/// Minimum trimmed description length.
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Unique gig identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct GigId(Uuid);

impl GigId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for GigId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for GigId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a gig. Transitions are monotonic: `open → assigned →
/// completed`, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum GigStatus {
    /// Accepting bids.
    Open,
    /// One bid hired; closed to further bids.
    Assigned,
    /// Work delivered; terminal.
    Completed,
}

impl GigStatus {
    /// Whether the gig still accepts bids.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// A posted gig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Gig {
    /// Unique identifier.
    pub id: GigId,
    /// Short headline, at least [`MIN_TITLE_LEN`] trimmed characters.
    pub title: String,
    /// Work description, at least [`MIN_DESCRIPTION_LEN`] trimmed characters.
    pub description: String,
    /// Offered budget, strictly positive.
    pub budget: Decimal,
    /// The posting user.
    pub owner_id: UserId,
    /// Lifecycle state.
    pub status: GigStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Unvalidated input for posting a gig.
#[derive(Debug, Clone, PartialEq)]
pub struct GigDraft {
    /// Proposed title.
    pub title: String,
    /// Proposed description.
    pub description: String,
    /// Proposed budget.
    pub budget: Decimal,
}

/// Validation failures for gig drafts, first violated rule only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GigValidationError {
    /// Title shorter than [`MIN_TITLE_LEN`] trimmed characters.
    #[error("title must be at least {MIN_TITLE_LEN} characters")]
    TitleTooShort,
    /// Description shorter than [`MIN_DESCRIPTION_LEN`] trimmed characters.
    #[error("description must be at least {MIN_DESCRIPTION_LEN} characters")]
    DescriptionTooShort,
    /// Budget is zero or negative.
    #[error("budget must be greater than zero")]
    BudgetNotPositive,
}

impl GigValidationError {
    /// The offending input field, for structured error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleTooShort => "title",
            Self::DescriptionTooShort => "description",
            Self::BudgetNotPositive => "budget",
        }
    }

    /// Stable detail code for the violated rule.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TitleTooShort => "title_too_short",
            Self::DescriptionTooShort => "description_too_short",
            Self::BudgetNotPositive => "budget_not_positive",
        }
    }
}

impl Gig {
    /// Validate a draft and post it as a new `open` gig owned by `owner`.
    pub fn post(owner: UserId, draft: GigDraft) -> Result<Self, GigValidationError> {
        if draft.title.trim().chars().count() < MIN_TITLE_LEN {
            return Err(GigValidationError::TitleTooShort);
        }
        if draft.description.trim().chars().count() < MIN_DESCRIPTION_LEN {
            return Err(GigValidationError::DescriptionTooShort);
        }
        if draft.budget <= Decimal::ZERO {
            return Err(GigValidationError::BudgetNotPositive);
        }
        Ok(Self {
            id: GigId::random(),
            title: draft.title,
            description: draft.description,
            budget: draft.budget,
            owner_id: owner,
            status: GigStatus::Open,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn draft(title: &str, description: &str, budget: Decimal) -> GigDraft {
        GigDraft {
            title: title.to_owned(),
            description: description.to_owned(),
            budget,
        }
    }

    #[rstest]
    // Boundary: exactly 5 title characters succeed, 4 fail.
    #[case(draft("abcd", &"d".repeat(20), dec!(10)), Some(GigValidationError::TitleTooShort))]
    #[case(draft("abcde", &"d".repeat(20), dec!(10)), None)]
    // Boundary: exactly 20 description characters succeed, 19 fail.
    #[case(draft("Logo design", &"d".repeat(19), dec!(10)), Some(GigValidationError::DescriptionTooShort))]
    #[case(draft("Logo design", &"d".repeat(20), dec!(10)), None)]
    // Boundary: zero budget fails, a cent succeeds.
    #[case(draft("Logo design", &"d".repeat(20), dec!(0)), Some(GigValidationError::BudgetNotPositive))]
    #[case(draft("Logo design", &"d".repeat(20), dec!(-1)), Some(GigValidationError::BudgetNotPositive))]
    #[case(draft("Logo design", &"d".repeat(20), dec!(0.01)), None)]
    fn validates_drafts(#[case] draft: GigDraft, #[case] expected: Option<GigValidationError>) {
        let result = Gig::post(UserId::random(), draft);
        match expected {
            Some(err) => assert_eq!(result.expect_err("draft rejected"), err),
            None => {
                let gig = result.expect("draft accepted");
                assert_eq!(gig.status, GigStatus::Open);
            }
        }
    }

    #[rstest]
    fn trims_whitespace_before_counting() {
        let padded = draft("  abcd  ", &"d".repeat(20), dec!(10));
        assert_eq!(
            Gig::post(UserId::random(), padded).expect_err("padded title rejected"),
            GigValidationError::TitleTooShort
        );
    }

    #[rstest]
    fn status_serialises_lowercase() {
        let json = serde_json::to_value(GigStatus::Assigned).expect("serialises");
        assert_eq!(json, serde_json::json!("assigned"));
    }
}
