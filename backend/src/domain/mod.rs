//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed marketplace entities, the gig/bid
//! lifecycle state machine, and the hexagon's ports. Types are immutable on
//! the wire; status transitions are confined to the hiring coordinator.

pub mod accounts;
pub mod bid;
pub mod error;
pub mod events;
pub mod gig;
pub mod hiring;
pub mod marketplace;
pub mod ports;
pub mod user;

pub use self::accounts::AccountService;
pub use self::bid::{Bid, BidDraft, BidId, BidStatus, BidValidationError, MIN_MESSAGE_LEN};
pub use self::error::{Error, ErrorCode};
pub use self::events::HiredNotice;
pub use self::gig::{
    Gig, GigDraft, GigId, GigStatus, GigValidationError, MIN_DESCRIPTION_LEN, MIN_TITLE_LEN,
};
pub use self::hiring::HiringService;
pub use self::marketplace::MarketplaceService;
pub use self::user::{
    validate_new_account, AccountValidationError, PasswordDigest, User, UserAccount, UserId,
    MIN_PASSWORD_LEN,
};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
