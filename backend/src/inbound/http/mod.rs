//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bids;
pub mod error;
pub mod gigs;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
