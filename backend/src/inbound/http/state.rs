//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountDirectory, BidBoardCommand, BidBoardQuery, GigBoardCommand, GigBoardQuery, HireCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountDirectory>,
    pub gig_query: Arc<dyn GigBoardQuery>,
    pub gig_command: Arc<dyn GigBoardCommand>,
    pub bid_query: Arc<dyn BidBoardQuery>,
    pub bid_command: Arc<dyn BidBoardCommand>,
    pub hiring: Arc<dyn HireCommand>,
}
