//! Fully wired in-memory application for tests.
//!
//! Unit tests inside the crate and integration tests under `tests/` share
//! this harness so HTTP handlers always run against the same service wiring
//! as production, with the record stores swapped for in-memory ones.

use std::sync::Arc;

use crate::domain::ports::HiredNotifier;
use crate::domain::{AccountService, HiringService, MarketplaceService};
use crate::inbound::http::state::HttpState;
use crate::inbound::ws::registry::LiveEndpointRegistry;
use crate::outbound::persistence::memory::{InMemoryBidStore, InMemoryGigStore, InMemoryUserStore};

/// In-memory application wiring handed to tests.
pub struct Harness {
    /// Handler state, identical in shape to production wiring.
    pub state: HttpState,
    /// The live endpoint registry the hiring service notifies.
    pub registry: Arc<LiveEndpointRegistry>,
}

/// Wire the full service stack over in-memory stores.
pub fn wired_harness() -> Harness {
    let gigs = Arc::new(InMemoryGigStore::default());
    let bids = Arc::new(InMemoryBidStore::default());
    let users = Arc::new(InMemoryUserStore::default());
    let registry = Arc::new(LiveEndpointRegistry::default());

    let accounts = Arc::new(AccountService::new(users));
    let marketplace = Arc::new(MarketplaceService::new(
        Arc::clone(&gigs),
        Arc::clone(&bids),
    ));
    let hiring = Arc::new(HiringService::new(
        gigs,
        bids,
        Arc::clone(&registry) as Arc<dyn HiredNotifier>,
    ));

    let state = HttpState {
        accounts,
        gig_query: Arc::clone(&marketplace) as _,
        gig_command: Arc::clone(&marketplace) as _,
        bid_query: Arc::clone(&marketplace) as _,
        bid_command: marketplace,
        hiring,
    };

    Harness { state, registry }
}
