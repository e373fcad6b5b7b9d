//! Hiring coordinator: the gig/bid state machine.
//!
//! `hire` performs the only multi-record transition in the system: the
//! target bid becomes `hired`, every other `pending` bid on the gig becomes
//! `rejected`, and the gig becomes `assigned`. The whole transition runs
//! under a per-gig exclusive lock so concurrent hire attempts serialise:
//! exactly one wins and every later attempt observes `conflict`. Hires on
//! distinct gigs never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;
use tokio::time;
use tracing::{error, info};

use super::ports::{BidStore, GigStore, HireCommand, HiredNotifier};
use super::{Bid, BidId, BidStatus, Error, Gig, GigId, GigStatus, HiredNotice, UserId};

/// Bounded wait for the per-gig lock; a hire that cannot acquire it promptly
/// fails fast instead of queueing.
#[cfg(not(test))]
const LOCK_WAIT: Duration = Duration::from_secs(2);
#[cfg(test)]
const LOCK_WAIT: Duration = Duration::from_millis(200);

/// Hiring coordinator backed by the gig and bid stores.
pub struct HiringService<G, B> {
    gigs: Arc<G>,
    bids: Arc<B>,
    notifier: Arc<dyn HiredNotifier>,
    locks: Mutex<HashMap<GigId, Arc<AsyncMutex<()>>>>,
}

impl<G, B> HiringService<G, B> {
    /// Create a new coordinator over the given stores and notifier.
    pub fn new(gigs: Arc<G>, bids: Arc<B>, notifier: Arc<dyn HiredNotifier>) -> Self {
        Self {
            gigs,
            bids,
            notifier,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch or create the exclusive lock for one gig.
    fn gig_lock(&self, gig_id: GigId) -> Result<Arc<AsyncMutex<()>>, Error> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| Error::internal("hire lock table poisoned"))?;
        Ok(Arc::clone(locks.entry(gig_id).or_default()))
    }

    /// Evict a gig's lock entry once no other hire holds it.
    ///
    /// Clones are only handed out under the table mutex, so a strong count
    /// of two (the table's and ours) proves nobody else is waiting.
    fn release_gig_lock(&self, gig_id: &GigId, lock: &Arc<AsyncMutex<()>>) {
        if let Ok(mut locks) = self.locks.lock() {
            if Arc::strong_count(lock) == 2 {
                locks.remove(gig_id);
            }
        }
    }

    #[cfg(test)]
    fn lock_table_len(&self) -> usize {
        self.locks.lock().map_or(0, |locks| locks.len())
    }
}

impl<G, B> HiringService<G, B>
where
    G: GigStore,
    B: BidStore,
{
    /// Run the hire transition with the gig's lock held.
    async fn assign_winner(
        &self,
        lock: &AsyncMutex<()>,
        gig_id: &GigId,
        bid_id: &BidId,
    ) -> Result<(Gig, Bid), Error> {
        let Ok(_guard) = time::timeout(LOCK_WAIT, lock.lock()).await else {
            return Err(Error::service_unavailable("gig is busy; retry the hire"));
        };

        // Re-read under the lock; a racing hire may have advanced the state
        // since the caller's checks.
        let gig = self
            .gigs
            .find_by_id(gig_id)
            .await?
            .ok_or_else(|| Error::internal("gig disappeared during hire"))?;
        let bid = self
            .bids
            .find_by_id(bid_id)
            .await?
            .ok_or_else(|| Error::internal("bid disappeared during hire"))?;
        if !gig.status.is_open() {
            return Err(Error::conflict("gig is no longer open"));
        }
        if !bid.status.is_pending() {
            return Err(Error::conflict("bid is no longer pending"));
        }
        let siblings = self.bids.list_by_gig(&gig.id).await?;
        // A hired sibling on a still-open gig means an earlier transition was
        // cut short by a store failure. That winner stands; never crown a
        // second one.
        if siblings.iter().any(|other| other.status == BidStatus::Hired) {
            return Err(Error::conflict("gig already has a hired bid"));
        }

        // Rejections land before the winner: a transition cut short mid-write
        // leaves only pending and rejected bids behind, so a retried hire
        // still passes the checks above.
        for other in &siblings {
            if other.id != bid.id && other.status.is_pending() {
                self.bids.set_status(&other.id, BidStatus::Rejected).await?;
            }
        }
        self.bids.set_status(&bid.id, BidStatus::Hired).await?;
        // The gig flips last so no reader ever observes an assigned gig with
        // a still-pending winner.
        self.gigs.set_status(&gig.id, GigStatus::Assigned).await?;

        Ok((gig, bid))
    }
}

#[async_trait]
impl<G, B> HireCommand for HiringService<G, B>
where
    G: GigStore,
    B: BidStore,
{
    async fn hire(&self, caller: &UserId, bid_id: &BidId) -> Result<Bid, Error> {
        let bid = self
            .bids
            .find_by_id(bid_id)
            .await?
            .ok_or_else(|| Error::not_found("bid not found"))?;
        let gig = self
            .gigs
            .find_by_id(&bid.gig_id)
            .await?
            .ok_or_else(|| {
                // A bid pointing at a missing gig means the store is corrupt.
                // Abort loudly; never patch state here.
                error!(gig_id = %bid.gig_id, bid_id = %bid.id, "bid references a missing gig");
                Error::internal("bid references a missing gig")
            })?;

        if gig.owner_id != *caller {
            return Err(Error::forbidden("only the gig owner may hire"));
        }

        let lock = self.gig_lock(gig.id)?;
        let outcome = self.assign_winner(&lock, &gig.id, bid_id).await;
        self.release_gig_lock(&gig.id, &lock);
        let (gig, bid) = outcome?;

        info!(gig_id = %gig.id, bid_id = %bid.id, freelancer_id = %bid.freelancer_id, "bid hired");
        self.notifier
            .notify_hired(&bid.freelancer_id, HiredNotice::new(gig.title.clone()))
            .await;

        Ok(Bid {
            status: BidStatus::Hired,
            ..bid
        })
    }
}

#[cfg(test)]
#[path = "hiring_tests.rs"]
mod tests;
