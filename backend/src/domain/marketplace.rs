//! Gig and bid board services.
//!
//! Implements the driving ports for posting and browsing gigs and for
//! placing and listing bids. Status writes are deliberately absent here;
//! they belong to the hiring coordinator alone.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::ports::{
    BidBoardCommand, BidBoardQuery, BidStore, GigBoardCommand, GigBoardQuery, GigStore,
};
use super::{Bid, BidDraft, Error, Gig, GigDraft, GigId, UserId};

/// Marketplace service backed by the gig and bid stores.
#[derive(Clone)]
pub struct MarketplaceService<G, B> {
    gigs: Arc<G>,
    bids: Arc<B>,
}

impl<G, B> MarketplaceService<G, B> {
    /// Create a new service over the given stores.
    pub fn new(gigs: Arc<G>, bids: Arc<B>) -> Self {
        Self { gigs, bids }
    }
}

#[async_trait]
impl<G, B> GigBoardQuery for MarketplaceService<G, B>
where
    G: GigStore,
    B: BidStore,
{
    async fn list_gigs(&self, title_filter: Option<&str>) -> Result<Vec<Gig>, Error> {
        Ok(self.gigs.list(title_filter).await?)
    }

    async fn fetch_gig(&self, id: &GigId) -> Result<Gig, Error> {
        self.gigs
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found("gig not found"))
    }
}

#[async_trait]
impl<G, B> GigBoardCommand for MarketplaceService<G, B>
where
    G: GigStore,
    B: BidStore,
{
    async fn post_gig(&self, owner: &UserId, draft: GigDraft) -> Result<Gig, Error> {
        let gig = Gig::post(*owner, draft).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": err.field(), "code": err.code() }))
        })?;
        self.gigs.insert(&gig).await?;
        Ok(gig)
    }
}

#[async_trait]
impl<G, B> BidBoardQuery for MarketplaceService<G, B>
where
    G: GigStore,
    B: BidStore,
{
    async fn bids_for_gig(&self, caller: &UserId, gig_id: &GigId) -> Result<Vec<Bid>, Error> {
        let gig = self
            .gigs
            .find_by_id(gig_id)
            .await?
            .ok_or_else(|| Error::not_found("gig not found"))?;
        if gig.owner_id != *caller {
            return Err(Error::forbidden("only the gig owner may view its bids"));
        }
        Ok(self.bids.list_by_gig(gig_id).await?)
    }
}

#[async_trait]
impl<G, B> BidBoardCommand for MarketplaceService<G, B>
where
    G: GigStore,
    B: BidStore,
{
    async fn place_bid(&self, caller: &UserId, draft: BidDraft) -> Result<Bid, Error> {
        let bid = Bid::place(*caller, draft).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": err.field(), "code": err.code() }))
        })?;

        let gig = self
            .gigs
            .find_by_id(&bid.gig_id)
            .await?
            .ok_or_else(|| Error::not_found("gig not found"))?;
        if !gig.status.is_open() {
            return Err(Error::conflict("gig is not open for bids"));
        }
        if gig.owner_id == *caller {
            return Err(Error::conflict("cannot bid on your own gig"));
        }

        self.bids.insert(&bid).await?;
        Ok(bid)
    }
}

#[cfg(test)]
#[path = "marketplace_tests.rs"]
mod tests;
