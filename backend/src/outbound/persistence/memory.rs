//! In-memory record stores.
//!
//! Each store is a `RwLock<HashMap>` keyed by id. No await happens while a
//! lock is held, and every poisoned-lock failure maps to a `StoreError`
//! rather than panicking, matching the propagation policy of the domain.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{BidStore, GigStore, StoreError, UserStore};
use crate::domain::{Bid, BidId, BidStatus, Gig, GigId, GigStatus, UserAccount, UserId};

fn poisoned(store: &str) -> StoreError {
    StoreError::query(format!("{store} store lock poisoned"))
}

/// Process-memory gig store.
#[derive(Default)]
pub struct InMemoryGigStore {
    rows: RwLock<HashMap<GigId, Gig>>,
}

#[async_trait]
impl GigStore for InMemoryGigStore {
    async fn insert(&self, gig: &Gig) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned("gig"))?;
        rows.insert(gig.id, gig.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &GigId) -> Result<Option<Gig>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned("gig"))?;
        Ok(rows.get(id).cloned())
    }

    async fn list(&self, title_filter: Option<&str>) -> Result<Vec<Gig>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned("gig"))?;
        let needle = title_filter.map(str::to_lowercase);
        let mut gigs: Vec<Gig> = rows
            .values()
            .filter(|gig| match &needle {
                Some(needle) => gig.title.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();
        gigs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(gigs)
    }

    async fn set_status(&self, id: &GigId, status: GigStatus) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned("gig"))?;
        let gig = rows
            .get_mut(id)
            .ok_or_else(|| StoreError::query(format!("no gig {id}")))?;
        gig.status = status;
        Ok(())
    }
}

/// Process-memory bid store.
#[derive(Default)]
pub struct InMemoryBidStore {
    rows: RwLock<HashMap<BidId, Bid>>,
}

#[async_trait]
impl BidStore for InMemoryBidStore {
    async fn insert(&self, bid: &Bid) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned("bid"))?;
        rows.insert(bid.id, bid.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BidId) -> Result<Option<Bid>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned("bid"))?;
        Ok(rows.get(id).cloned())
    }

    async fn list_by_gig(&self, gig_id: &GigId) -> Result<Vec<Bid>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned("bid"))?;
        let mut bids: Vec<Bid> = rows
            .values()
            .filter(|bid| bid.gig_id == *gig_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bids)
    }

    async fn set_status(&self, id: &BidId, status: BidStatus) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned("bid"))?;
        let bid = rows
            .get_mut(id)
            .ok_or_else(|| StoreError::query(format!("no bid {id}")))?;
        bid.status = status;
        Ok(())
    }
}

/// Process-memory user store.
#[derive(Default)]
pub struct InMemoryUserStore {
    rows: RwLock<HashMap<UserId, UserAccount>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, account: &UserAccount) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned("user"))?;
        rows.insert(account.user.id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned("user"))?;
        Ok(rows.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned("user"))?;
        Ok(rows
            .values()
            .find(|account| account.user.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GigDraft, UserId};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn sample_gig(title: &str) -> Gig {
        Gig::post(
            UserId::random(),
            GigDraft {
                title: title.to_owned(),
                description: "Need a clean vector logo for a coffee brand".to_owned(),
                budget: dec!(100),
            },
        )
        .expect("valid draft")
    }

    #[rstest]
    #[case(Some("LOGO"), 1)]
    #[case(Some("design"), 2)]
    #[case(Some("nothing"), 0)]
    #[case(None, 2)]
    #[actix_web::test]
    async fn list_filters_by_case_insensitive_substring(
        #[case] filter: Option<&str>,
        #[case] expected: usize,
    ) {
        let store = InMemoryGigStore::default();
        store.insert(&sample_gig("Logo Design")).await.expect("insert");
        store
            .insert(&sample_gig("Poster design"))
            .await
            .expect("insert");

        let listed = store.list(filter).await.expect("list");
        assert_eq!(listed.len(), expected);
    }

    #[actix_web::test]
    async fn set_status_on_unknown_gig_fails() {
        let store = InMemoryGigStore::default();
        let err = store
            .set_status(&GigId::random(), GigStatus::Assigned)
            .await
            .expect_err("unknown id rejected");
        assert!(matches!(err, StoreError::Query { .. }));
    }

    #[actix_web::test]
    async fn gig_round_trips_through_the_store() {
        let store = InMemoryGigStore::default();
        let gig = sample_gig("Logo Design");
        store.insert(&gig).await.expect("insert");

        let fetched = store.find_by_id(&gig.id).await.expect("query");
        assert_eq!(fetched, Some(gig.clone()));

        store
            .set_status(&gig.id, GigStatus::Assigned)
            .await
            .expect("status update");
        let updated = store.find_by_id(&gig.id).await.expect("query");
        assert_eq!(updated.map(|g| g.status), Some(GigStatus::Assigned));
    }
}
