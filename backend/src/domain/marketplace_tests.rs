use std::sync::Arc;

use rstest::{fixture, rstest};
use rust_decimal_macros::dec;

use super::*;
use crate::domain::{ErrorCode, GigStatus};
use crate::outbound::persistence::memory::{InMemoryBidStore, InMemoryGigStore};

type Service = MarketplaceService<InMemoryGigStore, InMemoryBidStore>;

#[fixture]
fn service() -> Service {
    MarketplaceService::new(
        Arc::new(InMemoryGigStore::default()),
        Arc::new(InMemoryBidStore::default()),
    )
}

fn gig_draft(title: &str) -> GigDraft {
    GigDraft {
        title: title.to_owned(),
        description: "Need a clean vector logo for a coffee brand".to_owned(),
        budget: dec!(250),
    }
}

fn bid_draft(gig_id: GigId) -> BidDraft {
    BidDraft {
        gig_id,
        message: "I have shipped a dozen brand identities".to_owned(),
        price: dec!(200),
    }
}

#[rstest]
#[actix_web::test]
async fn posted_gigs_start_open_and_are_listed_newest_first(service: Service) {
    let owner = UserId::random();
    let first = service
        .post_gig(&owner, gig_draft("Logo Design"))
        .await
        .expect("first gig posts");
    let second = service
        .post_gig(&owner, gig_draft("Site Redesign"))
        .await
        .expect("second gig posts");
    assert_eq!(first.status, GigStatus::Open);

    let listed = service.list_gigs(None).await.expect("listing succeeds");
    let ids: Vec<GigId> = listed.iter().map(|gig| gig.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[rstest]
#[actix_web::test]
async fn title_filter_is_case_insensitive_substring(service: Service) {
    let owner = UserId::random();
    let logo = service
        .post_gig(&owner, gig_draft("Logo Design"))
        .await
        .expect("gig posts");
    service
        .post_gig(&owner, gig_draft("Copywriting"))
        .await
        .expect("gig posts");

    let hits = service
        .list_gigs(Some("logo"))
        .await
        .expect("listing succeeds");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, logo.id);
}

#[rstest]
#[actix_web::test]
async fn fetching_unknown_gig_is_not_found(service: Service) {
    let err = service
        .fetch_gig(&GigId::random())
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[actix_web::test]
async fn invalid_gig_draft_reports_first_violated_rule(service: Service) {
    let owner = UserId::random();
    let draft = GigDraft {
        title: "abcd".to_owned(),
        description: "too short".to_owned(),
        budget: dec!(0),
    };
    let err = service.post_gig(&owner, draft).await.expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details present");
    assert_eq!(details.get("field"), Some(&serde_json::json!("title")));
}

#[rstest]
#[actix_web::test]
async fn bids_on_open_gigs_start_pending(service: Service) {
    let owner = UserId::random();
    let freelancer = UserId::random();
    let gig = service
        .post_gig(&owner, gig_draft("Logo Design"))
        .await
        .expect("gig posts");

    let bid = service
        .place_bid(&freelancer, bid_draft(gig.id))
        .await
        .expect("bid places");
    assert_eq!(bid.status, crate::domain::BidStatus::Pending);
    assert_eq!(bid.gig_id, gig.id);
    assert_eq!(bid.freelancer_id, freelancer);
}

#[rstest]
#[actix_web::test]
async fn bidding_on_missing_gig_is_not_found(service: Service) {
    let err = service
        .place_bid(&UserId::random(), bid_draft(GigId::random()))
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[actix_web::test]
async fn owner_cannot_bid_on_own_gig(service: Service) {
    let owner = UserId::random();
    let gig = service
        .post_gig(&owner, gig_draft("Logo Design"))
        .await
        .expect("gig posts");

    let err = service
        .place_bid(&owner, bid_draft(gig.id))
        .await
        .expect_err("self-bid rejected");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[actix_web::test]
async fn only_the_owner_may_list_bids(service: Service) {
    let owner = UserId::random();
    let freelancer = UserId::random();
    let gig = service
        .post_gig(&owner, gig_draft("Logo Design"))
        .await
        .expect("gig posts");
    service
        .place_bid(&freelancer, bid_draft(gig.id))
        .await
        .expect("bid places");

    let err = service
        .bids_for_gig(&freelancer, &gig.id)
        .await
        .expect_err("non-owner rejected");
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let bids = service
        .bids_for_gig(&owner, &gig.id)
        .await
        .expect("owner allowed");
    assert_eq!(bids.len(), 1);
}

#[rstest]
#[actix_web::test]
async fn invalid_bid_draft_reports_first_violated_rule(service: Service) {
    let owner = UserId::random();
    let gig = service
        .post_gig(&owner, gig_draft("Logo Design"))
        .await
        .expect("gig posts");
    let draft = BidDraft {
        gig_id: gig.id,
        message: "short msg".to_owned(),
        price: dec!(0),
    };
    let err = service
        .place_bid(&UserId::random(), draft)
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details present");
    assert_eq!(details.get("field"), Some(&serde_json::json!("message")));
}
