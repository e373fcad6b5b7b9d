//! Bid board API handlers.
//!
//! ```text
//! POST /api/bids {"gigId":"...","message":"...","price":"200"}
//! GET /api/bids/{gigId}
//! PATCH /api/bids/{id}/hire
//! ```
//!
//! All bid operations require a session. Listing a gig's bids and hiring are
//! restricted to the gig's owner.

use actix_web::{get, patch, post, web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Bid, BidDraft, BidId, Error, GigId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Bid placement request body for `POST /api/bids`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidRequest {
    pub gig_id: Uuid,
    pub message: String,
    pub price: Decimal,
}

impl From<PlaceBidRequest> for BidDraft {
    fn from(value: PlaceBidRequest) -> Self {
        Self {
            gig_id: GigId::from(value.gig_id),
            message: value.message,
            price: value.price,
        }
    }
}

/// Place a bid on an open gig.
#[utoipa::path(
    post,
    path = "/api/bids",
    request_body = PlaceBidRequest,
    responses(
        (status = 201, description = "Bid placed", body = Bid),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Gig not found", body = Error),
        (status = 409, description = "Gig closed or own gig", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bids"],
    operation_id = "placeBid"
)]
#[post("/bids")]
pub async fn place_bid(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PlaceBidRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let bid = state
        .bid_command
        .place_bid(&caller, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(bid))
}

/// List the bids on a gig; owner only.
#[utoipa::path(
    get,
    path = "/api/bids/{gigId}",
    params(("gigId" = Uuid, Path, description = "Gig identifier")),
    responses(
        (status = 200, description = "Bids, newest first", body = [Bid]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the gig owner", body = Error),
        (status = 404, description = "Gig not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bids"],
    operation_id = "bidsForGig"
)]
#[get("/bids/{gig_id}")]
pub async fn bids_for_gig(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<Bid>>> {
    let caller = session.require_user_id()?;
    let gig_id = GigId::from(path.into_inner());
    let bids = state.bid_query.bids_for_gig(&caller, &gig_id).await?;
    Ok(web::Json(bids))
}

/// Hire a bid: the single winner takes the gig, every other pending bid is
/// rejected, and the winner's live endpoints are notified.
#[utoipa::path(
    patch,
    path = "/api/bids/{id}/hire",
    params(("id" = Uuid, Path, description = "Bid identifier")),
    responses(
        (status = 200, description = "Bid hired", body = Bid),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the gig owner", body = Error),
        (status = 404, description = "Bid not found", body = Error),
        (status = 409, description = "Gig or bid no longer eligible", body = Error),
        (status = 503, description = "Gig busy, retry", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bids"],
    operation_id = "hireBid"
)]
#[patch("/bids/{id}/hire")]
pub async fn hire_bid(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Bid>> {
    let caller = session.require_user_id()?;
    let bid_id = BidId::from(path.into_inner());
    let bid = state.hiring.hire(&caller, &bid_id).await?;
    Ok(web::Json(bid))
}
