//! Gig board API handlers.
//!
//! ```text
//! POST /api/gigs {"title":"...","description":"...","budget":"250"}
//! GET /api/gigs?q=logo
//! GET /api/gigs/{id}
//! ```
//!
//! Listing and fetching gigs is open to everyone; posting requires a session.

use actix_web::{get, post, web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Gig, GigDraft, GigId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Gig posting request body for `POST /api/gigs`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostGigRequest {
    pub title: String,
    pub description: String,
    pub budget: Decimal,
}

impl From<PostGigRequest> for GigDraft {
    fn from(value: PostGigRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            budget: value.budget,
        }
    }
}

/// Query parameters for `GET /api/gigs`.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct GigListQuery {
    /// Case-insensitive title substring filter.
    pub q: Option<String>,
}

/// Post a new gig owned by the session user.
#[utoipa::path(
    post,
    path = "/api/gigs",
    request_body = PostGigRequest,
    responses(
        (status = 201, description = "Gig posted", body = Gig),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gigs"],
    operation_id = "postGig"
)]
#[post("/gigs")]
pub async fn post_gig(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PostGigRequest>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let gig = state
        .gig_command
        .post_gig(&owner, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(gig))
}

/// List gigs, newest first, optionally filtered by title substring.
#[utoipa::path(
    get,
    path = "/api/gigs",
    params(GigListQuery),
    responses(
        (status = 200, description = "Gigs", body = [Gig]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gigs"],
    operation_id = "listGigs",
    security([])
)]
#[get("/gigs")]
pub async fn list_gigs(
    state: web::Data<HttpState>,
    query: web::Query<GigListQuery>,
) -> ApiResult<web::Json<Vec<Gig>>> {
    let gigs = state.gig_query.list_gigs(query.q.as_deref()).await?;
    Ok(web::Json(gigs))
}

/// Fetch one gig by id.
#[utoipa::path(
    get,
    path = "/api/gigs/{id}",
    params(("id" = Uuid, Path, description = "Gig identifier")),
    responses(
        (status = 200, description = "Gig", body = Gig),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["gigs"],
    operation_id = "fetchGig",
    security([])
)]
#[get("/gigs/{id}")]
pub async fn fetch_gig(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Gig>> {
    let id = GigId::from(path.into_inner());
    let gig = state.gig_query.fetch_gig(&id).await?;
    Ok(web::Json(gig))
}
