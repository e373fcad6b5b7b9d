//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API: every HTTP endpoint of the inbound layer, the shared
//! domain schemas, and the session cookie security scheme.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Bid, BidId, BidStatus, Error, ErrorCode, Gig, GigId, GigStatus, User, UserId};
use crate::inbound::http::auth::{LoginRequest, RegisterRequest};
use crate::inbound::http::bids::PlaceBidRequest;
use crate::inbound::http::gigs::PostGigRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/register or /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gig marketplace API",
        description = "Gigs, bids, and atomic hiring with live hire notices over WebSocket."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::gigs::post_gig,
        crate::inbound::http::gigs::list_gigs,
        crate::inbound::http::gigs::fetch_gig,
        crate::inbound::http::bids::place_bid,
        crate::inbound::http::bids::bids_for_gig,
        crate::inbound::http::bids::hire_bid,
    ),
    components(schemas(
        User,
        UserId,
        Gig,
        GigId,
        GigStatus,
        Bid,
        BidId,
        BidStatus,
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        PostGigRequest,
        PlaceBidRequest,
    )),
    tags(
        (name = "auth", description = "Account registration and sessions"),
        (name = "gigs", description = "Posting and browsing gigs"),
        (name = "bids", description = "Placing bids and hiring")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/logout",
            "/api/auth/me",
            "/api/gigs",
            "/api/gigs/{id}",
            "/api/bids",
            "/api/bids/{gigId}",
            "/api/bids/{id}/hire",
        ] {
            assert!(
                paths.iter().any(|path| path.as_str() == expected),
                "missing path {expected}; got {paths:?}"
            );
        }
    }

    #[test]
    fn document_serialises_to_json() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("document serialises");
        assert!(json.contains("SessionCookie"));
    }
}
