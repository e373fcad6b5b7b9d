//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
    SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpResponse, HttpServer};
use tracing::error;
use utoipa::OpenApi;

use backend::doc::ApiDoc;
use backend::domain::ports::HiredNotifier;
use backend::domain::{AccountService, HiringService, MarketplaceService};
use backend::inbound::http::auth::{login, logout, me, register};
use backend::inbound::http::bids::{bids_for_gig, hire_bid, place_bid};
use backend::inbound::http::gigs::{fetch_gig, list_gigs, post_gig};
use backend::inbound::http::state::HttpState;
use backend::inbound::ws::registry::LiveEndpointRegistry;
use backend::inbound::ws::{self, WsState};
use backend::outbound::persistence::memory::{
    InMemoryBidStore, InMemoryGigStore, InMemoryUserStore,
};
use backend::Trace;

/// Wire the service stack over the in-memory persistence adapters.
fn build_states() -> (HttpState, WsState) {
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

    let http_state = HttpState {
        accounts,
        gig_query: Arc::clone(&marketplace) as _,
        gig_command: Arc::clone(&marketplace) as _,
        bid_query: Arc::clone(&marketplace) as _,
        bid_command: marketplace,
        hiring,
    };

    (http_state, WsState::new(registry))
}

#[derive(Clone)]
struct AppDependencies {
    http_state: web::Data<HttpState>,
    ws_state: web::Data<WsState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

async fn openapi_json() -> HttpResponse {
    match ApiDoc::openapi().to_json() {
        Ok(body) => HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Err(err) => {
            error!(error = %err, "failed to render OpenAPI document");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        ws_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(me)
        .service(post_gig)
        .service(list_gigs)
        .service(fetch_gig)
        .service(place_bid)
        .service(bids_for_gig)
        .service(hire_bid);

    App::new()
        .app_data(http_state)
        .app_data(ws_state)
        .wrap(Trace)
        .service(api)
        .service(ws::ws_entry)
        .route("/api-docs/openapi.json", web::get().to(openapi_json))
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let (http_state, ws_state) = build_states();
    let deps = AppDependencies {
        http_state: web::Data::new(http_state),
        ws_state: web::Data::new(ws_state),
        key: config.key.clone(),
        cookie_secure: config.cookie_secure,
        same_site: config.same_site,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();
    Ok(server)
}
