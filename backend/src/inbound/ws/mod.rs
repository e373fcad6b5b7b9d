//! WebSocket inbound adapter delivering hire notices to live clients.
//!
//! Responsibilities:
//! - upgrade `/ws` requests and run the per-connection loop
//! - bind connections to users on receipt of a join payload
//! - fan domain notices out through the live endpoint registry

use std::sync::Arc;

use actix_web::web::{self, Payload};
use actix_web::{get, HttpRequest, HttpResponse};
use tracing::error;

mod session;

pub mod messages;
pub mod registry;

use registry::LiveEndpointRegistry;

/// Dependency bundle for WebSocket handlers.
#[derive(Clone)]
pub struct WsState {
    pub registry: Arc<LiveEndpointRegistry>,
}

impl WsState {
    /// Construct state around a shared registry.
    pub fn new(registry: Arc<LiveEndpointRegistry>) -> Self {
        Self { registry }
    }
}

/// Handle WebSocket upgrade for the `/ws` endpoint.
#[get("/ws")]
pub async fn ws_entry(
    state: web::Data<WsState>,
    req: HttpRequest,
    stream: Payload,
) -> actix_web::Result<HttpResponse> {
    let (response, session, message_stream) =
        actix_ws::handle(&req, stream).inspect_err(|err| {
            error!(error = %err, "WebSocket upgrade failed");
        })?;

    actix_web::rt::spawn(session::handle_ws_session(
        Arc::clone(&state.registry),
        session,
        message_stream,
    ));

    Ok(response)
}
