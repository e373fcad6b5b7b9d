//! Wire-level message definitions for the WebSocket adapter.
//!
//! Clients announce their identity with a join payload; domain notices are
//! transformed into these payloads before being serialized to JSON and sent
//! to connected clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::HiredNotice;

/// Inbound join payload sent by the client after the upgrade.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    /// Identity to receive pushes for.
    #[serde(alias = "user_id")]
    pub user_id: Uuid,
}

/// Outbound payload announcing a won gig.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "hired", rename_all = "camelCase")]
pub struct HiredPush {
    /// Title of the gig the recipient was hired for.
    pub gig_title: String,
}

impl From<HiredNotice> for HiredPush {
    fn from(notice: HiredNotice) -> Self {
        Self {
            gig_title: notice.gig_title,
        }
    }
}
