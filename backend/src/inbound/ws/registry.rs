//! Registry of live push endpoints, keyed by user.
//!
//! The registry implements the domain's `HiredNotifier` port: when the hiring
//! coordinator announces a winner, the notice is fanned out to every endpoint
//! the winner currently has open. Delivery is best effort; with no endpoint
//! registered the notice is dropped, and endpoints that fail to accept a
//! frame are pruned.
//!
//! The bucket lock is a `std::sync::Mutex` and is never held across an await:
//! endpoint handles are cloned out under the lock and pushed to afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::HiredNotifier;
use crate::domain::{HiredNotice, UserId};
use crate::inbound::ws::messages::HiredPush;

/// The endpoint's peer is gone; the registry drops the registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointClosed;

/// One live delivery target, usually a WebSocket connection.
#[async_trait]
pub trait PushEndpoint: Send + Sync {
    /// Deliver one text frame.
    async fn push(&self, frame: String) -> Result<(), EndpointClosed>;
}

/// Handle returned by [`LiveEndpointRegistry::register`]; present it back to
/// `unregister` when the connection ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTicket {
    user_id: UserId,
    id: u64,
}

struct RegisteredEndpoint {
    id: u64,
    endpoint: Arc<dyn PushEndpoint>,
}

/// User-to-endpoints map shared by the WebSocket adapter and the domain.
#[derive(Default)]
pub struct LiveEndpointRegistry {
    buckets: Mutex<HashMap<UserId, Vec<RegisteredEndpoint>>>,
    next_id: AtomicU64,
}

impl LiveEndpointRegistry {
    fn lock_buckets(&self) -> MutexGuard<'_, HashMap<UserId, Vec<RegisteredEndpoint>>> {
        // A poisoned bucket map still holds consistent data; recover it.
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach an endpoint to `user_id` and return its ticket.
    pub fn register(&self, user_id: UserId, endpoint: Arc<dyn PushEndpoint>) -> EndpointTicket {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock_buckets()
            .entry(user_id)
            .or_default()
            .push(RegisteredEndpoint { id, endpoint });
        debug!(user = %user_id, endpoint = id, "registered live endpoint");
        EndpointTicket { user_id, id }
    }

    /// Detach the endpoint named by `ticket`. Safe to call more than once and
    /// after the endpoint was pruned.
    pub fn unregister(&self, ticket: &EndpointTicket) {
        let mut buckets = self.lock_buckets();
        if let Some(endpoints) = buckets.get_mut(&ticket.user_id) {
            endpoints.retain(|registered| registered.id != ticket.id);
            if endpoints.is_empty() {
                buckets.remove(&ticket.user_id);
            }
        }
    }

    /// Number of live endpoints registered for `user_id`.
    pub fn endpoint_count(&self, user_id: &UserId) -> usize {
        self.lock_buckets()
            .get(user_id)
            .map_or(0, Vec::len)
    }

    /// Send `frame` to every endpoint of `user_id`, pruning the ones whose
    /// peer has gone away.
    pub async fn publish(&self, user_id: &UserId, frame: &str) {
        let targets: Vec<(u64, Arc<dyn PushEndpoint>)> = self
            .lock_buckets()
            .get(user_id)
            .map(|endpoints| {
                endpoints
                    .iter()
                    .map(|registered| (registered.id, Arc::clone(&registered.endpoint)))
                    .collect()
            })
            .unwrap_or_default();

        let mut stale = Vec::new();
        for (id, endpoint) in targets {
            if endpoint.push(frame.to_owned()).await.is_err() {
                stale.push(id);
            }
        }

        if !stale.is_empty() {
            let mut buckets = self.lock_buckets();
            if let Some(endpoints) = buckets.get_mut(user_id) {
                endpoints.retain(|registered| !stale.contains(&registered.id));
                if endpoints.is_empty() {
                    buckets.remove(user_id);
                }
            }
            warn!(user = %user_id, pruned = stale.len(), "pruned closed endpoints");
        }
    }
}

#[async_trait]
impl HiredNotifier for LiveEndpointRegistry {
    async fn notify_hired(&self, freelancer: &UserId, notice: HiredNotice) {
        let push = HiredPush::from(notice);
        match serde_json::to_string(&push) {
            Ok(frame) => self.publish(freelancer, &frame).await,
            Err(error) => warn!(error = %error, "failed to serialize hired push"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    /// Endpoint double recording frames, optionally refusing them.
    #[derive(Default)]
    struct RecordingEndpoint {
        frames: StdMutex<Vec<String>>,
        closed: bool,
    }

    impl RecordingEndpoint {
        fn closed() -> Self {
            Self {
                frames: StdMutex::new(Vec::new()),
                closed: true,
            }
        }

        fn received(&self) -> Vec<String> {
            self.frames.lock().expect("frames lock").clone()
        }
    }

    #[async_trait]
    impl PushEndpoint for RecordingEndpoint {
        async fn push(&self, frame: String) -> Result<(), EndpointClosed> {
            if self.closed {
                return Err(EndpointClosed);
            }
            self.frames.lock().expect("frames lock").push(frame);
            Ok(())
        }
    }

    #[actix_web::test]
    async fn notice_reaches_every_endpoint_of_the_user() {
        let registry = LiveEndpointRegistry::default();
        let user = UserId::random();
        let first = Arc::new(RecordingEndpoint::default());
        let second = Arc::new(RecordingEndpoint::default());
        registry.register(user, Arc::clone(&first) as Arc<dyn PushEndpoint>);
        registry.register(user, Arc::clone(&second) as Arc<dyn PushEndpoint>);

        registry.notify_hired(&user, HiredNotice::new("Logo Design")).await;

        let expected = r#"{"type":"hired","gigTitle":"Logo Design"}"#;
        assert_eq!(first.received(), vec![expected.to_owned()]);
        assert_eq!(second.received(), vec![expected.to_owned()]);
    }

    #[actix_web::test]
    async fn notice_for_an_absent_user_is_dropped() {
        let registry = LiveEndpointRegistry::default();
        let bystander = Arc::new(RecordingEndpoint::default());
        registry.register(UserId::random(), Arc::clone(&bystander) as Arc<dyn PushEndpoint>);

        registry
            .notify_hired(&UserId::random(), HiredNotice::new("Logo Design"))
            .await;

        assert!(bystander.received().is_empty());
    }

    #[actix_web::test]
    async fn unregister_is_idempotent() {
        let registry = LiveEndpointRegistry::default();
        let user = UserId::random();
        let endpoint = Arc::new(RecordingEndpoint::default());
        let ticket = registry.register(user, Arc::clone(&endpoint) as Arc<dyn PushEndpoint>);

        registry.unregister(&ticket);
        registry.unregister(&ticket);
        assert_eq!(registry.endpoint_count(&user), 0);

        registry.notify_hired(&user, HiredNotice::new("Logo Design")).await;
        assert!(endpoint.received().is_empty());
    }

    #[actix_web::test]
    async fn closed_endpoints_are_pruned_on_publish() {
        let registry = LiveEndpointRegistry::default();
        let user = UserId::random();
        let dead = Arc::new(RecordingEndpoint::closed());
        let live = Arc::new(RecordingEndpoint::default());
        registry.register(user, Arc::clone(&dead) as Arc<dyn PushEndpoint>);
        registry.register(user, Arc::clone(&live) as Arc<dyn PushEndpoint>);

        registry.notify_hired(&user, HiredNotice::new("Logo Design")).await;

        assert_eq!(registry.endpoint_count(&user), 1);
        assert_eq!(live.received().len(), 1);
    }

    #[actix_web::test]
    async fn tickets_name_their_own_endpoint() {
        let registry = LiveEndpointRegistry::default();
        let user = UserId::random();
        let first = Arc::new(RecordingEndpoint::default());
        let second = Arc::new(RecordingEndpoint::default());
        let first_ticket = registry.register(user, Arc::clone(&first) as Arc<dyn PushEndpoint>);
        registry.register(user, Arc::clone(&second) as Arc<dyn PushEndpoint>);

        registry.unregister(&first_ticket);
        registry.notify_hired(&user, HiredNotice::new("Logo Design")).await;

        assert!(first.received().is_empty());
        assert_eq!(second.received().len(), 1);
    }
}
