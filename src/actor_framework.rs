//! Generic resource actor standing in for the hosted backend tables
//! (catalog products, customer addresses, orders).

use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and DTOs)
// =============================================================================

/// Trait that any backend row type must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    /// Table name used in logs
    const KIND: &'static str;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, String>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> { Ok(()) }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    /// All rows in creation order
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    creation_order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            creation_order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(kind = T::KIND))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.creation_order
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
            }
        }
        info!("ResourceActor stopped");
    }

    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create(id.clone(), payload).map_err(FrameworkError::Rejected)?;
        item.on_create().map_err(FrameworkError::Rejected)?;
        debug!(id = %id, "Row created");
        self.store.insert(id.clone(), item);
        self.creation_order.push(id.clone());
        Ok(id)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let item = self.store
            .get_mut(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_update(patch).map_err(FrameworkError::Rejected)?;
        debug!(id = %id, "Row updated");
        Ok(item.clone())
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let item = self.store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        if let Err(e) = item.on_delete() {
            warn!(id = %id, error = %e, "Delete rejected");
            return Err(FrameworkError::Rejected(e));
        }
        self.store.remove(&id);
        self.creation_order.retain(|existing| *existing != id);
        debug!(id = %id, "Row deleted");
        Ok(())
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to))
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct Coupon {
        id: String,
        code: String,
        percent_off: u8,
        redeemed: bool,
    }

    #[derive(Debug)]
    struct CouponCreate {
        code: String,
        percent_off: u8,
    }

    #[derive(Debug)]
    struct CouponPatch {
        percent_off: Option<u8>,
    }

    impl Entity for Coupon {
        type Id = String;
        type CreatePayload = CouponCreate;
        type Patch = CouponPatch;

        const KIND: &'static str = "coupon";

        fn id(&self) -> &String { &self.id }

        fn from_create(id: String, payload: CouponCreate) -> Result<Self, String> {
            if payload.percent_off > 100 {
                return Err(format!("percent_off out of range: {}", payload.percent_off));
            }
            Ok(Self { id, code: payload.code, percent_off: payload.percent_off, redeemed: false })
        }

        fn on_update(&mut self, patch: CouponPatch) -> Result<(), String> {
            if let Some(percent_off) = patch.percent_off {
                self.percent_off = percent_off;
            }
            Ok(())
        }

        fn on_delete(&self) -> Result<(), String> {
            if self.redeemed { Err("coupon already redeemed".into()) } else { Ok(()) }
        }
    }

    fn start() -> ResourceClient<Coupon> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("coupon_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_resource_actor_crud() {
        let client = start();

        let id = client.create(CouponCreate { code: "WELCOME".into(), percent_off: 10 }).await.unwrap();
        assert_eq!(id, "coupon_1");

        let updated = client.update(id.clone(), CouponPatch { percent_off: Some(15) }).await.unwrap();
        assert_eq!(updated.percent_off, 15);
        assert_eq!(client.get(id.clone()).await.unwrap().unwrap().percent_off, 15);

        client.delete(id.clone()).await.unwrap();
        assert_eq!(client.get(id.clone()).await.unwrap(), None);
        assert_eq!(client.delete(id).await, Err(FrameworkError::NotFound("coupon_1".into())));
    }

    #[tokio::test]
    async fn test_list_keeps_creation_order() {
        let client = start();
        for code in ["A", "B", "C"] {
            client.create(CouponCreate { code: code.into(), percent_off: 5 }).await.unwrap();
        }
        client.delete("coupon_2".to_string()).await.unwrap();

        let codes: Vec<_> = client.list().await.unwrap().into_iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_hook_rejection_is_reported() {
        let client = start();
        let result = client.create(CouponCreate { code: "BAD".into(), percent_off: 120 }).await;
        assert!(matches!(result, Err(FrameworkError::Rejected(_))));
        assert!(client.list().await.unwrap().is_empty());

        let missing = client.update("nope".into(), CouponPatch { percent_off: None }).await;
        assert_eq!(missing, Err(FrameworkError::NotFound("nope".into())));
    }
}
