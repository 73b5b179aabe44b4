use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::cart_actor::{CartError, SubscriptionId};
use crate::domain::{CartLine, CartProduct, CartSnapshot};
use crate::messages::CartRequest;

/// Handle to a session's cart service. Every surface (header badge, floating
/// bar, cart page, checkout) holds a clone of the same client.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    /// Registers for change notifications. The subscription yields once per
    /// mutating operation; read the cart again to see what changed.
    #[instrument(skip(self))]
    pub async fn subscribe(&self) -> Result<CartSubscription, CartError> {
        let (notify, changes) = mpsc::unbounded_channel();
        let id = self.register(notify).await?;
        debug!(subscription = %id, "Subscribed to cart changes");
        Ok(CartSubscription {
            id,
            changes,
            client: self.clone(),
        })
    }

    /// Stops the cart service even if other handles are still alive.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        info!("Requesting cart shutdown");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(CartClient => fn add_item(product: CartProduct) -> CartSnapshot as CartRequest::AddItem, Error = CartError);
client_method!(CartClient => fn update_quantity(product_id: String, quantity: i64) -> CartSnapshot as CartRequest::UpdateQuantity, Error = CartError);
client_method!(CartClient => fn remove_item(product_id: String) -> CartSnapshot as CartRequest::RemoveItem, Error = CartError);
client_method!(CartClient => fn clear() -> CartSnapshot as CartRequest::Clear, Error = CartError);
client_method!(CartClient => fn settle(ordered: Vec<CartLine>) -> CartSnapshot as CartRequest::Settle, Error = CartError);
client_method!(CartClient => fn snapshot() -> CartSnapshot as CartRequest::Snapshot, Error = CartError);
client_method!(CartClient => fn line(product_id: String) -> Option<CartLine> as CartRequest::GetLine, Error = CartError);
client_method!(CartClient => fn unsubscribe(id: SubscriptionId) -> bool as CartRequest::Unsubscribe, Error = CartError);
client_method!(CartClient => fn register(notify: mpsc::UnboundedSender<()>) -> SubscriptionId as CartRequest::Subscribe, Error = CartError);

/// A live cart subscription. Dropping it without calling
/// [`unsubscribe`](Self::unsubscribe) releases the observer on the next change.
pub struct CartSubscription {
    id: SubscriptionId,
    changes: mpsc::UnboundedReceiver<()>,
    client: CartClient,
}

impl CartSubscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Waits for the next change. Returns `false` once the subscription can
    /// no longer fire (unsubscribed or the cart service stopped).
    pub async fn changed(&mut self) -> bool {
        self.changes.recv().await.is_some()
    }

    /// Consumes a change that already happened without waiting.
    pub fn try_changed(&mut self) -> bool {
        self.changes.try_recv().is_ok()
    }

    pub async fn unsubscribe(self) -> Result<bool, CartError> {
        self.client.unsubscribe(self.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::{CartService, CartStore, MemoryStorage};

    fn start(storage: MemoryStorage) -> CartClient {
        let (service, client) = CartService::new(8, CartStore::open(storage));
        tokio::spawn(service.run());
        client
    }

    fn dish(id: &str, price: f64) -> CartProduct {
        CartProduct::new(id, format!("Dish {id}"), price, "/placeholder.svg")
    }

    #[tokio::test]
    async fn mutations_reply_with_post_mutation_state() {
        let cart = start(MemoryStorage::new());
        cart.add_item(dish("A", 100.0)).await.unwrap();
        cart.add_item(dish("A", 100.0)).await.unwrap();
        let snapshot = cart.add_item(dish("B", 50.0)).await.unwrap();
        assert_eq!(snapshot.total_items, 3);
        assert_eq!(snapshot.total_amount, 250.0);

        let snapshot = cart.update_quantity("A".into(), 1).await.unwrap();
        assert_eq!(snapshot.total_items, 2);
        assert_eq!(snapshot.total_amount, 150.0);

        assert_eq!(cart.line("A".into()).await.unwrap().map(|l| l.quantity), Some(1));
        assert_eq!(cart.remove_item("A".into()).await.unwrap().lines.len(), 1);
        assert!(cart.clear().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn all_surfaces_read_the_same_state_after_a_change() {
        let cart = start(MemoryStorage::new());
        let header = cart.clone();
        let floating_bar = cart.clone();
        let mut header_sub = header.subscribe().await.unwrap();
        let mut bar_sub = floating_bar.subscribe().await.unwrap();

        cart.add_item(dish("A", 80.0)).await.unwrap();

        assert!(header_sub.changed().await);
        assert!(bar_sub.changed().await);
        let badge = header.snapshot().await.unwrap();
        let bar = floating_bar.snapshot().await.unwrap();
        assert_eq!(badge, bar);
        assert_eq!(badge.total_items, 1);
    }

    #[tokio::test]
    async fn unsubscribed_surface_stops_receiving() {
        let cart = start(MemoryStorage::new());
        let subscription = cart.subscribe().await.unwrap();
        let mut other = cart.subscribe().await.unwrap();
        assert!(subscription.unsubscribe().await.unwrap());

        cart.add_item(dish("A", 1.0)).await.unwrap();
        assert!(other.try_changed());
        assert!(!other.try_changed());
    }

    #[tokio::test]
    async fn dropped_subscription_is_released_on_next_change() {
        let cart = start(MemoryStorage::new());
        let subscription = cart.subscribe().await.unwrap();
        let id = subscription.id();
        drop(subscription);

        cart.add_item(dish("A", 1.0)).await.unwrap();
        assert!(!cart.unsubscribe(id).await.unwrap());
    }

    #[tokio::test]
    async fn reopened_service_restores_cart() {
        let storage = MemoryStorage::new();
        let cart = start(storage.clone());
        cart.add_item(dish("A", 12.5)).await.unwrap();
        let before = cart.snapshot().await.unwrap();
        cart.shutdown().await.unwrap();

        let reopened = start(storage);
        assert_eq!(reopened.snapshot().await.unwrap(), before);
    }

    #[tokio::test]
    async fn subscription_ends_when_service_stops() {
        let cart = start(MemoryStorage::new());
        let mut subscription = cart.subscribe().await.unwrap();
        cart.shutdown().await.unwrap();
        assert!(!subscription.changed().await);
        assert!(cart.snapshot().await.is_err());
    }
}
