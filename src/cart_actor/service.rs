use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::CartClient;
use crate::domain::{CartProduct, CartSnapshot};
use crate::messages::{CartRequest, ServiceResponse};
use super::error::CartError;
use super::observers::SubscriptionId;
use super::store::CartStore;

/// Owns one session's [`CartStore`] and applies requests strictly in arrival
/// order. A mutation is persisted and every observer notified before its
/// reply is sent, so any read issued afterwards sees it.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    store: CartStore,
}

impl CartService {
    pub fn new(buffer_size: usize, store: CartStore) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, store };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(lines = self.store.lines().len(), "CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::AddItem { product, respond_to } => {
                    self.handle_add_item(product, respond_to);
                }
                CartRequest::UpdateQuantity { product_id, quantity, respond_to } => {
                    self.handle_update_quantity(product_id, quantity, respond_to);
                }
                CartRequest::RemoveItem { product_id, respond_to } => {
                    self.handle_remove_item(product_id, respond_to);
                }
                CartRequest::Clear { respond_to } => {
                    self.store.clear();
                    let _ = respond_to.send(Ok(self.store.snapshot()));
                }
                CartRequest::Settle { ordered, respond_to } => {
                    self.store.settle(&ordered);
                    let _ = respond_to.send(Ok(self.store.snapshot()));
                }
                CartRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.snapshot()));
                }
                CartRequest::GetLine { product_id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.line(&product_id).cloned()));
                }
                CartRequest::Subscribe { notify, respond_to } => {
                    let id = self.store.subscribe_while(move || notify.send(()).is_ok());
                    let _ = respond_to.send(Ok(id));
                }
                CartRequest::Unsubscribe { id, respond_to } => {
                    self.handle_unsubscribe(id, respond_to);
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }
        info!("CartService stopped");
    }

    #[instrument(fields(product_id = %product.product_id), skip(self, product, respond_to))]
    fn handle_add_item(&mut self, product: CartProduct, respond_to: ServiceResponse<CartSnapshot, CartError>) {
        debug!("Processing add_item request");
        self.store.add_item(product);
        let _ = respond_to.send(Ok(self.store.snapshot()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_update_quantity(
        &mut self,
        product_id: String,
        quantity: i64,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    ) {
        debug!("Processing update_quantity request");
        self.store.update_quantity(&product_id, quantity);
        let _ = respond_to.send(Ok(self.store.snapshot()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove_item(&mut self, product_id: String, respond_to: ServiceResponse<CartSnapshot, CartError>) {
        debug!("Processing remove_item request");
        self.store.remove_item(&product_id);
        let _ = respond_to.send(Ok(self.store.snapshot()));
    }

    #[instrument(fields(subscription = %id), skip(self, respond_to))]
    fn handle_unsubscribe(&mut self, id: SubscriptionId, respond_to: ServiceResponse<bool, CartError>) {
        let removed = self.store.unsubscribe(id);
        let _ = respond_to.send(Ok(removed));
    }
}
