use tracing::{info, error};
use crate::actor_framework::ResourceActor;
use crate::cart_actor::{CartService, CartStore, FileStorage, MemoryStorage};
use crate::clients::{AddressClient, CartClient, CatalogClient, OrderClient};
use crate::domain::{Address, Order, Product};
use super::StorefrontConfig;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Wires one shopping session: the cart service plus the backend services it
/// talks to.
///
/// Responsible for starting up services, handing out clients, and handling
/// shutdown.
pub struct StorefrontSystem {
    pub cart_client: CartClient,
    pub catalog_client: CatalogClient,
    pub address_client: AddressClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

fn id_sequence(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || {
        let id = counter.fetch_add(1, Ordering::SeqCst);
        format!("{prefix}_{id}")
    }
}

impl StorefrontSystem {
    pub fn new(config: &StorefrontConfig) -> Self {
        let buffer = config.channel_buffer;

        // 1. Session cart, restored from its storage slot
        let store = match &config.cart_dir {
            Some(dir) => CartStore::open(FileStorage::new(dir)),
            None => CartStore::open(MemoryStorage::new()),
        };
        let (cart_service, cart_client) = CartService::new(buffer, store);
        let cart_handle = tokio::spawn(cart_service.run());

        // 2. Catalog backend
        let (product_actor, product_resource_client) = ResourceActor::<Product>::new(buffer, id_sequence("product"));
        let catalog_client = CatalogClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 3. Address backend
        let (address_actor, address_resource_client) = ResourceActor::<Address>::new(buffer, id_sequence("address"));
        let address_client = AddressClient::new(address_resource_client);
        let address_handle = tokio::spawn(address_actor.run());

        // 4. Order backend and checkout
        let (order_actor, order_resource_client) = ResourceActor::<Order>::new(buffer, id_sequence("order"));
        let order_client = OrderClient::new(
            order_resource_client,
            cart_client.clone(),
            address_client.clone(),
            config.pricing,
        );
        let order_handle = tokio::spawn(order_actor.run());

        info!("Storefront system started");
        Self {
            cart_client,
            catalog_client,
            address_client,
            order_client,
            handles: vec![cart_handle, product_handle, address_handle, order_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        // The cart may still be referenced by live subscriptions, so stop it
        // explicitly. Resource actors stop once every client is dropped.
        if let Err(e) = self.cart_client.shutdown().await {
            error!(error = %e, "Cart service already stopped");
        }

        drop(self.order_client);
        drop(self.address_client);
        drop(self.catalog_client);
        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Service task failed: {:?}", e);
                return Err(format!("Service task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AddressCreate, CheckoutRequest, ProductCreate};

    #[tokio::test]
    async fn full_session_places_order_and_shuts_down() {
        let system = StorefrontSystem::new(&StorefrontConfig::default());
        let mut badge = system.cart_client.subscribe().await.unwrap();

        let dish = system.catalog_client.create_product(ProductCreate::new("Biryani", 100.0)).await.unwrap();
        system.catalog_client.add_to_cart(&system.cart_client, dish.clone(), 2).await.unwrap();
        assert!(badge.changed().await);

        system.address_client
            .create_address(AddressCreate::new("customer_1", "12 MG Road", "Pune", "MH", "411001", "9876543210"))
            .await
            .unwrap();

        let receipt = system.order_client
            .place_order(CheckoutRequest::for_customer("customer_1"))
            .await
            .unwrap();
        assert_eq!(receipt.order_id, "order_1");
        assert!((receipt.summary.grand_total - 250.0).abs() < 1e-9);
        assert!(system.cart_client.snapshot().await.unwrap().is_empty());

        let order = system.order_client.get_order(receipt.order_id).await.unwrap().unwrap();
        assert_eq!(order.items[0].food_item_id, dish);
        assert_eq!(order.items[0].quantity, 2);

        system.shutdown().await.unwrap();
    }
}
