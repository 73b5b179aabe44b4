use tracing::{error, info, warn, Instrument};
use storefront::{
    setup_tracing, AddressCreate, CheckoutRequest, ProductCreate, StorefrontConfig, StorefrontSystem,
};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StorefrontConfig::load().map_err(|e| e.to_string())?;
    info!("Starting storefront session");

    let system = StorefrontSystem::new(&config);
    let customer_id = "customer_1";

    // Seed the catalog
    let span = tracing::info_span!("catalog_seed");
    let (biryani, lassi) = async {
        let biryani = system.catalog_client
            .create_product(ProductCreate::new("Hyderabadi Biryani", 100.0).with_cuisine("hyderabadi"))
            .await
            .map_err(|e| e.to_string())?;
        let lassi = system.catalog_client
            .create_product(ProductCreate::new("Mango Lassi", 50.0).with_image("/img/lassi.jpg"))
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>((biryani, lassi))
    }
    .instrument(span)
    .await?;

    // Header badge re-reads the cart whenever it changes
    let mut badge = system.cart_client.subscribe().await.map_err(|e| e.to_string())?;
    let badge_reader = system.cart_client.clone();
    let badge_task = tokio::spawn(async move {
        while badge.changed().await {
            match badge_reader.snapshot().await {
                Ok(cart) => info!(total_items = cart.total_items, "Header badge updated"),
                Err(_) => break,
            }
        }
    });

    // Shop: detail page adds two biryanis, menu grid adds a lassi
    let span = tracing::info_span!("shopping");
    async {
        system.catalog_client
            .add_to_cart(&system.cart_client, biryani.clone(), 2)
            .await
            .map_err(|e| e.to_string())?;
        system.catalog_client
            .add_to_cart(&system.cart_client, lassi, 1)
            .await
            .map_err(|e| e.to_string())?;
        let cart = system.cart_client
            .update_quantity(biryani, 1)
            .await
            .map_err(|e| e.to_string())?;
        info!(total_items = cart.total_items, total_amount = cart.total_amount, "Cart ready");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // First checkout fails: no saved address yet, the cart stays as it was
    let span = tracing::info_span!("checkout");
    async {
        match system.order_client.place_order(CheckoutRequest::for_customer(customer_id)).await {
            Ok(receipt) => info!(order_id = %receipt.order_id, "Unexpected success"),
            Err(e) => warn!(error = %e, "Checkout refused"),
        }

        system.address_client
            .create_address(
                AddressCreate::new(customer_id, "12 MG Road", "Pune", "Maharashtra", "411001", "9876543210")
                    .as_default(),
            )
            .await
            .map_err(|e| e.to_string())?;

        match system.order_client.place_order(CheckoutRequest::for_customer(customer_id)).await {
            Ok(receipt) => info!(
                order_id = %receipt.order_id,
                grand_total = receipt.summary.grand_total,
                "Order placed successfully"
            ),
            Err(e) => error!(error = %e, "Order placement failed"),
        }
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Shutdown system gracefully
    system.shutdown().await?;
    if let Err(e) = badge_task.await {
        error!(error = %e, "Badge task failed");
    }

    info!("Storefront session finished");
    Ok(())
}
