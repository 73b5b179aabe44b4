use tracing::{error, info, instrument, warn};
use crate::actor_framework::ResourceClient;
use crate::clients::{AddressClient, CartClient};
use crate::domain::{
    Address, CheckoutRequest, CheckoutSummary, Order, OrderCreate, OrderItemCreate, OrderReceipt, Pricing,
};
use crate::order_actor::OrderError;

/// Client for the order backend.
///
/// Owns the checkout flow: it reads the session cart, resolves the delivery
/// address, submits the order once, and clears the cart only after the
/// backend has accepted the order. Units another surface adds while the
/// order is in flight were not ordered and stay in the cart.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    cart_client: CartClient,
    address_client: AddressClient,
    pricing: Pricing,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        cart_client: CartClient,
        address_client: AddressClient,
        pricing: Pricing,
    ) -> Self {
        Self {
            inner,
            cart_client,
            address_client,
            pricing,
        }
    }

    /// Payment summary for the cart as it is now.
    #[instrument(skip(self))]
    pub async fn quote(&self) -> Result<CheckoutSummary, OrderError> {
        let cart = self.cart_client
            .snapshot()
            .await
            .map_err(|e| OrderError::CartUnavailable(e.to_string()))?;
        Ok(CheckoutSummary::compute(cart.total_amount, &self.pricing))
    }

    #[instrument(skip(self))]
    pub async fn place_order(&self, request: CheckoutRequest) -> Result<OrderReceipt, OrderError> {
        info!("Processing place_order request");

        // Step 1: Require a logged-in customer
        let Some(customer_id) = request.customer_id else {
            warn!("Checkout attempted without a session");
            return Err(OrderError::NotAuthenticated);
        };

        // Step 2: Read the cart
        let cart = self.cart_client
            .snapshot()
            .await
            .map_err(|e| OrderError::CartUnavailable(e.to_string()))?;
        if cart.is_empty() {
            warn!("Checkout attempted with an empty cart");
            return Err(OrderError::EmptyCart);
        }

        // Step 3: Resolve the delivery address
        let address = self.resolve_address(&customer_id, request.address_id).await?;
        info!(address_id = %address.id, "Delivery address resolved");

        // Step 4: Price the order
        let summary = CheckoutSummary::compute(cart.total_amount, &self.pricing);

        // Step 5: Submit once; a failure leaves the cart untouched for a retry
        let payload = OrderCreate {
            customer_id,
            delivery_address_id: address.id,
            total_amount: summary.grand_total,
            items: cart.lines.iter().map(OrderItemCreate::from).collect(),
        };
        let order_id = match self.inner.create(payload).await {
            Ok(order_id) => order_id,
            Err(e) => {
                error!(error = %e, "Order submission failed, cart kept");
                return Err(OrderError::SubmissionFailed(e.to_string()));
            }
        };
        info!(order_id = %order_id, grand_total = summary.grand_total, "Order placed");

        // Step 6: Only now take the ordered lines out of the cart
        if let Err(e) = self.cart_client.settle(cart.lines).await {
            error!(error = %e, order_id = %order_id, "Order placed but cart could not be cleared");
        }

        Ok(OrderReceipt { order_id, summary })
    }

    async fn resolve_address(&self, customer_id: &str, address_id: Option<String>) -> Result<Address, OrderError> {
        match address_id {
            Some(id) => {
                let address = self.address_client
                    .get_address(id.clone())
                    .await
                    .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
                    .ok_or_else(|| OrderError::InvalidAddress(id.clone()))?;
                if address.customer_id != customer_id {
                    error!(address_id = %id, "Address belongs to another customer");
                    return Err(OrderError::InvalidAddress(id));
                }
                Ok(address)
            }
            None => self.address_client
                .default_for_customer(customer_id.to_string())
                .await
                .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
                .ok_or(OrderError::MissingAddress),
        }
    }
}

impl_client_get!(OrderClient, Order, OrderError, order);
