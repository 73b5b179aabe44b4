use tokio::sync::{mpsc, oneshot};
use crate::domain::{CartLine, CartProduct, CartSnapshot};
use crate::cart_actor::{CartError, SubscriptionId};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Messages understood by the cart service. Mutations answer with the cart as
/// it is after the change.
#[derive(Debug)]
pub enum CartRequest {
    AddItem {
        product: CartProduct,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    UpdateQuantity {
        product_id: String,
        quantity: i64,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    RemoveItem {
        product_id: String,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    Clear {
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    /// Removes the quantities of an accepted order.
    Settle {
        ordered: Vec<CartLine>,
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    Snapshot {
        respond_to: ServiceResponse<CartSnapshot, CartError>,
    },
    GetLine {
        product_id: String,
        respond_to: ServiceResponse<Option<CartLine>, CartError>,
    },
    Subscribe {
        notify: mpsc::UnboundedSender<()>,
        respond_to: ServiceResponse<SubscriptionId, CartError>,
    },
    Unsubscribe {
        id: SubscriptionId,
        respond_to: ServiceResponse<bool, CartError>,
    },
    Shutdown,
}
