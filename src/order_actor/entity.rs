use crate::actor_framework::Entity;
use crate::domain::{CookStatus, DeliveryStatus, Order, OrderCreate, OrderItem, OrderStatus};

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = (); // Status changes belong to the kitchen/delivery side

    const KIND: &'static str = "orders";

    fn id(&self) -> &String { &self.id }

    /// Creates an order together with its items.
    ///
    /// # Notes
    /// The order starts as `pending`; every item starts with pending cook and
    /// delivery statuses.
    fn from_create(id: String, payload: OrderCreate) -> Result<Self, String> {
        if payload.items.is_empty() {
            return Err("Order has no items".to_string());
        }
        if let Some(item) = payload.items.iter().find(|item| item.quantity == 0) {
            return Err(format!("Invalid quantity for {}", item.food_item_id));
        }
        if !(payload.total_amount.is_finite() && payload.total_amount >= 0.0) {
            return Err(format!("Invalid total amount: {}", payload.total_amount));
        }

        let items = payload.items
            .into_iter()
            .map(|item| OrderItem {
                food_item_id: item.food_item_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
                cook_status: CookStatus::default(),
                delivery_status: DeliveryStatus::default(),
            })
            .collect();

        Ok(Self {
            id,
            customer_id: payload.customer_id,
            delivery_address_id: payload.delivery_address_id,
            total_amount: payload.total_amount,
            status: OrderStatus::Pending,
            items,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderItemCreate;

    fn payload(items: Vec<OrderItemCreate>) -> OrderCreate {
        OrderCreate {
            customer_id: "customer_1".into(),
            delivery_address_id: "address_1".into(),
            total_amount: 250.0,
            items,
        }
    }

    #[test]
    fn new_orders_are_pending() {
        let order = Order::from_create(
            "order_1".into(),
            payload(vec![OrderItemCreate { food_item_id: "product_1".into(), quantity: 2, unit_price: 100.0 }]),
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items[0].cook_status, CookStatus::Pending);
        assert_eq!(order.items[0].delivery_status, DeliveryStatus::Pending);
    }

    #[test]
    fn rejects_empty_orders() {
        assert!(Order::from_create("order_1".into(), payload(Vec::new())).is_err());
    }
}
