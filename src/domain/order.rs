use std::fmt;

use super::cart::CartLine;

/// Backend-owned lifecycle of an order. New orders start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

/// Kitchen progress of a single order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CookStatus {
    #[default]
    Pending,
    Cooking,
    Ready,
}

/// Delivery progress of a single order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryStatus {
    #[default]
    Pending,
    PickedUp,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dish within a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub food_item_id: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub cook_status: CookStatus,
    pub delivery_status: DeliveryStatus,
}

/// A placed order as recorded by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub delivery_address_id: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

/// A line of an order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemCreate {
    pub food_item_id: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// Payload for submitting a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_id: String,
    pub delivery_address_id: String,
    pub total_amount: f64,
    pub items: Vec<OrderItemCreate>,
}

impl From<&CartLine> for OrderItemCreate {
    fn from(line: &CartLine) -> Self {
        Self {
            food_item_id: line.product_id.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// Fees applied on top of the cart subtotal at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub delivery_fee: f64,
    pub gst_rate: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            delivery_fee: 40.0,
            gst_rate: 0.05,
        }
    }
}

/// Payment summary shown on the checkout page and charged on the order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutSummary {
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub gst: f64,
    pub grand_total: f64,
}

impl CheckoutSummary {
    pub fn compute(subtotal: f64, pricing: &Pricing) -> Self {
        let gst = subtotal * pricing.gst_rate;
        Self {
            subtotal,
            delivery_fee: pricing.delivery_fee,
            gst,
            grand_total: subtotal + pricing.delivery_fee + gst,
        }
    }
}

/// Input of the checkout flow.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    /// Logged-in customer, `None` when the session is anonymous.
    pub customer_id: Option<String>,
    /// Explicitly selected address; the customer's default is used otherwise.
    pub address_id: Option<String>,
}

impl CheckoutRequest {
    pub fn for_customer(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: Some(customer_id.into()),
            address_id: None,
        }
    }

    pub fn with_address(mut self, address_id: impl Into<String>) -> Self {
        self.address_id = Some(address_id.into());
        self
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub order_id: String,
    pub summary: CheckoutSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_adds_delivery_fee_and_gst() {
        let summary = CheckoutSummary::compute(200.0, &Pricing::default());
        assert_eq!(summary.subtotal, 200.0);
        assert_eq!(summary.delivery_fee, 40.0);
        assert!((summary.gst - 10.0).abs() < 1e-9);
        assert!((summary.grand_total - 250.0).abs() < 1e-9);
    }

    #[test]
    fn summary_respects_custom_pricing() {
        let pricing = Pricing { delivery_fee: 0.0, gst_rate: 0.0 };
        let summary = CheckoutSummary::compute(99.5, &pricing);
        assert_eq!(summary.grand_total, 99.5);
    }

    #[test]
    fn order_status_uses_backend_names() {
        assert_eq!(OrderStatus::default().to_string(), "pending");
        assert_eq!(OrderStatus::OutForDelivery.as_str(), "out_for_delivery");
    }
}
