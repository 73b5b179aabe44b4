use serde::{Deserialize, Serialize};

use super::product::Product;

/// One product-and-quantity entry in the cart.
///
/// Serialized with camelCase keys, which is the persisted snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: f64,
    pub image_ref: String,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Product data recorded on a cart line when it is first added.
#[derive(Debug, Clone, PartialEq)]
pub struct CartProduct {
    pub product_id: String,
    pub name: String,
    pub unit_price: f64,
    pub image_ref: String,
}

impl CartProduct {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: f64,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
        }
    }
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image_ref: product.image_ref().to_string(),
        }
    }
}

/// Consistent read view of a cart taken in a single step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total_items: u64,
    pub total_amount: f64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PLACEHOLDER_IMAGE;

    #[test]
    fn line_serializes_with_camel_case_keys() {
        let line = CartLine {
            product_id: "p1".into(),
            name: "Paneer Tikka".into(),
            unit_price: 249.5,
            image_ref: "/img/paneer.jpg".into(),
            quantity: 2,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["unitPrice"], 249.5);
        assert_eq!(json["imageRef"], "/img/paneer.jpg");
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn cart_product_from_catalog_uses_placeholder_image() {
        let product = Product {
            id: "product_1".into(),
            name: "Dal Makhani".into(),
            description: None,
            price: 180.0,
            image_url: None,
            category_id: None,
            cuisine_id: None,
            is_available: true,
        };
        let item = CartProduct::from(&product);
        assert_eq!(item.product_id, "product_1");
        assert_eq!(item.image_ref, PLACEHOLDER_IMAGE);
        assert_eq!(item.unit_price, 180.0);
    }
}
