use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;

    const KIND: &'static str = "food_items";

    fn id(&self) -> &String { &self.id }

    /// Creates a catalog entry.
    ///
    /// # Errors
    /// Rejects blank names and negative or non-finite prices.
    fn from_create(id: String, payload: ProductCreate) -> Result<Self, String> {
        if payload.name.trim().is_empty() {
            return Err("Product name must not be empty".to_string());
        }
        validate_price(payload.price)?;
        Ok(Self {
            id,
            name: payload.name,
            description: payload.description,
            price: payload.price,
            image_url: payload.image_url,
            category_id: payload.category_id,
            cuisine_id: payload.cuisine_id,
            is_available: payload.is_available,
        })
    }

    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(price) = patch.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(is_available) = patch.is_available {
            self.is_available = is_available;
        }
        Ok(())
    }
}

fn validate_price(price: f64) -> Result<(), String> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(format!("Invalid price: {price}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_price() {
        let result = Product::from_create("product_1".into(), ProductCreate::new("Samosa", -1.0));
        assert!(result.is_err());
    }

    #[test]
    fn patch_toggles_availability() {
        let mut product = Product::from_create("product_1".into(), ProductCreate::new("Samosa", 20.0)).unwrap();
        product.on_update(ProductPatch { price: Some(25.0), is_available: Some(false) }).unwrap();
        assert_eq!(product.price, 25.0);
        assert!(!product.is_available);
        assert!(product.on_update(ProductPatch { price: Some(f64::INFINITY), ..Default::default() }).is_err());
    }
}
