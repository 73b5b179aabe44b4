//! The session cart: line items keyed by product, derived totals, observer
//! notification and snapshot persistence.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::domain::{CartLine, CartProduct, CartSnapshot};
use super::error::StorageError;
use super::observers::{Observers, SubscriptionId};
use super::storage::KeyValueStore;

/// Storage key the cart snapshot is written under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Single source of truth for one session's cart.
///
/// Every mutation runs to completion as one step: change the lines, write the
/// snapshot, then call every observer. Totals are computed from the lines on
/// each read, so they cannot drift from them.
pub struct CartStore {
    lines: Vec<CartLine>,
    storage: Box<dyn KeyValueStore>,
    key: String,
    observers: Observers,
}

impl CartStore {
    /// Opens the cart stored under [`CART_STORAGE_KEY`], or an empty one.
    pub fn open(storage: impl KeyValueStore + 'static) -> Self {
        Self::open_with_key(storage, CART_STORAGE_KEY)
    }

    /// Opens the cart stored under `key`. Missing or unreadable snapshots
    /// yield an empty cart.
    pub fn open_with_key(storage: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        let key = key.into();
        let lines = match restore(&storage, &key) {
            Ok(Some(lines)) => {
                info!(lines = lines.len(), "Restored cart snapshot");
                lines
            }
            Ok(None) => {
                debug!("No cart snapshot, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cart snapshot");
                Vec::new()
            }
        };

        Self {
            lines,
            storage: Box::new(storage),
            key,
            observers: Observers::default(),
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total_amount(&self) -> f64 {
        self.lines.iter().fold(0.0, |acc, line| acc + line.line_total())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            total_items: self.total_items(),
            total_amount: self.total_amount(),
        }
    }

    /// Adds one unit of `product`. An existing line keeps the name, price and
    /// image recorded when it was first added.
    pub fn add_item(&mut self, product: CartProduct) {
        match self.lines.iter_mut().find(|line| line.product_id == product.product_id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                debug!(product_id = %line.product_id, quantity = line.quantity, "Incremented cart line");
            }
            None => {
                debug!(product_id = %product.product_id, "Added cart line");
                self.lines.push(CartLine {
                    unit_price: sanitize_price(&product.product_id, product.unit_price),
                    product_id: product.product_id,
                    name: product.name,
                    image_ref: product.image_ref,
                    quantity: 1,
                });
            }
        }
        self.commit();
    }

    /// Sets the absolute quantity of a line. Zero or negative removes it;
    /// unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: &str, new_quantity: i64) {
        if new_quantity <= 0 {
            let before = self.lines.len();
            self.lines.retain(|line| line.product_id != product_id);
            if self.lines.len() != before {
                debug!(product_id, new_quantity, "Quantity dropped to zero, line removed");
            } else {
                debug!(product_id, "No cart line to remove");
            }
        } else if let Some(line) = self.lines.iter_mut().find(|line| line.product_id == product_id) {
            line.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
            debug!(product_id, quantity = line.quantity, "Updated cart line quantity");
        } else {
            debug!(product_id, "No cart line to update");
        }
        self.commit();
    }

    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|line| line.product_id != product_id);
        debug!(product_id, "Removed cart line");
        self.commit();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        info!("Cart cleared");
        self.commit();
    }

    /// Takes the quantities of an accepted order out of the cart. When the
    /// cart still holds exactly `ordered` this empties it; units added after
    /// `ordered` was read stay.
    pub fn settle(&mut self, ordered: &[CartLine]) {
        for placed in ordered {
            if let Some(line) = self.lines.iter_mut().find(|line| line.product_id == placed.product_id) {
                line.quantity = line.quantity.saturating_sub(placed.quantity);
            }
        }
        self.lines.retain(|line| line.quantity > 0);
        if self.lines.is_empty() {
            info!("Cart cleared after order");
        } else {
            info!(remaining = self.lines.len(), "Ordered lines settled, later additions kept");
        }
        self.commit();
    }

    pub fn subscribe(&mut self, mut observer: impl FnMut() + Send + 'static) -> SubscriptionId {
        self.subscribe_while(move || {
            observer();
            true
        })
    }

    /// Like [`subscribe`](Self::subscribe), for observers that can go away on
    /// their own: once `observer` returns `false` it is unsubscribed.
    pub fn subscribe_while(&mut self, observer: impl FnMut() -> bool + Send + 'static) -> SubscriptionId {
        let id = self.observers.subscribe(observer);
        debug!(subscription = %id, "Cart observer subscribed");
        id
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.observers.unsubscribe(id);
        debug!(subscription = %id, removed, "Cart observer unsubscribed");
        removed
    }

    fn commit(&mut self) {
        if let Err(e) = self.persist() {
            warn!(error = %e, "Failed to persist cart snapshot");
        }
        let dropped = self.observers.notify_all();
        if dropped > 0 {
            debug!(dropped, "Dropped cart observers that went away");
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.lines)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(&self.key, &json)
    }
}

fn restore(storage: &impl KeyValueStore, key: &str) -> Result<Option<Vec<CartLine>>, StorageError> {
    let Some(json) = storage.get(key)? else {
        return Ok(None);
    };
    let lines: Vec<CartLine> =
        serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(Some(normalize(lines)))
}

/// Re-establishes the line invariants on data read back from storage: one
/// line per product (quantities merged, first occurrence kept in place), no
/// zero quantities and no negative prices.
fn normalize(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());

    for mut line in lines.into_iter().filter(|line| line.quantity > 0) {
        match positions.get(&line.product_id) {
            Some(&index) => {
                let existing = &mut merged[index];
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => {
                line.unit_price = sanitize_price(&line.product_id, line.unit_price);
                positions.insert(line.product_id.clone(), merged.len());
                merged.push(line);
            }
        }
    }
    merged
}

fn sanitize_price(product_id: &str, price: f64) -> f64 {
    if price.is_finite() && price >= 0.0 {
        price
    } else {
        warn!(product_id, price, "Invalid unit price, using 0");
        0.0
    }
}
