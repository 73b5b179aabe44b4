use tracing::{debug, info, instrument};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::cart_actor::CartError;
use crate::domain::{CartProduct, CartSnapshot, Product, ProductCreate, ProductPatch};
use crate::product_actor::CatalogError;
use super::CartClient;

/// Client for the catalog (`food_items`) backend.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

impl_client_new!(CatalogClient, Product);
impl_client_get!(CatalogClient, Product, CatalogError, product);

impl CatalogClient {
    #[instrument(skip(self), fields(name = %product.name))]
    pub async fn create_product(&self, product: ProductCreate) -> Result<String, CatalogError> {
        debug!("Sending request");
        self.inner.create(product).await.map_err(map_write_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, CatalogError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(map_write_error)
    }

    /// Dishes currently orderable, in catalog order.
    #[instrument(skip(self))]
    pub async fn list_available(&self) -> Result<Vec<Product>, CatalogError> {
        debug!("Sending request");
        let products = self.inner
            .list()
            .await
            .map_err(|e| CatalogError::ActorCommunicationError(e.to_string()))?;
        Ok(products.into_iter().filter(|p| p.is_available).collect())
    }

    /// Dishes of one cuisine, as listed on a cuisine page.
    #[instrument(skip(self))]
    pub async fn list_by_cuisine(&self, cuisine_id: String) -> Result<Vec<Product>, CatalogError> {
        let products = self.list_available().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.cuisine_id.as_deref() == Some(cuisine_id.as_str()))
            .collect())
    }

    /// Dishes of one category, as listed on a category page.
    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category_id: String) -> Result<Vec<Product>, CatalogError> {
        let products = self.list_available().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.category_id.as_deref() == Some(category_id.as_str()))
            .collect())
    }

    /// Looks up a dish and adds `units` of it to the cart, one `add_item` per
    /// unit, the way the detail page's quantity picker does.
    #[instrument(skip(self, cart))]
    pub async fn add_to_cart(&self, cart: &CartClient, id: String, units: u32) -> Result<CartSnapshot, CatalogError> {
        let product = self.get_product(id.clone())
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        if !product.is_available {
            return Err(CatalogError::Unavailable(id));
        }

        let item = CartProduct::from(&product);
        let mut snapshot = cart.snapshot().await.map_err(cart_error)?;
        for _ in 0..units {
            snapshot = cart.add_item(item.clone()).await.map_err(cart_error)?;
        }
        info!(units, total_items = snapshot.total_items, "Added to cart");
        Ok(snapshot)
    }
}

fn map_write_error(e: FrameworkError) -> CatalogError {
    match e {
        FrameworkError::NotFound(id) => CatalogError::NotFound(id),
        FrameworkError::Rejected(reason) => CatalogError::ValidationError(reason),
        other => CatalogError::ActorCommunicationError(other.to_string()),
    }
}

fn cart_error(e: CartError) -> CatalogError {
    CatalogError::ActorCommunicationError(e.to_string())
}
