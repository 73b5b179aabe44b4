use tracing::{debug, info, instrument};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::address_actor::AddressError;
use crate::domain::{Address, AddressCreate, AddressPatch};

/// Client for the customer address backend.
#[derive(Clone)]
pub struct AddressClient {
    inner: ResourceClient<Address>,
}

impl_basic_client!(AddressClient, Address, AddressError, address);

impl AddressClient {
    #[instrument(skip(self, address), fields(customer_id = %address.customer_id))]
    pub async fn create_address(&self, address: AddressCreate) -> Result<String, AddressError> {
        debug!("Sending request");
        let make_default = address.is_default;
        let customer_id = address.customer_id.clone();
        let id = self.inner.create(address).await.map_err(map_error)?;
        if make_default {
            self.clear_other_defaults(&customer_id, &id).await?;
        }
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_address(&self, id: String, patch: AddressPatch) -> Result<Address, AddressError> {
        debug!("Sending request");
        let make_default = patch.is_default == Some(true);
        let updated = self.inner.update(id, patch).await.map_err(map_error)?;
        if make_default {
            self.clear_other_defaults(&updated.customer_id, &updated.id).await?;
        }
        Ok(updated)
    }

    /// Makes `id` the customer's only default address.
    #[instrument(skip(self))]
    pub async fn set_default(&self, id: String) -> Result<Address, AddressError> {
        let patch = AddressPatch { is_default: Some(true), ..Default::default() };
        let updated = self.update_address(id, patch).await?;
        info!(address_id = %updated.id, "Default address changed");
        Ok(updated)
    }

    /// The customer's addresses, default first, then newest first.
    #[instrument(skip(self))]
    pub async fn list_for_customer(&self, customer_id: String) -> Result<Vec<Address>, AddressError> {
        debug!("Sending request");
        let mut addresses: Vec<Address> = self.inner
            .list()
            .await
            .map_err(map_error)?
            .into_iter()
            .filter(|a| a.customer_id == customer_id)
            .rev()
            .collect();
        addresses.sort_by_key(|a| !a.is_default);
        Ok(addresses)
    }

    /// Address preselected at checkout: the default one, else the first listed.
    #[instrument(skip(self))]
    pub async fn default_for_customer(&self, customer_id: String) -> Result<Option<Address>, AddressError> {
        Ok(self.list_for_customer(customer_id).await?.into_iter().next())
    }

    async fn clear_other_defaults(&self, customer_id: &str, keep_id: &str) -> Result<(), AddressError> {
        let others = self.list_for_customer(customer_id.to_string()).await?;
        for other in others.into_iter().filter(|a| a.is_default && a.id != keep_id) {
            let patch = AddressPatch { is_default: Some(false), ..Default::default() };
            self.inner.update(other.id, patch).await.map_err(map_error)?;
        }
        Ok(())
    }
}

fn map_error(e: FrameworkError) -> AddressError {
    match e {
        FrameworkError::NotFound(id) => AddressError::NotFound(id),
        FrameworkError::Rejected(reason) => AddressError::ValidationError(reason),
        other => AddressError::ActorCommunicationError(other.to_string()),
    }
}
