use crate::actor_framework::Entity;
use crate::domain::{Address, AddressCreate, AddressPatch};

impl Entity for Address {
    type Id = String;
    type CreatePayload = AddressCreate;
    type Patch = AddressPatch;

    const KIND: &'static str = "customer_addresses";

    fn id(&self) -> &String { &self.id }

    fn from_create(id: String, payload: AddressCreate) -> Result<Self, String> {
        for (field, value) in [
            ("address_line_1", &payload.address_line_1),
            ("city", &payload.city),
            ("postal_code", &payload.postal_code),
            ("contact_number", &payload.contact_number),
        ] {
            require(field, value)?;
        }
        Ok(Self {
            id,
            customer_id: payload.customer_id,
            address_line_1: payload.address_line_1,
            address_line_2: payload.address_line_2,
            city: payload.city,
            state: payload.state,
            postal_code: payload.postal_code,
            contact_number: payload.contact_number,
            is_default: payload.is_default,
        })
    }

    fn on_update(&mut self, patch: AddressPatch) -> Result<(), String> {
        if let Some(line) = patch.address_line_1 {
            require("address_line_1", &line)?;
            self.address_line_1 = line;
        }
        if let Some(line) = patch.address_line_2 {
            self.address_line_2 = line;
        }
        if let Some(city) = patch.city {
            require("city", &city)?;
            self.city = city;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if let Some(postal_code) = patch.postal_code {
            require("postal_code", &postal_code)?;
            self.postal_code = postal_code;
        }
        if let Some(contact_number) = patch.contact_number {
            require("contact_number", &contact_number)?;
            self.contact_number = contact_number;
        }
        if let Some(is_default) = patch.is_default {
            self.is_default = is_default;
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} must not be empty"))
    } else {
        Ok(())
    }
}
