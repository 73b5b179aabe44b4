/// A delivery address saved by a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: String,
    pub customer_id: String,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub contact_number: String,
    pub is_default: bool,
}

/// Payload for saving a new address.
#[derive(Debug, Clone)]
pub struct AddressCreate {
    pub customer_id: String,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub contact_number: String,
    pub is_default: bool,
}

/// Payload for editing an address. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct AddressPatch {
    pub address_line_1: Option<String>,
    pub address_line_2: Option<Option<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub contact_number: Option<String>,
    pub is_default: Option<bool>,
}

impl AddressCreate {
    pub fn new(
        customer_id: impl Into<String>,
        address_line_1: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        postal_code: impl Into<String>,
        contact_number: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            address_line_1: address_line_1.into(),
            address_line_2: None,
            city: city.into(),
            state: state.into(),
            postal_code: postal_code.into(),
            contact_number: contact_number.into(),
            is_default: false,
        }
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }
}
