/// Image shown for catalog items that have no picture of their own.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A dish listed in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
    pub cuisine_id: Option<String>,
    pub is_available: bool,
}

/// Payload for adding a dish to the catalog.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
    pub cuisine_id: Option<String>,
    pub is_available: bool,
}

/// Payload for editing a catalog entry.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub price: Option<f64>,
    pub is_available: Option<bool>,
}

impl ProductCreate {
    /// Minimal available dish; optional fields can be filled in afterwards.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            image_url: None,
            category_id: None,
            cuisine_id: None,
            is_available: true,
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_cuisine(mut self, cuisine_id: impl Into<String>) -> Self {
        self.cuisine_id = Some(cuisine_id.into());
        self
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }
}

impl Product {
    /// Image reference to display, falling back to [`PLACEHOLDER_IMAGE`].
    pub fn image_ref(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}
