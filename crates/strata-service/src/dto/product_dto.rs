//! Product-related DTOs.

use serde::{Deserialize, Serialize};
use strata_core::validation::rules::not_blank;
use strata_core::Product;
use validator::Validate;

/// Request to create a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(
        length(max = 255, message = "Name must be at most 255 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
}

impl From<CreateProductRequest> for Product {
    fn from(request: CreateProductRequest) -> Self {
        Product::new(request.name, request.price)
    }
}

/// Partial product update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(
        length(max = 255, message = "Name must be at most 255 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: Option<String>,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,
}

impl UpdateProductRequest {
    /// Returns `true` if no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }
}
