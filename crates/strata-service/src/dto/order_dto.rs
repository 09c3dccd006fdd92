//! Order-related DTOs.

use serde::{Deserialize, Serialize};
use strata_core::validation::rules::not_blank;
use strata_core::{Order, OrderStatus};
use validator::Validate;

/// Request body for creating or replacing an order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[validate(custom(function = "not_blank", message = "Customer name is required"))]
    pub customer_name: String,

    #[validate(custom(function = "not_blank", message = "Product is required"))]
    pub product: String,

    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub quantity: i32,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    /// Defaults to `PENDING` on create and to the current status on update.
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

impl OrderRequest {
    /// Builds an order, falling back to `default_status` when none was sent.
    #[must_use]
    pub fn into_order(self, default_status: OrderStatus) -> Order {
        let mut order = Order::new(self.customer_name, self.product, self.quantity, self.price);
        order.status = self.status.unwrap_or(default_status);
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::ValidateExt;

    fn request() -> OrderRequest {
        OrderRequest {
            customer_name: "A".to_string(),
            product: "widget".to_string(),
            quantity: 2,
            price: 9.99,
            status: None,
        }
    }

    #[test]
    fn test_into_order_defaults_status() {
        let order = request().into_order(OrderStatus::Pending);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.id.is_none());

        let mut shipped = request();
        shipped.status = Some(OrderStatus::Shipped);
        assert_eq!(
            shipped.into_order(OrderStatus::Pending).status,
            OrderStatus::Shipped
        );
    }

    #[test]
    fn test_validation() {
        assert!(request().validate_request().is_ok());

        let mut blank = request();
        blank.customer_name = "  ".to_string();
        assert!(blank.validate_request().is_err());

        let mut zero = request();
        zero.quantity = 0;
        assert!(zero.validate_request().is_err());
    }

    #[test]
    fn test_status_parses_upper_snake_case() {
        let request: OrderRequest = serde_json::from_str(
            r#"{"customerName":"A","product":"widget","quantity":1,"price":1.0,"status":"CONFIRMED"}"#,
        )
        .unwrap();
        assert_eq!(request.status, Some(OrderStatus::Confirmed));
    }
}
