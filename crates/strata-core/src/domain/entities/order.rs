//! Order record.

use crate::{timestamp, validation::rules, Entity, OrderId, OrderStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An order record, served through the write-through accessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store-assigned identifier.
    pub id: Option<OrderId>,

    /// Customer who placed the order.
    #[validate(custom(function = "rules::not_blank"))]
    pub customer_name: String,

    /// Ordered product name.
    #[validate(custom(function = "rules::not_blank"))]
    pub product: String,

    /// Number of units.
    #[validate(range(min = 1))]
    pub quantity: i32,

    /// Total price.
    #[validate(range(min = 0.0))]
    pub price: f64,

    /// Lifecycle status.
    #[serde(default)]
    pub status: OrderStatus,

    /// Creation time, never changed after insert.
    #[serde(default, with = "crate::timestamp")]
    pub created_at: Option<NaiveDateTime>,

    /// Last modification time.
    #[serde(default, with = "crate::timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Order {
    /// Creates a pending order that has not been persisted yet.
    #[must_use]
    pub fn new(
        customer_name: impl Into<String>,
        product: impl Into<String>,
        quantity: i32,
        price: f64,
    ) -> Self {
        Self {
            id: None,
            customer_name: customer_name.into(),
            product: product.into(),
            quantity,
            price,
            status: OrderStatus::Pending,
            created_at: None,
            updated_at: None,
        }
    }

    /// Overwrites every mutable field from `incoming`.
    ///
    /// The id and both timestamps are kept; the caller refreshes `updated_at`.
    pub fn overwrite_from(&mut self, incoming: Order) {
        self.customer_name = incoming.customer_name;
        self.product = incoming.product;
        self.quantity = incoming.quantity;
        self.price = incoming.price;
        self.status = incoming.status;
    }
}

impl Entity for Order {
    type Id = OrderId;

    const RESOURCE: &'static str = "Order";
    const CACHE_PREFIX: &'static str = "order";

    fn id(&self) -> Option<OrderId> {
        self.id
    }

    fn mark_created(&mut self, now: NaiveDateTime) {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }

    fn mark_updated(&mut self, now: NaiveDateTime) {
        self.updated_at = Some(timestamp::not_before(self.updated_at, now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_is_pending() {
        let order = Order::new("A", "widget", 2, 9.99);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.id.is_none());
    }

    #[test]
    fn test_mark_created_sets_equal_timestamps() {
        let mut order = Order::new("A", "widget", 2, 9.99);
        let now = timestamp::now();
        order.mark_created(now);
        assert_eq!(order.created_at, Some(now));
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn test_overwrite_keeps_identity_and_creation_time() {
        let now = timestamp::now();
        let mut existing = Order::new("A", "widget", 2, 9.99);
        existing.id = Some(OrderId::new(3));
        existing.mark_created(now);

        let mut incoming = Order::new("B", "gadget", 5, 20.0);
        incoming.status = OrderStatus::Shipped;
        incoming.id = Some(OrderId::new(99));
        existing.overwrite_from(incoming);

        assert_eq!(existing.id, Some(OrderId::new(3)));
        assert_eq!(existing.created_at, Some(now));
        assert_eq!(existing.customer_name, "B");
        assert_eq!(existing.product, "gadget");
        assert_eq!(existing.quantity, 5);
        assert_eq!(existing.status, OrderStatus::Shipped);
    }

    #[test]
    fn test_validation_rules() {
        assert!(Order::new("A", "widget", 2, 9.99).validate().is_ok());
        assert!(Order::new("  ", "widget", 2, 9.99).validate().is_err());
        assert!(Order::new("A", "", 2, 9.99).validate().is_err());
        assert!(Order::new("A", "widget", 0, 9.99).validate().is_err());
        assert!(Order::new("A", "widget", 1, -0.01).validate().is_err());
    }

    #[test]
    fn test_missing_status_defaults_to_pending() {
        let order: Order = serde_json::from_str(
            r#"{"id":null,"customerName":"A","product":"widget","quantity":2,"price":9.99}"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.created_at.is_none());
    }

    #[test]
    fn test_wire_form_uses_camel_case_keys() {
        let json = serde_json::to_value(Order::new("A", "widget", 2, 9.99)).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(json["customerName"], "A");
        assert!(object.contains_key("createdAt"));
        assert!(object.contains_key("updatedAt"));
        assert!(!object.contains_key("customer_name"));
    }
}
