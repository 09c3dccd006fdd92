//! Product catalog entry.

use crate::{timestamp, validation::rules, Entity, ProductId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product catalog entry, served through the cache-aside accessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier.
    pub id: Option<ProductId>,

    /// Display name.
    #[validate(length(max = 255), custom(function = "rules::not_blank"))]
    pub name: String,

    /// Unit price.
    #[validate(range(min = 0.0))]
    pub price: f64,

    /// Last modification time.
    #[serde(default, with = "crate::timestamp")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Product {
    /// Creates a product that has not been persisted yet.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            updated_at: None,
        }
    }

    /// Applies a partial change, leaving absent fields untouched.
    ///
    /// Returns `true` when at least one field was supplied.
    pub fn apply_patch(&mut self, name: Option<String>, price: Option<f64>) -> bool {
        let mut touched = false;
        if let Some(name) = name {
            self.name = name;
            touched = true;
        }
        if let Some(price) = price {
            self.price = price;
            touched = true;
        }
        touched
    }
}

impl Entity for Product {
    type Id = ProductId;

    const RESOURCE: &'static str = "Product";
    const CACHE_PREFIX: &'static str = "product";

    fn id(&self) -> Option<ProductId> {
        self.id
    }

    fn mark_created(&mut self, now: NaiveDateTime) {
        self.updated_at = Some(now);
    }

    fn mark_updated(&mut self, now: NaiveDateTime) {
        self.updated_at = Some(timestamp::not_before(self.updated_at, now));
    }
}
