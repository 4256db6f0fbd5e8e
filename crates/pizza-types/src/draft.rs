use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::pizza::{Pizza, PizzaId};

/// A create/update request body before validation.
///
/// All fields are optional at the type level so that an absent or `null`
/// field surfaces as a [`ValidationError`] instead of a decode failure.
/// Any `id` in the body is accepted and ignored: the store assigns ids on
/// create and the path id wins on update.
///
/// Only the shape the record needs is enforced: `toppings` must be an array,
/// but its entries and `price` may be any JSON value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PizzaDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub toppings: Option<Vec<Value>>,
    /// `null` decodes to `None`.
    #[serde(default)]
    pub price: Option<Value>,
}

impl PizzaDraft {
    pub fn new(name: impl Into<String>, toppings: Vec<Value>, price: impl Into<Value>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            toppings: Some(toppings),
            price: Some(price.into()),
        }
    }

    /// Decode a request body.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        serde_json::from_slice(body).map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    /// Check required fields and return the validated payload.
    ///
    /// `name` must be a non-empty string, `toppings` must be present, and
    /// `price` must be present and not `null`.
    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let name = match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => return Err(ValidationError::MissingName),
        };
        let toppings = self
            .toppings
            .clone()
            .ok_or(ValidationError::MissingToppings)?;
        let price = match &self.price {
            Some(price) if !price.is_null() => price.clone(),
            _ => return Err(ValidationError::MissingPrice),
        };
        Ok(ValidDraft {
            name,
            toppings,
            price,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// A draft whose required fields are all present.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidDraft {
    pub name: String,
    pub toppings: Vec<Value>,
    pub price: Value,
}

impl ValidDraft {
    /// Attach an id, producing the record to persist.
    pub fn into_pizza(self, id: PizzaId) -> Pizza {
        Pizza {
            id,
            name: self.name,
            toppings: self.toppings,
            price: self.price,
        }
    }
}
