//! Record types for the pizza catalog.
//!
//! Every other crate in the workspace depends on `pizza-types`.
//!
//! # Key Types
//!
//! - [`Pizza`] — A persisted record: id, name, toppings, price
//! - [`PizzaId`] — Store-assigned identifier, always `>= 1`
//! - [`PizzaDraft`] — The body of a create/update request, before validation
//! - [`ValidDraft`] — A draft that passed validation and can become a [`Pizza`]

pub mod draft;
pub mod error;
pub mod pizza;

pub use draft::{PizzaDraft, ValidDraft};
pub use error::ValidationError;
pub use pizza::{Pizza, PizzaId};
