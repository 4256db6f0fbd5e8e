//! Collection operations for the pizza catalog.
//!
//! A [`Catalog`] wraps an injected [`PizzaStore`](pizza_store::PizzaStore)
//! and implements create, list, get, update and delete as whole-collection
//! read-modify-write cycles.
//!
//! # Consistency
//!
//! Every operation loads the full collection fresh from the store. Mutating
//! operations then save the full collection back. Under
//! [`WriteMode::Unguarded`] two concurrent mutations may both load the same
//! collection and the later save silently discards the earlier change (a
//! lost update). [`WriteMode::Serialized`] holds an async lock owned by the
//! `Catalog` across each load-modify-save cycle, which rules that out for
//! writes going through that catalog. Separate catalogs, or separate
//! processes, over the same file are not coordinated and can still race.

pub mod catalog;
pub mod error;

pub use catalog::{Catalog, Deleted, WriteMode};
pub use error::{CatalogError, CatalogResult};
