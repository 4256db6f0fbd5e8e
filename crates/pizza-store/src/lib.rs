//! Whole-collection persistence for the pizza catalog.
//!
//! The store deals in complete collections only: `load` returns every
//! record, `save` replaces every record. There is no per-record access and
//! no caching between calls; callers load, mutate a local copy, and save.
//!
//! # Storage Backends
//!
//! All backends implement the [`PizzaStore`] trait:
//!
//! - [`JsonFileStore`] -- a single pretty-printed JSON array on disk
//! - [`InMemoryPizzaStore`] -- `Vec`-backed store for tests and embedding
//!
//! # Design Rules
//!
//! 1. A save either replaces the whole collection or fails; readers never
//!    observe a half-written file.
//! 2. All I/O and decode errors are propagated, never silently ignored.
//! 3. The store never validates records. Validation happens upstream.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::InMemoryPizzaStore;
pub use traits::PizzaStore;
