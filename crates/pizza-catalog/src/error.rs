use pizza_types::{PizzaId, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid pizza: {0}")]
    Validation(#[from] ValidationError),

    #[error("a pizza named {name:?} already exists")]
    Conflict { name: String },

    #[error("pizza not found: {0}")]
    NotFound(PizzaId),

    /// The largest stored id is `u64::MAX`; no further id can be assigned.
    #[error("no pizza id left after {0}")]
    IdSpaceExhausted(PizzaId),

    #[error("storage error: {0}")]
    Storage(#[from] pizza_store::StoreError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
