use thiserror::Error;

/// Reasons a request body is rejected before it reaches the store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: name")]
    MissingName,

    #[error("missing required field: toppings")]
    MissingToppings,

    #[error("missing required field: price")]
    MissingPrice,

    /// The body is not a JSON object or a field has the wrong JSON type.
    #[error("malformed pizza body: {0}")]
    Malformed(String),
}
