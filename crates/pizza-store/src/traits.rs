use async_trait::async_trait;
use pizza_types::Pizza;

use crate::error::StoreResult;

/// Whole-collection pizza storage.
///
/// All implementations must satisfy these invariants:
/// - `load` returns records in the order they were last saved.
/// - `save` replaces the entire collection. A failed save returns `Err`
///   and never reports success for a partial write.
/// - Nothing is cached: every `load` reflects the latest successful `save`.
#[async_trait]
pub trait PizzaStore: Send + Sync {
    /// Read the full persisted collection.
    ///
    /// Returns `Err` if the resource is unreadable or not a valid collection.
    async fn load(&self) -> StoreResult<Vec<Pizza>>;

    /// Durably overwrite the persisted collection with `pizzas`.
    async fn save(&self, pizzas: &[Pizza]) -> StoreResult<()>;
}
