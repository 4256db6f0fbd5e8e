use std::sync::RwLock;

use async_trait::async_trait;
use pizza_types::Pizza;

use crate::error::StoreResult;
use crate::traits::PizzaStore;

/// In-memory, `Vec`-based pizza store.
///
/// Intended for tests and embedding. The collection is cloned on every load
/// and replaced on every save, so callers see the same whole-collection
/// semantics as the file-backed store.
pub struct InMemoryPizzaStore {
    pizzas: RwLock<Vec<Pizza>>,
}

impl InMemoryPizzaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            pizzas: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-seeded with `pizzas`.
    pub fn with_pizzas(pizzas: Vec<Pizza>) -> Self {
        Self {
            pizzas: RwLock::new(pizzas),
        }
    }

    /// Copy of the current collection.
    pub fn snapshot(&self) -> Vec<Pizza> {
        self.pizzas.read().expect("lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.pizzas.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.pizzas.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryPizzaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PizzaStore for InMemoryPizzaStore {
    async fn load(&self) -> StoreResult<Vec<Pizza>> {
        Ok(self.snapshot())
    }

    async fn save(&self, pizzas: &[Pizza]) -> StoreResult<()> {
        *self.pizzas.write().expect("lock poisoned") = pizzas.to_vec();
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryPizzaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPizzaStore")
            .field("pizza_count", &self.len())
            .finish()
    }
}
