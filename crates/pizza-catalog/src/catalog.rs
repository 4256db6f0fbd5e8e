use pizza_store::PizzaStore;
use pizza_types::{Pizza, PizzaDraft, PizzaId};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::error::{CatalogError, CatalogResult};

/// How mutating operations coordinate with each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// No coordination. Concurrent mutations may lose updates.
    #[default]
    Unguarded,
    /// One load-modify-save cycle at a time within this catalog. Other
    /// catalogs over the same store are not excluded.
    Serialized,
}

/// Confirmation returned by [`Catalog::delete`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deleted {
    pub id: PizzaId,
}

impl Deleted {
    pub fn message(&self) -> &'static str {
        "Pizza deleted successfully"
    }
}

/// The pizza collection, backed by an injected store.
pub struct Catalog<S> {
    store: S,
    mode: WriteMode,
    write_lock: Mutex<()>,
}

impl<S: PizzaStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self::with_mode(store, WriteMode::default())
    }

    pub fn with_mode(store: S, mode: WriteMode) -> Self {
        Self {
            store,
            mode,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    async fn write_guard(&self) -> Option<MutexGuard<'_, ()>> {
        match self.mode {
            WriteMode::Serialized => Some(self.write_lock.lock().await),
            WriteMode::Unguarded => None,
        }
    }

    /// Add a new pizza with the next free id.
    ///
    /// Fails with [`CatalogError::Conflict`] if any stored pizza already has
    /// the same name, compared case-insensitively, and with
    /// [`CatalogError::IdSpaceExhausted`] if the largest stored id is
    /// `u64::MAX`.
    pub async fn create(&self, draft: &PizzaDraft) -> CatalogResult<Pizza> {
        let valid = draft.validate()?;
        let _guard = self.write_guard().await;

        let mut pizzas = self.store.load().await?;
        if pizzas.iter().any(|p| p.has_name(&valid.name)) {
            warn!(name = %valid.name, "rejected duplicate pizza name");
            return Err(CatalogError::Conflict { name: valid.name });
        }

        let Some(next_id) = PizzaId::next_for(&pizzas) else {
            let max = pizzas.iter().map(|p| p.id).max().unwrap_or(PizzaId::FIRST);
            error!(max = %max, "cannot assign a pizza id past the largest stored id");
            return Err(CatalogError::IdSpaceExhausted(max));
        };
        let pizza = valid.into_pizza(next_id);
        pizzas.push(pizza.clone());
        self.store.save(&pizzas).await?;
        info!(id = %pizza.id, name = %pizza.name, "pizza created");
        Ok(pizza)
    }

    /// All pizzas in storage order, optionally restricted to names containing
    /// `name_filter` (case-insensitive, trimmed). An empty filter matches all.
    pub async fn list(&self, name_filter: Option<&str>) -> CatalogResult<Vec<Pizza>> {
        let pizzas = self.store.load().await?;
        let Some(filter) = name_filter.filter(|f| !f.is_empty()) else {
            return Ok(pizzas);
        };
        let needle = Pizza::normalize_filter(filter);
        let matched: Vec<Pizza> = pizzas
            .into_iter()
            .filter(|p| p.name_contains(&needle))
            .collect();
        debug!(filter = %needle, matched = matched.len(), "filtered pizzas by name");
        Ok(matched)
    }

    pub async fn get(&self, id: PizzaId) -> CatalogResult<Pizza> {
        self.store
            .load()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))
    }

    /// Replace the pizza at `id` wholesale with `draft`.
    ///
    /// The stored id is always `id`; any id in the draft is ignored. Name
    /// uniqueness is not re-checked.
    pub async fn update(&self, id: PizzaId, draft: &PizzaDraft) -> CatalogResult<Pizza> {
        let valid = draft.validate()?;
        let _guard = self.write_guard().await;

        let mut pizzas = self.store.load().await?;
        let slot = pizzas
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let pizza = valid.into_pizza(id);
        *slot = pizza.clone();

        self.store.save(&pizzas).await?;
        info!(id = %id, "pizza updated");
        Ok(pizza)
    }

    pub async fn delete(&self, id: PizzaId) -> CatalogResult<Deleted> {
        let _guard = self.write_guard().await;

        let mut pizzas = self.store.load().await?;
        let index = pizzas
            .iter()
            .position(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        pizzas.remove(index);

        self.store.save(&pizzas).await?;
        info!(id = %id, "pizza deleted");
        Ok(Deleted { id })
    }
}

impl<S> std::fmt::Debug for Catalog<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").field("mode", &self.mode).finish()
    }
}
