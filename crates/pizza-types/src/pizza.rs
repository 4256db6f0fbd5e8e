use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Store-assigned pizza identifier.
///
/// Ids start at 1 and are never reassigned to a different record while the
/// record exists. Serialized as a bare JSON integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PizzaId(u64);

impl PizzaId {
    /// The id handed out when the collection is empty.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw id. Returns `None` for 0, which is never assigned.
    pub fn new(raw: u64) -> Option<Self> {
        (raw >= 1).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` once `u64::MAX` is taken.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Parse an id from a URL path segment.
    ///
    /// Leading whitespace and an optional `+` are skipped, then the leading
    /// run of decimal digits is read and anything after it ignored, so
    /// `"12abc"` and `"12.5"` both name pizza 12. Segments without leading
    /// digits, negative numbers, 0, and values beyond `u64` yield `None`,
    /// which callers treat as "no such pizza".
    pub fn parse(segment: &str) -> Option<Self> {
        let rest = segment.trim_start();
        let rest = rest.strip_prefix('+').unwrap_or(rest);
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        rest[..end].parse::<u64>().ok().and_then(Self::new)
    }

    /// Next id for a collection: one past the largest id present, or
    /// [`PizzaId::FIRST`] for an empty collection. `None` when the largest
    /// id is already `u64::MAX`.
    pub fn next_for(pizzas: &[Pizza]) -> Option<Self> {
        match pizzas.iter().map(|p| p.id).max() {
            Some(max) => max.next(),
            None => Some(Self::FIRST),
        }
    }
}

impl std::fmt::Display for PizzaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted pizza record.
///
/// `toppings` entries and `price` are kept as the JSON values the client
/// sent, so a stored `9` stays `9` and a stored `"9.50"` stays a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pizza {
    pub id: PizzaId,
    pub name: String,
    pub toppings: Vec<Value>,
    pub price: Value,
}

impl Pizza {
    /// Case-insensitive name equality, used for the uniqueness check on create.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Case-insensitive substring match against an already-normalized needle.
    ///
    /// `needle` must be lowercase and trimmed; see [`Pizza::normalize_filter`].
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    /// Normalize a name filter: lowercase, then trim.
    pub fn normalize_filter(filter: &str) -> String {
        filter.to_lowercase().trim().to_string()
    }
}
