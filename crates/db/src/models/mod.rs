//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Nullable columns in update DTOs are `Option<Option<T>>`: an absent key
//! keeps the stored value, an explicit `null` clears it.

use serde::{Deserialize, Deserializer};

pub mod actor;
pub mod comment;
pub mod genre;
pub mod movie;

/// Deserialize a present key as `Some(value)`, including `Some(None)` for
/// `null`. Pair with `#[serde(default)]` so an absent key stays `None`.
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
