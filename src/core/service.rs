//! Service trait for item collections

use crate::core::entity::Entity;
use anyhow::Result;
use async_trait::async_trait;

/// Change applied to a stored record while the collection is locked.
///
/// `Ok(Some(next))` stores `next`, `Ok(None)` leaves the record as it is and
/// an error aborts without writing.
pub type Change<T> = Box<dyn FnOnce(&T) -> Result<Option<T>> + Send>;

/// Service trait for managing one item collection
///
/// This is the boundary standing in for the platform's data API. Screens and
/// handlers only talk to it through this trait; the storage mechanism behind
/// it is irrelevant to them. Collections keep their insertion order.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// List all items in collection order
    async fn list(&self) -> Result<Vec<T>>;

    /// Get an item by ID
    async fn get(&self, id: &str) -> Result<Option<T>>;

    /// Append a new item
    async fn create(&self, item: T) -> Result<T>;

    /// Replace an existing item with a new record
    async fn update(&self, id: &str, item: T) -> Result<T>;

    /// Read, check and replace the record `id` as one step, so no other
    /// write can land between the check and the store.
    ///
    /// Returns the stored record, or `None` when `id` is unknown or the
    /// change declined.
    async fn modify(&self, id: &str, change: Change<T>) -> Result<Option<T>>;

    /// Replace the whole collection (used after a bulk action)
    async fn replace_all(&self, items: Vec<T>) -> Result<()>;

    /// Items whose field equals `value` (e.g. all treks of one region)
    async fn list_by(&self, field: &str, value: &str) -> Result<Vec<T>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // The trait can be used in generic contexts
    #[allow(dead_code)]
    async fn generic_count<T, S>(service: &S) -> Result<usize>
    where
        T: Entity,
        S: DataService<T>,
    {
        Ok(service.list().await?.len())
    }

    #[test]
    fn test_traits_compile() {}
}
