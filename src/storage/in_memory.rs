//! In-memory implementation of DataService for the seeded mock datasets

use crate::core::service::Change;
use crate::core::{DataService, Entity};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// In-memory data service implementation
///
/// Keeps items in insertion order so derivations over it are deterministic.
/// An optional latency simulates the network round trip of a real backend.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    items: Arc<RwLock<Vec<T>>>,
    latency: Duration,
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create an empty service
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Create a service over an existing collection
    pub fn seeded(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn list(&self) -> Result<Vec<T>> {
        self.simulate_latency().await;
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<T>> {
        self.simulate_latency().await;
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.iter().find(|item| item.id() == id).cloned())
    }

    async fn create(&self, item: T) -> Result<T> {
        self.simulate_latency().await;
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if items.iter().any(|existing| existing.id() == item.id()) {
            return Err(anyhow!(
                "{} with id '{}' already exists",
                T::resource_name_singular(),
                item.id()
            ));
        }
        items.push(item.clone());

        Ok(item)
    }

    async fn update(&self, id: &str, item: T) -> Result<T> {
        self.simulate_latency().await;
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = items
            .iter_mut()
            .find(|existing| existing.id() == id)
            .ok_or_else(|| anyhow!("{} with id '{}' not found", T::resource_name_singular(), id))?;
        *slot = item.clone();

        Ok(item)
    }

    async fn modify(&self, id: &str, change: Change<T>) -> Result<Option<T>> {
        self.simulate_latency().await;
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let Some(slot) = items.iter_mut().find(|existing| existing.id() == id) else {
            return Ok(None);
        };
        let next = change(&*slot)?;
        if let Some(next) = &next {
            *slot = next.clone();
        }

        Ok(next)
    }

    async fn replace_all(&self, replacement: Vec<T>) -> Result<()> {
        self.simulate_latency().await;
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        *items = replacement;

        Ok(())
    }

    async fn list_by(&self, field: &str, value: &str) -> Result<Vec<T>> {
        self.simulate_latency().await;
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items
            .iter()
            .filter(|item| {
                item.field_value(field)
                    .is_some_and(|v| v.categories().iter().any(|c| c.eq_ignore_ascii_case(value)))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::seed;
    use crate::entities::trek::Trek;

    fn service() -> InMemoryDataService<Trek> {
        InMemoryDataService::seeded(seed::treks())
    }

    #[tokio::test]
    async fn test_list_keeps_seed_order() {
        let service = service();
        let listed = service.list().await.unwrap();
        let ids: Vec<_> = listed.iter().map(|t| t.id.clone()).collect();
        let seeded: Vec<_> = seed::treks().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, seeded);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let service = service();
        let trek = service.get("everest-base-camp").await.unwrap();
        assert!(trek.is_some());
        assert!(service.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let service = service();
        let existing = service.get("everest-base-camp").await.unwrap().unwrap();
        assert!(service.create(existing).await.is_err());
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let service = service();
        let mut trek = service.get("poon-hill").await.unwrap().unwrap();
        trek.featured = !trek.featured;
        service.update("poon-hill", trek.clone()).await.unwrap();

        let stored = service.get("poon-hill").await.unwrap().unwrap();
        assert_eq!(stored.featured, trek.featured);
        assert!(service.update("missing", trek).await.is_err());
    }

    #[tokio::test]
    async fn test_modify_checks_the_stored_record() {
        let service = service();

        let toggled = service
            .modify(
                "poon-hill",
                Box::new(|trek: &Trek| -> Result<Option<Trek>> {
                    Ok(Some(Trek {
                        featured: !trek.featured,
                        ..trek.clone()
                    }))
                }),
            )
            .await
            .unwrap()
            .unwrap();
        let stored = service.get("poon-hill").await.unwrap().unwrap();
        assert_eq!(stored, toggled);

        let declined = service
            .modify("poon-hill", Box::new(|_: &Trek| -> Result<Option<Trek>> { Ok(None) }))
            .await
            .unwrap();
        assert!(declined.is_none());
        assert_eq!(service.get("poon-hill").await.unwrap().unwrap(), toggled);

        assert!(
            service
                .modify(
                    "poon-hill",
                    Box::new(|_: &Trek| -> Result<Option<Trek>> { Err(anyhow!("refused")) })
                )
                .await
                .is_err()
        );
        assert!(
            service
                .modify(
                    "missing",
                    Box::new(|trek: &Trek| -> Result<Option<Trek>> { Ok(Some(trek.clone())) })
                )
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_by_region() {
        let service = service();
        let khumbu = service.list_by("region", "khumbu").await.unwrap();
        assert!(!khumbu.is_empty());
        assert!(khumbu.iter().all(|t| t.region == "Khumbu"));
    }

    #[tokio::test]
    async fn test_replace_all() {
        let service = service();
        service.replace_all(Vec::new()).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
    }
}
