//! In-memory storage backend
//!
//! Same semantics as `PgStore`: cities are seeded at construction, ids
//! start at 1 and are never reused, listing is in id order. Failure
//! injection via [`MemoryStore::set_failing`] makes every call return a
//! backend error.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{Storage, StoreError};
use crate::models::{City, Employee, SEED_CITIES};

#[derive(Default)]
struct Tables {
    employees: BTreeMap<i32, Employee>,
    cities: Vec<City>,
    last_employee_id: i32,
}

/// Storage kept in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Store seeded with the standard cities.
    pub fn new() -> Self {
        let cities = SEED_CITIES
            .iter()
            .zip(1..)
            .map(|(name, id)| City {
                id,
                name: (*name).to_string(),
            })
            .collect();

        Self {
            tables: RwLock::new(Tables {
                cities,
                ..Tables::default()
            }),
            failing: AtomicBool::new(false),
        }
    }

    /// Store with no cities at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("memory store unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_employee(&self, employee: &Employee) -> Result<i32, StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        tables.last_employee_id += 1;
        let id = tables.last_employee_id;
        tables.employees.insert(
            id,
            Employee {
                id,
                ..employee.clone()
            },
        );
        Ok(id)
    }

    async fn get_employees(&self) -> Result<Vec<Employee>, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        Ok(tables.employees.values().cloned().collect())
    }

    async fn get_employee_by_id(&self, id: i32) -> Result<Employee, StoreError> {
        self.check()?;
        let tables = self.tables.read().await;
        tables
            .employees
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                resource: "employee",
                id,
            })
    }

    async fn delete_employee(&self, id: i32) -> Result<(), StoreError> {
        self.check()?;
        self.tables.write().await.employees.remove(&id);
        Ok(())
    }

    async fn update_employee(&self, employee: &Employee) -> Result<(), StoreError> {
        self.check()?;
        let mut tables = self.tables.write().await;
        match tables.employees.get_mut(&employee.id) {
            Some(existing) => {
                *existing = employee.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound {
                resource: "employee",
                id: employee.id,
            }),
        }
    }

    async fn get_cities(&self) -> Result<Vec<City>, StoreError> {
        self.check()?;
        Ok(self.tables.read().await.cities.clone())
    }

    async fn city_exists(&self, id: i32) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self.tables.read().await.cities.iter().any(|c| c.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_with_cities() {
        let store = MemoryStore::new();
        let cities = store.get_cities().await.unwrap();
        let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, SEED_CITIES);
        assert_eq!(cities[0].id, 1);
        assert!(store.city_exists(5).await.unwrap());
        assert!(!store.city_exists(6).await.unwrap());
    }

    #[tokio::test]
    async fn empty_lists_are_empty_not_errors() {
        let store = MemoryStore::empty();
        assert!(store.get_employees().await.unwrap().is_empty());
        assert!(store.get_cities().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_increase_and_are_not_reused() {
        let store = MemoryStore::new();
        let first = store
            .create_employee(&Employee::new("First", "11111111111", 1))
            .await
            .unwrap();
        let second = store
            .create_employee(&Employee::new("Second", "22222222222", 2))
            .await
            .unwrap();
        assert_eq!((first, second), (1, 2));

        store.delete_employee(second).await.unwrap();
        let third = store
            .create_employee(&Employee::new("Third", "33333333333", 3))
            .await
            .unwrap();
        assert_eq!(third, 3);

        let ids: Vec<i32> = store
            .get_employees()
            .await
            .unwrap()
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn missing_employee_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get_employee_by_id(9).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 9, .. }));

        let mut ghost = Employee::new("Ghost", "11111111111", 1);
        ghost.id = 9;
        let err = store.update_employee(&ghost).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 9, .. }));
    }

    #[tokio::test]
    async fn delete_missing_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete_employee(404).await.is_ok());
    }

    #[tokio::test]
    async fn failing_store_errors_everywhere() {
        let store = MemoryStore::new();
        store.set_failing(true);
        assert!(matches!(
            store.get_employees().await,
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(
            store.city_exists(1).await,
            Err(StoreError::Backend(_))
        ));

        store.set_failing(false);
        assert!(store.get_employees().await.is_ok());
    }
}
