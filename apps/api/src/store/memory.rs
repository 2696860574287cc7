//! In-memory `Table` used by tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{key_attr, Item, StoreError, Table, PARTITION_KEY_ATTR, SORT_KEY_ATTR};

type Partition = BTreeMap<String, Item>;

#[derive(Default)]
pub struct MemoryTable {
    tables: Mutex<HashMap<String, BTreeMap<String, Partition>>>,
    fail_writes: AtomicBool,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with a backend error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of items stored across every partition of `table`.
    pub fn len(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map(|partitions| partitions.values().map(BTreeMap::len).sum())
            .unwrap_or(0)
    }

    fn check_writable(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend {
                operation,
                message: "ProvisionedThroughputExceededException".to_string(),
            });
        }
        Ok(())
    }
}

fn split(key: &Item) -> Result<(String, String), StoreError> {
    match (
        key_attr(key, PARTITION_KEY_ATTR),
        key_attr(key, SORT_KEY_ATTR),
    ) {
        (Some(pk), Some(sk)) => Ok((pk.to_string(), sk.to_string())),
        _ => Err(StoreError::InvalidKey(
            "item has no string PK/SK".to_string(),
        )),
    }
}

#[async_trait]
impl Table for MemoryTable {
    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError> {
        let (pk, sk) = split(&key)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .and_then(|partitions| partitions.get(&pk))
            .and_then(|partition| partition.get(&sk))
            .cloned())
    }

    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreError> {
        self.check_writable("save")?;
        let (pk, sk) = split(&item)?;
        let mut tables = self.tables.lock().unwrap();
        tables
            .entry(table.to_string())
            .or_default()
            .entry(pk)
            .or_default()
            .insert(sk, item);
        Ok(())
    }

    async fn update_item(
        &self,
        table: &str,
        key: Item,
        attributes: Item,
    ) -> Result<Item, StoreError> {
        self.check_writable("update")?;
        let (pk, sk) = split(&key)?;
        let mut tables = self.tables.lock().unwrap();
        let stored = tables
            .entry(table.to_string())
            .or_default()
            .entry(pk)
            .or_default()
            .entry(sk)
            .or_insert(key);
        stored.extend(attributes);
        Ok(stored.clone())
    }

    async fn query_partition(
        &self,
        table: &str,
        partition_key: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .and_then(|partitions| partitions.get(partition_key))
            .map(|partition| partition.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(table)
            .map(|partitions| {
                partitions
                    .values()
                    .flat_map(|partition| partition.values().cloned())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete_item(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError> {
        self.check_writable("delete")?;
        let (pk, sk) = split(&key)?;
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .get_mut(table)
            .and_then(|partitions| partitions.get_mut(&pk))
            .and_then(|partition| partition.remove(&sk)))
    }
}
