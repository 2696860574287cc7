//! Generic single-table persistence.
//!
//! `Store<T>` gives every entity type the same five verbs over one physical table.
//! Feature modules build keys with `crate::keys` and never talk to the table
//! directly. The table itself sits behind the `Table` trait so tests can swap in
//! an in-memory double.
//!
//! Writes are never retried here; a rejected write surfaces to the caller as
//! `StoreError::Backend`.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::TableConfig;
use crate::keys;

pub mod codec;
pub mod dynamo;
#[cfg(test)]
pub mod memory;

pub use dynamo::DynamoTable;

/// Physical attribute holding the partition key. Entities call it `pk`; see `codec`.
pub const PARTITION_KEY_ATTR: &str = "PK";
/// Physical attribute holding the sort key.
pub const SORT_KEY_ATTR: &str = "SK";

/// A raw table item.
pub type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing TABLE_NAME: a store cannot be bound to an empty table name")]
    MissingTableName,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Item encoding error: {0}")]
    Codec(String),

    #[error("Database error: could not {operation} item(s): {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

/// The physical table handle. Implementations do no retries and no caching.
#[async_trait]
pub trait Table: Send + Sync {
    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError>;

    /// Full-item upsert.
    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreError>;

    /// Sets every attribute in `attributes` on the item at `key`, creating it if needed,
    /// and returns the whole item after the update.
    async fn update_item(
        &self,
        table: &str,
        key: Item,
        attributes: Item,
    ) -> Result<Item, StoreError>;

    /// Every item whose partition key equals `partition_key`, across all pages.
    async fn query_partition(
        &self,
        table: &str,
        partition_key: &str,
    ) -> Result<Vec<Item>, StoreError>;

    /// Every item in the table, across all pages.
    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError>;

    /// Removes the item at `key`, returning what was there.
    async fn delete_item(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError>;
}

/// Builds the `(PK, SK)` key map.
pub fn key_item(partition_key: &str, sort_key: &str) -> Item {
    HashMap::from([
        (
            PARTITION_KEY_ATTR.to_string(),
            AttributeValue::S(partition_key.to_string()),
        ),
        (
            SORT_KEY_ATTR.to_string(),
            AttributeValue::S(sort_key.to_string()),
        ),
    ])
}

/// Reads a string key attribute off a raw item.
pub fn key_attr<'a>(item: &'a Item, name: &str) -> Option<&'a str> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(String::as_str)
}

fn require_keys(partition_key: &str, sort_key: &str) -> Result<(), StoreError> {
    if partition_key.is_empty() || sort_key.is_empty() {
        return Err(StoreError::InvalidKey(format!(
            "both keys are required (PK: '{partition_key}', SK: '{sort_key}')"
        )));
    }
    Ok(())
}

/// Splits an encoded entity into its key and its remaining attributes.
fn split_key(mut item: Item) -> Result<(Item, Item), StoreError> {
    let partition_key = item.remove(PARTITION_KEY_ATTR);
    let sort_key = item.remove(SORT_KEY_ATTR);
    match (partition_key, sort_key) {
        (Some(AttributeValue::S(pk)), Some(AttributeValue::S(sk)))
            if !pk.is_empty() && !sk.is_empty() =>
        {
            Ok((key_item(&pk, &sk), item))
        }
        _ => Err(StoreError::InvalidKey(
            "entity is missing a non-empty PK or SK".to_string(),
        )),
    }
}

/// CRUD over one entity type. Cheap to clone; all clones share the table handle.
pub struct Store<T> {
    table: Arc<dyn Table>,
    table_name: String,
    entity: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            table_name: self.table_name.clone(),
            entity: self.entity,
            _entity: PhantomData,
        }
    }
}

impl<T> Store<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    /// Binds a store to the configured table. Fails if the table name is empty.
    pub fn new(config: &TableConfig, table: Arc<dyn Table>) -> Result<Self, StoreError> {
        if config.table_name.trim().is_empty() {
            tracing::error!("TABLE_NAME is not configured; refusing to build store");
            return Err(StoreError::MissingTableName);
        }
        let entity = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("entity");
        info!(
            "Initialized store for {} on table {}",
            entity, config.table_name
        );
        Ok(Self {
            table,
            table_name: config.table_name.clone(),
            entity,
            _entity: PhantomData,
        })
    }

    /// Absence is `Ok(None)`, not an error.
    pub async fn get(&self, partition_key: &str, sort_key: &str) -> Result<Option<T>, StoreError> {
        require_keys(partition_key, sort_key)?;
        debug!("Fetching {} PK={} SK={}", self.entity, partition_key, sort_key);

        let item = self
            .table
            .get_item(&self.table_name, key_item(partition_key, sort_key))
            .await?;

        match item {
            Some(item) => Ok(Some(codec::from_item(item)?)),
            None => {
                debug!("No {} at PK={} SK={}", self.entity, partition_key, sort_key);
                Ok(None)
            }
        }
    }

    /// Full replacement of whatever sits at the entity's key pair.
    pub async fn put(&self, entity: &T) -> Result<(), StoreError> {
        let item = codec::to_item(entity)?;
        let (key, _) = split_key(item.clone())?;
        debug!(
            "Saving {} PK={:?} SK={:?}",
            self.entity,
            key_attr(&key, PARTITION_KEY_ATTR),
            key_attr(&key, SORT_KEY_ATTR)
        );

        self.table.put_item(&self.table_name, item).await?;
        info!("Saved {} to {}", self.entity, self.table_name);
        Ok(())
    }

    /// Attribute-level merge: attributes present on `entity` overwrite, others are kept.
    /// Returns the item as stored after the merge.
    #[allow(dead_code)] // feature modules merge in memory and `put`
    pub async fn update_merge(&self, entity: &T) -> Result<T, StoreError> {
        let (key, attributes) = split_key(codec::to_item(entity)?)?;

        let merged = self
            .table
            .update_item(&self.table_name, key, attributes)
            .await?;
        info!("Merged update into {} on {}", self.entity, self.table_name);
        codec::from_item(merged)
    }

    /// All items in one partition, in no particular order. Empty when there are none.
    pub async fn query_by_partition(&self, partition_key: &str) -> Result<Vec<T>, StoreError> {
        let items = self.query_raw(partition_key).await?;
        items.into_iter().map(codec::from_item).collect()
    }

    /// The items of one kind inside a shared partition, selected by sort-key prefix
    /// before decoding so sibling records of other kinds are never decoded as `T`.
    pub async fn query_kind(&self, partition_key: &str, kind: &str) -> Result<Vec<T>, StoreError> {
        let items = self.query_raw(partition_key).await?;
        items
            .into_iter()
            .filter(|item| {
                key_attr(item, SORT_KEY_ATTR).is_some_and(|sk| keys::has_prefix(sk, kind))
            })
            .map(codec::from_item)
            .collect()
    }

    /// Full-table scan. Cost grows with the whole table: keep to small reference data
    /// or diagnostics.
    #[allow(dead_code)] // no route scans today
    pub async fn scan_all(&self) -> Result<Vec<T>, StoreError> {
        warn!(
            "PERFORMANCE WARNING: full table scan on {} for {}",
            self.table_name, self.entity
        );
        let items = self.table.scan(&self.table_name).await?;
        items.into_iter().map(codec::from_item).collect()
    }

    /// Deletes the item, returning the prior value if there was one.
    pub async fn delete(&self, partition_key: &str, sort_key: &str) -> Result<Option<T>, StoreError> {
        require_keys(partition_key, sort_key)?;
        info!("Deleting {} PK={} SK={}", self.entity, partition_key, sort_key);

        let previous = self
            .table
            .delete_item(&self.table_name, key_item(partition_key, sort_key))
            .await?;
        previous.map(codec::from_item).transpose()
    }

    async fn query_raw(&self, partition_key: &str) -> Result<Vec<Item>, StoreError> {
        if partition_key.is_empty() {
            return Err(StoreError::InvalidKey(
                "partition key is required".to_string(),
            ));
        }
        let items = self
            .table
            .query_partition(&self.table_name, partition_key)
            .await?;
        debug!("Found {} items for PK={}", items.len(), partition_key);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryTable;
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        pk: String,
        sk: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pinned: Option<bool>,
    }

    fn note(pk: &str, sk: &str, text: &str) -> Note {
        Note {
            pk: pk.to_string(),
            sk: sk.to_string(),
            text: Some(text.to_string()),
            pinned: None,
        }
    }

    fn store() -> (Store<Note>, Arc<MemoryTable>) {
        let table = Arc::new(MemoryTable::new());
        let config = TableConfig {
            table_name: "coach-test".to_string(),
        };
        (Store::new(&config, table.clone()).unwrap(), table)
    }

    #[test]
    fn test_new_rejects_empty_table_name() {
        let config = TableConfig {
            table_name: "  ".to_string(),
        };
        let result = Store::<Note>::new(&config, Arc::new(MemoryTable::new()));
        assert!(matches!(result, Err(StoreError::MissingTableName)));
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let (store, _) = store();
        let item = note("USER#a", "LETTER#1", "hello");
        store.put(&item).await.unwrap();

        let fetched = store.get("USER#a", "LETTER#1").await.unwrap();
        assert_eq!(fetched, Some(item));
    }

    #[tokio::test]
    async fn test_get_absent_is_none_not_error() {
        let (store, _) = store();
        assert_eq!(store.get("USER#nobody", "METADATA").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_get_rejects_empty_key() {
        let (store, _) = store();
        let err = store.get("", "METADATA").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_put_fully_replaces_existing_item() {
        let (store, _) = store();
        let mut first = note("USER#a", "RESUME", "v1");
        first.pinned = Some(true);
        store.put(&first).await.unwrap();

        store.put(&note("USER#a", "RESUME", "v2")).await.unwrap();

        let fetched = store.get("USER#a", "RESUME").await.unwrap().unwrap();
        assert_eq!(fetched.text.as_deref(), Some("v2"));
        assert_eq!(fetched.pinned, None);
    }

    #[tokio::test]
    async fn test_put_rejects_entity_without_keys() {
        let (store, _) = store();
        let err = store.put(&note("", "RESUME", "x")).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_put_surfaces_backend_failure() {
        let (store, table) = store();
        table.fail_writes(true);
        let err = store.put(&note("USER#a", "RESUME", "x")).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend { .. }));
    }

    #[tokio::test]
    async fn test_update_merge_keeps_untouched_attributes() {
        let (store, _) = store();
        let mut original = note("USER#a", "METADATA", "bio");
        original.pinned = Some(true);
        store.put(&original).await.unwrap();

        let patch = note("USER#a", "METADATA", "new bio");
        let merged = store.update_merge(&patch).await.unwrap();

        assert_eq!(merged.text.as_deref(), Some("new bio"));
        assert_eq!(merged.pinned, Some(true));
        assert_eq!(store.get("USER#a", "METADATA").await.unwrap(), Some(merged));
    }

    #[tokio::test]
    async fn test_query_by_partition_returns_only_that_partition() {
        let (store, _) = store();
        store.put(&note("USER#a", "LETTER#1", "a1")).await.unwrap();
        store.put(&note("USER#a", "LETTER#2", "a2")).await.unwrap();
        store.put(&note("USER#b", "LETTER#3", "b1")).await.unwrap();

        let mut texts: Vec<String> = store
            .query_by_partition("USER#a")
            .await
            .unwrap()
            .into_iter()
            .filter_map(|n| n.text)
            .collect();
        texts.sort();
        assert_eq!(texts, vec!["a1", "a2"]);

        assert!(store.query_by_partition("USER#empty").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_kind_filters_by_sort_key_prefix() {
        let (store, _) = store();
        store.put(&note("USER#a", "METADATA", "profile")).await.unwrap();
        store.put(&note("USER#a", "LETTER#1", "letter")).await.unwrap();
        store.put(&note("USER#a", "ASSESS#1", "quiz")).await.unwrap();

        let letters = store.query_kind("USER#a", keys::LETTER_KIND).await.unwrap();
        assert_eq!(letters.len(), 1);
        assert_eq!(letters[0].sk, "LETTER#1");
    }

    #[tokio::test]
    async fn test_scan_all_sees_every_partition() {
        let (store, _) = store();
        store.put(&note("INDUSTRY#a", "METADATA", "a")).await.unwrap();
        store.put(&note("INDUSTRY#b", "METADATA", "b")).await.unwrap();
        assert_eq!(store.scan_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_returns_prior_value_then_absent() {
        let (store, _) = store();
        let item = note("USER#a", "LETTER#1", "bye");
        store.put(&item).await.unwrap();

        assert_eq!(store.delete("USER#a", "LETTER#1").await.unwrap(), Some(item));
        assert_eq!(store.delete("USER#a", "LETTER#1").await.unwrap(), None);
        assert_eq!(store.get("USER#a", "LETTER#1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_puts_last_write_wins() {
        let (store, _) = store();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .put(&note("USER#a", "RESUME", &format!("v{i}")))
                        .await
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = store.get("USER#a", "RESUME").await.unwrap().unwrap();
        let text = stored.text.unwrap();
        assert!(text.starts_with('v') && text[1..].parse::<u32>().unwrap() < 8);
        assert_eq!(store.query_by_partition("USER#a").await.unwrap().len(), 1);
    }
}
