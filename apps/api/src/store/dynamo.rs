//! DynamoDB-backed `Table`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use tracing::error;

use super::{Item, StoreError, Table, PARTITION_KEY_ATTR};

#[derive(Clone)]
pub struct DynamoTable {
    client: Client,
}

impl DynamoTable {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn backend_error<E>(operation: &'static str, err: E) -> StoreError
where
    E: std::error::Error,
{
    let message = DisplayErrorContext(err).to_string();
    error!("DynamoDB {operation} failed: {message}");
    StoreError::Backend { operation, message }
}

/// `SET #a0 = :v0, #a1 = :v1, ...` plus its placeholder maps.
fn set_expression(
    attributes: Item,
) -> (String, HashMap<String, String>, HashMap<String, AttributeValue>) {
    let mut clauses = Vec::with_capacity(attributes.len());
    let mut names = HashMap::new();
    let mut values = HashMap::new();
    for (i, (name, value)) in attributes.into_iter().enumerate() {
        clauses.push(format!("#a{i} = :v{i}"));
        names.insert(format!("#a{i}"), name);
        values.insert(format!(":v{i}"), value);
    }
    (format!("SET {}", clauses.join(", ")), names, values)
}

#[async_trait]
impl Table for DynamoTable {
    async fn get_item(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| backend_error("fetch", e))?;
        Ok(output.item)
    }

    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| backend_error("save", e))?;
        Ok(())
    }

    async fn update_item(
        &self,
        table: &str,
        key: Item,
        attributes: Item,
    ) -> Result<Item, StoreError> {
        let mut request = self
            .client
            .update_item()
            .table_name(table)
            .set_key(Some(key))
            .return_values(ReturnValue::AllNew);

        if !attributes.is_empty() {
            let (expression, names, values) = set_expression(attributes);
            request = request
                .update_expression(expression)
                .set_expression_attribute_names(Some(names))
                .set_expression_attribute_values(Some(values));
        }

        let output = request
            .send()
            .await
            .map_err(|e| backend_error("update", e))?;
        Ok(output.attributes.unwrap_or_default())
    }

    async fn query_partition(
        &self,
        table: &str,
        partition_key: &str,
    ) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;
        loop {
            let output = self
                .client
                .query()
                .table_name(table)
                .key_condition_expression("#pk = :pk")
                .expression_attribute_names("#pk", PARTITION_KEY_ATTR)
                .expression_attribute_values(":pk", AttributeValue::S(partition_key.to_string()))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| backend_error("query", e))?;

            items.extend(output.items.unwrap_or_default());
            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }
        Ok(items)
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;
        loop {
            let output = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| backend_error("scan", e))?;

            items.extend(output.items.unwrap_or_default());
            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }
        Ok(items)
    }

    async fn delete_item(&self, table: &str, key: Item) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .delete_item()
            .table_name(table)
            .set_key(Some(key))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| backend_error("delete", e))?;
        Ok(output.attributes.filter(|item| !item.is_empty()))
    }
}
