use crate::common;
use crate::error::{Error, Result};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// A single request within a batch write operation.
///
/// Each request either puts (creates or replaces) an item or deletes one by
/// its primary key. Batch writes carry no condition expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum BatchWriteItemRequest {
    /// Delete item request - removes an item by its primary key.
    DeleteItem {
        /// The primary key of the item to delete.
        keys: common::key::Keys,
    },
    /// Put item request - creates or replaces an item.
    PutItem {
        /// The item to put into the table, as raw attribute values.
        item: collections::HashMap<String, types::AttributeValue>,
    },
}

impl BatchWriteItemRequest {
    /// Build a put request, serializing the item.
    pub fn put(item: impl Serialize) -> Result<Self> {
        Ok(Self::PutItem {
            item: to_item(item)?,
        })
    }

    /// Build a delete request.
    pub fn delete(keys: common::key::Keys) -> Self {
        Self::DeleteItem { keys }
    }
}

impl TryFrom<BatchWriteItemRequest> for types::WriteRequest {
    type Error = Error;

    fn try_from(write_request: BatchWriteItemRequest) -> Result<Self> {
        let builder = match write_request {
            BatchWriteItemRequest::DeleteItem { keys } => {
                let keys = keys.try_into()?;
                let delete_request = types::DeleteRequest::builder()
                    .set_key(Some(keys))
                    .build()
                    .unwrap();
                Self::builder().set_delete_request(Some(delete_request))
            }
            BatchWriteItemRequest::PutItem { item } => {
                let put_request = types::PutRequest::builder()
                    .set_item(Some(item))
                    .build()
                    .unwrap();
                Self::builder().set_put_request(Some(put_request))
            }
        };
        Ok(builder.build())
    }
}

/// Batch write item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_fluent::write;
/// use std::collections::HashMap;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let batch_write = write::batch_write_item::BatchWriteItem {
///     request_items: HashMap::from([(
///         "users".to_string(),
///         vec![
///             write::batch_write_item::BatchWriteItemRequest::put(
///                 serde_json::json!({"userId": "1", "name": "John"}),
///             )?,
///         ],
///     )]),
///     ..Default::default()
/// };
/// batch_write.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchWriteItem {
    /// A map of table names to lists of write requests.
    pub request_items: collections::HashMap<String, Vec<BatchWriteItemRequest>>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to return item collection metrics.
    pub return_item_collection_metrics: Option<types::ReturnItemCollectionMetrics>,
}

impl TryFrom<BatchWriteItem> for operation::batch_write_item::BatchWriteItemInput {
    type Error = Error;

    fn try_from(batch_write_item: BatchWriteItem) -> Result<Self> {
        if batch_write_item.request_items.is_empty() {
            return Err(Error::EmptyKeys {
                context: "batch write has no request items".to_string(),
            });
        }
        let mut request_items =
            collections::HashMap::with_capacity(batch_write_item.request_items.len());
        for (table_name, table_request_items) in batch_write_item.request_items {
            if table_request_items.is_empty() {
                return Err(Error::EmptyKeys {
                    context: format!("batch write for table `{table_name}` has no requests"),
                });
            }
            let mut serialized_table_request_items =
                Vec::with_capacity(table_request_items.len());
            for request_item in table_request_items {
                let request_item = request_item.try_into()?;
                serialized_table_request_items.push(request_item);
            }
            request_items.insert(table_name, serialized_table_request_items);
        }
        let input = Self::builder()
            .set_request_items(Some(request_items))
            .set_return_consumed_capacity(batch_write_item.return_consumed_capacity)
            .set_return_item_collection_metrics(batch_write_item.return_item_collection_metrics)
            .build()
            .unwrap();
        Ok(input)
    }
}

impl BatchWriteItem {
    /// Execute the batch write item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::batch_write_item::BatchWriteItemOutput,
        error::SdkError<operation::batch_write_item::BatchWriteItemError>,
    > {
        let batch_write_item: operation::batch_write_item::BatchWriteItemInput =
            self.try_into().map_err(error::BuildError::other)?;
        client
            .batch_write_item()
            .set_request_items(batch_write_item.request_items)
            .set_return_consumed_capacity(batch_write_item.return_consumed_capacity)
            .set_return_item_collection_metrics(batch_write_item.return_item_collection_metrics)
            .send()
            .await
    }
}
