use crate::error::{Error, Result};
use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation, types};
use indexmap::IndexMap;
use std::collections;

/// Batch get item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_fluent::{common, read};
/// use indexmap::IndexMap;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let batch_get = read::batch_get_item::BatchGetItem {
///     items: IndexMap::from([(
///         read::common::SingleReadArgs {
///             table_name: "users".to_string(),
///             ..Default::default()
///         },
///         vec![
///             common::key::Keys::partition("userId", "1")?,
///             common::key::Keys::partition("userId", "2")?,
///         ],
///     )]),
///     ..Default::default()
/// };
/// batch_get.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchGetItem {
    /// A map of read arguments to lists of keys to retrieve.
    pub items: IndexMap<read::common::SingleReadArgs, Vec<common::key::Keys>>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
}

impl TryFrom<BatchGetItem> for operation::batch_get_item::BatchGetItemInput {
    type Error = Error;

    fn try_from(batch_get_item: BatchGetItem) -> Result<Self> {
        if batch_get_item.items.is_empty() {
            return Err(Error::EmptyKeys {
                context: "batch get has no request items".to_string(),
            });
        }
        let mut request_items = collections::HashMap::with_capacity(batch_get_item.items.len());
        for (args, keys) in batch_get_item.items {
            if keys.is_empty() {
                return Err(Error::EmptyKeys {
                    context: format!("batch get for table `{}` has no keys", args.table_name),
                });
            }
            let single_read_operation: read::common::SingleReadInput = args.into();
            let mut serialized_keys = Vec::with_capacity(keys.len());
            for key in keys {
                let key: collections::HashMap<String, types::AttributeValue> = key.try_into()?;
                serialized_keys.push(key);
            }
            let keys_and_attributes = types::KeysAndAttributes::builder()
                .set_consistent_read(single_read_operation.consistent_read)
                .set_expression_attribute_names(single_read_operation.expression_attribute_names)
                .set_keys(Some(serialized_keys))
                .set_projection_expression(single_read_operation.projection_expression)
                .build()
                .unwrap();
            request_items.insert(single_read_operation.table_name, keys_and_attributes);
        }
        let input = Self::builder()
            .set_request_items(Some(request_items))
            .set_return_consumed_capacity(batch_get_item.return_consumed_capacity)
            .build()
            .unwrap();
        Ok(input)
    }
}

impl BatchGetItem {
    /// Execute the batch get item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::batch_get_item::BatchGetItemOutput,
        error::SdkError<operation::batch_get_item::BatchGetItemError>,
    > {
        let batch_get_item: operation::batch_get_item::BatchGetItemInput =
            self.try_into().map_err(error::BuildError::other)?;
        client
            .batch_get_item()
            .set_request_items(batch_get_item.request_items)
            .set_return_consumed_capacity(batch_get_item.return_consumed_capacity)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    fn test_batch_get_item_builds_request_items() {
        let batch_get_item = BatchGetItem {
            items: IndexMap::from([(
                read::common::SingleReadArgs {
                    consistent_read: Some(true),
                    projection: Some(common::projection::Projection::new(["b", "c"]).unwrap()),
                    table_name: "a".to_string(),
                },
                vec![
                    common::key::Keys::partition("b", Value::String("1".to_string())).unwrap(),
                    common::key::Keys::partition("b", Value::String("2".to_string())).unwrap(),
                ],
            )]),
            ..Default::default()
        };
        let input: operation::batch_get_item::BatchGetItemInput =
            batch_get_item.try_into().unwrap();
        let request_items = input.request_items.unwrap();
        let expected = types::KeysAndAttributes::builder()
            .set_consistent_read(Some(true))
            .set_expression_attribute_names(Some(collections::HashMap::from([
                ("#n0".to_string(), "b".to_string()),
                ("#n1".to_string(), "c".to_string()),
            ])))
            .set_keys(Some(vec![
                collections::HashMap::from([(
                    "b".to_string(),
                    types::AttributeValue::S("1".to_string()),
                )]),
                collections::HashMap::from([(
                    "b".to_string(),
                    types::AttributeValue::S("2".to_string()),
                )]),
            ]))
            .set_projection_expression(Some("#n0, #n1".to_string()))
            .build()
            .unwrap();
        assert_eq!(request_items.get("a"), Some(&expected));
    }

    #[rstest]
    fn test_batch_get_item_without_items_fails() {
        let batch_get_item = BatchGetItem::default();
        let result: Result<operation::batch_get_item::BatchGetItemInput> =
            batch_get_item.try_into();
        assert!(matches!(result, Err(Error::EmptyKeys { .. })));
    }

    #[rstest]
    fn test_batch_get_item_with_empty_key_list_fails() {
        let batch_get_item = BatchGetItem {
            items: IndexMap::from([(
                read::common::SingleReadArgs {
                    table_name: "a".to_string(),
                    ..Default::default()
                },
                Vec::new(),
            )]),
            ..Default::default()
        };
        let result: Result<operation::batch_get_item::BatchGetItemInput> =
            batch_get_item.try_into();
        assert!(matches!(result, Err(Error::EmptyKeys { .. })));
    }
}
