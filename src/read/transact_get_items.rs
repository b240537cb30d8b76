use crate::common;
use crate::error::{Error, Result};

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// A single item to retrieve within a transact get operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactGetItem {
    /// The primary key of the item to retrieve.
    pub keys: common::key::Keys,
    /// Which attributes to retrieve.
    pub projection: Option<common::projection::Projection>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl TryFrom<TransactGetItem> for types::TransactGetItem {
    type Error = Error;

    fn try_from(item: TransactGetItem) -> Result<Self> {
        let keys: collections::HashMap<String, types::AttributeValue> = item.keys.try_into()?;
        let mut placeholders = common::placeholder::Placeholders::default();
        let projection_expression = item
            .projection
            .map(|projection| projection.write_expression(&mut placeholders));
        let (expression_attribute_names, _) = placeholders.into_maps();
        let get = types::Get::builder()
            .set_expression_attribute_names(expression_attribute_names)
            .set_key(Some(keys))
            .set_projection_expression(projection_expression)
            .table_name(item.table_name)
            .build()
            .unwrap();
        Ok(Self::builder().get(get).build())
    }
}

/// Transact get items operation.
///
/// Retrieves up to 100 items from one or more tables in a single atomic
/// transaction.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_fluent::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let transact_get = read::transact_get_items::TransactGetItems {
///     items: vec![
///         read::transact_get_items::TransactGetItem {
///             keys: common::key::Keys::partition("userId", "1")?,
///             projection: Some(common::projection::Projection::new(["userId", "age"])?),
///             table_name: "users".to_string(),
///         },
///     ],
///     ..Default::default()
/// };
/// transact_get.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactGetItems {
    /// The items to retrieve atomically.
    pub items: Vec<TransactGetItem>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
}

impl TryFrom<TransactGetItems> for operation::transact_get_items::TransactGetItemsInput {
    type Error = Error;

    fn try_from(transact_get_items: TransactGetItems) -> Result<Self> {
        if transact_get_items.items.is_empty() {
            return Err(Error::EmptyKeys {
                context: "transact get has no items".to_string(),
            });
        }
        let mut items = Vec::with_capacity(transact_get_items.items.len());
        for item in transact_get_items.items {
            items.push(item.try_into()?);
        }
        let input = Self::builder()
            .set_return_consumed_capacity(transact_get_items.return_consumed_capacity)
            .set_transact_items(Some(items))
            .build()
            .unwrap();
        Ok(input)
    }
}

impl TransactGetItems {
    /// Execute the transact get items operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::transact_get_items::TransactGetItemsOutput,
        error::SdkError<operation::transact_get_items::TransactGetItemsError>,
    > {
        let transact_get_items: operation::transact_get_items::TransactGetItemsInput =
            self.try_into().map_err(error::BuildError::other)?;
        client
            .transact_get_items()
            .set_return_consumed_capacity(transact_get_items.return_consumed_capacity)
            .set_transact_items(transact_get_items.transact_items)
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
    fn test_transact_get_items_compiles_each_projection_independently() {
        let transact_get_items = TransactGetItems {
            items: vec![
                TransactGetItem {
                    keys: common::key::Keys::partition("a", Value::String("1".to_string()))
                        .unwrap(),
                    projection: Some(common::projection::Projection::new(["b"]).unwrap()),
                    table_name: "t1".to_string(),
                },
                TransactGetItem {
                    keys: common::key::Keys::partition("c", Value::String("2".to_string()))
                        .unwrap(),
                    projection: Some(common::projection::Projection::new(["d", "e"]).unwrap()),
                    table_name: "t2".to_string(),
                },
            ],
            ..Default::default()
        };
        let input: operation::transact_get_items::TransactGetItemsInput =
            transact_get_items.try_into().unwrap();
        let items = input.transact_items.unwrap();
        let expected_first = types::TransactGetItem::builder()
            .get(
                types::Get::builder()
                    .set_expression_attribute_names(Some(collections::HashMap::from([(
                        "#n0".to_string(),
                        "b".to_string(),
                    )])))
                    .set_key(Some(collections::HashMap::from([(
                        "a".to_string(),
                        types::AttributeValue::S("1".to_string()),
                    )])))
                    .set_projection_expression(Some("#n0".to_string()))
                    .table_name("t1")
                    .build()
                    .unwrap(),
            )
            .build();
        let expected_second = types::TransactGetItem::builder()
            .get(
                types::Get::builder()
                    .set_expression_attribute_names(Some(collections::HashMap::from([
                        ("#n0".to_string(), "d".to_string()),
                        ("#n1".to_string(), "e".to_string()),
                    ])))
                    .set_key(Some(collections::HashMap::from([(
                        "c".to_string(),
                        types::AttributeValue::S("2".to_string()),
                    )])))
                    .set_projection_expression(Some("#n0, #n1".to_string()))
                    .table_name("t2")
                    .build()
                    .unwrap(),
            )
            .build();
        assert_eq!(items, vec![expected_first, expected_second]);
    }

    #[rstest]
    fn test_transact_get_items_without_items_fails() {
        let transact_get_items = TransactGetItems::default();
        let result: Result<operation::transact_get_items::TransactGetItemsInput> =
            transact_get_items.try_into();
        assert!(matches!(result, Err(Error::EmptyKeys { .. })));
    }
}
