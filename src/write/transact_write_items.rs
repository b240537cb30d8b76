use crate::error::{Error, Result};
use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// Condition check within a transaction.
///
/// Asserts a condition on an item without writing it; the whole transaction
/// fails if the condition does not hold.
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionCheck {
    /// The condition that must hold for the transaction to succeed.
    pub condition: common::condition::Condition,
    /// The primary key of the item to check.
    pub keys: common::key::Keys,
    /// Which item attributes to return if the condition check fails.
    pub return_values_on_condition_check_failure:
        Option<types::ReturnValuesOnConditionCheckFailure>,
    /// The name of the table holding the checked item.
    pub table_name: String,
}

/// A single request within a transact write operation.
///
/// Write commands are reused as transaction items; their primary
/// `return_values` slot must stay unset, since transactions only support
/// `return_values_on_condition_check_failure`.
#[derive(Clone, Debug, PartialEq)]
pub enum TransactWriteItemRequest {
    /// Condition check - asserts a condition on an item without writing it.
    ConditionCheck(ConditionCheck),
    /// Delete item request.
    DeleteItem(write::delete_item::DeleteItem),
    /// Put item request.
    PutItem(write::put_item::PutItem),
    /// Update item request.
    UpdateItem(write::update_item::UpdateItem),
}

impl TryFrom<TransactWriteItemRequest> for types::TransactWriteItem {
    type Error = Error;

    fn try_from(request: TransactWriteItemRequest) -> Result<Self> {
        let builder = match request {
            TransactWriteItemRequest::ConditionCheck(condition_check) => {
                let keys: collections::HashMap<String, types::AttributeValue> =
                    condition_check.keys.try_into()?;
                let mut placeholders = common::placeholder::Placeholders::default();
                let condition_expression = condition_check
                    .condition
                    .write_expression(&mut placeholders);
                let (names, values) = placeholders.into_maps();
                let check = types::ConditionCheck::builder()
                    .condition_expression(condition_expression)
                    .set_expression_attribute_names(names)
                    .set_expression_attribute_values(values)
                    .set_key(Some(keys))
                    .set_return_values_on_condition_check_failure(
                        condition_check.return_values_on_condition_check_failure,
                    )
                    .table_name(condition_check.table_name)
                    .build()
                    .unwrap();
                Self::builder().condition_check(check)
            }
            TransactWriteItemRequest::DeleteItem(delete_item) => {
                let input: write::delete_item::DeleteItemInput = delete_item.try_into()?;
                input
                    .write_operation
                    .check_return_values(&[types::ReturnValue::None], "transact write items")?;
                let delete = types::Delete::builder()
                    .set_condition_expression(input.write_operation.condition_expression)
                    .set_expression_attribute_names(input.write_operation.expression_attribute_names)
                    .set_expression_attribute_values(
                        input.write_operation.expression_attribute_values,
                    )
                    .set_key(Some(input.keys))
                    .set_return_values_on_condition_check_failure(
                        input
                            .write_operation
                            .return_values_on_condition_check_failure,
                    )
                    .table_name(input.write_operation.table_name)
                    .build()
                    .unwrap();
                Self::builder().delete(delete)
            }
            TransactWriteItemRequest::PutItem(put_item) => {
                let input: write::put_item::PutItemInput = put_item.try_into()?;
                input
                    .write_operation
                    .check_return_values(&[types::ReturnValue::None], "transact write items")?;
                let put = types::Put::builder()
                    .set_condition_expression(input.write_operation.condition_expression)
                    .set_expression_attribute_names(input.write_operation.expression_attribute_names)
                    .set_expression_attribute_values(
                        input.write_operation.expression_attribute_values,
                    )
                    .set_item(Some(input.item))
                    .set_return_values_on_condition_check_failure(
                        input
                            .write_operation
                            .return_values_on_condition_check_failure,
                    )
                    .table_name(input.write_operation.table_name)
                    .build()
                    .unwrap();
                Self::builder().put(put)
            }
            TransactWriteItemRequest::UpdateItem(update_item) => {
                let input: write::update_item::UpdateItemInput = update_item.try_into()?;
                input
                    .write_operation
                    .check_return_values(&[types::ReturnValue::None], "transact write items")?;
                let update = types::Update::builder()
                    .set_condition_expression(input.write_operation.condition_expression)
                    .set_expression_attribute_names(input.write_operation.expression_attribute_names)
                    .set_expression_attribute_values(
                        input.write_operation.expression_attribute_values,
                    )
                    .set_key(Some(input.keys))
                    .set_return_values_on_condition_check_failure(
                        input
                            .write_operation
                            .return_values_on_condition_check_failure,
                    )
                    .table_name(input.write_operation.table_name)
                    .update_expression(input.update_expression)
                    .build()
                    .unwrap();
                Self::builder().update(update)
            }
        };
        Ok(builder.build())
    }
}

/// Transact write items operation.
///
/// Applies up to 100 put, update, delete and condition-check requests across
/// one or more tables in a single atomic transaction.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_fluent::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let transact_write = write::transact_write_items::TransactWriteItems {
///     items: vec![
///         write::transact_write_items::TransactWriteItemRequest::UpdateItem(
///             write::update_item::UpdateItem {
///                 keys: common::key::Keys::partition("userId", "1")?,
///                 update: write::update_item::Update::default().increment("balance", -50)?,
///                 write_args: write::common::WriteArgs {
///                     table_name: "accounts".to_string(),
///                     ..Default::default()
///                 },
///             },
///         ),
///         write::transact_write_items::TransactWriteItemRequest::ConditionCheck(
///             write::transact_write_items::ConditionCheck {
///                 condition: common::condition::Condition::attribute_exists("userId")?,
///                 keys: common::key::Keys::partition("userId", "2")?,
///                 return_values_on_condition_check_failure: None,
///                 table_name: "accounts".to_string(),
///             },
///         ),
///     ],
///     ..Default::default()
/// };
/// transact_write.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactWriteItems {
    /// Idempotency token for the whole transaction.
    pub client_request_token: Option<String>,
    /// The write requests to apply atomically.
    pub items: Vec<TransactWriteItemRequest>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to return item collection metrics.
    pub return_item_collection_metrics: Option<types::ReturnItemCollectionMetrics>,
}

impl TryFrom<TransactWriteItems> for operation::transact_write_items::TransactWriteItemsInput {
    type Error = Error;

    fn try_from(transact_write_items: TransactWriteItems) -> Result<Self> {
        if transact_write_items.items.is_empty() {
            return Err(Error::EmptyKeys {
                context: "transact write has no items".to_string(),
            });
        }
        let mut items = Vec::with_capacity(transact_write_items.items.len());
        for item in transact_write_items.items {
            items.push(item.try_into()?);
        }
        let input = Self::builder()
            .set_client_request_token(transact_write_items.client_request_token)
            .set_return_consumed_capacity(transact_write_items.return_consumed_capacity)
            .set_return_item_collection_metrics(
                transact_write_items.return_item_collection_metrics,
            )
            .set_transact_items(Some(items))
            .build()
            .unwrap();
        Ok(input)
    }
}

impl TransactWriteItems {
    /// Execute the transact write items operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::transact_write_items::TransactWriteItemsOutput,
        error::SdkError<operation::transact_write_items::TransactWriteItemsError>,
    > {
        let transact_write_items: operation::transact_write_items::TransactWriteItemsInput =
            self.try_into().map_err(error::BuildError::other)?;
        client
            .transact_write_items()
            .set_client_request_token(transact_write_items.client_request_token)
            .set_return_consumed_capacity(transact_write_items.return_consumed_capacity)
            .set_return_item_collection_metrics(
                transact_write_items.return_item_collection_metrics,
            )
            .set_transact_items(transact_write_items.transact_items)
            .send()
            .await
    }
}
