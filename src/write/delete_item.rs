use crate::error::{Error, Result};
use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use std::collections;

/// delete item operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct DeleteItemInput {
    pub(crate) keys: collections::HashMap<String, types::AttributeValue>,
    pub(crate) write_operation: write::common::WriteInput,
}

/// Delete item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_fluent::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let delete_item = write::delete_item::DeleteItem {
///     keys: common::key::Keys::partition("userId", "1")?,
///     write_args: write::common::WriteArgs {
///         condition: Some(common::condition::Condition::attribute_exists("userId")?),
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// delete_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteItem {
    /// The primary key of the item to delete.
    pub keys: common::key::Keys,
    /// Additional write operation arguments (table name, condition, return values, etc.).
    pub write_args: write::common::WriteArgs,
}

impl TryFrom<DeleteItem> for DeleteItemInput {
    type Error = Error;

    fn try_from(delete_item: DeleteItem) -> Result<Self> {
        let keys = delete_item.keys.try_into()?;
        let write_operation = delete_item
            .write_args
            .compile(common::placeholder::Placeholders::default());
        write_operation.check_return_values(
            &[types::ReturnValue::None, types::ReturnValue::AllOld],
            "DeleteItem",
        )?;
        Ok(Self {
            keys,
            write_operation,
        })
    }
}

impl DeleteItem {
    /// Execute the delete item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::delete_item::DeleteItemOutput,
        error::SdkError<operation::delete_item::DeleteItemError>,
    > {
        let delete_item: DeleteItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.delete_item().set_key(Some(delete_item.keys));
        crate::apply_write_operation!(builder, delete_item.write_operation)
            .send()
            .await
    }
}
