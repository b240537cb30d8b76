use crate::error::{Error, Result};
use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::to_item;
use std::collections;

/// put item operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct PutItemInput {
    pub(crate) item: collections::HashMap<String, types::AttributeValue>,
    pub(crate) write_operation: write::common::WriteInput,
}

/// Put item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_fluent::write;
/// use serde_json::json;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let put_item = write::put_item::PutItem::new(
///     json!({"userId": "1", "name": "John"}),
///     write::common::WriteArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// )?;
/// put_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItem {
    /// The item to put into the table, as raw attribute values.
    pub item: collections::HashMap<String, types::AttributeValue>,
    /// Additional write operation arguments (table name, condition, return values, etc.).
    pub write_args: write::common::WriteArgs,
}

impl PutItem {
    /// Build a put item operation, serializing the item.
    pub fn new(item: impl Serialize, write_args: write::common::WriteArgs) -> Result<Self> {
        Ok(Self {
            item: to_item(item)?,
            write_args,
        })
    }
}

impl TryFrom<PutItem> for PutItemInput {
    type Error = Error;

    fn try_from(put_item: PutItem) -> Result<Self> {
        let write_operation = put_item
            .write_args
            .compile(common::placeholder::Placeholders::default());
        write_operation.check_return_values(
            &[types::ReturnValue::None, types::ReturnValue::AllOld],
            "PutItem",
        )?;
        Ok(Self {
            item: put_item.item,
            write_operation,
        })
    }
}

impl PutItem {
    /// Execute the put item operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::put_item::PutItemOutput,
        error::SdkError<operation::put_item::PutItemError>,
    > {
        let put_item: PutItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client.put_item().set_item(Some(put_item.item));
        crate::apply_write_operation!(builder, put_item.write_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::condition::Condition;

    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_put_item_serializes_item_and_compiles_condition() {
        let put_item = PutItem::new(
            json!({"a": "b", "n": 1}),
            write::common::WriteArgs {
                condition: Some(Condition::attribute_not_exists("a").unwrap()),
                table_name: "c".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        let input: PutItemInput = put_item.try_into().unwrap();
        assert_eq!(
            input.item,
            collections::HashMap::from([
                ("a".to_string(), types::AttributeValue::S("b".to_string())),
                ("n".to_string(), types::AttributeValue::N("1".to_string())),
            ])
        );
        assert_eq!(
            input.write_operation.condition_expression,
            Some("attribute_not_exists(#n0)".to_string())
        );
        assert_eq!(
            input.write_operation.expression_attribute_names,
            Some(collections::HashMap::from([(
                "#n0".to_string(),
                "a".to_string(),
            )]))
        );
        assert_eq!(input.write_operation.expression_attribute_values, None);
    }

    #[rstest]
    fn test_put_item_rejects_update_only_return_values() {
        let put_item = PutItem::new(
            json!({"a": "b"}),
            write::common::WriteArgs {
                return_values: Some(types::ReturnValue::UpdatedOld),
                table_name: "c".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        let result: Result<PutItemInput> = put_item.try_into();
        assert!(matches!(
            result,
            Err(Error::ConflictingReturnValues { .. })
        ));
    }
}
