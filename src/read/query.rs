use crate::error::{Error, Result};
use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation, types};

/// query operation
#[derive(Clone, Debug, Default, PartialEq)]
struct QueryInput {
    key_condition_expression: String,
    multiple_read_operation: read::common::MultipleReadInput,
    return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    scan_index_forward: Option<bool>,
}

/// Query operation.
///
/// The partition key is always matched by equality; the sort key takes an
/// optional [`common::key::KeyCondition`] restricted to the comparator set
/// key condition expressions permit.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_fluent::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let query = read::query::Query {
///     partition_key: common::key::Key::new("userId", "123")?,
///     sort_key_condition: Some(common::key::KeyCondition::between("dataTimestamp", 0, 100)?),
///     multiple_read_args: read::common::MultipleReadArgs {
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// query.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    /// Additional read operation arguments (table name, filter, projection, etc.).
    pub multiple_read_args: read::common::MultipleReadArgs,
    /// The partition key value to query for.
    pub partition_key: common::key::Key,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to scan the index forward (ascending) or backward (descending).
    pub scan_index_forward: Option<bool>,
    /// Optional condition to apply to the sort key.
    pub sort_key_condition: Option<common::key::KeyCondition>,
}

impl Query {
    fn get_key_condition_expression(
        partition_key: &common::key::Key,
        sort_key_condition: Option<&common::key::KeyCondition>,
        placeholders: &mut common::placeholder::Placeholders,
    ) -> Result<String> {
        if partition_key.name.is_empty() {
            return Err(Error::EmptyKeys {
                context: "query partition key has no attribute name".to_string(),
            });
        }
        let mut expression = format!(
            "{} = {}",
            placeholders.name_token(&partition_key.name),
            placeholders.value_token(&partition_key.value),
        );
        if let Some(sort_key_condition) = sort_key_condition {
            let sort_expression = sort_key_condition.write_expression(placeholders);
            expression = format!("{expression} AND {sort_expression}");
        }
        Ok(expression)
    }
}

impl TryFrom<Query> for QueryInput {
    type Error = Error;

    fn try_from(query: Query) -> Result<Self> {
        let mut placeholders = common::placeholder::Placeholders::default();
        let key_condition_expression = Query::get_key_condition_expression(
            &query.partition_key,
            query.sort_key_condition.as_ref(),
            &mut placeholders,
        )?;
        let operation = Self {
            key_condition_expression,
            multiple_read_operation: query.multiple_read_args.compile(placeholders),
            return_consumed_capacity: query.return_consumed_capacity,
            scan_index_forward: query.scan_index_forward,
        };
        Ok(operation)
    }
}

impl Query {
    /// Execute the query operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_fluent.query", err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::query::QueryOutput, error::SdkError<operation::query::QueryError>> {
        let query: QueryInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .query()
            .key_condition_expression(query.key_condition_expression)
            .set_return_consumed_capacity(query.return_consumed_capacity)
            .set_scan_index_forward(query.scan_index_forward);
        crate::apply_multiple_read_operation!(builder, query.multiple_read_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::condition::{Comparator, Condition};

    use rstest::rstest;
    use serde_json::Value;
    use std::collections;

    #[rstest]
    fn test_query_partition_key_only() {
        let query = Query {
            partition_key: common::key::Key::new("userId", Value::String("1".to_string())).unwrap(),
            multiple_read_args: read::common::MultipleReadArgs {
                table_name: "a".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let input: QueryInput = query.try_into().unwrap();
        assert_eq!(input.key_condition_expression, "#n0 = :v0");
        assert_eq!(
            input.multiple_read_operation.expression_attribute_names,
            Some(collections::HashMap::from([(
                "#n0".to_string(),
                "userId".to_string(),
            )]))
        );
        assert_eq!(
            input.multiple_read_operation.expression_attribute_values,
            Some(collections::HashMap::from([(
                ":v0".to_string(),
                types::AttributeValue::S("1".to_string()),
            )]))
        );
    }

    #[rstest]
    fn test_query_shares_tokens_across_expression_kinds() {
        let query = Query {
            partition_key: common::key::Key::new("userId", Value::String("1".to_string())).unwrap(),
            sort_key_condition: Some(common::key::KeyCondition::between("ts", 1, 10).unwrap()),
            multiple_read_args: read::common::MultipleReadArgs {
                filter: Some(Condition::comparator("age", Comparator::GreaterThan, 21).unwrap()),
                projection: Some(
                    common::projection::Projection::new(["userId", "age"]).unwrap(),
                ),
                table_name: "a".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let input: QueryInput = query.try_into().unwrap();
        assert_eq!(
            input.key_condition_expression,
            "#n0 = :v0 AND #n1 BETWEEN :v1 AND :v2"
        );
        assert_eq!(
            input.multiple_read_operation.filter_expression,
            Some("#n2 > :v3".to_string())
        );
        assert_eq!(
            input.multiple_read_operation.projection_expression,
            Some("#n0, #n2".to_string())
        );
        assert_eq!(
            input.multiple_read_operation.expression_attribute_names,
            Some(collections::HashMap::from([
                ("#n0".to_string(), "userId".to_string()),
                ("#n1".to_string(), "ts".to_string()),
                ("#n2".to_string(), "age".to_string()),
            ]))
        );
    }

    #[rstest]
    fn test_query_without_partition_key_name_fails() {
        let query = Query {
            multiple_read_args: read::common::MultipleReadArgs {
                table_name: "a".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result: Result<QueryInput> = query.try_into();
        assert!(matches!(result, Err(Error::EmptyKeys { .. })));
    }

    #[rstest]
    fn test_query_compiles_deterministically() {
        let query = Query {
            partition_key: common::key::Key::new("userId", Value::String("1".to_string())).unwrap(),
            sort_key_condition: Some(
                common::key::KeyCondition::begins_with("ts", "2024-").unwrap(),
            ),
            multiple_read_args: read::common::MultipleReadArgs {
                filter: Some(Condition::attribute_exists("age").unwrap()),
                table_name: "a".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let first: QueryInput = query.clone().try_into().unwrap();
        let second: QueryInput = query.try_into().unwrap();
        assert_eq!(first, second);
    }
}
