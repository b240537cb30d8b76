use crate::common;
use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use std::collections;

/// Internal representation of write operation parameters.
///
/// Holds the fully resolved expression strings and placeholder maps, ready
/// for the DynamoDB API call.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct WriteInput {
    pub(crate) condition_expression: Option<String>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    pub(crate) return_item_collection_metrics: Option<types::ReturnItemCollectionMetrics>,
    pub(crate) return_values: Option<types::ReturnValue>,
    pub(crate) return_values_on_condition_check_failure:
        Option<types::ReturnValuesOnConditionCheckFailure>,
    pub(crate) table_name: String,
}

impl WriteInput {
    /// Reject return values options that the command does not accept.
    pub(crate) fn check_return_values(
        &self,
        allowed: &[types::ReturnValue],
        context: &'static str,
    ) -> Result<()> {
        match &self.return_values {
            Some(option) if !allowed.contains(option) => Err(Error::ConflictingReturnValues {
                option: option.as_str().to_string(),
                context,
            }),
            _ => Ok(()),
        }
    }
}

/// Arguments common to all write operations (Put, Update, Delete).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteArgs {
    /// Condition that must hold for the operation to succeed.
    ///
    /// If the condition evaluates to false, the operation fails with a
    /// conditional check error instead of writing anything.
    pub condition: Option<common::condition::Condition>,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to return item collection metrics.
    pub return_item_collection_metrics: Option<types::ReturnItemCollectionMetrics>,
    /// Which item attributes to return in the response.
    ///
    /// Put and Delete accept only `NONE` and `ALL_OLD`; Update accepts the
    /// full option set. An option outside the command's set is rejected at
    /// compile time.
    pub return_values: Option<types::ReturnValue>,
    /// Which item attributes to return if a condition check fails.
    pub return_values_on_condition_check_failure:
        Option<types::ReturnValuesOnConditionCheckFailure>,
    /// The name of the table to write to.
    pub table_name: String,
}

impl WriteArgs {
    /// Compile the condition expression, finishing an allocator the caller
    /// may already have written update-expression tokens into so every
    /// expression of the command shares one token scope.
    pub(crate) fn compile(self, mut placeholders: common::placeholder::Placeholders) -> WriteInput {
        let condition_expression = self
            .condition
            .map(|condition| condition.write_expression(&mut placeholders));
        let (expression_attribute_names, expression_attribute_values) = placeholders.into_maps();
        WriteInput {
            condition_expression,
            expression_attribute_names,
            expression_attribute_values,
            return_consumed_capacity: self.return_consumed_capacity,
            return_item_collection_metrics: self.return_item_collection_metrics,
            return_values: self.return_values,
            return_values_on_condition_check_failure: self
                .return_values_on_condition_check_failure,
            table_name: self.table_name,
        }
    }
}

/// apply common write operation settings to a builder
#[macro_export]
macro_rules! apply_write_operation {
    ($builder:expr, $write_operation:expr) => {
        $builder
            .set_condition_expression($write_operation.condition_expression)
            .set_expression_attribute_names($write_operation.expression_attribute_names)
            .set_expression_attribute_values($write_operation.expression_attribute_values)
            .set_return_consumed_capacity($write_operation.return_consumed_capacity)
            .set_return_item_collection_metrics($write_operation.return_item_collection_metrics)
            .set_return_values($write_operation.return_values)
            .set_return_values_on_condition_check_failure(
                $write_operation.return_values_on_condition_check_failure,
            )
            .table_name($write_operation.table_name)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::condition::{Comparator, Condition};

    use rstest::rstest;

    #[rstest]
    fn test_write_args_compile_condition() {
        let args = WriteArgs {
            condition: Some(Condition::comparator("version", Comparator::Equal, 3).unwrap()),
            table_name: "a".to_string(),
            ..Default::default()
        };
        let input = args.compile(common::placeholder::Placeholders::default());
        assert_eq!(input.condition_expression, Some("#n0 = :v0".to_string()));
        assert_eq!(
            input.expression_attribute_names,
            Some(collections::HashMap::from([(
                "#n0".to_string(),
                "version".to_string(),
            )]))
        );
        assert_eq!(
            input.expression_attribute_values,
            Some(collections::HashMap::from([(
                ":v0".to_string(),
                types::AttributeValue::N("3".to_string()),
            )]))
        );
    }

    #[rstest]
    fn test_check_return_values_rejects_options_outside_the_allowed_set() {
        let input = WriteInput {
            return_values: Some(types::ReturnValue::UpdatedNew),
            ..Default::default()
        };
        let result =
            input.check_return_values(&[types::ReturnValue::None, types::ReturnValue::AllOld], "x");
        assert!(matches!(
            result,
            Err(Error::ConflictingReturnValues { .. })
        ));
        let input = WriteInput {
            return_values: Some(types::ReturnValue::AllOld),
            ..Default::default()
        };
        input
            .check_return_values(&[types::ReturnValue::None, types::ReturnValue::AllOld], "x")
            .unwrap();
    }
}
