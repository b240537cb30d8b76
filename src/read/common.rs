use crate::common;

use aws_sdk_dynamodb::types;
use std::collections;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SingleReadInput {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) projection_expression: Option<String>,
    pub(crate) table_name: String,
}

/// Arguments for single-item read operations (GetItem).
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct SingleReadArgs {
    /// Whether to use a consistent read.
    ///
    /// `true` for strongly consistent reads, `false` or `None` for eventually
    /// consistent reads.
    pub consistent_read: Option<bool>,
    /// Which attributes to retrieve.
    ///
    /// If `None`, all attributes are retrieved.
    pub projection: Option<common::projection::Projection>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl From<SingleReadArgs> for SingleReadInput {
    fn from(single_read_args: SingleReadArgs) -> Self {
        let mut placeholders = common::placeholder::Placeholders::default();
        let projection_expression = single_read_args
            .projection
            .map(|projection| projection.write_expression(&mut placeholders));
        let (expression_attribute_names, _) = placeholders.into_maps();
        Self {
            consistent_read: single_read_args.consistent_read,
            expression_attribute_names,
            projection_expression,
            table_name: single_read_args.table_name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MultipleReadInput {
    pub(crate) consistent_read: Option<bool>,
    pub(crate) exclusive_start_key: Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) expression_attribute_names: Option<collections::HashMap<String, String>>,
    pub(crate) expression_attribute_values:
        Option<collections::HashMap<String, types::AttributeValue>>,
    pub(crate) filter_expression: Option<String>,
    pub(crate) index_name: Option<String>,
    pub(crate) limit: Option<i32>,
    pub(crate) projection_expression: Option<String>,
    pub(crate) select: Option<types::Select>,
    pub(crate) table_name: String,
}

/// Arguments for multiple-item read operations (Query, Scan).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipleReadArgs {
    /// Whether to use a consistent read.
    pub consistent_read: Option<bool>,
    /// The exclusive start key for pagination.
    ///
    /// Typically the `last_evaluated_key` of the previous response. The map
    /// holds raw attribute values and is never placeholder-escaped.
    pub exclusive_start_key: Option<collections::HashMap<String, types::AttributeValue>>,
    /// Filter applied to the results after key-based retrieval.
    pub filter: Option<common::condition::Condition>,
    /// The name of a secondary index to read instead of the base table.
    pub index_name: Option<String>,
    /// The maximum number of items to evaluate (not necessarily the number of
    /// matching items).
    pub limit: Option<i32>,
    /// Which attributes to retrieve.
    pub projection: Option<common::projection::Projection>,
    /// Which attributes to return.
    pub select: Option<types::Select>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl MultipleReadArgs {
    /// Compile the filter and projection, finishing an allocator the caller
    /// may already have written key-condition tokens into so every expression
    /// of the command shares one token scope.
    pub(crate) fn compile(
        self,
        mut placeholders: common::placeholder::Placeholders,
    ) -> MultipleReadInput {
        let filter_expression = self
            .filter
            .map(|filter| filter.write_expression(&mut placeholders));
        let projection_expression = self
            .projection
            .map(|projection| projection.write_expression(&mut placeholders));
        let (expression_attribute_names, expression_attribute_values) = placeholders.into_maps();
        MultipleReadInput {
            consistent_read: self.consistent_read,
            exclusive_start_key: self.exclusive_start_key,
            expression_attribute_names,
            expression_attribute_values,
            filter_expression,
            index_name: self.index_name,
            limit: self.limit,
            projection_expression,
            select: self.select,
            table_name: self.table_name,
        }
    }
}

/// apply common single read operation settings to a builder
#[macro_export]
macro_rules! apply_single_read_operation {
    ($builder:expr, $single_read_operation:expr) => {
        $builder
            .set_consistent_read($single_read_operation.consistent_read)
            .set_expression_attribute_names($single_read_operation.expression_attribute_names)
            .set_projection_expression($single_read_operation.projection_expression)
            .table_name($single_read_operation.table_name)
    };
}

/// apply common multiple read operation settings to a builder
#[macro_export]
macro_rules! apply_multiple_read_operation {
    ($builder:expr, $multiple_read_operation:expr) => {
        $builder
            .set_consistent_read($multiple_read_operation.consistent_read)
            .set_exclusive_start_key($multiple_read_operation.exclusive_start_key)
            .set_expression_attribute_names($multiple_read_operation.expression_attribute_names)
            .set_expression_attribute_values($multiple_read_operation.expression_attribute_values)
            .set_filter_expression($multiple_read_operation.filter_expression)
            .set_index_name($multiple_read_operation.index_name)
            .set_limit($multiple_read_operation.limit)
            .set_projection_expression($multiple_read_operation.projection_expression)
            .set_select($multiple_read_operation.select)
            .table_name($multiple_read_operation.table_name)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::condition::{Comparator, Condition};

    use rstest::rstest;

    #[rstest]
    fn test_single_read_args_compile_projection() {
        let args = SingleReadArgs {
            projection: Some(
                common::projection::Projection::new(["userId", "someBoolean"]).unwrap(),
            ),
            table_name: "myTable".to_string(),
            ..Default::default()
        };
        let input: SingleReadInput = args.into();
        assert_eq!(input.projection_expression, Some("#n0, #n1".to_string()));
        assert_eq!(
            input.expression_attribute_names,
            Some(collections::HashMap::from([
                ("#n0".to_string(), "userId".to_string()),
                ("#n1".to_string(), "someBoolean".to_string()),
            ]))
        );
    }

    #[rstest]
    fn test_multiple_read_args_share_tokens_between_filter_and_projection() {
        let args = MultipleReadArgs {
            filter: Some(Condition::comparator("age", Comparator::GreaterThan, 21).unwrap()),
            projection: Some(common::projection::Projection::new(["age", "name"]).unwrap()),
            table_name: "myTable".to_string(),
            ..Default::default()
        };
        let input = args.compile(common::placeholder::Placeholders::default());
        assert_eq!(input.filter_expression, Some("#n0 > :v0".to_string()));
        assert_eq!(input.projection_expression, Some("#n0, #n1".to_string()));
        assert_eq!(
            input.expression_attribute_names,
            Some(collections::HashMap::from([
                ("#n0".to_string(), "age".to_string()),
                ("#n1".to_string(), "name".to_string()),
            ]))
        );
        assert_eq!(
            input.expression_attribute_values,
            Some(collections::HashMap::from([(
                ":v0".to_string(),
                types::AttributeValue::N("21".to_string()),
            )]))
        );
    }
}
