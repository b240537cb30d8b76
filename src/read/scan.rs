use crate::error::{Error, Result};
use crate::{common, read};

use aws_sdk_dynamodb::{Client, error, operation, types};

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    multiple_read_operation: read::common::MultipleReadInput,
    return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    segment: Option<i32>,
    total_segments: Option<i32>,
}

/// Scan operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_fluent::{common, read};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan = read::scan::Scan {
///     multiple_read_args: read::common::MultipleReadArgs {
///         filter: Some(common::condition::Condition::attribute_exists("age")?),
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// scan.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scan {
    /// Additional read operation arguments (table name, filter, projection, etc.).
    pub multiple_read_args: read::common::MultipleReadArgs,
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// The segment number for parallel scans (0-indexed).
    pub segment: Option<i32>,
    /// The total number of segments for parallel scans.
    pub total_segments: Option<i32>,
}

impl TryFrom<Scan> for ScanInput {
    type Error = Error;

    fn try_from(scan: Scan) -> Result<Self> {
        let operation = Self {
            multiple_read_operation: scan
                .multiple_read_args
                .compile(common::placeholder::Placeholders::default()),
            return_consumed_capacity: scan.return_consumed_capacity,
            segment: scan.segment,
            total_segments: scan.total_segments,
        };
        Ok(operation)
    }
}

impl Scan {
    /// Execute the scan operation.
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .scan()
            .set_return_consumed_capacity(scan.return_consumed_capacity)
            .set_segment(scan.segment)
            .set_total_segments(scan.total_segments);
        crate::apply_multiple_read_operation!(builder, scan.multiple_read_operation)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::condition::{Comparator, Condition, ConditionBuilder};

    use rstest::rstest;
    use std::collections;

    #[rstest]
    fn test_scan_compiles_filter_and_projection() {
        let scan = Scan {
            multiple_read_args: read::common::MultipleReadArgs {
                filter: ConditionBuilder::default()
                    .expression(Condition::comparator("age", Comparator::GreaterThan, 21).unwrap())
                    .or_expression(Condition::attribute_not_exists("age").unwrap())
                    .build(),
                projection: Some(common::projection::Projection::new(["age"]).unwrap()),
                table_name: "a".to_string(),
                ..Default::default()
            },
            segment: Some(0),
            total_segments: Some(4),
            ..Default::default()
        };
        let input: ScanInput = scan.try_into().unwrap();
        assert_eq!(
            input.multiple_read_operation.filter_expression,
            Some("(#n0 > :v0) OR (attribute_not_exists(#n0))".to_string())
        );
        assert_eq!(
            input.multiple_read_operation.projection_expression,
            Some("#n0".to_string())
        );
        assert_eq!(
            input.multiple_read_operation.expression_attribute_names,
            Some(collections::HashMap::from([(
                "#n0".to_string(),
                "age".to_string(),
            )]))
        );
        assert_eq!(input.segment, Some(0));
        assert_eq!(input.total_segments, Some(4));
    }
}
