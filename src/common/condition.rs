use crate::common::{path, placeholder};
use crate::error::Result;

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::ops;

/// Comparison operator usable in condition and filter expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum Comparator {
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
}

impl ops::Deref for Comparator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }
}

/// Attribute type checked by [`Condition::attribute_type`].
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeType {
    /// Binary.
    Binary,
    /// Binary set.
    BinarySet,
    /// Boolean.
    Boolean,
    /// List.
    List,
    /// Map.
    Map,
    /// Null.
    Null,
    /// Number.
    Number,
    /// Number set.
    NumberSet,
    /// String.
    String,
    /// String set.
    StringSet,
}

impl ops::Deref for AttributeType {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Binary => "B",
            Self::BinarySet => "BS",
            Self::Boolean => "BOOL",
            Self::List => "L",
            Self::Map => "M",
            Self::Null => "NULL",
            Self::Number => "N",
            Self::NumberSet => "NS",
            Self::String => "S",
            Self::StringSet => "SS",
        }
    }
}

/// A condition expression tree.
///
/// Leaves test a single attribute path; [`Condition::And`], [`Condition::Or`]
/// and [`Condition::Not`] combine sub-trees. Construction is atomic: a
/// malformed path or an unserializable value produces an error and no node,
/// leaving any previously built tree untouched.
///
/// ```rust
/// use dynamodb_fluent::common::condition::{Comparator, Condition};
///
/// let age = Condition::comparator("age", Comparator::GreaterThanOrEqual, 18).unwrap();
/// let nested = Condition::begins_with("owner.name", "Jo").unwrap();
/// let both = Condition::And(Box::new(age), Box::new(nested));
/// # drop(both);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// Compares an attribute against a literal value.
    Comparator {
        /// The attribute to compare.
        path: path::Path,
        /// The comparison operator.
        operator: Comparator,
        /// The literal to compare against.
        value: types::AttributeValue,
    },
    /// Checks that an attribute exists.
    AttributeExists {
        /// The attribute to check.
        path: path::Path,
    },
    /// Checks that an attribute does not exist.
    AttributeNotExists {
        /// The attribute to check.
        path: path::Path,
    },
    /// Checks the stored type of an attribute.
    AttributeType {
        /// The attribute to check.
        path: path::Path,
        /// The expected attribute type.
        ty: AttributeType,
    },
    /// Compares the size of an attribute against a literal value.
    Size {
        /// The attribute whose size is taken.
        path: path::Path,
        /// The comparison operator.
        operator: Comparator,
        /// The literal to compare against.
        value: types::AttributeValue,
    },
    /// Checks that a string attribute begins with a prefix.
    BeginsWith {
        /// The attribute to check.
        path: path::Path,
        /// The prefix to look for.
        prefix: types::AttributeValue,
    },
    /// Checks that an attribute contains a value.
    Contains {
        /// The attribute to check.
        path: path::Path,
        /// The value to look for.
        operand: types::AttributeValue,
    },
    /// Checks that an attribute lies between two values, bounds included.
    Between {
        /// The attribute to check.
        path: path::Path,
        /// The inclusive lower bound.
        lower: types::AttributeValue,
        /// The inclusive upper bound.
        upper: types::AttributeValue,
    },
    /// Both sub-trees must hold.
    And(Box<Condition>, Box<Condition>),
    /// At least one sub-tree must hold.
    Or(Box<Condition>, Box<Condition>),
    /// The sub-tree must not hold.
    Not(Box<Condition>),
}

impl Condition {
    /// Compare an attribute against a literal value.
    pub fn comparator(path: &str, operator: Comparator, value: impl Serialize) -> Result<Self> {
        Ok(Self::Comparator {
            path: path.parse()?,
            operator,
            value: to_attribute_value(value)?,
        })
    }

    /// Check that an attribute exists.
    pub fn attribute_exists(path: &str) -> Result<Self> {
        Ok(Self::AttributeExists {
            path: path.parse()?,
        })
    }

    /// Check that an attribute does not exist.
    pub fn attribute_not_exists(path: &str) -> Result<Self> {
        Ok(Self::AttributeNotExists {
            path: path.parse()?,
        })
    }

    /// Check the stored type of an attribute.
    pub fn attribute_type(path: &str, ty: AttributeType) -> Result<Self> {
        Ok(Self::AttributeType {
            path: path.parse()?,
            ty,
        })
    }

    /// Compare the size of an attribute against a literal value.
    pub fn size(path: &str, operator: Comparator, value: impl Serialize) -> Result<Self> {
        Ok(Self::Size {
            path: path.parse()?,
            operator,
            value: to_attribute_value(value)?,
        })
    }

    /// Check that a string attribute begins with a prefix.
    pub fn begins_with(path: &str, prefix: impl Serialize) -> Result<Self> {
        Ok(Self::BeginsWith {
            path: path.parse()?,
            prefix: to_attribute_value(prefix)?,
        })
    }

    /// Check that an attribute contains a value.
    pub fn contains(path: &str, operand: impl Serialize) -> Result<Self> {
        Ok(Self::Contains {
            path: path.parse()?,
            operand: to_attribute_value(operand)?,
        })
    }

    /// Check that an attribute lies between two values, bounds included.
    pub fn between(path: &str, lower: impl Serialize, upper: impl Serialize) -> Result<Self> {
        Ok(Self::Between {
            path: path.parse()?,
            lower: to_attribute_value(lower)?,
            upper: to_attribute_value(upper)?,
        })
    }

    /// Negate a condition.
    pub fn not(condition: Self) -> Self {
        Self::Not(Box::new(condition))
    }

    pub(crate) fn write_expression(&self, placeholders: &mut placeholder::Placeholders) -> String {
        match self {
            Self::Comparator {
                path,
                operator,
                value,
            } => format!(
                "{} {} {}",
                placeholders.path_token(path),
                &**operator,
                placeholders.value_token(value),
            ),
            Self::AttributeExists { path } => {
                format!("attribute_exists({})", placeholders.path_token(path))
            }
            Self::AttributeNotExists { path } => {
                format!("attribute_not_exists({})", placeholders.path_token(path))
            }
            Self::AttributeType { path, ty } => {
                let value = types::AttributeValue::S((**ty).to_string());
                format!(
                    "attribute_type({}, {})",
                    placeholders.path_token(path),
                    placeholders.value_token(&value),
                )
            }
            Self::Size {
                path,
                operator,
                value,
            } => format!(
                "size({}) {} {}",
                placeholders.path_token(path),
                &**operator,
                placeholders.value_token(value),
            ),
            Self::BeginsWith { path, prefix } => format!(
                "begins_with({}, {})",
                placeholders.path_token(path),
                placeholders.value_token(prefix),
            ),
            Self::Contains { path, operand } => format!(
                "contains({}, {})",
                placeholders.path_token(path),
                placeholders.value_token(operand),
            ),
            Self::Between { path, lower, upper } => format!(
                "{} BETWEEN {} AND {}",
                placeholders.path_token(path),
                placeholders.value_token(lower),
                placeholders.value_token(upper),
            ),
            Self::And(left, right) => format!(
                "({}) AND ({})",
                left.write_expression(placeholders),
                right.write_expression(placeholders),
            ),
            Self::Or(left, right) => format!(
                "({}) OR ({})",
                left.write_expression(placeholders),
                right.write_expression(placeholders),
            ),
            Self::Not(inner) => format!("NOT ({})", inner.write_expression(placeholders)),
        }
    }
}

/// Immutable fluent builder assembling a [`Condition`] tree.
///
/// Chained [`expression`](Self::expression) calls combine with `AND`,
/// [`or_expression`](Self::or_expression) combines with `OR`, and the
/// `*_group` variants insert the tree built by a nested builder as a single
/// parenthesized operand. Every call returns a new builder value, so any
/// intermediate builder can be reused as a branch point.
///
/// ```rust
/// use dynamodb_fluent::common::condition::{Comparator, Condition, ConditionBuilder};
///
/// let condition = ConditionBuilder::default()
///     .expression(Condition::attribute_exists("userId").unwrap())
///     .or_expression(Condition::comparator("age", Comparator::GreaterThan, 18).unwrap())
///     .build();
/// assert!(condition.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConditionBuilder {
    root: Option<Condition>,
}

impl ConditionBuilder {
    /// Join a condition to the current tree with `AND`, or start the tree if
    /// it is empty.
    pub fn expression(self, condition: Condition) -> Self {
        let root = match self.root {
            Some(existing) => Condition::And(Box::new(existing), Box::new(condition)),
            None => condition,
        };
        Self { root: Some(root) }
    }

    /// Join a condition to the current tree with `OR`, or start the tree if
    /// it is empty.
    pub fn or_expression(self, condition: Condition) -> Self {
        let root = match self.root {
            Some(existing) => Condition::Or(Box::new(existing), Box::new(condition)),
            None => condition,
        };
        Self { root: Some(root) }
    }

    /// Run `build` on a fresh builder and `AND`-join its tree as a single
    /// grouped operand. A nested builder that produces nothing leaves the
    /// current tree unchanged.
    pub fn expression_group(self, build: impl FnOnce(Self) -> Self) -> Self {
        match build(Self::default()).root {
            Some(group) => self.expression(group),
            None => self,
        }
    }

    /// Run `build` on a fresh builder and `OR`-join its tree as a single
    /// grouped operand.
    pub fn or_expression_group(self, build: impl FnOnce(Self) -> Self) -> Self {
        match build(Self::default()).root {
            Some(group) => self.or_expression(group),
            None => self,
        }
    }

    /// The finished tree, `None` when no expression was added.
    pub fn build(self) -> Option<Condition> {
        self.root
    }
}
