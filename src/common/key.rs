use crate::common::placeholder;
use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::collections;

/// Key component.
///
/// ```rust
/// use dynamodb_fluent::common::key;
///
/// let key = key::Key::new("id", "1").unwrap();
/// assert_eq!(key.name, "id");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Key {
    /// The attribute name of the key.
    pub name: String,
    /// The value of the key.
    pub value: types::AttributeValue,
}

impl Key {
    /// Build a key component, serializing the value.
    pub fn new(name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            value: to_attribute_value(value)?,
        })
    }
}

impl Default for Key {
    fn default() -> Self {
        Self {
            name: String::new(),
            value: types::AttributeValue::Null(true),
        }
    }
}

/// Primary key (partition key and optional sort key).
///
/// The compiled key map uses raw attribute names and values, never
/// placeholder tokens.
///
/// ```rust
/// use dynamodb_fluent::common::key;
///
/// let keys = key::Keys::partition("userId", "123").unwrap();
/// let composite = keys.sort("dataTimestamp", 1_700_000_000).unwrap();
/// # drop(composite);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keys {
    /// The partition key (required).
    pub partition_key: Key,
    /// The sort key (optional, only for tables with composite primary keys).
    pub sort_key: Option<Key>,
}

impl Keys {
    /// Build keys holding only a partition key.
    pub fn partition(name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        Ok(Self {
            partition_key: Key::new(name, value)?,
            sort_key: None,
        })
    }

    /// Return new keys with the sort key set.
    pub fn sort(self, name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        Ok(Self {
            sort_key: Some(Key::new(name, value)?),
            ..self
        })
    }
}

impl TryFrom<Keys> for collections::HashMap<String, types::AttributeValue> {
    type Error = Error;

    fn try_from(keys: Keys) -> Result<Self> {
        if keys.partition_key.name.is_empty() {
            return Err(Error::EmptyKeys {
                context: "partition key has no attribute name".to_string(),
            });
        }
        let mut map = Self::from([(keys.partition_key.name, keys.partition_key.value)]);
        if let Some(sort_key) = keys.sort_key {
            map.insert(sort_key.name, sort_key.value);
        }
        Ok(map)
    }
}

/// Sort key predicate forms permitted in a key condition expression.
///
/// Key conditions accept a narrower operator set than filters: equality and
/// ordering comparators, `begins_with` and `BETWEEN`.
#[derive(Clone, Debug, PartialEq)]
pub enum SortCondition {
    /// `=`
    Equals(types::AttributeValue),
    /// `<`
    LessThan(types::AttributeValue),
    /// `<=`
    LessThanOrEqual(types::AttributeValue),
    /// `>`
    GreaterThan(types::AttributeValue),
    /// `>=`
    GreaterThanOrEqual(types::AttributeValue),
    /// `begins_with`
    BeginsWith(types::AttributeValue),
    /// `BETWEEN`, bounds included.
    Between(types::AttributeValue, types::AttributeValue),
}

/// Condition applied to the sort key of a query.
///
/// ```rust
/// use dynamodb_fluent::common::key::KeyCondition;
///
/// let condition = KeyCondition::between("dataTimestamp", 0, 100).unwrap();
/// assert_eq!(condition.name, "dataTimestamp");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KeyCondition {
    /// The condition to apply to the sort key.
    pub condition: SortCondition,
    /// The attribute name of the sort key.
    pub name: String,
}

impl KeyCondition {
    /// Sort key equals a value.
    pub fn equals(name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        Ok(Self {
            condition: SortCondition::Equals(to_attribute_value(value)?),
            name: name.into(),
        })
    }

    /// Sort key is less than a value.
    pub fn less_than(name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        Ok(Self {
            condition: SortCondition::LessThan(to_attribute_value(value)?),
            name: name.into(),
        })
    }

    /// Sort key is less than or equal to a value.
    pub fn less_than_or_equal(name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        Ok(Self {
            condition: SortCondition::LessThanOrEqual(to_attribute_value(value)?),
            name: name.into(),
        })
    }

    /// Sort key is greater than a value.
    pub fn greater_than(name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        Ok(Self {
            condition: SortCondition::GreaterThan(to_attribute_value(value)?),
            name: name.into(),
        })
    }

    /// Sort key is greater than or equal to a value.
    pub fn greater_than_or_equal(name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        Ok(Self {
            condition: SortCondition::GreaterThanOrEqual(to_attribute_value(value)?),
            name: name.into(),
        })
    }

    /// Sort key begins with a prefix.
    pub fn begins_with(name: impl Into<String>, prefix: impl Serialize) -> Result<Self> {
        Ok(Self {
            condition: SortCondition::BeginsWith(to_attribute_value(prefix)?),
            name: name.into(),
        })
    }

    /// Sort key lies between two values, bounds included.
    pub fn between(
        name: impl Into<String>,
        lower: impl Serialize,
        upper: impl Serialize,
    ) -> Result<Self> {
        Ok(Self {
            condition: SortCondition::Between(to_attribute_value(lower)?, to_attribute_value(upper)?),
            name: name.into(),
        })
    }

    pub(crate) fn write_expression(&self, placeholders: &mut placeholder::Placeholders) -> String {
        let name_token = placeholders.name_token(&self.name);
        match &self.condition {
            SortCondition::Equals(value) => {
                format!("{} = {}", name_token, placeholders.value_token(value))
            }
            SortCondition::LessThan(value) => {
                format!("{} < {}", name_token, placeholders.value_token(value))
            }
            SortCondition::LessThanOrEqual(value) => {
                format!("{} <= {}", name_token, placeholders.value_token(value))
            }
            SortCondition::GreaterThan(value) => {
                format!("{} > {}", name_token, placeholders.value_token(value))
            }
            SortCondition::GreaterThanOrEqual(value) => {
                format!("{} >= {}", name_token, placeholders.value_token(value))
            }
            SortCondition::BeginsWith(prefix) => {
                format!(
                    "begins_with({}, {})",
                    name_token,
                    placeholders.value_token(prefix)
                )
            }
            SortCondition::Between(lower, upper) => {
                format!(
                    "{} BETWEEN {} AND {}",
                    name_token,
                    placeholders.value_token(lower),
                    placeholders.value_token(upper)
                )
            }
        }
    }
}
