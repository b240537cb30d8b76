use crate::error::{Error, Result};
use crate::{common, write};

use aws_sdk_dynamodb::{Client, error, operation, types};
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::collections;

/// Right-hand side of a `SET` action.
#[derive(Clone, Debug, PartialEq)]
pub enum SetValue {
    /// Assign a new value to the attribute (replaces existing value).
    Assign(types::AttributeValue),
    /// Increment a numeric attribute by the given value.
    Increment(types::AttributeValue),
    /// Decrement a numeric attribute by the given value.
    Decrement(types::AttributeValue),
    /// Append values to the end of a list attribute.
    ListAppend(types::AttributeValue),
    /// Prepend values to the beginning of a list attribute.
    ListPrepend(types::AttributeValue),
    /// Assign a value only if the attribute does not exist yet.
    IfNotExists(types::AttributeValue),
}

/// A single action within an update expression.
#[derive(Clone, Debug, PartialEq)]
pub enum UpdateAction {
    /// `SET` - set or modify an attribute value.
    Set {
        /// The attribute to set.
        path: common::path::Path,
        /// The value expression assigned to it.
        value: SetValue,
    },
    /// `REMOVE` - remove an attribute from the item.
    Remove {
        /// The attribute to remove.
        path: common::path::Path,
    },
    /// `ADD` - add to a number or insert into a set.
    Add {
        /// The attribute to add to.
        path: common::path::Path,
        /// The number or set to add.
        delta: types::AttributeValue,
    },
    /// `DELETE` - delete values from a set.
    Delete {
        /// The attribute to delete from.
        path: common::path::Path,
        /// The subset to delete.
        value: types::AttributeValue,
    },
}

/// An update expression under construction.
///
/// Actions are collected in call order; the compiled expression groups them
/// into `SET`, `REMOVE`, `ADD` and `DELETE` clauses in that fixed order,
/// preserving insertion order within each clause and omitting empty clauses.
///
/// ```rust
/// use dynamodb_fluent::write::update_item::Update;
///
/// let update = Update::default()
///     .add("tags", ["new"]).unwrap()
///     .set("name", "Jane").unwrap()
///     .increment("age", 1).unwrap();
/// // Compiles to "SET #n1 = :v1, #n2 = #n2 + :v2 ADD #n0 :v0".
/// # drop(update);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Update {
    actions: Vec<UpdateAction>,
}

impl Update {
    /// Assign a value to an attribute.
    pub fn set(self, path: &str, value: impl Serialize) -> Result<Self> {
        self.push_set(path, SetValue::Assign(to_attribute_value(value)?))
    }

    /// Increment a numeric attribute.
    pub fn increment(self, path: &str, delta: impl Serialize) -> Result<Self> {
        self.push_set(path, SetValue::Increment(to_attribute_value(delta)?))
    }

    /// Decrement a numeric attribute.
    pub fn decrement(self, path: &str, delta: impl Serialize) -> Result<Self> {
        self.push_set(path, SetValue::Decrement(to_attribute_value(delta)?))
    }

    /// Append values to the end of a list attribute.
    pub fn list_append(self, path: &str, values: impl Serialize) -> Result<Self> {
        self.push_set(path, SetValue::ListAppend(to_attribute_value(values)?))
    }

    /// Prepend values to the beginning of a list attribute.
    pub fn list_prepend(self, path: &str, values: impl Serialize) -> Result<Self> {
        self.push_set(path, SetValue::ListPrepend(to_attribute_value(values)?))
    }

    /// Assign a value only if the attribute does not exist yet.
    pub fn set_if_not_exists(self, path: &str, value: impl Serialize) -> Result<Self> {
        self.push_set(path, SetValue::IfNotExists(to_attribute_value(value)?))
    }

    /// Remove an attribute from the item.
    pub fn remove(mut self, path: &str) -> Result<Self> {
        self.actions.push(UpdateAction::Remove {
            path: path.parse()?,
        });
        Ok(self)
    }

    /// Add to a number or insert into a set.
    pub fn add(mut self, path: &str, delta: impl Serialize) -> Result<Self> {
        self.actions.push(UpdateAction::Add {
            path: path.parse()?,
            delta: to_attribute_value(delta)?,
        });
        Ok(self)
    }

    /// Delete values from a set.
    pub fn delete(mut self, path: &str, value: impl Serialize) -> Result<Self> {
        self.actions.push(UpdateAction::Delete {
            path: path.parse()?,
            value: to_attribute_value(value)?,
        });
        Ok(self)
    }

    /// Whether no action has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn push_set(mut self, path: &str, value: SetValue) -> Result<Self> {
        self.actions.push(UpdateAction::Set {
            path: path.parse()?,
            value,
        });
        Ok(self)
    }

    pub(crate) fn write_expression(
        &self,
        placeholders: &mut common::placeholder::Placeholders,
    ) -> String {
        let mut set_actions = Vec::new();
        let mut remove_actions = Vec::new();
        let mut add_actions = Vec::new();
        let mut delete_actions = Vec::new();
        for action in &self.actions {
            match action {
                UpdateAction::Set { path, value } => {
                    let path = placeholders.path_token(path);
                    let clause = match value {
                        SetValue::Assign(value) => {
                            format!("{path} = {}", placeholders.value_token(value))
                        }
                        SetValue::Increment(delta) => {
                            format!("{path} = {path} + {}", placeholders.value_token(delta))
                        }
                        SetValue::Decrement(delta) => {
                            format!("{path} = {path} - {}", placeholders.value_token(delta))
                        }
                        SetValue::ListAppend(values) => {
                            format!(
                                "{path} = list_append({path}, {})",
                                placeholders.value_token(values)
                            )
                        }
                        SetValue::ListPrepend(values) => {
                            format!(
                                "{path} = list_append({}, {path})",
                                placeholders.value_token(values)
                            )
                        }
                        SetValue::IfNotExists(value) => {
                            format!(
                                "{path} = if_not_exists({path}, {})",
                                placeholders.value_token(value)
                            )
                        }
                    };
                    set_actions.push(clause);
                }
                UpdateAction::Remove { path } => {
                    remove_actions.push(placeholders.path_token(path));
                }
                UpdateAction::Add { path, delta } => {
                    add_actions.push(format!(
                        "{} {}",
                        placeholders.path_token(path),
                        placeholders.value_token(delta)
                    ));
                }
                UpdateAction::Delete { path, value } => {
                    delete_actions.push(format!(
                        "{} {}",
                        placeholders.path_token(path),
                        placeholders.value_token(value)
                    ));
                }
            }
        }
        let mut clauses = Vec::new();
        if !set_actions.is_empty() {
            clauses.push(format!("SET {}", set_actions.join(", ")));
        }
        if !remove_actions.is_empty() {
            clauses.push(format!("REMOVE {}", remove_actions.join(", ")));
        }
        if !add_actions.is_empty() {
            clauses.push(format!("ADD {}", add_actions.join(", ")));
        }
        if !delete_actions.is_empty() {
            clauses.push(format!("DELETE {}", delete_actions.join(", ")));
        }
        clauses.join(" ")
    }
}

/// update item operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct UpdateItemInput {
    pub(crate) keys: collections::HashMap<String, types::AttributeValue>,
    pub(crate) update_expression: String,
    pub(crate) write_operation: write::common::WriteInput,
}

/// Update item operation.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamodb_fluent::{common, write};
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let update_item = write::update_item::UpdateItem {
///     keys: common::key::Keys::partition("userId", "1")?,
///     update: write::update_item::Update::default()
///         .set("name", "Jane")?
///         .increment("age", 1)?
///         .remove("legacyField")?,
///     write_args: write::common::WriteArgs {
///         condition: Some(common::condition::Condition::attribute_exists("userId")?),
///         table_name: "users".to_string(),
///         ..Default::default()
///     },
/// };
/// update_item.send(client).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateItem {
    /// The primary key of the item to update.
    pub keys: common::key::Keys,
    /// The update expression specifying what changes to make.
    pub update: Update,
    /// Additional write operation arguments (table name, condition, return values, etc.).
    pub write_args: write::common::WriteArgs,
}

impl TryFrom<UpdateItem> for UpdateItemInput {
    type Error = Error;

    fn try_from(update_item: UpdateItem) -> Result<Self> {
        let keys = update_item.keys.try_into()?;
        let mut placeholders = common::placeholder::Placeholders::default();
        let update_expression = update_item.update.write_expression(&mut placeholders);
        let write_operation = update_item.write_args.compile(placeholders);
        Ok(Self {
            keys,
            update_expression,
            write_operation,
        })
    }
}

impl UpdateItem {
    /// Execute the update item operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_fluent.update_item", err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<
        operation::update_item::UpdateItemOutput,
        error::SdkError<operation::update_item::UpdateItemError>,
    > {
        let update_item: UpdateItemInput = self.try_into().map_err(error::BuildError::other)?;
        let builder = client
            .update_item()
            .set_key(Some(update_item.keys))
            .update_expression(update_item.update_expression);
        crate::apply_write_operation!(builder, update_item.write_operation)
            .send()
            .await
    }
}
