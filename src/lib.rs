#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Fluent
//!
//! A fluent, type-safe expression builder and query compiler for Amazon DynamoDB.
//!
//! ## Overview
//!
//! DynamoDB's wire protocol wants expression *strings* full of `#name` and
//! `:value` placeholder tokens plus the two maps resolving them. This crate
//! lets you describe conditions, filters, key conditions, updates and
//! projections as structured values instead, and compiles them for you:
//! - Attribute paths (`"cats[1].age"`) are parsed and validated up front
//! - Every attribute name is placeholder-escaped, so reserved words never bite
//! - Repeated names and values are deduplicated into a single token
//! - Compilation is pure and deterministic; every error surfaces before any
//!   network call is attempted
//!
//! Builders are immutable: each call returns a new value, so a partially
//! built command can be branched into independent continuations and shared
//! freely across threads.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use aws_sdk_dynamodb::Client;
//! use dynamodb_fluent::{common, write};
//!
//! # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
//! let update_item = write::update_item::UpdateItem {
//!     keys: common::key::Keys::partition("userId", "123")?,
//!     update: write::update_item::Update::default()
//!         .set("name", "Jane")?
//!         .increment("age", 1)?
//!         .remove("legacyField")?,
//!     write_args: write::common::WriteArgs {
//!         condition: common::condition::ConditionBuilder::default()
//!             .expression(common::condition::Condition::attribute_exists("userId")?)
//!             .build(),
//!         table_name: "users".to_string(),
//!         ..Default::default()
//!     },
//! };
//! // Compiles to "SET #n0 = :v0, #n1 = #n1 + :v1 REMOVE #n2" with the
//! // matching attribute name and value maps, then sends it.
//! update_item.send(client).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Shared utilities for paths, conditions, keys, and projections
//! - [`mod@read`] - Read operations (GetItem, Query, Scan, BatchGetItem, TransactGetItems)
//! - [`mod@write`] - Write operations (PutItem, UpdateItem, DeleteItem, BatchWriteItem, TransactWriteItems)
//! - [`mod@error`] - The error types every builder and compiler returns

/// Shared utilities for paths, conditions, keys, and projections.
pub mod common;

/// Error types shared by every builder and compiler in the crate.
pub mod error;

/// Read operations for retrieving data from DynamoDB tables.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Querying items with key conditions
/// - Scanning entire tables
/// - Batch and transactionally retrieving multiple items
pub mod read;

/// Write operations for modifying data in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Updating items with various operations (set, remove, add, delete)
/// - Deleting items by key
/// - Batch and transactionally writing multiple items
pub mod write;

pub use error::{Error, Result};
