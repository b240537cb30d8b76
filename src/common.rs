//! Shared building blocks for DynamoDB commands.
//!
//! This module provides the pieces every command kind is assembled from:
//! attribute paths, condition expression trees, keys, projections and the
//! placeholder allocator used during compilation.

/// Condition expression nodes and the fluent expression builder.
pub mod condition;

/// Key types for identifying items in DynamoDB tables.
pub mod key;

/// Attribute path parsing and rendering.
pub mod path;

pub(crate) mod placeholder;

/// Projection expressions limiting which attributes a read returns.
pub mod projection;
