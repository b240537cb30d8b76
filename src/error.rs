//! Error types shared by every builder and compiler in the crate.

/// Errors raised while constructing expression nodes or compiling commands.
///
/// Every variant surfaces before any network call is attempted, so a command
/// that compiles is guaranteed to be well-formed on the wire.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The attribute path string does not match the path grammar.
    #[error("malformed attribute path `{path}`: {reason}")]
    MalformedPath {
        /// The raw path string as supplied.
        path: String,
        /// Why parsing failed.
        reason: String,
    },
    /// A return values option was supplied in a slot where it is not legal.
    #[error("return values option `{option}` is not valid for {context}")]
    ConflictingReturnValues {
        /// The rejected option.
        option: String,
        /// The command or slot that rejected it.
        context: &'static str,
    },
    /// A command is missing a required key attribute or has no keys at all.
    #[error("required keys are missing: {context}")]
    EmptyKeys {
        /// Which part of the command has no keys.
        context: String,
    },
    /// A literal value could not be serialized to a DynamoDB attribute value.
    #[error(transparent)]
    Serialization(#[from] serde_dynamo::Error),
}

/// Alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
