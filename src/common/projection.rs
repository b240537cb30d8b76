use crate::common::{path, placeholder};
use crate::error::Result;

/// Attributes to project in a read operation.
///
/// Paths are kept in insertion order; the compiled expression deduplicates by
/// rendered path, so selecting the same attribute twice emits it once.
///
/// ```rust
/// use dynamodb_fluent::common::projection::Projection;
///
/// let projection = Projection::new(["userId", "nested.field", "cats[1].age"]).unwrap();
/// # drop(projection);
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Projection {
    paths: Vec<path::Path>,
}

impl Projection {
    /// Parse a list of attribute paths to project.
    pub fn new<I>(attributes: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut paths = Vec::new();
        for attribute in attributes {
            paths.push(attribute.as_ref().parse()?);
        }
        Ok(Self { paths })
    }

    pub(crate) fn write_expression(&self, placeholders: &mut placeholder::Placeholders) -> String {
        let mut rendered: Vec<String> = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let expression = placeholders.path_token(path);
            if !rendered.contains(&expression) {
                rendered.push(expression);
            }
        }
        rendered.join(", ")
    }
}
