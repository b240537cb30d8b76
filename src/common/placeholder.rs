use crate::common::path;

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use std::collections;

/// Allocator for the `#n<i>` and `:v<i>` placeholder tokens of one compiled
/// command.
///
/// Tokens are numbered by allocation order and deduplicated: the same field
/// name, or a deeply equal attribute value, always resolves to the token it
/// was first given. Values that differ in type allocate distinct tokens even
/// when they look alike (numeric `1` vs string `"1"`). A single allocator must
/// never be shared between two compilations.
#[derive(Debug, Default)]
pub(crate) struct Placeholders {
    names: IndexMap<String, String>,
    values: Vec<(String, types::AttributeValue)>,
}

impl Placeholders {
    /// Token standing for a single attribute name.
    pub(crate) fn name_token(&mut self, field: &str) -> String {
        if let Some(token) = self.names.get(field) {
            return token.clone();
        }
        let token = format!("#n{}", self.names.len());
        self.names.insert(field.to_string(), token.clone());
        token
    }

    /// Token standing for a literal value.
    pub(crate) fn value_token(&mut self, value: &types::AttributeValue) -> String {
        if let Some((token, _)) = self.values.iter().find(|(_, existing)| existing == value) {
            return token.clone();
        }
        let token = format!(":v{}", self.values.len());
        self.values.push((token.clone(), value.clone()));
        token
    }

    /// Render a full path with every field segment replaced by its name token.
    pub(crate) fn path_token(&mut self, path: &path::Path) -> String {
        path.render(|field| self.name_token(field))
    }

    /// The accumulated `token -> raw` maps, `None` when nothing was allocated
    /// so the wire payload omits the member entirely.
    pub(crate) fn into_maps(
        self,
    ) -> (
        Option<collections::HashMap<String, String>>,
        Option<collections::HashMap<String, types::AttributeValue>>,
    ) {
        let names = (!self.names.is_empty()).then(|| {
            self.names
                .into_iter()
                .map(|(name, token)| (token, name))
                .collect()
        });
        let values = (!self.values.is_empty()).then(|| self.values.into_iter().collect());
        (names, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn test_name_tokens_deduplicate_by_field_name() {
        let mut placeholders = Placeholders::default();
        assert_eq!(placeholders.name_token("age"), "#n0");
        assert_eq!(placeholders.name_token("name"), "#n1");
        assert_eq!(placeholders.name_token("age"), "#n0");
        let (names, values) = placeholders.into_maps();
        assert_eq!(
            names,
            Some(collections::HashMap::from([
                ("#n0".to_string(), "age".to_string()),
                ("#n1".to_string(), "name".to_string()),
            ]))
        );
        assert_eq!(values, None);
    }

    #[rstest]
    fn test_value_tokens_deduplicate_by_deep_equality() {
        let mut placeholders = Placeholders::default();
        let one = types::AttributeValue::N("1".to_string());
        let one_string = types::AttributeValue::S("1".to_string());
        assert_eq!(placeholders.value_token(&one), ":v0");
        assert_eq!(placeholders.value_token(&one_string), ":v1");
        assert_eq!(placeholders.value_token(&one), ":v0");
        let (names, values) = placeholders.into_maps();
        assert_eq!(names, None);
        assert_eq!(
            values,
            Some(collections::HashMap::from([
                (":v0".to_string(), one),
                (":v1".to_string(), one_string),
            ]))
        );
    }

    #[rstest]
    fn test_path_token_escapes_fields_and_keeps_indices_raw() {
        let mut placeholders = Placeholders::default();
        let path: path::Path = "cats[1].age".parse().unwrap();
        assert_eq!(placeholders.path_token(&path), "#n0[1].#n1");
        let (names, _) = placeholders.into_maps();
        assert_eq!(
            names,
            Some(collections::HashMap::from([
                ("#n0".to_string(), "cats".to_string()),
                ("#n1".to_string(), "age".to_string()),
            ]))
        );
    }
}
