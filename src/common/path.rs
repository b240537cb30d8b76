use crate::error::{Error, Result};

use std::{fmt, str};

/// A single component of an attribute path.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathSegment {
    /// A field access, such as `name` in `owner.name`.
    Field(String),
    /// A list or tuple index, such as `1` in `cats[1]`.
    Index(u32),
}

/// A parsed attribute path, such as `cats[1].age`.
///
/// A path is a non-empty sequence of segments and always starts with a field
/// segment naming a top-level attribute.
///
/// ```rust
/// use dynamodb_fluent::common::path::Path;
///
/// let path: Path = "cats[1].age".parse().unwrap();
/// assert_eq!(path.to_string(), "cats[1].age");
/// assert!("cats[one].age".parse::<Path>().is_err());
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The segments of this path, in order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Reconstruct a display string, passing every field segment through
    /// `name_for_segment`. Index segments render verbatim as `[n]`, since the
    /// protocol does not allow placeholders inside bracket indices.
    pub fn render(&self, mut name_for_segment: impl FnMut(&str) -> String) -> String {
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => {
                    if !rendered.is_empty() {
                        rendered.push('.');
                    }
                    rendered.push_str(&name_for_segment(name));
                }
                PathSegment::Index(position) => {
                    rendered.push_str(&format!("[{position}]"));
                }
            }
        }
        rendered
    }
}

impl fmt::Display for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.render(|name| name.to_string()))
    }
}

impl str::FromStr for Path {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let malformed = |reason: &str| Error::MalformedPath {
            path: raw.to_string(),
            reason: reason.to_string(),
        };
        if raw.is_empty() {
            return Err(malformed("path is empty"));
        }
        let mut segments = Vec::new();
        let mut rest = raw;
        loop {
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            let (name, tail) = rest.split_at(end);
            if name.is_empty() {
                let reason = if segments.is_empty() {
                    "path must start with an attribute name"
                } else {
                    "empty attribute name"
                };
                return Err(malformed(reason));
            }
            segments.push(PathSegment::Field(name.to_string()));
            let mut after = tail;
            while let Some(inner) = after.strip_prefix('[') {
                let Some((digits, remaining)) = inner.split_once(']') else {
                    return Err(malformed("unterminated index"));
                };
                let position = digits
                    .parse()
                    .map_err(|_| malformed("index is not an unsigned integer"))?;
                segments.push(PathSegment::Index(position));
                after = remaining;
            }
            match after.strip_prefix('.') {
                Some(remaining) => rest = remaining,
                None if after.is_empty() => break,
                None => return Err(malformed("expected `.` or `[` after an index")),
            }
        }
        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::single_field(
        "name",
        vec![
            PathSegment::Field("name".to_string()),
        ]
    )]
    #[case::nested_fields(
        "owner.name",
        vec![
            PathSegment::Field("owner".to_string()),
            PathSegment::Field("name".to_string()),
        ]
    )]
    #[case::index_between_fields(
        "cats[1].age",
        vec![
            PathSegment::Field("cats".to_string()),
            PathSegment::Index(1),
            PathSegment::Field("age".to_string()),
        ]
    )]
    #[case::trailing_index(
        "tuplez[1]",
        vec![
            PathSegment::Field("tuplez".to_string()),
            PathSegment::Index(1),
        ]
    )]
    #[case::consecutive_indices(
        "matrix[0][2]",
        vec![
            PathSegment::Field("matrix".to_string()),
            PathSegment::Index(0),
            PathSegment::Index(2),
        ]
    )]
    #[case::deeply_mixed(
        "a.b[0][1].c.d[3]",
        vec![
            PathSegment::Field("a".to_string()),
            PathSegment::Field("b".to_string()),
            PathSegment::Index(0),
            PathSegment::Index(1),
            PathSegment::Field("c".to_string()),
            PathSegment::Field("d".to_string()),
            PathSegment::Index(3),
        ]
    )]
    fn test_parse(#[case] raw: &str, #[case] expected: Vec<PathSegment>) {
        let path: Path = raw.parse().unwrap();
        assert_eq!(path.segments(), expected.as_slice());
    }

    #[rstest]
    #[case::empty("")]
    #[case::leading_dot(".a")]
    #[case::double_dot("a..b")]
    #[case::trailing_dot("a.")]
    #[case::leading_index("[0]")]
    #[case::non_numeric_index("a[x]")]
    #[case::negative_index("a[-1]")]
    #[case::empty_index("a[]")]
    #[case::unterminated_index("a[1")]
    #[case::junk_after_index("a[0]b")]
    fn test_parse_malformed(#[case] raw: &str) {
        let result = raw.parse::<Path>();
        assert!(matches!(result, Err(Error::MalformedPath { .. })));
    }

    #[rstest]
    #[case::index_and_fields("cats[1].age")]
    #[case::consecutive_indices("a.b[0][1].c")]
    fn test_display_round_trip(#[case] raw: &str) {
        let path: Path = raw.parse().unwrap();
        assert_eq!(path.to_string(), raw);
    }

    #[rstest]
    fn test_render_substitutes_field_segments_only() {
        let path: Path = "cats[1].age".parse().unwrap();
        let rendered = path.render(|name| format!("#{name}"));
        assert_eq!(rendered, "#cats[1].#age");
    }
}
