use crate::node::NodeLocation;
use crate::SourceMap;
use serde::Deserialize;
use serde::Serialize;

/// A serializable [error](https://spec.graphql.org/October2021/#sec-Errors.Error-result-format),
/// in the shape GraphQL services use to report errors in a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphQLError {
    /// The error message.
    pub message: String,

    /// Locations in relevant to the error, if any.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub locations: Vec<GraphQLLocation>,
}

/// A source location (line and column numbers) for a [`GraphQLError`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphQLLocation {
    /// The line number for this location, starting at 1 for the first line.
    pub line: usize,
    /// The column number for this location, starting at 1 and counting characters (Unicode Scalar
    /// Values) like [`str::chars`].
    pub column: usize,
}

impl GraphQLError {
    /// Create an error with line and column numbers for every location that can be resolved
    /// in `sources`. Unresolvable locations are skipped.
    pub fn new(
        message: impl Into<String>,
        locations: impl IntoIterator<Item = NodeLocation>,
        sources: &SourceMap,
    ) -> Self {
        Self {
            message: message.into(),
            locations: locations
                .into_iter()
                .filter_map(|location| GraphQLLocation::from_node(sources, Some(location)))
                .collect(),
        }
    }
}

impl GraphQLLocation {
    /// Convert a `NodeLocation` to a line and column number
    pub fn from_node(sources: &SourceMap, location: Option<NodeLocation>) -> Option<Self> {
        let loc = location?;
        let source = sources.get(&loc.file_id)?;
        source
            .get_line_column(loc.offset())
            .map(|(line, column)| GraphQLLocation {
                line: line + 1,
                column: column + 1,
            })
    }
}
