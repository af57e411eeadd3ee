//! Node network error types.

use hf_core::HfError;

pub type GraphResult<T> = Result<T, GraphError>;

/// Node registration and wiring errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node name was blank.
    BlankNodeName {
        object_type: String,
        object_name: String,
    },

    /// Node handle does not belong to this network.
    UnknownNode { index: usize },

    /// A component uses the same node as inlet and outlet.
    SameInletOutlet {
        object_type: String,
        object_name: String,
        node: String,
    },

    /// A node is already the inlet (or outlet) of another component.
    NodeReused {
        node: String,
        role: &'static str,
        first: String,
        second: String,
    },

    /// The same component was registered with different nodes.
    ConflictingCompSet {
        object_type: String,
        object_name: String,
    },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::BlankNodeName {
                object_type,
                object_name,
            } => write!(f, "{object_type}=\"{object_name}\": blank node name"),
            GraphError::UnknownNode { index } => {
                write!(f, "Node handle {index} is not part of this network")
            }
            GraphError::SameInletOutlet {
                object_type,
                object_name,
                node,
            } => write!(
                f,
                "{object_type}=\"{object_name}\": inlet and outlet are the same node \"{node}\""
            ),
            GraphError::NodeReused {
                node,
                role,
                first,
                second,
            } => write!(
                f,
                "Node \"{node}\" used as {role} by both {first} and {second}"
            ),
            GraphError::ConflictingCompSet {
                object_type,
                object_name,
            } => write!(
                f,
                "{object_type}=\"{object_name}\" registered twice with different nodes"
            ),
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for HfError {
    fn from(err: GraphError) -> Self {
        HfError::Invariant {
            what: err.to_string(),
        }
    }
}
