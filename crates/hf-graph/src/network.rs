//! Name-indexed node store.

use std::collections::HashMap;

use hf_core::NodeId;

use crate::comp_set::CompSet;
use crate::error::{GraphError, GraphResult};
use crate::node::AirNode;

/// Role a node plays for the object that referenced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    Inlet,
    Outlet,
    Sensor,
}

/// One reference from an object to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConnection {
    pub node: NodeId,
    pub object_type: String,
    pub object_name: String,
    pub kind: ConnectionKind,
}

/// All air nodes of a model.
///
/// Names are matched case-insensitively; registering a name twice returns the
/// existing handle.
#[derive(Debug, Default, Clone)]
pub struct NodeNetwork {
    nodes: Vec<AirNode>,
    by_name: HashMap<String, NodeId>,
    connections: Vec<NodeConnection>,
    pub(crate) comp_sets: Vec<CompSet>,
}

fn key(name: &str) -> String {
    name.trim().to_uppercase()
}

impl NodeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node by name, or return the handle of an existing one.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let name = name.into();
        let k = key(&name);
        if let Some(&id) = self.by_name.get(&k) {
            return id;
        }
        let id = NodeId::from_usize(self.nodes.len());
        self.nodes.push(AirNode::new(name.trim()));
        self.by_name.insert(k, id);
        id
    }

    /// Resolve a single node reference for an object and record the connection.
    /// A connection already recorded is not recorded twice.
    pub fn get_only_single_node(
        &mut self,
        name: &str,
        object_type: &str,
        object_name: &str,
        kind: ConnectionKind,
    ) -> GraphResult<NodeId> {
        if name.trim().is_empty() {
            return Err(GraphError::BlankNodeName {
                object_type: object_type.to_string(),
                object_name: object_name.to_string(),
            });
        }
        let id = self.add_node(name);
        let known = self.connections.iter().any(|c| {
            c.node == id
                && c.kind == kind
                && c.object_type.eq_ignore_ascii_case(object_type)
                && c.object_name.eq_ignore_ascii_case(object_name)
        });
        if known {
            return Ok(id);
        }
        tracing::trace!(node = name, object_type, object_name, ?kind, "node connection");
        self.connections.push(NodeConnection {
            node: id,
            object_type: object_type.to_string(),
            object_name: object_name.to_string(),
            kind,
        });
        Ok(id)
    }

    /// Look up a node handle by name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(&key(name)).copied()
    }

    pub fn node(&self, id: NodeId) -> GraphResult<&AirNode> {
        self.nodes
            .get(id.slot())
            .ok_or(GraphError::UnknownNode { index: id.slot() })
    }

    pub fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut AirNode> {
        self.nodes
            .get_mut(id.slot())
            .ok_or(GraphError::UnknownNode { index: id.slot() })
    }

    pub fn node_name(&self, id: NodeId) -> &str {
        self.nodes.get(id.slot()).map_or("", |n| n.name.as_str())
    }

    pub fn nodes(&self) -> &[AirNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn connections(&self) -> &[NodeConnection] {
        &self.connections
    }

    /// Connections recorded for one object, in registration order.
    pub fn connections_for<'a>(
        &'a self,
        object_name: &'a str,
    ) -> impl Iterator<Item = &'a NodeConnection> + 'a {
        self.connections
            .iter()
            .filter(move |c| c.object_name.eq_ignore_ascii_case(object_name))
    }
}
