//! hf-graph: air-node network for hvacflow.
//!
//! Provides:
//! - `AirNode`, the state record every component reads and writes
//! - `NodeNetwork`, a name-indexed store of nodes with connection bookkeeping
//! - Component-set registration (`test_comp_set`) that rejects inconsistent
//!   inlet/outlet wiring
//!
//! # Example
//!
//! ```
//! use hf_graph::{ConnectionKind, NodeNetwork};
//!
//! let mut net = NodeNetwork::new();
//! let inlet = net
//!     .get_only_single_node("Zone Inlet", "Humidifier:Steam:Electric", "H1", ConnectionKind::Inlet)
//!     .unwrap();
//! let again = net.find_node("ZONE INLET").unwrap();
//! assert_eq!(inlet, again);
//! ```

pub mod comp_set;
pub mod error;
pub mod network;
pub mod node;

// Re-exports for ergonomics
pub use comp_set::CompSet;
pub use error::{GraphError, GraphResult};
pub use network::{ConnectionKind, NodeConnection, NodeNetwork};
pub use node::{AirNode, SENSED_NODE_FLAG};
