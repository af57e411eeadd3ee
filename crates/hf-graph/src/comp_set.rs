//! Component-set registration: which object sits between which nodes.

use crate::error::{GraphError, GraphResult};
use crate::network::NodeNetwork;

/// A component registered between an inlet and an outlet node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompSet {
    pub object_type: String,
    pub object_name: String,
    pub inlet: String,
    pub outlet: String,
    pub description: String,
}

impl CompSet {
    fn label(&self) -> String {
        format!("{}=\"{}\"", self.object_type, self.object_name)
    }

    fn same_object(&self, object_type: &str, object_name: &str) -> bool {
        self.object_type.eq_ignore_ascii_case(object_type)
            && self.object_name.eq_ignore_ascii_case(object_name)
    }
}

impl NodeNetwork {
    /// Register a component between two nodes.
    ///
    /// Fails when the inlet equals the outlet, when either node already plays
    /// the same role for another component, or when the component was
    /// registered before with different nodes. Re-registering identical wiring
    /// is accepted.
    pub fn test_comp_set(
        &mut self,
        object_type: &str,
        object_name: &str,
        inlet: &str,
        outlet: &str,
        description: &str,
    ) -> GraphResult<()> {
        if inlet.trim().eq_ignore_ascii_case(outlet.trim()) {
            return Err(GraphError::SameInletOutlet {
                object_type: object_type.to_string(),
                object_name: object_name.to_string(),
                node: inlet.to_string(),
            });
        }

        let candidate = CompSet {
            object_type: object_type.to_string(),
            object_name: object_name.to_string(),
            inlet: inlet.trim().to_string(),
            outlet: outlet.trim().to_string(),
            description: description.to_string(),
        };

        for existing in &self.comp_sets {
            if existing.same_object(object_type, object_name) {
                if existing.inlet.eq_ignore_ascii_case(&candidate.inlet)
                    && existing.outlet.eq_ignore_ascii_case(&candidate.outlet)
                {
                    return Ok(());
                }
                return Err(GraphError::ConflictingCompSet {
                    object_type: object_type.to_string(),
                    object_name: object_name.to_string(),
                });
            }
            if existing.inlet.eq_ignore_ascii_case(&candidate.inlet) {
                return Err(GraphError::NodeReused {
                    node: candidate.inlet.clone(),
                    role: "inlet",
                    first: existing.label(),
                    second: candidate.label(),
                });
            }
            if existing.outlet.eq_ignore_ascii_case(&candidate.outlet) {
                return Err(GraphError::NodeReused {
                    node: candidate.outlet.clone(),
                    role: "outlet",
                    first: existing.label(),
                    second: candidate.label(),
                });
            }
        }

        self.comp_sets.push(candidate);
        Ok(())
    }

    pub fn comp_sets(&self) -> &[CompSet] {
        &self.comp_sets
    }
}
