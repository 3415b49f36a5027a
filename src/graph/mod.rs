use crate::types::NodeId;

mod augmenting_path;
mod residual;

pub mod flow;

// A node of the flow graph. Every user-level node with a declared
// throughput cap is replaced by a split pair: incoming edges attach to
// SplitIn, outgoing edges leave from SplitOut, and a single internal edge
// SplitIn -> SplitOut carries the cap. SuperSource/SuperSink exist only
// while one of the two pipeline stages runs; none of the synthetic
// variants ever appears in a report.
//
// Ord is derived: within a variant, NodeId order is lexicographic name
// order (see NodeTable), which makes BTreeMap-based traversal canonical.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum FlowNode {
    Node(NodeId),
    SplitIn(NodeId),
    SplitOut(NodeId),
    SuperSource,
    SuperSink,
}

impl FlowNode {
    /// The user-level node behind this flow-graph node, if any.
    pub fn original(&self) -> Option<NodeId> {
        match self {
            FlowNode::Node(id) | FlowNode::SplitIn(id) | FlowNode::SplitOut(id) => Some(*id),
            FlowNode::SuperSource | FlowNode::SuperSink => None,
        }
    }
}

/// Residual capacities at or below this are treated as exhausted during
/// path search. Must stay smaller than FLOW_EPSILON or augmentation can
/// stall on rounding noise.
pub const RESIDUAL_EPSILON: f64 = 1e-12;

/// Tolerance for comparing accumulated flow against demands and supplies,
/// and for deciding whether an edge carries any flow at all.
pub const FLOW_EPSILON: f64 = 1e-9;

pub use flow::{max_flow, reachable_from};
pub use residual::ResidualGraph;
