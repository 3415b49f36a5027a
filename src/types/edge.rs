use crate::types::NodeId;

/// A directed link that must carry at least `lower` and at most `upper`
/// units of flow per minute. `upper < lower` is tolerated and collapses to
/// zero usable capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct BoundedEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub lower: f64,
    pub upper: f64,
}
