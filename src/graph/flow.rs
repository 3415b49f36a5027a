use crate::graph::augmenting_path::augmenting_path;
use crate::graph::{FlowNode, ResidualGraph, FLOW_EPSILON};
use std::collections::BTreeSet;

/// Pushes flow along shortest augmenting paths until none remains and
/// returns the total. The graph is left in its saturated residual state,
/// which callers read back for cut witnesses and per-edge flow.
///
/// Terminates because every augmentation saturates at least one path edge
/// below the traversal threshold and capacities are finite.
pub fn max_flow(graph: &mut ResidualGraph, source: FlowNode, sink: FlowNode) -> f64 {
    let mut flow = 0.0;
    loop {
        let (new_flow, path) = augmenting_path(source, sink, graph);
        if path.is_empty() {
            break;
        }
        flow += new_flow;
        // The path is in sink-to-source order, so `prev` is the tail of
        // each forward edge.
        for window in path.windows(2) {
            if let [node, prev] = window {
                graph.adjust(prev, node, -new_flow);
                graph.adjust(node, prev, new_flow);
            }
        }
    }
    flow
}

/// Every node reachable from `start` through edges that still have
/// residual capacity. On a saturated graph this is the source side of a
/// minimum cut. Iterative on purpose: the recursion depth of a
/// depth-first version is unbounded in the node count.
pub fn reachable_from(graph: &ResidualGraph, start: FlowNode) -> BTreeSet<FlowNode> {
    let mut reachable = BTreeSet::new();
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        if !reachable.insert(node) {
            continue;
        }
        for (target, capacity) in graph.neighbors(&node) {
            if capacity > FLOW_EPSILON && !reachable.contains(&target) {
                stack.push(target);
            }
        }
    }
    reachable
}
