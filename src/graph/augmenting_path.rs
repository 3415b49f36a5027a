use crate::graph::{FlowNode, ResidualGraph, RESIDUAL_EPSILON};
use std::collections::{HashMap, VecDeque};

/// Finds a shortest augmenting path (by edge count) from `source` to
/// `sink` and returns its bottleneck capacity together with the path in
/// sink-to-source order. Returns zero flow and an empty path if the sink
/// is unreachable.
///
/// Neighbors are expanded in canonical node order so that among equal
/// length paths the same one is chosen for identical input.
pub fn augmenting_path(
    source: FlowNode,
    sink: FlowNode,
    graph: &ResidualGraph,
) -> (f64, Vec<FlowNode>) {
    if source == sink {
        return (0.0, vec![]);
    }
    let mut parent = HashMap::new();
    let mut queue = VecDeque::<(FlowNode, f64)>::new();
    queue.push_back((source, f64::INFINITY));
    while let Some((node, flow)) = queue.pop_front() {
        for (target, capacity) in graph.neighbors(&node) {
            if target != source && !parent.contains_key(&target) && capacity > RESIDUAL_EPSILON {
                parent.insert(target, node);
                let new_flow = flow.min(capacity);
                if target == sink {
                    return (new_flow, trace(&parent, &source, &sink));
                }
                queue.push_back((target, new_flow));
            }
        }
    }
    (0.0, vec![])
}

fn trace(parent: &HashMap<FlowNode, FlowNode>, source: &FlowNode, sink: &FlowNode) -> Vec<FlowNode> {
    let mut path = vec![*sink];
    let mut node = sink;
    loop {
        node = &parent[node];
        path.push(*node);
        if *node == *source {
            break;
        }
    }
    path
}
