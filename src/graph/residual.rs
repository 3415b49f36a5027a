use crate::graph::FlowNode;
use std::collections::BTreeMap;

/// A flow network in residual form: ordered node pair -> remaining
/// capacity. Every forward entry has a paired reverse entry so that
/// augmentation can cancel flow by crediting the reverse direction.
///
/// Parallel edges between the same ordered pair coalesce here; callers
/// that need per-edge accounting keep their own bound list.
#[derive(Debug, Default, Clone)]
pub struct ResidualGraph {
    capacities: BTreeMap<FlowNode, BTreeMap<FlowNode, f64>>,
}

impl ResidualGraph {
    pub fn new() -> ResidualGraph {
        ResidualGraph::default()
    }

    /// Adds (or accumulates onto) forward capacity from `from` to `to` and
    /// registers the zero reverse entry. Negative capacities are dropped
    /// without error: a degenerate `hi < lo` edge has no usable capacity.
    pub fn add_edge(&mut self, from: FlowNode, to: FlowNode, capacity: f64) {
        if capacity < 0.0 {
            return;
        }
        *self
            .capacities
            .entry(from)
            .or_default()
            .entry(to)
            .or_insert(0.0) += capacity;
        self.capacities.entry(to).or_default().entry(from).or_insert(0.0);
    }

    /// Remaining capacity on the ordered pair, 0 for unknown pairs.
    pub fn residual(&self, from: &FlowNode, to: &FlowNode) -> f64 {
        self.capacities
            .get(from)
            .and_then(|out| out.get(to))
            .copied()
            .unwrap_or(0.0)
    }

    /// Shifts capacity on the ordered pair. Augmentation subtracts the
    /// bottleneck forward and adds it on the reverse pair.
    pub fn adjust(&mut self, from: &FlowNode, to: &FlowNode, delta: f64) {
        *self
            .capacities
            .entry(*from)
            .or_default()
            .entry(*to)
            .or_insert(0.0) += delta;
    }

    /// Neighbors of `from` in canonical order, with their residual
    /// capacity. Includes exhausted pairs; callers filter by threshold.
    pub fn neighbors(&self, from: &FlowNode) -> impl Iterator<Item = (FlowNode, f64)> + '_ {
        self.capacities
            .get(from)
            .into_iter()
            .flat_map(|out| out.iter().map(|(to, capacity)| (*to, *capacity)))
    }
}
