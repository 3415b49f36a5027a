use crate::graph::{FlowNode, ResidualGraph, FLOW_EPSILON};
use crate::types::{BoundedEdge, NodeId, NodeTable, RoutingProblem};
use std::collections::BTreeMap;

/// A routing problem compiled into interned, split form. Built once per
/// request; the feasibility and routing graphs are derived from it
/// independently so the first stage's demand edges never leak into the
/// second.
#[derive(Debug)]
pub struct BoundedNetwork {
    table: NodeTable,
    edges: Vec<BoundedEdge>,
    caps: BTreeMap<NodeId, f64>,
    sources: BTreeMap<NodeId, f64>,
    sink: NodeId,
}

/// The demand-balancing reduction of the lower bounds: a residual graph
/// wired to the super pair, and the total inflow the super-source must be
/// able to deliver for the bounds to be satisfiable.
#[derive(Debug)]
pub struct FeasibilityNetwork {
    pub graph: ResidualGraph,
    pub total_demand: f64,
}

impl BoundedNetwork {
    pub fn compile(problem: &RoutingProblem) -> BoundedNetwork {
        let table = NodeTable::new(problem.node_names());
        let edges = problem
            .edges
            .iter()
            .map(|e| BoundedEdge {
                from: table.id(&e.from).unwrap(),
                to: table.id(&e.to).unwrap(),
                lower: e.lo,
                upper: e.hi,
            })
            .collect();
        let caps = problem
            .nodes
            .iter()
            .filter_map(|(name, spec)| spec.cap.map(|cap| (table.id(name).unwrap(), cap)))
            .collect();
        let sources = problem
            .sources
            .iter()
            .map(|(name, supply)| (table.id(name).unwrap(), *supply))
            .collect();
        let sink = table.id(&problem.sink).unwrap();
        BoundedNetwork {
            table,
            edges,
            caps,
            sources,
            sink,
        }
    }

    pub fn table(&self) -> &NodeTable {
        &self.table
    }

    pub fn edges(&self) -> &[BoundedEdge] {
        &self.edges
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    pub fn total_supply(&self) -> f64 {
        self.sources.values().sum()
    }

    /// Flow-graph endpoint that receives traffic addressed to `node`.
    pub fn inbound(&self, node: NodeId) -> FlowNode {
        if self.caps.contains_key(&node) {
            FlowNode::SplitIn(node)
        } else {
            FlowNode::Node(node)
        }
    }

    /// Flow-graph endpoint that traffic leaving `node` originates from.
    pub fn outbound(&self, node: NodeId) -> FlowNode {
        if self.caps.contains_key(&node) {
            FlowNode::SplitOut(node)
        } else {
            FlowNode::Node(node)
        }
    }

    // Every bound-carrying pair in flow-graph space: the user edges with
    // their endpoints rerouted through split pairs, plus the internal
    // cap edge of each split node.
    fn bounded_pairs(&self) -> Vec<(FlowNode, FlowNode, f64, f64)> {
        let mut pairs = self
            .edges
            .iter()
            .map(|e| (self.outbound(e.from), self.inbound(e.to), e.lower, e.upper))
            .collect::<Vec<_>>();
        for (node, cap) in &self.caps {
            pairs.push((FlowNode::SplitIn(*node), FlowNode::SplitOut(*node), 0.0, *cap));
        }
        pairs
    }

    /// First-stage network: bound slack as capacity, lower bounds turned
    /// into per-node imbalance and wired to the super pair. Nodes whose
    /// imbalance is below the comparison tolerance count as balanced and
    /// get no demand edge.
    pub fn feasibility_network(&self) -> FeasibilityNetwork {
        let mut graph = ResidualGraph::new();
        let mut imbalance: BTreeMap<FlowNode, f64> = BTreeMap::new();
        for (tail, head, lower, upper) in self.bounded_pairs() {
            graph.add_edge(tail, head, (upper - lower).max(0.0));
            *imbalance.entry(tail).or_insert(0.0) -= lower;
            *imbalance.entry(head).or_insert(0.0) += lower;
        }
        // The demand total keeps sub-tolerance imbalances; the comparison
        // tolerance in the solver absorbs them.
        let total_demand = imbalance.values().filter(|b| **b > 0.0).sum();
        for (node, balance) in imbalance {
            if balance.abs() < FLOW_EPSILON {
                continue;
            }
            if balance > 0.0 {
                graph.add_edge(FlowNode::SuperSource, node, balance);
            } else {
                graph.add_edge(node, FlowNode::SuperSink, -balance);
            }
        }
        FeasibilityNetwork {
            graph,
            total_demand,
        }
    }

    /// Second-stage network: the same capacity skeleton rebuilt from
    /// scratch, with the super-source feeding each declared source at its
    /// declared supply. The sink is the declared sink's inbound endpoint.
    pub fn routing_network(&self) -> ResidualGraph {
        let mut graph = ResidualGraph::new();
        for (tail, head, lower, upper) in self.bounded_pairs() {
            graph.add_edge(tail, head, (upper - lower).max(0.0));
        }
        for (source, supply) in &self.sources {
            graph.add_edge(FlowNode::SuperSource, self.inbound(*source), *supply);
        }
        graph
    }
}
