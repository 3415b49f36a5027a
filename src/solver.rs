use crate::graph::{max_flow, reachable_from, FlowNode, ResidualGraph, FLOW_EPSILON};
use crate::network::BoundedNetwork;
use crate::rpc::call_context::CallContext;
use crate::types::{Deficit, EdgeFlow, NodeId, RoutingProblem, RoutingReport};
use std::collections::BTreeSet;

/// Runs the full pipeline for one request: the lower-bound feasibility
/// reduction first, then the real source-to-sink optimization on a freshly
/// built network, then per-edge extraction. Both infeasibility classes
/// come back as ordinary reports.
pub fn route_flow(problem: &RoutingProblem, call_context: &CallContext) -> RoutingReport {
    let network = BoundedNetwork::compile(problem);
    if let Some(report) = check_lower_bounds(&network, call_context) {
        return report;
    }
    route_supplies(&network, call_context)
}

/// Stage one alone: the demand-balancing reduction. `None` means the
/// lower bounds are satisfiable.
pub fn check_feasibility(
    problem: &RoutingProblem,
    call_context: &CallContext,
) -> Option<RoutingReport> {
    let network = BoundedNetwork::compile(problem);
    check_lower_bounds(&network, call_context)
}

fn check_lower_bounds(
    network: &BoundedNetwork,
    call_context: &CallContext,
) -> Option<RoutingReport> {
    let feasibility = network.feasibility_network();
    let mut graph = feasibility.graph;
    let flow = max_flow(&mut graph, FlowNode::SuperSource, FlowNode::SuperSink);
    call_context.log_message(&format!(
        "Demand balance: routed {} of {}",
        flow, feasibility.total_demand
    ));
    if flow + FLOW_EPSILON < feasibility.total_demand {
        Some(RoutingReport::Infeasible {
            cut_reachable: cut_witness(&graph, network),
            deficit: Deficit {
                demand_balance: feasibility.total_demand - flow,
            },
        })
    } else {
        None
    }
}

fn route_supplies(network: &BoundedNetwork, call_context: &CallContext) -> RoutingReport {
    let mut graph = network.routing_network();
    let sink = network.inbound(network.sink());
    let total_supply = network.total_supply();
    let flow = max_flow(&mut graph, FlowNode::SuperSource, sink);
    call_context.log_message(&format!("Max flow: {} of {} supplied", flow, total_supply));
    if flow + FLOW_EPSILON < total_supply {
        return RoutingReport::Infeasible {
            cut_reachable: cut_witness(&graph, network),
            deficit: Deficit {
                demand_balance: total_supply - flow,
            },
        };
    }
    RoutingReport::Ok {
        max_flow_per_min: total_supply,
        flows: extract_flows(&graph, network),
    }
}

/// Reads back the flow each original edge actually carries: its lower
/// bound plus the credit accumulated on the reverse residual pair.
fn extract_flows(graph: &ResidualGraph, network: &BoundedNetwork) -> Vec<EdgeFlow> {
    let table = network.table();
    let mut flows = Vec::new();
    for edge in network.edges() {
        let routed = graph.residual(&network.inbound(edge.to), &network.outbound(edge.from));
        let actual = edge.lower + routed;
        if actual > FLOW_EPSILON {
            flows.push(EdgeFlow {
                from: table.name(edge.from).to_string(),
                to: table.name(edge.to).to_string(),
                flow: actual,
            });
        }
    }
    flows
}

/// Minimum-cut witness: the user-level nodes reachable from the
/// super-source in the saturated residual graph. Split-pair members are
/// reported as their original node; super nodes are omitted. Sorted by
/// name through NodeId order.
fn cut_witness(graph: &ResidualGraph, network: &BoundedNetwork) -> Vec<String> {
    let reachable: BTreeSet<NodeId> = reachable_from(graph, FlowNode::SuperSource)
        .into_iter()
        .filter_map(|node| node.original())
        .collect();
    reachable
        .into_iter()
        .map(|id| network.table().name(id).to_string())
        .collect()
}
