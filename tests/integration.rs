use flowroute::rpc::call_context::CallContext;
use flowroute::solver::route_flow;
use flowroute::types::{Deficit, EdgeFlow, RoutingProblem, RoutingReport};
use std::collections::HashMap;

fn solve(input: &str) -> RoutingReport {
    let problem: RoutingProblem = serde_json::from_str(input).unwrap();
    route_flow(&problem, &CallContext::default())
}

fn flow_entry(from: &str, to: &str, flow: f64) -> EdgeFlow {
    EdgeFlow {
        from: from.to_string(),
        to: to.to_string(),
        flow,
    }
}

/// Conservation, bound and cap satisfaction per the report, to 1e-6.
fn check_flow_properties(input: &str, report: &RoutingReport) {
    let problem: RoutingProblem = serde_json::from_str(input).unwrap();
    let flows = match report {
        RoutingReport::Ok { flows, .. } => flows,
        RoutingReport::Infeasible { .. } => panic!("expected a feasible report"),
    };
    let mut per_edge: HashMap<(&str, &str), f64> = HashMap::new();
    let mut inflow: HashMap<&str, f64> = HashMap::new();
    let mut outflow: HashMap<&str, f64> = HashMap::new();
    for EdgeFlow { from, to, flow } in flows {
        *per_edge.entry((from.as_str(), to.as_str())).or_default() += *flow;
        *inflow.entry(to.as_str()).or_default() += *flow;
        *outflow.entry(from.as_str()).or_default() += *flow;
    }
    for edge in &problem.edges {
        let carried = per_edge
            .get(&(edge.from.as_str(), edge.to.as_str()))
            .copied()
            .unwrap_or(0.0);
        if carried > 0.0 {
            assert!(carried >= edge.lo - 1e-6, "{}->{} below lo", edge.from, edge.to);
            assert!(carried <= edge.hi + 1e-6, "{}->{} above hi", edge.from, edge.to);
        }
    }
    for (name, spec) in &problem.nodes {
        if let Some(cap) = spec.cap {
            let through = inflow.get(name.as_str()).copied().unwrap_or(0.0);
            assert!(through <= cap + 1e-6, "{} exceeds cap", name);
        }
    }
    for name in inflow.keys().chain(outflow.keys()) {
        if problem.sources.contains_key(*name) || *name == problem.sink {
            continue;
        }
        let balance = inflow.get(name).copied().unwrap_or(0.0)
            - outflow.get(name).copied().unwrap_or(0.0);
        assert!(balance.abs() <= 1e-6, "{} not conserved", name);
    }
}

#[test]
fn exact_bound_with_no_return_capacity_is_infeasible() {
    // A mandatory 5/min with nothing to circulate the balancing demand
    // through: the reduction leaves B's demand unreachable.
    let report = solve(
        r#"{"edges": [{"from": "A", "to": "B", "lo": 5.0, "hi": 5.0}],
            "sources": {"A": 5.0}, "sink": "B"}"#,
    );
    assert_eq!(
        report,
        RoutingReport::Infeasible {
            cut_reachable: vec!["B".to_string()],
            deficit: Deficit { demand_balance: 5.0 },
        }
    );
}

#[test]
fn unsatisfiable_lower_bound_reports_full_demand() {
    let report = solve(
        r#"{"edges": [{"from": "A", "to": "B", "lo": 10.0, "hi": 10.0}],
            "sources": {"A": 5.0}, "sink": "B"}"#,
    );
    assert_eq!(
        report,
        RoutingReport::Infeasible {
            cut_reachable: vec!["B".to_string()],
            deficit: Deficit {
                demand_balance: 10.0
            },
        }
    );
}

#[test]
fn node_cap_shortfall_reports_cut_up_to_the_cap() {
    // Supply 10 against a 3/min station: everything up to the split pair
    // stays reachable, the deficit is the unroutable 7.
    let report = solve(
        r#"{"edges": [{"from": "A", "to": "B", "hi": 10.0},
                      {"from": "B", "to": "C", "hi": 10.0}],
            "nodes": {"B": {"cap": 3.0}},
            "sources": {"A": 10.0}, "sink": "C"}"#,
    );
    assert_eq!(
        report,
        RoutingReport::Infeasible {
            cut_reachable: vec!["A".to_string(), "B".to_string()],
            deficit: Deficit { demand_balance: 7.0 },
        }
    );
}

#[test]
fn two_sources_merge_into_one_sink() {
    let input = r#"{"edges": [{"from": "A", "to": "C", "hi": 5.0},
                              {"from": "B", "to": "C", "hi": 6.0}],
                    "sources": {"A": 3.0, "B": 4.0}, "sink": "C"}"#;
    let report = solve(input);
    assert_eq!(
        report,
        RoutingReport::Ok {
            max_flow_per_min: 7.0,
            flows: vec![flow_entry("A", "C", 3.0), flow_entry("B", "C", 4.0)],
        }
    );
    check_flow_properties(input, &report);
}

#[test]
fn recirculating_lower_bounds_ride_on_top_of_routed_flow() {
    // A 2/min recirculation loop A -> B -> C -> A keeps every node
    // balanced, so the bounds are feasible and the routed 4/min stacks on
    // top of the loop where both use the same belt.
    let input = r#"{"edges": [{"from": "X", "to": "A", "hi": 5.0},
                              {"from": "A", "to": "B", "lo": 2.0, "hi": 9.0},
                              {"from": "B", "to": "C", "lo": 2.0, "hi": 9.0},
                              {"from": "C", "to": "A", "lo": 2.0, "hi": 9.0},
                              {"from": "C", "to": "D", "hi": 9.0}],
                    "nodes": {"B": {"cap": 7.0}},
                    "sources": {"X": 4.0}, "sink": "D"}"#;
    let report = solve(input);
    assert_eq!(
        report,
        RoutingReport::Ok {
            max_flow_per_min: 4.0,
            flows: vec![
                flow_entry("X", "A", 4.0),
                flow_entry("A", "B", 6.0),
                flow_entry("B", "C", 6.0),
                flow_entry("C", "A", 2.0),
                flow_entry("C", "D", 4.0),
            ],
        }
    );
    check_flow_properties(input, &report);
}

#[test]
fn zero_supply_routes_nothing() {
    let report = solve(r#"{"edges": [{"from": "A", "to": "B"}], "sink": "B"}"#);
    assert_eq!(
        report,
        RoutingReport::Ok {
            max_flow_per_min: 0.0,
            flows: vec![],
        }
    );
}

#[test]
fn degenerate_bounds_block_the_route() {
    // hi < lo collapses to zero capacity and the edge's lower bound makes
    // the balance unsatisfiable.
    let report = solve(
        r#"{"edges": [{"from": "A", "to": "B", "lo": 4.0, "hi": 1.0}],
            "sources": {"A": 4.0}, "sink": "B"}"#,
    );
    match report {
        RoutingReport::Infeasible { deficit, .. } => {
            assert_eq!(deficit.demand_balance, 4.0);
        }
        RoutingReport::Ok { .. } => panic!("degenerate edge must not route"),
    }
}

#[test]
fn identical_requests_yield_identical_reports() {
    // Several equal-length routes; canonical traversal order must pick
    // the same one every run.
    let input = r#"{"edges": [{"from": "src", "to": "m1", "hi": 6.0},
                              {"from": "src", "to": "m2", "hi": 6.0},
                              {"from": "m1", "to": "out", "hi": 6.0},
                              {"from": "m2", "to": "out", "hi": 6.0}],
                    "sources": {"src": 8.0}, "sink": "out"}"#;
    let first = serde_json::to_string(&solve(input)).unwrap();
    let second = serde_json::to_string(&solve(input)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn report_matches_wire_contract() {
    let ok = serde_json::to_value(solve(
        r#"{"edges": [{"from": "A", "to": "B", "hi": 5.0}],
            "sources": {"A": 5.0}, "sink": "B"}"#,
    ))
    .unwrap();
    assert_eq!(ok["status"], "ok");
    assert_eq!(ok["max_flow_per_min"], 5.0);
    assert_eq!(ok["flows"][0]["from"], "A");
    assert_eq!(ok["flows"][0]["to"], "B");
    assert_eq!(ok["flows"][0]["flow"], 5.0);

    let infeasible = serde_json::to_value(solve(
        r#"{"edges": [{"from": "A", "to": "B", "lo": 2.0, "hi": 2.0}],
            "sources": {"A": 2.0}, "sink": "B"}"#,
    ))
    .unwrap();
    assert_eq!(infeasible["status"], "infeasible");
    assert!(infeasible["cut_reachable"].is_array());
    assert_eq!(infeasible["deficit"]["demand_balance"], 2.0);
}
