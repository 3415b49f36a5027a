use std::io::Read;

use flowroute::rpc::call_context::CallContext;
use flowroute::solver::route_flow;
use flowroute::types::RoutingProblem;

/// One-shot mode: a single JSON request on stdin, a single JSON report on
/// stdout. Infeasibility is an ordinary report, so the exit status is 0
/// for every well-formed request.
fn main() {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .expect("Error reading request from stdin.");
    let problem: RoutingProblem =
        serde_json::from_str(&input).expect("Invalid routing request.");
    let report = route_flow(&problem, &CallContext::default());
    println!(
        "{}",
        serde_json::to_string(&report).expect("Error serializing report.")
    );
}
