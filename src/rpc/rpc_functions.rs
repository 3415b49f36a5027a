use crate::rpc::call_context::CallContext;
use crate::solver;
use crate::types::RoutingProblem;
use json::JsonValue;
use regex::Regex;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub struct JsonRpcRequest {
    pub id: JsonValue,
    pub method: String,
    pub params: JsonValue,
}

struct InputValidationError(String);

impl Error for InputValidationError {}

impl Debug for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.0)
    }
}

impl Display for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.0)
    }
}

/// `solve_routing`: params carry one full problem description; the reply
/// is the report object the stdin/stdout solver would print.
pub fn solve_routing(
    request: &JsonRpcRequest,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let problem = parse_and_validate_problem(&request.params)?;
    call_context.log_message(&format!(
        "Routing {} edges, {} sources -> {}",
        problem.edges.len(),
        problem.sources.len(),
        problem.sink
    ));
    let report = solver::route_flow(&problem, call_context);
    report_to_json(&serde_json::to_string(&report)?)
}

/// `check_feasibility`: runs only the lower-bound reduction and reports
/// either `{"status": "feasible"}` or the usual infeasibility object.
pub fn check_feasibility(
    request: &JsonRpcRequest,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let problem = parse_and_validate_problem(&request.params)?;
    match solver::check_feasibility(&problem, call_context) {
        None => Ok(json::object! { status: "feasible" }),
        Some(report) => report_to_json(&serde_json::to_string(&report)?),
    }
}

fn report_to_json(serialized: &str) -> Result<JsonValue, Box<dyn Error>> {
    Ok(json::parse(serialized)?)
}

fn parse_and_validate_problem(params: &JsonValue) -> Result<RoutingProblem, Box<dyn Error>> {
    let problem: RoutingProblem = serde_json::from_str(&params.dump())
        .map_err(|e| InputValidationError(format!("Invalid routing problem: {}", e)))?;
    for name in problem.node_names() {
        validate_node_name(&name)?;
    }
    for edge in &problem.edges {
        validate_rate("lo", edge.lo)?;
        validate_rate("hi", edge.hi)?;
    }
    for spec in problem.nodes.values() {
        if let Some(cap) = spec.cap {
            validate_rate("cap", cap)?;
        }
    }
    for supply in problem.sources.values() {
        validate_rate("source supply", *supply)?;
    }
    Ok(problem)
}

fn validate_node_name(name: &str) -> Result<(), Box<dyn Error>> {
    let re = Regex::new(r"^[^\x00-\x1f\x7f]{1,128}$").unwrap();
    if re.is_match(name) {
        Ok(())
    } else {
        Err(Box::new(InputValidationError(format!(
            "Invalid node name: {:?}",
            name
        ))))
    }
}

fn validate_rate(what: &str, rate: f64) -> Result<(), Box<dyn Error>> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(Box::new(InputValidationError(format!(
            "Invalid {}: {} (rates must be finite and non-negative)",
            what, rate
        ))))
    }
}

#[cfg(test)]
mod test {
    use super::parse_and_validate_problem;

    #[test]
    fn rejects_non_finite_rates() {
        assert!(super::validate_rate("hi", f64::NAN).is_err());
        assert!(super::validate_rate("hi", f64::INFINITY).is_err());
        assert!(super::validate_rate("lo", -3.0).is_err());
        assert!(super::validate_rate("lo", 0.0).is_ok());
    }

    #[test]
    fn rejects_control_characters_in_names() {
        let params = json::object! {
            edges: [ { from: "a\u{0007}", to: "b", hi: 1.0 } ],
            sink: "b",
        };
        assert!(parse_and_validate_problem(&params).is_err());
    }

    #[test]
    fn accepts_minimal_problem() {
        let params = json::object! {
            edges: [ { from: "a", to: "b", hi: 5.0 } ],
            sources: { a: 5.0 },
            sink: "b",
        };
        let problem = parse_and_validate_problem(&params).unwrap();
        assert_eq!(problem.edges.len(), 1);
    }
}
