use serde::Serialize;

/// The single JSON object written per invocation. Infeasibility is a
/// normal result, not a process error.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoutingReport {
    Ok {
        max_flow_per_min: f64,
        flows: Vec<EdgeFlow>,
    },
    Infeasible {
        cut_reachable: Vec<String>,
        deficit: Deficit,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EdgeFlow {
    pub from: String,
    pub to: String,
    pub flow: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Deficit {
    pub demand_balance: f64,
}

impl RoutingReport {
    pub fn is_feasible(&self) -> bool {
        matches!(self, RoutingReport::Ok { .. })
    }
}

#[cfg(test)]
mod test {
    use super::{Deficit, EdgeFlow, RoutingReport};

    #[test]
    fn status_tag() {
        let ok = serde_json::to_string(&RoutingReport::Ok {
            max_flow_per_min: 5.0,
            flows: vec![EdgeFlow {
                from: "a".to_string(),
                to: "b".to_string(),
                flow: 5.0,
            }],
        })
        .unwrap();
        assert!(ok.starts_with(r#"{"status":"ok""#));

        let infeasible = serde_json::to_string(&RoutingReport::Infeasible {
            cut_reachable: vec!["a".to_string()],
            deficit: Deficit { demand_balance: 2.0 },
        })
        .unwrap();
        assert!(infeasible.contains(r#""demand_balance":2.0"#));
    }
}
