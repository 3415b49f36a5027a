use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One routing request: a bounded-edge network, optional per-node
/// throughput caps, weighted sources and a single sink.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct RoutingProblem {
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeSpec>,
    #[serde(default)]
    pub sources: BTreeMap<String, f64>,
    pub sink: String,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub lo: f64,
    #[serde(default)]
    pub hi: f64,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct NodeSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<f64>,
}

impl RoutingProblem {
    /// Every node name mentioned anywhere in the request.
    pub fn node_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for edge in &self.edges {
            names.push(edge.from.clone());
            names.push(edge.to.clone());
        }
        names.extend(self.nodes.keys().cloned());
        names.extend(self.sources.keys().cloned());
        names.push(self.sink.clone());
        names
    }

    pub fn total_supply(&self) -> f64 {
        self.sources.values().sum()
    }
}

#[cfg(test)]
mod test {
    use super::RoutingProblem;

    #[test]
    fn bounds_default_to_zero() {
        let problem: RoutingProblem = serde_json::from_str(
            r#"{"edges": [{"from": "a", "to": "b"}], "sink": "b"}"#,
        )
        .unwrap();
        assert_eq!(problem.edges[0].lo, 0.0);
        assert_eq!(problem.edges[0].hi, 0.0);
    }

    #[test]
    fn sink_is_required() {
        assert!(serde_json::from_str::<RoutingProblem>(r#"{"edges": []}"#).is_err());
    }
}
