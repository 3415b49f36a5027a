pub mod edge;
pub mod node;
pub mod problem;
pub mod report;

pub use edge::BoundedEdge;
pub use node::{NodeId, NodeTable};
pub use problem::{EdgeSpec, NodeSpec, RoutingProblem};
pub use report::{Deficit, EdgeFlow, RoutingReport};
