use std::collections::BTreeMap;
use std::env;

use flowroute::io;
use flowroute::rpc::call_context::CallContext;
use flowroute::solver::route_flow;
use flowroute::types::RoutingProblem;

fn main() {
    let mut args = env::args().collect::<Vec<_>>();
    let bin = if args.get(1) == Some(&"--bin".to_string()) {
        args = [vec![args[0].clone()], args[2..].to_vec()].concat();
        true
    } else {
        false
    };
    let csv = if args.get(1) == Some(&"--csv".to_string()) {
        args = [vec![args[0].clone()], args[2..].to_vec()].concat();
        true
    } else {
        false
    };
    if bin && csv {
        println!("Options --bin and --csv cannot be used together.");
        return;
    }

    let usage = || {
        println!("Usage: cli <problem.json>");
        println!("Usage: cli --bin <problem.dat>");
        println!("Usage: cli --csv <edges.csv> <source=supply[,source=supply...]> <sink>");
        println!("Option --bin reads the problem in binary format instead of JSON.");
        println!("Option --csv reads a bare edge list and takes sources and sink as arguments.");
    };

    let problem = if csv {
        if args.len() != 4 {
            usage();
            return;
        }
        let edges = io::read_edges_csv(&args[1])
            .unwrap_or_else(|e| panic!("Error loading edges from \"{}\": {}", args[1], e));
        let mut sources = BTreeMap::new();
        for entry in args[2].split(',') {
            match entry.split_once('=') {
                Some((name, supply)) => {
                    let supply = supply
                        .parse()
                        .unwrap_or_else(|_| panic!("Expected source supply, but got: {supply}"));
                    sources.insert(name.to_string(), supply);
                }
                None => panic!("Expected source=supply, but got: {entry}"),
            }
        }
        RoutingProblem {
            edges,
            nodes: BTreeMap::new(),
            sources,
            sink: args[3].clone(),
        }
    } else {
        if args.len() != 2 {
            usage();
            return;
        }
        let read = if bin {
            io::read_problem_binary(&args[1])
        } else {
            io::read_problem_json(&args[1])
        };
        read.unwrap_or_else(|e| panic!("Error loading problem from \"{}\": {}", args[1], e))
    };

    println!(
        "Routing {} edges, {} sources -> {}",
        problem.edges.len(),
        problem.sources.len(),
        problem.sink
    );
    let report = route_flow(&problem, &CallContext::default());
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}
