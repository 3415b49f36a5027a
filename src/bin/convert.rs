use std::env;

use flowroute::io::{
    read_problem_binary, read_problem_json, write_edges_csv, write_problem_binary,
    write_problem_json,
};

fn main() {
    let operation = env::args().nth(1).and_then(|op| {
        if matches!(
            op.as_str(),
            "--json-to-bin" | "--bin-to-json" | "--json-to-edges-csv"
        ) {
            Some(op)
        } else {
            None
        }
    });
    if env::args().len() != 4 || operation.is_none() {
        println!("Usage: convert --json-to-bin <problem.json> <problem.dat>");
        println!("Usage: convert --bin-to-json <problem.dat> <problem.json>");
        println!("Usage: convert --json-to-edges-csv <problem.json> <edges.csv>");
        return;
    }

    let input = env::args().nth(2).unwrap();
    let output = env::args().nth(3).unwrap();
    match operation.unwrap().as_str() {
        "--json-to-bin" => {
            let problem = read_problem_json(&input).unwrap();
            println!("Imported {} edges.", problem.edges.len());
            write_problem_binary(&problem, &output).unwrap();
            println!("Export done.");
        }
        "--bin-to-json" => {
            let problem = read_problem_binary(&input).unwrap();
            println!("Imported {} edges.", problem.edges.len());
            write_problem_json(&problem, &output).unwrap();
            println!("Export done.");
        }
        "--json-to-edges-csv" => {
            let problem = read_problem_json(&input).unwrap();
            println!("Imported {} edges.", problem.edges.len());
            write_edges_csv(&problem.edges, &output).unwrap();
            println!("Export done.");
        }
        _ => unreachable!(),
    }
}
