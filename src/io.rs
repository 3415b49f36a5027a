use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};

use crate::types::{EdgeSpec, NodeSpec, NodeTable, RoutingProblem};

pub fn read_problem_json(path: &str) -> Result<RoutingProblem, io::Error> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn write_problem_json(problem: &RoutingProblem, path: &str) -> Result<(), io::Error> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, problem)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Edge lists as `from,to,lo,hi` lines. Carries edges only; caps, sources
/// and the sink are supplied by the caller.
pub fn read_edges_csv(path: &str) -> Result<Vec<EdgeSpec>, io::Error> {
    let mut edges = Vec::new();
    let f = BufReader::new(File::open(path)?);
    for line in f.lines() {
        let line = line?;
        match &line.split(',').collect::<Vec<_>>()[..] {
            [] | [""] => continue,
            [from, to, lo, hi] => {
                let lo = parse_rate(unescape(lo))?;
                let hi = parse_rate(unescape(hi))?;
                edges.push(EdgeSpec {
                    from: unescape(from).to_string(),
                    to: unescape(to).to_string(),
                    lo,
                    hi,
                });
            }
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("Expected from,to,lo,hi, but got {line}"),
                ))
            }
        }
    }
    Ok(edges)
}

pub fn write_edges_csv(edges: &[EdgeSpec], path: &str) -> Result<(), io::Error> {
    let mut file = File::create(path)?;
    for EdgeSpec { from, to, lo, hi } in edges {
        writeln!(file, "{from},{to},{lo},{hi}")?;
    }
    Ok(())
}

/// Compact binary problem format: a sorted name table up front, then all
/// rates as raw f64 bits, everything big-endian and name references as
/// u32 table indices.
pub fn read_problem_binary(path: &str) -> Result<RoutingProblem, io::Error> {
    let mut f = File::open(path)?;
    let names = read_name_table(&mut f)?;

    let mut nodes = BTreeMap::new();
    for _ in 0..read_u32(&mut f)? {
        let name = read_name(&mut f, &names)?;
        let cap = read_f64(&mut f)?;
        nodes.insert(name, NodeSpec { cap: Some(cap) });
    }

    let mut edges = Vec::new();
    for _ in 0..read_u32(&mut f)? {
        let from = read_name(&mut f, &names)?;
        let to = read_name(&mut f, &names)?;
        let lo = read_f64(&mut f)?;
        let hi = read_f64(&mut f)?;
        edges.push(EdgeSpec { from, to, lo, hi });
    }

    let mut sources = BTreeMap::new();
    for _ in 0..read_u32(&mut f)? {
        let name = read_name(&mut f, &names)?;
        let supply = read_f64(&mut f)?;
        sources.insert(name, supply);
    }

    let sink = read_name(&mut f, &names)?;
    Ok(RoutingProblem {
        edges,
        nodes,
        sources,
        sink,
    })
}

pub fn write_problem_binary(problem: &RoutingProblem, path: &str) -> Result<(), io::Error> {
    let mut file = File::create(path)?;
    let table = NodeTable::new(problem.node_names());

    write_u32(&mut file, table.len() as u32)?;
    for name in table.names() {
        write_string(&mut file, name)?;
    }

    let caps = problem
        .nodes
        .iter()
        .filter_map(|(name, spec)| spec.cap.map(|cap| (name, cap)))
        .collect::<Vec<_>>();
    write_u32(&mut file, caps.len() as u32)?;
    for (name, cap) in caps {
        write_name(&mut file, name, &table)?;
        write_f64(&mut file, cap)?;
    }

    write_u32(&mut file, problem.edges.len() as u32)?;
    for EdgeSpec { from, to, lo, hi } in &problem.edges {
        write_name(&mut file, from, &table)?;
        write_name(&mut file, to, &table)?;
        write_f64(&mut file, *lo)?;
        write_f64(&mut file, *hi)?;
    }

    write_u32(&mut file, problem.sources.len() as u32)?;
    for (name, supply) in &problem.sources {
        write_name(&mut file, name, &table)?;
        write_f64(&mut file, *supply)?;
    }

    write_name(&mut file, &problem.sink, &table)
}

fn read_name_table(file: &mut File) -> Result<Vec<String>, io::Error> {
    let count = read_u32(file)?;
    let mut names = Vec::new();
    for _ in 0..count {
        names.push(read_string(file)?);
    }
    Ok(names)
}

fn read_name(file: &mut File, names: &[String]) -> Result<String, io::Error> {
    let index = read_u32(file)? as usize;
    names.get(index).cloned().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Name index {index} out of range"),
        )
    })
}

fn write_name(file: &mut File, name: &str, table: &NodeTable) -> Result<(), io::Error> {
    match table.id(name) {
        Some(id) => write_u32(file, id.index() as u32),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Name {name} missing from table"),
        )),
    }
}

fn read_u32(file: &mut File) -> Result<u32, io::Error> {
    let mut buf = [0; 4];
    file.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn write_u32(file: &mut File, v: u32) -> Result<(), io::Error> {
    file.write_all(&v.to_be_bytes())
}

fn read_f64(file: &mut File) -> Result<f64, io::Error> {
    let mut buf = [0; 8];
    file.read_exact(&mut buf)?;
    Ok(f64::from_be_bytes(buf))
}

fn write_f64(file: &mut File, v: f64) -> Result<(), io::Error> {
    file.write_all(&v.to_be_bytes())
}

fn read_string(file: &mut File) -> Result<String, io::Error> {
    let length = read_u32(file)? as usize;
    let mut bytes = vec![0u8; length];
    file.read_exact(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_string(file: &mut File, s: &str) -> Result<(), io::Error> {
    write_u32(file, s.len() as u32)?;
    file.write_all(s.as_bytes())
}

fn parse_rate(input: &str) -> Result<f64, io::Error> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Invalid rate {input}: {e}")))
}

fn unescape(input: &str) -> &str {
    match input.chars().next() {
        Some('"') | Some('\'') => {
            assert!(input.len() >= 2 && input.chars().last() == input.chars().next());
            &input[1..input.len() - 1]
        }
        _ => input,
    }
}

#[cfg(test)]
mod test {
    use super::{read_edges_csv, read_problem_binary, write_edges_csv, write_problem_binary};
    use crate::types::RoutingProblem;

    fn scratch(name: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!("flowroute-io-{name}"));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn csv_quoting() {
        let path = scratch("edges.csv");
        std::fs::write(&path, "\"iron drop-off\",smelter,0,45\nsmelter,'belt 2',7.5,30\n").unwrap();
        let edges = read_edges_csv(&path).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].from, "iron drop-off");
        assert_eq!(edges[1].to, "belt 2");
        assert_eq!(edges[1].lo, 7.5);

        let out = scratch("edges-out.csv");
        write_edges_csv(&edges, &out).unwrap();
        assert_eq!(read_edges_csv(&out).unwrap().len(), 2);
    }

    #[test]
    fn binary_preserves_problem() {
        let problem: RoutingProblem = serde_json::from_str(
            r#"{
                "edges": [{"from": "a", "to": "b", "lo": 1.0, "hi": 9.0}],
                "nodes": {"b": {"cap": 4.0}},
                "sources": {"a": 3.0},
                "sink": "b"
            }"#,
        )
        .unwrap();
        let path = scratch("problem.dat");
        write_problem_binary(&problem, &path).unwrap();
        let restored = read_problem_binary(&path).unwrap();
        assert_eq!(restored.sink, "b");
        assert_eq!(restored.edges[0].hi, 9.0);
        assert_eq!(restored.nodes["b"].cap, Some(4.0));
        assert_eq!(restored.sources["a"], 3.0);
    }
}
