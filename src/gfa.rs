//! GFA 1 reader
//!
//! Loads segments (`S`), links (`L`) and paths (`P`) into a [`HashGraph`].
//! Header lines, comments and other record types are skipped. Segment names
//! must be numeric since they become node ids.

use crate::graph::{GraphError, Handle, HashGraph, NodeId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading GFA
#[derive(Debug, Error)]
pub enum GfaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Graph {
        line: usize,
        #[source]
        source: GraphError,
    },
}

/// Result type for GFA operations
pub type GfaResult<T> = Result<T, GfaError>;

fn parse_error(line: usize, message: impl Into<String>) -> GfaError {
    GfaError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_id(line: usize, name: &str) -> GfaResult<NodeId> {
    name.parse::<u64>()
        .map(NodeId::new)
        .map_err(|_| parse_error(line, format!("segment name '{}' is not a numeric id", name)))
}

fn parse_orientation(line: usize, field: &str) -> GfaResult<bool> {
    match field {
        "+" => Ok(false),
        "-" => Ok(true),
        other => Err(parse_error(line, format!("invalid orientation '{}'", other))),
    }
}

/// Parse a path segment list such as `1+,2-,3+`
fn parse_walk(line: usize, field: &str) -> GfaResult<Vec<Handle>> {
    if field == "*" || field.is_empty() {
        return Ok(Vec::new());
    }
    field
        .split(',')
        .map(|step| {
            let split = step.char_indices().last().map_or(0, |(index, _)| index);
            let (name, orientation) = step.split_at(split);
            Ok(Handle::new(
                parse_id(line, name)?,
                parse_orientation(line, orientation)?,
            ))
        })
        .collect()
}

/// A record that references segments, applied once every segment is known
enum Pending {
    Link { line: usize, left: Handle, right: Handle },
    Path { line: usize, name: String, walk: Vec<Handle> },
}

/// Read a GFA document into a new graph
pub fn read_gfa<R: BufRead>(reader: R) -> GfaResult<HashGraph> {
    let mut graph = HashGraph::new();
    let mut pending = Vec::new();

    for (index, text) in reader.lines().enumerate() {
        let line = index + 1;
        let text = text?;
        let fields: Vec<&str> = text.trim_end_matches('\r').split('\t').collect();

        match fields.as_slice() {
            ["S", name, sequence, ..] => {
                if *sequence == "*" {
                    return Err(parse_error(line, "segments without sequence are not supported"));
                }
                let id = parse_id(line, name)?;
                graph
                    .create_handle(id, *sequence)
                    .map_err(|source| GfaError::Graph { line, source })?;
            }
            ["L", from, from_orient, to, to_orient, rest @ ..] => {
                if let Some(overlap) = rest.first().filter(|o| !matches!(**o, "*" | "0M")) {
                    debug!(line, overlap, "ignoring link overlap");
                }
                pending.push(Pending::Link {
                    line,
                    left: Handle::new(parse_id(line, from)?, parse_orientation(line, from_orient)?),
                    right: Handle::new(parse_id(line, to)?, parse_orientation(line, to_orient)?),
                });
            }
            ["P", name, walk, ..] => {
                pending.push(Pending::Path {
                    line,
                    name: name.to_string(),
                    walk: parse_walk(line, walk)?,
                });
            }
            ["S" | "L" | "P", ..] => {
                return Err(parse_error(line, format!("truncated {} record", fields[0])));
            }
            _ => {}
        }
    }

    for record in pending {
        match record {
            Pending::Link { line, left, right } => graph
                .create_edge(left, right)
                .map_err(|source| GfaError::Graph { line, source })?,
            Pending::Path { line, name, walk } => {
                let path = graph
                    .create_path(name)
                    .map_err(|source| GfaError::Graph { line, source })?;
                for handle in walk {
                    graph
                        .append_step(path, handle)
                        .map_err(|source| GfaError::Graph { line, source })?;
                }
            }
        }
    }

    Ok(graph)
}

/// Read a GFA file into a new graph
pub fn read_gfa_file(path: impl AsRef<Path>) -> GfaResult<HashGraph> {
    let file = File::open(path.as_ref())?;
    read_gfa(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{HandleGraph, PathHandleGraph};

    const SAMPLE: &str = "H\tVN:Z:1.0\n\
        S\t1\tACGT\n\
        S\t2\tGG\tLN:i:2\n\
        S\t3\tT\n\
        L\t1\t+\t2\t+\t0M\n\
        L\t2\t+\t3\t-\t*\n\
        P\tref\t1+,2+,3-\t*\n";

    #[test]
    fn test_reads_segments_links_and_paths() {
        let graph = read_gfa(SAMPLE.as_bytes()).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        let two = Handle::forward(NodeId::new(2));
        let three = Handle::forward(NodeId::new(3));
        assert!(graph.has_edge(two, three.flip()));

        let path = graph.get_path_handle("ref").unwrap();
        let walk: Vec<Handle> = graph
            .path_steps(path)
            .into_iter()
            .map(|step| graph.get_handle_of_step(step))
            .collect();
        assert_eq!(walk, vec![Handle::forward(NodeId::new(1)), two, three.flip()]);
    }

    #[test]
    fn test_links_may_precede_segments() {
        let gfa = "L\t1\t+\t2\t+\t0M\nS\t1\tA\nS\t2\tC\n";
        let graph = read_gfa(gfa.as_bytes()).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_non_numeric_segment_name() {
        let err = read_gfa("S\tchr1\tACGT\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GfaError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_link_to_missing_segment_reports_line() {
        let gfa = "S\t1\tA\nL\t1\t+\t5\t+\t0M\n";
        let err = read_gfa(gfa.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            GfaError::Graph {
                line: 2,
                source: GraphError::NodeNotFound(_)
            }
        ));
    }

    #[test]
    fn test_bad_orientation() {
        let err = read_gfa("S\t1\tA\nP\tx\t1*\t*\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GfaError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_truncated_record() {
        let err = read_gfa("S\t1\n".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "line 1: truncated S record");
    }
}
