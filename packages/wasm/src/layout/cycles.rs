//! Depth-first cycle search used to pick the barycentric anchor ring.
//!
//! A single DFS over all nodes with a three-state mark and a parent pointer
//! per node. Every edge that reaches a node still on the DFS path (a
//! back-edge) yields one cycle, rebuilt by walking parent pointers. This is
//! not a cycle basis: overlapping cycles are reported, and with several
//! interleaved back-edges a reported path is not guaranteed to be simple.
//! Callers only need the longest one.
//!
//! The walk to a node's own DFS parent is skipped, so an undirected edge is
//! never mistaken for a two-node cycle. The same rule also hides reciprocal
//! directed pairs `a→b, b→a`.

use std::collections::HashMap;

use crate::error::Result;
use crate::graph::{GraphEngine, NodeId};

/// DFS visit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Explicit DFS stack frame.
struct Frame {
    node: NodeId,
    neighbors: Vec<NodeId>,
    cursor: usize,
}

/// Find cycles in `graph`, one per back-edge, in discovery order.
///
/// Each cycle starts at the revisited ancestor and follows the DFS path down
/// to the node whose edge closed it. Acyclic graphs yield an empty vec.
pub fn find_cycles(graph: &GraphEngine) -> Result<Vec<Vec<NodeId>>> {
    let mut marks: HashMap<NodeId, Mark> =
        graph.node_ids().map(|id| (id, Mark::Unvisited)).collect();
    let mut parents: HashMap<NodeId, NodeId> = HashMap::with_capacity(marks.len());
    let mut cycles = Vec::new();

    let roots: Vec<NodeId> = graph.node_ids().collect();
    for root in roots {
        if marks.get(&root) != Some(&Mark::Unvisited) {
            continue;
        }

        marks.insert(root, Mark::InProgress);
        let mut stack = vec![Frame {
            node: root,
            neighbors: graph.neighbors(root)?,
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&next) = frame.neighbors.get(frame.cursor) else {
                marks.insert(frame.node, Mark::Done);
                stack.pop();
                continue;
            };
            frame.cursor += 1;
            let node = frame.node;

            if parents.get(&node) == Some(&next) {
                continue;
            }

            match marks.get(&next).copied().unwrap_or(Mark::Done) {
                Mark::Done => {}
                Mark::InProgress => cycles.push(trace_cycle(&parents, node, next)),
                Mark::Unvisited => {
                    marks.insert(next, Mark::InProgress);
                    parents.insert(next, node);
                    stack.push(Frame {
                        node: next,
                        neighbors: graph.neighbors(next)?,
                        cursor: 0,
                    });
                }
            }
        }
    }

    log::debug!(
        "cycle search over {} nodes found {} cycles",
        graph.node_count(),
        cycles.len()
    );
    Ok(cycles)
}

/// The longest cycle, first found on ties.
pub fn longest_cycle(cycles: Vec<Vec<NodeId>>) -> Option<Vec<NodeId>> {
    cycles.into_iter().fold(None, |best, cycle| match best {
        Some(best) if best.len() >= cycle.len() => Some(best),
        _ => Some(cycle),
    })
}

/// Walk parents from `from` up to the in-progress ancestor `to`.
fn trace_cycle(parents: &HashMap<NodeId, NodeId>, from: NodeId, to: NodeId) -> Vec<NodeId> {
    let mut path = vec![from];
    let mut current = from;
    while current != to {
        // `to` is on the DFS path above `from`, so the chain always reaches it
        let Some(&parent) = parents.get(&current) else {
            break;
        };
        current = parent;
        path.push(current);
    }
    path.reverse();
    path
}
