//! Edge generation: one drawable edge per (commit, parent) pair.
//!
//! Edges are plain value descriptors (two endpoint nodes and a kind); actual
//! path geometry lives in [`crate::svg`] so renderers can do their own thing
//! with the endpoints if they want.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::commit::Commit;
use crate::layout::{GraphLayout, GraphNode};

/// How an edge relates the child to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EdgeKind {
    /// Edge to the commit's first parent: the mainline continuation.
    Parent,
    /// Edge to any later parent of a merge commit.
    Merge,
}

/// A drawable connection between a commit and one of its parents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphEdge {
    /// The child end (higher on screen).
    pub from: GraphNode,
    /// The parent end (lower on screen).
    pub to: GraphNode,
    pub kind: EdgeKind,
}

/// Produce the edge list for a layout previously computed from the *same*
/// commit list. Parent references with no node in the layout (truncated
/// history) are skipped without complaint; every resolvable reference yields
/// exactly one edge, duplicates included.
pub fn edge_paths(commits: &[Commit], layout: &GraphLayout) -> Vec<GraphEdge> {
    let mut edges = Vec::with_capacity(commits.len());

    for commit in commits {
        let Some(from) = layout.node(&commit.hash) else {
            continue;
        };

        for (i, parent) in commit.parent_hashes.iter().enumerate() {
            let Some(to) = layout.node(parent) else {
                continue;
            };

            edges.push(GraphEdge {
                from: from.clone(),
                to: to.clone(),
                kind: if i == 0 { EdgeKind::Parent } else { EdgeKind::Merge },
            });
        }
    }

    edges
}
