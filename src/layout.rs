//! The layout engine: one forward pass over the commit list that gives every
//! commit a lane, then a second pass that turns lanes and row indices into
//! pixel coordinates.
//!
//! The input is expected newest-first (the order `git log` emits), which
//! means a commit is always seen before its parents. Lane decisions are made
//! with no backtracking:
//!
//! - A commit whose first child already claimed a lane for it picks that lane
//!   up, keeping the branch line unbroken through the merge-free stretches of
//!   history.
//! - A later sibling (a branch point) takes the lowest free lane instead.
//! - Lanes are handed back once every child of a commit has been placed, so
//!   the graph's width tracks the number of *concurrent* branches, not the
//!   total number of branches that ever existed.
//!
//! The lane a commit claims for its first parent is recorded in a reservation
//! table keyed by hash. Reservations are what let "first child inherits the
//! parent's lane" work when the parent hasn't been laid out yet; for inputs
//! that arrive oldest-first the inheritance reads the parent's lane directly
//! and the reservation table stays empty.

use std::collections::HashMap;
use smallvec::SmallVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::commit::Commit;
use crate::index::RelationshipIndex;
use crate::lanes::LaneAllocator;
use crate::GitHash;

/// Vertical distance between consecutive commit rows, in pixels.
pub const ROW_HEIGHT: usize = 80;
/// Horizontal distance between adjacent lanes, in pixels.
pub const LANE_WIDTH: usize = 40;

/// The placed form of one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphNode {
    /// Hash of the commit this node was laid out for. A lookup key, not an
    /// owning reference; the commit itself stays with the caller.
    pub commit_hash: GitHash,
    pub lane: usize,
    pub x: usize,
    pub y: usize,
    /// Copy of the commit's parent hashes, in order, so edge generation
    /// doesn't need the original commit list in hand.
    pub parents: SmallVec<[GitHash; 2]>,
}

/// A full layout: one node per distinct input hash, plus the widest lane
/// used anywhere (for sizing the drawing surface).
///
/// Layouts are cheap, self-contained values. Recompute rather than mutate
/// when the commit list changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphLayout {
    pub nodes: HashMap<GitHash, GraphNode>,
    pub max_lane: usize,
}

impl GraphLayout {
    pub fn node(&self, hash: &str) -> Option<&GraphNode> {
        self.nodes.get(hash)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Validate the structural invariants of a layout. Panics on violation.
    /// Debug / test aid, not part of the render path.
    pub fn dbg_check(&self) {
        let mut seen_max = 0;
        for node in self.nodes.values() {
            assert_eq!(node.x, node.lane * LANE_WIDTH);
            assert_eq!(node.y % ROW_HEIGHT, 0);
            assert!(node.lane <= self.max_lane);
            seen_max = seen_max.max(node.lane);
        }
        if !self.nodes.is_empty() {
            assert_eq!(seen_max, self.max_lane);
        } else {
            assert_eq!(self.max_lane, 0);
        }
    }
}

/// Lay out `commits` (newest first). Total over any input: missing parents,
/// duplicate hashes and cycles all degrade to *some* sensible layout rather
/// than an error.
pub fn calculate_layout(commits: &[Commit]) -> GraphLayout {
    let index = RelationshipIndex::new(commits);
    let mut lanes = LaneAllocator::new();

    // Lane of every commit laid out so far.
    let mut assigned: HashMap<GitHash, usize> = HashMap::with_capacity(commits.len());
    // Lane claimed for a commit we haven't reached yet, by the child whose
    // line continues into it.
    let mut reserved: HashMap<GitHash, usize> = HashMap::new();
    let mut max_lane = 0;

    for commit in commits {
        if assigned.contains_key(commit.hash.as_str()) {
            // Duplicate hash; the first occurrence owns the lane.
            continue;
        }

        let lane = if let Some(lane) = reserved.remove(commit.hash.as_str()) {
            // Our first child routed its lane down to us. The lane is
            // already active.
            lane
        } else if let Some(parent) = commit.first_parent() {
            let inherited = if index.is_first_child(parent, &commit.hash) {
                assigned.get(parent.as_str()).copied()
            } else {
                None
            };
            match inherited {
                // Parent laid out before us (oldest-first input): first
                // child keeps the parent's lane.
                Some(lane) => {
                    lanes.activate(lane);
                    lane
                }
                // Branch point, unknown parent, or parent still ahead of
                // us with no claim registered: start a fresh line on the
                // lowest free lane.
                None => lanes.acquire(),
            }
        } else {
            // Root commits sit on lane 0 unless a child already pinned them
            // elsewhere.
            lanes.activate(0);
            0
        };

        assigned.insert(commit.hash.clone(), lane);
        max_lane = max_lane.max(lane);

        // Route our lane onward to the first parent, if the line continues.
        let continues = match commit.first_parent() {
            Some(parent) => {
                index.contains(parent)
                    && !assigned.contains_key(parent.as_str())
                    && !reserved.contains_key(parent.as_str())
                    && index.is_first_child(parent, &commit.hash)
            }
            None => false,
        };
        if continues {
            reserved.insert(commit.parent_hashes[0].clone(), lane);
        }

        // Sibling branch lines end at this row; their lanes free up for
        // reuse. A child placed on our own lane is the continuation of this
        // line, not a terminating branch.
        let mut all_children_assigned = true;
        for child in index.children_of(&commit.hash) {
            match assigned.get(child.as_str()) {
                Some(&child_lane) => {
                    let ends_here = index
                        .position_of(child)
                        .and_then(|i| commits[i].first_parent())
                        .is_some_and(|p| p == &commit.hash);
                    if ends_here && child_lane != lane {
                        lanes.release(child_lane);
                    }
                }
                None => all_children_assigned = false,
            }
        }

        // A line with nowhere left to go (root, or the first parent isn't in
        // the input) gives its own lane back, once nothing above still needs
        // the column.
        let terminal = match commit.first_parent() {
            Some(parent) => !index.contains(parent),
            None => true,
        };
        if terminal && all_children_assigned {
            lanes.release(lane);
        }

        // For oldest-first inputs the parents are already placed; once the
        // last of a parent's children lands, the parent's lane frees up.
        for parent in &commit.parent_hashes {
            if let Some(&parent_lane) = assigned.get(parent.as_str()) {
                let children_done = index
                    .children_of(parent)
                    .iter()
                    .all(|c| assigned.contains_key(c.as_str()));
                if parent_lane != lane && children_done {
                    lanes.release(parent_lane);
                }
            }
        }
    }

    // Second pass: coordinates. Row position comes straight from the input
    // index; duplicate hashes keep one node (last row wins, first lane wins),
    // and anything the lane pass somehow skipped falls back to lane 0.
    let mut nodes = HashMap::with_capacity(commits.len());
    for (i, commit) in commits.iter().enumerate() {
        let lane = assigned.get(commit.hash.as_str()).copied().unwrap_or(0);
        nodes.insert(
            commit.hash.clone(),
            GraphNode {
                commit_hash: commit.hash.clone(),
                lane,
                x: lane * LANE_WIDTH,
                y: i * ROW_HEIGHT,
                parents: commit.parent_hashes.clone(),
            },
        );
    }

    GraphLayout { nodes, max_lane }
}
