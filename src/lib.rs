//! A lane-based layout engine for commit history graphs, in the style of
//! `git log --graph`.
//!
//! Given an ordered list of commits (newest first, each naming zero or more
//! parent hashes), the engine assigns every commit a horizontal *lane* and a
//! row position such that related commits stay visually contiguous and the
//! whole computation runs in a single forward pass over the input.
//!
//! The three entry points are [`calculate_layout`], [`edge_paths`] and
//! [`lane_color`]:
//!
//! ```
//! use commit_graph::{Commit, calculate_layout, edge_paths, lane_color};
//!
//! let commits = vec![
//!     Commit::new("b", &["a"]),
//!     Commit::new("a", &[]),
//! ];
//!
//! let layout = calculate_layout(&commits);
//! assert_eq!(layout.max_lane, 0);
//!
//! let edges = edge_paths(&commits, &layout);
//! assert_eq!(edges.len(), 1);
//! let _stroke = lane_color(edges[0].from.lane);
//! ```
//!
//! All three functions are total. Missing parents, duplicate hashes and even
//! cyclic references degrade gracefully rather than returning errors, because
//! callers sit in a render hot path and treat layout as a pure function. The
//! engine holds no state between calls; recomputing a layout for a changed
//! commit list is simply calling [`calculate_layout`] again.
//!
//! Commits are stored flat and all relationships are resolved through
//! hash-keyed lookup tables rather than through object references. This keeps
//! the output trivially cheap to discard and avoids any cyclic ownership.

pub mod commit;
pub mod color;
pub mod edges;
mod index;
mod lanes;
pub mod layout;
pub mod svg;

pub use commit::{BranchRef, Commit, TagRef};
pub use color::{lane_color, LANE_COLORS};
pub use edges::{edge_paths, EdgeKind, GraphEdge};
pub use layout::{calculate_layout, GraphLayout, GraphNode, LANE_WIDTH, ROW_HEIGHT};
pub use svg::{edge_path_d, render_svg};

use smartstring::alias::String as SmartString;

/// A full-length commit hash. Opaque to the engine; equality and hashing are
/// all we ever need from it.
pub type GitHash = SmartString;
