//! Terminal rendering of a laid-out graph: one text row per commit, lane
//! columns on the left, commit metadata on the right.

use std::fmt::Write as _;

use commit_graph::{edge_paths, Commit, GraphLayout, ROW_HEIGHT};

/// Render the graph as plain text, `git log --graph` style. Columns follow
/// the same elbow rule as the SVG renderer: an edge runs down its child's
/// lane to the midpoint row, then down the parent's lane.
pub fn ascii_graph(commits: &[Commit], layout: &GraphLayout) -> String {
    let cols = layout.max_lane + 1;
    let rows = commits.len();
    let mut grid = vec![vec![' '; cols]; rows];

    for edge in edge_paths(commits, layout) {
        let r1 = edge.from.y / ROW_HEIGHT;
        let r2 = edge.to.y / ROW_HEIGHT;
        if r2 <= r1 {
            // Duplicate hashes can produce upward edges; skip them.
            continue;
        }
        let mid = (r1 + r2) / 2;
        for r in (r1 + 1)..r2 {
            let lane = if r <= mid { edge.from.lane } else { edge.to.lane };
            if grid[r][lane] == ' ' {
                grid[r][lane] = '|';
            }
        }
    }

    for (i, commit) in commits.iter().enumerate() {
        if let Some(node) = layout.node(&commit.hash) {
            grid[i][node.lane] = '*';
        }
    }

    let mut out = String::new();
    for (i, commit) in commits.iter().enumerate() {
        for &cell in &grid[i] {
            out.push(cell);
            out.push(' ');
        }

        write!(&mut out, " {}", commit.short_hash).unwrap();
        for branch in &commit.branches {
            write!(&mut out, " ({})", branch.name).unwrap();
        }
        for tag in &commit.tags {
            write!(&mut out, " [{}]", tag.name).unwrap();
        }
        if !commit.message.is_empty() {
            write!(&mut out, " {}", commit.message).unwrap();
        }
        while out.ends_with(' ') {
            out.pop();
        }
        out.push('\n');
    }

    out
}
