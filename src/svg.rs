//! Minimal SVG rendering of a laid-out graph.
//!
//! This is a reference renderer: dots for commits, two-segment elbow paths
//! for cross-lane edges, colored by lane. Interactive frontends will draw
//! the graph themselves from the layout and edge descriptors; this output is
//! for CLI export and for eyeballing layouts while debugging.

use std::fmt::Write as _;

use crate::color::lane_color;
use crate::commit::Commit;
use crate::edges::{edge_paths, EdgeKind, GraphEdge};
use crate::layout::{GraphLayout, LANE_WIDTH, ROW_HEIGHT};

// Dot centers sit a little inside the (x, y) cell corner so the first lane
// isn't flush against the viewport edge.
const DOT_OFFSET_X: usize = 10;
const DOT_OFFSET_Y: usize = 40;
const DOT_RADIUS: usize = 4;

/// The SVG path data for one edge: a straight vertical line when both ends
/// share a lane, otherwise an elbow through the midpoint row.
pub fn edge_path_d(edge: &GraphEdge) -> String {
    let x1 = edge.from.x + DOT_OFFSET_X;
    let y1 = edge.from.y + DOT_OFFSET_Y;
    let x2 = edge.to.x + DOT_OFFSET_X;
    let y2 = edge.to.y + DOT_OFFSET_Y;

    if edge.from.lane == edge.to.lane {
        format!("M {x1} {y1} L {x2} {y2}")
    } else {
        let mid_y = (y1 + y2) / 2;
        format!("M {x1} {y1} L {x1} {mid_y} L {x2} {mid_y} L {x2} {y2}")
    }
}

/// Stroke color for an edge. Merge edges take the color of the lane they
/// merge from (the parent side); mainline edges keep the child's lane color.
pub fn edge_color(edge: &GraphEdge) -> &'static str {
    match edge.kind {
        EdgeKind::Merge => lane_color(edge.to.lane),
        EdgeKind::Parent => lane_color(edge.from.lane),
    }
}

/// Render a standalone SVG document for the graph.
pub fn render_svg(commits: &[Commit], layout: &GraphLayout) -> String {
    let width = 200.max((layout.max_lane + 2) * LANE_WIDTH);
    let height = commits.len() * ROW_HEIGHT;

    let mut out = String::new();
    write!(
        &mut out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\n"
    )
    .unwrap();
    write!(
        &mut out,
        "\t<rect width=\"100%\" height=\"100%\" fill=\"#09090b\"/>\n"
    )
    .unwrap();

    // Edges underneath, dots on top.
    for edge in edge_paths(commits, layout) {
        write!(
            &mut out,
            "\t<path d=\"{}\" stroke=\"{}\" stroke-width=\"2\" fill=\"none\" opacity=\"0.6\"/>\n",
            edge_path_d(&edge),
            edge_color(&edge),
        )
        .unwrap();
    }

    for commit in commits {
        let Some(node) = layout.node(&commit.hash) else {
            continue;
        };
        write!(
            &mut out,
            "\t<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" opacity=\"0.8\"/>\n",
            node.x + DOT_OFFSET_X,
            node.y + DOT_OFFSET_Y,
            DOT_RADIUS,
            lane_color(node.lane),
        )
        .unwrap();
    }

    out.push_str("</svg>\n");
    out
}
