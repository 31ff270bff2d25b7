//! End-to-end properties of the layout engine: the behaviors a renderer
//! depends on, checked against small literal histories and big synthetic
//! ones.

use std::time::Instant;

use commit_graph::{calculate_layout, edge_paths, Commit, EdgeKind, ROW_HEIGHT};

fn lane_of(layout: &commit_graph::GraphLayout, hash: &str) -> usize {
    layout.node(hash).unwrap().lane
}

/// A merge-free, branch-free chain must render as a single vertical line.
#[test]
fn linear_history_stays_in_lane_0() {
    let n = 50;
    let commits: Vec<Commit> = (0..n)
        .map(|i| {
            let hash = format!("c{i}");
            if i + 1 == n {
                Commit::new(&hash, &[])
            } else {
                Commit::new(&hash, &[&format!("c{}", i + 1)])
            }
        })
        .collect();

    let layout = calculate_layout(&commits);
    for commit in &commits {
        assert_eq!(layout.node(&commit.hash).unwrap().lane, 0);
    }
    assert_eq!(layout.max_lane, 0);
}

/// Three-commit chain, newest first: fixed rows, one lane.
#[test]
fn scenario_linear_abc() {
    let commits = [
        Commit::new("C", &["B"]),
        Commit::new("B", &["A"]),
        Commit::new("A", &[]),
    ];
    let layout = calculate_layout(&commits);

    for hash in ["A", "B", "C"] {
        assert_eq!(lane_of(&layout, hash), 0);
    }
    assert_eq!(layout.node("C").unwrap().y, 0);
    assert_eq!(layout.node("B").unwrap().y, ROW_HEIGHT);
    assert_eq!(layout.node("A").unwrap().y, 2 * ROW_HEIGHT);
}

/// Two children of one root: one of them continues the root's lane, the
/// other gets a fresh lane of its own.
#[test]
fn branch_isolation() {
    let commits = [
        Commit::new("newer", &["root"]),
        Commit::new("older", &["root"]),
        Commit::new("root", &[]),
    ];
    let layout = calculate_layout(&commits);

    let root_lane = lane_of(&layout, "root");
    let shared: Vec<&str> = ["newer", "older"]
        .into_iter()
        .filter(|h| lane_of(&layout, h) == root_lane)
        .collect();
    assert_eq!(shared.len(), 1, "exactly one child continues the root's lane");

    let other = if shared[0] == "newer" { "older" } else { "newer" };
    assert_ne!(lane_of(&layout, other), root_lane);
    assert_eq!(layout.max_lane, 1);
}

/// A diamond: fork off a root, then merge both sides back together.
#[test]
fn scenario_branch_and_merge() {
    let commits = [
        Commit::new("merge", &["left", "right"]),
        Commit::new("right", &["root"]),
        Commit::new("left", &["root"]),
        Commit::new("root", &[]),
    ];
    let layout = calculate_layout(&commits);

    // left continues root's line; right is the diverging branch.
    assert_eq!(lane_of(&layout, "left"), 0);
    assert_eq!(lane_of(&layout, "root"), 0);
    assert_eq!(lane_of(&layout, "right"), 1);
    // The merge sits on the mainline, its first parent being left.
    assert_eq!(lane_of(&layout, "merge"), 0);

    let edges = edge_paths(&commits, &layout);
    let merge_to_right = edges
        .iter()
        .find(|e| e.from.commit_hash.as_str() == "merge" && e.to.commit_hash.as_str() == "right")
        .unwrap();
    assert_eq!(merge_to_right.kind, EdgeKind::Merge);
}

/// Once a side branch has fully merged back, its lane must be available to
/// later branch points instead of the graph growing a new lane.
#[test]
fn lanes_are_reused_after_merges() {
    let commits = [
        Commit::new("m", &["a", "b"]),
        Commit::new("a", &["base"]),
        Commit::new("b", &["base"]),
        Commit::new("base", &["root"]),
        Commit::new("x", &["root"]),
        Commit::new("root", &[]),
    ];
    let layout = calculate_layout(&commits);

    // The merged pair occupied lanes 0 and 1. x opens a new branch point
    // afterwards and must fit into a freed lane.
    assert!(lane_of(&layout, "x") <= 1, "x reused a freed lane");
    assert_eq!(layout.max_lane, 1);
}

/// Any input yields a node per commit and never panics.
#[test]
fn totality_over_damaged_inputs() {
    let inputs: Vec<Vec<Commit>> = vec![
        vec![],
        vec![Commit::new("only", &["nowhere"])],
        vec![
            Commit::new("a", &["ghost"]),
            Commit::new("b", &["a", "ghost2"]),
        ],
        // A cycle, which a real repository can't produce but a buggy
        // backend might.
        vec![Commit::new("x", &["y"]), Commit::new("y", &["x"])],
        // Duplicates.
        vec![
            Commit::new("dup", &[]),
            Commit::new("dup", &[]),
            Commit::new("z", &["dup"]),
        ],
    ];

    for commits in &inputs {
        let layout = calculate_layout(commits);
        layout.dbg_check();
        for commit in commits {
            assert!(
                layout.node(&commit.hash).is_some(),
                "{} missing from layout",
                commit.hash
            );
        }
        // Edge generation over the same input must be equally unbothered.
        let _ = edge_paths(commits, &layout);
    }
}

#[test]
fn layout_is_idempotent() {
    let commits = [
        Commit::new("merge", &["left", "right"]),
        Commit::new("right", &["root"]),
        Commit::new("left", &["root"]),
        Commit::new("root", &[]),
    ];

    let first = calculate_layout(&commits);
    let second = calculate_layout(&commits);

    assert_eq!(first.max_lane, second.max_lane);
    for commit in &commits {
        let a = first.node(&commit.hash).unwrap();
        let b = second.node(&commit.hash).unwrap();
        assert_eq!((a.lane, a.x, a.y), (b.lane, b.x, b.y));
    }
}

#[test]
fn edge_classification_for_a_two_parent_commit() {
    let commits = [
        Commit::new("m", &["p0", "p1"]),
        Commit::new("p0", &[]),
        Commit::new("p1", &[]),
    ];
    let layout = calculate_layout(&commits);
    let edges = edge_paths(&commits, &layout);

    let from_m: Vec<_> = edges
        .iter()
        .filter(|e| e.from.commit_hash.as_str() == "m")
        .collect();
    assert_eq!(from_m.len(), 2);
    assert!(from_m
        .iter()
        .any(|e| e.to.commit_hash.as_str() == "p0" && e.kind == EdgeKind::Parent));
    assert!(from_m
        .iter()
        .any(|e| e.to.commit_hash.as_str() == "p1" && e.kind == EdgeKind::Merge));
}

/// Lane release is a heuristic keyed off "all children placed". With
/// oldest-first input, a sibling's lane is never handed back, so lane count
/// grows with the number of branch points rather than the concurrent width.
/// Known limitation, preserved deliberately; this test documents it.
#[test]
fn lane_release_is_heuristic_not_optimal() {
    let commits = [
        Commit::new("root", &[]),
        Commit::new("side", &["root"]),
        Commit::new("main", &["root"]),
        Commit::new("tip_a", &["main"]),
        Commit::new("tip_b", &["main"]),
    ];
    let layout = calculate_layout(&commits);

    // side's lane (1) is still considered active when tip_a branches, so
    // tip_a lands on lane 2 instead of reusing 1.
    assert_eq!(lane_of(&layout, "side"), 1);
    assert_eq!(lane_of(&layout, "tip_a"), 2);
    assert_eq!(layout.max_lane, 2);
}

fn synthetic_linear(n: usize) -> Vec<Commit> {
    (0..n)
        .map(|i| {
            let hash = format!("commit{i}");
            if i + 1 == n {
                Commit::new(&hash, &[])
            } else {
                Commit::new(&hash, &[&format!("commit{}", i + 1)])
            }
        })
        .collect()
}

fn synthetic_branched(n: usize, branch_every: usize) -> Vec<Commit> {
    (0..n)
        .map(|i| {
            let hash = format!("commit{i}");
            if i + 1 == n {
                return Commit::new(&hash, &[]);
            }
            let first = format!("commit{}", i + 1);
            if i > 0 && i % branch_every == 0 && i + branch_every / 2 < n {
                let second = format!("commit{}", i + branch_every / 2);
                Commit::new(&hash, &[&first, &second])
            } else {
                Commit::new(&hash, &[&first])
            }
        })
        .collect()
}

/// 10k commits, linear: well under a second even in debug builds.
#[test]
fn layout_of_10k_commits_is_fast() {
    let commits = synthetic_linear(10_000);

    let start = Instant::now();
    let layout = calculate_layout(&commits);
    let elapsed = start.elapsed();

    assert_eq!(layout.len(), 10_000);
    assert!(
        elapsed.as_millis() < 1000,
        "10k layout took {elapsed:?}, expected < 1s"
    );
}

/// 1k commits with a merge every 100: under 100ms.
#[test]
fn layout_of_1k_branched_commits_is_fast() {
    let commits = synthetic_branched(1_000, 100);

    let start = Instant::now();
    let layout = calculate_layout(&commits);
    let elapsed = start.elapsed();

    assert_eq!(layout.len(), 1_000);
    assert!(
        elapsed.as_millis() < 100,
        "1k branched layout took {elapsed:?}, expected < 100ms"
    );
}
