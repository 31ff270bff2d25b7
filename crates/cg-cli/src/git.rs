//! Reading commit history out of a real git repository, newest first, in the
//! shape the layout engine expects.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use git2::{BranchType, Oid, Repository, Sort};
use indicatif::ProgressBar;
use smallvec::SmallVec;

use commit_graph::{BranchRef, Commit, GitHash, TagRef};

/// Walk the repository at (or above) `path` and return its commits newest
/// first, topologically sorted so parents always come after their children.
pub fn load_commits(path: &Path, all: bool, limit: Option<usize>) -> anyhow::Result<Vec<Commit>> {
    let repo = Repository::discover(path)
        .with_context(|| format!("no git repository at {}", path.display()))?;

    let branches = branch_refs(&repo)?;
    let tags = tag_refs(&repo)?;

    let mut walk = repo.revwalk()?;
    // TOPOLOGICAL is what the layout engine relies on; TIME keeps unrelated
    // branches in a sensible display order.
    walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
    if all {
        walk.push_glob("refs/heads/*")?;
    } else {
        walk.push_head()?;
    }

    let bar = ProgressBar::new_spinner();
    let mut commits = Vec::new();

    for oid in walk {
        let oid = oid?;
        let commit = repo.find_commit(oid)?;
        commits.push(convert(&commit, &branches, &tags));

        bar.inc(1);
        if let Some(limit) = limit {
            if commits.len() >= limit {
                break;
            }
        }
    }
    bar.finish_and_clear();

    Ok(commits)
}

fn convert(
    commit: &git2::Commit,
    branches: &HashMap<GitHash, Vec<BranchRef>>,
    tags: &HashMap<GitHash, Vec<TagRef>>,
) -> Commit {
    let hash: GitHash = commit.id().to_string().into();
    let author = commit.author();

    Commit {
        short_hash: hash.chars().take(7).collect::<String>().into(),
        message: commit.summary().unwrap_or("").to_string(),
        author_name: author.name().unwrap_or("unknown").into(),
        author_email: author.email().unwrap_or("").into(),
        timestamp: commit.time().seconds(),
        parent_hashes: commit
            .parent_ids()
            .map(|id| GitHash::from(id.to_string()))
            .collect::<SmallVec<[GitHash; 2]>>(),
        branches: branches.get(&hash).cloned().unwrap_or_default(),
        tags: tags.get(&hash).cloned().unwrap_or_default(),
        hash,
    }
}

fn branch_refs(repo: &Repository) -> anyhow::Result<HashMap<GitHash, Vec<BranchRef>>> {
    let mut out: HashMap<GitHash, Vec<BranchRef>> = HashMap::new();

    for branch in repo.branches(None)? {
        let (branch, kind) = branch?;
        let Some(target) = branch.get().target() else {
            continue;
        };
        let Some(name) = branch.name()? else {
            continue;
        };

        out.entry(target.to_string().into()).or_default().push(BranchRef {
            name: name.into(),
            is_remote: kind == BranchType::Remote,
            is_current: branch.is_head(),
        });
    }

    Ok(out)
}

fn tag_refs(repo: &Repository) -> anyhow::Result<HashMap<GitHash, Vec<TagRef>>> {
    // tag_foreach's callback can't bail early, so collect first and resolve
    // annotated tags to their target commits afterwards.
    let mut raw: Vec<(Oid, String)> = Vec::new();
    repo.tag_foreach(|oid, name| {
        let name = String::from_utf8_lossy(name);
        let name = name.strip_prefix("refs/tags/").unwrap_or(&name).to_string();
        raw.push((oid, name));
        true
    })?;

    let mut out: HashMap<GitHash, Vec<TagRef>> = HashMap::new();
    for (oid, name) in raw {
        let (target, annotated) = match repo.find_tag(oid) {
            Ok(tag) => (tag.target_id(), true),
            // Lightweight tags point straight at the commit.
            Err(_) => (oid, false),
        };
        out.entry(target.to_string().into()).or_default().push(TagRef {
            name: name.into(),
            is_annotated: annotated,
            is_remote: false,
        });
    }

    Ok(out)
}
