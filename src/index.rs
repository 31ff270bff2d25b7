//! The relationship index: hash -> position and parent -> children lookup
//! tables, built in one pass over the commit list.
//!
//! The layout pass needs two questions answered in O(1): "is this hash in the
//! input at all?" and "which child of this parent continues its branch
//! line?". Both are answered from here rather than from pointers between
//! commits, so the commit list itself stays a plain flat slice.

use std::collections::HashMap;
use smallvec::SmallVec;

use crate::commit::Commit;
use crate::GitHash;

#[derive(Debug, Clone, Default)]
pub(crate) struct RelationshipIndex {
    /// Hash -> index of its first occurrence in the input sequence.
    position: HashMap<GitHash, usize>,

    /// Parent hash -> hashes of its children, oldest child first.
    ///
    /// Children are recorded by walking the (newest-first) input in reverse,
    /// so the first entry is the child sitting closest above the parent's
    /// row. That child is the one whose branch line runs straight down into
    /// the parent; every later sibling joins in with an elbow.
    ///
    /// Keys may name hashes that aren't in the input at all (truncated
    /// histories). Callers must check `contains` before treating a parent as
    /// a real commit.
    children: HashMap<GitHash, SmallVec<[GitHash; 2]>>,
}

impl RelationshipIndex {
    pub(crate) fn new(commits: &[Commit]) -> Self {
        let mut position = HashMap::with_capacity(commits.len());
        let mut children: HashMap<GitHash, SmallVec<[GitHash; 2]>> = HashMap::new();

        for commit in commits.iter().rev() {
            for parent in &commit.parent_hashes {
                children
                    .entry(parent.clone())
                    .or_default()
                    .push(commit.hash.clone());
            }
        }

        // Forward pass for positions so duplicate hashes resolve to their
        // first occurrence.
        for (i, commit) in commits.iter().enumerate() {
            position.entry(commit.hash.clone()).or_insert(i);
        }

        Self { position, children }
    }

    /// Is this hash an actual commit in the input (not just a dangling
    /// parent reference)?
    pub(crate) fn contains(&self, hash: &GitHash) -> bool {
        self.position.contains_key(hash.as_str())
    }

    pub(crate) fn position_of(&self, hash: &GitHash) -> Option<usize> {
        self.position.get(hash.as_str()).copied()
    }

    pub(crate) fn children_of(&self, hash: &GitHash) -> &[GitHash] {
        self.children
            .get(hash.as_str())
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `child` is the first child of `parent`: the one that keeps the
    /// parent's branch line going. Determined purely by list position.
    pub(crate) fn is_first_child(&self, parent: &GitHash, child: &GitHash) -> bool {
        self.children_of(parent).first() == Some(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_for(commits: &[Commit]) -> RelationshipIndex {
        RelationshipIndex::new(commits)
    }

    #[test]
    fn children_are_recorded_oldest_first() {
        // Newest first: b and c both branch off a, with c the older child.
        let commits = [
            Commit::new("b", &["a"]),
            Commit::new("c", &["a"]),
            Commit::new("a", &[]),
        ];
        let index = index_for(&commits);

        let kids = index.children_of(&"a".into());
        assert_eq!(kids.len(), 2);
        assert_eq!(kids[0].as_str(), "c");
        assert_eq!(kids[1].as_str(), "b");

        assert!(index.is_first_child(&"a".into(), &"c".into()));
        assert!(!index.is_first_child(&"a".into(), &"b".into()));
    }

    #[test]
    fn dangling_parents_are_indexed_but_not_contained() {
        let commits = [Commit::new("tip", &["gone"])];
        let index = index_for(&commits);

        assert!(index.contains(&"tip".into()));
        assert!(!index.contains(&"gone".into()));
        // The children list still knows who referenced the missing commit.
        assert_eq!(index.children_of(&"gone".into()).len(), 1);
    }

    #[test]
    fn duplicate_hashes_resolve_to_first_occurrence() {
        let commits = [
            Commit::new("a", &[]),
            Commit::new("dup", &["a"]),
            Commit::new("dup", &["a"]),
        ];
        let index = index_for(&commits);
        assert_eq!(index.position_of(&"dup".into()), Some(1));
    }

    #[test]
    fn empty_input() {
        let index = index_for(&[]);
        assert!(!index.contains(&"anything".into()));
        assert!(index.children_of(&"anything".into()).is_empty());
    }
}
