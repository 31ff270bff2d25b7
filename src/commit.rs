//! The commit record handed to us by the version control backend, plus the
//! branch / tag annotations that ride along for display.
//!
//! Only `hash` and `parent_hashes` matter to the layout engine. Everything
//! else is carried through untouched so a renderer can show messages, authors
//! and refs next to the graph without a second lookup.

use smallvec::SmallVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::GitHash;

/// A branch pointing at a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BranchRef {
    pub name: GitHash,
    pub is_remote: bool,
    pub is_current: bool,
}

/// A tag pointing at a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagRef {
    pub name: GitHash,
    pub is_annotated: bool,
    pub is_remote: bool,
}

/// One commit as reported by the backend, newest first in the input list.
///
/// The engine never mutates or reorders commits. `parent_hashes` is ordered:
/// the first entry is the primary ("mainline") parent, any further entries
/// are merge parents. Roots have no parents at all.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Commit {
    pub hash: GitHash,
    pub short_hash: GitHash,
    pub message: String,
    pub author_name: GitHash,
    pub author_email: GitHash,
    /// Seconds since the unix epoch. Display only; ordering comes from the
    /// input sequence, never from timestamps.
    pub timestamp: i64,
    pub parent_hashes: SmallVec<[GitHash; 2]>,
    pub branches: Vec<BranchRef>,
    pub tags: Vec<TagRef>,
}

impl Commit {
    /// Make a bare commit with just a hash and parents. Handy in tests and
    /// benchmarks; real callers fill in the display fields too.
    pub fn new(hash: &str, parents: &[&str]) -> Self {
        let hash: GitHash = hash.into();
        Commit {
            short_hash: hash.chars().take(7).collect::<String>().into(),
            hash,
            message: String::new(),
            author_name: Default::default(),
            author_email: Default::default(),
            timestamp: 0,
            parent_hashes: parents.iter().map(|&p| p.into()).collect(),
            branches: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_hashes.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parent_hashes.len() > 1
    }

    /// The primary parent, if any.
    pub fn first_parent(&self) -> Option<&GitHash> {
        self.parent_hashes.first()
    }
}
