/*!
 * Core types and data structures for treedoc
 */

use std::path::PathBuf;

/// Kind of a filesystem entry seen during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Directory (may or may not be descended into)
    Directory,
    /// Anything that is not a directory, symlinks included
    File,
}

/// One entry produced by the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Path relative to the scan root, always with forward slashes
    pub rel_path: String,
    /// Real location on disk, used for reading
    pub path: PathBuf,
    /// Entry name (last path component)
    pub name: String,
    /// Directory or file
    pub kind: EntryKind,
    /// Depth below the root, 1 for direct children
    pub depth: usize,
}

/// How the body of an included file is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Listed, content replaced by a fixed placeholder, never read
    ExistenceOnly,
    /// Read as UTF-8 and embedded verbatim
    Text,
    /// Listed, content replaced by a binary placeholder, never read
    Binary,
}

/// Classification outcome for a single file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionDecision {
    /// Not part of the flat list
    Excluded,
    /// Part of the flat list with the given content mode
    Included(ContentMode),
}

/// An included file with its resolved content mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path relative to the scan root, forward slashes (lossy for display)
    pub rel_path: String,
    /// Real location on disk
    pub path: PathBuf,
    /// Content mode from the classification policy
    pub mode: ContentMode,
}

impl FileRecord {
    /// Base name of the file
    pub fn name(&self) -> &str {
        self.rel_path.rsplit('/').next().unwrap_or(&self.rel_path)
    }
}

/// A subtree the walker could not list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDir {
    /// Offending path (absolute)
    pub path: PathBuf,
    /// Failure reason
    pub reason: String,
}

/// Node of the full-tree projection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Directory with its sorted children (empty when not descended)
    Dir {
        /// Directory name
        name: String,
        /// Sorted children
        children: Vec<TreeNode>,
    },
    /// Non-directory entry
    File {
        /// File name
        name: String,
    },
}

impl TreeNode {
    /// Entry name
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Dir { name, .. } | TreeNode::File { name } => name,
        }
    }

    /// Children of a directory, empty for files
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Dir { children, .. } => children,
            TreeNode::File { .. } => &[],
        }
    }
}

/// Both projections of a single walk
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Included files sorted by relative path
    pub files: Vec<FileRecord>,
    /// Full tree, root named after the root directory
    pub tree: TreeNode,
    /// Subtrees that could not be listed
    pub skipped: Vec<SkippedDir>,
}
