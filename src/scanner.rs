/*!
 * Directory traversal
 *
 * A single lazy walk feeds both projections: the flat list of included files
 * and the full tree used for the visual hierarchy. Each directory is listed
 * one level at a time in sorted order; exist-only directories are yielded but
 * never listed.
 */

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::{Result, TreeDocError};
use crate::policy::Policy;
use crate::types::{
    EntryKind, FileRecord, InclusionDecision, PathEntry, SkippedDir, Snapshot, TreeNode,
};
use crate::utils::to_forward_slashes;

/// Item produced by [`Walk`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkItem {
    /// A visible entry, in depth-first sorted order
    Entry(PathEntry),
    /// A directory whose listing failed; its subtree is missing
    Skipped(SkippedDir),
}

/// Scanner for directory contents
pub struct Scanner {
    /// Canonical root directory
    root: PathBuf,
    /// Classification rules
    policy: Policy,
    /// Exact paths never yielded
    self_paths: Vec<PathBuf>,
}

impl Scanner {
    /// Create a scanner for the configured root
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_policy(
            &config.target_dir,
            Policy::new(&config.tables),
            config.self_paths.clone(),
        )
    }

    /// Create a scanner with an explicit policy
    pub fn with_policy(root: &Path, policy: Policy, self_paths: Vec<PathBuf>) -> Result<Self> {
        let root = fs::canonicalize(root).map_err(|e| {
            TreeDocError::Traversal(format!("Cannot resolve {}: {}", root.display(), e))
        })?;
        // The root itself must be listable; everything below is best effort
        fs::read_dir(&root).map_err(|e| {
            TreeDocError::Traversal(format!("Cannot list {}: {}", root.display(), e))
        })?;

        Ok(Self {
            root,
            policy,
            self_paths,
        })
    }

    /// Canonical root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Base name of the root directory
    pub fn root_name(&self) -> String {
        self.root
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// Start a fresh single-pass walk
    pub fn walk(&self) -> Walk<'_> {
        let mut walk = Walk {
            scanner: self,
            stack: Vec::new(),
            pending: Vec::new(),
        };
        walk.open(&self.root, 1);
        walk
    }

    /// Walk once and build both projections
    ///
    /// The flat list holds included files sorted on the whole relative path;
    /// the tree holds every visible entry nested under the root.
    pub fn scan(&self) -> Snapshot {
        let mut flat = FlatProjection::default();
        let mut tree = TreeProjection::new(self.root_name());
        let mut skipped = Vec::new();

        for item in self.walk() {
            match item {
                WalkItem::Skipped(s) => skipped.push(s),
                WalkItem::Entry(entry) => {
                    flat.push(&self.policy, &entry);
                    tree.push(entry);
                }
            }
        }

        let snapshot = Snapshot {
            files: flat.finish(),
            tree: tree.finish(),
            skipped,
        };
        debug!(
            files = snapshot.files.len(),
            skipped = snapshot.skipped.len(),
            "scan complete"
        );
        snapshot
    }

    // Exact locations hide anything; self names only hide files, and earlier
    // generated documents only at the top level.
    fn is_hidden(&self, entry: &DirEntry, name: &str, is_dir: bool, depth: usize) -> bool {
        if self.self_paths.iter().any(|p| p == entry.path()) {
            return true;
        }
        if is_dir {
            return false;
        }
        self.policy.is_self(name) || (depth == 1 && self.policy.is_generated_document(name))
    }
}

/// Collects included files
#[derive(Default)]
struct FlatProjection {
    files: Vec<FileRecord>,
}

impl FlatProjection {
    fn push(&mut self, policy: &Policy, entry: &PathEntry) {
        if entry.kind != EntryKind::File {
            return;
        }
        if let InclusionDecision::Included(mode) = policy.decide(&entry.name) {
            self.files.push(FileRecord {
                rel_path: entry.rel_path.clone(),
                path: entry.path.clone(),
                mode,
            });
        }
    }

    fn finish(mut self) -> Vec<FileRecord> {
        // Sorted on the whole path, not per level ("a-b/x" before "a/b")
        self.files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        self.files
    }
}

/// Nests entries under their open ancestors
struct TreeProjection {
    stack: Vec<(String, Vec<TreeNode>)>,
}

impl TreeProjection {
    fn new(root_name: String) -> Self {
        Self {
            stack: vec![(root_name, Vec::new())],
        }
    }

    fn push(&mut self, entry: PathEntry) {
        while self.stack.len() > entry.depth {
            self.close_dir();
        }
        match entry.kind {
            EntryKind::Directory => self.stack.push((entry.name, Vec::new())),
            EntryKind::File => {
                if let Some((_, children)) = self.stack.last_mut() {
                    children.push(TreeNode::File { name: entry.name });
                }
            }
        }
    }

    // Pop the innermost open directory and attach it to its parent.
    fn close_dir(&mut self) {
        if let Some((name, children)) = self.stack.pop() {
            if let Some((_, parent)) = self.stack.last_mut() {
                parent.push(TreeNode::Dir { name, children });
            }
        }
    }

    fn finish(mut self) -> TreeNode {
        while self.stack.len() > 1 {
            self.close_dir();
        }
        let (name, children) = self.stack.pop().unwrap_or_default();
        TreeNode::Dir { name, children }
    }
}

/// Lazy depth-first walk over the scanner's root
///
/// Finite and single-pass; call [`Scanner::walk`] again to restart.
pub struct Walk<'a> {
    scanner: &'a Scanner,
    /// Sorted remaining entries of each open directory, with their depth
    stack: Vec<(usize, std::vec::IntoIter<DirEntry>)>,
    /// Listing failures not yet yielded
    pending: Vec<SkippedDir>,
}

impl Walk<'_> {
    /// List one directory level, sorted by name
    fn open(&mut self, dir: &Path, depth: usize) {
        let mut entries = Vec::new();

        for result in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            match result {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    let path = e.path().unwrap_or(dir).to_path_buf();
                    warn!(path = %path.display(), error = %e, "skipping unreadable directory");
                    self.pending.push(SkippedDir {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.stack.push((depth, entries.into_iter()));
    }
}

impl Iterator for Walk<'_> {
    type Item = WalkItem;

    fn next(&mut self) -> Option<WalkItem> {
        loop {
            if !self.pending.is_empty() {
                return Some(WalkItem::Skipped(self.pending.remove(0)));
            }

            let (depth, entries) = self.stack.last_mut()?;
            let depth = *depth;
            let Some(entry) = entries.next() else {
                self.stack.pop();
                continue;
            };

            let name = entry.file_name().to_string_lossy().to_string();
            // Symlinks are reported as files and never followed
            let is_dir = entry.file_type().is_dir();
            if self.scanner.is_hidden(&entry, &name, is_dir, depth) {
                continue;
            }

            let kind = if is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            let rel_path = entry
                .path()
                .strip_prefix(&self.scanner.root)
                .map(to_forward_slashes)
                .unwrap_or_else(|_| name.clone());

            if kind == EntryKind::Directory && !self.scanner.policy.is_exist_only_dir(&name) {
                self.open(entry.path(), depth + 1);
            }

            return Some(WalkItem::Entry(PathEntry {
                rel_path,
                path: entry.into_path(),
                name,
                kind,
                depth,
            }));
        }
    }
}
