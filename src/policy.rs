/*!
 * Classification policy: which files are listed and how their content is shown
 *
 * All decisions are pure functions of the file name (never the directory
 * part of a path) and the immutable tables the policy was built from.
 */

use crate::config::PolicyTables;
use crate::types::{ContentMode, InclusionDecision};

/// File classification rules
#[derive(Debug, Clone)]
pub struct Policy {
    allowed_extensions: Vec<String>,
    text_extensions: Vec<String>,
    exist_only_dirs: Vec<String>,
    exist_only_files: Vec<String>,
    self_names: Vec<String>,
    generated_prefix: Option<String>,
}

impl Policy {
    /// Build a policy from configured tables
    pub fn new(tables: &PolicyTables) -> Self {
        let lower =
            |exts: &[String]| -> Vec<String> { exts.iter().map(|e| e.to_lowercase()).collect() };
        Self {
            allowed_extensions: lower(&tables.allowed_extensions),
            text_extensions: lower(&tables.text_extensions),
            exist_only_dirs: tables.exist_only_dirs.clone(),
            exist_only_files: tables.exist_only_files.clone(),
            self_names: tables.self_names.clone(),
            generated_prefix: tables.generated_prefix.clone(),
        }
    }

    /// Whether `name` is the tool's own artifact. Wins over every other rule.
    pub fn is_self(&self, name: &str) -> bool {
        self.self_names.iter().any(|s| s == name)
    }

    /// Whether `name` looks like a document written by an earlier run
    pub fn is_generated_document(&self, name: &str) -> bool {
        match &self.generated_prefix {
            Some(prefix) => {
                name.starts_with(prefix.as_str()) && name.to_lowercase().ends_with(".txt")
            }
            None => false,
        }
    }

    /// Whether a directory is listed but never walked
    pub fn is_exist_only_dir(&self, name: &str) -> bool {
        self.exist_only_dirs.iter().any(|d| d == name)
    }

    /// Whether a file is listed with its content withheld
    pub fn is_exist_only_file(&self, name: &str) -> bool {
        self.exist_only_files.iter().any(|f| f == name)
    }

    /// Whether a file belongs in the flat list
    pub fn is_included(&self, name: &str) -> bool {
        if self.is_self(name) {
            return false;
        }
        self.is_exist_only_file(name) || ends_with_any(name, &self.allowed_extensions)
    }

    /// How an included file's body is rendered
    pub fn content_mode(&self, name: &str) -> ContentMode {
        if self.is_exist_only_file(name) {
            ContentMode::ExistenceOnly
        } else if ends_with_any(name, &self.text_extensions) {
            ContentMode::Text
        } else {
            ContentMode::Binary
        }
    }

    /// Full decision for a file name
    pub fn decide(&self, name: &str) -> InclusionDecision {
        if self.is_included(name) {
            InclusionDecision::Included(self.content_mode(name))
        } else {
            InclusionDecision::Excluded
        }
    }
}

// Any configured suffix matches; no longest-match preference.
fn ends_with_any(name: &str, extensions: &[String]) -> bool {
    let lower = name.to_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
}
