/*!
 * Utility functions and default rule tables for treedoc
 */

use std::path::Path;

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;

/// Default name of the tree output file
pub const DEFAULT_TREE_OUTPUT: &str = "PROJECT_TREE.txt";

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Main document name derived from the root name and the start time
pub fn output_file_name(module_name: &str, now: DateTime<Local>) -> String {
    format!(
        "{}_DOCUMENTATION_{}.txt",
        module_name,
        now.format("%Y-%m-%d_%Hh%M")
    )
}

/// Render a relative path with forward slashes regardless of host separator
pub fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Extensions whose files are listed
pub static DEFAULT_ALLOWED_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Scripts
        ".ts",
        ".tsx",
        ".js",
        ".jsx",
        ".mjs",
        // Data & docs
        ".json",
        ".md",
        ".sql",
        ".css",
        // Assets
        ".jpg",
        ".png",
        ".svg",
        ".ico",
        // Environment & ignore files
        ".env",
        ".env.example",
        ".gitignore",
        ".dockerignore",
    ]
});

/// Extensions whose content is embedded as text
pub static DEFAULT_TEXT_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".ts",
        ".tsx",
        ".js",
        ".jsx",
        ".mjs",
        ".json",
        ".md",
        ".sql",
        ".css",
        ".env",
        ".env.example",
    ]
});

/// Directories listed but never descended into
pub static DEFAULT_EXIST_ONLY_DIRS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["node_modules", ".github"]);

/// Files listed with their content withheld
pub static DEFAULT_EXIST_ONLY_FILES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "package.json",
        "package-lock.json",
        ".gitignore",
        ".dockerignore",
    ]
});
