/*!
 * treedoc - Snapshot a project as a directory tree plus one consolidated document
 *
 * The pipeline walks a root directory once, renders the full tree to its own
 * file, then writes a document with a numbered file list followed by the
 * content of every included file.
 */

pub mod aggregate;
pub mod config;
pub mod error;
pub mod policy;
pub mod render;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use tracing::{info, warn};

// Re-export main components for easier access
pub use aggregate::{ContentAggregator, ContentStats, FsReader, ReadText};
pub use config::{Config, PolicyTables};
pub use error::{Result, TreeDocError};
pub use policy::Policy;
pub use render::TreeRenderer;
pub use report::{ReportFormat, Reporter, RunReport};
pub use scanner::{Scanner, Walk, WalkItem};
pub use types::{ContentMode, FileRecord, InclusionDecision, PathEntry, Snapshot, TreeNode};
pub use writer::DocumentWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the whole pipeline for `config`
///
/// The tree file is written before the main document and is left in place
/// if the document write fails.
pub fn run(config: &Config, progress: Arc<ProgressBar>) -> Result<RunReport> {
    let start_time = Instant::now();

    let scanner = Scanner::new(config)?;
    let snapshot = scanner.scan();
    info!(
        root = %scanner.root().display(),
        files = snapshot.files.len(),
        "traversal finished"
    );
    if !snapshot.skipped.is_empty() {
        warn!(count = snapshot.skipped.len(), "subtrees skipped");
    }

    let writer = DocumentWriter::new(config.clone(), Arc::clone(&progress));
    writer.write_tree(&snapshot.tree)?;

    progress.set_length(snapshot.files.len() as u64);
    let aggregator = ContentAggregator::new().with_max_file_size(config.max_file_size);
    let stats = writer.write_document(&snapshot.files, &aggregator)?;

    Ok(RunReport {
        output_file: config.output_file.display().to_string(),
        tree_file: config.tree_output.display().to_string(),
        duration: start_time.elapsed(),
        stats,
        skipped: snapshot.skipped,
    })
}
