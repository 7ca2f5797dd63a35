/*!
 * Document assembly and output for treedoc
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::info;

use crate::aggregate::{ContentAggregator, ContentStats, ReadText};
use crate::config::Config;
use crate::error::{write_error, Result};
use crate::render::TreeRenderer;
use crate::types::{FileRecord, TreeNode};

const BANNER_RULE: &str =
    "################################################################################";
const BLOCK_RULE: &str =
    "================================================================================";

/// Banner at the top of the main document
pub fn make_banner(module_name: &str) -> String {
    let title = format!("{:<50}", module_name.to_uppercase());
    format!(
        "\n{rule}\n#{:^78}#\n#{:^78}#\n#{:^78}#\n{rule}\n",
        title,
        "SOURCE CODE DOCUMENTATION GENERATOR",
        format!("treedoc {} - TREE + CONTENT SNAPSHOT", crate::VERSION),
        rule = BANNER_RULE
    )
}

/// Numbered list of every included file
pub fn file_list_block(records: &[FileRecord]) -> String {
    let mut lines = vec![
        BLOCK_RULE.to_string(),
        format!("                        FILE LIST - {} FILES", records.len()),
        format!("{}\n", BLOCK_RULE),
    ];
    lines.extend(
        records
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{:>3}. {}", i + 1, r.rel_path)),
    );
    lines.push("\n".to_string());
    lines.join("\n")
}

// Writes blocks separated by single newlines.
struct Joined<W: Write> {
    out: W,
    first: bool,
}

impl<W: Write> Joined<W> {
    fn new(out: W) -> Self {
        Self { out, first: true }
    }

    fn push(&mut self, block: &str) -> io::Result<()> {
        if !self.first {
            self.out.write_all(b"\n")?;
        }
        self.first = false;
        self.out.write_all(block.as_bytes())
    }

    fn into_inner(self) -> W {
        self.out
    }
}

/// Writes the tree file and the main document
pub struct DocumentWriter {
    /// Writer configuration
    config: Config,
    /// Progress bar, advanced once per file section
    progress: Arc<ProgressBar>,
}

impl DocumentWriter {
    /// Create a new document writer
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Render the tree and overwrite the tree output file
    pub fn write_tree(&self, tree: &TreeNode) -> Result<()> {
        let path = &self.config.tree_output;
        let rendered = TreeRenderer::new().render(tree);

        let mut file = File::create(path).map_err(write_error(path))?;
        file.write_all(rendered.as_bytes())
            .map_err(write_error(path))?;

        info!(path = %path.display(), "tree written");
        Ok(())
    }

    /// Assemble the main document into the configured output file
    pub fn write_document<R: ReadText>(
        &self,
        records: &[FileRecord],
        aggregator: &ContentAggregator<R>,
    ) -> Result<ContentStats> {
        let path: &Path = &self.config.output_file;
        let file = File::create(path).map_err(write_error(path))?;

        let stats = self
            .assemble(BufWriter::new(file), records, aggregator)
            .map_err(write_error(path))?;

        info!(path = %path.display(), files = records.len(), "document written");
        Ok(stats)
    }

    /// Stream banner, file list and content sections into `out`
    pub fn assemble<W: Write, R: ReadText>(
        &self,
        out: W,
        records: &[FileRecord],
        aggregator: &ContentAggregator<R>,
    ) -> io::Result<ContentStats> {
        let mut doc = Joined::new(out);
        let mut stats = ContentStats::default();

        doc.push(&make_banner(&self.config.module_name))?;
        doc.push(&file_list_block(records))?;
        doc.push(BLOCK_RULE)?;
        doc.push("                          FILE CONTENTS")?;
        doc.push(&format!("{}\n", BLOCK_RULE))?;

        for section in aggregator.sections(records) {
            self.progress
                .set_message(format!("Current file: {}", section.rel_path));
            doc.push(&section.text)?;
            stats.record(&section);
            self.progress.inc(1);
        }

        doc.into_inner().flush()?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentMode;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn record(rel_path: &str, mode: ContentMode) -> FileRecord {
        FileRecord {
            rel_path: rel_path.to_string(),
            path: PathBuf::from(rel_path),
            mode,
        }
    }

    #[test]
    fn test_banner_carries_module_name() {
        let banner = make_banner("shop-api");
        assert!(banner.starts_with('\n'));
        assert!(banner.ends_with(&format!("{}\n", BANNER_RULE)));
        assert!(banner.contains("SHOP-API"));
        for line in banner.lines().filter(|l| !l.is_empty()) {
            assert_eq!(line.chars().count(), 80, "{:?}", line);
        }
    }

    #[test]
    fn test_file_list_block() {
        let records = vec![
            record("a/b.ts", ContentMode::Text),
            record("package.json", ContentMode::ExistenceOnly),
        ];
        let expected = format!(
            "{rule}\n                        FILE LIST - 2 FILES\n{rule}\n\n  1. a/b.ts\n  2. package.json\n\n",
            rule = BLOCK_RULE
        );
        assert_eq!(file_list_block(&records), expected);
    }

    #[test]
    fn test_assemble_empty_document() {
        let temp_dir = tempdir().unwrap();
        let mut config = Config::for_root(temp_dir.path());
        config.module_name = "empty".to_string();
        let writer = DocumentWriter::new(config, Arc::new(ProgressBar::hidden()));
        let aggregator = ContentAggregator::new();

        let mut out = Vec::new();
        let stats = writer.assemble(&mut out, &[], &aggregator).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(stats.files(), 0);
        assert!(text.contains("FILE LIST - 0 FILES"));
        assert!(text.ends_with(&format!("FILE CONTENTS\n{}\n", BLOCK_RULE)));
    }

    #[test]
    fn test_write_failure_propagates() {
        let temp_dir = tempdir().unwrap();
        let mut config = Config::for_root(temp_dir.path());
        config.output_file = temp_dir.path().join("no-such-dir").join("doc.txt");
        let writer = DocumentWriter::new(config, Arc::new(ProgressBar::hidden()));
        let aggregator = ContentAggregator::new();

        let err = writer.write_document(&[], &aggregator).unwrap_err();
        assert!(err.to_string().starts_with("Failed to write"));
    }
}
