/*!
 * Configuration handling for treedoc
 */

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::Parser;
use clap_complete::Shell;

use crate::error::{Result, ResultExt, TreeDocError};
use crate::utils::{
    output_file_name, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_EXIST_ONLY_DIRS,
    DEFAULT_EXIST_ONLY_FILES, DEFAULT_TEXT_EXTENSIONS, DEFAULT_TREE_OUTPUT,
};

/// Command-line arguments for treedoc
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "treedoc",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a directory tree and a consolidated source document for a project",
    long_about = "Walks a project directory and writes two files: a plain-text tree of the hierarchy, and a single document listing every included file followed by its full content."
)]
pub struct Args {
    /// Project directory to document (defaults to the directory containing this executable)
    pub directory_path: Option<String>,

    /// Main document path (defaults to <root>_DOCUMENTATION_<YYYY-MM-DD_HHhMM>.txt)
    #[clap(short, long)]
    pub output: Option<String>,

    /// Tree output path, overwritten on every run
    #[clap(long, default_value = DEFAULT_TREE_OUTPUT)]
    pub tree_output: String,

    /// Name shown in the document banner (defaults to the root directory name)
    #[clap(long)]
    pub module_name: Option<String>,

    /// Comma-separated list of extensions whose files are listed
    #[clap(long, value_delimiter = ',')]
    pub allow_ext: Vec<String>,

    /// Comma-separated list of extensions whose content is embedded as text
    #[clap(long, value_delimiter = ',')]
    pub text_ext: Vec<String>,

    /// Comma-separated list of directory names listed but never walked
    #[clap(long, value_delimiter = ',')]
    pub exist_only_dirs: Vec<String>,

    /// Comma-separated list of file names listed without content
    #[clap(long, value_delimiter = ',')]
    pub exist_only_files: Vec<String>,

    /// Additional files to treat as the tool's own artifact (excluded everywhere)
    #[clap(long = "exclude-self", value_name = "PATH")]
    pub exclude_self: Vec<String>,

    /// Replace text content larger than this many bytes with a placeholder
    #[clap(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Do not show progress or the final report
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Rule tables for the classification policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTables {
    /// Suffixes (case-insensitive) of listed files
    pub allowed_extensions: Vec<String>,
    /// Suffixes (case-insensitive) of files read as text
    pub text_extensions: Vec<String>,
    /// Directory names listed but never descended into
    pub exist_only_dirs: Vec<String>,
    /// File names listed with content withheld
    pub exist_only_files: Vec<String>,
    /// File names of the tool's own artifact
    pub self_names: Vec<String>,
    /// Name prefix of documents from earlier runs, hidden at the root
    pub generated_prefix: Option<String>,
}

impl Default for PolicyTables {
    fn default() -> Self {
        let owned = |v: &[&str]| -> Vec<String> { v.iter().map(|s| s.to_string()).collect() };
        Self {
            allowed_extensions: owned(DEFAULT_ALLOWED_EXTENSIONS.as_slice()),
            text_extensions: owned(DEFAULT_TEXT_EXTENSIONS.as_slice()),
            exist_only_dirs: owned(DEFAULT_EXIST_ONLY_DIRS.as_slice()),
            exist_only_files: owned(DEFAULT_EXIST_ONLY_FILES.as_slice()),
            self_names: Vec::new(),
            generated_prefix: None,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory to document
    pub target_dir: PathBuf,

    /// Main document path
    pub output_file: PathBuf,

    /// Tree output path
    pub tree_output: PathBuf,

    /// Name shown in the banner
    pub module_name: String,

    /// Classification tables
    pub tables: PolicyTables,

    /// Exact paths never listed (resolved once at startup)
    pub self_paths: Vec<PathBuf>,

    /// Optional ceiling for embedded text content
    pub max_file_size: Option<u64>,

    /// Suppress progress and report output
    pub quiet: bool,
}

impl Config {
    /// Configuration for `root` with default tables and output names
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let target_dir = root.into();
        let module_name = dir_name(&target_dir);
        let tables = PolicyTables {
            generated_prefix: Some(generated_prefix(&module_name)),
            ..PolicyTables::default()
        };
        Self {
            output_file: PathBuf::from(output_file_name(&module_name, Local::now())),
            tree_output: PathBuf::from(DEFAULT_TREE_OUTPUT),
            module_name,
            target_dir,
            tables,
            self_paths: Vec::new(),
            max_file_size: None,
            quiet: false,
        }
    }

    /// Create configuration from command-line arguments
    ///
    /// `started` is the invocation time used for the default document name.
    pub fn from_args(args: Args, started: DateTime<Local>) -> Result<Self> {
        let exe = env::current_exe().with_context(|| "Failed to locate the running executable")?;

        let root = match &args.directory_path {
            Some(dir) => PathBuf::from(dir),
            None => exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| crate::error!(Config, "Executable has no parent directory"))?,
        };
        let root = fs::canonicalize(&root).map_err(|e| {
            TreeDocError::Config(format!("Target directory not found: {} ({})", root.display(), e))
        })?;

        let root_name = dir_name(&root);
        let module_name = args.module_name.unwrap_or_else(|| root_name.clone());
        let output_file = args
            .output
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(output_file_name(&root_name, started)));
        let tree_output = PathBuf::from(args.tree_output);

        let mut tables = PolicyTables {
            generated_prefix: Some(generated_prefix(&root_name)),
            ..PolicyTables::default()
        };
        override_table(&mut tables.allowed_extensions, args.allow_ext);
        override_table(&mut tables.text_extensions, args.text_ext);
        override_table(&mut tables.exist_only_dirs, args.exist_only_dirs);
        override_table(&mut tables.exist_only_files, args.exist_only_files);

        // Self artifacts are matched by name at every depth
        let mut self_sources = vec![exe];
        self_sources.extend(args.exclude_self.into_iter().map(PathBuf::from));
        for path in &self_sources {
            if let Some(name) = path.file_name() {
                tables.self_names.push(name.to_string_lossy().to_string());
            }
        }

        // This run's own outputs are matched by exact location only
        let self_paths = vec![resolve_path(&output_file), resolve_path(&tree_output)];

        Ok(Self {
            target_dir: root,
            output_file,
            tree_output,
            module_name,
            tables,
            self_paths,
            max_file_size: args.max_file_size,
            quiet: args.quiet,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.target_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.target_dir.display()
        );

        for output in [&self.output_file, &self.tree_output] {
            if let Some(parent) = output.parent() {
                crate::ensure!(
                    parent == Path::new("") || parent.is_dir(),
                    Config,
                    "Output directory not found: {}",
                    parent.display()
                );
            }
        }

        crate::ensure!(
            self.max_file_size != Some(0),
            InvalidArgument,
            "--max-file-size must be greater than zero"
        );

        Ok(())
    }
}

fn override_table(table: &mut Vec<String>, values: Vec<String>) {
    let values: Vec<String> = values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    if !values.is_empty() {
        *table = values;
    }
}

// Default documents are named `<root>_DOCUMENTATION_<time>.txt`
fn generated_prefix(root_name: &str) -> String {
    format!("{}_DOCUMENTATION_", root_name)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Absolute form of a path that may not exist yet
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().unwrap_or_default().join(path)
    };
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|p| p.join(name))
            .unwrap_or(absolute),
        _ => absolute,
    }
}
