/*!
 * End-to-end tests for the treedoc pipeline
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use chrono::{Local, TimeZone};
use indicatif::ProgressBar;
use tempfile::{tempdir, TempDir};

use crate::aggregate::{BINARY_PLACEHOLDER, EXISTENCE_PLACEHOLDER};
use crate::config::{resolve_path, Config};
use crate::scanner::Scanner;
use crate::utils::output_file_name;

// The classic layout: one source file, a dependency folder, a manifest and the tool itself
fn setup_round_trip_directory() -> io::Result<TempDir> {
    let temp_dir = tempdir()?;

    fs::create_dir_all(temp_dir.path().join("a"))?;
    fs::create_dir_all(temp_dir.path().join("node_modules").join("pkg"))?;

    let mut source = File::create(temp_dir.path().join("a").join("b.ts"))?;
    write!(source, "x")?;

    let mut dep = File::create(temp_dir.path().join("node_modules/pkg/index.js"))?;
    writeln!(dep, "module.exports = {{}};")?;

    let mut manifest = File::create(temp_dir.path().join("package.json"))?;
    writeln!(manifest, "{{\"name\": \"demo\"}}")?;

    let mut tool = File::create(temp_dir.path().join("st.py"))?;
    writeln!(tool, "print('hello')")?;

    Ok(temp_dir)
}

fn config_for(root: &Path, out_dir: &Path) -> Config {
    let mut config = Config::for_root(root);
    config.tables.self_names = vec!["st.py".to_string()];
    config.module_name = "demo".to_string();
    config.output_file = out_dir.join("doc.txt");
    config.tree_output = out_dir.join("tree.txt");
    config
}

#[test]
fn test_round_trip_scenario() -> io::Result<()> {
    let temp_dir = setup_round_trip_directory()?;
    let out_dir = tempdir()?;
    let config = config_for(temp_dir.path(), out_dir.path());

    let report = crate::run(&config, Arc::new(ProgressBar::hidden()))?;
    assert_eq!(report.stats.files(), 2);
    assert!(report.skipped.is_empty());

    // Flat list
    let scanner = Scanner::new(&config)?;
    let paths: Vec<String> = scanner
        .scan()
        .files
        .into_iter()
        .map(|r| r.rel_path)
        .collect();
    assert_eq!(paths, vec!["a/b.ts", "package.json"]);

    // Tree: node_modules is a leaf, the tool never shows
    let tree = fs::read_to_string(&config.tree_output)?;
    let expected_tree = format!(
        "{}\n├── a\n│   └── b.ts\n├── node_modules\n└── package.json",
        scanner.root_name()
    );
    assert_eq!(tree, expected_tree);

    // Document
    let doc = fs::read_to_string(&config.output_file)?;
    assert!(doc.contains("FILE LIST - 2 FILES"));
    assert!(doc.contains("  1. a/b.ts\n  2. package.json\n"));
    assert!(doc.contains("## FILE 1: b.ts\n## Path: a/b.ts\n"));
    assert!(doc.contains(&format!(
        "## Path: a/b.ts\n{}\n\nx\n",
        crate::aggregate::SECTION_RULE
    )));
    assert!(doc.contains(&format!(
        "## Path: package.json\n{}\n\n{}\n",
        crate::aggregate::SECTION_RULE,
        EXISTENCE_PLACEHOLDER
    )));
    assert!(!doc.contains("st.py"));
    assert!(!doc.contains("index.js"));
    assert!(!doc.contains("\"name\""));

    Ok(())
}

#[test]
fn test_binary_assets_are_placeholders() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let out_dir = tempdir()?;
    let mut png = File::create(temp_dir.path().join("logo.png"))?;
    png.write_all(&[0x89, b'P', b'N', b'G', 0x00, 0xff])?;

    let config = config_for(temp_dir.path(), out_dir.path());
    let report = crate::run(&config, Arc::new(ProgressBar::hidden()))?;
    assert_eq!(report.stats.binary, 1);

    let doc = fs::read_to_string(&config.output_file)?;
    assert!(doc.contains(BINARY_PLACEHOLDER));
    assert!(doc.contains("## FILE 1: logo.png"));

    Ok(())
}

#[test]
fn test_decode_failure_keeps_document_complete() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let out_dir = tempdir()?;
    File::create(temp_dir.path().join("broken.md"))?.write_all(&[0xc3, 0x28])?;
    fs::write(temp_dir.path().join("ok.md"), "# fine\n")?;

    let config = config_for(temp_dir.path(), out_dir.path());
    let report = crate::run(&config, Arc::new(ProgressBar::hidden()))?;
    assert_eq!(report.stats.unreadable, 1);
    assert_eq!(report.stats.text, 1);

    let doc = fs::read_to_string(&config.output_file)?;
    assert!(doc.contains("[Could not read file content - encoding error:"));
    assert!(doc.contains("## FILE 2: ok.md"));
    assert!(doc.contains("# fine\n"));

    Ok(())
}

#[test]
fn test_repeated_runs_are_identical() -> io::Result<()> {
    let temp_dir = setup_round_trip_directory()?;
    fs::create_dir_all(temp_dir.path().join("src/components"))?;
    fs::write(temp_dir.path().join("src/components/Button.tsx"), "export {};\n")?;
    fs::write(temp_dir.path().join("src/index.css"), "body {}\n")?;
    fs::write(temp_dir.path().join("README.md"), "# demo\n")?;

    // Outputs land inside the root; they must not feed back into the next run
    let mut config = config_for(temp_dir.path(), temp_dir.path());
    config.self_paths = vec![
        resolve_path(&config.output_file),
        resolve_path(&config.tree_output),
    ];

    crate::run(&config, Arc::new(ProgressBar::hidden()))?;
    let first_tree = fs::read(&config.tree_output)?;
    let first_doc = fs::read(&config.output_file)?;

    crate::run(&config, Arc::new(ProgressBar::hidden()))?;
    assert_eq!(fs::read(&config.tree_output)?, first_tree);
    assert_eq!(fs::read(&config.output_file)?, first_doc);

    let tree = String::from_utf8(first_tree).unwrap();
    assert!(!tree.contains("doc.txt"));
    assert!(!tree.contains("tree.txt"));

    Ok(())
}

#[test]
fn test_earlier_documents_stay_out_of_the_tree() -> io::Result<()> {
    let temp_dir = setup_round_trip_directory()?;
    let config = {
        let mut config = Config::for_root(temp_dir.path());
        config.tables.self_names = vec!["st.py".to_string()];
        let earlier = Local.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let later = Local.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
        fs::write(
            temp_dir.path().join(output_file_name(&config.module_name, earlier)),
            "stale",
        )?;
        config.output_file = temp_dir
            .path()
            .join(output_file_name(&config.module_name, later));
        config.tree_output = temp_dir.path().join("PROJECT_TREE.txt");
        config.self_paths = vec![
            resolve_path(&config.output_file),
            resolve_path(&config.tree_output),
        ];
        config
    };

    crate::run(&config, Arc::new(ProgressBar::hidden()))?;
    let tree = fs::read_to_string(&config.tree_output)?;
    assert!(!tree.contains("_DOCUMENTATION_"), "{}", tree);
    assert!(tree.ends_with("└── package.json"));

    Ok(())
}

#[test]
fn test_tree_written_before_document_failure() -> io::Result<()> {
    let temp_dir = setup_round_trip_directory()?;
    let out_dir = tempdir()?;
    let mut config = config_for(temp_dir.path(), out_dir.path());
    config.output_file = out_dir.path().join("missing").join("doc.txt");

    let result = crate::run(&config, Arc::new(ProgressBar::hidden()));
    assert!(result.is_err());
    assert!(config.tree_output.exists());
    assert!(!config.output_file.exists());

    Ok(())
}
