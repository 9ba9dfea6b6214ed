//! XD Layout CLI
//!
//! Usage:
//!   xd-layout [OPTIONS] <INPUT>...
//!
//! Options:
//!   -c, --config <FILE>  Import settings (TOML format)
//!   -o, --output <DIR>   Write `<DIR>/<artboard>/layout.json` plus assets
//!   -v, --verbose        Log progress (repeat for debug output)
//!   -h, --help           Print help

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::LevelFilter;

use xd_layout::{import_file, DesignFile, ImportConfig, LayoutDocument, RuleSet};

#[derive(Parser, Debug)]
#[command(name = "xd-layout")]
#[command(about = "Convert design-tool artboards into normalized layout documents")]
struct Cli {
    /// Exported design documents (JSON)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Import settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory; prints a JSON array to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log progress; repeat for debug output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
    log::debug!("parsed arguments: {:?}", cli);

    let config = match &cli.config {
        Some(path) => match ImportConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => ImportConfig::default(),
    };
    let rules = RuleSet::builtin(&config);

    let mut documents = Vec::new();
    for path in &cli.inputs {
        let file = match DesignFile::from_file(path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Error reading '{}': {}", path.display(), e);
                process::exit(1);
            }
        };
        match import_file(&file, &rules, &config) {
            Ok(docs) => documents.extend(docs),
            Err(e) => {
                eprintln!("Error importing '{}': {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    let result = match &cli.output {
        Some(dir) => documents
            .iter()
            .try_for_each(|doc| write_document(dir, doc)),
        None => print_documents(&documents),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_documents(documents: &[LayoutDocument]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(documents).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

/// Write `layout.json` and every asset under `<dir>/<artboard>/`
fn write_document(dir: &Path, doc: &LayoutDocument) -> Result<(), String> {
    let root = dir.join(file_safe(&doc.name));
    let assets = root.join("assets");
    fs::create_dir_all(&assets)
        .map_err(|e| format!("failed to create '{}': {}", assets.display(), e))?;

    let json = doc.to_json().map_err(|e| e.to_string())?;
    let layout = root.join("layout.json");
    fs::write(&layout, json)
        .map_err(|e| format!("failed to write '{}': {}", layout.display(), e))?;

    for asset in &doc.assets {
        let path = assets.join(file_safe(&asset.file_name));
        fs::write(&path, &asset.bytes)
            .map_err(|e| format!("failed to write '{}': {}", path.display(), e))?;
    }

    log::info!(
        "wrote '{}' ({} assets) to {}",
        doc.name,
        doc.assets.len(),
        root.display()
    );
    Ok(())
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c => c,
        })
        .collect()
}
