//! Command line argument parsing for the Declare-to-LP tools.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::{fs, process};

/// Command line arguments shared by the Declare-to-LP tools.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path of the Declare model file, or "all" to process all model files
    #[arg(value_name = "MODEL")]
    pub model: String,

    /// Directory for generated programs (only used by generator). If <DIR> is `-` then stdout is used.
    #[arg(short = 'D', long, value_name = "DIR")]
    pub output_dir: Option<String>,
}

impl Config {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn should_process_all(&self) -> bool {
        self.model == "all" || self.model == "--all"
    }

    pub fn model_name(&self) -> String {
        Path::new(&self.model)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown_model".into())
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.output_dir.as_deref()
    }

    pub fn output_to_stdout(&self) -> bool {
        self.output_dir.as_deref() == Some("-")
    }

    /// Target path for the generated program of the current model.
    pub fn program_path(&self) -> PathBuf {
        let dir = self.output_dir.as_deref().unwrap_or(".");
        Path::new(dir).join(format!("{}.lp", self.model_name()))
    }
}

/// Get all .decl files from the models directory, sorted alphabetically
pub fn get_model_files() -> Vec<PathBuf> {
    let model_dir = "models";

    if !Path::new(model_dir).exists() {
        eprintln!("Error: Directory '{}' not found", model_dir);
        process::exit(1);
    }

    let entries = match fs::read_dir(model_dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading model dir: {}", e);
            process::exit(1);
        }
    };

    let mut files = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("decl") {
            files.push(path);
        }
    }

    files.sort();

    if files.is_empty() {
        eprintln!("No .decl files found in {}", model_dir);
        process::exit(1);
    }

    files
}
