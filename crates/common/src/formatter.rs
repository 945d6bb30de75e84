//! Unified output formatting for processing all model files.

use std::process;
use tracing::{error, info};

/// Collects per-file outcomes while a tool runs over every model file,
/// then prints a summary (re-listing the failures) and exits non-zero if
/// anything failed.
pub struct AllResultsFormatter {
    tool_name: String,
    total_files: usize,
    successful: usize,
    failures: Vec<String>,
}

impl AllResultsFormatter {
    pub fn new(tool_name: &str, total_files: usize) -> Self {
        info!("Running {} on {} model files...", tool_name, total_files);
        info!("{}", "=".repeat(80));

        Self {
            tool_name: tool_name.to_string(),
            total_files,
            successful: 0,
            failures: Vec::new(),
        }
    }

    pub fn report_success(&mut self, file_name: &str, stats: Option<&str>) {
        self.successful += 1;
        match stats {
            Some(stats) => info!("SUCCESS: {} ({})", file_name, stats),
            None => info!("SUCCESS: {}", file_name),
        }
    }

    pub fn report_failure(&mut self, file_name: &str, reason: Option<&str>) {
        match reason {
            Some(reason) => error!("FAILED: {} - {}", file_name, reason),
            None => error!("FAILED: {}", file_name),
        }
        self.failures.push(file_name.to_string());
    }

    pub fn finish(self) {
        info!("{}", "=".repeat(80));
        info!(
            "SUMMARY: {} files, {} successful, {} failed",
            self.total_files,
            self.successful,
            self.failures.len()
        );

        if self.failures.is_empty() {
            info!(
                "All model files processed successfully with {}!",
                self.tool_name
            );
        } else {
            for file_name in &self.failures {
                error!("  failed: {}", file_name);
            }
            error!(
                "Some files failed to process with {}. Check the errors above for details.",
                self.tool_name
            );
            process::exit(1);
        }
    }
}
