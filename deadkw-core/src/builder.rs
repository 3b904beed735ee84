//! Builder pattern API for deadkw analysis.
//!
//! Runs the whole pipeline: list files, extract declarations from each,
//! then rescan every file for usages.
//!
//! ```rust,ignore
//! use deadkw_core::prelude::*;
//!
//! let result = Deadkw::new("/path/to/suite")
//!     .file_types([".robot", ".resource"])
//!     .exclude_dirs(["results"])
//!     .analyze()?;
//!
//! print_plain(&result.unused);
//! ```

use std::path::PathBuf;

use tracing::info;

use crate::declarations::Corpus;
use crate::error::DeadkwResult;
use crate::report::UnusedReport;
use crate::scan::{gather_files_with_excludes, DEFAULT_FILE_TYPES};
use crate::usage::{scan_usage, ScanOptions};

/// Builder for configuring unused symbol analysis.
#[derive(Debug, Clone)]
pub struct Deadkw {
    /// Root directory to scan
    root: PathBuf,

    /// File name suffixes to include
    file_types: Vec<String>,

    /// Directory names to skip
    excluded_dirs: Vec<String>,

    /// Usage matching options
    options: ScanOptions,
}

impl Deadkw {
    /// Create a new analysis builder for the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_types: DEFAULT_FILE_TYPES.iter().map(|s| s.to_string()).collect(),
            excluded_dirs: Vec::new(),
            options: ScanOptions::default(),
        }
    }

    /// Replace the file name suffixes to scan.
    pub fn file_types(mut self, types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.file_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Add directories to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Ignore indented `#` lines when looking for usages.
    pub fn skip_commented_usages(mut self, enabled: bool) -> Self {
        self.options.skip_commented_usages = enabled;
        self
    }

    /// Run the analysis and return results.
    pub fn analyze(&self) -> DeadkwResult<AnalysisResult> {
        // 1. Gather files
        let files = gather_files_with_excludes(
            &self.root,
            self.file_types.as_slice(),
            self.excluded_dirs.as_slice(),
        )?;

        // 2. Extract declarations
        let corpus = Corpus::extract_all(&files)?;

        // 3. Rescan every file for usages
        let unused = scan_usage(&corpus, &files, self.options)?;

        info!(
            root = %self.root.display(),
            files = files.len(),
            declaring_files = corpus.len(),
            unused = unused.total(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            root: self.root.clone(),
            files_scanned: files.len(),
            declaring_files: corpus.len(),
            declared_keywords: corpus.keyword_count(),
            declared_variables: corpus.variable_count(),
            unused,
        })
    }
}

/// Result of running unused symbol analysis.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Root directory that was analyzed
    pub root: PathBuf,

    /// Number of files matching the suffix filter
    pub files_scanned: usize,

    /// Number of files declaring at least one symbol
    pub declaring_files: usize,

    /// Keyword declarations across all files
    pub declared_keywords: usize,

    /// Variable declarations across all files
    pub declared_variables: usize,

    /// Unused symbols per declaring file
    pub unused: UnusedReport,
}

impl AnalysisResult {
    /// Check if any unused symbol was found.
    pub fn has_unused(&self) -> bool {
        !self.unused.is_empty()
    }
}
