//! deadkw-core: unused keyword and variable detection for keyword-driven
//! test suites.
//!
//! Test-definition files declare reusable keywords in a `*** Keywords ***`
//! section and named values in a `*** Variables ***` section. This library
//! finds the declarations that no body line anywhere in the suite refers to.
//!
//! The analysis runs in two passes over the same file list:
//!
//! 1. [`declarations`]: parse every file into its declared keyword and
//!    variable names, building a [`Corpus`]
//! 2. [`usage`]: rescan every file, splitting indented body lines into fields
//!    and clearing any declared symbol a field names exactly
//!
//! Whatever survives the second pass is the [`UnusedReport`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use deadkw_core::prelude::*;
//!
//! let result = Deadkw::new("tests/")
//!     .file_types([".robot", ".resource"])
//!     .analyze()?;
//!
//! print_plain(&result.unused);
//! ```
//!
//! Both passes also work on in-memory sources, without touching the
//! filesystem:
//!
//! ```rust,ignore
//! let sources = [("a.robot", "*** Variables ***\n${UNUSED}    1\n")];
//! let corpus = Corpus::from_sources(sources);
//! let report = scan_usage_sources(&corpus, sources, ScanOptions::default());
//! ```
//!
//! # Module Organization
//!
//! - [`syntax`]: section markers, body lines and field splitting
//! - [`declarations`]: declaration extraction
//! - [`usage`]: cross-file usage scanning
//! - [`scan`]: file discovery
//! - [`report`]: plain text and JSON output
//! - [`builder`]: fluent API running the whole pipeline
//! - [`config`]: `deadkw.toml` loading
//! - [`error`]: typed error handling

pub mod builder;
pub mod config;
pub mod declarations;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod scan;
pub mod syntax;
pub mod usage;

// ============================================================================
// Explicit Re-exports
// ============================================================================

// Error types
pub use error::{DeadkwError, DeadkwResult, IoResultExt};

// Builder API
pub use builder::{AnalysisResult, Deadkw};

// Configuration
pub use config::{load_config, DeadkwConfig, OutputConfig, OutputFormat, CONFIG_FILE};

// Declaration extraction
pub use declarations::{extract_declarations, extract_file, Corpus, FileDeclarations};

// Logging
pub use logging::{init_structured_logging, log_error, log_info, log_warn};

// Reporting
pub use report::{print_json, print_plain, render_json, render_plain, UnusedItems, UnusedReport};

// File discovery
pub use scan::{gather_files, gather_files_with_excludes, matches_suffix, DEFAULT_FILE_TYPES};

// Usage scanning
pub use usage::{scan_usage, scan_usage_sources, ScanOptions, SymbolPool, UsageAccumulator};
