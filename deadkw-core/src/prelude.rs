//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use deadkw_core::prelude::*;
//! ```

pub use crate::error::{DeadkwError, DeadkwResult};

pub use crate::builder::{AnalysisResult, Deadkw};

pub use crate::declarations::{Corpus, FileDeclarations};
pub use crate::usage::{scan_usage, scan_usage_sources, ScanOptions};

pub use crate::report::{print_json, print_plain, UnusedItems, UnusedReport};

pub use crate::scan::{gather_files, DEFAULT_FILE_TYPES};

pub use crate::config::{load_config, DeadkwConfig};
