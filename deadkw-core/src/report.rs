//! Unused symbol report and its output formats - plaintext and JSON.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::logging::log_warn;

/// Symbols of one file that are never used anywhere in the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnusedItems {
    pub keywords: Vec<String>,
    pub variables: Vec<String>,
}

impl UnusedItems {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.variables.is_empty()
    }
}

/// Unused symbols keyed by the file that declared them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnusedReport {
    files: BTreeMap<PathBuf, UnusedItems>,
}

impl UnusedReport {
    /// True when no file has any unused symbol.
    pub fn is_empty(&self) -> bool {
        self.files.values().all(UnusedItems::is_empty)
    }

    /// Number of files listed in the report.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn get(&self, path: &Path) -> Option<&UnusedItems> {
        self.files.get(path)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PathBuf, UnusedItems> {
        self.files.iter()
    }

    pub fn keyword_count(&self) -> usize {
        self.files.values().map(|i| i.keywords.len()).sum()
    }

    pub fn variable_count(&self) -> usize {
        self.files.values().map(|i| i.variables.len()).sum()
    }

    pub fn total(&self) -> usize {
        self.keyword_count() + self.variable_count()
    }
}

impl FromIterator<(PathBuf, UnusedItems)> for UnusedReport {
    fn from_iter<I: IntoIterator<Item = (PathBuf, UnusedItems)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a UnusedReport {
    type Item = (&'a PathBuf, &'a UnusedItems);
    type IntoIter = btree_map::Iter<'a, PathBuf, UnusedItems>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Renders the report as human-readable text.
pub fn render_plain(report: &UnusedReport) -> String {
    let mut out = String::new();

    if report.is_empty() {
        out.push_str("\n### No unused items found! ###\n\n");
        return out;
    }

    out.push_str("\n### Found unused items ###\n\n");
    for (path, items) in report.iter().filter(|(_, items)| !items.is_empty()) {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}:", path.display());
        if !items.keywords.is_empty() {
            out.push_str("  Unused Keywords:\n");
            for keyword in &items.keywords {
                let _ = writeln!(out, "    - {}", keyword);
            }
        }
        if !items.variables.is_empty() {
            out.push_str("  Unused Variables:\n");
            for variable in &items.variables {
                let _ = writeln!(out, "    - {}", variable);
            }
        }
        out.push('\n');
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    unused: &'a UnusedReport,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    keywords: usize,
    variables: usize,
}

/// Renders the report as pretty-printed JSON.
///
/// Fails if a file path is not valid UTF-8.
pub fn render_json(report: &UnusedReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        unused: report,
        summary: JsonSummary {
            files: report.len(),
            keywords: report.keyword_count(),
            variables: report.variable_count(),
        },
    })
}

/// Prints the report in plain text format.
pub fn print_plain(report: &UnusedReport) {
    print!("{}", render_plain(report));
}

/// Prints the report in JSON format.
///
/// Falls back to the plain format if serialization fails.
pub fn print_json(report: &UnusedReport) {
    match render_json(report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log_warn(&format!("JSON serialization failed, using plain output: {}", e));
            print_plain(report);
        }
    }
}
