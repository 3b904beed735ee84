//! Keyword and variable declaration extraction.
//!
//! A declaration is an unindented, non-comment, non-empty line inside a
//! `*** Keywords ***` or `*** Variables ***` section:
//! - keywords are stored as the whole trimmed line
//! - variables are stored as their first field only, dropping the value
//!
//! Files are read one at a time; an unreadable file aborts the whole run.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{DeadkwResult, IoResultExt};
use crate::syntax::{first_field, is_body_line, is_comment_line, Section, SectionChange};

/// Symbols declared by a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileDeclarations {
    /// Keyword signature lines, verbatim after trimming
    pub keywords: BTreeSet<String>,
    /// Variable names without their assigned values
    pub variables: BTreeSet<String>,
}

impl FileDeclarations {
    /// True when the file declared neither keywords nor variables.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.variables.is_empty()
    }

    /// Total number of distinct declared symbols.
    pub fn symbol_count(&self) -> usize {
        self.keywords.len() + self.variables.len()
    }
}

/// Extract declarations from file content.
pub fn extract_declarations(content: &str) -> FileDeclarations {
    let mut decls = FileDeclarations::default();
    let mut section = Section::Other;

    for raw in content.lines() {
        let change = Section::classify(raw);
        if change != SectionChange::None {
            // Header lines are never declarations
            section = section.apply(change);
            continue;
        }

        if section == Section::Other || is_body_line(raw) || is_comment_line(raw) {
            continue;
        }

        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match section {
            Section::Keywords => {
                decls.keywords.insert(line.to_string());
            }
            Section::Variables => {
                decls.variables.insert(first_field(line).to_string());
            }
            Section::Other => {}
        }
    }

    decls
}

/// Read a file and extract its declarations.
pub fn extract_file(path: &Path) -> DeadkwResult<FileDeclarations> {
    let content = fs::read_to_string(path).with_path(path)?;
    Ok(extract_declarations(&content))
}

/// Declarations of every file that declared at least one symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Corpus {
    files: BTreeMap<PathBuf, FileDeclarations>,
}

impl Corpus {
    /// Build a corpus from in-memory `(path, content)` pairs.
    pub fn from_sources<P, S, I>(sources: I) -> Self
    where
        P: Into<PathBuf>,
        S: AsRef<str>,
        I: IntoIterator<Item = (P, S)>,
    {
        let mut corpus = Self::default();
        for (path, content) in sources {
            corpus.insert(path.into(), extract_declarations(content.as_ref()));
        }
        corpus
    }

    /// Read and extract every file. Fails on the first unreadable file.
    pub fn extract_all(files: &[PathBuf]) -> DeadkwResult<Self> {
        let mut corpus = Self::default();
        for path in files {
            corpus.insert(path.clone(), extract_file(path)?);
        }

        debug!(
            files = files.len(),
            declaring_files = corpus.len(),
            "declarations extracted"
        );
        Ok(corpus)
    }

    /// Add a file's declarations. Empty declaration sets are dropped.
    pub fn insert(&mut self, path: PathBuf, decls: FileDeclarations) {
        if decls.is_empty() {
            return;
        }
        debug!(
            path = %path.display(),
            keywords = decls.keywords.len(),
            variables = decls.variables.len(),
            "file declares symbols"
        );
        self.files.insert(path, decls);
    }

    pub fn get(&self, path: &Path) -> Option<&FileDeclarations> {
        self.files.get(path)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PathBuf, FileDeclarations> {
        self.files.iter()
    }

    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.keys()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of (file, keyword) declarations across the corpus.
    pub fn keyword_count(&self) -> usize {
        self.files.values().map(|d| d.keywords.len()).sum()
    }

    /// Number of (file, variable) declarations across the corpus.
    pub fn variable_count(&self) -> usize {
        self.files.values().map(|d| d.variables.len()).sum()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = (&'a PathBuf, &'a FileDeclarations);
    type IntoIter = btree_map::Iter<'a, PathBuf, FileDeclarations>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_keywords() {
        let content = "\
*** Keywords ***
Log Message
    [Arguments]    ${msg}
    Log    ${msg}

Open Browser To Login Page
    Open Browser    ${URL}
";
        let decls = extract_declarations(content);
        assert_eq!(decls.keywords, set(&["Log Message", "Open Browser To Login Page"]));
        assert!(decls.variables.is_empty());
    }

    #[test]
    fn test_extract_variables_strips_values() {
        let content = "\
*** Variables ***
${HOST}        localhost
${PORT}    8080    # default port
@{USERS}    alice    bob
&{OPTS}
";
        let decls = extract_declarations(content);
        assert_eq!(decls.variables, set(&["${HOST}", "${PORT}", "@{USERS}", "&{OPTS}"]));
        assert!(decls.keywords.is_empty());
    }

    #[test]
    fn test_keyword_stored_verbatim_trimmed() {
        let content = "*** Keywords ***\nClick  Button   \n";
        let decls = extract_declarations(content);
        let kw = decls.keywords.iter().next().unwrap();
        assert_eq!(kw, "Click  Button");
        assert_eq!(kw.trim(), kw);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let content = "\
*** Keywords ***
# Helper keywords

Real Keyword
    No Operation
";
        let decls = extract_declarations(content);
        assert_eq!(decls.keywords, set(&["Real Keyword"]));
    }

    #[test]
    fn test_other_sections_end_capture() {
        let content = "\
*** Variables ***
${A}    1
*** Test Cases ***
First Test
    Do Thing
*** Keywords ***
Do Thing
    No Operation
*** Settings ***
Library    Collections
";
        let decls = extract_declarations(content);
        assert_eq!(decls.variables, set(&["${A}"]));
        assert_eq!(decls.keywords, set(&["Do Thing"]));
    }

    #[test]
    fn test_switching_between_sections() {
        let content = "\
*** Keywords ***
Kw One
*** Variables ***
${V}    x
*** Keywords ***
Kw Two
";
        let decls = extract_declarations(content);
        assert_eq!(decls.keywords, set(&["Kw One", "Kw Two"]));
        assert_eq!(decls.variables, set(&["${V}"]));
    }

    #[test]
    fn test_no_markers_yields_empty() {
        let content = "Just Some Text\n  Indented\n# comment\n";
        assert!(extract_declarations(content).is_empty());
    }

    #[test]
    fn test_irregular_marker_not_recognized() {
        let content = "***Keywords***\nNot A Keyword\n*** Keywords***\nAlso Not\n";
        assert!(extract_declarations(content).is_empty());
    }

    #[test]
    fn test_duplicate_declarations_deduplicated() {
        let content = "*** Keywords ***\nSame\nSame\n*** Variables ***\n${X}  1\n${X}  2\n";
        let decls = extract_declarations(content);
        assert_eq!(decls.symbol_count(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "*** Keywords ***\r\nWindows Keyword\r\n    Log    x\r\n";
        let decls = extract_declarations(content);
        assert_eq!(decls.keywords, set(&["Windows Keyword"]));
    }

    #[test]
    fn test_corpus_omits_empty_files() {
        let corpus = Corpus::from_sources([
            ("a.robot", "*** Keywords ***\nKw\n"),
            ("b.robot", "*** Test Cases ***\nT\n    Kw\n"),
        ]);
        assert_eq!(corpus.len(), 1);
        assert!(corpus.get(Path::new("a.robot")).is_some());
        assert!(corpus.get(Path::new("b.robot")).is_none());
        assert_eq!(corpus.keyword_count(), 1);
        assert_eq!(corpus.variable_count(), 0);
    }

    #[test]
    fn test_extract_file_missing_is_io_error() {
        let path = std::env::temp_dir().join("deadkw_definitely_missing.robot");
        let err = extract_file(&path).unwrap_err();
        assert!(matches!(err, crate::error::DeadkwError::Io { .. }));
        assert_eq!(err.path(), Some(&path));
    }
}
