//! Cross-file usage scanning.
//!
//! Every body line of every scanned file is split into fields and each
//! field is checked against the pool of declared symbols. A symbol counts
//! as used the moment any body line anywhere names it exactly, so a match
//! clears it from the residual set of every file that declared it.
//!
//! Matching is exact per field, never by substring: `Log` is not marked
//! used by a reference to `Log Message`.
//!
//! Performance characteristics:
//! - One hash lookup per field per symbol kind
//! - A symbol is cleared from the residual sets only on its first match

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::declarations::{Corpus, FileDeclarations};
use crate::error::{DeadkwResult, IoResultExt};
use crate::report::{UnusedItems, UnusedReport};
use crate::syntax::{is_body_line, split_fields, COMMENT_PREFIX};

/// Options controlling what counts as a usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Ignore indented lines whose text starts with `#`.
    ///
    /// Off by default: an indented comment naming a symbol marks it used.
    pub skip_commented_usages: bool,
}

/// Union of every keyword and variable declared anywhere in the corpus.
///
/// Built once and never modified during the scan.
#[derive(Debug, Clone, Default)]
pub struct SymbolPool {
    keywords: HashSet<String>,
    variables: HashSet<String>,
}

impl SymbolPool {
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let mut pool = Self::default();
        for (_, decls) in corpus {
            pool.keywords.extend(decls.keywords.iter().cloned());
            pool.variables.extend(decls.variables.iter().cloned());
        }
        pool
    }

    pub fn contains_keyword(&self, name: &str) -> bool {
        self.keywords.contains(name)
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.variables.contains(name)
    }

    /// Distinct keyword names.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Distinct variable names.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

/// Accumulated state of a usage scan.
///
/// Owns the symbol pool and, per declaring file, the symbols not yet seen
/// in any body line. Feed it file contents with [`scan_content`] and turn it
/// into a report with [`finish`].
///
/// [`scan_content`]: UsageAccumulator::scan_content
/// [`finish`]: UsageAccumulator::finish
#[derive(Debug, Clone)]
pub struct UsageAccumulator {
    pool: SymbolPool,
    residual: BTreeMap<PathBuf, FileDeclarations>,
    used_keywords: HashSet<String>,
    used_variables: HashSet<String>,
    options: ScanOptions,
}

impl UsageAccumulator {
    pub fn new(corpus: &Corpus, options: ScanOptions) -> Self {
        let residual = corpus
            .iter()
            .map(|(path, decls)| (path.clone(), decls.clone()))
            .collect();

        Self {
            pool: SymbolPool::from_corpus(corpus),
            residual,
            used_keywords: HashSet::new(),
            used_variables: HashSet::new(),
            options,
        }
    }

    pub fn pool(&self) -> &SymbolPool {
        &self.pool
    }

    /// Scan one file's content for body-line usages.
    pub fn scan_content(mut self, content: &str) -> Self {
        for raw in content.lines() {
            if !is_body_line(raw) {
                continue;
            }
            let line = raw.trim();
            if self.options.skip_commented_usages && line.starts_with(COMMENT_PREFIX) {
                continue;
            }
            for segment in split_fields(line) {
                self.mark_segment(segment);
            }
        }
        self
    }

    /// Record a single field as a usage if it names a declared symbol.
    pub fn mark_segment(&mut self, segment: &str) {
        let segment = segment.trim();

        if self.pool.contains_keyword(segment) && self.used_keywords.insert(segment.to_string()) {
            for decls in self.residual.values_mut() {
                decls.keywords.remove(segment);
            }
        }

        if self.pool.contains_variable(segment) && self.used_variables.insert(segment.to_string())
        {
            for decls in self.residual.values_mut() {
                decls.variables.remove(segment);
            }
        }
    }

    /// Distinct symbols found used so far.
    pub fn used_count(&self) -> usize {
        self.used_keywords.len() + self.used_variables.len()
    }

    /// Residual symbols for files that still have any.
    pub fn finish(self) -> UnusedReport {
        debug!(
            used_keywords = self.used_keywords.len(),
            used_variables = self.used_variables.len(),
            "usage scan finished"
        );

        self.residual
            .into_iter()
            .filter(|(_, decls)| !decls.is_empty())
            .map(|(path, decls)| {
                let items = UnusedItems {
                    keywords: decls.keywords.into_iter().collect(),
                    variables: decls.variables.into_iter().collect(),
                };
                (path, items)
            })
            .collect()
    }
}

/// Scan every listed file, not only the declaring ones, for usages.
///
/// Fails on the first unreadable file.
pub fn scan_usage(
    corpus: &Corpus,
    files: &[PathBuf],
    options: ScanOptions,
) -> DeadkwResult<UnusedReport> {
    let mut acc = UsageAccumulator::new(corpus, options);
    for path in files {
        let content = fs::read_to_string(path).with_path(path)?;
        acc = acc.scan_content(&content);
    }
    Ok(acc.finish())
}

/// Scan in-memory `(path, content)` pairs for usages.
pub fn scan_usage_sources<P, S, I>(
    corpus: &Corpus,
    sources: I,
    options: ScanOptions,
) -> UnusedReport
where
    P: AsRef<Path>,
    S: AsRef<str>,
    I: IntoIterator<Item = (P, S)>,
{
    sources
        .into_iter()
        .fold(UsageAccumulator::new(corpus, options), |acc, (path, content)| {
            debug!(path = %path.as_ref().display(), "scanning source for usages");
            acc.scan_content(content.as_ref())
        })
        .finish()
}
