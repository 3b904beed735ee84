//! Lexical conventions of the section-based test-definition format.
//!
//! The format is line oriented:
//! - sections start with a header such as `*** Keywords ***`
//! - lines indented with two or more spaces are body (step) lines
//! - lines starting with `#` are comments
//! - fields within a line are separated by runs of two or more spaces

use std::sync::OnceLock;

use regex::Regex;

/// Header that opens the keyword section.
pub const KEYWORDS_MARKER: &str = "*** Keywords ***";

/// Header that opens the variable section.
pub const VARIABLES_MARKER: &str = "*** Variables ***";

/// Prefix shared by every section header.
pub const SECTION_PREFIX: &str = "***";

/// Leading whitespace that marks a body/continuation line.
pub const BODY_INDENT: &str = "  ";

/// Prefix of a comment line.
pub const COMMENT_PREFIX: &str = "#";

/// Effect a line has on the current capture section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionChange {
    EnterKeywords,
    EnterVariables,
    /// Any other `***` header: stop capturing.
    Leave,
    /// Not a header line.
    None,
}

/// Section currently being captured by the declaration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Other,
    Keywords,
    Variables,
}

impl Section {
    /// Classify a raw line as a section transition.
    ///
    /// Recognized markers are compared exactly after trimming. The leave
    /// check looks at the raw, untrimmed line.
    pub fn classify(raw_line: &str) -> SectionChange {
        match raw_line.trim() {
            KEYWORDS_MARKER => SectionChange::EnterKeywords,
            VARIABLES_MARKER => SectionChange::EnterVariables,
            _ if raw_line.starts_with(SECTION_PREFIX) => SectionChange::Leave,
            _ => SectionChange::None,
        }
    }

    /// Section that is active after `change` has been applied.
    pub fn apply(self, change: SectionChange) -> Self {
        match change {
            SectionChange::EnterKeywords => Section::Keywords,
            SectionChange::EnterVariables => Section::Variables,
            SectionChange::Leave => Section::Other,
            SectionChange::None => self,
        }
    }
}

/// Returns true if the raw line is indented as a body line.
#[inline]
pub fn is_body_line(raw_line: &str) -> bool {
    raw_line.starts_with(BODY_INDENT)
}

/// Returns true if the raw line is an unindented comment.
#[inline]
pub fn is_comment_line(raw_line: &str) -> bool {
    raw_line.starts_with(COMMENT_PREFIX)
}

fn field_separator() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: hardcoded pattern
    REGEX.get_or_init(|| Regex::new(r" {2,}").expect("Hardcoded regex pattern is valid"))
}

/// Splits text into trimmed, non-empty fields on runs of two or more spaces.
pub fn split_fields(text: &str) -> impl Iterator<Item = &str> {
    field_separator()
        .split(text.trim())
        .map(str::trim)
        .filter(|f| !f.is_empty())
}

/// First field of `text`, or `""` when the text is blank.
pub fn first_field(text: &str) -> &str {
    split_fields(text).next().unwrap_or("")
}
