//! Command results.

use std::fmt;

/// The value a command produces, tagged by what it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Directory entry names from `ls`
    EntryList(Vec<String>),
    /// File contents from `cat`
    Text(String),
    /// Matching lines from `grep`
    LineList(Vec<String>),
    /// A directory path from `pwd`
    Path(String),
    /// Commands with nothing to report (`cd`, `touch`, `rm`)
    Empty,
}

impl Value {
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

/// Renders the value the way the REPL prints it: one list item per line,
/// text verbatim, nothing for [`Value::Empty`]. No trailing newline is added.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntryList(items) | Self::LineList(items) => f.write_str(&items.join("\n")),
            Self::Text(text) | Self::Path(text) => f.write_str(text),
            Self::Empty => Ok(()),
        }
    }
}
