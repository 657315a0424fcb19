//! Filesystem commands as steps over the directory state.
//!
//! Every factory returns a [`Step`] whose state is the current directory
//! string. Only [`cd`] changes that state; every other command hands it back
//! untouched. Building a step performs no I/O, the filesystem is touched when
//! the step runs.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{MshError, MshResult};
use crate::local_fs::{self, LocalEntry};
use crate::path::resolve;
use crate::step::{self, Step};

/// Directory names `ls` never shows.
const CACHE_DIRS: &[&str] = &["__pycache__"];
/// File suffixes `ls` never shows.
const CACHE_SUFFIXES: &[&str] = &[".pyc", ".pyo"];

/// Which entries `ls` keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    #[default]
    Both,
}

impl EntryKind {
    const fn accepts(self, entry: &LocalEntry) -> bool {
        match self {
            Self::File => !entry.is_dir,
            Self::Dir => entry.is_dir,
            Self::Both => true,
        }
    }
}

impl FromStr for EntryKind {
    type Err = MshError;

    fn from_str(s: &str) -> MshResult<Self> {
        match s {
            "file" => Ok(Self::File),
            "dir" => Ok(Self::Dir),
            "both" => Ok(Self::Both),
            other => Err(MshError::InvalidArgument(format!(
                "ls: kind must be one of file, dir, both (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Dir => "dir",
            Self::Both => "both",
        })
    }
}

fn is_cache_artifact(entry: &LocalEntry) -> bool {
    if entry.is_dir {
        CACHE_DIRS.contains(&entry.name.as_str())
    } else {
        CACHE_SUFFIXES.iter().any(|suffix| entry.name.ends_with(suffix))
    }
}

/// List `dir`, keeping entries of `kind`, and hidden entries only when
/// `include_hidden` is set. Compiled-cache artifacts are always left out.
pub fn ls(
    dir: impl Into<String>,
    kind: EntryKind,
    include_hidden: bool,
) -> impl Step<State = String, Output = Vec<String>> {
    let dir = dir.into();
    step::from_fn(move |state: String| {
        let path = resolve(&state, &dir);
        tracing::debug!(path = %path, %kind, include_hidden, "ls");
        let names = local_fs::local_readdir(&path)?
            .into_iter()
            .filter(|entry| kind.accepts(entry))
            .filter(|entry| include_hidden || !entry.is_hidden())
            .filter(|entry| !is_cache_artifact(entry))
            .map(|entry| entry.name)
            .collect();
        Ok((names, state))
    })
}

/// Read the whole of `filename` as text.
pub fn cat(filename: impl Into<String>) -> impl Step<State = String, Output = String> {
    let filename = filename.into();
    step::from_fn(move |state: String| {
        let path = resolve(&state, &filename);
        tracing::debug!(path = %path, "cat");
        let text = local_fs::local_read_to_string(&path)?;
        Ok((text, state))
    })
}

/// Keep the lines of `text` in which `pattern` matches anywhere.
///
/// The pattern is compiled when the step runs, so a malformed pattern fails
/// the chain at that point.
pub fn grep(
    pattern: impl Into<String>,
    text: impl Into<String>,
) -> impl Step<State = String, Output = Vec<String>> {
    let pattern = pattern.into();
    let text = text.into();
    step::from_fn(move |state: String| {
        let lines = filter_lines(&pattern, &text)?;
        Ok((lines, state))
    })
}

fn filter_lines(pattern: &str, text: &str) -> MshResult<Vec<String>> {
    let re = Regex::new(pattern)?;
    Ok(text
        .split('\n')
        .filter(|line| re.is_match(line))
        .map(str::to_string)
        .collect())
}

/// Make `path` the new directory state.
///
/// The target is not checked here; a missing directory surfaces on the next
/// command that touches the filesystem.
pub fn cd(path: impl Into<String>) -> impl Step<State = String, Output = ()> {
    let path = path.into();
    step::from_fn(move |state: String| {
        let next = resolve(&state, &path);
        tracing::debug!(from = %state, to = %next, "cd");
        Ok(((), next))
    })
}

/// Yield the directory state.
pub fn pwd() -> impl Step<State = String, Output = String> {
    step::get()
}

/// Create `filename` if missing; an existing file is left as it is.
pub fn touch(filename: impl Into<String>) -> impl Step<State = String, Output = ()> {
    let filename = filename.into();
    step::from_fn(move |state: String| {
        let path = resolve(&state, &filename);
        tracing::debug!(path = %path, "touch");
        local_fs::local_touch(&path)?;
        Ok(((), state))
    })
}

/// Delete the file `filename`.
pub fn rm(filename: impl Into<String>) -> impl Step<State = String, Output = ()> {
    let filename = filename.into();
    step::from_fn(move |state: String| {
        let path = resolve(&state, &filename);
        tracing::debug!(path = %path, "rm");
        local_fs::local_remove_file(&path)?;
        Ok(((), state))
    })
}
