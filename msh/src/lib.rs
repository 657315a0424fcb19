//! msh - a minimal interactive shell over the local filesystem
//!
//! This crate provides:
//! - [`step`]: a composable state-threading abstraction (`unit`, `bind`, `run`)
//! - [`path`]: syntactic resolution of path arguments against the current directory
//! - [`ops`]: the filesystem commands (`ls`, `cat`, `grep`, `cd`, `pwd`, `touch`, `rm`)
//!   expressed as steps over the directory state
//! - [`driver`]: line tokenization and dispatch used by the `msh` binary

pub mod driver;
pub mod error;
pub mod help;
pub mod local_fs;
pub mod ops;
pub mod path;
pub mod step;
pub mod value;

pub use driver::{Outcome, Session};
pub use error::{MshError, MshResult};
pub use step::{unit, Step};
pub use value::Value;
