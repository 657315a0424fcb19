//! msh Configuration System
//!
//! YAML configuration for the ambient parts of the shell: the prompt, the
//! line-editor history and logging. The shell's directory state is never
//! configured here; it always starts from the process working directory.
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `~/.config/msh/msh.yaml` (user)
//! 3. `./msh.yaml` (project-local)
//! 4. `MSH_CONFIG=/path/to/config.yaml` (explicit, replaces 2 and 3)
//! 5. Environment variables (highest priority)
//!
//! # Example Configuration
//!
//! ```yaml
//! shell:
//!   prompt: "{cwd} $ "
//!   history:
//!     file: "~/.msh_history"
//!     max_entries: 500
//!
//! logging:
//!   level: debug
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Load configuration from default locations.
///
/// Searches for config files in order and merges them.
/// Environment variables override file values.
pub fn load() -> Result<MshConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<MshConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}
