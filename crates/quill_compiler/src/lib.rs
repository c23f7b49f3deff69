//! quill_compiler: Compile sessions over many source files.
//!
//! Reads compiler options and `quill.json` project files, discovers source
//! files, and parses them in parallel.

pub mod discover;
pub mod options;
pub mod session;

pub use discover::{discover_source_files, is_source_file, resolve_listed_files};
pub use options::{parse_project_config, parse_project_file, CompilerOptions, ProjectConfig, PROJECT_FILE_NAME};
pub use session::{project_root_files, CompileSession};

use quill_core::error::FatalError;
use thiserror::Error;

/// Errors that stop a session before or during parsing.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid project file '{path}': {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("fatal error while parsing '{file}': {source}")]
    Fatal {
        file: String,
        #[source]
        source: FatalError,
    },
}
