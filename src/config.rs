//! Runtime configuration
//!
//! The library file path is resolved from (highest to lowest):
//! 1. First CLI argument
//! 2. `BOOKSHELF_LIBRARY` environment variable
//! 3. `library.json` in the working directory

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the library file
pub const LIBRARY_ENV: &str = "BOOKSHELF_LIBRARY";

/// Default library file name
pub const DEFAULT_LIBRARY_FILE: &str = "library.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file holding the library
    pub library_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(DEFAULT_LIBRARY_FILE),
        }
    }
}

impl Config {
    /// Load configuration from the process arguments and environment
    pub fn from_env() -> Self {
        Self::resolve(std::env::args_os().nth(1), std::env::var_os(LIBRARY_ENV))
    }

    /// Resolve configuration from explicit sources (empty values are ignored)
    pub fn resolve(arg: Option<OsString>, env: Option<OsString>) -> Self {
        let non_empty = |v: &OsString| !v.is_empty();
        match arg.filter(non_empty).or_else(|| env.filter(non_empty)) {
            Some(path) => Self {
                library_path: PathBuf::from(path),
            },
            None => Self::default(),
        }
    }
}
