//! # Error Types
//!
//! The music-theory components never fail: malformed chord text degrades to
//! verbatim pass-through. Errors only arise at the edges of the crate, where
//! configuration, key names and JSON event data come in from outside.
//!
//! ## Error Types
//! - `Config` - Invalid YAML configuration
//! - `Input` - Malformed chord or beat JSON from the detection backend
//! - `UnknownKey` - Key name the key context cannot interpret
//! - `Io` - File could not be read
//!
//! ## Usage
//! ```rust
//! use chord_engine::{ChordError, Key};
//!
//! match "H minor".parse::<Key>() {
//!     Ok(key) => println!("key: {}", key),
//!     Err(ChordError::UnknownKey(name)) => eprintln!("unknown key {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordError {
    /// Invalid configuration.
    ///
    /// # Example
    /// ```
    /// # use chord_engine::ChordError;
    /// let err = ChordError::Config("no-chord-label must not be empty".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: no-chord-label must not be empty");
    /// ```
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Malformed event input.
    ///
    /// # Example
    /// ```
    /// # use chord_engine::ChordError;
    /// let err = ChordError::Input("expected an array of beats".to_string());
    /// assert_eq!(err.to_string(), "Invalid input: expected an array of beats");
    /// ```
    #[error("Invalid input: {0}")]
    Input(String),

    /// Key name not understood.
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// File read failure.
    ///
    /// # Example
    /// ```
    /// # use chord_engine::ChordError;
    /// let err = ChordError::Io {
    ///     path: "beats.json".to_string(),
    ///     message: "No such file or directory".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Cannot read 'beats.json': No such file or directory");
    /// ```
    #[error("Cannot read '{path}': {message}")]
    Io { path: String, message: String },
}

impl ChordError {
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        ChordError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Read a UTF-8 file, reporting failures as [`ChordError::Io`].
pub fn read_source(path: &Path) -> Result<String, ChordError> {
    std::fs::read_to_string(path).map_err(|e| ChordError::io(path, e))
}
