use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// File extension every source file must carry.
pub const SOURCE_EXTENSION: &str = "skim";

/// Represents all errors that can occur while loading a source file.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The path does not end in `.skim`.
    #[error("'{}' is not a source file, expected the '.{SOURCE_EXTENSION}' extension.", path.display())]
    InvalidExtension {
        /// The rejected path.
        path: PathBuf,
    },
    /// The file could not be read.
    #[error("Cannot read '{}': {source}.", path.display())]
    Unreadable {
        /// The path that failed.
        path:   PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Reads a source file and splits it into lines.
///
/// Both `\n` and `\r\n` line endings are accepted; the terminators are not
/// part of the returned lines.
///
/// # Parameters
/// - `path`: Path of the file to load.
///
/// # Returns
/// The file's lines in order.
///
/// # Errors
/// - `SourceError::InvalidExtension` if the path does not end in `.skim`.
/// - `SourceError::Unreadable` if the file cannot be read as UTF-8 text.
pub fn load_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let has_extension = path.extension()
                            .and_then(|extension| extension.to_str())
                            .is_some_and(|extension| extension.eq_ignore_ascii_case(SOURCE_EXTENSION));
    if !has_extension {
        return Err(SourceError::InvalidExtension { path: path.to_path_buf() });
    }

    let content = fs::read_to_string(path).map_err(|source| SourceError::Unreadable { path: path.to_path_buf(),
                                                                                       source })?;
    Ok(content.lines().map(str::to_string).collect())
}
