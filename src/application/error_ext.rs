//! Path context for I/O failures while reading charts and settings

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Turn an I/O failure into [`ApplicationError::OperationFailed`] naming the path.
    ///
    /// ```ignore
    /// std::fs::read_to_string(path).with_path_context("read chart", path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{} {}", action, path.display()),
            source: Box::new(source),
        })
    }
}
