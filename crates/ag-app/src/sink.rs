use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ag_core::error::CoreError;
use ag_core::traits::Sink;

/// Écrit le texte tel quel sur un flux (stdout en production).
pub struct StreamSink<W: Write> {
    out: W,
}

impl<W: Write> StreamSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn write_text(&mut self, text: &str) -> Result<(), CoreError> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|source| CoreError::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })
    }
}

/// Writes the text to a file as UTF-8, creating parent directories.
#[derive(Clone, Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Sink targeting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_text(&mut self, text: &str) -> Result<(), CoreError> {
        write_text_file(&self.path, text)
    }
}

/// Create missing parent directories of `path` and write `text` to it.
///
/// # Errors
/// Returns [`CoreError::Write`] if a directory or the file cannot be created.
pub fn write_text_file(path: &Path, text: &str) -> Result<(), CoreError> {
    let wrap = |source| CoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, text).map_err(wrap)?;
    log::info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
