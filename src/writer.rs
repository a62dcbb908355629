use crate::{
    error::{Error, Result},
    file::{FileContent, SourceFile},
    scanner::TreeEntry,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

/// Heading that opens the structure section.
pub(crate) const STRUCTURE_HEADING: &str = "=== PROJECT STRUCTURE ===";

/// Fixed-width line framing each content block's path label.
pub(crate) const DELIMITER: &str = "==============================";

const INDENT: &str = "    ";

/// Streams the export into a single output handle.
///
/// The handle is opened once in [`Writer::create`] and released when the
/// writer is finished or dropped.
#[derive(Debug)]
pub(crate) struct Writer<W: Write = BufWriter<File>> {
    target: PathBuf,
    sink: W,
    bytes_written: u64,
}

impl Writer {
    /// Creates or truncates the output file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub(crate) fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        debug!("Opened output file {}", path.display());
        Ok(Self::new(path, BufWriter::new(file)))
    }
}

impl<W: Write> Writer<W> {
    pub(crate) fn new(target: impl Into<PathBuf>, sink: W) -> Self {
        Self {
            target: target.into(),
            sink,
            bytes_written: 0,
        }
    }

    /// Writes the heading, the indented listing and the section separator.
    pub(crate) fn write_structure(&mut self, tree: &[TreeEntry]) -> Result<()> {
        self.emit(STRUCTURE_HEADING)?;
        self.emit("\n")?;

        for entry in tree {
            let line = format!(
                "{}{}{}\n",
                INDENT.repeat(entry.depth),
                entry.name,
                if entry.is_dir { "/" } else { "" }
            );
            self.emit(&line)?;
        }

        self.emit("\n\n")
    }

    /// Writes one framed content block, or the inline error for unreadable files.
    pub(crate) fn write_block(&mut self, source: &SourceFile) -> Result<()> {
        let header = format!("{DELIMITER}\nFILE PATH: {}\n{DELIMITER}\n", source.label);
        self.emit(&header)?;

        match &source.content {
            FileContent::Text(text) => self.emit(text)?,
            FileContent::Unreadable(e) => self.emit(&format!("Error reading file: {e}"))?,
        }

        self.emit("\n\n")
    }

    /// Flushes buffered output and returns the total bytes written.
    pub(crate) fn finish(mut self) -> Result<u64> {
        self.sink.flush().map_err(|e| Error::io(&self.target, e))?;
        Ok(self.bytes_written)
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.sink
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        self.sink
            .write_all(text.as_bytes())
            .map_err(|e| Error::io(&self.target, e))?;
        self.bytes_written += text.len() as u64;
        Ok(())
    }
}
