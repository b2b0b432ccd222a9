//! Stub documents and writing them out.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::STUB_EXTENSION;
use crate::error::{Error, Result};

/// The generated Lua source for one documented type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubDocument {
    /// Module identifier, also the file stem.
    pub name: String,
    /// Hidden stubs are built but never written.
    pub hidden: bool,
    pub header: String,
    /// One rendered function per entry, each starting with a blank line.
    pub entries: Vec<String>,
}

impl StubDocument {
    pub fn file_name(&self) -> String {
        format!("{}.{STUB_EXTENSION}", self.name)
    }

    /// The full file contents.
    pub fn text(&self) -> String {
        let mut out = self.header.clone();
        for entry in &self.entries {
            out.push_str(entry);
        }
        out
    }
}

/// Write every non-hidden stub into `dir`, creating it if needed.
///
/// Returns the number of files written.
pub fn write_stubs(stubs: &[StubDocument], dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir).map_err(|source| Error::CreateOutput {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = 0;
    for stub in stubs.iter().filter(|s| !s.hidden) {
        let path = dir.join(stub.file_name());
        let write = |path: &Path| -> std::io::Result<()> {
            let mut out = BufWriter::new(File::create(path)?);
            out.write_all(stub.text().as_bytes())?;
            out.flush()
        };
        write(&path).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "wrote stub");
        written += 1;
    }
    Ok(written)
}
