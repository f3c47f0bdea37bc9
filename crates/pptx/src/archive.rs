//! Read access to the ZIP container behind a PPTX package.

use slidemark_core::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

/// An open PPTX package.
///
/// Owns the underlying reader until [`Archive::close`] is called or the
/// archive is dropped. Entry paths are matched exactly: case-sensitive, with
/// forward-slash separators and no leading slash.
pub struct Archive<R: Read + Seek = BufReader<File>> {
    name: String,
    zip: Option<ZipArchive<R>>,
}

impl<R: Read + Seek> std::fmt::Debug for Archive<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .finish()
    }
}

impl Archive<BufReader<File>> {
    /// Open a package from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path).map_err(|e| Error::OpenFailed {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        Self::from_reader(BufReader::new(file), display)
    }
}

impl<R: Read + Seek> Archive<R> {
    /// Open a package from any seekable reader. `name` is used in errors.
    pub fn from_reader(reader: R, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let zip = ZipArchive::new(reader).map_err(|e| Error::OpenFailed {
            path: name.clone(),
            reason: e.to_string(),
        })?;
        log::debug!("Opened {} ({} entries)", name, zip.len());
        Ok(Self {
            name,
            zip: Some(zip),
        })
    }

    /// Name the archive was opened under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the archive is still open.
    pub fn is_open(&self) -> bool {
        self.zip.is_some()
    }

    /// All entry paths, in central directory order.
    pub fn entry_names(&self) -> Result<Vec<String>> {
        let zip = self.zip.as_ref().ok_or(Error::ArchiveClosed)?;
        Ok(zip.file_names().map(str::to_string).collect())
    }

    /// Whether an entry exists at exactly `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.zip
            .as_ref()
            .map_or(false, |zip| zip.file_names().any(|name| name == path))
    }

    /// Read the full contents of the entry at `path`.
    pub fn read_entry(&mut self, path: &str) -> Result<Vec<u8>> {
        let zip = self.zip.as_mut().ok_or(Error::ArchiveClosed)?;

        let mut file = match zip.by_name(path) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => {
                return Err(Error::PartMissing {
                    path: path.to_string(),
                })
            }
            Err(e) => {
                return Err(Error::EntryUnreadable {
                    path: path.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content)
            .map_err(|e| Error::EntryUnreadable {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        Ok(content)
    }

    /// Release the underlying reader. Calling this more than once is a no-op.
    pub fn close(&mut self) {
        if self.zip.take().is_some() {
            log::debug!("Closed {}", self.name);
        }
    }
}
