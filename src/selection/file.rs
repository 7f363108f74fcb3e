//! Selected files and where their bytes come from.

use crate::error::{Error, Result};

use std::path::{Path, PathBuf};

/// Where the content of a [`SelectedFile`] lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// A file on the local disk, read when the upload starts.
    Path(PathBuf),
    /// Bytes already held in memory.
    Memory(Vec<u8>),
}

/// A single file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name sent with the multipart part.
    pub name: String,
    /// Size in bytes at selection time.
    pub size: u64,
    /// Content location.
    pub source: FileSource,
}

impl SelectedFile {
    /// Creates a [`SelectedFile`] from a path on disk.
    ///
    /// The name is the final path component and the size comes from the
    /// file's metadata.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(Error::Validation(format!(
                "\"{}\" is not a file",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::Validation(format!("\"{}\" has no file name", path.display()))
            })?;

        Ok(Self {
            name,
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// Creates a [`SelectedFile`] backed by in-memory content.
    pub fn from_bytes(name: &str, content: Vec<u8>) -> Self {
        Self {
            name: String::from(name),
            size: content.len() as u64,
            source: FileSource::Memory(content),
        }
    }

    /// Reads the full content of the file.
    pub async fn read(&self) -> Result<Vec<u8>> {
        match &self.source {
            FileSource::Path(path) => Ok(tokio::fs::read(path).await?),
            FileSource::Memory(content) => Ok(content.clone()),
        }
    }

    /// MIME type announced for the multipart part, guessed from the extension.
    pub fn content_type(&self) -> &'static str {
        let ext = Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => "application/pdf",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            _ => "application/octet-stream",
        }
    }
}

/// The ordered set of files currently selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
}

impl FileSelection {
    /// Creates a selection from already built files.
    pub fn new(files: Vec<SelectedFile>) -> Self {
        Self { files }
    }

    /// Creates a selection from paths on disk, keeping their order.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let files = paths
            .iter()
            .map(|p| SelectedFile::from_path(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { files })
    }

    /// Selected files, in selection order.
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of the selected file sizes.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

impl FromIterator<SelectedFile> for FileSelection {
    fn from_iter<I: IntoIterator<Item = SelectedFile>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}
