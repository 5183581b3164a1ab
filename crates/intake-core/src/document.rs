use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a document's bytes come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// Read from disk when the slot is encoded.
    Path(PathBuf),
    /// Already in memory.
    Bytes(Arc<[u8]>),
    /// `data:<type>;base64,<payload>` as produced by a platform file reader.
    DataUri(String),
}

/// One user-selected file.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub name: String,
    pub size_bytes: u64,
    /// Type as reported by the selecting surface. Never sniffed from content.
    pub mime_type: String,
    pub source: FileSource,
}

impl DocumentFile {
    #[must_use]
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size_bytes: bytes.len() as u64,
            mime_type: mime_type.into(),
            source: FileSource::Bytes(bytes),
        }
    }

    /// Wrap a data URI whose declared size the surface already knows.
    #[must_use]
    pub fn from_data_uri(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        data_uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            source: FileSource::DataUri(data_uri.into()),
        }
    }

    /// Describe a file on disk. Only metadata is read here; content is read at
    /// encode time.
    ///
    /// # Errors
    ///
    /// Returns an error if the file metadata cannot be read or the path is not
    /// a regular file.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let meta = tokio::fs::metadata(path).await?;
        if !meta.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            mime_type: guess_mime_type(&name).to_owned(),
            name,
            size_bytes: meta.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }
}

/// Map a file name's extension to the type a browser would report for it.
#[must_use]
pub fn guess_mime_type(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
        "image/jpeg"
    } else if ext.eq_ignore_ascii_case("png") {
        "image/png"
    } else if ext.eq_ignore_ascii_case("gif") {
        "image/gif"
    } else if ext.eq_ignore_ascii_case("webp") {
        "image/webp"
    } else if ext.eq_ignore_ascii_case("pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}
