//! Files picked for upload.

use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};

use crate::validator::content_type_for_extension;

const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// What the file-selection event reports before any byte is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

/// A file whose content can be read once validation passed.
#[async_trait]
pub trait FileSource: Send + Sync {
    fn meta(&self) -> &FileMeta;

    /// Read the whole content. A failed read must not yield partial data.
    async fn read_all(&self) -> io::Result<Bytes>;
}

/// File content already held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    meta: FileMeta,
    data: Bytes,
}

impl InMemoryFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            meta: FileMeta {
                file_name: file_name.into(),
                mime_type: mime_type.into(),
                size: data.len() as u64,
            },
            data,
        }
    }
}

#[async_trait]
impl FileSource for InMemoryFile {
    fn meta(&self) -> &FileMeta {
        &self.meta
    }

    async fn read_all(&self) -> io::Result<Bytes> {
        Ok(self.data.clone())
    }
}

/// A file on local disk. The content type comes from the extension.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    meta: FileMeta,
}

impl LocalFile {
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let mime_type = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(content_type_for_extension)
            .unwrap_or(UNKNOWN_CONTENT_TYPE)
            .to_string();

        Ok(Self {
            meta: FileMeta {
                file_name,
                mime_type,
                size: metadata.len(),
            },
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FileSource for LocalFile {
    fn meta(&self) -> &FileMeta {
        &self.meta
    }

    async fn read_all(&self) -> io::Result<Bytes> {
        let data = tokio::fs::read(&self.path).await?;
        Ok(Bytes::from(data))
    }
}
