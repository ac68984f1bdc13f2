//! Disk-backed file persistence.
//!
//! Files are written under a single base directory, named by their generated
//! image id plus the original extension. The image index mapping is inserted
//! only after the bytes are fully written and synced, so a partially written
//! file is never reported as existing.

use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::grants::UploadGrant;
use crate::images::ImageIndex;

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("Failed to create upload directory {path}: {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image not found: {0}")]
    NotFound(Uuid),
}

/// Writes uploaded bytes to disk and resolves image ids back to paths.
#[derive(Clone)]
pub struct FileStore {
    base_dir: PathBuf,
    index: Arc<dyn ImageIndex>,
}

impl FileStore {
    /// Create a new FileStore rooted at `base_dir`, creating the directory
    /// if it does not exist yet.
    pub async fn new(
        base_dir: impl Into<PathBuf>,
        index: Arc<dyn ImageIndex>,
    ) -> Result<Self, FileStoreError> {
        let base_dir = base_dir.into();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| FileStoreError::CreateDirFailed {
                path: base_dir.display().to_string(),
                source: e,
            })?;

        Ok(FileStore { base_dir, index })
    }

    /// Destination filename: `{image_id}.{ext}` with the extension taken from
    /// the grant's original filename, or bare `{image_id}` if it has none.
    fn destination_name(image_id: Uuid, original_name: &str) -> String {
        match Path::new(original_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", image_id, ext.to_lowercase()),
            None => image_id.to_string(),
        }
    }

    /// Write the uploaded bytes and register the image id.
    ///
    /// The id/path mapping is inserted only after `sync_all` returns, so
    /// `image_exists` cannot observe a partial write. On error the mapping is
    /// never inserted and the caller is expected to roll the grant back.
    pub async fn store(
        &self,
        grant: &UploadGrant,
        data: &[u8],
    ) -> Result<(Uuid, PathBuf), FileStoreError> {
        let image_id = Uuid::new_v4();
        let path = self
            .base_dir
            .join(Self::destination_name(image_id, &grant.file_name));

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| FileStoreError::WriteFailed {
                path: path.display().to_string(),
                source: e,
            })?;

        file.write_all(data)
            .await
            .map_err(|e| FileStoreError::WriteFailed {
                path: path.display().to_string(),
                source: e,
            })?;

        file.sync_all()
            .await
            .map_err(|e| FileStoreError::WriteFailed {
                path: path.display().to_string(),
                source: e,
            })?;

        self.index.insert(image_id, path.clone()).await;

        tracing::info!(
            image_id = %image_id,
            token = %grant.token,
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "File stored"
        );

        Ok((image_id, path))
    }

    /// True only if the id is known and the file is still present on disk.
    pub async fn image_exists(&self, image_id: Uuid) -> bool {
        match self.index.path_of(image_id).await {
            Some(path) => fs::try_exists(&path).await.unwrap_or(false),
            None => false,
        }
    }

    /// Pure index lookup; does not touch the filesystem.
    pub async fn resolve_path(&self, image_id: Uuid) -> Option<PathBuf> {
        self.index.path_of(image_id).await
    }

    /// Open a stored image as a byte stream.
    pub async fn open_stream(
        &self,
        image_id: Uuid,
    ) -> Result<
        (
            PathBuf,
            Pin<Box<dyn Stream<Item = Result<Bytes, FileStoreError>> + Send>>,
        ),
        FileStoreError,
    > {
        let path = self
            .index
            .path_of(image_id)
            .await
            .ok_or(FileStoreError::NotFound(image_id))?;

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FileStoreError::NotFound(image_id));
            }
            Err(e) => {
                return Err(FileStoreError::ReadFailed {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        let path_display = path.display().to_string();
        let stream = tokio_util::io::ReaderStream::new(file).map(move |result| {
            result.map_err(|e| FileStoreError::ReadFailed {
                path: path_display.clone(),
                source: e,
            })
        });

        Ok((path, Box::pin(stream)))
    }
}

/// Content type for a stored file, from its extension. Unrecognized
/// extensions are served as opaque binary.
pub fn content_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
