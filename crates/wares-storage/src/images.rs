//! Image id to file path index.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

/// Storage abstraction for the image index.
///
/// A mapping is inserted only after its file has been fully written, so a
/// known id always refers to a completed upload. Entries are immutable.
#[async_trait]
pub trait ImageIndex: Send + Sync {
    async fn insert(&self, image_id: Uuid, path: PathBuf);

    async fn path_of(&self, image_id: Uuid) -> Option<PathBuf>;
}

/// In-memory image index.
#[derive(Default)]
pub struct MemoryImageIndex {
    inner: RwLock<HashMap<Uuid, PathBuf>>,
}

impl MemoryImageIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageIndex for MemoryImageIndex {
    async fn insert(&self, image_id: Uuid, path: PathBuf) {
        let mut guard = self.inner.write().expect("image index lock poisoned");
        guard.insert(image_id, path);
    }

    async fn path_of(&self, image_id: Uuid) -> Option<PathBuf> {
        let guard = self.inner.read().expect("image index lock poisoned");
        guard.get(&image_id).cloned()
    }
}
