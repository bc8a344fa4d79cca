//! Display-handle registry.
//!
//! Local stand-in for object URLs: a handle names a decoded blob held in memory
//! until it is released. Handles are for previews only and never leave the process.

use bytes::Bytes;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

const HANDLE_PREFIX: &str = "blob:seller-portal/";

/// Opaque reference to a live blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayHandle(String);

impl DisplayHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded content behind a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime_type: String,
    pub data: Bytes,
}

/// Thread-safe handle table; clones share the same table.
#[derive(Clone, Default)]
pub struct HandleRegistry {
    blobs: Arc<RwLock<HashMap<DisplayHandle, Blob>>>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, mime_type: impl Into<String>, data: Bytes) -> DisplayHandle {
        let handle = DisplayHandle(format!("{}{}", HANDLE_PREFIX, Uuid::new_v4()));
        let blob = Blob {
            mime_type: mime_type.into(),
            data,
        };
        self.blobs.write().insert(handle.clone(), blob);
        handle
    }

    /// Returns whether the handle was live. Releasing twice is a no-op.
    pub fn release(&self, handle: &DisplayHandle) -> bool {
        self.blobs.write().remove(handle).is_some()
    }

    pub fn resolve(&self, handle: &DisplayHandle) -> Option<Blob> {
        self.blobs.read().get(handle).cloned()
    }

    pub fn is_live(&self, handle: &DisplayHandle) -> bool {
        self.blobs.read().contains_key(handle)
    }

    pub fn live_count(&self) -> usize {
        self.blobs.read().len()
    }
}

impl fmt::Debug for HandleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}
