//! Scoped preview handles for file attachments.
//!
//! A preview provider hands out handles (object URLs, in a browser) that must
//! be released exactly once. [`PreviewSlot`] holds at most one handle and
//! releases it when it is replaced, cleared, or dropped.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A live preview resource
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PreviewHandle {
    id: u64,
    url: String,
}

impl PreviewHandle {
    /// Wrap a provider-issued id and URL
    #[must_use]
    pub const fn new(id: u64, url: String) -> Self {
        Self { id, url }
    }

    /// Provider-issued id
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// URL the view can render
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Source of preview handles
pub trait PreviewProvider: Send + Sync {
    /// Create a handle previewing `file`
    fn acquire(&self, file: &str) -> PreviewHandle;

    /// Release a handle previously returned by `acquire`
    fn release(&self, handle: &PreviewHandle);
}

/// In-memory provider issuing `blob:preview/<n>` URLs
#[derive(Debug, Default)]
pub struct ObjectUrls {
    next: AtomicU64,
    live: Mutex<HashSet<u64>>,
}

impl ObjectUrls {
    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles acquired and not yet released
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl PreviewProvider for ObjectUrls {
    fn acquire(&self, file: &str) -> PreviewHandle {
        let id = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id);
        tracing::trace!(id, file, "Preview acquired");
        PreviewHandle::new(id, format!("blob:preview/{id}"))
    }

    fn release(&self, handle: &PreviewHandle) {
        let released = self
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&handle.id);
        if released {
            tracing::trace!(id = handle.id, "Preview released");
        } else {
            tracing::warn!(id = handle.id, "Released a preview that was not live");
        }
    }
}

/// Holder of at most one preview handle
pub struct PreviewSlot {
    provider: Arc<dyn PreviewProvider>,
    current: Option<PreviewHandle>,
}

impl PreviewSlot {
    /// An empty slot backed by `provider`
    #[must_use]
    pub fn new(provider: Arc<dyn PreviewProvider>) -> Self {
        Self {
            provider,
            current: None,
        }
    }

    /// Preview `file`, releasing whatever was previewed before
    pub fn replace(&mut self, file: &str) -> &PreviewHandle {
        self.clear();
        self.current.insert(self.provider.acquire(file))
    }

    /// Release the current handle, if any
    pub fn clear(&mut self) {
        if let Some(handle) = self.current.take() {
            self.provider.release(&handle);
        }
    }

    /// The current handle
    #[must_use]
    pub const fn current(&self) -> Option<&PreviewHandle> {
        self.current.as_ref()
    }
}

impl Drop for PreviewSlot {
    fn drop(&mut self) {
        self.clear();
    }
}
