//! Asset provider seam
//!
//! The core never owns pictures. It asks an [`AssetProvider`] for a handle
//! and reads the pixel size off it. Loads are fire-and-forget: a handle may
//! come back 0×0 while the picture is still loading, and callers simply ask
//! again next frame.

use std::collections::HashMap;

/// Size information for a (possibly still loading) picture
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    /// Picture id as registered (file stem under `img/system`)
    pub id: String,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    pub fn new(id: &str, width: u32, height: u32) -> Self {
        Self {
            id: id.to_string(),
            width,
            height,
        }
    }

    /// Handle for a picture whose size isn't known yet
    pub fn pending(id: &str) -> Self {
        Self::new(id, 0, 0)
    }

    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Picture loader/cache provided by the host.
///
/// Both calls must be idempotent and must not block.
pub trait AssetProvider {
    /// Start loading a picture so it is warm by the time it is shown
    fn preload(&mut self, id: &str);

    /// Current handle for a picture, starting a load if needed.
    /// Returns 0×0 until the picture is ready.
    fn get(&mut self, id: &str) -> ImageHandle;
}

#[derive(Debug, Clone, Copy)]
struct MemoryImage {
    width: u32,
    height: u32,
    ready: bool,
}

/// In-memory asset provider.
///
/// Pictures are registered with their final size; `insert_pending` holds
/// one back as 0×0 until `mark_ready` is called, which is how a slow load
/// looks from the core's side.
#[derive(Debug, Default)]
pub struct MemoryAssets {
    images: HashMap<String, MemoryImage>,
    /// Every preload request, in order
    preloads: Vec<String>,
    /// Number of `get` calls served
    gets: usize,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a picture that is ready immediately
    pub fn insert(&mut self, id: &str, width: u32, height: u32) {
        self.images.insert(
            id.to_string(),
            MemoryImage {
                width,
                height,
                ready: true,
            },
        );
    }

    /// Register a picture that reports 0×0 until `mark_ready`
    pub fn insert_pending(&mut self, id: &str, width: u32, height: u32) {
        self.images.insert(
            id.to_string(),
            MemoryImage {
                width,
                height,
                ready: false,
            },
        );
    }

    /// Finish loading a pending picture
    pub fn mark_ready(&mut self, id: &str) {
        if let Some(image) = self.images.get_mut(id) {
            image.ready = true;
        }
    }

    pub fn preload_requests(&self) -> &[String] {
        &self.preloads
    }

    pub fn get_count(&self) -> usize {
        self.gets
    }
}

impl AssetProvider for MemoryAssets {
    fn preload(&mut self, id: &str) {
        self.preloads.push(id.to_string());
    }

    fn get(&mut self, id: &str) -> ImageHandle {
        self.gets += 1;
        match self.images.get(id) {
            Some(image) if image.ready => ImageHandle::new(id, image.width, image.height),
            _ => ImageHandle::pending(id),
        }
    }
}
