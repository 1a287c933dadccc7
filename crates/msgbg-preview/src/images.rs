//! Picture provider backed by a directory of image files (`img/system`).
//!
//! Only the image header is read; pixel data is never decoded.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use msgbg_core::{AssetProvider, ImageHandle};

const EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub struct SystemImages {
    dir: PathBuf,
    /// Pictures whose size is known
    cache: HashMap<String, ImageHandle>,
    /// Ids already reported as unreadable
    warned: HashSet<String>,
}

impl SystemImages {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
            warned: HashSet::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn loaded(&self) -> usize {
        self.cache.len()
    }

    fn picture_path(&self, id: &str) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", id, ext)))
            .find(|p| p.is_file())
    }

    /// Read the picture header. Failures are not cached, so a picture that
    /// shows up later is picked up on the next request.
    fn load(&mut self, id: &str) -> ImageHandle {
        if let Some(handle) = self.cache.get(id) {
            return handle.clone();
        }

        let result = match self.picture_path(id) {
            Some(path) => image::image_dimensions(&path).map_err(|e| e.to_string()),
            None => Err(format!("no picture in {}", self.dir.display())),
        };

        match result {
            Ok((width, height)) => {
                tracing::debug!("Loaded picture '{}' ({}x{})", id, width, height);
                let handle = ImageHandle::new(id, width, height);
                self.cache.insert(id.to_string(), handle.clone());
                handle
            }
            Err(e) => {
                if self.warned.insert(id.to_string()) {
                    tracing::warn!("Picture '{}' unavailable: {}", id, e);
                }
                ImageHandle::pending(id)
            }
        }
    }
}

impl AssetProvider for SystemImages {
    fn preload(&mut self, id: &str) {
        self.load(id);
    }

    fn get(&mut self, id: &str) -> ImageHandle {
        self.load(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("msgbg-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_reads_picture_size() {
        let dir = scratch_dir("size");
        image::RgbaImage::new(40, 30).save(dir.join("alice_bg.png")).unwrap();

        let mut images = SystemImages::new(&dir);
        images.preload("alice_bg");
        assert_eq!(images.loaded(), 1);
        assert_eq!(images.get("alice_bg"), ImageHandle::new("alice_bg", 40, 30));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_picture_is_pending_until_it_appears() {
        let dir = scratch_dir("late");
        let mut images = SystemImages::new(&dir);
        assert!(!images.get("late_bg").is_ready());
        assert_eq!(images.loaded(), 0);

        image::RgbaImage::new(8, 4).save(dir.join("late_bg.png")).unwrap();
        assert_eq!(images.get("late_bg"), ImageHandle::new("late_bg", 8, 4));

        std::fs::remove_dir_all(&dir).ok();
    }
}
