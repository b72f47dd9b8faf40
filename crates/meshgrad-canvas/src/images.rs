//! Image attachments: decoded pixmaps keyed by `ImageKey`.
//!
//! Decoding runs on a worker thread per request; results come back over a
//! channel and are absorbed by [`ImageStore::poll`] on the main thread.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use meshgrad_engine::render::Pixmap;
use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageKey(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageStatus {
    Pending,
    Ready,
    Failed(String),
    Unknown,
}

enum Slot {
    Pending,
    Ready(Arc<Pixmap>),
    Failed(String),
}

type DecodeResult = (ImageKey, Result<Pixmap>);

pub struct ImageStore {
    slots: HashMap<ImageKey, Slot>,
    next_key: u64,
    tx: Sender<DecodeResult>,
    rx: Receiver<DecodeResult>,
}

impl Default for ImageStore {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { slots: HashMap::new(), next_key: 1, tx, rx }
    }
}

impl std::fmt::Debug for ImageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageStore")
            .field("images", &self.slots.len())
            .field("next_key", &self.next_key)
            .finish()
    }
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> ImageKey {
        let key = ImageKey(self.next_key);
        self.next_key += 1;
        key
    }

    /// Stores an already decoded image.
    pub fn insert(&mut self, pixmap: Pixmap) -> ImageKey {
        let key = self.allocate();
        self.slots.insert(key, Slot::Ready(Arc::new(pixmap)));
        key
    }

    /// Starts decoding `bytes` in the background and returns its key at once.
    ///
    /// The image counts as absent until [`ImageStore::poll`] has picked up
    /// the result.
    pub fn request_decode(&mut self, bytes: Vec<u8>) -> ImageKey {
        let key = self.allocate();
        self.slots.insert(key, Slot::Pending);
        let tx = self.tx.clone();
        log::debug!("decoding image {key:?} ({} bytes)", bytes.len());
        thread::spawn(move || {
            // The receiver is gone only when the store was dropped.
            let _ = tx.send((key, decode(&bytes)));
        });
        key
    }

    /// Absorbs finished decodes. Returns the keys that became ready.
    pub fn poll(&mut self) -> Vec<ImageKey> {
        let mut ready = Vec::new();
        while let Ok((key, result)) = self.rx.try_recv() {
            // Removed while decoding: drop the result.
            let Some(slot) = self.slots.get_mut(&key) else { continue };
            match result {
                Ok(pixmap) => {
                    log::debug!("image {key:?} ready: {}x{}", pixmap.width(), pixmap.height());
                    *slot = Slot::Ready(Arc::new(pixmap));
                    ready.push(key);
                }
                Err(err) => {
                    log::warn!("image {key:?} failed to decode: {err}");
                    *slot = Slot::Failed(err.to_string());
                }
            }
        }
        ready
    }

    /// The decoded image, if it is ready.
    pub fn get(&self, key: ImageKey) -> Option<&Arc<Pixmap>> {
        match self.slots.get(&key) {
            Some(Slot::Ready(img)) => Some(img),
            _ => None,
        }
    }

    pub fn status(&self, key: ImageKey) -> ImageStatus {
        match self.slots.get(&key) {
            None => ImageStatus::Unknown,
            Some(Slot::Pending) => ImageStatus::Pending,
            Some(Slot::Ready(_)) => ImageStatus::Ready,
            Some(Slot::Failed(e)) => ImageStatus::Failed(e.clone()),
        }
    }

    pub fn contains(&self, key: ImageKey) -> bool {
        self.slots.contains_key(&key)
    }

    pub fn remove(&mut self, key: ImageKey) {
        self.slots.remove(&key);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Decodes any supported format into a straight-alpha pixmap.
pub fn decode(bytes: &[u8]) -> Result<Pixmap> {
    let img = image::load_from_memory(bytes).map_err(|e| CanvasError::Image(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Pixmap::from_rgba8(w, h, rgba.as_raw())
        .ok_or_else(|| CanvasError::Image(format!("unusable image size {w}x{h}")))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::export::encode_png;
    use meshgrad_engine::paint::Color;

    fn wait_for(store: &mut ImageStore, key: ImageKey) -> ImageStatus {
        let deadline = Instant::now() + Duration::from_secs(5);
        while store.status(key) == ImageStatus::Pending && Instant::now() < deadline {
            store.poll();
            thread::sleep(Duration::from_millis(5));
        }
        store.status(key)
    }

    #[test]
    fn inserted_images_are_ready_immediately() {
        let mut store = ImageStore::new();
        let key = store.insert(Pixmap::filled(2, 2, Color::WHITE));
        assert_eq!(store.status(key), ImageStatus::Ready);
        assert_eq!(store.get(key).map(|p| p.width()), Some(2));
    }

    #[test]
    fn background_decode_arrives_through_poll() {
        let png = encode_png(&Pixmap::filled(3, 2, Color::BLACK)).unwrap();
        let mut store = ImageStore::new();
        let key = store.request_decode(png);
        assert!(store.get(key).is_none());
        assert_eq!(wait_for(&mut store, key), ImageStatus::Ready);
        let img = store.get(key).unwrap();
        assert_eq!((img.width(), img.height()), (3, 2));
        assert_eq!(img.get(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn garbage_bytes_fail_without_panicking() {
        let mut store = ImageStore::new();
        let key = store.request_decode(vec![1, 2, 3, 4]);
        assert!(matches!(wait_for(&mut store, key), ImageStatus::Failed(_)));
        assert!(store.get(key).is_none());
    }

    #[test]
    fn keys_are_never_reused() {
        let mut store = ImageStore::new();
        let a = store.insert(Pixmap::new(1, 1));
        store.remove(a);
        let b = store.insert(Pixmap::new(1, 1));
        assert_ne!(a, b);
        assert_eq!(store.status(a), ImageStatus::Unknown);
    }
}
