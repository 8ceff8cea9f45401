use crate::params::SilhouetteParams;
use image::RgbaImage;
use log::debug;
use std::collections::{HashMap, VecDeque};

pub const DEFAULT_CACHE_CAPACITY: usize = 12;

type CacheKey = (String, u64);

/// Bounded memo of silhouettes keyed on image identity and intensity, for
/// hosts that recompute on every slider change. Oldest entries go first.
#[derive(Debug)]
pub struct SilhouetteCache {
    capacity: usize,
    entries: HashMap<CacheKey, RgbaImage>,
    order: VecDeque<CacheKey>,
}

impl Default for SilhouetteCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl SilhouetteCache {
    /// `capacity` is raised to 1 so a freshly computed entry can always be
    /// handed back by reference.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn get(&self, image_key: &str, params: SilhouetteParams) -> Option<&RgbaImage> {
        self.entries
            .get(&(image_key.to_owned(), params.intensity.to_bits()))
    }

    pub fn get_or_insert_with<F>(
        &mut self,
        image_key: &str,
        params: SilhouetteParams,
        compute: F,
    ) -> &RgbaImage
    where
        F: FnOnce() -> RgbaImage,
    {
        let key = (image_key.to_owned(), params.intensity.to_bits());
        if self.entries.contains_key(&key) {
            debug!("cache hit: {image_key} @ {:.2}", params.intensity);
        } else {
            debug!("cache miss: {image_key} @ {:.2}", params.intensity);
            let image = compute();
            while self.entries.len() >= self.capacity {
                match self.order.pop_front() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
            self.order.push_back(key.clone());
            self.entries.insert(key.clone(), image);
        }
        &self.entries[&key]
    }
}
