//! Average block brightness with a content-keyed cache.

use crate::chunk::Block;
use image::Rgb;
use std::collections::HashMap;

const LUMA_R: f64 = 0.2126;
const LUMA_G: f64 = 0.7152;
const LUMA_B: f64 = 0.0722;

/// Perceptual grey value of a pixel, in `[0, 255]`.
pub fn luma(px: &Rgb<u8>) -> f64 {
    let [r, g, b] = px.0;
    r as f64 * LUMA_R + g as f64 * LUMA_G + b as f64 * LUMA_B
}

/// Mean luma of the block scaled to `[0, 1]`.
pub fn average_brightness(block: &Block<'_>) -> f32 {
    let sum: f64 = block.pixels().map(luma).sum();
    (sum / block.pixel_count() as f64 / 255.0).clamp(0.0, 1.0) as f32
}

/// Cache key: block edge length plus its raw pixel bytes.
///
/// Two blocks with identical pixels share a key no matter where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockKey {
    size: u32,
    bytes: Vec<u8>,
}

impl BlockKey {
    pub fn of(block: &Block<'_>) -> Self {
        Self { size: block.size(), bytes: block.to_bytes() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Block content to brightness. Never evicts; call [`clear`](Self::clear) to reset.
#[derive(Debug, Default)]
pub struct BrightnessCache {
    entries: HashMap<BlockKey, f32>,
    stats: CacheStats,
}

impl BrightnessCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &BlockKey) -> Option<f32> {
        let found = self.entries.get(key).copied();
        match found {
            Some(_) => self.stats.hits += 1,
            None => self.stats.misses += 1,
        }
        found
    }

    pub fn insert(&mut self, key: BlockKey, brightness: f32) {
        self.entries.insert(key, brightness);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        log::debug!("clearing brightness cache ({} entries)", self.entries.len());
        self.entries.clear();
        self.stats = CacheStats::default();
    }
}

/// Measures block brightness, consulting the cache first.
#[derive(Debug, Default)]
pub struct BrightnessSampler {
    cache: BrightnessCache,
}

impl BrightnessSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(&mut self, block: &Block<'_>) -> f32 {
        let key = BlockKey::of(block);
        if let Some(brightness) = self.cache.get(&key) {
            return brightness;
        }
        let brightness = average_brightness(block);
        self.cache.insert(key, brightness);
        brightness
    }

    pub fn cache(&self) -> &BrightnessCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::partition;
    use image::RgbImage;

    fn uniform(size: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(size, size, Rgb(rgb))
    }

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma(&Rgb([0, 0, 0])), 0.0);
        assert!((luma(&Rgb([255, 0, 0])) - 54.213).abs() < 1e-9);
        assert!((luma(&Rgb([0, 255, 0])) - 182.376).abs() < 1e-9);
        assert!((luma(&Rgb([0, 0, 255])) - 18.411).abs() < 1e-9);
    }

    #[test]
    fn test_average_brightness_extremes() {
        let black = uniform(4, [0, 0, 0]);
        let white = uniform(4, [255, 255, 255]);
        let b = partition(&black, 4).unwrap().next().unwrap();
        let w = partition(&white, 4).unwrap().next().unwrap();
        assert_eq!(average_brightness(&b), 0.0);
        assert!((average_brightness(&w) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_is_mean_of_pixels() {
        // Left column black, right column white.
        let img = RgbImage::from_fn(2, 2, |x, _| {
            if x == 0 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        });
        let block = partition(&img, 2).unwrap().next().unwrap();
        assert!((average_brightness(&block) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_repeat_sample_hits_cache() {
        let img = uniform(3, [40, 80, 120]);
        let mut sampler = BrightnessSampler::new();
        let block = partition(&img, 3).unwrap().next().unwrap();

        let first = sampler.sample(&block);
        let second = sampler.sample(&block);

        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(sampler.cache().stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(sampler.cache().len(), 1);
    }

    #[test]
    fn test_key_is_content_not_position() {
        let img = uniform(4, [10, 20, 30]);
        let mut sampler = BrightnessSampler::new();
        for block in partition(&img, 2).unwrap() {
            sampler.sample(&block);
        }
        assert_eq!(sampler.cache().len(), 1);
        assert_eq!(sampler.cache().stats(), CacheStats { hits: 3, misses: 1 });
    }

    #[test]
    fn test_same_bytes_different_size_distinct() {
        let a = BlockKey { size: 1, bytes: vec![0; 12] };
        let b = BlockKey { size: 2, bytes: vec![0; 12] };
        assert_ne!(a, b);
    }

    #[test]
    fn test_clear_resets_entries_and_stats() {
        let img = uniform(2, [1, 2, 3]);
        let mut sampler = BrightnessSampler::new();
        let block = partition(&img, 2).unwrap().next().unwrap();
        sampler.sample(&block);
        sampler.clear_cache();
        assert!(sampler.cache().is_empty());
        assert_eq!(sampler.cache().stats(), CacheStats::default());
    }
}
