//! Image to ASCII art converter using glyph brightness matching.
//!
//! The image is cut into square blocks, each block's average luma is measured,
//! and the block is replaced by the character whose rendered glyph brightness
//! (stretched to `[0, 1]` across the active character set) is closest.

pub mod charset;
pub mod chunk;
pub mod config;
pub mod glyph;
pub mod grid;
pub mod matcher;
pub mod output;
pub mod sampler;
pub mod shell;

pub use charset::{CharRange, CharacterSet};
pub use chunk::{partition, Block, SquareBlocks};
pub use config::Config;
pub use glyph::{FontRasterizer, GlyphBitmap, GlyphRasterizer, GlyphTable};
pub use grid::CharGrid;
pub use sampler::{BrightnessCache, BrightnessSampler, CacheStats};

use image::RgbImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsciiGridError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Font error: {0}")]
    Font(String),
    #[error("No glyph for character {0:?} in font")]
    UnknownGlyph(char),
    #[error("Invalid block size: image width {width} cannot fit {chars_in_row} characters per row")]
    InvalidBlockSize { width: u32, chars_in_row: u32 },
    #[error("Config error in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, AsciiGridError>;

/// Main converter: glyph table per call, brightness cache across calls.
///
/// The cache is keyed by block content and lives as long as the converter.
/// It is never evicted; use [`Converter::reset_cache`] when switching to an
/// unrelated image or after mutating the one being converted.
pub struct Converter<R> {
    rasterizer: R,
    resolution: usize,
    sampler: BrightnessSampler,
}

impl<R: GlyphRasterizer> Converter<R> {
    pub fn new(rasterizer: R) -> Self {
        Self { rasterizer, resolution: glyph::GLYPH_RESOLUTION, sampler: BrightnessSampler::new() }
    }

    /// Bitmap edge length used to measure glyphs.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Convert `image` into a grid `chars_in_row` characters wide.
    ///
    /// Blocks are `image.width() / chars_in_row` pixels square; partial blocks on
    /// the right and bottom are dropped. An empty `charset` gives an empty grid.
    pub fn convert(
        &mut self,
        image: &RgbImage,
        chars_in_row: u32,
        charset: &CharacterSet,
    ) -> Result<CharGrid> {
        if charset.is_empty() {
            return Ok(CharGrid::empty());
        }

        let block_size = image.width().checked_div(chars_in_row).unwrap_or(0);
        if block_size == 0 {
            return Err(AsciiGridError::InvalidBlockSize { width: image.width(), chars_in_row });
        }

        let table = GlyphTable::build(charset, &self.rasterizer, self.resolution)?;
        log::debug!(
            "glyph table built for {} characters (raw brightness {:.3}..{:.3})",
            table.len(),
            table.raw().iter().copied().fold(f32::INFINITY, f32::min),
            table.raw().iter().copied().fold(f32::NEG_INFINITY, f32::max),
        );

        let blocks = partition(image, block_size)?;
        let mut grid = CharGrid::filled(blocks.rows() as usize, blocks.cols() as usize, ' ');
        for (i, block) in blocks.enumerate() {
            let brightness = self.sampler.sample(&block);
            if let Some(c) = table.closest(brightness) {
                grid.set_index(i, c);
            }
        }

        let stats = self.sampler.cache().stats();
        log::info!(
            "converted {}x{} image to {}x{} grid (block {}px, cache {} hits / {} misses)",
            image.width(),
            image.height(),
            grid.cols(),
            grid.rows(),
            block_size,
            stats.hits,
            stats.misses,
        );
        Ok(grid)
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn cache(&self) -> &BrightnessCache {
        self.sampler.cache()
    }

    pub fn reset_cache(&mut self) {
        self.sampler.clear_cache();
    }
}
