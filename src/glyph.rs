//! Glyph rasterization and the per-character brightness table.

use crate::charset::CharacterSet;
use crate::matcher::closest_index;
use crate::{AsciiGridError, Result};
use fontdue::{Font, FontSettings};
use rayon::prelude::*;
use std::path::Path;

/// Edge length of the square bitmap each glyph is measured on.
pub const GLYPH_RESOLUTION: usize = 16;

/// Square lit/unlit bitmap of one rendered character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    size: usize,
    cells: Vec<bool>,
}

impl GlyphBitmap {
    pub fn from_fn(size: usize, mut lit: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(lit(x, y));
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.cells[y * self.size + x]
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&lit| lit).count()
    }

    /// Fraction of lit cells.
    pub fn brightness(&self) -> f32 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.lit_count() as f32 / self.cells.len() as f32
    }
}

/// Renders a character into a square bitmap.
///
/// Must be deterministic per character. A character the rasterizer cannot draw
/// is an error, never a blank bitmap.
pub trait GlyphRasterizer: Sync {
    fn rasterize(&self, ch: char, resolution: usize) -> Result<GlyphBitmap>;
}

/// Rasterizer backed by a TTF/OTF font.
pub struct FontRasterizer {
    font: Font,
}

impl FontRasterizer {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| AsciiGridError::Font(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        log::debug!("loaded font {} ({} bytes)", path.as_ref().display(), data.len());
        Self::from_bytes(data)
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, ch: char, resolution: usize) -> Result<GlyphBitmap> {
        if self.font.lookup_glyph_index(ch) == 0 {
            return Err(AsciiGridError::UnknownGlyph(ch));
        }

        let size = resolution as i32;
        let font_size = resolution as f32 * 0.875; // ~87.5% to fit with baseline
        let (metrics, coverage) = self.font.rasterize(ch, font_size);

        // Baseline at ~75% down, centered horizontally
        let baseline_y = (resolution as f32 * 0.75) as i32;
        let y_offset = baseline_y - metrics.height as i32 - metrics.ymin;
        let x_offset = (size - metrics.width as i32) / 2;

        Ok(GlyphBitmap::from_fn(resolution, |x, y| {
            let sx = x as i32 - x_offset;
            let sy = y as i32 - y_offset;
            if sx < 0 || sy < 0 || sx >= metrics.width as i32 || sy >= metrics.height as i32 {
                return false;
            }
            coverage[sy as usize * metrics.width + sx as usize] >= 128
        }))
    }
}

/// Min-max stretch into `[0, 1]`.
///
/// When every value is equal (including a single value) all outputs are 0.
pub fn normalize(raw: &[f32]) -> Vec<f32> {
    let Some(&first) = raw.first() else {
        return Vec::new();
    };
    let (min, max) = raw.iter().fold((first, first), |(lo, hi), &b| (lo.min(b), hi.max(b)));
    if max == min {
        return vec![0.0; raw.len()];
    }
    raw.iter().map(|&b| (b - min) / (max - min)).collect()
}

/// One character with its measured and stretched brightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub raw: f32,
    pub normalized: f32,
}

/// Brightness of every character of a set, in the set's order.
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    chars: Vec<char>,
    raw: Vec<f32>,
    normalized: Vec<f32>,
}

impl GlyphTable {
    /// Rasterize each character at `resolution` and measure it.
    ///
    /// Any rasterizer failure aborts the whole table.
    pub fn build<R: GlyphRasterizer + ?Sized>(
        charset: &CharacterSet,
        rasterizer: &R,
        resolution: usize,
    ) -> Result<Self> {
        let chars: Vec<char> = charset.iter().collect();
        let raw = chars
            .par_iter()
            .map(|&c| rasterizer.rasterize(c, resolution).map(|bitmap| bitmap.brightness()))
            .collect::<Result<Vec<f32>>>()?;
        Ok(Self::from_raw(chars, raw))
    }

    /// Table from already measured raw brightness values.
    pub fn from_raw(chars: Vec<char>, raw: Vec<f32>) -> Self {
        debug_assert_eq!(chars.len(), raw.len());
        let normalized = normalize(&raw);
        Self { chars, raw, normalized }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn raw(&self) -> &[f32] {
        &self.raw
    }

    pub fn normalized(&self) -> &[f32] {
        &self.normalized
    }

    pub fn glyph(&self, index: usize) -> Option<Glyph> {
        Some(Glyph {
            ch: *self.chars.get(index)?,
            raw: self.raw[index],
            normalized: self.normalized[index],
        })
    }

    /// Character whose normalized brightness is closest to `brightness`.
    pub fn closest(&self, brightness: f32) -> Option<char> {
        closest_index(&self.normalized, brightness).map(|i| self.chars[i])
    }
}
