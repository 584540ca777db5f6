//! Image chunking - splits an image into square blocks for character matching.

use crate::{AsciiGridError, Result};
use image::{Rgb, RgbImage};

/// One square cell of the source image.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    image: &'a RgbImage,
    x: u32,
    y: u32,
    size: u32,
}

impl<'a> Block<'a> {
    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixel_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Pixels row by row, left to right.
    pub fn pixels(&self) -> impl Iterator<Item = &'a Rgb<u8>> + 'a {
        let (image, x0, y0, size) = (self.image, self.x, self.y, self.size);
        (y0..y0 + size).flat_map(move |y| (x0..x0 + size).map(move |x| image.get_pixel(x, y)))
    }

    /// Copy of the block's raw RGB bytes, usable as a content key.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixel_count() * 3);
        for px in self.pixels() {
            bytes.extend_from_slice(&px.0);
        }
        bytes
    }
}

/// Row-major iterator over the square blocks of an image.
///
/// Pixels past the last full block on the right and bottom edges are dropped.
#[derive(Debug, Clone)]
pub struct SquareBlocks<'a> {
    image: &'a RgbImage,
    size: u32,
    cols: u32,
    rows: u32,
    total: usize,
    next: usize,
}

impl<'a> SquareBlocks<'a> {
    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }
}

impl<'a> Iterator for SquareBlocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        if self.next >= self.total {
            return None;
        }
        let cols = self.cols as usize;
        let (col, row) = ((self.next % cols) as u32, (self.next / cols) as u32);
        self.next += 1;
        Some(Block { image: self.image, x: col * self.size, y: row * self.size, size: self.size })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SquareBlocks<'_> {}

/// Number of blocks in a `cols` x `rows` partition, without `u32` overflow.
fn block_count(cols: u32, rows: u32) -> usize {
    cols as usize * rows as usize
}

/// Partition `image` into `block_size`-square blocks, top-left first.
///
/// Every call starts a fresh scan; a zero block size is rejected up front.
pub fn partition(image: &RgbImage, block_size: u32) -> Result<SquareBlocks<'_>> {
    if block_size == 0 {
        return Err(AsciiGridError::InvalidBlockSize { width: image.width(), chars_in_row: 0 });
    }
    let (cols, rows) = (image.width() / block_size, image.height() / block_size);
    Ok(SquareBlocks { image, size: block_size, cols, rows, total: block_count(cols, rows), next: 0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 0]))
    }

    #[test]
    fn test_block_count_drops_remainder() {
        let img = gradient(10, 7);
        let blocks = partition(&img, 3).unwrap();
        assert_eq!((blocks.cols(), blocks.rows()), (3, 2));
        assert_eq!(blocks.len(), 6);
    }

    #[test]
    fn test_row_major_order() {
        let img = gradient(4, 4);
        let origins: Vec<_> = partition(&img, 2).unwrap().map(|b| (b.x(), b.y())).collect();
        assert_eq!(origins, vec![(0, 0), (2, 0), (0, 2), (2, 2)]);
    }

    #[test]
    fn test_block_pixels_stay_inside_block() {
        let img = gradient(4, 4);
        let last = partition(&img, 2).unwrap().last().unwrap();
        let coords: Vec<_> = last.pixels().map(|p| (p.0[0], p.0[1])).collect();
        assert_eq!(coords, vec![(2, 2), (3, 2), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_partition_is_restartable() {
        let img = gradient(6, 6);
        let first: Vec<_> = partition(&img, 3).unwrap().map(|b| b.to_bytes()).collect();
        let second: Vec<_> = partition(&img, 3).unwrap().map(|b| b.to_bytes()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_block_larger_than_image_yields_nothing() {
        let img = gradient(3, 3);
        assert_eq!(partition(&img, 4).unwrap().count(), 0);
    }

    #[test]
    fn test_block_count_exceeds_u32() {
        assert_eq!(block_count(u32::MAX, 2), u32::MAX as usize * 2);
        assert_eq!(block_count(0, u32::MAX), 0);
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let img = gradient(3, 3);
        assert!(matches!(partition(&img, 0), Err(AsciiGridError::InvalidBlockSize { .. })));
    }
}
