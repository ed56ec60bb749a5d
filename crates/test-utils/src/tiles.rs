//! Synthetic PNG tiles for exercising fetch and classification paths.

use bytes::Bytes;
use image::{Rgba, RgbaImage};
use std::io::Cursor;

use hazard_common::TILE_SIZE;

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Bytes {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, image::ImageOutputFormat::Png)
        .expect("PNG encoding of a test tile cannot fail");
    Bytes::from(buf.into_inner())
}

/// A 256x256 tile filled with a single RGBA value.
pub fn solid_tile(rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, Rgba(rgba))
}

/// A fully transparent 256x256 tile.
pub fn transparent_tile() -> RgbaImage {
    solid_tile([0, 0, 0, 0])
}

/// A transparent tile with one opaque pixel painted at (px, py).
pub fn tile_with_pixel(px: u32, py: u32, rgb: [u8; 3]) -> RgbaImage {
    let mut tile = transparent_tile();
    tile.put_pixel(px, py, Rgba([rgb[0], rgb[1], rgb[2], 255]));
    tile
}

/// PNG bytes for a solid tile.
pub fn solid_tile_png(rgba: [u8; 4]) -> Bytes {
    encode_png(&solid_tile(rgba))
}

/// PNG bytes for a fully transparent tile.
pub fn transparent_tile_png() -> Bytes {
    encode_png(&transparent_tile())
}
