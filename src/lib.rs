//! # zenbmp24
//!
//! Uncompressed 24-bit BMP encoder with a small drawable pixel buffer.
//!
//! ## Output format
//!
//! - 14-byte file header (`BM`, file size, reserved, pixel offset 54)
//! - 40-byte BITMAPINFOHEADER (24 bpp, no compression, no palette)
//! - `height` rows of `width` BGR pixels, each row zero-padded to a
//!   multiple of 4 bytes
//!
//! Rows are written top row first by default, in the order they are stored.
//! The height field is positive, which BMP readers take to mean bottom-up,
//! so such files display vertically flipped. Use [`RowOrder::BottomUp`] for
//! the conventional orientation.
//!
//! ## Non-Goals
//!
//! - Decoding
//! - Palettes, other bit depths, RLE or bitfield compression
//! - Drawing beyond flat fills and squares
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp24::{Color, PixelBuffer, Point};
//!
//! let mut img = PixelBuffer::new(2000, 1400)?;
//! img.fill(Color::MAGENTA);
//! img.draw_centered_rect(500, Color::LIME)?;
//! img.draw_rect(Point::new(1900, 1300), 200, Color::BLUE); // clipped at the edges
//!
//! let bytes = zenbmp24::encode_bmp(&img)?;
//! assert_eq!(&bytes[..2], b"BM");
//!
//! let written = zenbmp24::write_bmp(&img, "MyFirstBMP.bmp")?;
//! assert_eq!(written, bytes.len() as u64);
//! # Ok::<(), zenbmp24::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod buffer;
mod encode;
mod error;
mod limits;
mod pixel;

pub mod bmp;

use std::io::Write;
use std::path::Path;

// Re-exports
pub use bmp::{BmpHeaders, RowOrder};
pub use buffer::{Coordinates, PixelBuffer};
pub use encode::EncodeRequest;
pub use error::BitmapError;
pub use limits::Limits;
pub use pixel::{Color, Dimensions, Point};

/// Encode `buffer` as a BMP in memory with default settings.
pub fn encode_bmp(buffer: &PixelBuffer) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::new().encode(buffer)
}

/// Write `buffer` to `sink` with default settings. Returns bytes written.
pub fn write_bmp_to<W: Write>(buffer: &PixelBuffer, sink: W) -> Result<u64, BitmapError> {
    EncodeRequest::new().write_to(buffer, sink)
}

/// Write `buffer` to the file at `path` with default settings, replacing
/// the file only once the whole image is written. Returns bytes written.
pub fn write_bmp<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<u64, BitmapError> {
    EncodeRequest::new().write_file(buffer, path)
}
