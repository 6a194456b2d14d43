//! Uncompressed 24-bit BMP layout and serialization.
//!
//! A file is a 14-byte file header, a 40-byte BITMAPINFOHEADER and the
//! pixel rows. Each row is `width` BGR triples followed by zero bytes up to
//! the next multiple of 4. All header fields are little-endian.

mod encode;
mod header;

pub use encode::RowOrder;
pub use header::{
    BITS_PER_PIXEL, BmpHeaders, FILE_HEADER_SIZE, FileHeader, INFO_HEADER_SIZE, InfoHeader, MAGIC,
    PIXEL_ARRAY_OFFSET, row_padding,
};

pub(crate) use encode::write_bmp;
