//! BMP file header and BITMAPINFOHEADER for uncompressed 24-bit images.

use crate::error::BitmapError;
use crate::pixel::Dimensions;

/// "BM"
pub const MAGIC: [u8; 2] = *b"BM";
pub const FILE_HEADER_SIZE: u32 = 14;
pub const INFO_HEADER_SIZE: u32 = 40;
/// Offset of the pixel array; both headers, no palette.
pub const PIXEL_ARRAY_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
pub const BITS_PER_PIXEL: u16 = 24;

const BYTES_PER_PIXEL: u64 = BITS_PER_PIXEL as u64 / 8;

/// Zero bytes needed after `row_bytes` to reach a 4-byte boundary.
#[inline]
const fn padding_for(row_bytes: u64) -> u64 {
    match row_bytes % 4 {
        0 => 0,
        rem => 4 - rem,
    }
}

/// Padding bytes after each pixel row of a 24-bit image `width` pixels wide.
///
/// Always in `0..=3`.
pub const fn row_padding(width: u32) -> u32 {
    padding_for(width as u64 * BYTES_PER_PIXEL) as u32
}

/// The 14-byte BMP file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub array_offset: u32,
}

impl FileHeader {
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE as usize] {
        let mut out = [0u8; FILE_HEADER_SIZE as usize];
        out[0..2].copy_from_slice(&self.magic);
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.array_offset.to_le_bytes());
        out
    }
}

/// The 40-byte BITMAPINFOHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: u32,
    pub height: u32,
    pub color_planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// 0 is allowed for uncompressed images.
    pub image_size: u32,
    pub h_res: u32,
    pub v_res: u32,
    pub palette_colors: u32,
    pub important_colors: u32,
}

impl InfoHeader {
    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE as usize] {
        let mut out = [0u8; INFO_HEADER_SIZE as usize];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.color_planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.h_res.to_le_bytes());
        out[28..32].copy_from_slice(&self.v_res.to_le_bytes());
        out[32..36].copy_from_slice(&self.palette_colors.to_le_bytes());
        out[36..40].copy_from_slice(&self.important_colors.to_le_bytes());
        out
    }
}

/// Both headers plus the row layout they imply.
///
/// Computed from dimensions only; the same dimensions always give the
/// same headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeaders {
    pub file: FileHeader,
    pub info: InfoHeader,
    /// Pixel bytes per row, without padding.
    pub row_bytes: u32,
    /// Zero bytes after each row.
    pub padding: u32,
    /// Total size of all padded rows.
    pub pixel_array_size: u32,
}

impl BmpHeaders {
    /// Compute headers for a 24-bit image.
    ///
    /// Returns [`BitmapError::DimensionOverflow`] if the file size does not
    /// fit the 32-bit size field, or a dimension does not fit the signed
    /// 32-bit width/height fields.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let overflow = BitmapError::DimensionOverflow { width, height };
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(overflow);
        }

        let row_bytes = u64::from(width) * BYTES_PER_PIXEL;
        let padding = padding_for(row_bytes);
        // Cannot overflow u64: (2^31 * 3 + 3) * 2^31 < 2^64.
        let pixel_array_size = (row_bytes + padding) * u64::from(height);
        let file_size = u64::from(PIXEL_ARRAY_OFFSET) + pixel_array_size;

        let file_size = u32::try_from(file_size).map_err(|_| overflow)?;
        // Both are bounded by file_size now.
        let pixel_array_size = pixel_array_size as u32;
        let row_bytes = row_bytes as u32;

        Ok(Self {
            file: FileHeader {
                magic: MAGIC,
                file_size,
                reserved1: 0,
                reserved2: 0,
                array_offset: PIXEL_ARRAY_OFFSET,
            },
            info: InfoHeader {
                header_size: INFO_HEADER_SIZE,
                width,
                height,
                color_planes: 1,
                bits_per_pixel: BITS_PER_PIXEL,
                compression: 0,
                image_size: 0,
                h_res: 0,
                v_res: 0,
                palette_colors: 0,
                important_colors: 0,
            },
            row_bytes,
            padding: padding as u32,
            pixel_array_size,
        })
    }

    pub fn for_dimensions(dims: Dimensions) -> Result<Self, BitmapError> {
        Self::new(dims.width, dims.height)
    }

    /// Bytes per row including padding.
    pub fn row_stride(&self) -> u32 {
        self.row_bytes + self.padding
    }

    pub fn file_size(&self) -> u32 {
        self.file.file_size
    }

    /// File header followed by info header, 54 bytes.
    pub fn to_bytes(&self) -> [u8; PIXEL_ARRAY_OFFSET as usize] {
        let mut out = [0u8; PIXEL_ARRAY_OFFSET as usize];
        out[..FILE_HEADER_SIZE as usize].copy_from_slice(&self.file.to_bytes());
        out[FILE_HEADER_SIZE as usize..].copy_from_slice(&self.info.to_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_brings_rows_to_four_bytes() {
        for w in 0..64u32 {
            let pad = row_padding(w);
            assert_eq!(pad, (4 - (3 * w) % 4) % 4, "width {w}");
            assert_eq!((3 * w + pad) % 4, 0, "width {w}");
            assert!(pad <= 3);
        }
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
    }

    #[test]
    fn four_by_two() {
        let h = BmpHeaders::new(4, 2).unwrap();
        assert_eq!(h.row_bytes, 12);
        assert_eq!(h.padding, 0);
        assert_eq!(h.file_size(), 78);
        assert_eq!(h.file.array_offset, 54);
    }

    #[test]
    fn five_by_one() {
        let h = BmpHeaders::new(5, 1).unwrap();
        assert_eq!(h.row_bytes, 15);
        assert_eq!(h.padding, 1);
        assert_eq!(h.row_stride(), 16);
        assert_eq!(h.file_size(), 70);
    }

    #[test]
    fn zero_area_is_header_only() {
        for (w, h) in [(0, 0), (0, 9), (9, 0)] {
            let headers = BmpHeaders::new(w, h).unwrap();
            assert_eq!(headers.file_size(), 54);
            assert_eq!(headers.pixel_array_size, 0);
        }
    }

    #[test]
    fn array_offset_is_constant() {
        for (w, h) in [(1, 1), (3, 7), (1000, 1), (2000, 1400)] {
            assert_eq!(BmpHeaders::new(w, h).unwrap().file.array_offset, 54);
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            BmpHeaders::new(123, 45).unwrap(),
            BmpHeaders::for_dimensions(Dimensions::new(123, 45)).unwrap()
        );
    }

    #[test]
    fn overflow_is_reported() {
        assert!(matches!(
            BmpHeaders::new(65536, 65536),
            Err(BitmapError::DimensionOverflow {
                width: 65536,
                height: 65536
            })
        ));
        assert!(matches!(
            BmpHeaders::new(u32::MAX, 0),
            Err(BitmapError::DimensionOverflow { .. })
        ));
        // Widest single row that fits: 54 + 4_294_967_240 bytes.
        assert_eq!(
            BmpHeaders::new(1_431_655_746, 1).unwrap().file_size(),
            4_294_967_294
        );
        assert!(BmpHeaders::new(1_431_655_747, 1).is_err());
    }

    #[test]
    fn header_bytes_at_documented_offsets() {
        let bytes = BmpHeaders::new(5, 3).unwrap().to_bytes();
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(&bytes[2..6], &(54u32 + 3 * 16).to_le_bytes());
        assert_eq!(&bytes[6..10], &[0, 0, 0, 0]);
        assert_eq!(&bytes[10..14], &54u32.to_le_bytes());
        assert_eq!(&bytes[14..18], &40u32.to_le_bytes());
        assert_eq!(&bytes[18..22], &5u32.to_le_bytes());
        assert_eq!(&bytes[22..26], &3u32.to_le_bytes());
        assert_eq!(&bytes[26..28], &1u16.to_le_bytes());
        assert_eq!(&bytes[28..30], &24u16.to_le_bytes());
        assert!(bytes[30..54].iter().all(|&b| b == 0));
    }
}
