//! Minimal reader for the files this crate writes, used to check output.

#![allow(dead_code)]

use zenbmp24::Color;

pub struct Parsed {
    pub file_size: u32,
    pub array_offset: u32,
    pub width: u32,
    pub height: u32,
    pub bpp: u16,
    /// Rows in file order.
    pub rows: Vec<Vec<Color>>,
    /// Padding bytes of every row, concatenated.
    pub padding: Vec<u8>,
}

fn u16_at(data: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([data[off], data[off + 1]])
}

fn u32_at(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(data[off..off + 4].try_into().unwrap())
}

pub fn parse(data: &[u8]) -> Parsed {
    assert_eq!(&data[0..2], b"BM");
    assert_eq!(u16_at(data, 6), 0, "reserved1");
    assert_eq!(u16_at(data, 8), 0, "reserved2");
    assert_eq!(u32_at(data, 14), 40, "info header size");
    assert_eq!(u16_at(data, 26), 1, "color planes");
    assert_eq!(u32_at(data, 30), 0, "compression");

    let array_offset = u32_at(data, 10);
    let width = u32_at(data, 18);
    let height = u32_at(data, 22);
    let stride = (width as usize * 3).div_ceil(4) * 4;
    let pad = stride - width as usize * 3;

    let mut rows = Vec::new();
    let mut padding = Vec::new();
    for y in 0..height as usize {
        let start = array_offset as usize + y * stride;
        let row = &data[start..start + stride];
        rows.push(
            row[..width as usize * 3]
                .chunks_exact(3)
                .map(|px| Color::bgr(px[0], px[1], px[2]))
                .collect(),
        );
        padding.extend_from_slice(&row[stride - pad..]);
    }

    Parsed {
        file_size: u32_at(data, 2),
        array_offset,
        width,
        height,
        bpp: u16_at(data, 28),
        rows,
        padding,
    }
}

/// A unique path under the system temp dir; the file does not exist yet.
pub fn temp_file(name: &str) -> std::path::PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "zenbmp24-{}-{n}-{name}",
        std::process::id()
    ))
}
