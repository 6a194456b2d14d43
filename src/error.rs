use std::io;
use std::path::PathBuf;

/// Errors from pixel buffer construction, drawing and BMP encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("failed to allocate pixel storage for {width}x{height}")]
    AllocationFailed { width: u32, height: u32 },

    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("dimensions too large for a BMP file: {width}x{height}")]
    DimensionOverflow { width: u32, height: u32 },

    #[error("square with side {side_len} does not fit in {width}x{height} buffer")]
    RectTooLarge {
        side_len: u32,
        width: u32,
        height: u32,
    },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("cannot open output {}: {source}", .path.display())]
    SinkUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write failed at byte offset {offset}: {source}")]
    Write {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("wrote {actual} bytes but header declares {expected}")]
    LengthMismatch { expected: u64, actual: u64 },
}
