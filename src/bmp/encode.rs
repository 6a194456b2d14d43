//! BMP encoder: headers, then padded BGR rows.

use std::io::Write;

use super::header::BmpHeaders;
use crate::buffer::PixelBuffer;
use crate::error::BitmapError;
use crate::pixel::Color;

/// Order in which pixel rows are written after the headers.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowOrder {
    /// Top row first, in the order rows are stored in the buffer.
    ///
    /// The height field stays positive, so readers that follow the BMP
    /// convention show the image upside down.
    #[default]
    TopDown,
    /// Bottom row first. With the positive height field this is the
    /// orientation BMP readers expect.
    BottomUp,
}

/// Wraps a sink and counts bytes so failures can report their offset.
struct OffsetWriter<W> {
    inner: W,
    offset: u64,
}

impl<W: Write> OffsetWriter<W> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), BitmapError> {
        self.inner
            .write_all(bytes)
            .map_err(|source| BitmapError::Write {
                offset: self.offset,
                source,
            })?;
        self.offset += bytes.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), BitmapError> {
        self.inner.flush().map_err(|source| BitmapError::Write {
            offset: self.offset,
            source,
        })
    }
}

/// Serialize one padded row into `out`, replacing its contents.
fn fill_row(out: &mut Vec<u8>, row: &[Color], padding: usize) {
    out.clear();
    for px in row {
        out.extend_from_slice(&px.to_bgr_bytes());
    }
    out.extend(core::iter::repeat_n(0u8, padding));
}

/// Write `buffer` as a BMP stream into `sink` and flush it.
///
/// Returns the number of bytes written, which always equals the declared
/// file size. The first failed write aborts the encode.
pub(crate) fn write_bmp<W: Write>(
    buffer: &PixelBuffer,
    headers: &BmpHeaders,
    order: RowOrder,
    sink: W,
) -> Result<u64, BitmapError> {
    let mut out = OffsetWriter {
        inner: sink,
        offset: 0,
    };

    out.write_all(&headers.file.to_bytes())?;
    out.write_all(&headers.info.to_bytes())?;

    let padding = headers.padding as usize;
    let mut row_buf = Vec::new();
    row_buf
        .try_reserve_exact(headers.row_stride() as usize)
        .map_err(|_| BitmapError::AllocationFailed {
            width: buffer.width(),
            height: 1,
        })?;

    log::trace!("writing {} rows {:?}", buffer.height(), order);
    match order {
        RowOrder::TopDown => {
            for row in buffer.rows() {
                fill_row(&mut row_buf, row, padding);
                out.write_all(&row_buf)?;
            }
        }
        RowOrder::BottomUp => {
            for row in buffer.rows().rev() {
                fill_row(&mut row_buf, row, padding);
                out.write_all(&row_buf)?;
            }
        }
    }
    out.flush()?;

    let expected = u64::from(headers.file_size());
    if out.offset != expected {
        return Err(BitmapError::LengthMismatch {
            expected,
            actual: out.offset,
        });
    }
    Ok(out.offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Accepts `limit` bytes, then fails every write.
    struct FailAfter {
        limit: usize,
        written: Vec<u8>,
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit - self.written.len();
            if room == 0 {
                return Err(io::Error::other("sink full"));
            }
            let n = room.min(buf.len());
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn bytes_written_match_file_size() {
        for (w, h) in [(0, 0), (1, 1), (5, 1), (4, 2), (7, 3), (0, 4)] {
            let buffer = PixelBuffer::new(w, h).unwrap();
            let headers = BmpHeaders::new(w, h).unwrap();
            let mut out = Vec::new();
            let n = write_bmp(&buffer, &headers, RowOrder::TopDown, &mut out).unwrap();
            assert_eq!(n, u64::from(headers.file_size()));
            assert_eq!(out.len() as u64, n);
        }
    }

    #[test]
    fn write_error_reports_row_offset() {
        let buffer = PixelBuffer::new(5, 3).unwrap();
        let headers = BmpHeaders::new(5, 3).unwrap();
        // Headers and the first row fit, the second row does not.
        let sink = FailAfter {
            limit: 54 + 16 + 4,
            written: Vec::new(),
        };
        let err = write_bmp(&buffer, &headers, RowOrder::TopDown, sink).unwrap_err();
        assert!(
            matches!(err, BitmapError::Write { offset: 70, .. }),
            "{err:?}"
        );
    }

    #[test]
    fn header_write_error_reports_zero() {
        let buffer = PixelBuffer::new(1, 1).unwrap();
        let headers = BmpHeaders::new(1, 1).unwrap();
        let sink = FailAfter {
            limit: 0,
            written: Vec::new(),
        };
        let err = write_bmp(&buffer, &headers, RowOrder::BottomUp, sink).unwrap_err();
        assert!(matches!(err, BitmapError::Write { offset: 0, .. }));
    }
}
