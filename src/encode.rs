use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::bmp::{self, BmpHeaders, RowOrder};
use crate::buffer::PixelBuffer;
use crate::error::BitmapError;
use crate::limits::Limits;

/// Encode configuration for writing a [`PixelBuffer`] as a 24-bit BMP.
///
/// ```no_run
/// use zenbmp24::{Color, EncodeRequest, PixelBuffer, RowOrder};
///
/// let mut img = PixelBuffer::new(64, 48)?;
/// img.fill(Color::MAGENTA);
/// img.draw_centered_rect(16, Color::LIME)?;
///
/// let written = EncodeRequest::new()
///     .with_row_order(RowOrder::BottomUp)
///     .write_file(&img, "square.bmp")?;
/// assert_eq!(written, 54 + 48 * 64 * 3);
/// # Ok::<(), zenbmp24::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EncodeRequest {
    limits: Option<Limits>,
    row_order: RowOrder,
    atomic_replace: bool,
}

impl Default for EncodeRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeRequest {
    /// Top-down rows, no limits, atomic file replacement.
    pub fn new() -> Self {
        Self {
            limits: None,
            row_order: RowOrder::TopDown,
            atomic_replace: true,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_row_order(mut self, order: RowOrder) -> Self {
        self.row_order = order;
        self
    }

    /// When enabled (the default), [`write_file`](Self::write_file) writes
    /// to a temporary file next to the target and renames it into place only
    /// after every byte is written. When disabled the target is written
    /// directly and a failed encode may leave a partial file behind.
    pub fn with_atomic_replace(mut self, atomic: bool) -> Self {
        self.atomic_replace = atomic;
        self
    }

    fn headers(&self, buffer: &PixelBuffer) -> Result<BmpHeaders, BitmapError> {
        if let Some(limits) = &self.limits {
            limits.check(buffer.width(), buffer.height())?;
        }
        let headers = BmpHeaders::for_dimensions(buffer.dimensions())?;
        log::debug!(
            "encoding {}x{} BMP: row stride {}, padding {}, file size {}",
            buffer.width(),
            buffer.height(),
            headers.row_stride(),
            headers.padding,
            headers.file_size()
        );
        Ok(headers)
    }

    /// Encode into a new byte vector.
    pub fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, BitmapError> {
        let headers = self.headers(buffer)?;
        let file_size = headers.file_size();
        if let Some(limits) = &self.limits {
            limits.check_memory(u64::from(file_size))?;
        }
        let mut out = Vec::new();
        out.try_reserve_exact(file_size as usize)
            .map_err(|_| BitmapError::AllocationFailed {
                width: buffer.width(),
                height: buffer.height(),
            })?;
        bmp::write_bmp(buffer, &headers, self.row_order, &mut out)?;
        Ok(out)
    }

    /// Encode into `sink` and flush it. Returns the number of bytes written.
    ///
    /// Error offsets count from the first byte written to `sink`.
    pub fn write_to<W: Write>(&self, buffer: &PixelBuffer, sink: W) -> Result<u64, BitmapError> {
        let headers = self.headers(buffer)?;
        bmp::write_bmp(buffer, &headers, self.row_order, sink)
    }

    /// Encode into the file at `path`, replacing it if it exists.
    /// Returns the number of bytes written.
    pub fn write_file<P: AsRef<Path>>(
        &self,
        buffer: &PixelBuffer,
        path: P,
    ) -> Result<u64, BitmapError> {
        let path = path.as_ref();
        // Headers first so bad dimensions never touch the filesystem.
        let headers = self.headers(buffer)?;
        let written = if self.atomic_replace {
            self.write_atomic(buffer, &headers, path)?
        } else {
            let file = create(path)?;
            write_and_sync(buffer, &headers, self.row_order, file)?
        };
        log::debug!("wrote {written} bytes to {}", path.display());
        Ok(written)
    }

    fn write_atomic(
        &self,
        buffer: &PixelBuffer,
        headers: &BmpHeaders,
        path: &Path,
    ) -> Result<u64, BitmapError> {
        let tmp = temp_path(path);
        let file = create(&tmp)?;
        let result = write_and_sync(buffer, headers, self.row_order, file).and_then(|written| {
            fs::rename(&tmp, path).map_err(|source| BitmapError::SinkUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(written)
        });
        if result.is_err() {
            if let Err(e) = fs::remove_file(&tmp) {
                log::warn!(
                    "failed to remove temporary file {}: {}",
                    tmp.display(),
                    e
                );
            }
        }
        result
    }
}

fn create(path: &Path) -> Result<File, BitmapError> {
    File::create(path).map_err(|source| BitmapError::SinkUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// The file is closed when this returns, on success or failure.
fn write_and_sync(
    buffer: &PixelBuffer,
    headers: &BmpHeaders,
    order: RowOrder,
    file: File,
) -> Result<u64, BitmapError> {
    let (written, file) = write_buffered(buffer, headers, order, file)?;
    file.sync_all().map_err(|source| BitmapError::Write {
        offset: written,
        source,
    })?;
    Ok(written)
}

/// Encode through a `BufWriter` and hand back the inner sink.
///
/// After a failed write the buffered bytes are discarded, so nothing more
/// reaches `inner`.
fn write_buffered<W: Write>(
    buffer: &PixelBuffer,
    headers: &BmpHeaders,
    order: RowOrder,
    inner: W,
) -> Result<(u64, W), BitmapError> {
    let mut writer = BufWriter::new(inner);
    match bmp::write_bmp(buffer, headers, order, &mut writer) {
        Ok(written) => {
            let inner = writer.into_inner().map_err(|e| BitmapError::Write {
                offset: written,
                source: e.into_error(),
            })?;
            Ok((written, inner))
        }
        Err(e) => {
            let _ = writer.into_parts();
            Err(e)
        }
    }
}

/// `.<name>.<pid>-<n>.tmp` in the same directory as `path`, where `n` is
/// unique within the process.
fn temp_path(path: &Path) -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image.bmp".into());
    path.with_file_name(format!(".{name}.{}-{n}.tmp", std::process::id()))
}
