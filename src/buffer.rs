//! Drawable pixel storage.

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{Color, Dimensions, Point};

/// A `width` x `height` grid of [`Color`] values in one contiguous
/// row-major allocation. `(0, 0)` is the top-left pixel.
///
/// New buffers are black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<Color>,
}

impl PixelBuffer {
    /// Allocate a black buffer.
    ///
    /// Returns [`BitmapError::AllocationFailed`] if storage for the pixels
    /// cannot be obtained. Nothing is left allocated on failure.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BitmapError::AllocationFailed { width, height })?;
        let mut data = Vec::new();
        if let Err(e) = data.try_reserve_exact(len) {
            log::warn!("pixel buffer allocation failed for {width}x{height}: {e}");
            return Err(BitmapError::AllocationFailed { width, height });
        }
        data.resize(len, Color::BLACK);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Allocate a black buffer after checking `limits`.
    pub fn with_limits(width: u32, height: u32, limits: &Limits) -> Result<Self, BitmapError> {
        limits.check(width, height)?;
        limits.check_memory(Dimensions::new(width, height).pixel_count().saturating_mul(3))?;
        Self::new(width, height)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Whether the buffer holds no pixels (either dimension is zero).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All pixels, row-major, top row first.
    pub fn as_slice(&self) -> &[Color] {
        &self.data
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, BitmapError> {
        if x >= self.width || y >= self.height {
            return Err(BitmapError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Result<Color, BitmapError> {
        let idx = self.index(x, y)?;
        Ok(self.data[idx])
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) -> Result<(), BitmapError> {
        let idx = self.index(x, y)?;
        self.data[idx] = color;
        Ok(())
    }

    /// Row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[Color]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        self.data.get(start..start + w)
    }

    /// Rows from top to bottom. Yields `height` rows even when `width` is zero.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Color]> + ExactSizeIterator + '_ {
        let w = self.width as usize;
        (0..self.height as usize).map(move |y| &self.data[y * w..y * w + w])
    }

    /// Row-major `(x, y)` iterator starting at the top-left pixel.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            width: self.width,
            height: self.height,
            x: 0,
            y: 0,
        }
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        self.data.fill(color);
    }

    /// Fill a square of side `side_len` whose top-left corner is `origin`.
    ///
    /// An origin outside the buffer draws nothing. A square crossing the
    /// right or bottom edge is cut off at the edge.
    pub fn draw_rect(&mut self, origin: Point, side_len: u32, color: Color) {
        if !self.dimensions().contains(origin) {
            return;
        }
        let x_end = origin.x.saturating_add(side_len).min(self.width) as usize;
        let y_end = origin.y.saturating_add(side_len).min(self.height) as usize;
        let w = self.width as usize;
        for y in origin.y as usize..y_end {
            self.data[y * w + origin.x as usize..y * w + x_end].fill(color);
        }
    }

    /// Fill a square of side `side_len` centered in the buffer.
    ///
    /// The origin is `((width - side_len) / 2, (height - side_len) / 2)`
    /// rounded down. Fails with [`BitmapError::RectTooLarge`] if the square
    /// is wider or taller than the buffer.
    pub fn draw_centered_rect(&mut self, side_len: u32, color: Color) -> Result<(), BitmapError> {
        let (Some(dx), Some(dy)) = (
            self.width.checked_sub(side_len),
            self.height.checked_sub(side_len),
        ) else {
            return Err(BitmapError::RectTooLarge {
                side_len,
                width: self.width,
                height: self.height,
            });
        };
        self.draw_rect(Point::new(dx / 2, dy / 2), side_len, color);
        Ok(())
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Color> {
        imgref::ImgRef::new(&self.data, self.width as usize, self.height as usize)
    }

    /// Copy an RGB image into a new buffer.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGB8>) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionOverflow {
            width: u32::MAX,
            height: u32::MAX,
        };
        let width = u32::try_from(img.width()).map_err(|_| too_large())?;
        let height = u32::try_from(img.height()).map_err(|_| too_large())?;
        let mut buf = Self::new(width, height)?;
        let w = width as usize;
        for (y, row) in img.rows().enumerate() {
            for (dst, &src) in buf.data[y * w..y * w + w].iter_mut().zip(row) {
                *dst = Color::from(src);
            }
        }
        Ok(buf)
    }
}

/// Iterator over the `(x, y)` coordinates of a [`PixelBuffer`] in row-major order.
#[derive(Clone, Copy, Debug)]
pub struct Coordinates {
    width: u32,
    height: u32,
    x: u32,
    y: u32,
}

impl Iterator for Coordinates {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        if self.x < self.width && self.y < self.height {
            let this = (self.x, self.y);
            self.x += 1;
            if self.x == self.width {
                self.x = 0;
                self.y += 1;
            }
            Some(this)
        } else {
            None
        }
    }
}
