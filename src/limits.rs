use crate::error::BitmapError;

/// Resource limits for buffer allocation and encoding.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for pixel storage or an in-memory encode.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(BitmapError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(BitmapError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(BitmapError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub fn check_memory(&self, bytes: u64) -> Result<(), BitmapError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes > max_mem {
                return Err(BitmapError::LimitExceeded(format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_accept_anything() {
        let limits = Limits::default();
        assert!(limits.check(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_memory(u64::MAX).is_ok());
    }

    #[test]
    fn each_limit_is_enforced() {
        let limits = Limits {
            max_width: Some(100),
            max_height: Some(50),
            max_pixels: Some(1000),
            max_memory_bytes: Some(4096),
        };
        assert!(limits.check(100, 10).is_ok());
        assert!(matches!(
            limits.check(101, 1),
            Err(BitmapError::LimitExceeded(_))
        ));
        assert!(matches!(
            limits.check(1, 51),
            Err(BitmapError::LimitExceeded(_))
        ));
        assert!(matches!(
            limits.check(100, 11),
            Err(BitmapError::LimitExceeded(_))
        ));
        assert!(limits.check_memory(4096).is_ok());
        assert!(matches!(
            limits.check_memory(4097),
            Err(BitmapError::LimitExceeded(_))
        ));
    }
}
