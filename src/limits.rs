use crate::IlbmError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Limits are checked against the
/// `BMHD` geometry before any bitplane or RGBA buffer is allocated.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for any single buffer (unpacked bitplanes or RGBA output).
    pub max_memory_bytes: Option<u64>,
}

fn exceeded(what: &str, value: u64, max: Option<u64>) -> Result<(), IlbmError> {
    match max {
        Some(max) if value > max => Err(IlbmError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Limits with only a pixel-count cap.
    pub fn with_max_pixels(max_pixels: u64) -> Self {
        Self {
            max_pixels: Some(max_pixels),
            ..Self::default()
        }
    }

    /// Check image dimensions.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), IlbmError> {
        exceeded("width", u64::from(width), self.max_width)?;
        exceeded("height", u64::from(height), self.max_height)?;
        exceeded(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    /// Check that an allocation size is within the memory cap.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), IlbmError> {
        exceeded("allocation of", bytes as u64, self.max_memory_bytes)
    }
}
