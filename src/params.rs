use serde::Deserialize;

pub const INTENSITY_MIN: f64 = 0.1;
pub const INTENSITY_MAX: f64 = 1.0;
pub const INTENSITY_STEP: f64 = 0.05;
pub const INTENSITY_DEFAULT: f64 = 0.5;

/// Per-call request for the silhouette transform.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SilhouetteParams {
    /// Expected in [`INTENSITY_MIN`, `INTENSITY_MAX`]. Higher values lower the
    /// luminance cutoff.
    pub intensity: f64,
}

impl Default for SilhouetteParams {
    fn default() -> Self {
        Self {
            intensity: INTENSITY_DEFAULT,
        }
    }
}

impl SilhouetteParams {
    pub fn new(intensity: f64) -> Self {
        Self { intensity }
    }

    /// Luminance below which an opaque pixel becomes black.
    pub fn adjusted_threshold(&self) -> f64 {
        1.0 - self.intensity
    }

    pub fn clamped(self) -> Self {
        Self::new(clamp_intensity(self.intensity))
    }
}

/// Clamp into the slider range. NaN falls back to the default.
pub fn clamp_intensity(value: f64) -> f64 {
    if value.is_nan() {
        INTENSITY_DEFAULT
    } else {
        value.clamp(INTENSITY_MIN, INTENSITY_MAX)
    }
}

/// Clamp, then round to the nearest slider step counted from the minimum.
pub fn snap_intensity(value: f64) -> f64 {
    let clamped = clamp_intensity(value);
    let steps = ((clamped - INTENSITY_MIN) / INTENSITY_STEP).round();
    (INTENSITY_MIN + steps * INTENSITY_STEP).min(INTENSITY_MAX)
}
