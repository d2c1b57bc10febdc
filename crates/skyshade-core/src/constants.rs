//! Fixed conventions shared by every build variant.
//! Unlike the tuning table in [`crate::config`], these are contracts with
//! authored assets or the host engine and are never overridden.

/// Lower bound (exclusive) of the texture alpha band that tags an emissive texel.
/// 252/255 sits inside the band.
pub const GLOW_ALPHA_MIN: f32 = 0.988;

/// Upper bound (exclusive) of the emissive alpha band.
pub const GLOW_ALPHA_MAX: f32 = 0.993;

/// Alpha above this (still inside the band) tags a dim emissive texel, 253/255.
pub const GLOW_ALPHA_DIM: f32 = 0.989;

/// Intensity of a dim emissive texel relative to a full one.
pub const GLOW_DIM_FACTOR: f32 = 0.4;

/// Luminance weights used for cloud highlights and brightness estimates.
pub const CLOUD_LUMA: [f32; 3] = [0.3, 0.4, 0.3];

/// Fog-color weights for the day-visibility estimate of night effects.
pub const DAYLIGHT_WEIGHTS: [f32; 3] = [0.5, 0.7, 0.5];

/// Rec. 709-ish weights for saturation control in color correction.
pub const SATURATION_LUMA: [f32; 3] = [0.21, 0.71, 0.08];

/// Hard cap on raymarch steps for the rounded cloud layer.
pub const MAX_CLOUD_STEPS: u32 = 16;

/// Vertical extent multiplier of the rounded cloud slab in cloud units.
pub const CLOUD_SLAB_SCALE: f32 = 7.0;

/// Bias keeping the grazing-angle ray offset finite when `view_dir.y == 0`.
pub const GRAZING_BIAS: f32 = 0.02;

/// Tint of the end-dimension horizon band.
pub const END_HORIZON_TINT: [f32; 3] = [0.4, 0.2, 1.0];

/// Color of the shooting star.
pub const SHOOTING_STAR_COL: [f32; 3] = [0.8, 0.9, 1.0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glow_band_ordering() {
        assert!(GLOW_ALPHA_MIN < GLOW_ALPHA_DIM);
        assert!(GLOW_ALPHA_DIM < GLOW_ALPHA_MAX);
        // 252/255 and 253/255 must land inside the band.
        let full = 252.0f32 / 255.0;
        let dim = 253.0f32 / 255.0;
        assert!(full > GLOW_ALPHA_MIN && full < GLOW_ALPHA_DIM);
        assert!(dim > GLOW_ALPHA_DIM && dim < GLOW_ALPHA_MAX);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f32 = CLOUD_LUMA.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        let sum: f32 = SATURATION_LUMA.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }
}
