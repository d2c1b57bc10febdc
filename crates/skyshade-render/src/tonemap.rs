//! Final color correction: exposure, tone curve, gamma, saturation, tint.

use glam::Vec3;
use skyshade_core::config::{ToneCurveKind, TonemapConfig};
use skyshade_core::constants::SATURATION_LUMA;
use skyshade_core::math::{mix, saturate};

/// Tone curve selected at build time.
pub trait ToneCurve {
    const KIND: ToneCurveKind;

    fn apply(col: Vec3) -> Vec3;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Exponential;

#[derive(Debug, Clone, Copy, Default)]
pub struct Reinhard;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtendedReinhard;

#[derive(Debug, Clone, Copy, Default)]
pub struct Aces;

impl ToneCurve for Exponential {
    const KIND: ToneCurveKind = ToneCurveKind::Exponential;

    fn apply(col: Vec3) -> Vec3 {
        Vec3::ONE - (-0.8 * col).exp()
    }
}

impl ToneCurve for Reinhard {
    const KIND: ToneCurveKind = ToneCurveKind::Reinhard;

    fn apply(col: Vec3) -> Vec3 {
        col / (Vec3::ONE + col)
    }
}

/// `1/white²` for the extended Reinhard curve. 0.063 rather than 0.0625, so
/// the white point sits at `1/sqrt(0.063)`, just under 4.0.
const EXTENDED_REINHARD_INV_WHITE_SQ: f32 = 0.063;

impl ToneCurve for ExtendedReinhard {
    const KIND: ToneCurveKind = ToneCurveKind::ExtendedReinhard;

    fn apply(col: Vec3) -> Vec3 {
        col * (Vec3::ONE + col * EXTENDED_REINHARD_INV_WHITE_SQ) / (Vec3::ONE + col)
    }
}

impl ToneCurve for Aces {
    const KIND: ToneCurveKind = ToneCurveKind::Aces;

    fn apply(col: Vec3) -> Vec3 {
        let col = col * 0.85;
        let num = col * (col * 1.04 + Vec3::splat(0.03));
        let den = col * (col * 0.93 + Vec3::splat(0.56)) + Vec3::splat(0.14);
        (num / den).clamp(Vec3::ZERO, Vec3::ONE)
    }
}

/// Color grade resolved from [`TonemapConfig`].
///
/// A disabled tint resolves to neutral multipliers so grading never has to
/// check the toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeParams {
    pub exposure: f32,
    pub gamma: f32,
    pub saturation: f32,
    pub tint: Vec3,
    pub tint_low: Vec3,
    pub tint_high: Vec3,
}

impl From<&TonemapConfig> for GradeParams {
    fn from(cfg: &TonemapConfig) -> Self {
        let (tint, tint_low, tint_high) = match cfg.tint {
            Some(tint) => (tint, cfg.tint_low, cfg.tint_high),
            None => (Vec3::ONE, Vec3::ONE, Vec3::ONE),
        };
        Self {
            exposure: cfg.exposure,
            gamma: cfg.gamma,
            saturation: cfg.saturation,
            tint,
            tint_low,
            tint_high,
        }
    }
}

pub fn color_correction<T: ToneCurve>(col: Vec3, grade: &GradeParams) -> Vec3 {
    let col = T::apply(col * grade.exposure);
    let col = col.max(Vec3::ZERO).powf(grade.gamma);

    let lum = col.dot(Vec3::from(SATURATION_LUMA));
    let col = mix(Vec3::splat(lum), col, grade.saturation);

    col * grade.tint * mix(grade.tint_low, grade.tint_high, saturate(lum))
}
