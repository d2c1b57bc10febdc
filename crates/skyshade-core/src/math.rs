//! Shader-language math helpers with GLSL semantics.
//!
//! These differ from the std/glam equivalents in ways that are visible on
//! screen: `fract` is floor-based (never negative), `smoothstep` accepts
//! reversed edges, and `mix` evaluates `x*(1-a) + y*a` rather than
//! `x + (y-x)*a`.

use std::ops::{Add, Mul};

use glam::{Vec3, Vec4};

/// Largest f32 strictly below 1.0.
const FRACT_MAX: f32 = 0.999_999_94;

/// Fractional part, `x - floor(x)`, kept inside `[0, 1)`.
///
/// Tiny negative inputs round `x - floor(x)` up to exactly 1.0 in f32; those
/// are pinned to the largest value below 1.
#[inline]
pub fn fract(x: f32) -> f32 {
    (x - x.floor()).min(FRACT_MAX)
}

/// Clamp to `[0, 1]`.
#[inline]
pub fn saturate(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Hermite interpolation between two edges. `edge0 > edge1` inverts the ramp.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = saturate((x - edge0) / (edge1 - edge0));
    t * t * (3.0 - 2.0 * t)
}

/// Component-wise [`smoothstep`] with scalar edges.
#[inline]
pub fn smoothstep3(edge0: f32, edge1: f32, v: Vec3) -> Vec3 {
    Vec3::new(
        smoothstep(edge0, edge1, v.x),
        smoothstep(edge0, edge1, v.y),
        smoothstep(edge0, edge1, v.z),
    )
}

/// Component-wise [`smoothstep`] with scalar edges.
#[inline]
pub fn smoothstep4(edge0: f32, edge1: f32, v: Vec4) -> Vec4 {
    Vec4::new(
        smoothstep(edge0, edge1, v.x),
        smoothstep(edge0, edge1, v.y),
        smoothstep(edge0, edge1, v.z),
        smoothstep(edge0, edge1, v.w),
    )
}

/// Linear blend, `x*(1-a) + y*a`. Works for scalars and every glam vector.
#[inline]
pub fn mix<T>(x: T, y: T, a: f32) -> T
where
    T: Mul<f32, Output = T> + Add<Output = T>,
{
    x * (1.0 - a) + y * a
}

/// Hermite weight used by the value-noise lattices, `u*u*(3-2u)`.
#[inline]
pub fn hermite(u: f32) -> f32 {
    u * u * (3.0 - 2.0 * u)
}

/// Rainbow spectrum: three overlapping squared bumps centered half a unit
/// apart, red leading.
pub fn spectrum(x: f32) -> Vec3 {
    let s = Vec3::new(x - 0.5, x, x + 0.5);
    let s = smoothstep3(1.0, 0.0, s.abs());
    s * s
}

/// Rotate the xy components of `v` by `angle` radians, leaving z untouched.
#[inline]
pub fn rotate_xy(v: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fract_matches_floor_semantics() {
        assert_eq!(fract(1.25), 0.25);
        assert_eq!(fract(-0.25), 0.75);
        assert_eq!(fract(3.0), 0.0);
    }

    #[test]
    fn test_fract_never_reaches_one() {
        for x in [-1e-9f32, -1e-12, -f32::MIN_POSITIVE, -3.0e-8] {
            let f = fract(x);
            assert!((0.0..1.0).contains(&f), "fract({x}) = {f}");
        }
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    }

    #[test]
    fn test_smoothstep_reversed_edges() {
        // Reversed edges produce the mirrored ramp.
        assert_eq!(smoothstep(1.0, 0.0, 0.0), 1.0);
        assert_eq!(smoothstep(1.0, 0.0, 1.0), 0.0);
        let a = smoothstep(1.0, 0.0, 0.3);
        let b = 1.0 - smoothstep(0.0, 1.0, 0.3);
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn test_mix_endpoints_exact() {
        let x = Vec3::new(0.1, 0.2, 0.3);
        let y = Vec3::new(5.0, 6.0, 7.0);
        assert_eq!(mix(x, y, 0.0), x);
        assert_eq!(mix(x, y, 1.0), y);
        assert_eq!(mix(2.0f32, 4.0, 0.5), 3.0);
    }

    #[test]
    fn test_spectrum_range_and_support() {
        // Outside [-1.5, 1.5] every bump is zero.
        assert_eq!(spectrum(-2.0), Vec3::ZERO);
        assert_eq!(spectrum(2.0), Vec3::ZERO);
        // Green peaks at x = 0.
        let s = spectrum(0.0);
        assert_eq!(s.y, 1.0);
        for i in -30..=30 {
            let c = spectrum(i as f32 * 0.05);
            assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_rotate_xy_quarter_turn() {
        let v = rotate_xy(Vec3::new(1.0, 0.0, 0.5), std::f32::consts::FRAC_PI_2);
        assert!((v - Vec3::new(0.0, 1.0, 0.5)).length() < 1e-6);
    }
}
