//! Hash-based noise primitives (no seed state, no tables).
//!
//! Every function here is a pure function of its argument, so the same input
//! produces the same bits on every call. Golden-image tests depend on that.

use glam::{Vec2, Vec3};

use crate::math::{fract, hermite, mix};

/// Hash a 2D lattice coordinate into `[0, 1)`.
#[inline]
pub fn rand(p: Vec2) -> f32 {
    fract((p.dot(Vec2::new(12.9898, 4.1414))).sin() * 43758.5453)
}

/// Hash a 3D lattice coordinate into `[0, 1)`.
#[inline]
pub fn rand3(p: Vec3) -> f32 {
    fract((p.dot(Vec3::new(12.9898, 78.233, 37.719))).sin() * 43758.5453)
}

/// Star hash: per-cell uniform value in `[0, 1)`.
///
/// Meant to be raised to a high power by the caller. `x^20` of a uniform
/// variable is heavy-tailed: about 96% of cells land below 0.5 and only the
/// top few percent approach 1, which reads as sparse bright points.
#[inline]
pub fn rand_star(p: Vec3) -> f32 {
    let c = p.floor();
    fract((c.dot(Vec3::new(157.1, 113.7, 271.9))).sin() * 43758.5453)
}

/// 2D value noise in `[0, 1)`: Hermite-weighted bilinear blend of the four
/// hashed lattice corners.
pub fn noise2d(p: Vec2) -> f32 {
    let p0 = p.floor();
    let f = p - p0;
    let u = Vec2::new(hermite(f.x), hermite(f.y));

    mix(
        mix(rand(p0), rand(p0 + Vec2::X), u.x),
        mix(rand(p0 + Vec2::Y), rand(p0 + Vec2::ONE), u.x),
        u.y,
    )
}

/// 3D value noise in `[0, 1)`.
///
/// Trilinear blend of the eight hashed lattice corners with Hermite weights,
/// so the first derivative is continuous across cell boundaries.
pub fn noise3d(p: Vec3) -> f32 {
    let p0 = p.floor();
    let f = p - p0;
    let u = Vec3::new(hermite(f.x), hermite(f.y), hermite(f.z));

    let corner = |x: f32, y: f32, z: f32| rand3(p0 + Vec3::new(x, y, z));

    let bottom = mix(
        mix(corner(0.0, 0.0, 0.0), corner(1.0, 0.0, 0.0), u.x),
        mix(corner(0.0, 1.0, 0.0), corner(1.0, 1.0, 0.0), u.x),
        u.y,
    );
    let top = mix(
        mix(corner(0.0, 0.0, 1.0), corner(1.0, 0.0, 1.0), u.x),
        mix(corner(0.0, 1.0, 1.0), corner(1.0, 1.0, 1.0), u.x),
        u.y,
    );
    mix(bottom, top, u.z)
}
