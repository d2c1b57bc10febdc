//! End-dimension sky patterns and the black hole.

use glam::{Vec3, Vec4};
use skyshade_core::config::{BlackHoleConfig, EndSkyKind};
use skyshade_core::constants::END_HORIZON_TINT;
use skyshade_core::math::{mix, rotate_xy, smoothstep};

/// End sky algorithm, fixed per build.
pub trait EndSkyStyle {
    const KIND: EndSkyKind;

    /// `view_dir` has y pointing down (already flipped by the sky renderer).
    fn render(horizon: Vec3, zenith: Vec3, view_dir: Vec3, t: f32) -> Vec3;
}

/// Type 1: slow rings around the horizon.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndRings;

/// Type 2: layered sine streaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndStreaks;

impl EndSkyStyle for EndRings {
    const KIND: EndSkyKind = EndSkyKind::Rings;

    fn render(_horizon: Vec3, zenith: Vec3, view_dir: Vec3, t: f32) -> Vec3 {
        let y = smoothstep(-1.2, 1.5, view_dir.y.abs());
        let a = view_dir.x.atan2(view_dir.z);

        let mut s = (a * 7.0 + 0.5 * t).sin();
        s *= s;
        s *= 0.1 + 0.4 * (a * 11.0 - 0.22 * t).sin();
        let g = smoothstep(1.2 - s, -1.7, y);

        let f = g + 1.5 * smoothstep(1.0, -0.1, y);
        let h = g + 1.2 * smoothstep(1.8, -0.8, y);
        let tint = Vec3::from_array(END_HORIZON_TINT);

        let g4 = g * g * g * g;
        let h4 = h * h * h * h;
        mix(zenith, tint, f * f) + Vec3::splat(g4 * 0.6 + 0.4 * h4)
    }
}

impl EndSkyStyle for EndStreaks {
    const KIND: EndSkyKind = EndSkyKind::Streaks;

    fn render(horizon: Vec3, zenith: Vec3, view_dir: Vec3, t: f32) -> Vec3 {
        let a = view_dir.x.atan2(view_dir.z);

        let n1 = 0.6 + 0.5 * (11.0 * a + t + view_dir.x * view_dir.y).sin();
        let n2 = 0.6 + 0.5 * (5.0 * a + 0.5 * t + 7.0 * n1 + 0.1 * (40.0 * a - 4.0 * t).sin()).sin();

        let waves = 0.5 * n2 * n1 + 0.4 * n1;
        let grad = 0.5 + 0.5 * view_dir.y;
        let mut streaks = waves * (1.0 - grad * grad * grad);
        streaks += (0.8 - streaks) * smoothstep(0.1 - waves, -1.0, view_dir.y);

        let f = 0.6 * streaks + 0.4 * smoothstep(1.0, -0.5, view_dir.y);
        let h = streaks * streaks;
        let mut g = h * h;
        g *= g;

        let tint = Vec3::from_array(END_HORIZON_TINT);
        let mut sky = mix(zenith, tint, f * f * f);
        sky += (0.1 * streaks + 2.0 * g * g * g + h * h * h) * tint;
        sky += 0.2 * streaks * horizon;
        sky
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackHoleParams {
    pub speed: f32,
    pub dist: f32,
    pub col_low: Vec3,
    pub col_high: Vec3,
}

impl From<&BlackHoleConfig> for BlackHoleParams {
    fn from(cfg: &BlackHoleConfig) -> Self {
        Self {
            speed: cfg.speed,
            dist: cfg.dist,
            col_low: cfg.col_low,
            col_high: cfg.col_high,
        }
    }
}

/// Procedural black hole. `rgb` is additive light, `w` is how much of the
/// background survives (0 at the core, 1 far away).
pub fn render_blackhole(view_dir: Vec3, t: f32, params: &BlackHoleParams) -> Vec4 {
    let t = t * params.speed;

    let r = 2.2 + 0.0001 * t;
    let vr = rotate_xy(view_dir, r);

    let vd = vr - Vec3::new(0.0, -1.0, 0.0);
    let nl = (15.0 * vd.x + t).sin() * (15.0 * vd.y - t).sin() * (15.0 * vd.z + t).sin();
    let a = vd.x.atan2(vd.z);

    let d = params.dist * (vd + Vec3::splat(0.003 * nl)).length();
    let d0 = (0.6 - d) / 0.6;
    let dm0 = 1.0 - d0.max(0.0);

    let gl = 1.0 - (-0.3 * d0).clamp(0.0, 1.0);
    let gla = (1.0 - d0.abs().min(1.0)).powi(8);
    let gl8 = gl.powi(8);

    let hole = 0.9 * dm0.powi(32) + 0.1 * dm0.powi(3);
    let mut bh = (gla + 0.8 * gl8 + 0.2 * gl8 * gl8) * hole;

    let mut df = (3.0 * a - 4.0 * d + 24.0 * (1.4 - d).powi(4) + t).sin();
    df *= 0.9 + 0.1 * (8.0 * a + d + 4.0 * t - 4.0 * df).sin();
    bh *= 1.0 + df.powi(4) * hole * (1.0 - bh).max(0.0);

    let col = bh * 4.0 * mix(params.col_low, params.col_high, bh.min(1.0));
    col.extend(hole)
}
