//! Night-sky objects: shooting star, galaxy, twinkling stars.
//!
//! Each function returns additive RGB; the caller decides intensity and
//! compositing order.

use glam::{Vec2, Vec3};
use skyshade_core::config::ShaderConfig;
use skyshade_core::constants::{DAYLIGHT_WEIGHTS, SHOOTING_STAR_COL};
use skyshade_core::math::{fract, mix, smoothstep};
use skyshade_core::noise::{noise3d, rand_star};

use crate::env::Environment;

/// Per-build celestial knobs. Disabled layers resolve to zero intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialParams {
    pub shooting_star: f32,
    pub shooting_star_period: f32,
    pub shooting_star_delay: f32,
    pub galaxy: f32,
    pub end_galaxy: f32,
    pub galaxy_vibrance: f32,
    pub galaxy_speed: f32,
    pub galaxy_day_visibility: f32,
    pub stars: f32,
    pub end_stars: f32,
    pub stars_day_visibility: f32,
}

impl CelestialParams {
    pub fn from_config(cfg: &ShaderConfig) -> Self {
        Self {
            shooting_star: cfg.shooting_star.intensity.unwrap_or(0.0),
            shooting_star_period: cfg.shooting_star.period,
            shooting_star_delay: cfg.shooting_star.delay,
            galaxy: cfg.galaxy.intensity.unwrap_or(0.0),
            end_galaxy: cfg.galaxy.end_intensity.unwrap_or(0.0),
            galaxy_vibrance: cfg.galaxy.vibrance,
            galaxy_speed: cfg.galaxy.speed,
            galaxy_day_visibility: cfg.galaxy.day_visibility,
            stars: cfg.stars.intensity.unwrap_or(0.0),
            end_stars: cfg.stars.end_intensity.unwrap_or(0.0),
            stars_day_visibility: cfg.stars.day_visibility,
        }
    }
}

/// Fraction of the active period after which the streak starts fading.
const SHOOTING_STAR_WINDOW_START: f32 = 0.3;
/// Fraction of the active period after which the streak is fully gone.
const SHOOTING_STAR_WINDOW_END: f32 = 0.45;

/// Index of the shooting-star cycle that contains time `t`.
pub fn shooting_star_cycle(t: f32, period: f32, delay: f32) -> f32 {
    (t / (delay + period)).floor()
}

/// One streak per cycle; direction and size are picked from the cycle index.
///
/// Within a cycle the streak crosses the sky early in the first `period`
/// seconds, is gone before mid-period, and stays dark for the remaining
/// `delay` seconds.
pub fn shooting_star(view_dir: Vec3, fog_color: Vec3, t: f32, period: f32, delay: f32) -> Vec3 {
    let cycle = delay + period;
    let h = t / cycle;
    let h0 = h.floor();
    let local = (cycle * (h - h0) / period).min(1.0);
    let t0 = local * local;
    let mut t1 = 1.0 - t0;
    t1 *= t1;
    t1 *= t1;
    t1 *= t1;

    let r = fract(h0.sin() * 43758.545313);
    let (sina, cosa) = (6.2831 * r).sin_cos();
    let uv = Vec2::new(view_dir.x, view_dir.z) * (6.0 + 4.0 * r);
    let mut uv = Vec2::new(cosa * uv.x + sina * uv.y, -sina * uv.x + cosa * uv.y);
    uv.x += t1 - local;
    uv.x -= 2.0 * r + 3.5;
    uv.y += view_dir.y * 3.0;

    // head glow
    let g = 1.0 - ((uv.x - 0.95).abs() * 20.0).min(1.0);
    // line
    let mut s = 1.0 - (8.0 * uv.y).abs().min(1.0);
    // tail decay
    s *= s * s * smoothstep(-1.0 + 1.96 * t1, 0.98 - local, uv.x);
    // head decay
    s *= s * s * smoothstep(1.0, 0.98 - t0, uv.x);
    s *= 1.0 - t1;
    s *= 1.0 - t0;
    s *= 0.7 + 16.0 * g * g;
    // visibility window: closed once the tail has passed
    s *= smoothstep(SHOOTING_STAR_WINDOW_END, SHOOTING_STAR_WINDOW_START, local);
    s *= (1.0 - fog_color.x - fog_color.y - fog_color.z).max(0.0);

    s * Vec3::from_array(SHOOTING_STAR_COL)
}

fn day_factor(fog_color: Vec3) -> f32 {
    fog_color.dot(Vec3::from_array(DAYLIGHT_WEIGHTS)).min(1.0)
}

/// Rotating galaxy band with a noise starfield.
///
/// Returns black underwater unless built with `galaxy-underwater`.
pub fn galaxy(
    view_dir: Vec3,
    fog_color: Vec3,
    env: &Environment,
    t: f32,
    params: &CelestialParams,
) -> Vec3 {
    #[cfg(not(feature = "galaxy-underwater"))]
    {
        if env.underwater {
            return Vec3::ZERO;
        }
    }

    let t = t * params.galaxy_speed;

    let cosb = (0.2 * t).sin();
    let sinb = (0.2 * t).cos();
    let v = Vec3::new(
        cosb * view_dir.x - sinb * view_dir.y,
        sinb * view_dir.x + cosb * view_dir.y,
        view_dir.z,
    );

    let n0 = 0.5 + 0.5 * (5.0 * v.x).sin() * (5.0 * v.y - 0.5 * t).sin() * (5.0 * v.z + 0.5 * t).sin();
    let n1 = noise3d(15.0 * v + Vec3::splat((0.85 * t + 1.3).sin()));
    let n2 = noise3d(50.0 * v + Vec3::splat(n1 + (0.7 * t + 1.0).sin()));
    let n3 = noise3d(200.0 * v - Vec3::splat(10.0 * (0.4 * t + 0.5).sin()));

    // stars
    let n3 = smoothstep(0.04, 0.3, n3 + 0.02 * n2);
    let gd = v.x + 0.1 * v.y + 0.1 * (10.0 * v.z + 0.2 * t).sin();
    let st = n1 * n2 * n3 * n3 * (1.0 + 70.0 * gd * gd);
    let st = (1.0 - st) / (1.0 + 400.0 * st);
    let hue = Vec3::new(8.0, 6.0, 10.0) * (2.0 * n1 + 0.8 * n2) + Vec3::new(0.0, 0.4, 0.82);
    let mut stars = (Vec3::splat(0.8) + 0.2 * Vec3::new(hue.x.sin(), hue.y.sin(), hue.z.sin())) * st;

    // glow band
    let mask = v.x.abs() - 0.15 * n1 + 0.04 * n2 + 0.25 * n0;
    let mut gf = 1.0 - (v.x * v.x + 0.03 * n1 + 0.2 * n0);
    gf *= gf;
    gf *= gf * gf;
    gf *= 1.0 - 0.3 * smoothstep(0.2, 0.3, mask);
    gf *= 1.0 - 0.2 * smoothstep(0.3, 0.4, mask);
    gf *= 1.0 - 0.1 * smoothstep(0.2, 0.1, mask);
    let gfcol = Vec3::new(n0, (2.0 * v.y).cos(), (v.x + n0).sin()).normalize_or_zero();
    stars += (0.4 * gf + 0.012) * mix(Vec3::splat(0.5), gfcol * gfcol, params.galaxy_vibrance);

    stars *= mix(1.0, params.galaxy_day_visibility, day_factor(fog_color));

    stars * (1.0 - env.rain_factor)
}

/// Sparse twinkling points. Daylight hides them everywhere but the end.
pub fn stars(view_dir: Vec3, fog_color: Vec3, env: &Environment, t: f32, day_visibility: f32) -> Vec3 {
    let tv = Vec3::splat(t);
    let mut s = rand_star(view_dir * 230.0).clamp(0.0, 8.0).powi(20);
    let f = 0.5 + 0.5 * (rand_star(view_dir * 180.0 + tv) * 6.28 + t * 0.5).sin();
    s *= mix(0.4, 1.4, rand_star(view_dir * 100.0 + tv)) * f;
    if !env.end {
        let a = mix(1.0, day_visibility, day_factor(fog_color));
        s *= a * (1.0 - 3.0 * fog_color.z.max(fog_color.y)).max(0.0);
    }

    Vec3::splat(s) * (1.0 - env.rain_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::DimensionFlags;

    /// Direction that puts the cycle-0 streak head on screen at t = 0.5.
    fn streak_dir() -> Vec3 {
        let vx = 0.5979f32;
        let k = ((1.0 - vx * vx) / 1.25).sqrt();
        Vec3::new(vx, k, -0.5 * k)
    }

    #[test]
    fn test_cycle_index() {
        assert_eq!(shooting_star_cycle(0.0, 6.0, 0.0), 0.0);
        assert_eq!(shooting_star_cycle(5.99, 6.0, 0.0), 0.0);
        assert_eq!(shooting_star_cycle(6.0, 6.0, 0.0), 1.0);
        assert_eq!(shooting_star_cycle(13.0, 6.0, 0.0), 2.0);
        assert_eq!(shooting_star_cycle(13.0, 6.0, 4.0), 1.0);
    }

    #[test]
    fn test_shooting_star_visible_early_in_cycle() {
        let c = shooting_star(streak_dir(), Vec3::ZERO, 0.5, 6.0, 0.0);
        assert!(c.x > 0.0, "expected streak, got {c}");
    }

    #[test]
    fn test_shooting_star_dark_at_cycle_start() {
        // The fade-in term is exactly zero when a cycle starts.
        let v = streak_dir();
        for t in [0.0, 6.0, 12.0] {
            assert_eq!(shooting_star(v, Vec3::ZERO, t, 6.0, 0.0), Vec3::ZERO);
        }
    }

    #[test]
    fn test_shooting_star_dark_during_delay() {
        // period 2, delay 4: seconds 2..6 of every cycle are idle.
        for i in 0..39 {
            let t = 2.05 + i as f32 * 0.1;
            for v in [streak_dir(), Vec3::new(0.3, 0.9, 0.3).normalize()] {
                assert_eq!(shooting_star(v, Vec3::ZERO, t, 2.0, 4.0), Vec3::ZERO);
            }
        }
    }

    #[test]
    fn test_shooting_star_gone_by_mid_period() {
        let mut early = 0.0f32;
        for t in [0.25f32, 0.5, 0.75] {
            assert_eq!(shooting_star_cycle(t, 6.0, 0.0), 0.0);
            early = early.max(shooting_star(streak_dir(), Vec3::ZERO, t, 6.0, 0.0).x);
        }
        assert!(early > 0.0, "no streak in the first second");

        assert_eq!(shooting_star_cycle(3.0, 6.0, 0.0), (3.0f32 / 6.0).floor());
        for i in 0..200 {
            for j in 0..100 {
                let yaw = i as f32 / 200.0 * std::f32::consts::TAU;
                let pitch = j as f32 / 100.0 * std::f32::consts::FRAC_PI_2;
                let (sp, cp) = pitch.sin_cos();
                let v = Vec3::new(cp * yaw.cos(), sp, cp * yaw.sin());
                assert_eq!(shooting_star(v, Vec3::ZERO, 3.0, 6.0, 0.0), Vec3::ZERO, "{v}");
            }
        }
    }

    #[test]
    fn test_shooting_star_hidden_by_daylight() {
        let c = shooting_star(streak_dir(), Vec3::splat(0.4), 0.5, 6.0, 0.0);
        assert_eq!(c, Vec3::ZERO);
    }

    #[test]
    fn test_galaxy_finite_and_rain_scaled() {
        let p = CelestialParams::from_config(&ShaderConfig::default());
        let clear = Environment::overworld();
        let rain = Environment::new(DimensionFlags::default(), 1.0);
        for i in 0..32 {
            let a = i as f32 * 0.2;
            let v = Vec3::new(a.cos() * 0.6, 0.8, a.sin() * 0.6);
            let g = galaxy(v, Vec3::ZERO, &clear, 3.0, &p);
            assert!(g.is_finite());
            assert_eq!(galaxy(v, Vec3::ZERO, &rain, 3.0, &p), Vec3::ZERO);
        }
    }

    #[cfg(not(feature = "galaxy-underwater"))]
    #[test]
    fn test_galaxy_suppressed_underwater() {
        let p = CelestialParams::from_config(&ShaderConfig::default());
        let env = Environment::new(
            DimensionFlags {
                underwater: true,
                ..Default::default()
            },
            0.0,
        );
        assert_eq!(galaxy(Vec3::Y, Vec3::ZERO, &env, 1.0, &p), Vec3::ZERO);
    }

    #[test]
    fn test_galaxy_day_visibility() {
        let p = CelestialParams::from_config(&ShaderConfig::default());
        let env = Environment::overworld();
        let v = Vec3::new(0.9, 0.0, 0.3).normalize();
        // Reference day visibility is zero: full daylight hides the band.
        assert_eq!(galaxy(v, Vec3::ONE, &env, 1.0, &p), Vec3::ZERO);
        assert!(galaxy(v, Vec3::ZERO, &env, 1.0, &p).max_element() > 0.0);
    }

    #[test]
    fn test_stars_sparse() {
        let env = Environment::overworld();
        let mut bright = 0;
        let total = 64 * 64;
        for i in 0..64 {
            for j in 0..64 {
                let v = Vec3::new(i as f32 / 64.0 - 0.5, 1.0, j as f32 / 64.0 - 0.5).normalize();
                let s = stars(v, Vec3::ZERO, &env, 0.0, 0.0);
                assert!(s.is_finite() && s.x >= 0.0);
                if s.x > 0.3 {
                    bright += 1;
                }
            }
        }
        assert!(bright > 0);
        assert!(bright * 10 < total, "too many bright stars: {bright}");
    }

    #[test]
    fn test_stars_day_and_rain() {
        let v = Vec3::new(0.2, 0.9, 0.1).normalize();
        let day = Environment::overworld();
        assert_eq!(stars(v, Vec3::splat(0.5), &day, 0.0, 0.0), Vec3::ZERO);
        let rain = Environment::new(DimensionFlags::default(), 1.0);
        assert_eq!(stars(v, Vec3::ZERO, &rain, 0.0, 0.0), Vec3::ZERO);
    }

    #[test]
    fn test_end_stars_ignore_daylight() {
        let env = Environment::new(
            DimensionFlags {
                end: true,
                ..Default::default()
            },
            0.0,
        );
        let mut any = false;
        for i in 0..200 {
            let v = Vec3::new(i as f32 * 0.01 - 1.0, 0.7, 0.3).normalize();
            let s = stars(v, Vec3::ONE, &env, 0.0, 0.0);
            if s.x > 0.0 {
                any = true;
            }
        }
        assert!(any);
    }
}
