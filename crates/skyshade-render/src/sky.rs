//! Sky renderer: gradient, additive passes, and the reflection variant.
//!
//! [`render_sky`] flips `view_dir.y` before anything else; the host's view
//! vectors point from the sky toward the camera.

use glam::Vec3;
use skyshade_core::config::ShaderConfig;
use skyshade_core::math::{mix, smoothstep, spectrum};

use crate::end::{BlackHoleParams, EndSkyStyle};
use crate::env::Environment;
use crate::sky_color::SkyColor;

/// Per-build sky knobs, copied out of the config once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyParams {
    pub morning_sun_col: Vec3,
    pub rainbow_clear: f32,
    pub rainbow_rain: f32,
    pub underwater_streaks: f32,
    pub black_hole: BlackHoleParams,
}

impl SkyParams {
    pub fn from_config(cfg: &ShaderConfig) -> Self {
        Self {
            morning_sun_col: cfg.terrain.morning_sun_col,
            rainbow_clear: cfg.rainbow.clear,
            rainbow_rain: cfg.rainbow.rain,
            underwater_streaks: cfg.underwater.streaks.unwrap_or(0.0),
            black_hole: BlackHoleParams::from(&cfg.black_hole),
        }
    }
}

/// Three-stop vertical gradient: zenith, horizon, horizon edge.
///
/// The edge color is blended into the horizon first, then the result into
/// the zenith, so all three stops show near eye level.
///
/// Below the horizon the falloff term is cubed before squaring, so the nadir
/// separates from the horizon band much faster than the zenith does.
pub fn render_overworld_sky(colors: &SkyColor, view_dir: Vec3) -> Vec3 {
    let h = 1.0 - view_dir.y * view_dir.y;
    let mut hsq = h * h;
    if view_dir.y < 0.0 {
        hsq *= hsq * hsq;
        hsq *= hsq;
    }

    let mut gradient1 = hsq * hsq;
    gradient1 *= gradient1;
    let gradient2 = 0.6 * gradient1 + 0.4 * hsq;
    gradient1 *= gradient1;

    let horizon = mix(colors.horizon, colors.horizon_edge, gradient1);
    mix(colors.zenith, horizon, gradient2)
}

/// Sunrise/sunset glow spreading sideways along the horizon.
pub fn sun_bloom(view_x: f32, horizon_edge: Vec3, fog_color: Vec3, sun_col: Vec3) -> Vec3 {
    let mut factor = fog_color.x / (0.01 + fog_color.length());
    factor *= factor;
    factor *= factor;

    let spread = smoothstep(0.0, 1.0, view_x.abs());
    let mut bloom = spread * spread;
    bloom = 0.5 * spread + bloom * bloom * bloom * 1.5;

    sun_col * horizon_edge * (bloom * factor * factor)
}

pub fn rainbow_band(view_dir: Vec3, fog_color: Vec3, rain_factor: f32, clear: f32, rain: f32) -> Vec3 {
    mix(clear, rain, rain_factor)
        * spectrum((view_dir.z + 0.6) * 8.0)
        * view_dir.y.max(0.0)
        * fog_color.y
}

/// Light shafts seen from below the water surface.
pub fn underwater_streaks(view_dir: Vec3, horizon: Vec3, t: f32, intensity: f32) -> Vec3 {
    let a = view_dir.x.atan2(view_dir.z);
    let grad = (0.5 + 0.5 * view_dir.y).powi(6);

    let mut spread = 0.5 + 0.5 * (9.0 * a + 0.2 * t + 2.0 * (5.0 * a - 0.4 * t).sin()).sin();
    spread *= (0.5 + 0.5 * (6.0 * a - (0.5 * t).sin()).sin()) * grad;
    spread += (1.0 - spread) * grad;

    let mut streaks = spread * spread;
    streaks *= streaks;
    streaks = spread + 3.0 * grad * grad + 4.0 * streaks * streaks;

    intensity * streaks * horizon
}

/// Sun glint on reflective planes, strongest when facing a low red sun.
pub fn sky_specular(view_dir: Vec3, horizon_edge: Vec3, fog_color: Vec3) -> Vec3 {
    let mut specular = smoothstep(0.7, 0.0, view_dir.z.abs());
    specular *= specular * view_dir.x;
    specular *= specular;
    specular += specular * specular * specular * specular;
    specular *= (fog_color.x - fog_color.z).max(0.0);
    5.0 * horizon_edge * specular * specular
}

/// Full sky color for one view direction.
#[cfg_attr(
    not(any(feature = "rainbow", feature = "sun-bloom")),
    allow(unused_variables)
)]
pub fn render_sky<E: EndSkyStyle>(
    params: &SkyParams,
    colors: &SkyColor,
    env: &Environment,
    view_dir: Vec3,
    fog_color: Vec3,
    t: f32,
) -> Vec3 {
    let v = Vec3::new(view_dir.x, -view_dir.y, view_dir.z);

    if env.end {
        let sky = E::render(colors.horizon, colors.zenith, v, t);
        #[cfg(feature = "end-blackhole")]
        let sky = {
            let bh = crate::end::render_blackhole(v, t, &params.black_hole);
            sky * bh.w + bh.truncate()
        };
        return sky;
    }

    let sky = render_overworld_sky(colors, v);

    #[cfg(feature = "rainbow")]
    let sky = sky
        + rainbow_band(
            v,
            fog_color,
            env.rain_factor,
            params.rainbow_clear,
            params.rainbow_rain,
        );

    #[cfg(feature = "underwater-streaks")]
    {
        if env.underwater {
            return sky + underwater_streaks(v, colors.horizon, t, params.underwater_streaks);
        }
    }

    #[cfg(feature = "sun-bloom")]
    let sky = if env.nether {
        sky
    } else {
        sky + sun_bloom(v.x, colors.horizon_edge, fog_color, params.morning_sun_col)
    };

    sky
}

/// Sky as seen in a reflective plane, with a specular sun glint.
pub fn sky_reflection<E: EndSkyStyle>(
    params: &SkyParams,
    colors: &SkyColor,
    env: &Environment,
    view_dir: Vec3,
    fog_color: Vec3,
    t: f32,
) -> Vec3 {
    let refl = render_sky::<E>(params, colors, env, view_dir, fog_color, t);
    if env.underwater || env.nether {
        return refl;
    }
    refl + sky_specular(view_dir, colors.horizon_edge, fog_color)
}
