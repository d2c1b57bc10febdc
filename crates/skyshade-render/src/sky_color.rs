//! Sky color model: the three characteristic colors of a frame.
//!
//! The fog color is the only signal about time of day and weather. Its
//! channel relationships are read through [`sky_factors`]; nothing here
//! models a physical atmosphere.

use glam::Vec3;
use skyshade_core::config::SkyConfig;
use skyshade_core::math::mix;

use crate::env::Environment;

/// Zenith, horizon, and horizon-edge colors. Components are unclamped and
/// may exceed 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SkyColor {
    pub zenith: Vec3,
    pub horizon: Vec3,
    pub horizon_edge: Vec3,
}

/// Heuristics read from the fog color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyFactors {
    /// Overall daylight intensity.
    pub intensity: f32,
    /// How much the viewer faces a low sun (red exceeding blue).
    pub sun_view: f32,
    /// Rain brightness, squared.
    pub rain_brightness: f32,
}

pub fn sky_factors(fog_color: Vec3) -> SkyFactors {
    let rain = fog_color.y.min(0.26);
    SkyFactors {
        intensity: (fog_color.x * 0.6).max(fog_color.y.max(fog_color.z)),
        sun_view: 1.5 * (fog_color.x - fog_color.z).max(0.0),
        rain_brightness: rain * rain,
    }
}

pub fn zenith_col(sky: &SkyConfig, rain_factor: f32, fog_color: Vec3, fs: SkyFactors) -> Vec3 {
    let i = fs.intensity;
    let mut zenith = sky.night_zenith * (1.0 - fog_color.z);
    zenith += sky.dawn_zenith * ((0.7 * i * i) + (0.4 * i) + fs.sun_view);
    zenith = mix(zenith, (0.7 * i * i + 0.3 * i) * sky.day_zenith, i * i);
    mix(
        zenith * (1.0 + 0.5 * rain_factor),
        sky.rain_zenith * fs.rain_brightness * 13.2,
        rain_factor,
    )
}

pub fn horizon_col(sky: &SkyConfig, rain_factor: f32, fog_color: Vec3, fs: SkyFactors) -> Vec3 {
    let i = fs.intensity;
    let mut horizon = sky.night_horizon * (1.0 - fog_color.z);
    horizon += sky.dawn_horizon * (((0.7 * i * i) + (0.3 * i) + fs.sun_view) * 1.9);
    horizon = mix(horizon, 2.0 * i * sky.day_horizon, i * i);
    mix(
        horizon,
        sky.rain_horizon * fs.rain_brightness * 19.6,
        rain_factor,
    )
}

/// Warm sunset fringe laid over the horizon color.
pub fn horizon_edge_col(sky: &SkyConfig, horizon: Vec3, rain_factor: f32, fog_color: Vec3) -> Vec3 {
    let val = 2.1 * (1.1 - fog_color.z) * fog_color.y * (1.0 - rain_factor);
    horizon * (Vec3::splat(1.0 - val) + sky.dawn_edge * val)
}

pub fn underwater_col(sky: &SkyConfig, fog_color: Vec3) -> Vec3 {
    2.0 * sky.underwater_tint * fog_color * fog_color
}

pub fn overworld_sky_colors(sky: &SkyConfig, rain_factor: f32, fog_color: Vec3) -> SkyColor {
    let fs = sky_factors(fog_color);
    let horizon = horizon_col(sky, rain_factor, fog_color, fs);
    SkyColor {
        zenith: zenith_col(sky, rain_factor, fog_color, fs),
        horizon,
        horizon_edge: horizon_edge_col(sky, horizon, rain_factor, fog_color),
    }
}

/// Flat palette derived from the fog color alone.
pub fn underwater_sky_colors(sky: &SkyConfig, fog_color: Vec3) -> SkyColor {
    let c = underwater_col(sky, fog_color);
    SkyColor {
        zenith: c,
        horizon: c,
        horizon_edge: c,
    }
}

/// Fixed palette; fog color and rain are ignored.
pub fn end_sky_colors(sky: &SkyConfig) -> SkyColor {
    SkyColor {
        zenith: sky.end_zenith,
        horizon: sky.end_horizon,
        horizon_edge: sky.end_horizon,
    }
}

/// Exactly one variant populates the colors: underwater, then end, then overworld.
pub fn sky_colors(sky: &SkyConfig, env: &Environment, fog_color: Vec3) -> SkyColor {
    if env.underwater {
        underwater_sky_colors(sky, fog_color)
    } else if env.end {
        end_sky_colors(sky)
    } else {
        overworld_sky_colors(sky, env.rain_factor, fog_color)
    }
}
