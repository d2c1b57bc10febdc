//! The static tuning table.
//!
//! One immutable [`ShaderConfig`] is resolved per build variant and passed by
//! reference into every component. `Default` is the reference table. Valued
//! toggles are `Option<f32>` and presence-only toggles are `bool`; a toggle
//! that is off is `None` / `false`.
//!
//! All sections use `#[serde(default)]`, so a RON file only needs to name
//! the knobs it changes.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Tone curve applied by color correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneCurveKind {
    Exponential,
    Reinhard,
    ExtendedReinhard,
    Aces,
}

impl ToneCurveKind {
    /// Numeric selector used by the reference table (1..=4).
    pub fn index(self) -> u32 {
        match self {
            ToneCurveKind::Exponential => 1,
            ToneCurveKind::Reinhard => 2,
            ToneCurveKind::ExtendedReinhard => 3,
            ToneCurveKind::Aces => 4,
        }
    }
}

/// Cloud algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloudKind {
    /// Flat boxes, legacy look.
    Vanilla,
    /// Single 2D noise evaluation.
    Soft,
    /// Raymarched rounded cells.
    Rounded,
}

impl CloudKind {
    pub fn index(self) -> u32 {
        match self {
            CloudKind::Vanilla => 0,
            CloudKind::Soft => 1,
            CloudKind::Rounded => 2,
        }
    }
}

/// End-dimension sky pattern selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndSkyKind {
    /// Slow rings around the horizon.
    Rings,
    /// Layered sine streaks.
    Streaks,
}

impl EndSkyKind {
    pub fn index(self) -> u32 {
        match self {
            EndSkyKind::Rings => 1,
            EndSkyKind::Streaks => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TonemapConfig {
    pub curve: ToneCurveKind,
    pub gamma: f32,
    pub exposure: f32,
    pub saturation: f32,
    /// Flat tint; off in the reference table.
    pub tint: Option<Vec3>,
    /// Tint applied to dark tones.
    pub tint_low: Vec3,
    /// Tint applied to bright tones.
    pub tint_high: Vec3,
}

impl Default for TonemapConfig {
    fn default() -> Self {
        Self {
            curve: ToneCurveKind::Aces,
            gamma: 1.12,
            exposure: 1.4,
            saturation: 0.9,
            tint: None,
            tint_low: Vec3::new(0.3, 0.5, 1.4),
            tint_high: Vec3::new(1.4, 0.7, 0.3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub sun_intensity: f32,
    pub torch_intensity: f32,
    pub night_brightness: f32,
    pub cave_brightness: f32,
    pub shadow_intensity: f32,
    pub blinking_torch: bool,
    /// Only meaningful with soft clouds.
    pub cloud_shadow: bool,
    pub morning_sun_col: Vec3,
    pub noon_sun_col: Vec3,
    pub night_sun_col: Vec3,
    pub nether_ambient: Vec3,
    pub end_ambient: Vec3,
    pub overworld_torch_col: Vec3,
    pub underwater_torch_col: Vec3,
    pub nether_torch_col: Vec3,
    pub end_torch_col: Vec3,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            sun_intensity: 1.95,
            torch_intensity: 0.75,
            night_brightness: 0.5,
            cave_brightness: 1.25,
            shadow_intensity: 0.9,
            blinking_torch: true,
            cloud_shadow: false,
            morning_sun_col: Vec3::new(1.0, 0.45, 0.12),
            noon_sun_col: Vec3::new(1.0, 0.62, 0.52),
            night_sun_col: Vec3::new(0.8, 0.67, 0.92),
            nether_ambient: Vec3::new(2.61, 2.40, 1.71),
            end_ambient: Vec3::new(0.48, 0.39, 0.96),
            overworld_torch_col: Vec3::new(1.0, 0.51, 0.3),
            underwater_torch_col: Vec3::new(0.035, 0.65, 0.405),
            nether_torch_col: Vec3::new(2.32, 1.54, 1.21),
            end_torch_col: Vec3::new(0.8, 0.42, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub fog: Option<f32>,
    pub mist_density: f32,
    pub rain_mist_opacity: Option<f32>,
    pub cloudy_fog: Option<f32>,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            fog: Some(1.0),
            mist_density: 1.85,
            rain_mist_opacity: Some(0.18),
            cloudy_fog: None,
        }
    }
}

/// Sky palette. Zenith is straight up, horizon the band at eye level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub day_zenith: Vec3,
    pub day_horizon: Vec3,
    pub night_zenith: Vec3,
    pub night_horizon: Vec3,
    pub dawn_zenith: Vec3,
    pub dawn_horizon: Vec3,
    pub dawn_edge: Vec3,
    pub rain_zenith: Vec3,
    pub rain_horizon: Vec3,
    pub end_zenith: Vec3,
    pub end_horizon: Vec3,
    pub end_sky: EndSkyKind,
    pub underwater_tint: Vec3,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            day_zenith: Vec3::new(0.36, 0.504, 1.0),
            day_horizon: Vec3::new(0.705, 0.88, 1.0),
            night_zenith: Vec3::new(0.001, 0.0, 0.01),
            night_horizon: Vec3::new(0.05, 0.11, 0.2),
            dawn_zenith: Vec3::new(0.12, 0.1, 0.16),
            dawn_horizon: Vec3::new(1.0, 0.35, 0.08),
            dawn_edge: Vec3::new(0.5, 0.115, 0.14),
            rain_zenith: Vec3::new(0.28, 0.3, 0.34),
            rain_horizon: Vec3::new(0.46, 0.51, 0.62),
            end_zenith: Vec3::new(0.04, 0.02, 0.1),
            end_horizon: Vec3::new(0.2, 0.08, 0.38),
            end_sky: EndSkyKind::Streaks,
            underwater_tint: Vec3::new(0.2, 1.0, 0.9),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainbowConfig {
    pub enabled: bool,
    /// Brightness during clear weather.
    pub clear: f32,
    /// Brightness during rain.
    pub rain: f32,
}

impl Default for RainbowConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            clear: 1.0,
            rain: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    /// Global emissive brightness.
    pub brightness: f32,
    /// Shimmer strength, 0 = flat, 1 = full modulation.
    pub shimmer: Option<f32>,
    pub shimmer_speed: f32,
    /// Fraction of brightness leaked into neighbouring texels.
    pub leak: Option<f32>,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            brightness: 4.4,
            shimmer: Some(1.0),
            shimmer_speed: 1.0,
            leak: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub plants: Option<f32>,
    pub lantern: Option<f32>,
    pub speed: f32,
    pub extra_plants: bool,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            plants: Some(0.05),
            lantern: Some(0.16),
            speed: 2.8,
            extra_plants: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub transparency: f32,
    pub bump: f32,
    pub wave_speed: f32,
    pub tex_opacity: f32,
    pub wave: bool,
    pub cloud_reflection: bool,
    pub refl_mask: bool,
    pub tint: Vec3,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            transparency: 0.53,
            bump: 0.01,
            wave_speed: 0.8,
            tex_opacity: 0.62,
            wave: true,
            cloud_reflection: false,
            refl_mask: false,
            tint: Vec3::new(0.15, 1.0, 0.6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderwaterConfig {
    pub brightness: f32,
    pub caustic_intensity: f32,
    pub wave: Option<f32>,
    /// Light streaks from above while submerged.
    pub streaks: Option<f32>,
}

impl Default for UnderwaterConfig {
    fn default() -> Self {
        Self {
            brightness: 2.15,
            caustic_intensity: 3.2,
            wave: Some(0.06),
            streaks: Some(2.0),
        }
    }
}

/// Vanilla box clouds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxCloudConfig {
    pub thickness: f32,
    pub rain_thickness: f32,
    pub opacity: f32,
    pub multilayer: bool,
    /// World units per box cell.
    pub cell_size: f32,
    pub speed: f32,
}

impl Default for BoxCloudConfig {
    fn default() -> Self {
        Self {
            thickness: 3.0,
            rain_thickness: 4.0,
            opacity: 1.0,
            multilayer: false,
            cell_size: 12.0,
            speed: 0.6,
        }
    }
}

/// Soft 2D noise clouds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoftCloudConfig {
    pub scale: Vec2,
    pub depth: f32,
    pub speed: f32,
    pub density: f32,
    pub opacity: f32,
}

impl Default for SoftCloudConfig {
    fn default() -> Self {
        Self {
            scale: Vec2::new(0.016, 0.022),
            depth: 1.4,
            speed: 0.04,
            density: 0.54,
            opacity: 0.99,
        }
    }
}

/// One raymarched cloud layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudLayerParams {
    /// Slab thickness in clear weather.
    pub thickness: f32,
    /// Slab thickness in full rain.
    pub rain_thickness: f32,
    pub steps: u32,
    /// Horizontal cells per world unit.
    pub scale: Vec2,
    /// Boxiness: (horizontal edge sharpness, vertical roundness), 0 round ~ 1 box.
    pub shape: Vec2,
    /// 1 blurry ~ 100 sharp.
    pub density: f32,
    pub velocity: f32,
    /// Vertical distance above the primary layer.
    pub offset: f32,
}

impl Default for CloudLayerParams {
    fn default() -> Self {
        Self {
            thickness: 2.4,
            rain_thickness: 2.6,
            steps: 5,
            scale: Vec2::splat(0.033),
            shape: Vec2::new(0.35, 0.5),
            density: 100.0,
            velocity: 1.2,
            offset: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundedCloudConfig {
    pub layer1: CloudLayerParams,
    pub layer2_enabled: bool,
    pub layer2: CloudLayerParams,
}

impl Default for RoundedCloudConfig {
    fn default() -> Self {
        Self {
            layer1: CloudLayerParams::default(),
            layer2_enabled: false,
            layer2: CloudLayerParams {
                thickness: 2.2,
                rain_thickness: 2.4,
                steps: 3,
                scale: Vec2::splat(0.033),
                shape: Vec2::new(0.35, 0.5),
                density: 50.0,
                velocity: 0.8,
                offset: 143.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudsConfig {
    pub kind: CloudKind,
    pub vanilla: BoxCloudConfig,
    pub soft: SoftCloudConfig,
    pub rounded: RoundedCloudConfig,
}

impl Default for CloudsConfig {
    fn default() -> Self {
        Self {
            kind: CloudKind::Rounded,
            vanilla: BoxCloudConfig::default(),
            soft: SoftCloudConfig::default(),
            rounded: RoundedCloudConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuroraConfig {
    pub intensity: Option<f32>,
    pub velocity: f32,
    pub scale: f32,
    /// Curtain line width.
    pub width: f32,
    pub col1: Vec3,
    pub col2: Vec3,
}

impl Default for AuroraConfig {
    fn default() -> Self {
        Self {
            intensity: Some(4.0),
            velocity: 0.04,
            scale: 0.14,
            width: 0.34,
            col1: Vec3::new(0.0, 0.5, 1.0),
            col2: Vec3::new(0.0, 0.8, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootingStarConfig {
    pub intensity: Option<f32>,
    /// Seconds per streak.
    pub period: f32,
    /// Idle seconds between streaks.
    pub delay: f32,
}

impl Default for ShootingStarConfig {
    fn default() -> Self {
        Self {
            intensity: Some(2.0),
            period: 6.0,
            delay: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    pub intensity: Option<f32>,
    pub end_intensity: Option<f32>,
    /// 0 white ~ 1 colorful.
    pub vibrance: f32,
    pub speed: f32,
    pub day_visibility: f32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            intensity: None,
            end_intensity: None,
            vibrance: 0.4,
            speed: 0.03,
            day_visibility: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarsConfig {
    pub intensity: Option<f32>,
    pub end_intensity: Option<f32>,
    pub day_visibility: f32,
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            intensity: None,
            end_intensity: None,
            day_visibility: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunMoonConfig {
    /// Tilt in degrees.
    pub angle: Option<f32>,
    pub size: f32,
    pub godray: Option<f32>,
    pub bloom: bool,
    pub sun_bloom: f32,
    pub moon_bloom: f32,
    pub sun_bloom_col: Vec3,
    pub moon_bloom_col: Vec3,
}

impl Default for SunMoonConfig {
    fn default() -> Self {
        Self {
            angle: Some(35.0),
            size: 1.15,
            godray: Some(0.8),
            bloom: true,
            sun_bloom: 0.1,
            moon_bloom: 0.5,
            sun_bloom_col: Vec3::new(0.75, 0.25, 0.0),
            moon_bloom_col: Vec3::new(0.7, 0.7, 0.75),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackHoleConfig {
    pub enabled: bool,
    pub speed: f32,
    /// Distance scale; larger values shrink the hole.
    pub dist: f32,
    pub col_low: Vec3,
    pub col_high: Vec3,
}

impl Default for BlackHoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 1.0,
            dist: 2.0,
            col_low: Vec3::new(1.0, 0.3, 0.08),
            col_high: Vec3::new(1.0, 0.85, 0.6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectionConfig {
    pub ground: Option<f32>,
    pub rain_wetness: f32,
    pub rain_puddles: f32,
    pub aurora: bool,
    pub force_only_end: bool,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            ground: Some(0.6),
            rain_wetness: 1.0,
            rain_puddles: 0.8,
            aurora: false,
            force_only_end: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    pub brightness: f32,
    pub edge_highlight: f32,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            brightness: 0.9,
            edge_highlight: 0.35,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub speck: Option<f32>,
    pub rain_slant: f32,
    pub particle_size: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            speck: Some(0.6),
            rain_slant: 4.0,
            particle_size: 1.2,
        }
    }
}

/// The complete tuning table, one section per visual subsystem.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    pub tonemap: TonemapConfig,
    pub terrain: TerrainConfig,
    pub fog: FogConfig,
    pub sky: SkyConfig,
    pub rainbow: RainbowConfig,
    pub glow: GlowConfig,
    pub wave: WaveConfig,
    pub water: WaterConfig,
    pub underwater: UnderwaterConfig,
    pub clouds: CloudsConfig,
    pub aurora: AuroraConfig,
    pub shooting_star: ShootingStarConfig,
    pub galaxy: GalaxyConfig,
    pub stars: StarsConfig,
    pub sun_moon: SunMoonConfig,
    pub black_hole: BlackHoleConfig,
    pub reflection: ReflectionConfig,
    pub entity: EntityConfig,
    pub weather: WeatherConfig,
    /// Chunk slide-in distance; negative falls from above.
    pub chunk_load_anim: Option<f32>,
}
