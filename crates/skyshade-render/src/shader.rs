//! The resolved shader: one build variant, ready to shade fragments.
//!
//! `Shader::new` is the only place configuration is inspected. It checks
//! that the compiled algorithm types and cargo features agree with the
//! resolved config, then copies every knob the fragment path needs into
//! plain parameter structs.

use std::marker::PhantomData;

use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use skyshade_config::ResolvedConfig;
use skyshade_core::config::{ShaderConfig, SkyConfig};

use crate::aurora::AuroraParams;
use crate::celestial::CelestialParams;
use crate::clouds::{CloudStyle, RoundedClouds};
use crate::end::{EndSkyStyle, EndStreaks};
use crate::env::Environment;
use crate::error::RenderError;
use crate::glow::{self, GlowParams};
use crate::sky::{self, SkyParams};
use crate::sky_color::{self, SkyColor};
use crate::texture::TexelSource;
use crate::tonemap::{color_correction, Aces, GradeParams, ToneCurve};
use crate::uniforms::FrameUniforms;

/// The variant built by the reference configuration.
pub type DefaultShader = Shader<RoundedClouds, EndStreaks, Aces>;

/// Per-fragment host inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentInputs {
    /// Unit view direction in world space, y up.
    pub view_dir: Vec3,
    /// Camera-relative point on the cloud plane along `view_dir`.
    pub position: Vec3,
    pub fog_color: Vec3,
    pub env: Environment,
    /// Seconds.
    pub time: f32,
}

#[derive(Debug, Clone)]
pub struct Shader<C: CloudStyle, E: EndSkyStyle, T: ToneCurve> {
    sky_config: SkyConfig,
    sky: SkyParams,
    clouds: C::Params,
    celestial: CelestialParams,
    aurora: AuroraParams,
    glow: GlowParams,
    grade: GradeParams,
    _variant: PhantomData<(E, T)>,
}

/// `(feature name, compiled in, enabled by config)` for every toggle.
fn toggles(cfg: &ShaderConfig) -> [(&'static str, bool, bool); 11] {
    [
        ("rainbow", cfg!(feature = "rainbow"), cfg.rainbow.enabled),
        (
            "underwater-streaks",
            cfg!(feature = "underwater-streaks"),
            cfg.underwater.streaks.is_some(),
        ),
        ("sun-bloom", cfg!(feature = "sun-bloom"), cfg.sun_moon.bloom),
        (
            "glow-shimmer",
            cfg!(feature = "glow-shimmer"),
            cfg.glow.shimmer.is_some(),
        ),
        ("glow-leak", cfg!(feature = "glow-leak"), cfg.glow.leak.is_some()),
        ("aurora", cfg!(feature = "aurora"), cfg.aurora.intensity.is_some()),
        (
            "shooting-star",
            cfg!(feature = "shooting-star"),
            cfg.shooting_star.intensity.is_some(),
        ),
        (
            "galaxy-stars",
            cfg!(feature = "galaxy-stars"),
            cfg.galaxy.intensity.is_some() || cfg.galaxy.end_intensity.is_some(),
        ),
        (
            "twinkling-stars",
            cfg!(feature = "twinkling-stars"),
            cfg.stars.intensity.is_some() || cfg.stars.end_intensity.is_some(),
        ),
        (
            "cloud-layer2",
            cfg!(feature = "cloud-layer2"),
            cfg.clouds.rounded.layer2_enabled,
        ),
        ("end-blackhole", cfg!(feature = "end-blackhole"), cfg.black_hole.enabled),
    ]
}

impl<C: CloudStyle, E: EndSkyStyle, T: ToneCurve> Shader<C, E, T> {
    pub fn new(resolved: &ResolvedConfig) -> Result<Self, RenderError> {
        let cfg = resolved.config();

        if cfg.clouds.kind != C::KIND {
            return Err(RenderError::CloudStyleMismatch {
                compiled: C::KIND,
                configured: cfg.clouds.kind,
            });
        }
        if cfg.sky.end_sky != E::KIND {
            return Err(RenderError::EndSkyMismatch {
                compiled: E::KIND,
                configured: cfg.sky.end_sky,
            });
        }
        if cfg.tonemap.curve != T::KIND {
            return Err(RenderError::ToneCurveMismatch {
                compiled: T::KIND,
                configured: cfg.tonemap.curve,
            });
        }
        for (name, compiled, configured) in toggles(cfg) {
            if compiled != configured {
                return Err(RenderError::ToggleMismatch {
                    name,
                    compiled,
                    configured,
                });
            }
        }

        log::info!(
            "Shader variant: clouds {:?}, end sky {:?}, tone curve {:?}, profiles {:?}",
            C::KIND,
            E::KIND,
            T::KIND,
            resolved.profiles()
        );

        Ok(Self {
            sky_config: cfg.sky.clone(),
            sky: SkyParams::from_config(cfg),
            clouds: C::params(cfg),
            celestial: CelestialParams::from_config(cfg),
            aurora: AuroraParams::from(&cfg.aurora),
            glow: GlowParams::from(&cfg.glow),
            grade: GradeParams::from(&cfg.tonemap),
            _variant: PhantomData,
        })
    }

    pub fn sky_colors(&self, env: &Environment, fog_color: Vec3) -> SkyColor {
        sky_color::sky_colors(&self.sky_config, env, fog_color)
    }

    pub fn sky(&self, colors: &SkyColor, env: &Environment, view_dir: Vec3, fog_color: Vec3, t: f32) -> Vec3 {
        sky::render_sky::<E>(&self.sky, colors, env, view_dir, fog_color, t)
    }

    pub fn sky_reflection(
        &self,
        colors: &SkyColor,
        env: &Environment,
        view_dir: Vec3,
        fog_color: Vec3,
        t: f32,
    ) -> Vec3 {
        sky::sky_reflection::<E>(&self.sky, colors, env, view_dir, fog_color, t)
    }

    /// Additive night-sky objects. Nothing shows in the nether.
    #[cfg_attr(
        not(any(
            feature = "galaxy-stars",
            feature = "twinkling-stars",
            feature = "shooting-star"
        )),
        allow(unused_variables)
    )]
    pub fn celestial(&self, env: &Environment, view_dir: Vec3, fog_color: Vec3, t: f32) -> Vec3 {
        if env.nether {
            return Vec3::ZERO;
        }

        let col = Vec3::ZERO;
        let p = &self.celestial;

        #[cfg(feature = "galaxy-stars")]
        let col = {
            let intensity = if env.end { p.end_galaxy } else { p.galaxy };
            col + intensity * crate::celestial::galaxy(view_dir, fog_color, env, t, p)
        };

        #[cfg(feature = "twinkling-stars")]
        let col = {
            let (intensity, day_visibility) = if env.end {
                (p.end_stars, 1.0)
            } else {
                (p.stars, p.stars_day_visibility)
            };
            col + intensity * crate::celestial::stars(view_dir, fog_color, env, t, day_visibility)
        };

        #[cfg(feature = "shooting-star")]
        let col = if env.end || env.underwater {
            col
        } else {
            col + p.shooting_star
                * crate::celestial::shooting_star(
                    view_dir,
                    fog_color,
                    t,
                    p.shooting_star_period,
                    p.shooting_star_delay,
                )
        };

        col
    }

    /// Premultiplied cloud layer with the aurora behind it. Clouds only
    /// exist in the overworld sky above the horizon.
    pub fn clouds(&self, colors: &SkyColor, inputs: &FragmentInputs) -> Vec4 {
        let env = &inputs.env;
        if !env.is_overworld() || inputs.view_dir.y <= 0.0 {
            return Vec4::ZERO;
        }

        let layer = C::render(
            &self.clouds,
            colors,
            inputs.view_dir,
            inputs.position,
            env.rain_factor,
            inputs.time,
        );

        #[cfg(feature = "aurora")]
        let layer = {
            let aurora = crate::aurora::render_aurora(
                inputs.position,
                inputs.time,
                env.rain_factor,
                inputs.fog_color,
                &self.aurora,
            );
            crate::clouds::over(layer, aurora)
        };

        layer
    }

    /// Uniform block for one frame, with the sky colors resolved once.
    pub fn frame_uniforms(&self, env: &Environment, fog_color: Vec3, time: f32) -> FrameUniforms {
        FrameUniforms::from_frame(&self.sky_colors(env, fog_color), env, fog_color, time)
    }

    /// Color-corrected fragment shaded against a frame's uniform block.
    pub fn shade(&self, frame: &FrameUniforms, view_dir: Vec3, position: Vec3) -> Vec3 {
        let inputs = FragmentInputs {
            view_dir,
            position,
            fog_color: frame.fog_color(),
            env: frame.environment(),
            time: frame.time,
        };
        self.composite(&frame.sky_colors(), &inputs)
    }

    /// Full color-corrected fragment.
    pub fn fragment(&self, inputs: &FragmentInputs) -> Vec3 {
        let frame = self.frame_uniforms(&inputs.env, inputs.fog_color, inputs.time);
        self.shade(&frame, inputs.view_dir, inputs.position)
    }

    fn composite(&self, colors: &SkyColor, inputs: &FragmentInputs) -> Vec3 {
        let env = &inputs.env;
        let background = self.sky(colors, env, inputs.view_dir, inputs.fog_color, inputs.time)
            + self.celestial(env, inputs.view_dir, inputs.fog_color, inputs.time);
        let cloud = self.clouds(colors, inputs);

        let col = cloud.xyz() + background * (1.0 - cloud.w);
        color_correction::<T>(col, &self.grade)
    }

    /// Emissive glow for a terrain texel, with shimmer keyed on `block_pos`.
    pub fn glow<S: TexelSource>(&self, tex: &S, uv: Vec2, block_pos: Vec3, t: f32) -> Vec3 {
        let shimmer = glow::glow_shimmer(block_pos, t, self.glow.shimmer, self.glow.shimmer_speed);
        glow::glow(tex, uv, shimmer, &self.glow)
    }

    pub fn glow_params(&self) -> &GlowParams {
        &self.glow
    }

    pub fn grade(&self) -> &GradeParams {
        &self.grade
    }
}
