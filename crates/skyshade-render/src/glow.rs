//! Emissive texel detection, glow leak, shimmer, and enchantment glint.
//!
//! Texture alpha inside `(GLOW_ALPHA_MIN, GLOW_ALPHA_MAX)` is an emissive
//! tag baked into the asset, not transparency. The thresholds must match
//! the authored textures exactly.

use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use skyshade_core::config::GlowConfig;
use skyshade_core::constants::{GLOW_ALPHA_DIM, GLOW_ALPHA_MAX, GLOW_ALPHA_MIN, GLOW_DIM_FACTOR};
use skyshade_core::math::{fract, mix, spectrum};

use crate::texture::TexelSource;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowParams {
    pub brightness: f32,
    pub shimmer: f32,
    pub shimmer_speed: f32,
    pub leak: f32,
}

impl From<&GlowConfig> for GlowParams {
    fn from(cfg: &GlowConfig) -> Self {
        Self {
            brightness: cfg.brightness,
            shimmer: cfg.shimmer.unwrap_or(0.0),
            shimmer_speed: cfg.shimmer_speed,
            leak: cfg.leak.unwrap_or(0.0),
        }
    }
}

/// Emissive color of one texel, or zero when the texel carries no tag.
pub fn glow_detect(texel: Vec4) -> Vec3 {
    let a = texel.w;
    if a > GLOW_ALPHA_MIN && a < GLOW_ALPHA_MAX {
        let glow = texel.xyz() * texel.xyz();
        if a > GLOW_ALPHA_DIM {
            return GLOW_DIM_FACTOR * glow;
        }
        return glow;
    }
    Vec3::ZERO
}

pub fn glow_detect_at<S: TexelSource>(tex: &S, uv: Vec2) -> Vec3 {
    glow_detect(tex.fetch_lod0(uv))
}

/// Glow bleeding in from the 8 neighbouring texels.
///
/// ```text
/// c3 c4 c5
/// c2    c6
/// c1 c8 c7
/// ```
pub fn glow_leak<S: TexelSource>(tex: &S, uv: Vec2, leak: f32) -> Vec3 {
    let size = tex.size().as_vec2();
    let offset = Vec2::ONE / size;
    let at = |dx: f32, dy: f32| glow_detect_at(tex, uv + offset * Vec2::new(dx, dy));

    let c1 = at(-1.0, -1.0);
    let c2 = at(-1.0, 0.0);
    let c3 = at(-1.0, 1.0);
    let c4 = at(0.0, 1.0);
    let c5 = at(1.0, 1.0);
    let c6 = at(1.0, 0.0);
    let c7 = at(1.0, -1.0);
    let c8 = at(0.0, -1.0);

    let p = uv * size;
    let u = Vec2::new(fract(p.x), fract(p.y));
    let v = Vec2::ONE - u;

    // corners
    let g = mix(mix(c1, c3, u.y), mix(c7, c5, u.y), u.x);
    // sides
    let g = g.max((c2 * v.x).max(c4 * u.y).max((c6 * u.x).max(c8 * v.y)));

    let g = ((g * 0.7 + Vec3::splat(0.2)) * g + Vec3::splat(0.1)) * g;
    g * leak
}

/// Slow travelling shimmer keyed on block position.
pub fn glow_shimmer(cpos: Vec3, t: f32, strength: f32, speed: f32) -> f32 {
    let mut shimmer = (0.7 * cpos.dot(Vec3::ONE) - speed * t).sin();
    shimmer = (1.2 * shimmer + 0.7 * cpos.dot(Vec3::new(-1.0, -1.0, 1.0))).sin();
    shimmer *= shimmer;
    mix(1.0, shimmer * shimmer, strength)
}

/// Emissive contribution at `uv`, scaled by the global glow brightness.
///
/// `shimmer` comes from [`glow_shimmer`] and is ignored unless the build has
/// `glow-shimmer`.
#[cfg_attr(not(feature = "glow-shimmer"), allow(unused_variables))]
pub fn glow<S: TexelSource>(tex: &S, uv: Vec2, shimmer: f32, params: &GlowParams) -> Vec3 {
    let glow = glow_detect_at(tex, uv);

    #[cfg(feature = "glow-leak")]
    let glow = glow.max(glow_leak(tex, uv, params.leak));

    #[cfg(feature = "glow-shimmer")]
    let glow = glow * shimmer;

    glow * params.brightness
}

/// Enchantment glint overlay on `light`.
///
/// `layer_uv` holds two independently scrolling UV sets (`xy`, `zw`). The
/// albedo-derived offset keeps identical items from glinting in lockstep.
pub fn glint<S: TexelSource>(
    light: Vec4,
    layer_uv: Vec4,
    glint_tex: &S,
    glint_color: Vec4,
    tile_light_color: Vec4,
    albedo: Vec4,
) -> Vec4 {
    let d = fract(albedo.xyz().dot(Vec3::splat(4.0)));

    let uv1 = layer_uv.xy() + Vec2::splat(0.1 * d);
    let uv2 = layer_uv.zw() + Vec2::splat(0.1 * d);
    let tex1 = glint_tex.sample(Vec2::new(fract(uv1.x), fract(uv1.y))).xyzx();
    let tex2 = glint_tex.sample(Vec2::new(fract(uv2.x), fract(uv2.y))).xyzx();

    let g = (tex1 * tex1 + tex2 * tex2) * tile_light_color * glint_color;

    let mut rgb = light.xyz() * (1.0 - 0.4 * g.w) + 80.0 * g.xyz();
    rgb += Vec3::new(0.1, 0.0, 0.1)
        + 0.2 * spectrum((layer_uv.x * 9.42477 + 2.0 * g.w + d).sin());
    rgb.extend(light.w)
}
