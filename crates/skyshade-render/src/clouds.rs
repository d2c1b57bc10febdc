//! Cloud layer: soft noise clouds, raymarched rounded clouds, box clouds.
//!
//! The `render_*` functions return straight (non-premultiplied) color with
//! coverage in `w`, matching how the host blends cloud geometry. The
//! [`CloudStyle`] implementations premultiply, so the shader can composite
//! with `cloud.rgb + background * (1 - cloud.a)`.

use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use skyshade_core::config::{CloudKind, CloudLayerParams, ShaderConfig};
use skyshade_core::constants::{CLOUD_LUMA, CLOUD_SLAB_SCALE, GRAZING_BIAS};
use skyshade_core::math::{hermite, mix, smoothstep, smoothstep4};
use skyshade_core::noise::rand;

use crate::sky_color::SkyColor;

/// Cloud algorithm, fixed per build.
pub trait CloudStyle {
    const KIND: CloudKind;
    type Params: Clone + std::fmt::Debug;

    fn params(cfg: &ShaderConfig) -> Self::Params;

    /// Premultiplied `(rgb, coverage)` for the cloud plane point `pos`
    /// (camera-relative) seen along `view_dir`.
    fn render(
        params: &Self::Params,
        colors: &SkyColor,
        view_dir: Vec3,
        pos: Vec3,
        rain: f32,
        t: f32,
    ) -> Vec4;
}

fn premultiply(c: Vec4) -> Vec4 {
    (c.xyz() * c.w).extend(c.w)
}

/// Back-to-front "over" for premultiplied colors.
pub fn over(front: Vec4, back: Vec4) -> Vec4 {
    front + back * (1.0 - front.w)
}

fn night_factor(horizon: Vec3) -> f32 {
    (1.1 - 3.0 * horizon.z.max(horizon.y)).max(0.0)
}

// Soft clouds

pub fn cloud_noise_2d(p: Vec2, t: f32, rain: f32, speed: f32) -> f32 {
    let t = t * speed;
    let mut p = p + Vec2::splat(t);
    p.y += 3.0 * (0.3 * p.x + 0.1 * t).sin();

    let p0 = p.floor();
    let f = p - p0;
    let u = Vec2::new(hermite(f.x), hermite(f.y));

    let mut n = mix(
        mix(rand(p0), rand(p0 + Vec2::X), u.x),
        mix(rand(p0 + Vec2::Y), rand(p0 + Vec2::ONE), u.x),
        u.y,
    );
    n *= 0.5 + 0.5 * (p.x * 0.6 - 0.5 * t).sin() * (p.y * 0.6 + 0.8 * t).sin();
    n = (n * (1.0 + rain)).min(1.0);
    n * n
}

pub fn render_clouds_simple(
    colors: &SkyColor,
    pos: Vec3,
    t: f32,
    rain: f32,
    scale: Vec2,
    speed: f32,
) -> Vec4 {
    let p = Vec2::new(pos.x, pos.z) * scale;
    let d = cloud_noise_2d(p, t, rain, speed);

    let alpha = smoothstep(0.1, 0.6, d);
    let mut rgb = colors.horizon_edge + colors.zenith;
    rgb += 1.5 * rgb.dot(Vec3::from_array(CLOUD_LUMA)) * smoothstep(0.6, 0.2, d) * alpha;
    rgb *= 1.0 - 0.8 * rain;
    rgb.extend(alpha)
}

// Rounded clouds

/// Density of the rounded cloud field at `pos` (cloud units, slab in y ∈ [0, 1]).
pub fn cloud_df(pos: Vec3, rain: f32, boxiness: Vec2) -> f32 {
    let boxiness = boxiness * 0.999;
    let xz = Vec2::new(pos.x, pos.z);
    let p0 = xz.floor();
    let u = ((xz - p0 - Vec2::splat(boxiness.x)) / (1.0 - boxiness.x)).max(Vec2::ZERO);
    let u = Vec2::new(hermite(u.x), hermite(u.y));

    let r = Vec4::new(
        rand(p0),
        rand(p0 + Vec2::X),
        rand(p0 + Vec2::ONE),
        rand(p0 + Vec2::Y),
    );
    // Reversed edges: low hashes become cloud cells; rain widens the band.
    let r = smoothstep4(0.1001 + 0.2 * rain, 0.1 + 0.2 * rain * rain, r);

    let mut n = mix(mix(r.x, r.y, u.x), mix(r.w, r.z, u.x), u.y);

    n *= 1.0 - 1.5 * smoothstep(boxiness.y, 2.0 - boxiness.y, 2.0 * (pos.y - 0.5).abs());

    let n = (1.25 * (n - 0.2)).max(0.0);
    n * n * (3.0 - 2.0 * n)
}

/// Raymarch one rounded cloud layer.
pub fn render_clouds(
    view_dir: Vec3,
    pos: Vec3,
    rain: f32,
    t: f32,
    horizon: Vec3,
    zenith: Vec3,
    layer: &CloudLayerParams,
) -> Vec4 {
    let height = CLOUD_SLAB_SCALE * mix(layer.thickness, layer.rain_thickness, rain);
    let steps = layer.steps as f32;

    let dir_xz = Vec2::new(view_dir.x, view_dir.z);
    let offset_xz = height * layer.scale * dir_xz / (GRAZING_BIAS + 0.98 * view_dir.y.abs());
    let mut delta = Vec3::new(offset_xz.x, 1.0, offset_xz.y);

    let drift = Vec2::new(1.0, 0.5) * (t * layer.velocity);
    let start = layer.scale * (Vec2::new(pos.x, pos.z) + drift);
    let mut p = Vec3::new(start.x, 0.0, start.y) + delta;

    delta /= -steps;

    let mut cover = 0.0f32;
    let mut top = 1.0f32;
    for _ in 0..layer.steps {
        let m = cloud_df(p, rain, layer.shape);
        cover += m;
        top = mix(top, p.y, m);
        p += delta;
    }

    cover *= smoothstep(0.12, 0.14, cover);
    cover /= (steps / layer.density) + cover;

    if pos.y < 0.0 {
        top = 1.0 - top;
    }

    let night = night_factor(horizon);

    let mut rgb = zenith + horizon;
    rgb += rgb.dot(Vec3::from_array(CLOUD_LUMA)) * top * top;
    rgb *= 1.0 - 0.8 * rain;
    rgb *= 1.0 - 0.8 * night;
    rgb.extend(cover)
}

/// Camera-relative point where the view ray through `pos` reaches a plane
/// `offset` units above it.
pub fn raise_layer(pos: Vec3, offset: f32) -> Vec3 {
    let height = pos.y.abs();
    pos * ((height + offset) / height.max(GRAZING_BIAS))
}

// Box clouds

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCloudParams {
    pub thickness: f32,
    pub rain_thickness: f32,
    pub opacity: f32,
    /// Zero unless the second box layer is enabled.
    pub layer2_opacity: f32,
    pub cell_size: f32,
    pub speed: f32,
}

fn box_filled(cell: Vec2, rain: f32, coverage: f32) -> f32 {
    let threshold = coverage + 0.25 * rain;
    if rand(cell.floor()) < threshold {
        1.0
    } else {
        0.0
    }
}

/// Flat slab of hashed cells: lit tops, darker sides where the view ray
/// exits through a neighbouring cell.
pub fn render_box_clouds(
    colors: &SkyColor,
    view_dir: Vec3,
    pos: Vec3,
    rain: f32,
    t: f32,
    params: &BoxCloudParams,
    cell_shift: Vec2,
    coverage: f32,
) -> Vec4 {
    let height = mix(params.thickness, params.rain_thickness, rain);
    let drift = Vec2::new(t * params.speed, 0.0);
    let entry = (Vec2::new(pos.x, pos.z) + drift) / params.cell_size + cell_shift;
    let dir_xz = Vec2::new(view_dir.x, view_dir.z);
    let exit = entry + dir_xz * (height / params.cell_size) / (GRAZING_BIAS + 0.98 * view_dir.y.abs());

    let top = box_filled(entry, rain, coverage);
    let side = (1.0 - top) * box_filled(exit, rain, coverage);
    let alpha = (top + side) * params.opacity;

    let mut rgb = (colors.zenith + colors.horizon) * (0.7 + 0.3 * top);
    rgb += 0.5 * rgb.dot(Vec3::from_array(CLOUD_LUMA)) * top;
    rgb *= 1.0 - 0.8 * rain;
    rgb *= 1.0 - 0.8 * night_factor(colors.horizon);
    rgb.extend(alpha)
}

/// Type 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxClouds;

/// Type 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftClouds;

/// Type 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundedClouds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftCloudParams {
    pub scale: Vec2,
    pub speed: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedCloudParams {
    pub layer1: CloudLayerParams,
    pub layer2: CloudLayerParams,
}

impl CloudStyle for BoxClouds {
    const KIND: CloudKind = CloudKind::Vanilla;
    type Params = BoxCloudParams;

    fn params(cfg: &ShaderConfig) -> BoxCloudParams {
        let v = &cfg.clouds.vanilla;
        BoxCloudParams {
            thickness: v.thickness,
            rain_thickness: v.rain_thickness,
            opacity: v.opacity,
            layer2_opacity: if v.multilayer { v.opacity } else { 0.0 },
            cell_size: v.cell_size,
            speed: v.speed,
        }
    }

    fn render(
        params: &BoxCloudParams,
        colors: &SkyColor,
        view_dir: Vec3,
        pos: Vec3,
        rain: f32,
        t: f32,
    ) -> Vec4 {
        let near = render_box_clouds(colors, view_dir, pos, rain, t, params, Vec2::ZERO, 0.35);
        let upper = BoxCloudParams {
            opacity: params.layer2_opacity,
            ..*params
        };
        let far = render_box_clouds(colors, view_dir, pos, rain, t, &upper, Vec2::splat(0.5), 0.2);
        over(premultiply(near), premultiply(far))
    }
}

impl CloudStyle for SoftClouds {
    const KIND: CloudKind = CloudKind::Soft;
    type Params = SoftCloudParams;

    fn params(cfg: &ShaderConfig) -> SoftCloudParams {
        let s = &cfg.clouds.soft;
        SoftCloudParams {
            scale: s.scale,
            speed: s.speed,
            opacity: s.opacity,
        }
    }

    fn render(
        params: &SoftCloudParams,
        colors: &SkyColor,
        _view_dir: Vec3,
        pos: Vec3,
        rain: f32,
        t: f32,
    ) -> Vec4 {
        let mut c = render_clouds_simple(colors, pos, t, rain, params.scale, params.speed);
        c.w *= params.opacity;
        premultiply(c)
    }
}

impl CloudStyle for RoundedClouds {
    const KIND: CloudKind = CloudKind::Rounded;
    type Params = RoundedCloudParams;

    fn params(cfg: &ShaderConfig) -> RoundedCloudParams {
        RoundedCloudParams {
            layer1: cfg.clouds.rounded.layer1,
            layer2: cfg.clouds.rounded.layer2,
        }
    }

    fn render(
        params: &RoundedCloudParams,
        colors: &SkyColor,
        view_dir: Vec3,
        pos: Vec3,
        rain: f32,
        t: f32,
    ) -> Vec4 {
        let near = premultiply(render_clouds(
            view_dir,
            pos,
            rain,
            t,
            colors.horizon,
            colors.zenith,
            &params.layer1,
        ));

        #[cfg(feature = "cloud-layer2")]
        let near = over(
            near,
            premultiply(render_clouds(
                view_dir,
                raise_layer(pos, params.layer2.offset),
                rain,
                t,
                colors.horizon,
                colors.zenith,
                &params.layer2,
            )),
        );

        near
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_colors() -> SkyColor {
        SkyColor {
            zenith: Vec3::new(0.36, 0.504, 1.0),
            horizon: Vec3::new(1.41, 1.76, 2.0),
            horizon_edge: Vec3::new(1.41, 1.76, 2.0),
        }
    }

    fn grid() -> impl Iterator<Item = Vec3> {
        (0..50).flat_map(|i| (0..50).map(move |j| Vec3::new(i as f32 * 37.0, 120.0, j as f32 * 37.0)))
    }

    #[test]
    fn test_cloud_noise_range() {
        for p in grid() {
            let n = cloud_noise_2d(Vec2::new(p.x, p.z) * 0.016, 10.0, 0.0, 0.04);
            assert!((0.0..=1.0).contains(&n));
            let n = cloud_noise_2d(Vec2::new(p.x, p.z) * 0.016, 10.0, 1.0, 0.04);
            assert!((0.0..=1.0).contains(&n));
        }
    }

    #[test]
    fn test_simple_clouds_alpha_range() {
        let c = day_colors();
        let mut any = false;
        for p in grid() {
            let col = render_clouds_simple(&c, p, 3.0, 0.0, Vec2::new(0.016, 0.022), 0.04);
            assert!((0.0..=1.0).contains(&col.w));
            assert!(col.is_finite());
            any |= col.w > 0.5;
        }
        assert!(any);
    }

    #[test]
    fn test_cloud_df_range_and_vertical_falloff() {
        let shape = Vec2::new(0.35, 0.5);
        for i in 0..30 {
            for j in 0..30 {
                for k in 0..5 {
                    let p = Vec3::new(i as f32 * 0.37, k as f32 * 0.25, j as f32 * 0.41);
                    let n = cloud_df(p, 0.3, shape);
                    assert!((0.0..=1.0).contains(&n), "cloud_df({p}) = {n}");
                }
                // Far outside the slab nothing remains.
                let p = Vec3::new(i as f32 * 0.37, 3.0, j as f32 * 0.41);
                assert_eq!(cloud_df(p, 0.3, shape), 0.0);
            }
        }
    }

    #[test]
    fn test_rounded_alpha_monotonic_in_density() {
        let c = day_colors();
        let view = Vec3::Y;
        let mut strict = false;
        for p in grid() {
            let mut prev = -1.0f32;
            for density in [1.0, 5.0, 20.0, 50.0, 100.0] {
                let layer = CloudLayerParams {
                    density,
                    ..CloudLayerParams::default()
                };
                let a = render_clouds(view, p, 0.0, 0.0, c.horizon, c.zenith, &layer).w;
                assert!(a >= prev, "alpha fell at {p}: {prev} -> {a}");
                if prev >= 0.0 && a > prev {
                    strict = true;
                }
                prev = a;
            }
        }
        assert!(strict, "density never changed coverage");
    }

    #[test]
    fn test_rounded_alpha_range() {
        let c = day_colors();
        let layer = CloudLayerParams::default();
        for p in grid() {
            for view in [Vec3::Y, Vec3::new(0.6, 0.8, 0.0), Vec3::new(0.0, 0.05, 0.998)] {
                let col = render_clouds(view, p, 0.5, 7.0, c.horizon, c.zenith, &layer);
                assert!(col.is_finite());
                assert!((0.0..1.0).contains(&col.w));
            }
        }
    }

    #[test]
    fn test_rounded_horizontal_view_finite() {
        // Exactly horizontal rays rely on the grazing bias.
        let c = day_colors();
        let layer = CloudLayerParams::default();
        let col = render_clouds(Vec3::X, Vec3::new(5.0, 0.0, 5.0), 0.0, 0.0, c.horizon, c.zenith, &layer);
        assert!(col.is_finite());
    }

    #[test]
    fn test_rain_darkens_rounded() {
        let c = day_colors();
        let layer = CloudLayerParams::default();
        let p = Vec3::new(10.0, 100.0, 10.0);
        let clear = render_clouds(Vec3::Y, p, 0.0, 0.0, c.horizon, c.zenith, &layer);
        let rain = render_clouds(Vec3::Y, p, 1.0, 0.0, c.horizon, c.zenith, &layer);
        assert!(rain.x < clear.x);
    }

    #[test]
    fn test_raise_layer() {
        let p = raise_layer(Vec3::new(10.0, 100.0, -20.0), 50.0);
        assert!((p - Vec3::new(15.0, 150.0, -30.0)).length() < 1e-3);
        assert!(raise_layer(Vec3::new(10.0, 0.0, 0.0), 143.0).is_finite());
    }

    #[test]
    fn test_box_clouds_binary_coverage() {
        let c = day_colors();
        let cfg = ShaderConfig::default();
        let params = BoxClouds::params(&cfg);
        let mut covered = 0;
        for p in grid() {
            let col = render_box_clouds(&c, Vec3::Y, p, 0.0, 0.0, &params, Vec2::ZERO, 0.35);
            assert!(col.w == 0.0 || col.w == params.opacity);
            if col.w > 0.0 {
                covered += 1;
            }
        }
        assert!(covered > 0 && covered < 2500);
    }

    #[test]
    fn test_box_layer2_off_by_default() {
        let c = day_colors();
        let cfg = ShaderConfig::default();
        let params = BoxClouds::params(&cfg);
        assert_eq!(params.layer2_opacity, 0.0);
        for p in grid().take(200) {
            let single = premultiply(render_box_clouds(&c, Vec3::Y, p, 0.0, 0.0, &params, Vec2::ZERO, 0.35));
            assert_eq!(BoxClouds::render(&params, &c, Vec3::Y, p, 0.0, 0.0), single);
        }
    }

    #[test]
    fn test_box_multilayer_adds_coverage() {
        let c = day_colors();
        let mut cfg = ShaderConfig::default();
        cfg.clouds.vanilla.multilayer = true;
        let params = BoxClouds::params(&cfg);
        let mut gained = false;
        for p in grid() {
            let single = premultiply(render_box_clouds(&c, Vec3::Y, p, 0.0, 0.0, &params, Vec2::ZERO, 0.35));
            let both = BoxClouds::render(&params, &c, Vec3::Y, p, 0.0, 0.0);
            assert!(both.w >= single.w);
            gained |= both.w > single.w;
        }
        assert!(gained);
    }

    #[test]
    fn test_styles_premultiplied() {
        let c = day_colors();
        let cfg = ShaderConfig::default();
        let soft = SoftClouds::params(&cfg);
        let (t, rain) = (1.0, 0.3);
        for p in grid().take(300) {
            let straight = render_clouds_simple(&c, p, t, rain, soft.scale, soft.speed);
            let pm = SoftClouds::render(&soft, &c, Vec3::Y, p, rain, t);
            let a = straight.w * soft.opacity;
            assert!((pm.w - a).abs() < 1e-6);
            assert!((pm.xyz() - straight.xyz() * a).abs().max_element() < 1e-5);
        }
    }

    #[test]
    fn test_over_opaque_front_hides_back() {
        let front = Vec4::new(0.5, 0.4, 0.3, 1.0);
        let back = Vec4::new(9.0, 9.0, 9.0, 1.0);
        assert_eq!(over(front, back), Vec4::new(0.5, 0.4, 0.3, 1.0) + back * 0.0);
    }
}
