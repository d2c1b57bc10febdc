//! Aurora curtains drawn on the cloud plane behind the clouds.
//!
//! The shader composites the result with [`crate::clouds::over`], so the
//! layer is premultiplied like the cloud styles.

use glam::{Vec3, Vec4};
use skyshade_core::config::AuroraConfig;
use skyshade_core::math::mix;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuroraParams {
    pub intensity: f32,
    pub velocity: f32,
    pub scale: f32,
    pub width: f32,
    pub col1: Vec3,
    pub col2: Vec3,
}

impl From<&AuroraConfig> for AuroraParams {
    fn from(cfg: &AuroraConfig) -> Self {
        Self {
            intensity: cfg.intensity.unwrap_or(0.0),
            velocity: cfg.velocity,
            scale: cfg.scale,
            width: cfg.width,
            col1: cfg.col1,
            col2: cfg.col2,
        }
    }
}

/// Aurora curtains on the cloud plane at `pos`.
///
/// Output is premultiplied: `rgb` already carries the band mask in `w`.
/// Rain and daylight both fade it out.
pub fn render_aurora(pos: Vec3, t: f32, rain: f32, fog_color: Vec3, params: &AuroraParams) -> Vec4 {
    let t = t * params.velocity;
    let x = pos.x * params.scale;
    let z = pos.z * params.scale;
    let wobble = 0.03 * (x * 4.0 + 30.0 * t).sin();
    let (x, z) = (x + wobble, z + wobble);

    let mut d0 = (x * 0.1 + t + (z * 0.1).sin()).sin();
    let mut d1 = (z * 0.1 - t + (x * 0.2).sin()).sin();
    let mut d2 = (z * 0.1 + (d0 + d1 * 2.0).sin() + d1 * 2.0 + d0).cos();
    let mut d3 = (z * 0.2 + (d0 + d2 * 2.0).cos() + d1 * 2.0 + d0).cos();
    d0 *= d0;
    d1 *= d1;
    d2 *= d2;
    d3 *= d3;
    let band = d0 / (1.0 + d2 / params.width);

    let mut color = mix(params.col1, params.col2, d1);
    color = mix(color, params.col1 * Vec3::new(0.6, 0.8, 1.2), d3);

    let mask = (1.0 - 0.8 * rain) * (1.0 - 4.0 * fog_color.z.max(fog_color.y)).max(0.0);
    color *= params.intensity;

    color.extend(1.0) * band * mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AuroraParams {
        AuroraParams::from(&AuroraConfig::default())
    }

    #[test]
    fn test_hidden_by_day() {
        let p = params();
        for i in 0..20 {
            let pos = Vec3::new(i as f32 * 13.0, 100.0, i as f32 * -7.0);
            assert_eq!(render_aurora(pos, 4.0, 0.0, Vec3::splat(0.3), &p), Vec4::ZERO);
        }
    }

    #[test]
    fn test_visible_at_night() {
        let p = params();
        let mut max_alpha = 0.0f32;
        for i in 0..200 {
            let pos = Vec3::new(i as f32 * 3.1, 100.0, i as f32 * 5.3);
            let c = render_aurora(pos, 4.0, 0.0, Vec3::ZERO, &p);
            assert!(c.is_finite());
            assert!(c.w >= 0.0);
            max_alpha = max_alpha.max(c.w);
        }
        assert!(max_alpha > 0.05, "aurora never showed: {max_alpha}");
    }

    #[test]
    fn test_rain_dims() {
        let p = params();
        let pos = Vec3::new(40.0, 100.0, -25.0);
        let clear = render_aurora(pos, 2.0, 0.0, Vec3::ZERO, &p);
        let rain = render_aurora(pos, 2.0, 1.0, Vec3::ZERO, &p);
        assert!((rain.w - 0.2 * clear.w).abs() < 1e-6);
    }

    #[test]
    fn test_color_premultiplied_by_mask() {
        let p = params();
        for i in 0..200 {
            let pos = Vec3::new(i as f32 * 3.1, 100.0, i as f32 * -4.7);
            let c = render_aurora(pos, 6.0, 0.3, Vec3::splat(0.1), &p);
            // Straight color never exceeds intensity * 1.2 per channel.
            assert!(c.truncate().max_element() <= c.w * p.intensity * 1.2 + 1e-6);
            if c.w == 0.0 {
                assert_eq!(c, Vec4::ZERO);
            }
        }
    }
}
