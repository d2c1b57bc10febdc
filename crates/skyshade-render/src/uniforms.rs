//! Per-frame uniform block shared by every fragment of a frame.
//!
//! Sky colors depend only on the environment and fog, so they are resolved
//! once per frame and carried here next to the raw host state.

use bytemuck::Zeroable;
use glam::Vec3;

use crate::env::{DimensionFlags, Environment};
use crate::sky_color::SkyColor;

/// Per-frame sky uniform (80 bytes, 16-byte aligned rows).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub zenith: [f32; 3],
    pub time: f32,
    pub horizon: [f32; 3],
    pub rain_factor: f32,
    pub horizon_edge: [f32; 3],
    pub underwater: u32,
    pub fog_color: [f32; 3],
    pub nether: u32,
    pub end: u32,
    pub _padding: [u32; 3],
}

impl FrameUniforms {
    pub fn from_frame(colors: &SkyColor, env: &Environment, fog_color: Vec3, time: f32) -> Self {
        Self {
            zenith: colors.zenith.to_array(),
            time,
            horizon: colors.horizon.to_array(),
            rain_factor: env.rain_factor,
            horizon_edge: colors.horizon_edge.to_array(),
            underwater: env.underwater as u32,
            fog_color: fog_color.to_array(),
            nether: env.nether as u32,
            end: env.end as u32,
            ..Self::zeroed()
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn sky_colors(&self) -> SkyColor {
        SkyColor {
            zenith: Vec3::from_array(self.zenith),
            horizon: Vec3::from_array(self.horizon),
            horizon_edge: Vec3::from_array(self.horizon_edge),
        }
    }

    pub fn environment(&self) -> Environment {
        let flags = DimensionFlags {
            underwater: self.underwater != 0,
            nether: self.nether != 0,
            end: self.end != 0,
        };
        Environment::new(flags, self.rain_factor)
    }

    pub fn fog_color(&self) -> Vec3 {
        Vec3::from_array(self.fog_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 80);
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
    }

    #[test]
    fn test_from_frame() {
        let colors = SkyColor {
            zenith: Vec3::new(0.1, 0.2, 0.3),
            horizon: Vec3::new(0.4, 0.5, 0.6),
            horizon_edge: Vec3::new(0.7, 0.8, 0.9),
        };
        let env = Environment::new(
            DimensionFlags {
                underwater: true,
                nether: false,
                end: false,
            },
            0.25,
        );
        let u = FrameUniforms::from_frame(&colors, &env, Vec3::splat(0.5), 12.5);
        assert_eq!(u.zenith, [0.1, 0.2, 0.3]);
        assert_eq!(u.horizon_edge, [0.7, 0.8, 0.9]);
        assert_eq!(u.time, 12.5);
        assert_eq!(u.rain_factor, 0.25);
        assert_eq!((u.underwater, u.nether, u.end), (1, 0, 0));
        assert_eq!(u.as_bytes().len(), 80);
        // time sits right after the zenith color
        assert_eq!(&u.as_bytes()[12..16], &12.5f32.to_ne_bytes());
    }

    #[test]
    fn test_unpacks_frame_state() {
        let colors = SkyColor {
            zenith: Vec3::new(0.2, 0.3, 0.9),
            horizon: Vec3::new(1.4, 1.7, 2.0),
            horizon_edge: Vec3::new(1.0, 0.6, 0.4),
        };
        let env = Environment::new(
            DimensionFlags {
                underwater: false,
                nether: false,
                end: true,
            },
            0.6,
        );
        let fog = Vec3::new(0.06, 0.03, 0.1);
        let u = FrameUniforms::from_frame(&colors, &env, fog, 3.0);
        assert_eq!(u.sky_colors(), colors);
        assert_eq!(u.environment(), env);
        assert_eq!(u.fog_color(), fog);
        assert_eq!(u._padding, [0; 3]);
    }
}
