//! CPU texture source for the glow and glint passes.

use glam::{UVec2, Vec2, Vec4};
use skyshade_core::math::fract;

/// Read-only texel access. Coordinates wrap (repeat addressing).
pub trait TexelSource {
    /// Size of mip level 0 in texels.
    fn size(&self) -> UVec2;

    /// Nearest texel at mip level 0. Emissive tags only exist at full
    /// resolution, so glow detection never goes through mip selection.
    fn fetch_lod0(&self, uv: Vec2) -> Vec4;

    /// Bilinear sample at mip level 0.
    fn sample(&self, uv: Vec2) -> Vec4;
}

/// Single-level RGBA float image, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Vec4>,
}

impl Texture {
    /// Returns `None` when `texels` does not hold exactly `width * height` entries
    /// or either side is zero.
    pub fn new(width: u32, height: u32, texels: Vec<Vec4>) -> Option<Self> {
        if width == 0 || height == 0 || texels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            texels,
        })
    }

    /// Texture filled with one color.
    pub fn solid(width: u32, height: u32, color: Vec4) -> Option<Self> {
        Self::new(width, height, vec![color; (width as usize) * (height as usize)])
    }

    /// Build from 8-bit RGBA bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        let texels = bytes
            .chunks_exact(4)
            .map(|c| {
                Vec4::new(c[0] as f32, c[1] as f32, c[2] as f32, c[3] as f32) / 255.0
            })
            .collect();
        Self::new(width, height, texels)
    }

    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        if x < self.width && y < self.height {
            let i = (y * self.width + x) as usize;
            self.texels[i] = color;
        }
    }

    fn texel(&self, x: i64, y: i64) -> Vec4 {
        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.texels[y * self.width as usize + x]
    }
}

impl TexelSource for Texture {
    fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    fn fetch_lod0(&self, uv: Vec2) -> Vec4 {
        let x = (fract(uv.x) * self.width as f32).floor() as i64;
        let y = (fract(uv.y) * self.height as f32).floor() as i64;
        self.texel(x, y)
    }

    fn sample(&self, uv: Vec2) -> Vec4 {
        let p = Vec2::new(uv.x * self.width as f32, uv.y * self.height as f32) - Vec2::splat(0.5);
        let p0 = p.floor();
        let f = p - p0;
        let (x, y) = (p0.x as i64, p0.y as i64);

        let top = self.texel(x, y).lerp(self.texel(x + 1, y), f.x);
        let bottom = self.texel(x, y + 1).lerp(self.texel(x + 1, y + 1), f.x);
        top.lerp(bottom, f.y)
    }
}
