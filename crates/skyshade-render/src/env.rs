//! Environment classifier.
//!
//! Every color path downstream branches on these fields: `end` selects an
//! entirely different sky, `underwater` replaces the palette, `nether`
//! suppresses sun bloom and reflections.

use glam::Vec3;
use skyshade_core::math::saturate;

/// Game-state flags supplied by the host engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimensionFlags {
    pub underwater: bool,
    pub nether: bool,
    pub end: bool,
}

/// Engine fog-control vector: fog start, fog end (both relative to the far
/// plane) and render distance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FogControl {
    pub start: f32,
    pub end: f32,
    pub render_distance: f32,
}

/// Per-fragment environment descriptor. Rebuilt every fragment, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Environment {
    pub underwater: bool,
    pub nether: bool,
    pub end: bool,
    /// Rain intensity in `[0, 1]`.
    pub rain_factor: f32,
}

impl Environment {
    /// Direct field mapping from host flags. Rain is clamped to `[0, 1]`.
    pub fn new(flags: DimensionFlags, rain: f32) -> Self {
        Self {
            underwater: flags.underwater,
            nether: flags.nether,
            end: flags.end,
            rain_factor: saturate(rain),
        }
    }

    /// Clear-weather overworld.
    pub fn overworld() -> Self {
        Self::default()
    }

    /// Build the environment when the host can only provide fog state.
    ///
    /// Underwater and nether are inferred from the fog color and fog control;
    /// `end` and rain still come from the host.
    pub fn detect(fog_color: Vec3, fog_control: FogControl, end: bool, rain: f32) -> Self {
        let flags = DimensionFlags {
            underwater: detect_underwater(fog_color, fog_control),
            nether: !end && detect_nether(fog_color, fog_control),
            end,
        };
        Self::new(flags, rain)
    }

    pub fn is_overworld(&self) -> bool {
        !(self.underwater || self.nether || self.end)
    }
}

/// Submerged fog starts at the camera, ends close, and is tinted blue/green.
pub fn detect_underwater(fog_color: Vec3, fog_control: FogControl) -> bool {
    fog_control.start == 0.0
        && fog_control.end < 0.8
        && (fog_color.z > fog_color.x || fog_color.y > fog_color.x)
}

/// Nether fog start tracks render distance along a narrow curve; under lava
/// the fog is red with no blue.
pub fn detect_nether(fog_color: Vec3, fog_control: FogControl) -> bool {
    let expected_start = 0.029 + 0.09 * fog_control.end * fog_control.end;
    let nether_fog_control =
        fog_control.start < 0.14 && (fog_control.start - expected_start).abs() < 0.02;
    let nether_fog_color = fog_color.x + fog_color.y > 0.0;
    let under_lava = fog_control.start == 0.0
        && fog_color.z == 0.0
        && fog_color.y < 0.18
        && fog_color.x - fog_color.y > 0.1;
    (nether_fog_control && nether_fog_color) || under_lava
}
