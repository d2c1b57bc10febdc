use glam::Vec3;
use skyshade_render::{DimensionFlags, Environment};

/// Configuration for a single benchmark scene.
#[derive(Debug, Clone, Copy)]
pub struct SceneConfig {
    pub name: &'static str,
    pub fog_color: [f32; 3],
    pub flags: DimensionFlags,
    pub rain: f32,
    /// Scene clock at the first frame, seconds.
    pub start_time: f32,
}

impl SceneConfig {
    pub fn environment(&self) -> Environment {
        Environment::new(self.flags, self.rain)
    }

    pub fn fog(&self) -> Vec3 {
        Vec3::from_array(self.fog_color)
    }
}

const OVERWORLD: DimensionFlags = DimensionFlags {
    underwater: false,
    nether: false,
    end: false,
};

/// Return the standard suite: one scene per time of day, weather, and dimension.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "noon",
            fog_color: [1.0, 1.0, 1.0],
            flags: OVERWORLD,
            rain: 0.0,
            start_time: 100.0,
        },
        SceneConfig {
            name: "dawn",
            fog_color: [0.8, 0.35, 0.15],
            flags: OVERWORLD,
            rain: 0.0,
            start_time: 200.0,
        },
        SceneConfig {
            name: "night",
            fog_color: [0.0, 0.0, 0.0],
            flags: OVERWORLD,
            rain: 0.0,
            start_time: 300.0,
        },
        SceneConfig {
            name: "rain",
            fog_color: [0.3, 0.3, 0.35],
            flags: OVERWORLD,
            rain: 1.0,
            start_time: 400.0,
        },
        SceneConfig {
            name: "underwater",
            fog_color: [0.05, 0.25, 0.45],
            flags: DimensionFlags {
                underwater: true,
                ..OVERWORLD
            },
            rain: 0.0,
            start_time: 500.0,
        },
        SceneConfig {
            name: "end",
            fog_color: [0.06, 0.03, 0.1],
            flags: DimensionFlags {
                end: true,
                ..OVERWORLD
            },
            rain: 0.0,
            start_time: 600.0,
        },
        SceneConfig {
            name: "nether",
            fog_color: [0.33, 0.08, 0.03],
            flags: DimensionFlags {
                nether: true,
                ..OVERWORLD
            },
            rain: 0.0,
            start_time: 700.0,
        },
    ]
}
