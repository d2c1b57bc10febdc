pub mod aurora;
pub mod celestial;
pub mod clouds;
pub mod end;
pub mod env;
pub mod error;
pub mod glow;
pub mod shader;
pub mod sky;
pub mod sky_color;
pub mod texture;
pub mod tonemap;
pub mod uniforms;

pub use clouds::{BoxClouds, CloudStyle, RoundedClouds, SoftClouds};
pub use end::{EndRings, EndSkyStyle, EndStreaks};
pub use env::{DimensionFlags, Environment, FogControl};
pub use error::RenderError;
pub use shader::{DefaultShader, FragmentInputs, Shader};
pub use sky_color::SkyColor;
pub use texture::{TexelSource, Texture};
pub use tonemap::{Aces, Exponential, ExtendedReinhard, Reinhard, ToneCurve};
pub use uniforms::FrameUniforms;
