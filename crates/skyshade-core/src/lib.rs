pub mod config;
pub mod constants;
pub mod math;
pub mod noise;

pub use config::ShaderConfig;
