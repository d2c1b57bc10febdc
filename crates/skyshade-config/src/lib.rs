pub mod profile;
pub mod validator;

pub use profile::Profile;
pub use validator::ValidationError;

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use skyshade_core::ShaderConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse shader config RON: {0}")]
    ConfigParseError(String),
    #[error("Failed to parse variant manifest RON: {0}")]
    ManifestParseError(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Configuration rejected with {} error(s): {}", .0.len(), join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A build variant: a named set of profiles applied on top of the base table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantManifest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

/// A validated configuration with all profiles applied. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    config: ShaderConfig,
    profiles: Vec<Profile>,
}

impl ResolvedConfig {
    pub fn config(&self) -> &ShaderConfig {
        &self.config
    }

    /// Profiles that were applied, in application order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }
}

impl Deref for ResolvedConfig {
    type Target = ShaderConfig;

    fn deref(&self) -> &ShaderConfig {
        &self.config
    }
}

/// Parse a shader config from RON. Knobs missing from the source keep
/// their reference values.
pub fn load_config_from_str(ron_str: &str) -> Result<ShaderConfig, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::ConfigParseError(e.to_string()))
}

/// Parse a variant manifest from RON.
pub fn load_variant_manifest(ron_str: &str) -> Result<VariantManifest, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::ManifestParseError(e.to_string()))
}

/// Apply `profiles` to `base` and validate the result.
pub fn resolve(mut base: ShaderConfig, profiles: &[Profile]) -> Result<ResolvedConfig, ConfigError> {
    let applied = profile::expand(profiles);
    profile::apply_profiles(&mut base, &applied);

    if let Err(errors) = validator::validate_config(&base) {
        for e in &errors {
            log::warn!("Invalid shader config: {e}");
        }
        return Err(ConfigError::Invalid(errors));
    }

    log::debug!(
        "Resolved config: clouds {:?}, end sky {:?}, tone curve {:?}",
        base.clouds.kind,
        base.sky.end_sky,
        base.tonemap.curve
    );
    Ok(ResolvedConfig {
        config: base,
        profiles: applied,
    })
}

/// Load a base config and a variant manifest, then resolve.
pub fn resolve_variant(config_ron: &str, manifest_ron: &str) -> Result<ResolvedConfig, ConfigError> {
    let base = load_config_from_str(config_ron)?;
    let manifest = load_variant_manifest(manifest_ron)?;
    log::info!(
        "Resolving variant '{}' ({} profile(s))",
        manifest.name,
        manifest.profiles.len()
    );
    resolve(base, &manifest.profiles)
}
