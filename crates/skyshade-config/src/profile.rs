//! Named build profiles.
//!
//! A profile rewrites a fixed subset of the tuning table. Profiles are
//! applied once, at resolution time, in a canonical order that does not
//! depend on the order the caller listed them in.

use serde::{Deserialize, Serialize};
use skyshade_core::config::CloudKind;
use skyshade_core::ShaderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Profile {
    /// Shorthand for `NoWave` + `NoFog`.
    NoWaveNoFog,
    NoFog,
    NoWave,
    ChunkAnim,
    SimpleCloud,
    /// Shorthand for `BoxCloud` with a second box layer.
    BoxMultilayer,
    BoxCloud,
    RoundedMultilayer,
    AlwaysReflection,
    TwinkleStars,
    GalaxyStars,
}

impl Profile {
    /// Canonical application order.
    pub const ORDER: [Profile; 11] = [
        Profile::NoWaveNoFog,
        Profile::NoFog,
        Profile::NoWave,
        Profile::ChunkAnim,
        Profile::SimpleCloud,
        Profile::BoxMultilayer,
        Profile::BoxCloud,
        Profile::RoundedMultilayer,
        Profile::AlwaysReflection,
        Profile::TwinkleStars,
        Profile::GalaxyStars,
    ];

    /// Profiles implied by this one (not including itself).
    pub fn implies(self) -> &'static [Profile] {
        match self {
            Profile::NoWaveNoFog => &[Profile::NoWave, Profile::NoFog],
            Profile::BoxMultilayer => &[Profile::BoxCloud],
            _ => &[],
        }
    }

    fn rank(self) -> usize {
        Profile::ORDER
            .iter()
            .position(|p| *p == self)
            .unwrap_or(Profile::ORDER.len())
    }

    /// Apply this profile's own rewrites (implied profiles are applied separately).
    pub fn apply(self, cfg: &mut ShaderConfig) {
        match self {
            Profile::NoWaveNoFog => {}
            Profile::NoFog => {
                cfg.fog.fog = None;
            }
            Profile::NoWave => {
                cfg.wave.plants = None;
                cfg.wave.lantern = None;
                cfg.underwater.wave = None;
                cfg.water.wave = false;
                cfg.fog.rain_mist_opacity = None;
            }
            Profile::ChunkAnim => {
                cfg.chunk_load_anim = Some(20.0);
            }
            Profile::SimpleCloud => {
                cfg.clouds.kind = CloudKind::Soft;
                cfg.aurora.intensity = None;
            }
            Profile::BoxMultilayer => {
                cfg.clouds.vanilla.multilayer = true;
            }
            Profile::BoxCloud => {
                cfg.clouds.kind = CloudKind::Vanilla;
            }
            Profile::RoundedMultilayer => {
                cfg.clouds.rounded.layer2_enabled = true;
            }
            Profile::AlwaysReflection => {
                cfg.reflection.force_only_end = false;
            }
            Profile::TwinkleStars => {
                cfg.stars.intensity = Some(1.4);
                cfg.stars.end_intensity = Some(1.8);
            }
            Profile::GalaxyStars => {
                cfg.galaxy.intensity = Some(1.2);
                cfg.galaxy.end_intensity = Some(1.4);
            }
        }
    }
}

/// Expand shorthands, drop duplicates, and sort into application order.
pub fn expand(profiles: &[Profile]) -> Vec<Profile> {
    let mut out: Vec<Profile> = Vec::new();
    for &p in profiles {
        for &q in std::iter::once(&p).chain(p.implies()) {
            if !out.contains(&q) {
                out.push(q);
            }
        }
    }
    out.sort_by_key(|p| p.rank());
    out
}

/// Apply a set of profiles to `cfg` in canonical order.
pub fn apply_profiles(cfg: &mut ShaderConfig, profiles: &[Profile]) {
    for p in expand(profiles) {
        log::info!("Applying profile {:?}", p);
        p.apply(cfg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_shorthands() {
        let list = expand(&[Profile::NoWaveNoFog]);
        assert_eq!(
            list,
            vec![Profile::NoWaveNoFog, Profile::NoFog, Profile::NoWave]
        );
        let list = expand(&[Profile::BoxMultilayer]);
        assert!(list.contains(&Profile::BoxCloud));
    }

    #[test]
    fn test_expand_order_independent() {
        let a = expand(&[Profile::GalaxyStars, Profile::NoFog, Profile::SimpleCloud]);
        let b = expand(&[Profile::SimpleCloud, Profile::GalaxyStars, Profile::NoFog]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_expand_dedupes() {
        let list = expand(&[Profile::NoFog, Profile::NoWaveNoFog, Profile::NoFog]);
        assert_eq!(list.iter().filter(|p| **p == Profile::NoFog).count(), 1);
    }

    #[test]
    fn test_no_wave_no_fog() {
        let mut cfg = ShaderConfig::default();
        apply_profiles(&mut cfg, &[Profile::NoWaveNoFog]);
        assert_eq!(cfg.fog.fog, None);
        assert_eq!(cfg.wave.plants, None);
        assert_eq!(cfg.wave.lantern, None);
        assert_eq!(cfg.underwater.wave, None);
        assert!(!cfg.water.wave);
        assert_eq!(cfg.fog.rain_mist_opacity, None);
        // Untouched knobs keep their values.
        assert_eq!(cfg.wave.speed, 2.8);
    }

    #[test]
    fn test_simple_cloud_drops_aurora() {
        let mut cfg = ShaderConfig::default();
        apply_profiles(&mut cfg, &[Profile::SimpleCloud]);
        assert_eq!(cfg.clouds.kind, CloudKind::Soft);
        assert_eq!(cfg.aurora.intensity, None);
    }

    #[test]
    fn test_box_cloud_wins_over_simple_cloud() {
        // BoxCloud is applied after SimpleCloud in canonical order.
        let mut cfg = ShaderConfig::default();
        apply_profiles(&mut cfg, &[Profile::BoxCloud, Profile::SimpleCloud]);
        assert_eq!(cfg.clouds.kind, CloudKind::Vanilla);
    }

    #[test]
    fn test_box_multilayer() {
        let mut cfg = ShaderConfig::default();
        apply_profiles(&mut cfg, &[Profile::BoxMultilayer]);
        assert_eq!(cfg.clouds.kind, CloudKind::Vanilla);
        assert!(cfg.clouds.vanilla.multilayer);
    }

    #[test]
    fn test_star_profiles() {
        let mut cfg = ShaderConfig::default();
        apply_profiles(&mut cfg, &[Profile::TwinkleStars]);
        assert_eq!(cfg.stars.intensity, Some(1.4));
        assert_eq!(cfg.stars.end_intensity, Some(1.8));

        let mut cfg = ShaderConfig::default();
        apply_profiles(&mut cfg, &[Profile::GalaxyStars]);
        assert_eq!(cfg.galaxy.intensity, Some(1.2));
        assert_eq!(cfg.galaxy.end_intensity, Some(1.4));
    }

    #[test]
    fn test_misc_profiles() {
        let mut cfg = ShaderConfig::default();
        apply_profiles(
            &mut cfg,
            &[Profile::ChunkAnim, Profile::RoundedMultilayer, Profile::AlwaysReflection],
        );
        assert_eq!(cfg.chunk_load_anim, Some(20.0));
        assert!(cfg.clouds.rounded.layer2_enabled);
        assert!(!cfg.reflection.force_only_end);
    }
}
