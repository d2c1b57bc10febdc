use skyshade_core::config::{CloudKind, CloudLayerParams};
use skyshade_core::constants::MAX_CLOUD_STEPS;
use skyshade_core::ShaderConfig;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Cloud layer '{layer}' has {steps} steps, expected 1..={max}")]
    CloudStepsOutOfRange { layer: &'static str, steps: u32, max: u32 },
    #[error("Cloud layer '{layer}' {field} must be positive, got {value}")]
    CloudNotPositive {
        layer: &'static str,
        field: &'static str,
        value: f32,
    },
    #[error("Cloud layer '{layer}' shape component {value} outside [0, 1]")]
    CloudShapeOutOfRange { layer: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} = {value} outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("Twinkling stars and galaxy stars are both enabled for the {dimension}; pick one")]
    ConflictingStarLayers { dimension: &'static str },
    #[error("Second rounded cloud layer is enabled but clouds are {kind:?}")]
    Layer2WithoutRoundedClouds { kind: CloudKind },
    #[error("Box multilayer is enabled but clouds are {kind:?}")]
    MultilayerWithoutBoxClouds { kind: CloudKind },
}

fn check_positive(errors: &mut Vec<ValidationError>, name: &'static str, value: f32) {
    // NaN fails this check too.
    if !(value > 0.0) {
        errors.push(ValidationError::NotPositive { name, value });
    }
}

fn check_non_negative(errors: &mut Vec<ValidationError>, name: &'static str, value: f32) {
    if !(value >= 0.0) {
        errors.push(ValidationError::Negative { name, value });
    }
}

fn check_range(errors: &mut Vec<ValidationError>, name: &'static str, value: f32, min: f32, max: f32) {
    if !(value >= min && value <= max) {
        errors.push(ValidationError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
}

fn validate_cloud_layer(
    errors: &mut Vec<ValidationError>,
    layer: &'static str,
    params: &CloudLayerParams,
) {
    if params.steps == 0 || params.steps > MAX_CLOUD_STEPS {
        errors.push(ValidationError::CloudStepsOutOfRange {
            layer,
            steps: params.steps,
            max: MAX_CLOUD_STEPS,
        });
    }

    let positive = [
        ("thickness", params.thickness),
        ("rain_thickness", params.rain_thickness),
        ("density", params.density),
        ("scale.x", params.scale.x),
        ("scale.y", params.scale.y),
    ];
    for (field, value) in positive {
        if !(value > 0.0) {
            errors.push(ValidationError::CloudNotPositive {
                layer,
                field,
                value,
            });
        }
    }

    for value in [params.shape.x, params.shape.y] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::CloudShapeOutOfRange { layer, value });
        }
    }
}

/// Validate a configuration after profiles have been applied.
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_config(cfg: &ShaderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Color correction
    check_positive(&mut errors, "tonemap.gamma", cfg.tonemap.gamma);
    check_positive(&mut errors, "tonemap.exposure", cfg.tonemap.exposure);
    check_non_negative(&mut errors, "tonemap.saturation", cfg.tonemap.saturation);

    // Clouds: only the layers of the selected algorithm must be usable.
    match cfg.clouds.kind {
        CloudKind::Rounded => {
            validate_cloud_layer(&mut errors, "rounded.layer1", &cfg.clouds.rounded.layer1);
            if cfg.clouds.rounded.layer2_enabled {
                validate_cloud_layer(&mut errors, "rounded.layer2", &cfg.clouds.rounded.layer2);
            }
        }
        CloudKind::Soft => {
            check_positive(&mut errors, "clouds.soft.scale.x", cfg.clouds.soft.scale.x);
            check_positive(&mut errors, "clouds.soft.scale.y", cfg.clouds.soft.scale.y);
            check_range(&mut errors, "clouds.soft.opacity", cfg.clouds.soft.opacity, 0.0, 1.0);
        }
        CloudKind::Vanilla => {
            check_positive(&mut errors, "clouds.vanilla.thickness", cfg.clouds.vanilla.thickness);
            check_positive(
                &mut errors,
                "clouds.vanilla.rain_thickness",
                cfg.clouds.vanilla.rain_thickness,
            );
            check_positive(&mut errors, "clouds.vanilla.cell_size", cfg.clouds.vanilla.cell_size);
            check_range(&mut errors, "clouds.vanilla.opacity", cfg.clouds.vanilla.opacity, 0.0, 1.0);
        }
    }
    if cfg.clouds.rounded.layer2_enabled && cfg.clouds.kind != CloudKind::Rounded {
        errors.push(ValidationError::Layer2WithoutRoundedClouds {
            kind: cfg.clouds.kind,
        });
    }
    if cfg.clouds.vanilla.multilayer && cfg.clouds.kind != CloudKind::Vanilla {
        errors.push(ValidationError::MultilayerWithoutBoxClouds {
            kind: cfg.clouds.kind,
        });
    }

    // Celestial
    check_positive(&mut errors, "shooting_star.period", cfg.shooting_star.period);
    check_non_negative(&mut errors, "shooting_star.delay", cfg.shooting_star.delay);
    check_range(&mut errors, "galaxy.day_visibility", cfg.galaxy.day_visibility, 0.0, 1.0);
    check_range(&mut errors, "stars.day_visibility", cfg.stars.day_visibility, 0.0, 1.0);
    check_range(&mut errors, "galaxy.vibrance", cfg.galaxy.vibrance, 0.0, 1.0);
    if cfg.aurora.intensity.is_some() {
        check_positive(&mut errors, "aurora.width", cfg.aurora.width);
    }
    if cfg.stars.intensity.is_some() && cfg.galaxy.intensity.is_some() {
        errors.push(ValidationError::ConflictingStarLayers {
            dimension: "overworld",
        });
    }
    if cfg.stars.end_intensity.is_some() && cfg.galaxy.end_intensity.is_some() {
        errors.push(ValidationError::ConflictingStarLayers { dimension: "end" });
    }
    if cfg.black_hole.enabled {
        check_positive(&mut errors, "black_hole.dist", cfg.black_hole.dist);
    }

    // Glow
    check_non_negative(&mut errors, "glow.brightness", cfg.glow.brightness);
    if let Some(leak) = cfg.glow.leak {
        check_range(&mut errors, "glow.leak", leak, 0.0, 1.0);
    }
    if let Some(shimmer) = cfg.glow.shimmer {
        check_range(&mut errors, "glow.shimmer", shimmer, 0.0, 1.0);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ShaderConfig::default()), Ok(()));
    }

    #[test]
    fn test_cloud_steps_out_of_range() {
        let mut cfg = ShaderConfig::default();
        cfg.clouds.rounded.layer1.steps = 0;
        let errors = validate_config(&cfg).unwrap_err();
        assert!(matches!(
            errors[0],
            ValidationError::CloudStepsOutOfRange { steps: 0, .. }
        ));

        cfg.clouds.rounded.layer1.steps = MAX_CLOUD_STEPS + 1;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_layer2_only_checked_when_enabled() {
        let mut cfg = ShaderConfig::default();
        cfg.clouds.rounded.layer2.density = 0.0;
        assert!(validate_config(&cfg).is_ok());

        cfg.clouds.rounded.layer2_enabled = true;
        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::CloudNotPositive {
                layer: "rounded.layer2",
                field: "density",
                ..
            }
        ));
    }

    #[test]
    fn test_shape_out_of_range() {
        let mut cfg = ShaderConfig::default();
        cfg.clouds.rounded.layer1.shape = Vec2::new(1.5, -0.1);
        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_nan_rejected() {
        let mut cfg = ShaderConfig::default();
        cfg.shooting_star.period = f32::NAN;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_conflicting_star_layers() {
        let mut cfg = ShaderConfig::default();
        cfg.stars.intensity = Some(1.0);
        cfg.galaxy.intensity = Some(1.0);
        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ConflictingStarLayers {
                dimension: "overworld"
            }]
        );
    }

    #[test]
    fn test_layer2_requires_rounded() {
        let mut cfg = ShaderConfig::default();
        cfg.clouds.kind = CloudKind::Soft;
        cfg.clouds.rounded.layer2_enabled = true;
        let errors = validate_config(&cfg).unwrap_err();
        assert!(errors.contains(&ValidationError::Layer2WithoutRoundedClouds {
            kind: CloudKind::Soft
        }));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut cfg = ShaderConfig::default();
        cfg.tonemap.gamma = 0.0;
        cfg.glow.brightness = -1.0;
        cfg.shooting_star.delay = -2.0;
        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
