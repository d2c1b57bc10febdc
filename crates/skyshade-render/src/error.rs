//! Errors raised when building a shader variant.

use skyshade_core::config::{CloudKind, EndSkyKind, ToneCurveKind};
use thiserror::Error;

/// A resolved configuration that does not match the compiled build variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Config selects {configured:?} clouds but the shader was built for {compiled:?}")]
    CloudStyleMismatch {
        compiled: CloudKind,
        configured: CloudKind,
    },
    #[error("Config selects end sky {configured:?} but the shader was built for {compiled:?}")]
    EndSkyMismatch {
        compiled: EndSkyKind,
        configured: EndSkyKind,
    },
    #[error("Config selects tone curve {configured:?} but the shader was built for {compiled:?}")]
    ToneCurveMismatch {
        compiled: ToneCurveKind,
        configured: ToneCurveKind,
    },
    #[error("Toggle '{name}' is {} in the build but {} in the config", on_off(.compiled), on_off(.configured))]
    ToggleMismatch {
        name: &'static str,
        compiled: bool,
        configured: bool,
    },
}

fn on_off(b: &bool) -> &'static str {
    if *b {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_mismatch_message() {
        let err = RenderError::ToggleMismatch {
            name: "aurora",
            compiled: true,
            configured: false,
        };
        assert_eq!(
            err.to_string(),
            "Toggle 'aurora' is on in the build but off in the config"
        );
    }

    #[test]
    fn test_kind_mismatch_message() {
        let err = RenderError::CloudStyleMismatch {
            compiled: CloudKind::Rounded,
            configured: CloudKind::Soft,
        };
        assert!(err.to_string().contains("Soft clouds"));
    }
}
