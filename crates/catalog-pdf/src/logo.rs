//! Logo resolution
//!
//! The settings reference either the embedded default logo or a custom
//! image file. A missing or unreadable custom file degrades to no logo on
//! the page, reported as a warning; it never fails a build.

use crate::settings::{LogoSettings, LogoSource};
use crate::types::BuildWarning;

static BUILTIN_LOGO: &[u8] = include_bytes!("../assets/logo.png");

/// A decoded logo ready for embedding
#[derive(Debug, Clone)]
pub struct Logo {
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

/// Resolve the configured logo source to image bytes and pixel dimensions.
pub async fn resolve_logo(
    settings: &LogoSettings,
    warnings: &mut Vec<BuildWarning>,
) -> Option<Logo> {
    let bytes = match &settings.source {
        LogoSource::BuiltIn => BUILTIN_LOGO.to_vec(),
        LogoSource::Custom { path } => match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("could not read logo {}: {}", path.display(), err);
                warnings.push(BuildWarning::LogoUnavailable {
                    detail: format!("{}: {}", path.display(), err),
                });
                return None;
            }
        },
    };

    match image::load_from_memory(&bytes) {
        Ok(decoded) => Some(Logo {
            width_px: decoded.width(),
            height_px: decoded.height(),
            bytes,
        }),
        Err(err) => {
            log::warn!("could not decode logo: {}", err);
            warnings.push(BuildWarning::LogoUnavailable {
                detail: err.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_logo_decodes() {
        let mut warnings = Vec::new();
        let logo = resolve_logo(&LogoSettings::default(), &mut warnings).await;
        let logo = logo.expect("embedded logo must decode");
        assert!(logo.width_px > 0);
        assert!(logo.height_px > 0);
        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn test_missing_custom_logo_degrades() {
        let settings = LogoSettings {
            source: LogoSource::Custom {
                path: "/definitely/not/here.png".into(),
            },
            ..Default::default()
        };
        let mut warnings = Vec::new();
        assert!(resolve_logo(&settings, &mut warnings).await.is_none());
        assert_eq!(warnings.len(), 1);
    }
}
