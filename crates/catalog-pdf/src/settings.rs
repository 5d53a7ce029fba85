use crate::constants::{MAX_FONT_SIZE_PT, MAX_LOGO_WIDTH_MM, MIN_FONT_SIZE_PT};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the logo artwork comes from. Exactly one source is ever active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogoSource {
    /// The embedded default logo
    #[default]
    BuiltIn,
    /// A user-provided image file
    Custom { path: PathBuf },
}

/// Branding block: which logo, how wide, which anchor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogoSettings {
    pub source: LogoSource,
    pub width_mm: f32,
    pub position: LogoPosition,
}

impl Default for LogoSettings {
    fn default() -> Self {
        Self {
            source: LogoSource::BuiltIn,
            width_mm: 25.0,
            position: LogoPosition::TopLeft,
        }
    }
}

/// Typography for one text role
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FontSettings {
    pub family: FontFamily,
    pub size_pt: f32,
    pub color: RgbColor,
}

/// Resolved layout, branding and typography for one build.
///
/// Shared read-only across every page composition of a build; mutated only
/// through explicit user edits, persisted back on change.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogSettings {
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub logo: LogoSettings,
    pub title_font: FontSettings,
    pub body_font: FontSettings,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            logo: LogoSettings::default(),
            title_font: FontSettings {
                family: FontFamily::Helvetica,
                size_pt: 14.0,
                color: RgbColor::new(0x1E, 0x40, 0xAF),
            },
            body_font: FontSettings {
                family: FontFamily::Helvetica,
                size_pt: 11.0,
                color: RgbColor::new(0x0F, 0x17, 0x2A),
            },
        }
    }
}

impl CatalogSettings {
    /// Load settings from a JSON file, failing loudly on any problem
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let settings: Self = serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings, falling back to the built-in defaults when the file is
    /// missing, unparseable, or fails validation.
    ///
    /// Corrupt fields are never partially applied: any problem discards the
    /// whole stored record.
    #[cfg(feature = "serde")]
    pub async fn load_or_default(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path).await {
            Ok(settings) => settings,
            Err(CatalogError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no settings at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!(
                    "ignoring settings at {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CatalogError::Config(format!("Failed to serialize settings: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the settings.
    ///
    /// Malformed values are rejected here, at edit time; composition assumes
    /// a validated configuration and has no error path of its own.
    pub fn validate(&self) -> Result<()> {
        if self.logo.width_mm <= 0.0 || self.logo.width_mm > MAX_LOGO_WIDTH_MM {
            return Err(CatalogError::Config(format!(
                "Logo width must be in (0, {}] mm, got {}",
                MAX_LOGO_WIDTH_MM, self.logo.width_mm
            )));
        }

        if let LogoSource::Custom { path } = &self.logo.source {
            if path.as_os_str().is_empty() {
                return Err(CatalogError::Config(
                    "Custom logo source requires a file path".to_string(),
                ));
            }
        }

        for (role, font) in [("title", &self.title_font), ("body", &self.body_font)] {
            if font.size_pt < MIN_FONT_SIZE_PT || font.size_pt > MAX_FONT_SIZE_PT {
                return Err(CatalogError::Config(format!(
                    "{} font size must be in [{}, {}] pt, got {}",
                    role, MIN_FONT_SIZE_PT, MAX_FONT_SIZE_PT, font.size_pt
                )));
            }
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    // Manual implementations keep the stored form stable and human-editable:
    // plain strings for the enums, "#RRGGBB" for colors.

    impl Serialize for PageSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for PageSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            match s.as_str() {
                "A4" => Ok(PageSize::A4),
                "Letter" => Ok(PageSize::Letter),
                _ => Err(serde::de::Error::unknown_variant(&s, &["A4", "Letter"])),
            }
        }
    }

    impl Serialize for Orientation {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(match self {
                Orientation::Portrait => "Portrait",
                Orientation::Landscape => "Landscape",
            })
        }
    }

    impl<'de> Deserialize<'de> for Orientation {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            match s.as_str() {
                "Portrait" => Ok(Orientation::Portrait),
                "Landscape" => Ok(Orientation::Landscape),
                _ => Err(serde::de::Error::unknown_variant(
                    &s,
                    &["Portrait", "Landscape"],
                )),
            }
        }
    }

    impl Serialize for LogoPosition {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.key())
        }
    }

    impl<'de> Deserialize<'de> for LogoPosition {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            match s.as_str() {
                "top-left" => Ok(LogoPosition::TopLeft),
                "top-center" => Ok(LogoPosition::TopCenter),
                "top-right" => Ok(LogoPosition::TopRight),
                "bottom-left" => Ok(LogoPosition::BottomLeft),
                "bottom-center" => Ok(LogoPosition::BottomCenter),
                "bottom-right" => Ok(LogoPosition::BottomRight),
                _ => Err(serde::de::Error::unknown_variant(
                    &s,
                    &[
                        "top-left",
                        "top-center",
                        "top-right",
                        "bottom-left",
                        "bottom-center",
                        "bottom-right",
                    ],
                )),
            }
        }
    }

    impl Serialize for FontFamily {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for FontFamily {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            match s.as_str() {
                // "Arial" appears in settings written by older versions
                "Helvetica" | "Arial" => Ok(FontFamily::Helvetica),
                "Times" => Ok(FontFamily::Times),
                "Courier" => Ok(FontFamily::Courier),
                _ => Err(serde::de::Error::unknown_variant(
                    &s,
                    &["Helvetica", "Times", "Courier"],
                )),
            }
        }
    }

    impl Serialize for RgbColor {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for RgbColor {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            s.parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid color '{}'", s)))
        }
    }

    impl Serialize for LogoSource {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;
            match self {
                LogoSource::BuiltIn => serializer.serialize_str("BuiltIn"),
                LogoSource::Custom { path } => {
                    let mut s = serializer.serialize_struct("Custom", 1)?;
                    s.serialize_field("path", path)?;
                    s.end()
                }
            }
        }
    }

    impl<'de> Deserialize<'de> for LogoSource {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            use serde::de::{self, MapAccess, Visitor};
            use std::fmt;

            struct LogoSourceVisitor;

            impl<'de> Visitor<'de> for LogoSourceVisitor {
                type Value = LogoSource;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a logo source")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<LogoSource, E>
                where
                    E: de::Error,
                {
                    match value {
                        "BuiltIn" => Ok(LogoSource::BuiltIn),
                        _ => Err(de::Error::unknown_variant(value, &["BuiltIn", "Custom"])),
                    }
                }

                fn visit_map<M>(self, mut map: M) -> std::result::Result<LogoSource, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    let mut path = None;
                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "path" => path = Some(map.next_value()?),
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    match path {
                        Some(path) => Ok(LogoSource::Custom { path }),
                        None => Err(de::Error::missing_field("path")),
                    }
                }
            }

            deserializer.deserialize_any(LogoSourceVisitor)
        }
    }
} // end of serde_impls module
