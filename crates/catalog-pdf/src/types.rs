use printpdf::BuiltinFont;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No images to build")]
    NoImages,
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Supported page formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Base dimensions in portrait (width < height)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }

    /// Dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "Letter",
        }
    }
}

/// The six logo anchor points: top/bottom edge × left/center/right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoPosition {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl LogoPosition {
    pub fn is_top(self) -> bool {
        matches!(
            self,
            LogoPosition::TopLeft | LogoPosition::TopCenter | LogoPosition::TopRight
        )
    }

    pub fn key(self) -> &'static str {
        match self {
            LogoPosition::TopLeft => "top-left",
            LogoPosition::TopCenter => "top-center",
            LogoPosition::TopRight => "top-right",
            LogoPosition::BottomLeft => "bottom-left",
            LogoPosition::BottomCenter => "bottom-center",
            LogoPosition::BottomRight => "bottom-right",
        }
    }
}

/// Font families available on the PDF surface without embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    pub fn builtin(self) -> BuiltinFont {
        match self {
            FontFamily::Helvetica => BuiltinFont::Helvetica,
            FontFamily::Times => BuiltinFont::TimesRoman,
            FontFamily::Courier => BuiltinFont::Courier,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times",
            FontFamily::Courier => "Courier",
        }
    }
}

/// An RGB color, persisted in "#RRGGBB" form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl std::str::FromStr for RgbColor {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CatalogError::Config(format!(
                "Invalid color '{}': expected #RRGGBB",
                s
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| CatalogError::Config(e.to_string()))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| CatalogError::Config(e.to_string()))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| CatalogError::Config(e.to_string()))?;
        Ok(Self { r, g, b })
    }
}

impl std::fmt::Display for RgbColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A rectangular area on the page, in millimeters.
///
/// `y_mm` is measured from the TOP edge of the page; the composer converts
/// to the PDF's bottom-up coordinates when emitting ops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Frame {
    pub fn new(x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32) -> Self {
        Self {
            x_mm,
            y_mm,
            width_mm,
            height_mm,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x_mm + self.width_mm
    }

    /// Bottom edge measured from the page top
    pub fn bottom(&self) -> f32 {
        self.y_mm + self.height_mm
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x_mm + self.width_mm / 2.0
    }
}

/// One uploaded image, as handed to the builder
#[derive(Debug, Clone)]
pub struct ArtworkSource {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ArtworkSource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A decoded artwork with its extracted text, ready for composition
#[derive(Debug, Clone)]
pub struct ArtworkItem {
    pub name: String,
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub text: String,
    pub order_index: usize,
}

/// Non-fatal per-item problems surfaced alongside the output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    #[error("could not read image '{name}': {detail}")]
    UnreadableImage { name: String, detail: String },
    #[error("text extraction failed for '{name}': {detail}")]
    ExtractionFailed { name: String, detail: String },
    #[error("could not embed image '{name}': {detail}")]
    ImageEmbedFailed { name: String, detail: String },
    #[error("logo unavailable: {detail}")]
    LogoUnavailable { detail: String },
}

/// Statistics about a finished build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    /// Number of images handed in
    pub source_count: usize,
    /// Pages in the output document
    pub pages: usize,
    /// Images dropped because they could not be decoded
    pub skipped: usize,
    /// Per-item warnings, in the order they occurred
    pub warnings: Vec<BuildWarning>,
}

/// Final catalog bytes plus the build statistics
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub bytes: Vec<u8>,
    pub summary: BuildSummary,
}
