mod logger;

use anyhow::{Context, Result};
use catalog_extract::{TesseractConfig, TesseractExtractor};
use catalog_pdf::{
    ArtworkSource, CatalogSettings, FontFamily, LogoPosition, LogoSource, Orientation, PageSize,
    RgbColor, build_catalog,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "artcat", about = "Artwork catalog generator", version)]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PDF catalog from artwork images
    Generate {
        /// Input image file(s), in catalog order
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Settings file; built-in defaults are used when it is absent
        #[arg(long, default_value = "catalog-settings.json")]
        config: PathBuf,

        /// Page size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Page orientation
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Logo anchor position
        #[arg(long, value_enum)]
        logo_position: Option<LogoPositionArg>,

        /// Logo width in mm
        #[arg(long)]
        logo_width: Option<f32>,

        /// Custom logo image file (default: the embedded logo)
        #[arg(long)]
        logo_file: Option<PathBuf>,

        /// Title font family
        #[arg(long, value_enum)]
        title_family: Option<FontArg>,

        /// Title font size in points
        #[arg(long)]
        title_size: Option<f32>,

        /// Title color as #RRGGBB
        #[arg(long)]
        title_color: Option<String>,

        /// Body font family
        #[arg(long, value_enum)]
        body_family: Option<FontArg>,

        /// Body font size in points
        #[arg(long)]
        body_size: Option<f32>,

        /// Body color as #RRGGBB
        #[arg(long)]
        body_color: Option<String>,

        /// OCR language(s), e.g. "eng" or "eng+spa"
        #[arg(long, default_value = "eng")]
        lang: String,

        /// Persist the resolved settings back to the settings file
        #[arg(long)]
        save_settings: bool,
    },

    /// Write a settings file with the built-in defaults
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogoPositionArg {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[derive(Clone, Copy, ValueEnum)]
enum FontArg {
    Helvetica,
    Times,
    Courier,
}

impl From<PaperArg> for PageSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<LogoPositionArg> for LogoPosition {
    fn from(arg: LogoPositionArg) -> Self {
        match arg {
            LogoPositionArg::TopLeft => Self::TopLeft,
            LogoPositionArg::TopCenter => Self::TopCenter,
            LogoPositionArg::TopRight => Self::TopRight,
            LogoPositionArg::BottomLeft => Self::BottomLeft,
            LogoPositionArg::BottomCenter => Self::BottomCenter,
            LogoPositionArg::BottomRight => Self::BottomRight,
        }
    }
}

impl From<FontArg> for FontFamily {
    fn from(arg: FontArg) -> Self {
        match arg {
            FontArg::Helvetica => Self::Helvetica,
            FontArg::Times => Self::Times,
            FontArg::Courier => Self::Courier,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logger::StderrLogger::init(cli.verbose) {
        eprintln!("could not install logger: {}", e);
    }

    match cli.command {
        Commands::Generate {
            input,
            output,
            config,
            paper,
            orientation,
            logo_position,
            logo_width,
            logo_file,
            title_family,
            title_size,
            title_color,
            body_family,
            body_size,
            body_color,
            lang,
            save_settings,
        } => {
            let mut settings = CatalogSettings::load_or_default(&config).await;

            if let Some(paper) = paper {
                settings.page_size = paper.into();
            }
            if let Some(orientation) = orientation {
                settings.orientation = orientation.into();
            }
            if let Some(position) = logo_position {
                settings.logo.position = position.into();
            }
            if let Some(width) = logo_width {
                settings.logo.width_mm = width;
            }
            if let Some(path) = logo_file {
                settings.logo.source = LogoSource::Custom { path };
            }
            if let Some(family) = title_family {
                settings.title_font.family = family.into();
            }
            if let Some(size) = title_size {
                settings.title_font.size_pt = size;
            }
            if let Some(color) = title_color {
                settings.title_font.color = parse_color(&color)?;
            }
            if let Some(family) = body_family {
                settings.body_font.family = family.into();
            }
            if let Some(size) = body_size {
                settings.body_font.size_pt = size;
            }
            if let Some(color) = body_color {
                settings.body_font.color = parse_color(&color)?;
            }

            settings.validate().context("invalid settings")?;

            let sources = read_sources(&input).await;

            let extractor = TesseractExtractor::new(TesseractConfig {
                lang: Some(lang),
                ..Default::default()
            })
            .context("OCR engine unavailable")?;

            let result = build_catalog(sources, &settings, Arc::new(extractor)).await?;

            tokio::fs::write(&output, &result.bytes)
                .await
                .with_context(|| format!("could not write {}", output.display()))?;

            println!(
                "Generated {} pages → {}",
                result.summary.pages,
                output.display()
            );
            if result.summary.skipped > 0 {
                println!("  Skipped images: {}", result.summary.skipped);
            }
            for warning in &result.summary.warnings {
                println!("  Warning: {}", warning);
            }

            if save_settings {
                settings
                    .save(&config)
                    .await
                    .with_context(|| format!("could not save {}", config.display()))?;
                println!("Settings saved → {}", config.display());
            }
        }

        Commands::InitConfig { path } => {
            CatalogSettings::default()
                .save(&path)
                .await
                .with_context(|| format!("could not write {}", path.display()))?;
            println!("Default settings written → {}", path.display());
        }
    }

    Ok(())
}

fn parse_color(value: &str) -> Result<RgbColor> {
    value
        .parse::<RgbColor>()
        .with_context(|| format!("invalid color '{}'", value))
}

/// Read the input files; an unreadable file is skipped with a warning,
/// matching the builder's per-item failure policy.
async fn read_sources(paths: &[PathBuf]) -> Vec<ArtworkSource> {
    let mut sources = Vec::with_capacity(paths.len());

    for path in paths {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                sources.push(ArtworkSource::new(name, bytes));
            }
            Err(err) => {
                log::warn!("skipping unreadable input {}: {}", path.display(), err);
            }
        }
    }

    sources
}
