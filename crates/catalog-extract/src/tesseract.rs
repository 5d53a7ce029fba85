//! Tesseract OCR engine (CLI wrapper)

use std::path::PathBuf;
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use image::DynamicImage;

use crate::{ExtractError, Result, TextExtractor};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Configuration for the `tesseract` binary.
#[derive(Debug, Clone, Default)]
pub struct TesseractConfig {
    /// Path to the binary; `tesseract` on PATH when unset
    pub binary_path: Option<String>,
    /// Language(s), e.g. "eng", "spa", "eng+spa"
    pub lang: Option<String>,
    /// Page segmentation mode
    pub psm: Option<u32>,
    /// Overrides TESSDATA_PREFIX for the child process
    pub tessdata_path: Option<String>,
}

impl TesseractConfig {
    pub fn lang_or_default(&self) -> &str {
        self.lang.as_deref().unwrap_or("eng")
    }

    pub fn psm_or_default(&self) -> u32 {
        self.psm.unwrap_or(3)
    }

    fn binary(&self) -> &str {
        self.binary_path.as_deref().unwrap_or("tesseract")
    }
}

/// Extracts text by shelling out to the Tesseract binary.
pub struct TesseractExtractor {
    config: TesseractConfig,
    version: String,
}

impl TesseractExtractor {
    /// Probes `tesseract --version` and fails if the binary is missing.
    pub fn new(config: TesseractConfig) -> Result<Self> {
        let version = detect_version(config.binary())?;
        log::info!("tesseract {} detected", version);
        Ok(Self { config, version })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn run(&self, image_path: &std::path::Path) -> Result<String> {
        let mut cmd = Command::new(self.config.binary());
        cmd.arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(self.config.lang_or_default())
            .arg("--psm")
            .arg(self.config.psm_or_default().to_string());

        if let Some(tessdata) = &self.config.tessdata_path {
            cmd.env("TESSDATA_PREFIX", tessdata);
        }

        let output = cmd.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Engine(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl TextExtractor for TesseractExtractor {
    fn extract(&self, image: &DynamicImage) -> Result<String> {
        let start = Instant::now();

        // Tesseract reads files, so stage the image as a temp PNG. The
        // counter keeps concurrent extractions from clobbering each other.
        let temp_input = temp_png_path();
        image.save(&temp_input)?;

        let result = self.run(&temp_input);
        let _ = std::fs::remove_file(&temp_input);

        let text = result?;
        log::debug!(
            "tesseract finished in {} ms ({} chars)",
            start.elapsed().as_millis(),
            text.len()
        );

        Ok(text)
    }
}

fn temp_png_path() -> PathBuf {
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "catalog_ocr_{}_{}.png",
        std::process::id(),
        seq
    ))
}

/// Runs `<binary> --version` and parses the version number.
pub fn detect_version(binary: &str) -> Result<String> {
    let output = Command::new(binary)
        .arg("--version")
        .output()
        .map_err(|e| ExtractError::Unavailable(format!("{}: {}", binary, e)))?;

    if !output.status.success() {
        return Err(ExtractError::Unavailable(format!(
            "{} --version exited with {}",
            binary, output.status
        )));
    }

    // Tesseract prints the banner on stderr on some platforms
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{}{}", stdout, stderr);

    Ok(parse_version_banner(&combined))
}

/// First line is usually "tesseract 5.3.0" or "tesseract v5.3.0".
fn parse_version_banner(banner: &str) -> String {
    for line in banner.lines() {
        if line.contains("tesseract") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 {
                return parts[1].trim_start_matches('v').to_string();
            }
        }
    }
    "unknown".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_banner() {
        assert_eq!(parse_version_banner("tesseract 5.3.0\n leptonica-1.82"), "5.3.0");
        assert_eq!(parse_version_banner("tesseract v4.1.1"), "4.1.1");
        assert_eq!(parse_version_banner("no banner here"), "unknown");
    }

    #[test]
    fn test_config_defaults() {
        let config = TesseractConfig::default();
        assert_eq!(config.lang_or_default(), "eng");
        assert_eq!(config.psm_or_default(), 3);
        assert_eq!(config.binary(), "tesseract");
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let a = temp_png_path();
        let b = temp_png_path();
        assert_ne!(a, b);
    }
}
