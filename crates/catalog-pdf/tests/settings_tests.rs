use catalog_pdf::*;

#[test]
fn test_defaults_are_valid() {
    let settings = CatalogSettings::default();
    assert!(settings.validate().is_ok());
    assert_eq!(settings.page_size, PageSize::A4);
    assert_eq!(settings.orientation, Orientation::Portrait);
    assert_eq!(settings.logo.position, LogoPosition::TopLeft);
    assert_eq!(settings.logo.width_mm, 25.0);
}

#[test]
fn test_validation_rejects_bad_logo_width() {
    let mut settings = CatalogSettings::default();

    settings.logo.width_mm = 0.0;
    assert!(settings.validate().is_err());

    settings.logo.width_mm = -3.0;
    assert!(settings.validate().is_err());

    settings.logo.width_mm = 500.0;
    assert!(settings.validate().is_err());

    settings.logo.width_mm = 40.0;
    assert!(settings.validate().is_ok());
}

#[test]
fn test_validation_rejects_bad_font_sizes() {
    let mut settings = CatalogSettings::default();

    settings.title_font.size_pt = 2.0;
    assert!(settings.validate().is_err());

    settings.title_font.size_pt = 14.0;
    settings.body_font.size_pt = 100.0;
    assert!(settings.validate().is_err());

    settings.body_font.size_pt = 11.0;
    assert!(settings.validate().is_ok());
}

#[test]
fn test_validation_rejects_empty_custom_logo_path() {
    let mut settings = CatalogSettings::default();
    settings.logo.source = LogoSource::Custom { path: "".into() };
    let result = settings.validate();
    assert!(result.is_err());
    match result {
        Err(CatalogError::Config(msg)) => assert!(msg.contains("logo")),
        _ => panic!("Expected Config error"),
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_settings() {
    use tempfile::NamedTempFile;

    let mut settings = CatalogSettings::default();
    settings.page_size = PageSize::Letter;
    settings.orientation = Orientation::Landscape;
    settings.logo.source = LogoSource::Custom {
        path: "assets/my_logo.png".into(),
    };
    settings.logo.width_mm = 42.0;
    settings.logo.position = LogoPosition::BottomCenter;
    settings.title_font.family = FontFamily::Times;
    settings.title_font.size_pt = 18.0;
    settings.title_font.color = RgbColor::new(0xC8, 0x00, 0x00);
    settings.body_font.family = FontFamily::Courier;

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    // Save
    settings.save(path).await.unwrap();

    // Load
    let loaded = CatalogSettings::load(path).await.unwrap();

    assert_eq!(loaded, settings);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_or_default_missing_file() {
    let settings = CatalogSettings::load_or_default("/no/such/settings.json").await;
    assert_eq!(settings, CatalogSettings::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_or_default_corrupt_json() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), b"{ not json")
        .await
        .unwrap();

    let settings = CatalogSettings::load_or_default(temp_file.path()).await;
    assert_eq!(settings, CatalogSettings::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_or_default_unknown_enum_value() {
    use tempfile::NamedTempFile;

    let mut settings = CatalogSettings::default();
    settings.page_size = PageSize::Letter;
    let json = serde_json::to_string_pretty(&settings).unwrap();
    let json = json.replace("Letter", "Tabloid");

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), json).await.unwrap();

    // Corrupt fields are never partially applied
    let loaded = CatalogSettings::load_or_default(temp_file.path()).await;
    assert_eq!(loaded, CatalogSettings::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_or_default_partial_record() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), br#"{ "page_size": "Letter" }"#)
        .await
        .unwrap();

    // A record missing fields is discarded wholesale, never merged
    let loaded = CatalogSettings::load_or_default(temp_file.path()).await;
    assert_eq!(loaded, CatalogSettings::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_or_default_invalid_value() {
    use tempfile::NamedTempFile;

    let mut settings = CatalogSettings::default();
    settings.logo.width_mm = -10.0;
    let json = serde_json::to_string_pretty(&settings).unwrap();

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), json).await.unwrap();

    let loaded = CatalogSettings::load_or_default(temp_file.path()).await;
    assert_eq!(loaded, CatalogSettings::default());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_accepts_arial_alias() {
    use tempfile::NamedTempFile;

    let json = r##"{
        "page_size": "A4",
        "orientation": "Portrait",
        "logo": { "source": "BuiltIn", "width_mm": 25.0, "position": "top-left" },
        "title_font": { "family": "Arial", "size_pt": 14.0, "color": "#1E40AF" },
        "body_font": { "family": "Arial", "size_pt": 11.0, "color": "#0F172A" }
    }"##;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), json).await.unwrap();

    let loaded = CatalogSettings::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.title_font.family, FontFamily::Helvetica);
    assert_eq!(loaded.body_font.family, FontFamily::Helvetica);
}

#[test]
fn test_color_hex_round_trip() {
    let color: RgbColor = "#1E40AF".parse().unwrap();
    assert_eq!(color, RgbColor::new(0x1E, 0x40, 0xAF));
    assert_eq!(color.to_hex(), "#1E40AF");

    assert!("#12345".parse::<RgbColor>().is_err());
    assert!("zzzzzz".parse::<RgbColor>().is_err());
    assert!("112233".parse::<RgbColor>().is_ok());
}
