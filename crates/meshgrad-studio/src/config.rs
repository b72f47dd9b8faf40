//! Studio configuration, read from an optional JSON file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use meshgrad_canvas::RenderSettings;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "MESHGRAD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioConfig {
    /// `env_logger` filter; falls back to `RUST_LOG`.
    pub log_filter: Option<String>,
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// Label font. Common system fonts are tried when unset.
    pub font_path: Option<PathBuf>,
    pub export_path: PathBuf,
    pub document_path: PathBuf,
    /// Zoom factor per wheel notch.
    pub zoom_step: f32,
    /// Pixel-delta scroll distance that counts as one notch.
    pub wheel_line_px: f32,
    pub settings: RenderSettings,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            title: "meshgrad".to_string(),
            width: 1280.0,
            height: 800.0,
            font_path: None,
            export_path: PathBuf::from("meshgrad.png"),
            document_path: PathBuf::from("meshgrad.json"),
            zoom_step: 1.1,
            wheel_line_px: 40.0,
            settings: RenderSettings::default(),
        }
    }
}

impl StudioConfig {
    /// Loads from the first CLI argument, else `MESHGRAD_CONFIG`, else defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::args_os()
            .nth(1)
            .map(PathBuf::from)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(StudioConfig::from_json("{}").unwrap(), StudioConfig::default());
    }

    #[test]
    fn partial_config_overrides_fields() {
        let cfg = StudioConfig::from_json(
            r##"{"title":"grad","exportPath":"out.png","settings":{"showGrid":false}}"##,
        )
        .unwrap();
        assert_eq!(cfg.title, "grad");
        assert_eq!(cfg.export_path, PathBuf::from("out.png"));
        assert!(!cfg.settings.show_grid);
        assert_eq!(cfg.zoom_step, 1.1);
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = StudioConfig::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
