use anyhow::Context;
use backdrop_core::EffectConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "backdrop".to_string(),
        }
    }
}

/// TOML file layout: effect options at the top level (same camelCase keys
/// as the web options object) plus an optional `[window]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub window: WindowOptions,
    #[serde(flatten)]
    pub effect: EffectConfig,
}

impl FileConfig {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// A positional image path wins over `imageSrc` from the file.
    pub fn with_image(mut self, image: Option<PathBuf>) -> Self {
        if let Some(path) = image {
            self.effect.image_src = path.to_string_lossy().into_owned();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_effect_keys_and_window_table() {
        let cfg = FileConfig::parse(
            r##"
            imageSrc = "bg.jpg"
            grid = 32
            particleColors = ["#ff0000"]

            [window]
            width = 800
            "##,
        )
        .unwrap();
        assert_eq!(cfg.effect.image_src, "bg.jpg");
        assert_eq!(cfg.effect.grid, 32);
        assert_eq!(cfg.effect.particle_colors, vec!["#ff0000".to_string()]);
        assert_eq!(cfg.effect.relaxation, 0.9);
        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.window.height, 720);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = FileConfig::parse("").unwrap();
        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn cli_image_overrides_file() {
        let cfg = FileConfig::parse("imageSrc = \"a.png\"")
            .unwrap()
            .with_image(Some(PathBuf::from("b.png")));
        assert_eq!(cfg.effect.image_src, "b.png");
        assert!(cfg.effect.validate().is_ok());
    }
}
