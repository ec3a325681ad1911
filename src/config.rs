use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Per-call sticker metadata supplied by the caller.
///
/// Every field is optional; absent fields take the defaults from
/// [`PackDefaults`] when the EXIF chunk is built. Caller-supplied values
/// are never overridden — an explicit empty string stays an empty string.
///
/// # Example
///
/// ```rust
/// use sticker_exif::config::StickerMetadata;
///
/// let meta = StickerMetadata {
///     pack_name: Some("Holiday Pack".into()),
///     author: None,                    // falls back to the default author
///     categories: Some(vec!["🎉".into()]),
///     is_avatar: None,                 // falls back to 0
///     double_small: false,
/// };
/// assert!(meta.has_branding());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StickerMetadata {
    /// Sticker-pack display name (`sticker-pack-name`).
    pub pack_name: Option<String>,
    /// Publisher name (`sticker-pack-publisher`).
    pub author: Option<String>,
    /// Emoji/category tags (`emojis`) — always emitted as a list.
    pub categories: Option<Vec<String>>,
    /// Avatar-sticker flag (`is-avatar-sticker`), 0 or 1.
    pub is_avatar: Option<u8>,
    /// Selects the output canvas policy: adaptive up to 640×640 for small
    /// sources instead of the fixed 320×320.
    #[serde(default)]
    pub double_small: bool,
}

impl StickerMetadata {
    /// Whether any branding field was supplied.
    ///
    /// When this is `false` the assembler skips the embedding step entirely
    /// and returns the WebP without metadata, so unbranded stickers don't
    /// carry a useless EXIF chunk.
    pub fn has_branding(&self) -> bool {
        self.pack_name.is_some() || self.author.is_some() || self.is_avatar.is_some()
    }
}

/// Fallback pack branding used for fields the caller leaves unset.
///
/// This replaces what was a process-wide global in earlier bot scripts:
/// it is constructed explicitly and passed by reference into the chunk
/// builder, so two callers can use different defaults concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackDefaults {
    /// Default `sticker-pack-name`.
    pub pack_name: String,
    /// Default publisher. Also used verbatim as the `sticker-pack-id`.
    pub author: String,
}

impl Default for PackDefaults {
    fn default() -> Self {
        Self {
            pack_name: "Trailblazer".to_string(),
            author: "© Azrefta".to_string(),
        }
    }
}

/// Top-level configuration for the sticker-exif library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Pack branding defaults.
    pub defaults: PackDefaults,
    /// Path or name of the ffmpeg executable.
    pub ffmpeg_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: PackDefaults::default(),
            ffmpeg_path: "ffmpeg".to_string(),
        }
    }
}

impl Config {
    /// Resolve the config file path — same directory as the executable.
    pub fn config_path() -> Result<PathBuf> {
        let exe_path = std::env::current_exe().context("Failed to get executable path")?;
        let exe_dir = exe_path
            .parent()
            .context("Failed to get executable directory")?;
        Ok(exe_dir.join("config.json"))
    }

    /// Load config from the given path, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the given path, or to the default location.
    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, contents).context("Failed to write config file")?;
        log::info!("Config saved to {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_pack_branding() {
        let d = PackDefaults::default();
        assert_eq!(d.pack_name, "Trailblazer");
        assert_eq!(d.author, "© Azrefta");
    }

    #[test]
    fn branding_guard_empty_metadata() {
        let meta = StickerMetadata::default();
        assert!(!meta.has_branding());
    }

    #[test]
    fn branding_guard_each_field() {
        let mut meta = StickerMetadata::default();
        meta.pack_name = Some("x".into());
        assert!(meta.has_branding());

        let mut meta = StickerMetadata::default();
        meta.author = Some(String::new()); // explicit empty still counts
        assert!(meta.has_branding());

        let mut meta = StickerMetadata::default();
        meta.is_avatar = Some(0);
        assert!(meta.has_branding());
    }

    #[test]
    fn categories_alone_are_not_branding() {
        let meta = StickerMetadata {
            categories: Some(vec!["🔥".into()]),
            ..Default::default()
        };
        assert!(!meta.has_branding());
    }

    #[test]
    fn config_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.defaults.pack_name = "Custom".to_string();
        config.ffmpeg_path = "/usr/local/bin/ffmpeg".to_string();
        config.save(Some(&path)).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.defaults.pack_name, "Custom");
        assert_eq!(loaded.ffmpeg_path, "/usr/local/bin/ffmpeg");
    }

    #[test]
    fn config_missing_file_uses_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/config.json"))).unwrap();
        assert_eq!(config.defaults.pack_name, "Trailblazer");
        assert_eq!(config.ffmpeg_path, "ffmpeg");
    }
}
