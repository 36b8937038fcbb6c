use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::note::{RenderOptions, DEFAULT_MISSING_REMINDER, DEFAULT_TIMESTAMP_FORMAT};

const APP_DOMAIN: &str = "io";
const APP_ORG: &str = "SmartNotes";
const APP_NAME: &str = "smart-notes";

pub const CONFIG_ENV: &str = "SMART_NOTES_CONFIG";

pub struct ConfigLoader {
    paths: ConfigPaths,
}

impl ConfigLoader {
    pub fn discover() -> Result<Self> {
        let paths = ConfigPaths::discover()?;
        Ok(Self { paths })
    }

    pub fn with_paths(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn load_or_init(&self) -> Result<AppConfig> {
        self.paths.ensure_directories()?;
        if !self.paths.config_file.exists() {
            let default_cfg = AppConfig::default();
            self.write_default_config(&default_cfg)?;
            tracing::info!(path = %self.paths.config_file.display(), "wrote default config");
            return Ok(default_cfg);
        }

        self.load()
    }

    pub fn load(&self) -> Result<AppConfig> {
        let raw = fs::read_to_string(&self.paths.config_file)
            .with_context(|| format!("reading config {}", self.paths.config_file.display()))?;
        let cfg: AppConfig = toml::from_str(&raw).context("parsing config toml")?;
        Ok(cfg)
    }

    fn write_default_config(&self, cfg: &AppConfig) -> Result<()> {
        let toml = toml::to_string_pretty(cfg).context("serializing default config")?;
        if let Some(parent) = self.paths.config_file.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut file = fs::File::create(&self.paths.config_file)
            .with_context(|| format!("creating config {}", self.paths.config_file.display()))?;
        file.write_all(toml.as_bytes())
            .context("writing default config")?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
}

impl ConfigPaths {
    pub fn discover() -> Result<Self> {
        let override_config = env::var(CONFIG_ENV).ok().map(PathBuf::from);

        let config_dir = match override_config.clone() {
            Some(p) if p.is_dir() => p,
            Some(p) => p.parent().map(Path::to_path_buf).unwrap_or(p),
            None => ProjectDirs::from(APP_DOMAIN, APP_ORG, APP_NAME)
                .context("resolving XDG project directories")?
                .config_dir()
                .to_path_buf(),
        };

        let config_file = override_config
            .filter(|p| p.is_file() || p.extension().is_some())
            .unwrap_or_else(|| config_dir.join("config.toml"));

        Ok(Self {
            config_dir,
            config_file,
        })
    }

    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.config_dir).with_context(|| {
            format!(
                "creating application directory {}",
                self.config_dir.display()
            )
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayOptions,
    pub session: SessionOptions,
}

impl AppConfig {
    /// Falls back to the default timestamp format when the configured one does not parse.
    pub fn render_options(&self) -> RenderOptions {
        let options = RenderOptions::default()
            .with_ids(self.display.show_ids)
            .with_missing_reminder_label(self.display.missing_reminder_label.as_str());
        match options
            .clone()
            .with_timestamp_format(&self.display.timestamp_format)
        {
            Ok(options) => options,
            Err(err) => {
                tracing::warn!(
                    %err,
                    format = %self.display.timestamp_format,
                    "invalid timestamp format in config, falling back to default"
                );
                options
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// `time` format description used for creation timestamps
    pub timestamp_format: String,
    pub show_ids: bool,
    /// Shown in place of the reminder time when a reminder note has none
    pub missing_reminder_label: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            show_ids: true,
            missing_reminder_label: DEFAULT_MISSING_REMINDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub show_menu: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { show_menu: true }
    }
}
