//! Runner configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use mindgames_common::{Error, Result};

/// Configuration for an acceptance run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Page under test, opened as a file URL
    pub page: PathBuf,

    /// Directory the report is written to
    pub output_dir: PathBuf,

    /// Bound for waits on a single element
    pub wait_timeout_secs: u64,

    /// Pause after each navigation click
    pub settle_delay_ms: u64,

    /// Browser launch settings
    pub browser: BrowserSettings,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            page: PathBuf::from("index.html"),
            output_dir: PathBuf::from("."),
            wait_timeout_secs: 10,
            settle_delay_ms: 1000,
            browser: BrowserSettings::default(),
        }
    }
}

/// Chrome launch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub no_sandbox: bool,
    pub disable_dev_shm: bool,

    /// Chrome binary; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            no_sandbox: true,
            disable_dev_shm: true,
            chrome_executable: None,
        }
    }
}

impl RunnerConfig {
    /// Load configuration from file, falling back to defaults if it is missing
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.wait_timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "wait_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.browser.window_width == 0 || self.browser.window_height == 0 {
            return Err(Error::InvalidConfig(format!(
                "window size {}x{} is empty",
                self.browser.window_width, self.browser.window_height
            )));
        }
        Ok(())
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// `file://` URL of the page under test
    pub fn page_url(&self) -> Result<String> {
        let path = std::fs::canonicalize(&self.page).map_err(|e| {
            Error::InvalidConfig(format!("page {}: {}", self.page.display(), e))
        })?;
        Ok(format!("file://{}", path.display()))
    }
}
