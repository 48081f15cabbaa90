use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Delay the processor waits before resolving a document's status
pub const DEFAULT_PROCESSING_DELAY_MS: u64 = 3000;

/// Port the HTTP boundary binds when nothing else is configured
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocqaConfig {
    pub port: Option<u16>,
    pub processing_delay_ms: Option<u64>,
    pub seed_dir: Option<String>,
}

impl DocqaConfig {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(
            self.processing_delay_ms
                .unwrap_or(DEFAULT_PROCESSING_DELAY_MS),
        )
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("docqa.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<DocqaConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: DocqaConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &DocqaConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
